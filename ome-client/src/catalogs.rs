//! Update service catalog endpoints

use reqwest::Method;
use tracing::debug;

use crate::OmeClient;
use crate::error::{ClientError, Result};
use ome_core::domain::catalog::Catalog;
use ome_core::dto::catalog::{
    CatalogResponse, CatalogSource, CreateCatalog, RefreshCatalogs, RemoveCatalogs,
};
use ome_core::dto::odata::Collection;

impl OmeClient {
    /// List all firmware catalogs
    pub async fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        let response = self
            .request(Method::GET, "/api/UpdateService/Catalogs")
            .send()
            .await?;

        let catalogs: Collection<CatalogResponse> = self.handle_response(response).await?;
        Ok(catalogs.value.into_iter().map(Catalog::from).collect())
    }

    /// Get a catalog by its repository name
    ///
    /// The catalog collection has no server-side name filter, so this lists
    /// and selects the match locally.
    pub async fn get_catalog_by_name(&self, name: &str) -> Result<Catalog> {
        let catalogs = self.list_catalogs().await?;
        debug!("searching {} catalog(s) for '{}'", catalogs.len(), name);

        catalogs
            .into_iter()
            .find(|catalog| catalog.name == name)
            .ok_or_else(|| ClientError::NotFound(format!("catalog '{}' not found", name)))
    }

    /// Create a catalog from a repository source
    ///
    /// # Returns
    /// The created catalog; its `task_id` points at the download job OME
    /// schedules to fetch the catalog file.
    pub async fn create_catalog(&self, source: CatalogSource) -> Result<Catalog> {
        let response = self
            .request(Method::POST, "/api/UpdateService/Catalogs")
            .json(&CreateCatalog::from_source(source))
            .send()
            .await?;

        let catalog: CatalogResponse = self.handle_response(response).await?;
        Ok(Catalog::from(catalog))
    }

    /// Refresh a catalog from its repository
    pub async fn refresh_catalog(&self, catalog_id: i64) -> Result<()> {
        let response = self
            .request(
                Method::POST,
                "/api/UpdateService/Actions/UpdateService.RefreshCatalogs",
            )
            .json(&RefreshCatalogs {
                catalog_ids: vec![catalog_id],
                all_catalogs: false,
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Delete a catalog
    ///
    /// Fails on the appliance side while baselines still reference the
    /// catalog; the error body names them.
    pub async fn delete_catalog(&self, catalog_id: i64) -> Result<()> {
        let response = self
            .request(
                Method::POST,
                "/api/UpdateService/Actions/UpdateService.RemoveCatalogs",
            )
            .json(&RemoveCatalogs {
                catalog_ids: vec![catalog_id],
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
