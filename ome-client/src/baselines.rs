//! Update service baseline endpoints

use reqwest::Method;
use tracing::debug;

use crate::OmeClient;
use crate::error::{ClientError, Result};
use ome_core::domain::baseline::{Baseline, BaselineSettings};
use ome_core::dto::baseline::{BaselineResponse, CreateBaseline, RemoveBaselines, UpdateBaseline};
use ome_core::dto::odata::Collection;

impl OmeClient {
    /// List all firmware baselines
    pub async fn list_baselines(&self) -> Result<Vec<Baseline>> {
        let response = self
            .request(Method::GET, "/api/UpdateService/Baselines")
            .send()
            .await?;

        let baselines: Collection<BaselineResponse> = self.handle_response(response).await?;
        Ok(baselines.value.into_iter().map(Baseline::from).collect())
    }

    /// Get a baseline by ID
    pub async fn get_baseline(&self, baseline_id: i64) -> Result<Baseline> {
        let path = format!("/api/UpdateService/Baselines({})", baseline_id);
        let response = self.request(Method::GET, &path).send().await?;

        let baseline: BaselineResponse = self.handle_response(response).await?;
        Ok(Baseline::from(baseline))
    }

    /// Get a baseline by name
    ///
    /// Baseline names are unique per appliance; the collection has no
    /// server-side name filter, so this lists and selects locally.
    pub async fn get_baseline_by_name(&self, name: &str) -> Result<Baseline> {
        let baselines = self.list_baselines().await?;
        debug!("searching {} baseline(s) for '{}'", baselines.len(), name);

        baselines
            .into_iter()
            .find(|baseline| baseline.name == name)
            .ok_or_else(|| ClientError::NotFound(format!("baseline '{}' not found", name)))
    }

    /// Create a firmware baseline
    ///
    /// # Returns
    /// The created baseline; its `task_id` points at the compliance job OME
    /// schedules against the targets.
    pub async fn create_baseline(&self, settings: &BaselineSettings) -> Result<Baseline> {
        let response = self
            .request(Method::POST, "/api/UpdateService/Baselines")
            .json(&CreateBaseline::from(settings))
            .send()
            .await?;

        let baseline: BaselineResponse = self.handle_response(response).await?;
        Ok(Baseline::from(baseline))
    }

    /// Update a firmware baseline
    ///
    /// Only fields set in `desired` that differ from `current` are sent as
    /// changed; everything else is carried forward unchanged (see
    /// [`UpdateBaseline::diff`]).
    pub async fn update_baseline(
        &self,
        desired: &BaselineSettings,
        current: &Baseline,
    ) -> Result<Baseline> {
        let path = format!("/api/UpdateService/Baselines({})", current.id);
        let response = self
            .request(Method::PUT, &path)
            .json(&UpdateBaseline::diff(desired, current))
            .send()
            .await?;

        let baseline: BaselineResponse = self.handle_response(response).await?;
        Ok(Baseline::from(baseline))
    }

    /// Delete a baseline
    pub async fn delete_baseline(&self, baseline_id: i64) -> Result<()> {
        let response = self
            .request(
                Method::POST,
                "/api/UpdateService/Actions/UpdateService.RemoveBaselines",
            )
            .json(&RemoveBaselines {
                baseline_ids: vec![baseline_id],
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
