//! Update service catalog wire DTOs

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, Repository, RepositoryType};
use crate::dto::odata::parse_ome_time;

/// Repository payload nested inside catalog responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: String,
    pub repository_type: String,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub check_certificate: bool,
}

impl From<RepositoryResponse> for Repository {
    fn from(response: RepositoryResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            description: response.description,
            source: response.source,
            repository_type: RepositoryType::parse(&response.repository_type)
                .unwrap_or(RepositoryType::DellOnline),
            domain_name: response.domain_name,
            username: response.username,
            check_certificate: response.check_certificate,
        }
    }
}

/// One row of `GET /api/UpdateService/Catalogs`
///
/// Catalogs have no name of their own; OME identifies them by the name of
/// their repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogResponse {
    pub id: i64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
    pub repository: RepositoryResponse,
    #[serde(default)]
    pub associated_baseline_ids: Vec<i64>,
    #[serde(default)]
    pub task_id: Option<i64>,
}

impl From<CatalogResponse> for Catalog {
    fn from(response: CatalogResponse) -> Self {
        let repository = Repository::from(response.repository);
        Self {
            id: response.id,
            name: repository.name.clone(),
            filename: response.filename.unwrap_or_default(),
            source_path: response.source_path.unwrap_or_default(),
            status: response.status,
            last_update: response.last_update.as_deref().and_then(parse_ome_time),
            repository,
            associated_baseline_ids: response.associated_baseline_ids,
            task_id: response.task_id.filter(|id| *id != 0),
        }
    }
}

/// Caller-supplied description of a catalog source.
#[derive(Debug, Clone, Default)]
pub struct CatalogSource {
    pub name: String,
    pub description: String,
    pub repository_type: Option<RepositoryType>,
    /// Host or share the repository lives on (e.g. "downloads.dell.com").
    pub source: String,
    /// Path to the catalog file within the repository.
    pub source_path: String,
    pub filename: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub domain_name: Option<String>,
    pub check_certificate: bool,
}

/// `POST /api/UpdateService/Catalogs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCatalog {
    pub filename: String,
    pub source_path: String,
    pub repository: CreateRepository,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRepository {
    pub name: String,
    pub description: String,
    pub repository_type: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    pub check_certificate: bool,
}

impl CreateCatalog {
    /// Builds the creation payload. A Dell-online catalog needs no source
    /// details; OME fills in downloads.dell.com when the source is empty.
    pub fn from_source(source: CatalogSource) -> Self {
        let repository_type = source
            .repository_type
            .unwrap_or(RepositoryType::DellOnline);
        Self {
            filename: source.filename,
            source_path: source.source_path,
            repository: CreateRepository {
                name: source.name,
                description: source.description,
                repository_type: repository_type.as_str().to_string(),
                source: source.source,
                username: source.username,
                password: source.password,
                domain_name: source.domain_name,
                check_certificate: source.check_certificate,
            },
        }
    }
}

/// `POST /api/UpdateService/Actions/UpdateService.RemoveCatalogs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoveCatalogs {
    pub catalog_ids: Vec<i64>,
}

/// `POST /api/UpdateService/Actions/UpdateService.RefreshCatalogs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshCatalogs {
    pub catalog_ids: Vec<i64>,
    pub all_catalogs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_response_mapping() {
        let body = r#"{
            "Id": 31,
            "Filename": "catalog.xml",
            "SourcePath": "catalog/catalog.gz",
            "Status": "Completed",
            "LastUpdate": "2024-03-18 09:45:12.301",
            "Repository": {
                "Id": 21,
                "Name": "dell-online",
                "Source": "downloads.dell.com",
                "RepositoryType": "DELL_ONLINE",
                "CheckCertificate": false
            },
            "AssociatedBaselineIds": [7, 9],
            "TaskId": 0
        }"#;
        let response: CatalogResponse = serde_json::from_str(body).unwrap();
        let catalog = Catalog::from(response);

        assert_eq!(catalog.id, 31);
        assert_eq!(catalog.name, "dell-online");
        assert_eq!(catalog.repository.repository_type, RepositoryType::DellOnline);
        assert_eq!(catalog.associated_baseline_ids, vec![7, 9]);
        // OME uses TaskId 0 for "no refresh has run"
        assert_eq!(catalog.task_id, None);
    }

    #[test]
    fn test_create_catalog_omits_empty_credentials() {
        let payload = CreateCatalog::from_source(CatalogSource {
            name: "nfs-repo".to_string(),
            repository_type: Some(RepositoryType::Nfs),
            source: "192.168.1.10".to_string(),
            source_path: "exports/firmware".to_string(),
            filename: "catalog.xml".to_string(),
            ..Default::default()
        });
        let body = serde_json::to_value(&payload).unwrap();

        assert_eq!(body["Repository"]["RepositoryType"], "NFS");
        assert!(body["Repository"].get("Username").is_none());
        assert!(body["Repository"].get("Password").is_none());
    }
}
