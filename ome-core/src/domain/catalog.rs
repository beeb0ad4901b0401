//! Firmware catalog domain types

use serde::{Deserialize, Serialize};

/// Where a catalog's repository lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryType {
    Nfs,
    Cifs,
    Http,
    Https,
    DellOnline,
}

impl RepositoryType {
    /// The string OME uses for this repository type on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nfs => "NFS",
            Self::Cifs => "CIFS",
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
            Self::DellOnline => "DELL_ONLINE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NFS" => Some(Self::Nfs),
            "CIFS" => Some(Self::Cifs),
            "HTTP" => Some(Self::Http),
            "HTTPS" => Some(Self::Https),
            "DELL_ONLINE" => Some(Self::DellOnline),
            _ => None,
        }
    }
}

impl std::fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A firmware repository a catalog is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub source: String,
    pub repository_type: RepositoryType,
    pub domain_name: Option<String>,
    pub username: Option<String>,
    pub check_certificate: bool,
}

/// A firmware catalog known to OME.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub id: i64,
    pub name: String,
    pub filename: String,
    pub source_path: String,
    pub status: Option<String>,
    pub last_update: Option<chrono::DateTime<chrono::Utc>>,
    pub repository: Repository,
    pub associated_baseline_ids: Vec<i64>,
    /// Task id of the catalog refresh job, when one has run.
    pub task_id: Option<i64>,
}
