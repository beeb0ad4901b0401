//! OME HTTP Client
//!
//! A type-safe HTTP client for the Dell OpenManage Enterprise REST API.
//!
//! This crate covers the update-service surface used by the toolkit:
//! firmware catalogs, baselines, device compliance reports, and the job
//! service endpoints the monitor polls.
//!
//! # Example
//!
//! ```no_run
//! use ome_client::OmeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ome_client::ClientError> {
//!     let client = OmeClient::new("https://ome.example.com", "admin", "password");
//!
//!     for catalog in client.list_catalogs().await? {
//!         println!("{} ({})", catalog.name, catalog.repository.repository_type);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

mod baselines;
mod catalogs;
mod compliance;
mod devices;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use ome_core::dto::odata::ApiErrorBody;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the OME REST API
///
/// This client provides methods for the endpoints the toolkit uses,
/// organized into logical groups:
/// - Catalog management (list, get, create, refresh, delete)
/// - Baseline management (list, get, create, update, delete)
/// - Device compliance reports
/// - Job service reads (status, execution histories) and job runs
///
/// Every request carries HTTP basic auth; OME accepts that on all the
/// endpoints used here, so no session bookkeeping is needed.
#[derive(Debug, Clone)]
pub struct OmeClient {
    /// Base URL of the appliance (e.g., "https://ome.example.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    username: String,
    password: String,
}

impl OmeClient {
    /// Create a new OME client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the appliance (e.g., "https://ome.example.com")
    /// * `username` - Appliance account name
    /// * `password` - Appliance account password
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, username, password, Client::new())
    }

    /// Create a new OME client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, and TLS settings.
    /// Appliances commonly run with self-signed certificates, in which case
    /// the caller builds a reqwest `Client` that accepts them.
    ///
    /// # Example
    /// ```
    /// use ome_client::OmeClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .danger_accept_invalid_certs(true)
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = OmeClient::with_client("https://ome.example.com", "admin", "pw", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Get the base URL of the appliance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an authenticated request for an API path.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no useful body (actions, DELETE)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), response).await);
        }

        Ok(())
    }

    /// Turns a non-2xx response into an error, preferring the structured
    /// OData error body when OME supplies one.
    async fn error_from_body(status: u16, response: reqwest::Response) -> ClientError {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => ClientError::api_error(status, body.to_message()),
            Err(_) => ClientError::api_error(status, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OmeClient::new("https://ome.example.com", "admin", "pw");
        assert_eq!(client.base_url(), "https://ome.example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = OmeClient::new("https://ome.example.com/", "admin", "pw");
        assert_eq!(client.base_url(), "https://ome.example.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client =
            OmeClient::with_client("https://ome.example.com", "admin", "pw", http_client);
        assert_eq!(client.base_url(), "https://ome.example.com");
    }
}
