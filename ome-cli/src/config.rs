//! Configuration module
//!
//! Holds the appliance connection settings and builds the shared client.

use anyhow::{Context, Result};
use ome_client::OmeClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the OME appliance
    pub url: String,
    /// Appliance account name
    pub username: String,
    /// Appliance account password
    pub password: String,
    /// Accept self-signed appliance certificates
    pub insecure: bool,
}

impl Config {
    /// Builds an OME client from the connection settings.
    ///
    /// Appliances ship with self-signed certificates; `insecure` opts into
    /// accepting them.
    pub fn client(&self) -> Result<OmeClient> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(OmeClient::with_client(
            &self.url,
            &self.username,
            &self.password,
            http_client,
        ))
    }
}
