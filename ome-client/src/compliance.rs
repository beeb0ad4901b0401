//! Device compliance report endpoints

use reqwest::Method;

use crate::OmeClient;
use crate::error::Result;
use ome_core::domain::compliance::DeviceComplianceReport;
use ome_core::dto::compliance::{DeviceComplianceResponse, filter_reports};
use ome_core::dto::odata::Collection;

impl OmeClient {
    /// Get the device compliance reports for a baseline
    ///
    /// # Arguments
    /// * `baseline_id` - The baseline whose reports to read
    /// * `devices` - Optional device names or service tags to keep; empty
    ///   keeps every device in the baseline
    pub async fn get_compliance_reports(
        &self,
        baseline_id: i64,
        devices: &[String],
    ) -> Result<Vec<DeviceComplianceReport>> {
        let path = format!(
            "/api/UpdateService/Baselines({})/DeviceComplianceReports",
            baseline_id
        );
        let response = self.request(Method::GET, &path).send().await?;

        let reports: Collection<DeviceComplianceResponse> = self.handle_response(response).await?;
        let reports = reports
            .value
            .into_iter()
            .map(DeviceComplianceReport::from)
            .collect();

        Ok(filter_reports(reports, devices))
    }
}
