//! Device compliance report wire DTOs

use serde::Deserialize;

use crate::domain::compliance::{
    ComplianceStatus, ComponentComplianceReport, DeviceComplianceReport,
};

/// One row of `GET /api/UpdateService/Baselines(<id>)/DeviceComplianceReports`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceComplianceResponse {
    pub device_id: i64,
    pub service_tag: String,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub firmware_status: Option<String>,
    #[serde(default)]
    pub component_compliance_reports: Vec<ComponentComplianceResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentComplianceResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub current_version: Option<String>,
    /// Version the baseline expects.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub criticality: Option<String>,
    #[serde(default)]
    pub update_action: Option<String>,
    #[serde(default)]
    pub reboot_required: bool,
    #[serde(default)]
    pub source_name: Option<String>,
}

impl From<ComponentComplianceResponse> for ComponentComplianceReport {
    fn from(response: ComponentComplianceResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            current_version: response.current_version.unwrap_or_default(),
            baseline_version: response.version.unwrap_or_default(),
            criticality: response.criticality,
            update_action: response
                .update_action
                .as_deref()
                .map(ComplianceStatus::from_update_action)
                .unwrap_or(ComplianceStatus::Unknown),
            reboot_required: response.reboot_required,
            source_name: response.source_name,
        }
    }
}

impl From<DeviceComplianceResponse> for DeviceComplianceReport {
    fn from(response: DeviceComplianceResponse) -> Self {
        Self {
            device_id: response.device_id,
            device_name: response.device_name,
            device_model: response.device_model,
            service_tag: response.service_tag,
            firmware_status: response.firmware_status.unwrap_or_default(),
            components: response
                .component_compliance_reports
                .into_iter()
                .map(ComponentComplianceReport::from)
                .collect(),
        }
    }
}

/// Keeps only the reports whose device name or service tag is in `devices`.
///
/// An empty filter keeps everything.
pub fn filter_reports(
    reports: Vec<DeviceComplianceReport>,
    devices: &[String],
) -> Vec<DeviceComplianceReport> {
    if devices.is_empty() {
        return reports;
    }
    reports
        .into_iter()
        .filter(|report| {
            devices.iter().any(|wanted| {
                report.service_tag == *wanted
                    || report.device_name.as_deref() == Some(wanted.as_str())
            })
        })
        .collect()
}
