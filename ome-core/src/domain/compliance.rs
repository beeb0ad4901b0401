//! Firmware compliance domain types

use serde::{Deserialize, Serialize};

/// What a component needs relative to the baseline's expected version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Installed version matches the baseline.
    Compliant,
    /// Installed version is newer than the baseline.
    Downgrade,
    /// Installed version is older than the baseline.
    Upgrade,
    Unknown,
}

impl ComplianceStatus {
    /// Maps the OME update-action string for a component.
    pub fn from_update_action(action: &str) -> Self {
        match action {
            "EQUAL" => Self::Compliant,
            "DOWNGRADE" => Self::Downgrade,
            "UPGRADE" => Self::Upgrade,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Downgrade => "Downgrade",
            Self::Upgrade => "Upgrade",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-component comparison against the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentComplianceReport {
    pub id: i64,
    pub name: String,
    pub current_version: String,
    pub baseline_version: String,
    pub criticality: Option<String>,
    pub update_action: ComplianceStatus,
    pub reboot_required: bool,
    pub source_name: Option<String>,
}

/// A device's firmware compliance against a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceComplianceReport {
    pub device_id: i64,
    pub device_name: Option<String>,
    pub device_model: Option<String>,
    pub service_tag: String,
    pub firmware_status: String,
    pub components: Vec<ComponentComplianceReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_action_mapping() {
        assert_eq!(
            ComplianceStatus::from_update_action("EQUAL"),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            ComplianceStatus::from_update_action("UPGRADE"),
            ComplianceStatus::Upgrade
        );
        assert_eq!(
            ComplianceStatus::from_update_action("DOWNGRADE"),
            ComplianceStatus::Downgrade
        );
        assert_eq!(
            ComplianceStatus::from_update_action("SIDEWAYS"),
            ComplianceStatus::Unknown
        );
    }
}
