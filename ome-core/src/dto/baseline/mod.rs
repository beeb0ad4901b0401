//! Update service baseline wire DTOs

use serde::{Deserialize, Serialize};

use crate::domain::baseline::{Baseline, BaselineSettings, ComplianceSummary};
use crate::domain::target::{Target, TargetType, TARGET_TYPE_GROUP};

/// Target entry as baselines carry it on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetWire {
    pub id: i64,
    #[serde(rename = "Type")]
    pub target_type: TargetTypeWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetTypeWire {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<&Target> for TargetWire {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id,
            target_type: TargetTypeWire {
                id: target.target_type.id(),
                name: Some(target.target_type.name().to_string()),
            },
        }
    }
}

impl From<TargetWire> for Target {
    fn from(wire: TargetWire) -> Self {
        let target_type = if wire.target_type.id == TARGET_TYPE_GROUP {
            TargetType::Group
        } else {
            TargetType::Device
        };
        Self {
            id: wire.id,
            target_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComplianceSummaryResponse {
    pub compliance_status: String,
    #[serde(default)]
    pub number_of_critical: i64,
    #[serde(default)]
    pub number_of_warning: i64,
    #[serde(default)]
    pub number_of_normal: i64,
    #[serde(default)]
    pub number_of_downgrade: i64,
    #[serde(default)]
    pub number_of_unknown: i64,
}

/// One row of `GET /api/UpdateService/Baselines`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaselineResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub catalog_id: i64,
    pub repository_id: i64,
    #[serde(default)]
    pub targets: Vec<TargetWire>,
    #[serde(default)]
    pub is_64_bit: bool,
    #[serde(default)]
    pub filter_no_reboot_required: bool,
    #[serde(default)]
    pub downgrade_enabled: bool,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub task_status: Option<String>,
    #[serde(default)]
    pub compliance_summary: Option<ComplianceSummaryResponse>,
}

impl From<BaselineResponse> for Baseline {
    fn from(response: BaselineResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            description: response.description,
            catalog_id: response.catalog_id,
            repository_id: response.repository_id,
            targets: response.targets.into_iter().map(Target::from).collect(),
            is_64_bit: response.is_64_bit,
            filter_no_reboot_required: response.filter_no_reboot_required,
            downgrade_enabled: response.downgrade_enabled,
            task_id: response.task_id.filter(|id| *id != 0),
            task_status: response.task_status,
            compliance_summary: response.compliance_summary.map(|summary| ComplianceSummary {
                compliance_status: summary.compliance_status,
                number_of_critical: summary.number_of_critical,
                number_of_warning: summary.number_of_warning,
                number_of_normal: summary.number_of_normal,
                number_of_downgrade: summary.number_of_downgrade,
                number_of_unknown: summary.number_of_unknown,
            }),
        }
    }
}

/// `POST /api/UpdateService/Baselines`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBaseline {
    pub name: String,
    pub description: String,
    pub catalog_id: i64,
    pub repository_id: i64,
    pub targets: Vec<TargetWire>,
    pub is_64_bit: bool,
    pub filter_no_reboot_required: bool,
    pub downgrade_enabled: bool,
}

impl From<&BaselineSettings> for CreateBaseline {
    fn from(settings: &BaselineSettings) -> Self {
        Self {
            name: settings.name.clone(),
            description: settings.description.clone(),
            catalog_id: settings.catalog_id,
            repository_id: settings.repository_id,
            targets: settings.targets.iter().map(TargetWire::from).collect(),
            is_64_bit: settings.is_64_bit,
            filter_no_reboot_required: settings.filter_no_reboot_required,
            downgrade_enabled: settings.downgrade_enabled,
        }
    }
}

/// `PUT /api/UpdateService/Baselines(<id>)`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateBaseline {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub catalog_id: i64,
    pub repository_id: i64,
    pub targets: Vec<TargetWire>,
    pub is_64_bit: bool,
    pub filter_no_reboot_required: bool,
    pub downgrade_enabled: bool,
}

impl UpdateBaseline {
    /// Builds the update payload from the desired settings and the baseline
    /// as OME currently has it.
    ///
    /// A field is taken from `desired` only when it is set (non-empty,
    /// non-zero) and differs from the current value; otherwise the current
    /// value is carried forward so the PUT never blanks a field the caller
    /// did not touch. Boolean flags always come from `desired`.
    pub fn diff(desired: &BaselineSettings, current: &Baseline) -> Self {
        let name = pick_string(&desired.name, &current.name);
        let description = pick_string(
            &desired.description,
            current.description.as_deref().unwrap_or_default(),
        );
        let catalog_id = pick_id(desired.catalog_id, current.catalog_id);
        let repository_id = pick_id(desired.repository_id, current.repository_id);
        let targets = if !desired.targets.is_empty() && desired.targets != current.targets {
            &desired.targets
        } else {
            &current.targets
        };

        Self {
            id: current.id,
            name,
            description,
            catalog_id,
            repository_id,
            targets: targets.iter().map(TargetWire::from).collect(),
            is_64_bit: desired.is_64_bit,
            filter_no_reboot_required: desired.filter_no_reboot_required,
            downgrade_enabled: desired.downgrade_enabled,
        }
    }
}

fn pick_string(desired: &str, current: &str) -> String {
    if !desired.is_empty() && desired != current {
        desired.to_string()
    } else {
        current.to_string()
    }
}

fn pick_id(desired: i64, current: i64) -> i64 {
    if desired != 0 && desired != current {
        desired
    } else {
        current
    }
}

/// `POST /api/UpdateService/Actions/UpdateService.RemoveBaselines`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoveBaselines {
    pub baseline_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_baseline() -> Baseline {
        Baseline {
            id: 7,
            name: "prod-baseline".to_string(),
            description: Some("march refresh".to_string()),
            catalog_id: 31,
            repository_id: 21,
            targets: vec![Target {
                id: 1001,
                target_type: TargetType::Device,
            }],
            is_64_bit: true,
            filter_no_reboot_required: false,
            downgrade_enabled: false,
            task_id: Some(10913),
            task_status: None,
            compliance_summary: None,
        }
    }

    #[test]
    fn test_diff_carries_untouched_fields_forward() {
        let desired = BaselineSettings {
            name: String::new(),
            description: String::new(),
            catalog_id: 0,
            repository_id: 0,
            targets: Vec::new(),
            is_64_bit: true,
            filter_no_reboot_required: false,
            downgrade_enabled: false,
        };
        let payload = UpdateBaseline::diff(&desired, &current_baseline());

        assert_eq!(payload.id, 7);
        assert_eq!(payload.name, "prod-baseline");
        assert_eq!(payload.description, "march refresh");
        assert_eq!(payload.catalog_id, 31);
        assert_eq!(payload.repository_id, 21);
        assert_eq!(payload.targets.len(), 1);
        assert_eq!(payload.targets[0].id, 1001);
    }

    #[test]
    fn test_diff_takes_changed_fields() {
        let desired = BaselineSettings {
            name: "prod-baseline-v2".to_string(),
            description: "april refresh".to_string(),
            catalog_id: 32,
            repository_id: 22,
            targets: vec![Target {
                id: 2002,
                target_type: TargetType::Group,
            }],
            is_64_bit: true,
            filter_no_reboot_required: true,
            downgrade_enabled: true,
        };
        let payload = UpdateBaseline::diff(&desired, &current_baseline());

        assert_eq!(payload.name, "prod-baseline-v2");
        assert_eq!(payload.description, "april refresh");
        assert_eq!(payload.catalog_id, 32);
        assert_eq!(payload.repository_id, 22);
        assert_eq!(payload.targets[0].id, 2002);
        assert_eq!(payload.targets[0].target_type.id, 2000);
        assert!(payload.filter_no_reboot_required);
        assert!(payload.downgrade_enabled);
    }

    #[test]
    fn test_diff_equal_value_is_not_a_change() {
        let mut desired = BaselineSettings {
            name: "prod-baseline".to_string(),
            ..Default::default()
        };
        desired.catalog_id = 31;
        let payload = UpdateBaseline::diff(&desired, &current_baseline());

        assert_eq!(payload.name, "prod-baseline");
        assert_eq!(payload.catalog_id, 31);
    }

    #[test]
    fn test_create_payload_wire_shape() {
        let settings = BaselineSettings {
            name: "new-baseline".to_string(),
            catalog_id: 31,
            repository_id: 21,
            targets: vec![Target {
                id: 1001,
                target_type: TargetType::Device,
            }],
            ..Default::default()
        };
        let body = serde_json::to_value(CreateBaseline::from(&settings)).unwrap();

        assert_eq!(body["Name"], "new-baseline");
        assert_eq!(body["Targets"][0]["Id"], 1001);
        assert_eq!(body["Targets"][0]["Type"]["Id"], 1000);
        assert_eq!(body["Targets"][0]["Type"]["Name"], "DEVICE");
    }
}
