//! Firmware baseline domain types

use serde::{Deserialize, Serialize};

use crate::domain::target::Target;

/// A named firmware target-version specification applied to a set of
/// devices or groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub catalog_id: i64,
    pub repository_id: i64,
    pub targets: Vec<Target>,
    pub is_64_bit: bool,
    pub filter_no_reboot_required: bool,
    pub downgrade_enabled: bool,
    /// Task id of the baseline compliance job OME created for this baseline.
    pub task_id: Option<i64>,
    pub task_status: Option<String>,
    pub compliance_summary: Option<ComplianceSummary>,
}

/// Rollup of a baseline's device compliance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub compliance_status: String,
    pub number_of_critical: i64,
    pub number_of_warning: i64,
    pub number_of_normal: i64,
    pub number_of_downgrade: i64,
    pub number_of_unknown: i64,
}

/// Desired baseline settings, as supplied by the caller.
///
/// This is the caller-facing shape used to build create and update
/// payloads; the wire DTOs live in `dto::baseline`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineSettings {
    pub name: String,
    pub description: String,
    pub catalog_id: i64,
    pub repository_id: i64,
    pub targets: Vec<Target>,
    pub is_64_bit: bool,
    pub filter_no_reboot_required: bool,
    pub downgrade_enabled: bool,
}
