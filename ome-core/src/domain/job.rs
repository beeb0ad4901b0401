//! Job domain types

use serde::{Deserialize, Serialize};

/// Remote job status as reported by the OME job service.
///
/// OME reports status as a numeric code; [`JobStatus::from_code`] is the
/// single place those codes are interpreted, so a new code shows up as
/// `Unknown` instead of being silently mislabeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Scheduled,
    Queued,
    Starting,
    Running,
    New,
    Paused,
    CompletedWithSuccess,
    Failed,
    CompletedWithError,
    Aborted,
    Stopped,
    Cancelled,
    NotRun,
    /// A status code this crate does not recognize.
    Unknown,
}

impl JobStatus {
    /// Maps an OME numeric status code to its status.
    pub fn from_code(code: i64) -> Self {
        match code {
            2020 => Self::Scheduled,
            2030 => Self::Queued,
            2040 => Self::Starting,
            2050 => Self::Running,
            2060 => Self::CompletedWithSuccess,
            2070 => Self::Failed,
            2080 => Self::New,
            2090 => Self::CompletedWithError,
            2100 => Self::Aborted,
            2101 => Self::Paused,
            2102 => Self::Stopped,
            2103 => Self::Cancelled,
            2200 => Self::NotRun,
            _ => Self::Unknown,
        }
    }

    /// The numeric code OME uses for this status, if it has one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Scheduled => Some(2020),
            Self::Queued => Some(2030),
            Self::Starting => Some(2040),
            Self::Running => Some(2050),
            Self::CompletedWithSuccess => Some(2060),
            Self::Failed => Some(2070),
            Self::New => Some(2080),
            Self::CompletedWithError => Some(2090),
            Self::Aborted => Some(2100),
            Self::Paused => Some(2101),
            Self::Stopped => Some(2102),
            Self::Cancelled => Some(2103),
            Self::NotRun => Some(2200),
            Self::Unknown => None,
        }
    }

    /// Fixed display label, matching the OME job status table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Queued => "Queued",
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::New => "New",
            Self::Paused => "Paused",
            Self::CompletedWithSuccess => "Completed",
            Self::Failed => "Failed",
            Self::CompletedWithError => "Warning",
            Self::Aborted => "Aborted",
            Self::Stopped => "Stopped",
            Self::Cancelled => "Canceled",
            Self::NotRun => "NotRun",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the remote job will not transition any further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::CompletedWithSuccess
                | Self::CompletedWithError
                | Self::Failed
                | Self::Aborted
                | Self::Stopped
                | Self::Cancelled
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Job record as tracked by the OME job service.
///
/// `status` is the job's last run status; OME keeps the schedule state
/// ("Enabled"/"Disabled") separately in `state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub job_type: String,
    pub state: String,
    pub status: JobStatus,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// The most recent execution-history record for a job.
///
/// A job accumulates one of these per run; the monitor only ever fetches
/// the latest one to read its result lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionHistory {
    pub id: i64,
    pub job_id: i64,
    pub status: JobStatus,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub progress: Option<String>,
}

/// A single free-text result line from an execution-history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDetail {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping_round_trip() {
        for code in [
            2020, 2030, 2040, 2050, 2060, 2070, 2080, 2090, 2100, 2101, 2102, 2103, 2200,
        ] {
            let status = JobStatus::from_code(code);
            assert_eq!(status.code(), Some(code));
        }
    }

    #[test]
    fn test_fixed_labels() {
        assert_eq!(JobStatus::from_code(2060).label(), "Completed");
        assert_eq!(JobStatus::from_code(2100).label(), "Aborted");
        assert_eq!(JobStatus::from_code(2090).label(), "Warning");
        assert_eq!(JobStatus::from_code(2050).label(), "Running");
        assert_eq!(JobStatus::from_code(2200).label(), "NotRun");
    }

    #[test]
    fn test_unrecognized_code_is_unknown() {
        assert_eq!(JobStatus::from_code(0), JobStatus::Unknown);
        assert_eq!(JobStatus::from_code(9999), JobStatus::Unknown);
        assert_eq!(JobStatus::from_code(-1), JobStatus::Unknown);
        assert_eq!(JobStatus::Unknown.label(), "Unknown");
        assert_eq!(JobStatus::Unknown.code(), None);
    }

    #[test]
    fn test_terminal_set() {
        let terminal = [
            JobStatus::CompletedWithSuccess,
            JobStatus::CompletedWithError,
            JobStatus::Failed,
            JobStatus::Aborted,
            JobStatus::Stopped,
            JobStatus::Cancelled,
        ];
        for status in terminal {
            assert!(status.is_terminal(), "{status} should be terminal");
        }

        let non_terminal = [
            JobStatus::Scheduled,
            JobStatus::Queued,
            JobStatus::Starting,
            JobStatus::Running,
            JobStatus::New,
            JobStatus::Paused,
            JobStatus::NotRun,
            JobStatus::Unknown,
        ];
        for status in non_terminal {
            assert!(!status.is_terminal(), "{status} should not be terminal");
        }
    }
}
