//! Job service wire DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{ExecutionDetail, ExecutionHistory, Job, JobStatus};
use crate::dto::odata::parse_ome_time;

/// Status reference embedded in job payloads (`{"Id": 2060, "Name": "Completed"}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Job type reference embedded in job payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobTypeRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /api/JobService/Jobs(<id>)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobResponse {
    pub id: i64,
    pub job_name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobTypeRef>,
    pub last_run_status: StatusRef,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl From<JobResponse> for Job {
    fn from(response: JobResponse) -> Self {
        Self {
            id: response.id,
            name: response.job_name,
            job_type: response
                .job_type
                .and_then(|t| t.name)
                .unwrap_or_default(),
            state: response.state.unwrap_or_default(),
            status: JobStatus::from_code(response.last_run_status.id),
            start_time: response.start_time.as_deref().and_then(parse_ome_time),
            end_time: response.end_time.as_deref().and_then(parse_ome_time),
        }
    }
}

/// One row of `GET /api/JobService/Jobs(<id>)/ExecutionHistories`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionHistoryResponse {
    pub id: i64,
    pub job_id: i64,
    #[serde(default)]
    pub job_status: Option<StatusRef>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl From<ExecutionHistoryResponse> for ExecutionHistory {
    fn from(response: ExecutionHistoryResponse) -> Self {
        Self {
            id: response.id,
            job_id: response.job_id,
            status: response
                .job_status
                .map(|s| JobStatus::from_code(s.id))
                .unwrap_or(JobStatus::Unknown),
            start_time: response.start_time.as_deref().and_then(parse_ome_time),
            end_time: response.end_time.as_deref().and_then(parse_ome_time),
            progress: response.progress,
        }
    }
}

/// One row of `…/ExecutionHistories(<id>)/ExecutionHistoryDetails`
///
/// `Key` names the target the line applies to, `Value` carries the
/// free-text result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionDetailResponse {
    pub id: i64,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl From<ExecutionDetailResponse> for ExecutionDetail {
    fn from(response: ExecutionDetailResponse) -> Self {
        Self {
            key: response.key.unwrap_or_default(),
            value: response.value.unwrap_or_default(),
        }
    }
}

/// `POST /api/JobService/Actions/JobService.RunJobs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunJobsRequest {
    pub job_ids: Vec<i64>,
    pub all_jobs: bool,
}

impl RunJobsRequest {
    pub fn single(job_id: i64) -> Self {
        Self {
            job_ids: vec![job_id],
            all_jobs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_response_mapping() {
        let body = r#"{
            "Id": 10913,
            "JobName": "Default Inventory Task",
            "State": "Enabled",
            "JobType": {"Id": 8, "Name": "Inventory_Task"},
            "LastRunStatus": {"Id": 2060, "Name": "Completed"},
            "StartTime": "2024-03-18 09:45:12.301",
            "EndTime": null
        }"#;
        let response: JobResponse = serde_json::from_str(body).unwrap();
        let job = Job::from(response);

        assert_eq!(job.id, 10913);
        assert_eq!(job.name, "Default Inventory Task");
        assert_eq!(job.job_type, "Inventory_Task");
        assert_eq!(job.state, "Enabled");
        assert_eq!(job.status, JobStatus::CompletedWithSuccess);
        assert!(job.start_time.is_some());
        assert!(job.end_time.is_none());
    }

    #[test]
    fn test_execution_history_without_status() {
        let body = r#"{"Id": 21, "JobId": 10913, "Progress": "100"}"#;
        let response: ExecutionHistoryResponse = serde_json::from_str(body).unwrap();
        let history = ExecutionHistory::from(response);

        assert_eq!(history.id, 21);
        assert_eq!(history.job_id, 10913);
        assert_eq!(history.status, JobStatus::Unknown);
        assert_eq!(history.progress.as_deref(), Some("100"));
    }

    #[test]
    fn test_run_jobs_request_shape() {
        let request = RunJobsRequest::single(42);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["JobIds"], serde_json::json!([42]));
        assert_eq!(body["AllJobs"], serde_json::json!(false));
    }
}
