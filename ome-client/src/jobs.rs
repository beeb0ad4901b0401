//! Job service endpoints

use reqwest::Method;
use tracing::debug;

use crate::OmeClient;
use crate::error::{ClientError, Result};
use ome_core::domain::job::{ExecutionDetail, ExecutionHistory, Job, JobStatus};
use ome_core::dto::job::{
    ExecutionDetailResponse, ExecutionHistoryResponse, JobResponse, RunJobsRequest,
};
use ome_core::dto::odata::Collection;

impl OmeClient {
    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The OME job id
    ///
    /// # Returns
    /// The job record, including its last run status
    pub async fn get_job(&self, job_id: i64) -> Result<Job> {
        let path = format!("/api/JobService/Jobs({})", job_id);
        let response = self.request(Method::GET, &path).send().await?;

        let job: JobResponse = self.handle_response(response).await?;
        Ok(Job::from(job))
    }

    /// Get the current status of a job
    ///
    /// Convenience wrapper over [`OmeClient::get_job`] for callers that only
    /// care about the status code, such as the job monitor.
    pub async fn get_job_status(&self, job_id: i64) -> Result<JobStatus> {
        let job = self.get_job(job_id).await?;
        debug!("job {} status: {}", job_id, job.status);
        Ok(job.status)
    }

    /// Get the most recent execution-history record for a job
    ///
    /// OME returns execution histories newest first; the first row is the
    /// run the caller just monitored.
    pub async fn get_last_execution_detail(&self, job_id: i64) -> Result<ExecutionHistory> {
        let path = format!("/api/JobService/Jobs({})/ExecutionHistories", job_id);
        let response = self.request(Method::GET, &path).send().await?;

        let histories: Collection<ExecutionHistoryResponse> =
            self.handle_response(response).await?;

        histories
            .value
            .into_iter()
            .next()
            .map(ExecutionHistory::from)
            .ok_or_else(|| {
                ClientError::NotFound(format!("job {} has no execution history", job_id))
            })
    }

    /// Get the ordered result lines of one execution-history record
    ///
    /// # Arguments
    /// * `job_id` - The OME job id
    /// * `execution_history_id` - Id of the execution-history record to read
    pub async fn get_execution_details(
        &self,
        job_id: i64,
        execution_history_id: i64,
    ) -> Result<Vec<ExecutionDetail>> {
        let path = format!(
            "/api/JobService/Jobs({})/ExecutionHistories({})/ExecutionHistoryDetails",
            job_id, execution_history_id
        );
        let response = self.request(Method::GET, &path).send().await?;

        let details: Collection<ExecutionDetailResponse> = self.handle_response(response).await?;
        Ok(details
            .value
            .into_iter()
            .map(ExecutionDetail::from)
            .collect())
    }

    /// Run an existing job now
    ///
    /// # Arguments
    /// * `job_id` - The job to run
    pub async fn run_job(&self, job_id: i64) -> Result<()> {
        let response = self
            .request(Method::POST, "/api/JobService/Actions/JobService.RunJobs")
            .json(&RunJobsRequest::single(job_id))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
