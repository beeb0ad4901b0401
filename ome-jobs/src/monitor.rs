//! Job monitor
//!
//! Watches a single remote job: poll status at a fixed interval, stop on a
//! terminal status or an exhausted retry budget, then fetch the run's
//! execution log. One monitor instance per watched job; it holds nothing
//! but its counters and is dropped when `watch` returns.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::sleep::{Sleeper, TokioSleeper};
use ome_client::{ClientError, OmeClient};
use ome_core::domain::job::{ExecutionDetail, ExecutionHistory, JobStatus};

/// The job-service reads the monitor depends on.
///
/// `OmeClient` is the production implementation; tests script one.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Current status of the job.
    async fn job_status(&self, job_id: i64) -> Result<JobStatus, ClientError>;

    /// Most recent execution-history record of the job.
    async fn last_execution_detail(&self, job_id: i64) -> Result<ExecutionHistory, ClientError>;

    /// Ordered result lines of one execution-history record.
    async fn execution_details(
        &self,
        job_id: i64,
        execution_history_id: i64,
    ) -> Result<Vec<ExecutionDetail>, ClientError>;
}

#[async_trait]
impl JobService for OmeClient {
    async fn job_status(&self, job_id: i64) -> Result<JobStatus, ClientError> {
        self.get_job_status(job_id).await
    }

    async fn last_execution_detail(&self, job_id: i64) -> Result<ExecutionHistory, ClientError> {
        self.get_last_execution_detail(job_id).await
    }

    async fn execution_details(
        &self,
        job_id: i64,
        execution_history_id: i64,
    ) -> Result<Vec<ExecutionDetail>, ClientError> {
        self.get_execution_details(job_id, execution_history_id).await
    }
}

#[async_trait]
impl<S: JobService + ?Sized> JobService for std::sync::Arc<S> {
    async fn job_status(&self, job_id: i64) -> Result<JobStatus, ClientError> {
        (**self).job_status(job_id).await
    }

    async fn last_execution_detail(&self, job_id: i64) -> Result<ExecutionHistory, ClientError> {
        (**self).last_execution_detail(job_id).await
    }

    async fn execution_details(
        &self,
        job_id: i64,
        execution_history_id: i64,
    ) -> Result<Vec<ExecutionDetail>, ClientError> {
        (**self).execution_details(job_id, execution_history_id).await
    }
}

/// Monitoring parameters
///
/// `initial_delay` exists because the call that scheduled the job may not
/// have propagated a "Running" status to the backend yet; polling too early
/// can read a stale terminal status from a previous run and exit
/// immediately.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// One-time delay before the first status read
    pub initial_delay: Duration,
    /// Fixed interval between status reads
    pub poll_interval: Duration,
    /// Remaining poll attempts; decremented on each non-terminal read
    pub max_retries: u32,
    /// Treat a "completed with errors" terminal status as success
    pub allow_partial_failure: bool,
}

impl MonitorConfig {
    pub fn new(max_retries: u32, poll_interval: Duration) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            poll_interval,
            max_retries,
            allow_partial_failure: false,
        }
    }

    /// Budget for bulk discovery jobs: one poll every 10 seconds for the
    /// caller's timeout, after a 10 second settle delay.
    pub fn discovery(timeout_minutes: u64) -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            poll_interval: Duration::from_secs(10),
            max_retries: (timeout_minutes * 60 / 10) as u32,
            allow_partial_failure: false,
        }
    }

    /// Budget for network settings jobs: a fixed 60 polls after a 20 second
    /// settle delay (these jobs take longer to show up as running).
    pub fn network_setup() -> Self {
        Self {
            initial_delay: Duration::from_secs(20),
            poll_interval: Duration::from_secs(10),
            max_retries: 60,
            allow_partial_failure: false,
        }
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_partial_failure(mut self, allow: bool) -> Self {
        self.allow_partial_failure = allow;
        self
    }
}

/// What the monitor observed once polling stopped.
#[derive(Debug, Clone)]
pub struct MonitorOutcome {
    /// Final status read from the job service. Terminal states other than
    /// "completed with errors" all exit the loop the same way; callers that
    /// care whether the job was aborted or stopped inspect this field.
    pub status: JobStatus,
    /// Result lines of the run's most recent execution-history record.
    pub execution_log: Vec<ExecutionDetail>,
}

/// Errors from a monitoring run
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Job finished in the "completed with errors" state and partial
    /// failures are disallowed.
    #[error("job {job_id} completed with errors")]
    CompletedWithErrors { job_id: i64 },

    /// Retry budget ran out before a terminal status was observed.
    #[error("job {job_id} did not reach a terminal state within {polls} poll(s)")]
    TimedOut { job_id: i64, polls: u32 },

    /// A job-service call failed; never retried.
    #[error("{context}: {source}")]
    Client {
        context: &'static str,
        #[source]
        source: ClientError,
    },
}

impl MonitorError {
    fn client(context: &'static str, source: ClientError) -> Self {
        Self::Client { context, source }
    }
}

/// Fixed-interval poller for one remote job
pub struct JobMonitor<S> {
    service: S,
    config: MonitorConfig,
    sleeper: Box<dyn Sleeper>,
}

impl<S: JobService> JobMonitor<S> {
    /// Creates a monitor that sleeps on the tokio timer
    pub fn new(service: S, config: MonitorConfig) -> Self {
        Self::with_sleeper(service, config, Box::new(TokioSleeper))
    }

    /// Creates a monitor with an injected sleeper (used by tests)
    pub fn with_sleeper(service: S, config: MonitorConfig, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            service,
            config,
            sleeper,
        }
    }

    /// Watches the job until it stops, the budget runs out, or a client
    /// call fails
    ///
    /// On each tick the job's status is read once. Non-terminal statuses
    /// consume one unit of budget and wait out the poll interval. Terminal
    /// statuses exit the loop; only "completed with errors" is an error
    /// here (when partial failures are disallowed). A Failed or Aborted
    /// job still yields an `Ok` outcome carrying that status, and the
    /// caller decides what it means.
    ///
    /// After the loop exits, the most recent execution-history record and
    /// its result lines are fetched once.
    pub async fn watch(&self, job_id: i64) -> Result<MonitorOutcome, MonitorError> {
        if !self.config.initial_delay.is_zero() {
            self.sleeper.sleep(self.config.initial_delay).await;
        }

        let mut remaining = self.config.max_retries;
        let mut last_status = JobStatus::Unknown;

        let status = loop {
            if remaining == 0 {
                if self.config.allow_partial_failure {
                    break last_status;
                }
                return Err(MonitorError::TimedOut {
                    job_id,
                    polls: self.config.max_retries,
                });
            }

            let status = self
                .service
                .job_status(job_id)
                .await
                .map_err(|e| MonitorError::client("get job status error", e))?;
            debug!("job {} status: {} ({} poll(s) left)", job_id, status, remaining);

            if status == JobStatus::CompletedWithError {
                if self.config.allow_partial_failure {
                    break status;
                }
                return Err(MonitorError::CompletedWithErrors { job_id });
            }
            if status.is_terminal() {
                break status;
            }

            last_status = status;
            remaining -= 1;
            self.sleeper.sleep(self.config.poll_interval).await;
        };

        info!("job {} stopped polling with status {}", job_id, status);

        let history = self
            .service
            .last_execution_detail(job_id)
            .await
            .map_err(|e| MonitorError::client("get job last execution error", e))?;

        let execution_log = self
            .service
            .execution_details(job_id, history.id)
            .await
            .map_err(|e| MonitorError::client("get job execution details error", e))?;

        Ok(MonitorOutcome {
            status,
            execution_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Job service that replays a scripted status sequence and counts polls.
    struct ScriptedService {
        statuses: Mutex<Vec<JobStatus>>,
        polls: Mutex<u32>,
        fail_status: bool,
        fail_history: bool,
    }

    impl ScriptedService {
        fn new(statuses: Vec<JobStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                polls: Mutex::new(0),
                fail_status: false,
                fail_history: false,
            }
        }

        fn polls(&self) -> u32 {
            *self.polls.lock().unwrap()
        }
    }

    #[async_trait]
    impl JobService for ScriptedService {
        async fn job_status(&self, _job_id: i64) -> Result<JobStatus, ClientError> {
            *self.polls.lock().unwrap() += 1;
            if self.fail_status {
                return Err(ClientError::api_error(503, "appliance unavailable"));
            }
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                Ok(JobStatus::Running)
            } else {
                Ok(statuses.remove(0))
            }
        }

        async fn last_execution_detail(
            &self,
            job_id: i64,
        ) -> Result<ExecutionHistory, ClientError> {
            if self.fail_history {
                return Err(ClientError::NotFound("no execution history".to_string()));
            }
            Ok(ExecutionHistory {
                id: 900,
                job_id,
                status: JobStatus::CompletedWithSuccess,
                start_time: None,
                end_time: None,
                progress: Some("100".to_string()),
            })
        }

        async fn execution_details(
            &self,
            _job_id: i64,
            execution_history_id: i64,
        ) -> Result<Vec<ExecutionDetail>, ClientError> {
            assert_eq!(execution_history_id, 900);
            Ok(vec![ExecutionDetail {
                key: "srv-1".to_string(),
                value: "Completed successfully".to_string(),
            }])
        }
    }

    /// Sleeper that returns immediately and records requested waits.
    #[derive(Clone, Default)]
    struct RecordingSleeper {
        waits: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        fn waits(&self) -> Vec<Duration> {
            self.waits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    fn monitor(
        service: &Arc<ScriptedService>,
        sleeper: &RecordingSleeper,
        config: MonitorConfig,
    ) -> JobMonitor<Arc<ScriptedService>> {
        JobMonitor::with_sleeper(Arc::clone(service), config, Box::new(sleeper.clone()))
    }

    #[tokio::test]
    async fn test_success_after_k_nonterminal_polls() {
        let service = Arc::new(ScriptedService::new(vec![
            JobStatus::Queued,
            JobStatus::Starting,
            JobStatus::Running,
            JobStatus::CompletedWithSuccess,
        ]));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10));

        let outcome = monitor(&service, &sleeper, config)
            .watch(42)
            .await
            .unwrap();

        assert_eq!(service.polls(), 4);
        assert_eq!(outcome.status, JobStatus::CompletedWithSuccess);
        assert_eq!(outcome.execution_log.len(), 1);
        assert_eq!(outcome.execution_log[0].value, "Completed successfully");
        // one interval wait per non-terminal poll
        assert_eq!(sleeper.waits().len(), 3);
    }

    #[tokio::test]
    async fn test_completed_with_errors_fails_immediately() {
        let service = Arc::new(ScriptedService::new(vec![JobStatus::CompletedWithError]));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10));

        let err = monitor(&service, &sleeper, config).watch(42).await.unwrap_err();

        assert_eq!(service.polls(), 1);
        assert!(matches!(err, MonitorError::CompletedWithErrors { job_id: 42 }));
    }

    #[tokio::test]
    async fn test_completed_with_errors_allowed_is_success() {
        let service = Arc::new(ScriptedService::new(vec![JobStatus::CompletedWithError]));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10)).with_partial_failure(true);

        let outcome = monitor(&service, &sleeper, config).watch(42).await.unwrap();

        assert_eq!(outcome.status, JobStatus::CompletedWithError);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_times_out() {
        let service = Arc::new(ScriptedService::new(Vec::new())); // always Running
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(5, Duration::from_secs(10));

        let err = monitor(&service, &sleeper, config).watch(42).await.unwrap_err();

        assert_eq!(service.polls(), 5);
        assert!(matches!(err, MonitorError::TimedOut { job_id: 42, polls: 5 }));
    }

    #[tokio::test]
    async fn test_zero_budget_times_out_without_polling() {
        let service = Arc::new(ScriptedService::new(Vec::new()));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(0, Duration::from_secs(10));

        let err = monitor(&service, &sleeper, config).watch(42).await.unwrap_err();

        assert_eq!(service.polls(), 0);
        assert!(matches!(err, MonitorError::TimedOut { job_id: 42, polls: 0 }));
    }

    #[tokio::test]
    async fn test_exhaustion_with_partial_failure_exits_loop() {
        let service = Arc::new(ScriptedService::new(Vec::new())); // always Running
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(3, Duration::from_secs(10)).with_partial_failure(true);

        let outcome = monitor(&service, &sleeper, config).watch(42).await.unwrap();

        assert_eq!(service.polls(), 3);
        assert_eq!(outcome.status, JobStatus::Running);
    }

    #[tokio::test]
    async fn test_failed_job_exits_loop_without_error() {
        let service = Arc::new(ScriptedService::new(vec![JobStatus::Running, JobStatus::Failed]));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10));

        let outcome = monitor(&service, &sleeper, config).watch(42).await.unwrap();

        assert_eq!(outcome.status, JobStatus::Failed);
        assert_eq!(service.polls(), 2);
    }

    #[tokio::test]
    async fn test_initial_delay_is_waited_once() {
        let service = Arc::new(ScriptedService::new(vec![JobStatus::CompletedWithSuccess]));
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10))
            .with_initial_delay(Duration::from_secs(20));

        monitor(&service, &sleeper, config).watch(42).await.unwrap();

        assert_eq!(sleeper.waits(), vec![Duration::from_secs(20)]);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_immediately() {
        let mut service = ScriptedService::new(Vec::new());
        service.fail_status = true;
        let service = Arc::new(service);
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10));

        let err = monitor(&service, &sleeper, config).watch(42).await.unwrap_err();

        assert_eq!(service.polls(), 1);
        assert!(matches!(
            err,
            MonitorError::Client {
                context: "get job status error",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_execution_history_is_wrapped() {
        let mut service = ScriptedService::new(vec![JobStatus::CompletedWithSuccess]);
        service.fail_history = true;
        let service = Arc::new(service);
        let sleeper = RecordingSleeper::default();
        let config = MonitorConfig::new(10, Duration::from_secs(10));

        let err = monitor(&service, &sleeper, config).watch(42).await.unwrap_err();

        assert!(matches!(
            err,
            MonitorError::Client {
                context: "get job last execution error",
                ..
            }
        ));
    }

    #[test]
    fn test_discovery_preset_budget() {
        let config = MonitorConfig::discovery(15);
        assert_eq!(config.max_retries, 90);
        assert_eq!(config.initial_delay, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert!(!config.allow_partial_failure);
    }

    #[test]
    fn test_network_setup_preset_budget() {
        let config = MonitorConfig::network_setup();
        assert_eq!(config.max_retries, 60);
        assert_eq!(config.initial_delay, Duration::from_secs(20));
    }
}
