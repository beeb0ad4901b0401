//! OME Job Monitoring
//!
//! Polls an OME job at a fixed interval until it reaches a terminal state,
//! the retry budget runs out, or the client fails, then collects the run's
//! execution log.
//!
//! Architecture:
//! - [`JobService`]: the three job-service reads the monitor needs,
//!   implemented by `OmeClient` and by scripted mocks in tests
//! - [`Sleeper`]: injectable wait so tests simulate elapsed polls without
//!   real delays
//! - [`JobMonitor`]: the polling loop itself, one instance per watched job

mod monitor;
mod sleep;

pub use monitor::{JobMonitor, JobService, MonitorConfig, MonitorError, MonitorOutcome};
pub use sleep::{Sleeper, TokioSleeper};
