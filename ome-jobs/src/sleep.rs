//! Injectable wait between polls

use async_trait::async_trait;
use std::time::Duration;

/// Abstraction over the suspension between poll ticks.
///
/// The monitor only ever sleeps through this trait, so tests can swap in an
/// implementation that returns immediately and records what would have been
/// waited.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
