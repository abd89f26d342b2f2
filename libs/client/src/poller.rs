//! Fixed-interval dashboard stats poller
//!
//! The admin dashboard refreshes by re-fetching the three stats endpoints
//! every 30 seconds. The loop fetches the batch in parallel and hands each
//! snapshot to the caller; aborting the handle is the only teardown.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiClientError;

/// Default refresh cadence
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// One round of dashboard statistics
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub blog_stats: Value,
    pub project_stats: Value,
    pub message_stats: Value,
}

/// Periodically re-fetches dashboard statistics
pub struct DashboardPoller {
    client: Arc<ApiClient>,
    interval: Duration,
}

impl DashboardPoller {
    /// Create a poller with the default 30-second interval
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the refresh interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Fetch one snapshot: the three stats endpoints in parallel
    pub async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, ApiClientError> {
        let (blog_stats, project_stats, message_stats) = tokio::try_join!(
            self.client.get::<Value>("/api/v1/blogs/stats"),
            self.client.get::<Value>("/api/v1/projects/stats"),
            self.client.get::<Value>("/api/v1/contact/stats"),
        )?;

        Ok(DashboardSnapshot {
            blog_stats,
            project_stats,
            message_stats,
        })
    }

    /// Start polling; the first fetch happens immediately
    ///
    /// Failed rounds are logged and skipped, the loop keeps its cadence.
    pub fn spawn<F>(self, mut on_update: F) -> PollerHandle
    where
        F: FnMut(DashboardSnapshot) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                match self.fetch_snapshot().await {
                    Ok(snapshot) => on_update(snapshot),
                    Err(e) => warn!("Dashboard poll failed: {}", e),
                }
            }
        });

        PollerHandle { handle }
    }
}

/// Handle to a running poller; aborts the task when stopped or dropped
pub struct PollerHandle {
    handle: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the polling loop
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[tokio::test]
    async fn test_stop_aborts_the_task() {
        let client =
            Arc::new(ApiClient::new("http://localhost:1", Arc::new(MemoryTokenStore::new())).unwrap());
        let poller = DashboardPoller::new(client).with_interval(Duration::from_secs(3600));

        let handle = poller.spawn(|_| {});
        handle.stop();

        // Aborted task winds down without panicking the runtime.
        tokio::task::yield_now().await;
    }
}
