//! Submission transport seam and the cancellable in-flight handle

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Default latency of the simulated admissions endpoint
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(3000);

/// Field name to value pairs captured when a submission starts
pub type ApplicationSnapshot = BTreeMap<String, String>;

/// Acknowledgement from the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionAck {
    /// Server-assigned reference, when the transport hands one back
    pub reference: Option<String>,
}

/// Trait for submission backends, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Deliver an application. The simulated backend always acknowledges.
    async fn submit(&self, snapshot: ApplicationSnapshot) -> SubmissionAck;
}

/// Stands in for the admissions endpoint: waits, then acknowledges
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_DELAY)
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn submit(&self, snapshot: ApplicationSnapshot) -> SubmissionAck {
        tracing::debug!(
            fields = snapshot.len(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating submission"
        );
        tokio::time::sleep(self.delay).await;
        SubmissionAck::default()
    }
}

/// An in-flight submission.
///
/// Dropping the handle aborts the task, so tearing down the owner cancels
/// whatever is still pending.
pub struct SubmissionHandle {
    task: JoinHandle<()>,
    rx: oneshot::Receiver<SubmissionAck>,
}

impl SubmissionHandle {
    /// Spawn `transport.submit(snapshot)` on the current runtime
    pub fn spawn(transport: Arc<dyn SubmissionTransport>, snapshot: ApplicationSnapshot) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let ack = transport.submit(snapshot).await;
            // Receiver gone means the owner was torn down
            let _ = tx.send(ack);
        });
        Self { task, rx }
    }

    /// Non-blocking poll from the event loop
    pub fn try_complete(&mut self) -> Option<SubmissionAck> {
        self.rx.try_recv().ok()
    }

    /// Wait for the acknowledgement; `None` if the task was cancelled
    pub async fn wait(mut self) -> Option<SubmissionAck> {
        (&mut self.rx).await.ok()
    }

    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SubmissionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
