//! Bounded-duration "fit view to node" requests.
//!
//! The rendering surface exposes a fit-view capability and nothing else —
//! the core never reads layout state back from it, and no completion
//! acknowledgment is consumed. A center request therefore completes by
//! wall clock: the command is issued immediately, then the request stays
//! active for a fixed hold duration on a cancelable scheduled task. A new
//! request aborts any pending one before scheduling its own; there is
//! never more than a single timer per scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Commands the core may issue to the rendering surface.
///
/// Implementations wrap whatever the surface actually is — a canvas
/// binding, a websocket to a browser, a test recorder.
pub trait ViewportCommands: Send + Sync {
    /// Fit the view to the node with the given id.
    fn fit_to_node(&self, node_id: &str);
}

/// Default hold duration for a center request.
pub const DEFAULT_CENTER_HOLD: Duration = Duration::from_millis(800);

/// Schedules at most one active center request at a time.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use loregraph::controller::{CenterScheduler, ViewportCommands};
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl ViewportCommands for Recorder {
///     fn fit_to_node(&self, node_id: &str) {
///         self.0.lock().unwrap().push(node_id.to_string());
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let viewport = Arc::new(Recorder::default());
/// let mut scheduler = CenterScheduler::new();
/// scheduler.request(viewport.clone(), "Databases".to_string());
/// assert!(scheduler.is_pending());
/// assert_eq!(viewport.0.lock().unwrap().as_slice(), ["Databases".to_string()]);
/// # }
/// ```
#[derive(Debug)]
pub struct CenterScheduler {
    hold: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for CenterScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CenterScheduler {
    /// Creates a scheduler with the default hold duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hold(DEFAULT_CENTER_HOLD)
    }

    /// Creates a scheduler with a custom hold duration.
    #[must_use]
    pub fn with_hold(hold: Duration) -> Self {
        Self {
            hold,
            pending: None,
        }
    }

    /// Issues a fit-view command for `node_id` and holds the request
    /// active for the configured duration. Supersedes (cancels) any
    /// request still pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, viewport: Arc<dyn ViewportCommands>, node_id: String) {
        self.cancel();
        tracing::debug!(node = %node_id, "centering view on node");
        viewport.fit_to_node(&node_id);
        let hold = self.hold;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(hold).await;
        }));
    }

    /// Aborts the pending request, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// `true` while a request's hold window is still open.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for CenterScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl ViewportCommands for Recorder {
        fn fit_to_node(&self, node_id: &str) {
            self.0.lock().unwrap().push(node_id.to_string());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn request_issues_command_and_expires() {
        let viewport = Arc::new(Recorder::default());
        let mut scheduler = CenterScheduler::new();

        scheduler.request(viewport.clone(), "A".to_string());
        assert!(scheduler.is_pending());
        assert_eq!(viewport.0.lock().unwrap().len(), 1);

        tokio::time::sleep(DEFAULT_CENTER_HOLD + Duration::from_millis(10)).await;
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn new_request_supersedes_pending_one() {
        let viewport = Arc::new(Recorder::default());
        let mut scheduler = CenterScheduler::new();

        scheduler.request(viewport.clone(), "A".to_string());
        scheduler.request(viewport.clone(), "B".to_string());

        // Both commands were issued, but only one timer remains.
        assert_eq!(
            viewport.0.lock().unwrap().as_slice(),
            ["A".to_string(), "B".to_string()],
        );
        assert!(scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_clears_pending() {
        let viewport = Arc::new(Recorder::default());
        let mut scheduler = CenterScheduler::new();
        scheduler.request(viewport, "A".to_string());
        scheduler.cancel();
        assert!(!scheduler.is_pending());
    }
}
