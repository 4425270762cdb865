//! Single UI-affinity execution context.
//!
//! Worker tasks never touch presentation state directly. They hand a closure
//! to a [`UiHandle`], and whoever owns the [`UiContext`] runs those closures
//! one at a time, in submission order.

use tokio::sync::mpsc;
use tracing::trace;

/// Work item executed on the UI context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected handle/context pair.
#[must_use]
pub fn ui_channel() -> (UiHandle, UiContext) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiHandle { tx }, UiContext { rx })
}

/// Cloneable sender for UI work.
#[derive(Clone, Debug)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl UiHandle {
    /// Queues `task` for the UI context.
    ///
    /// Returns false if the context has been dropped; the task is discarded.
    pub fn dispatch(&self, task: impl FnOnce() + Send + 'static) -> bool {
        self.tx.send(Box::new(task)).is_ok()
    }

    /// Returns true once the context has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end that executes queued UI work.
pub struct UiContext {
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("queued", &self.rx.len())
            .finish()
    }
}

impl UiContext {
    /// Runs tasks until every [`UiHandle`] is dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
        trace!("UI context closed");
    }

    /// Waits for and runs the next task. Returns false when closed.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Runs every task queued right now without waiting for more.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}
