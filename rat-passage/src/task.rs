//! Task management utilities.
//!
//! Provides `TaskHandle` for cancellable async tasks and `TaskTracker` for
//! managing tasks that should be cancelled together (e.g. timers belonging
//! to a superseded transition).

use tokio::task::AbortHandle;

/// A handle to a spawned task that can be aborted.
#[derive(Debug)]
pub struct TaskHandle {
    abort_handle: AbortHandle,
}

impl TaskHandle {
    pub fn new(abort_handle: AbortHandle) -> Self {
        Self { abort_handle }
    }

    /// Abort the task. The task will be cancelled at the next await point.
    pub fn abort(&self) {
        self.abort_handle.abort();
    }

    /// Check if the task has finished (either completed or aborted).
    pub fn is_finished(&self) -> bool {
        self.abort_handle.is_finished()
    }
}

impl<T> From<&tokio::task::JoinHandle<T>> for TaskHandle {
    fn from(handle: &tokio::task::JoinHandle<T>) -> Self {
        Self::new(handle.abort_handle())
    }
}

/// A collection of task handles that can be cancelled together.
///
/// All tracked tasks are aborted when the tracker is dropped.
#[derive(Debug, Default)]
pub struct TaskTracker {
    handles: Vec<TaskHandle>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    /// Track a task handle. The task will be aborted when `abort_all` is called.
    pub fn track(&mut self, handle: TaskHandle) {
        // Clean up finished tasks while adding new ones
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Abort all tracked tasks.
    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    /// Get the number of active (non-finished) tracked tasks.
    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn has_active_tasks(&self) -> bool {
        self.handles.iter().any(|h| !h.is_finished())
    }
}

impl Drop for TaskTracker {
    fn drop(&mut self) {
        self.abort_all();
    }
}
