//! Timers that hand expired tickets back to the event loop.

use tokio::sync::mpsc;

use crate::task::{TaskHandle, TaskTracker};

use super::phase::Ticket;

/// Receiving half for expired tickets.
pub type TicketReceiver = mpsc::UnboundedReceiver<Ticket>;

/// Arms one timer per ticket. Arming a new ticket aborts the previous timer,
/// so at most one is pending at any time.
#[derive(Debug)]
pub struct TransitionScheduler {
    tx: mpsc::UnboundedSender<Ticket>,
    timers: TaskTracker,
}

impl TransitionScheduler {
    pub fn new() -> (Self, TicketReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                timers: TaskTracker::new(),
            },
            rx,
        )
    }

    /// Arm `ticket`, cancelling whatever was armed before. Must be called
    /// from within a tokio runtime.
    pub fn arm(&mut self, ticket: Ticket) {
        self.timers.abort_all();

        if ticket.duration().is_zero() {
            let _ = self.tx.send(ticket);
            return;
        }

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ticket.duration()).await;
            let _ = tx.send(ticket);
        });
        self.timers.track(TaskHandle::from(&handle));
    }

    /// Drop any pending timer without arming a new one.
    pub fn cancel(&mut self) {
        self.timers.abort_all();
    }

    pub fn is_pending(&self) -> bool {
        self.timers.has_active_tasks()
    }
}
