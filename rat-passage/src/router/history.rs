//! Navigation history and the location stream it publishes.

use tokio::sync::watch;

use crate::location::Location;

/// Receiving half of the location stream.
pub type LocationReceiver = watch::Receiver<Location>;

/// Manages navigation history and pushes every change to subscribers.
///
/// # Example
/// ```ignore
/// use rat_passage::Navigator;
///
/// let mut nav = Navigator::new("/");
/// let rx = nav.subscribe();
/// nav.navigate("/admins/1");
/// assert_eq!(rx.borrow().as_str(), "/admins/1");
/// nav.go_back();
/// assert_eq!(nav.current().as_str(), "/");
/// ```
#[derive(Debug)]
pub struct Navigator {
    history: Vec<Location>,
    tx: watch::Sender<Location>,
}

impl Navigator {
    /// Create a navigator positioned at `initial`.
    pub fn new(initial: impl Into<Location>) -> Self {
        let (tx, _) = watch::channel(initial.into());
        Self {
            history: Vec::new(),
            tx,
        }
    }

    /// The current location.
    pub fn current(&self) -> Location {
        self.tx.borrow().clone()
    }

    /// Subscribe to location changes. The receiver starts with the current
    /// location marked as seen.
    pub fn subscribe(&self) -> LocationReceiver {
        self.tx.subscribe()
    }

    /// Navigate to a new location, pushing the current one to history.
    /// Returns false if already there.
    pub fn navigate(&mut self, location: impl Into<Location>) -> bool {
        let location = location.into();
        let previous = self.current();
        if previous == location {
            return false;
        }
        tracing::debug!(from = %previous, to = %location, "navigate");
        self.history.push(previous);
        self.tx.send_replace(location);
        true
    }

    /// Replace the current location without touching history.
    pub fn replace(&mut self, location: impl Into<Location>) -> bool {
        let location = location.into();
        if *self.tx.borrow() == location {
            return false;
        }
        tracing::debug!(to = %location, "replace");
        self.tx.send_replace(location);
        true
    }

    /// Go back to the previous location. Returns true if successful.
    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            tracing::debug!(to = %prev, "back");
            self.tx.send_replace(prev);
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
