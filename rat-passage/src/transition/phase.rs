//! Transition phases, tickets, and the events a coordinator emits.

use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

use tokio::time::Instant;

use crate::location::Location;

/// Which way a view is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Exit,
    Enter,
}

/// Token for one armed transition timer. Only the most recently issued
/// ticket is honored when it comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    id: u64,
    direction: Direction,
    duration: Duration,
}

impl Ticket {
    pub(crate) fn new(id: u64, direction: Direction, duration: Duration) -> Self {
        Self {
            id,
            direction,
            duration,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Identity of one mounted view: its location plus a per-mount serial.
///
/// Two mounts never share a key, even for the same location, so no view
/// state carries over between them.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    location: Location,
    mount: NonZeroU64,
}

impl ViewKey {
    pub(crate) fn new(location: Location, mount: NonZeroU64) -> Self {
        Self { location, mount }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn mount_id(&self) -> u64 {
        self.mount.get()
    }
}

impl fmt::Debug for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewKey({}#{})", self.location, self.mount)
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.location, self.mount)
    }
}

/// A view instance held by the coordinator.
#[derive(Debug)]
pub struct Mounted<V> {
    pub key: ViewKey,
    pub view: V,
}

/// The transition slot. Holds at most one mounted view: the target of an
/// exit is only mounted once the exit completes.
#[derive(Debug)]
pub enum Phase<V> {
    /// Nothing mounted yet, or the last mount failed.
    Empty,
    Idle {
        current: Mounted<V>,
    },
    Exiting {
        leaving: Mounted<V>,
        target: Location,
        ticket: Ticket,
        started: Instant,
    },
    Entering {
        entering: Mounted<V>,
        ticket: Ticket,
        started: Instant,
    },
}

/// Field-less view of [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Empty,
    Idle,
    Exiting,
    Entering,
}

impl<V> Phase<V> {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Empty => PhaseKind::Empty,
            Phase::Idle { .. } => PhaseKind::Idle,
            Phase::Exiting { .. } => PhaseKind::Exiting,
            Phase::Entering { .. } => PhaseKind::Entering,
        }
    }

    /// The view currently on screen, whichever role it plays.
    pub fn visible(&self) -> Option<&Mounted<V>> {
        match self {
            Phase::Empty => None,
            Phase::Idle { current } => Some(current),
            Phase::Exiting { leaving, .. } => Some(leaving),
            Phase::Entering { entering, .. } => Some(entering),
        }
    }

    pub fn visible_mut(&mut self) -> Option<&mut Mounted<V>> {
        match self {
            Phase::Empty => None,
            Phase::Idle { current } => Some(current),
            Phase::Exiting { leaving, .. } => Some(leaving),
            Phase::Entering { entering, .. } => Some(entering),
        }
    }

    /// The ticket the phase is waiting on, if any.
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Phase::Exiting { ticket, .. } | Phase::Entering { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// Direction and completion fraction in `[0, 1]` of the running transition.
    pub fn progress(&self, now: Instant) -> Option<(Direction, f32)> {
        let (ticket, started) = match self {
            Phase::Exiting { ticket, started, .. } | Phase::Entering { ticket, started, .. } => {
                (ticket, started)
            }
            _ => return None,
        };
        let total = ticket.duration().as_secs_f32();
        let fraction = if total <= f32::EPSILON {
            1.0
        } else {
            (now.saturating_duration_since(*started).as_secs_f32() / total).clamp(0.0, 1.0)
        };
        Some((ticket.direction(), fraction))
    }
}

/// Observable lifecycle events, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    ExitStarted(ViewKey),
    ExitCompleted(ViewKey),
    EnterStarted(ViewKey),
    EnterCompleted(ViewKey),
    /// A pending target was replaced before it was mounted.
    Retargeted { from: Location, to: Location },
}

/// What a coordinator step produced: events plus at most one timer to arm.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub events: Vec<TransitionEvent>,
    pub ticket: Option<Ticket>,
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        self.events.is_empty() && self.ticket.is_none()
    }
}
