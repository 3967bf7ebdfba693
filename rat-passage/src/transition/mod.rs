//! Exit/enter sequencing for route changes.

pub mod coordinator;
pub mod effect;
pub mod phase;
pub mod scheduler;

pub use coordinator::RouteTransitionCoordinator;
pub use effect::TransitionStyle;
pub use phase::{Direction, Mounted, Outcome, Phase, PhaseKind, Ticket, TransitionEvent, ViewKey};
pub use scheduler::{TicketReceiver, TransitionScheduler};
