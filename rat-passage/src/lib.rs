//! Route-driven terminal views with animated exit/enter transitions.
//!
//! A [`RouteTable`] maps locations to view factories, a [`Navigator`]
//! publishes location changes, and [`AnimatedRoutes`] swaps the mounted view
//! through a [`RouteTransitionCoordinator`]: the old view exits completely
//! before the new one enters, and each visit gets a freshly built view.

pub mod animated;
pub mod application;
pub mod component;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod router;
pub mod task;
pub mod transition;

pub use error::{Error, Result, ViewError};

// Re-export common types for convenience
pub use animated::{AnimatedRoutes, RouteSignal};
pub use application::Application;
pub use component::{Action, BoxedView, Component, Context, Event};
pub use config::{AppConfig, TransitionConfig};
pub use location::Location;
pub use router::{LocationReceiver, Navigator, PathPattern, Resolution, RouteEntry, RouteMatch, RouteTable};
pub use task::{TaskHandle, TaskTracker};
pub use transition::{
    Direction, Phase, PhaseKind, RouteTransitionCoordinator, Ticket, TransitionEvent, TransitionStyle, ViewKey,
};
