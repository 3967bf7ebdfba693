//! View components mounted by the router.

pub mod traits;

pub use traits::{Action, BoxedView, Component, Context, Event};
