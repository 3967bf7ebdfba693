//! Router module.
//!
//! Provides path patterns, the static `RouteTable`, and the `Navigator` that
//! publishes location changes.

pub mod history;
pub mod pattern;
pub mod table;

pub use history::{LocationReceiver, Navigator};
pub use pattern::PathPattern;
pub use table::{Resolution, RouteEntry, RouteMatch, RouteTable, RouteTableBuilder, ViewFactory};
