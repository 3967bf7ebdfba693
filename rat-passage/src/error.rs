use snafu::prelude::*;

use crate::location::Location;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Route table has no fallback entry"))]
    MissingFallback,

    #[snafu(display("Route table already has a fallback entry"))]
    DuplicateFallback,

    #[snafu(display("Invalid route pattern '{pattern}': {reason}"))]
    InvalidPattern { pattern: String, reason: String },

    #[snafu(display("Failed to render view for '{location}': {source}"))]
    RenderFailure { location: Location, source: ViewError },

    #[snafu(display("Terminal error: {source}"))]
    Terminal { source: std::io::Error },

    #[snafu(display("Location channel closed"))]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a view factory while building a view.
#[derive(Debug, Snafu)]
#[snafu(display("{message}"))]
pub struct ViewError {
    message: String,
}

impl ViewError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
