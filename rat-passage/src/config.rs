//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::transition::TransitionStyle;

/// Timing and look of route transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    pub exit: Duration,
    pub enter: Duration,
    pub style: TransitionStyle,
    /// Animate the very first mount instead of showing it immediately.
    pub animate_initial: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            exit: Duration::from_millis(180),
            enter: Duration::from_millis(220),
            style: TransitionStyle::Fade,
            animate_initial: false,
        }
    }
}

impl TransitionConfig {
    /// No animation at all: every change settles in one step per phase.
    pub fn instant() -> Self {
        Self {
            exit: Duration::ZERO,
            enter: Duration::ZERO,
            style: TransitionStyle::None,
            animate_initial: false,
        }
    }
}

/// Configuration required to run an application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub transition: TransitionConfig,
    /// Redraw interval while a transition is running.
    pub frame_interval: Duration,
    pub initial_path: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            frame_interval: Duration::from_millis(16),
            initial_path: "/".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PASSAGE_EXIT_MS` - Exit transition length (default: 180)
    /// - `PASSAGE_ENTER_MS` - Enter transition length (default: 220)
    /// - `PASSAGE_STYLE` - `none`, `fade` or `slide` (default: fade)
    /// - `PASSAGE_ANIMATE_INITIAL` - Animate the first mount (default: false)
    /// - `PASSAGE_FRAME_MS` - Redraw interval while animating (default: 16)
    /// - `PASSAGE_INITIAL_PATH` - Starting location (default: /)
    /// - `PASSAGE_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let mut config = Self::default();

        if let Some(ms) = read("PASSAGE_EXIT_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.transition.exit = Duration::from_millis(ms);
        }
        if let Some(ms) = read("PASSAGE_ENTER_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.transition.enter = Duration::from_millis(ms);
        }
        if let Some(style) = read("PASSAGE_STYLE").and_then(|v| v.parse().ok()) {
            config.transition.style = style;
        }

        if let Some(enable) = read("PASSAGE_ANIMATE_INITIAL").and_then(|v| v.parse::<bool>().ok()) {
            config.transition.animate_initial = enable;
        } else if lookup("PASSAGE_ANIMATE_INITIAL").is_some_and(|v| v.is_empty()) {
            // Also accept just setting the variable without value as "true"
            config.transition.animate_initial = true;
        }

        if let Some(ms) = read("PASSAGE_FRAME_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.frame_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(path) = read("PASSAGE_INITIAL_PATH").filter(|p| p.starts_with('/')) {
            config.initial_path = path;
        }
        config.log_dir = read("PASSAGE_LOG_DIR").filter(|p| !p.is_empty()).map(PathBuf::from);

        config
    }
}
