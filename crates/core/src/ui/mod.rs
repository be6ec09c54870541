//! User interface components for Mood Melody.
//!
//! This module provides the desktop window: a capture screen (photo path or
//! emotion picker), a loading indicator while the analysis call is
//! outstanding, and result/error screens with a retry action.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`app`]: the root controller owning the screen state machine
//! - [`views`]: pure renderers for the capture/loading/result/error surfaces
//! - [`settings`]: user preferences and persistence
//!
//! The screen state itself lives in [`crate::state`] so it can be exercised
//! without a window.
//!
//! # Usage
//!
//! ```ignore
//! use mood_melody_core::{Config, ui};
//!
//! let config = Config::load()?;
//! ui::run_app(config)?;
//! ```

mod app;
mod settings;
mod views;

// Public API exports
pub use app::MoodMelodyApp;
pub use settings::{AVAILABLE_MODELS, Settings};

use crate::config::Config;
use crate::error::Result;

/// Launches the Mood Melody window and blocks until the user closes it.
///
/// # Arguments
/// * `config` - Application configuration with API key and model name
///
/// # Errors
/// Returns [`crate::error::AppError::Ui`] if the window cannot be created.
pub fn run_app(config: Config) -> Result<()> {
    app::run(config)
}
