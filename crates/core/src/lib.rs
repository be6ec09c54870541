//! Mood Melody Core Library
//!
//! This library provides the core functionality for the Mood Melody app,
//! which suggests a song for whatever the user is feeling: point it at a
//! photo of your face, or just pick an emotion, and Gemini picks the track.
//!
//! # Overview
//!
//! The app is a thin orchestration over one external call. The library
//! handles:
//!
//! - **Photo Acquisition**: decoding captured frames via the [`capture`] module
//! - **Image Preparation**: resolution bounding and base64 encoding via
//!   [`image_processing`]
//! - **AI Integration**: the Gemini song-suggestion client via [`gemini`]
//! - **Screen Flow**: the capture/loading/result/error state machine via
//!   [`state`]
//! - **User Interface**: the desktop window via [`ui`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`MoodMelody`] facade:
//!
//! ```ignore
//! use mood_melody_core::MoodMelody;
//!
//! // Initialize with environment configuration
//! let app = MoodMelody::new()?;
//!
//! // Headless: suggest a song for a photo on disk
//! let result = app.analyze_photo_file("selfie.jpg").await?;
//! println!("{} — {}", result.song_title, result.artist);
//!
//! // Or launch the window
//! app.run_interactive()?;
//! ```
//!
//! # Module Structure
//!
//! - [`capture`]: Photo acquisition
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`gemini`]: Gemini song-suggestion client
//! - [`image_processing`]: Image manipulation utilities
//! - [`state`]: Screen state machine
//! - [`ui`]: User interface components

pub mod capture;
pub mod config;
pub mod error;
pub mod gemini;
pub mod image_processing;
pub mod state;
pub mod ui;

// Re-export primary types for convenience
pub use capture::CapturedPhoto;
pub use config::Config;
pub use error::{AppError, Result};
pub use gemini::{AnalysisResult, GeminiClient};
pub use state::{AppEvent, CaptureSource, Emotion, ScreenState};

use std::path::Path;

/// Main entry point for the Mood Melody application.
///
/// This struct provides a facade over the various subsystems,
/// handling initialization and orchestration. It's the recommended
/// way to use the library for most use cases.
///
/// # Example
///
/// ```ignore
/// use mood_melody_core::MoodMelody;
///
/// let app = MoodMelody::new()?;
/// app.run_interactive()?;
/// ```
pub struct MoodMelody {
    config: Config,
}

impl MoodMelody {
    /// Creates a new MoodMelody instance with default configuration.
    ///
    /// Loads configuration from environment variables (including `.env`
    /// files).
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not available.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self { config })
    }

    /// Creates an instance with custom configuration.
    ///
    /// Use this when you need to override environment-based configuration,
    /// such as specifying a different model or API key.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Suggests a song for a photo stored on disk.
    ///
    /// Loads and decodes the photo, bounds its resolution, and runs one
    /// analysis call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Photo`] if the file cannot be decoded and
    /// [`AppError::Service`] if the analysis call fails.
    pub async fn analyze_photo_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let photo = CapturedPhoto::from_path(path)?;
        self.analyze_photo(&photo).await
    }

    /// Suggests a song for an already-captured photo.
    pub async fn analyze_photo(&self, photo: &CapturedPhoto) -> Result<AnalysisResult> {
        let payload = photo.to_base64_jpeg()?;
        let client = GeminiClient::new(&self.config)?;
        client.analyze_photo(payload).await
    }

    /// Suggests a song for an emotion from the picker table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownEmotion`] if the label is not one of
    /// [`state::EMOTION_CHOICES`], and [`AppError::Service`] if the analysis
    /// call fails.
    pub async fn analyze_emotion(&self, label: &str) -> Result<AnalysisResult> {
        let emotion = Emotion::from_label(label)
            .ok_or_else(|| AppError::UnknownEmotion(label.to_string()))?;

        let client = GeminiClient::new(&self.config)?;
        client.analyze_emotion(&emotion.label).await
    }

    /// Launches the interactive window.
    ///
    /// This is the main entry point for the visual workflow: capture a photo
    /// or pick an emotion, watch the loading screen, and read the suggestion.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created.
    pub fn run_interactive(&self) -> Result<()> {
        ui::run_app(self.config.clone())
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    ///
    /// Allows modifying settings like the model name after initialization.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
///
/// # Example
///
/// ```ignore
/// mood_melody_core::init();
/// let config = mood_melody_core::Config::load()?;
/// ```
pub fn init() {
    let _ = dotenvy::dotenv();
}
