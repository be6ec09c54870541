//! Screen state machine.
//!
//! This module contains the application's core state machine: an explicit
//! tagged state value plus a pure transition function, so the screen flow can
//! be exercised without any UI framework.
//!
//! The screen follows a simple state machine:
//! `Idle` -> `Loading` (on capture) -> `Result` (on success)
//!                                 \-> `Error` (on failure)
//! `Result`/`Error` -> `Idle` (on retry) or back to `Loading` (new capture)
//!
//! At most one analysis request is in flight at a time: capture events are
//! ignored while `Loading`, and [`Transition::request`] carries at most one
//! dispatch per applied event.

use crate::capture::CapturedPhoto;
use crate::gemini::AnalysisResult;
use tracing::trace;

/// The emotion picker table: (label, display glyph).
pub const EMOTION_CHOICES: &[(&str, &str)] = &[
    ("happy", "😊"),
    ("sad", "😢"),
    ("energetic", "🔥"),
    ("calm", "😌"),
    ("romantic", "💖"),
    ("angry", "😠"),
];

/// An explicit emotion selection: the label sent to the analysis service and
/// the glyph echoed on the result screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emotion {
    pub label: String,
    pub emoji: String,
}

impl Emotion {
    pub fn new(label: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            emoji: emoji.into(),
        }
    }

    /// Looks up an emotion from [`EMOTION_CHOICES`] by label,
    /// case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        EMOTION_CHOICES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label.trim()))
            .map(|(name, emoji)| Self::new(*name, *emoji))
    }
}

/// What the user captured: a photo or an explicit emotion, never both.
#[derive(Clone, Debug)]
pub enum CaptureSource {
    Photo(CapturedPhoto),
    Emotion(Emotion),
}

impl CaptureSource {
    /// Returns the photo if this capture came from the camera path.
    pub fn photo(&self) -> Option<&CapturedPhoto> {
        match self {
            Self::Photo(photo) => Some(photo),
            Self::Emotion(_) => None,
        }
    }

    /// Returns the emotion if this capture came from the picker path.
    pub fn emotion(&self) -> Option<&Emotion> {
        match self {
            Self::Photo(_) => None,
            Self::Emotion(emotion) => Some(emotion),
        }
    }
}

/// Current screen of the application. Exactly one variant is active at a
/// time; the value is owned by the root controller and mutated only through
/// [`ScreenState::apply`].
#[derive(Clone, Debug, Default)]
pub enum ScreenState {
    /// Waiting for the user to capture a photo or pick an emotion.
    #[default]
    Idle,
    /// An analysis request is outstanding for the held capture.
    Loading { source: CaptureSource },
    /// The analysis arrived; the capture is echoed next to the suggestion.
    Result {
        source: CaptureSource,
        analysis: AnalysisResult,
    },
    /// The analysis failed with a displayable message.
    Error { message: String },
}

/// Everything that can happen to the screen: user actions from the capture
/// surfaces and terminal outcomes from the analysis worker.
#[derive(Clone, Debug)]
pub enum AppEvent {
    PhotoCaptured(CapturedPhoto),
    EmotionSelected(Emotion),
    AnalysisCompleted(AnalysisResult),
    AnalysisFailed(String),
    RetryRequested,
}

/// Outcome of applying an event: the next screen plus at most one analysis
/// request the controller must dispatch.
#[derive(Debug)]
#[must_use]
pub struct Transition {
    pub next: ScreenState,
    pub request: Option<CaptureSource>,
}

impl Transition {
    fn to(next: ScreenState) -> Self {
        Self {
            next,
            request: None,
        }
    }

    fn dispatch(source: CaptureSource) -> Self {
        Self {
            next: ScreenState::Loading {
                source: source.clone(),
            },
            request: Some(source),
        }
    }
}

impl ScreenState {
    /// Applies an event and returns the next state.
    ///
    /// Total over every (state, event) pair:
    ///
    /// - Capture events restart the flow from `Idle`, `Result`, or `Error`,
    ///   discarding whatever those screens held, and are ignored while
    ///   `Loading`.
    /// - Analysis outcomes only land in `Loading`; a response arriving after
    ///   the screen moved on is stale and dropped.
    /// - Retry resets to `Idle` from anywhere.
    pub fn apply(self, event: AppEvent) -> Transition {
        let transition = match (self, event) {
            // A request is already in flight; the capture surfaces are not
            // shown during Loading, so late events here are ignored.
            (state @ ScreenState::Loading { .. }, AppEvent::PhotoCaptured(_))
            | (state @ ScreenState::Loading { .. }, AppEvent::EmotionSelected(_)) => {
                Transition::to(state)
            }

            (_, AppEvent::PhotoCaptured(photo)) => {
                Transition::dispatch(CaptureSource::Photo(photo))
            }
            (_, AppEvent::EmotionSelected(emotion)) => {
                Transition::dispatch(CaptureSource::Emotion(emotion))
            }

            (ScreenState::Loading { source }, AppEvent::AnalysisCompleted(analysis)) => {
                Transition::to(ScreenState::Result { source, analysis })
            }
            // The held capture is dropped so retry lands on a clean screen.
            (ScreenState::Loading { .. }, AppEvent::AnalysisFailed(message)) => {
                Transition::to(ScreenState::Error { message })
            }

            // Stale outcome: the screen already left Loading.
            (state, AppEvent::AnalysisCompleted(_)) | (state, AppEvent::AnalysisFailed(_)) => {
                Transition::to(state)
            }

            (_, AppEvent::RetryRequested) => Transition::to(ScreenState::Idle),
        };

        trace!(screen = transition.next.name(), "screen transition");
        transition
    }

    /// True while an analysis request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Result { .. } => "result",
            Self::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn photo() -> CapturedPhoto {
        CapturedPhoto::from_image(DynamicImage::new_rgb8(4, 4)).unwrap()
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            mood: "joyful".into(),
            song_title: "Here Comes the Sun".into(),
            artist: "The Beatles".into(),
            commentary: "Bright and hopeful.".into(),
        }
    }

    #[test]
    fn photo_capture_enters_loading_and_dispatches_once() {
        let transition = ScreenState::Idle.apply(AppEvent::PhotoCaptured(photo()));

        assert!(transition.next.is_loading());
        assert!(matches!(transition.request, Some(CaptureSource::Photo(_))));
    }

    #[test]
    fn capture_during_loading_is_ignored() {
        let loading = ScreenState::Idle
            .apply(AppEvent::PhotoCaptured(photo()))
            .next;

        let transition = loading.apply(AppEvent::EmotionSelected(
            Emotion::from_label("happy").unwrap(),
        ));

        assert!(transition.next.is_loading());
        assert!(transition.request.is_none());
        // The original photo request is still the one in flight
        match transition.next {
            ScreenState::Loading { source } => assert!(source.photo().is_some()),
            other => panic!("expected Loading, got {:?}", other),
        }
    }

    #[test]
    fn completion_moves_loading_to_result_with_the_capture_echo() {
        let loading = ScreenState::Idle
            .apply(AppEvent::PhotoCaptured(photo()))
            .next;

        let transition = loading.apply(AppEvent::AnalysisCompleted(analysis()));

        match transition.next {
            ScreenState::Result { source, analysis } => {
                assert!(source.photo().is_some());
                assert_eq!(analysis.song_title, "Here Comes the Sun");
            }
            other => panic!("expected Result, got {:?}", other),
        }
    }

    #[test]
    fn failure_moves_loading_to_error_and_drops_the_capture() {
        let loading = ScreenState::Idle
            .apply(AppEvent::PhotoCaptured(photo()))
            .next;

        let transition = loading.apply(AppEvent::AnalysisFailed("network timeout".into()));

        match transition.next {
            ScreenState::Error { message } => assert_eq!(message, "network timeout"),
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[test]
    fn stale_outcomes_are_dropped_outside_loading() {
        let transition = ScreenState::Idle.apply(AppEvent::AnalysisCompleted(analysis()));
        assert!(matches!(transition.next, ScreenState::Idle));

        let transition = ScreenState::Idle.apply(AppEvent::AnalysisFailed("late".into()));
        assert!(matches!(transition.next, ScreenState::Idle));
        assert!(transition.request.is_none());
    }

    #[test]
    fn retry_resets_to_idle_from_anywhere() {
        let error = ScreenState::Error {
            message: "boom".into(),
        };
        assert!(matches!(
            error.apply(AppEvent::RetryRequested).next,
            ScreenState::Idle
        ));

        let result = ScreenState::Result {
            source: CaptureSource::Photo(photo()),
            analysis: analysis(),
        };
        assert!(matches!(
            result.apply(AppEvent::RetryRequested).next,
            ScreenState::Idle
        ));
    }

    #[test]
    fn emotion_capture_replaces_a_prior_photo_result() {
        let result = ScreenState::Result {
            source: CaptureSource::Photo(photo()),
            analysis: analysis(),
        };

        let transition = result.apply(AppEvent::EmotionSelected(
            Emotion::from_label("sad").unwrap(),
        ));

        match transition.next {
            ScreenState::Loading { source } => {
                assert!(source.photo().is_none());
                assert_eq!(source.emotion().unwrap().label, "sad");
            }
            other => panic!("expected Loading, got {:?}", other),
        }
    }

    #[test]
    fn emotion_lookup_is_case_insensitive() {
        let emotion = Emotion::from_label("  HaPpY ").unwrap();
        assert_eq!(emotion.label, "happy");
        assert_eq!(emotion.emoji, "😊");

        assert!(Emotion::from_label("melancholy").is_none());
    }
}
