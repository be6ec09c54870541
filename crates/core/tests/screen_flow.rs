//! Integration tests for the screen flow
//!
//! These tests drive the screen state machine through whole user journeys:
//! capture, loading, result or error, and retry.

use image::DynamicImage;
use mood_melody_core::state::{AppEvent, CaptureSource, Emotion, ScreenState};
use mood_melody_core::{AnalysisResult, CapturedPhoto};

/// Build a small in-memory photo, standing in for a camera frame
fn camera_frame() -> CapturedPhoto {
    CapturedPhoto::from_image(DynamicImage::new_rgb8(16, 16)).expect("non-empty frame")
}

fn suggestion(song: &str) -> AnalysisResult {
    AnalysisResult {
        mood: "joyful".to_string(),
        song_title: song.to_string(),
        artist: "The Beatles".to_string(),
        commentary: "Bright, hopeful, and impossible not to hum along to.".to_string(),
    }
}

/// Scenario: the user captures a photo and the service answers.
///
/// The screen must pass through Loading and land on Result carrying both the
/// suggestion and the original photo.
#[test]
fn photo_capture_round_trip_shows_song_and_photo() {
    let frame = camera_frame();

    let transition = ScreenState::Idle.apply(AppEvent::PhotoCaptured(frame));
    assert!(transition.next.is_loading());
    let dispatched = transition.request.expect("capture dispatches a request");
    assert!(dispatched.photo().is_some());

    let transition = transition
        .next
        .apply(AppEvent::AnalysisCompleted(suggestion("Here Comes the Sun")));

    match transition.next {
        ScreenState::Result { source, analysis } => {
            assert_eq!(analysis.song_title, "Here Comes the Sun");
            let photo = source.photo().expect("photo path echoes the photo");
            assert_eq!(photo.dimensions(), (16, 16));
            assert!(source.emotion().is_none(), "no stale emoji on the photo path");
        }
        other => panic!("expected Result, got {:?}", other),
    }
}

/// Scenario: the user picks "happy" from the emotion grid.
///
/// The result screen shows the emoji and no photo.
#[test]
fn emotion_selection_round_trip_shows_emoji_and_no_photo() {
    let happy = Emotion::from_label("happy").expect("happy is in the picker table");
    assert_eq!(happy.emoji, "😊");

    let transition = ScreenState::Idle.apply(AppEvent::EmotionSelected(happy));
    assert!(transition.next.is_loading());

    let transition = transition
        .next
        .apply(AppEvent::AnalysisCompleted(suggestion("Good Day Sunshine")));

    match transition.next {
        ScreenState::Result { source, analysis } => {
            assert_eq!(analysis.song_title, "Good Day Sunshine");
            assert_eq!(source.emotion().unwrap().emoji, "😊");
            assert!(source.photo().is_none(), "no stale photo on the emotion path");
        }
        other => panic!("expected Result, got {:?}", other),
    }
}

/// Scenario: the analysis call fails with "network timeout".
///
/// The error screen shows that exact message, and retry lands back on a
/// clean capture screen with nothing held over.
#[test]
fn failed_analysis_shows_message_and_retry_returns_to_capture() {
    let transition = ScreenState::Idle.apply(AppEvent::PhotoCaptured(camera_frame()));
    let transition = transition
        .next
        .apply(AppEvent::AnalysisFailed("network timeout".to_string()));

    match &transition.next {
        ScreenState::Error { message } => assert_eq!(message, "network timeout"),
        other => panic!("expected Error, got {:?}", other),
    }

    let transition = transition.next.apply(AppEvent::RetryRequested);
    assert!(matches!(transition.next, ScreenState::Idle));
    assert!(transition.request.is_none());
}

/// Loading always resolves to exactly one of Result or Error; a second
/// outcome for the same request would have to arrive outside Loading, where
/// it is dropped.
#[test]
fn one_outcome_per_request() {
    let transition = ScreenState::Idle.apply(AppEvent::PhotoCaptured(camera_frame()));
    let transition = transition
        .next
        .apply(AppEvent::AnalysisCompleted(suggestion("Let It Be")));
    assert!(matches!(transition.next, ScreenState::Result { .. }));

    // A late failure from the same request no longer moves the screen
    let transition = transition
        .next
        .apply(AppEvent::AnalysisFailed("late timeout".to_string()));
    assert!(matches!(transition.next, ScreenState::Result { .. }));
}

/// A new capture from the result screen discards the previous suggestion and
/// switches paths cleanly.
#[test]
fn new_capture_from_result_switches_paths() {
    let transition = ScreenState::Idle.apply(AppEvent::PhotoCaptured(camera_frame()));
    let transition = transition
        .next
        .apply(AppEvent::AnalysisCompleted(suggestion("Here Comes the Sun")));

    let calm = Emotion::from_label("calm").unwrap();
    let transition = transition.next.apply(AppEvent::EmotionSelected(calm));

    assert!(transition.next.is_loading());
    let dispatched = transition.request.expect("new capture dispatches again");
    assert!(dispatched.photo().is_none());
    assert_eq!(dispatched.emotion().unwrap().label, "calm");
}
