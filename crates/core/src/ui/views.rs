//! Presentational surfaces.
//!
//! Each view renders one screen of the state machine and reports what the
//! user did as an [`AppEvent`]. The views own no application state; the only
//! mutation they perform is on the ephemeral input widgets handed to them.

use crate::capture::CapturedPhoto;
use crate::gemini::AnalysisResult;
use crate::state::{AppEvent, CaptureSource, EMOTION_CHOICES, Emotion};
use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

/// Ephemeral inputs of the capture surface.
#[derive(Default)]
pub(crate) struct CaptureForm {
    pub photo_path: String,
    /// Local input problem (unreadable file etc.), shown inline. Distinct
    /// from the Error screen, which is reserved for failed analysis calls.
    pub input_error: Option<String>,
}

/// Capture surface: photo path entry plus the emotion picker grid.
pub(crate) fn capture_view(ui: &mut egui::Ui, form: &mut CaptureForm) -> Option<AppEvent> {
    let mut event = None;

    ui.heading("How are you feeling?");
    ui.add_space(8.0);

    ui.label("Snap a photo of your face and let the AI read your mood:");
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut form.photo_path)
                .desired_width(260.0)
                .hint_text("Path to a photo, e.g. selfie.jpg"),
        );

        let enter_pressed =
            response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Analyze photo").clicked() || enter_pressed {
            match CapturedPhoto::from_path(form.photo_path.trim()) {
                Ok(photo) => {
                    form.input_error = None;
                    event = Some(AppEvent::PhotoCaptured(photo));
                }
                Err(e) => form.input_error = Some(e.to_string()),
            }
        }
    });

    if let Some(error) = &form.input_error {
        ui.label(egui::RichText::new(error).color(egui::Color32::RED).small());
    }

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    ui.label("...or just tell us your mood:");
    ui.add_space(4.0);

    for row in EMOTION_CHOICES.chunks(3) {
        ui.horizontal(|ui| {
            for (label, emoji) in row {
                let text = egui::RichText::new(format!("{} {}", emoji, label)).size(16.0);
                if ui
                    .add(egui::Button::new(text).min_size(egui::vec2(130.0, 40.0)))
                    .clicked()
                {
                    event = Some(AppEvent::EmotionSelected(Emotion::new(*label, *emoji)));
                }
            }
        });
        ui.add_space(4.0);
    }

    event
}

/// Loading surface: spinner plus an echo of what is being analyzed.
pub(crate) fn loading_view(
    ui: &mut egui::Ui,
    source: &CaptureSource,
    photo_texture: Option<&egui::TextureHandle>,
) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        capture_echo(ui, source, photo_texture);
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.spinner();
            let message = match source {
                CaptureSource::Photo(_) => "Reading your expression...",
                CaptureSource::Emotion(_) => "Finding your soundtrack...",
            };
            ui.label(message);
        });
    });
}

/// Result surface: the suggestion card with the capture echo and a retry.
pub(crate) fn result_view(
    ui: &mut egui::Ui,
    source: &CaptureSource,
    analysis: &AnalysisResult,
    photo_texture: Option<&egui::TextureHandle>,
    markdown_cache: &mut CommonMarkCache,
) -> Option<AppEvent> {
    let mut event = None;

    ui.vertical_centered(|ui| {
        capture_echo(ui, source, photo_texture);
        ui.add_space(8.0);

        ui.label(
            egui::RichText::new(format!("Mood: {}", analysis.mood))
                .italics()
                .color(egui::Color32::LIGHT_BLUE),
        );
        ui.add_space(4.0);
        ui.heading(&analysis.song_title);
        ui.label(egui::RichText::new(format!("by {}", analysis.artist)).strong());
    });

    ui.add_space(8.0);
    egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
        CommonMarkViewer::new().show(ui, markdown_cache, &analysis.commentary);
    });

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Copy song").clicked() {
            let line = format!("{} — {}", analysis.song_title, analysis.artist);
            if let Ok(mut clipboard) = arboard::Clipboard::new() {
                let _ = clipboard.set_text(line);
            }
        }
        if ui.button("Try another").clicked() {
            event = Some(AppEvent::RetryRequested);
        }
    });

    event
}

/// Error surface: message plus the retry control.
pub(crate) fn error_view(ui: &mut egui::Ui, message: &str) -> Option<AppEvent> {
    let mut event = None;

    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("Oops! Something went wrong.")
                .strong()
                .color(egui::Color32::RED),
        );
        ui.add_space(4.0);
        ui.label(message);
        ui.add_space(12.0);
        if ui.button("Try Again").clicked() {
            event = Some(AppEvent::RetryRequested);
        }
    });

    event
}

/// Echoes the capture next to loading and result content: the photo when one
/// was taken, the emotion glyph otherwise. Never both.
fn capture_echo(
    ui: &mut egui::Ui,
    source: &CaptureSource,
    photo_texture: Option<&egui::TextureHandle>,
) {
    match source {
        CaptureSource::Photo(_) => {
            if let Some(texture) = photo_texture {
                ui.add(
                    egui::Image::new(texture)
                        .max_width(280.0)
                        .max_height(210.0),
                );
            }
        }
        CaptureSource::Emotion(emotion) => {
            ui.label(egui::RichText::new(&emotion.emoji).size(64.0));
            ui.label(egui::RichText::new(&emotion.label).italics());
        }
    }
}
