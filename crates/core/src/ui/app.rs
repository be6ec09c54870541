//! Main Mood Melody window.
//!
//! This module contains the `MoodMelodyApp` struct which implements the
//! `eframe::App` trait and acts as the root controller: it owns the screen
//! state, feeds user and worker events through the state machine, and
//! dispatches analysis requests to a background thread.

use super::settings::{AVAILABLE_MODELS, Settings};
use super::views::{self, CaptureForm};
use crate::config::Config;
use crate::error::Result;
use crate::gemini::{AnalysisResult, GeminiClient};
use crate::state::{AppEvent, CaptureSource, ScreenState};
use eframe::egui;
use egui_commonmark::CommonMarkCache;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// Terminal outcome of one analysis request.
///
/// Sent through a channel from the background worker to the UI thread.
/// Every worker sends exactly one of these, whatever path it exits through,
/// which is what guarantees the Loading screen always resolves.
enum WorkerEvent {
    Completed(AnalysisResult),
    Failed(String),
}

/// The main application window.
///
/// Renders whichever surface the screen state calls for and funnels every
/// surface event through [`ScreenState::apply`]. No network or storage access
/// happens here; the analysis call lives on the worker thread.
pub struct MoodMelodyApp {
    state: ScreenState,

    // Worker channel
    rx: Receiver<WorkerEvent>,
    tx: Sender<WorkerEvent>,

    // Capture surface inputs
    capture_form: CaptureForm,

    // Echo of the captured photo, uploaded once per capture
    photo_texture: Option<egui::TextureHandle>,
    /// Pre-converted image data for fast texture upload
    pending_texture: Option<egui::ColorImage>,

    // Markdown rendering
    markdown_cache: CommonMarkCache,

    // Settings
    settings: Settings,
    show_settings: bool,
}

impl MoodMelodyApp {
    /// Creates the application with the given base configuration.
    ///
    /// Persisted settings take precedence; the configuration fills the gaps
    /// (API key from the environment, default model).
    pub fn new(config: Config) -> Self {
        let (tx, rx) = channel();

        let mut initial_settings = Settings::load(&config.model_name);
        if initial_settings.api_key.is_empty() {
            initial_settings.api_key = config.gemini_api_key.clone();
        }

        Self {
            state: ScreenState::default(),
            rx,
            tx,
            capture_form: CaptureForm::default(),
            photo_texture: None,
            pending_texture: None,
            markdown_cache: CommonMarkCache::default(),
            settings: initial_settings,
            show_settings: false,
        }
    }

    /// Feeds one event through the state machine and dispatches the analysis
    /// request if the transition asks for one.
    fn handle_event(&mut self, event: AppEvent) {
        let current = std::mem::take(&mut self.state);
        let transition = current.apply(event);
        self.state = transition.next;

        if let Some(source) = transition.request {
            self.prepare_echo(&source);
            self.submit_analysis(source);
        }
    }

    /// Stages the capture echo for the new request.
    ///
    /// The photo is converted to a `ColorImage` here, outside the render
    /// loop; the texture upload itself happens on the next frame.
    fn prepare_echo(&mut self, source: &CaptureSource) {
        self.photo_texture = None;
        self.pending_texture = None;

        if let CaptureSource::Photo(photo) = source {
            let rgba = photo.image().to_rgba8();
            let size = [
                photo.image().width() as usize,
                photo.image().height() as usize,
            ];
            let pixels = rgba.as_flat_samples();
            self.pending_texture = Some(egui::ColorImage::from_rgba_unmultiplied(
                size,
                pixels.as_slice(),
            ));
        }
    }

    /// Spawns the background worker for one analysis request.
    fn submit_analysis(&mut self, source: CaptureSource) {
        // Save settings before making request
        if let Err(e) = self.settings.save() {
            eprintln!("Warning: Failed to save settings: {}", e);
        }

        let tx = self.tx.clone();
        let settings = self.settings.clone();

        thread::spawn(move || {
            let outcome = run_analysis(settings, source);

            // Exactly one terminal event per request, success or failure
            let _ = tx.send(match outcome {
                Ok(analysis) => WorkerEvent::Completed(analysis),
                Err(message) => WorkerEvent::Failed(message),
            });
        });
    }

    /// Drains worker events into the state machine.
    fn process_worker_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.rx.try_recv() {
            let event = match event {
                WorkerEvent::Completed(analysis) => AppEvent::AnalysisCompleted(analysis),
                WorkerEvent::Failed(message) => AppEvent::AnalysisFailed(message),
            };
            self.handle_event(event);
            ctx.request_repaint();
        }
    }

    /// Renders the settings panel.
    fn render_settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.label("Settings");

        // Model selector
        egui::ComboBox::from_label("Model")
            .selected_text(&self.settings.model)
            .show_ui(ui, |ui| {
                for model in AVAILABLE_MODELS {
                    ui.selectable_value(&mut self.settings.model, model.to_string(), *model);
                }
            });

        // API Key
        ui.label("API Key:");
        ui.add(
            egui::TextEdit::singleline(&mut self.settings.api_key)
                .password(true)
                .hint_text("Paste Gemini API Key"),
        );

        // Taste hint
        ui.label("Your music taste (optional):");
        ui.add(
            egui::TextEdit::multiline(&mut self.settings.music_taste)
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .hint_text("e.g. mostly 90s rock, no metal"),
        );
    }
}

impl eframe::App for MoodMelodyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Process any pending worker events
        self.process_worker_events(ctx);

        // Upload the staged photo texture on the frame after a capture
        if self.photo_texture.is_none() {
            if let Some(color_image) = self.pending_texture.take() {
                self.photo_texture = Some(ctx.load_texture(
                    "captured-photo",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }

        let event = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Header
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading(egui::RichText::new("Mood Melody").size(28.0));
                    ui.label("Let AI find the perfect soundtrack for your emotions.");
                });

                ui.horizontal(|ui| {
                    if ui.button("⚙").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
                if self.show_settings {
                    self.render_settings_ui(ui);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                match &self.state {
                    ScreenState::Idle => views::capture_view(ui, &mut self.capture_form),
                    ScreenState::Loading { source } => {
                        views::loading_view(ui, source, self.photo_texture.as_ref());
                        None
                    }
                    ScreenState::Result { source, analysis } => views::result_view(
                        ui,
                        source,
                        analysis,
                        self.photo_texture.as_ref(),
                        &mut self.markdown_cache,
                    ),
                    ScreenState::Error { message } => views::error_view(ui, message),
                }
            })
            .inner;

        if let Some(event) = event {
            if matches!(event, AppEvent::RetryRequested) {
                self.photo_texture = None;
                self.pending_texture = None;
                self.capture_form = CaptureForm::default();
            }
            self.handle_event(event);
        }
    }
}

/// Runs one analysis request to completion on a private runtime.
///
/// Folds every failure, from runtime construction to response parsing, into
/// a displayable message so the caller can hand the outcome straight to the
/// state machine.
fn run_analysis(
    settings: Settings,
    source: CaptureSource,
) -> std::result::Result<AnalysisResult, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    runtime.block_on(async {
        let config = Config::builder()
            .with_api_key(settings.api_key.as_str())
            .with_model(settings.model.as_str())
            .build()
            .map_err(|e| e.to_string())?;

        let client = GeminiClient::new(&config)
            .map_err(|e| e.to_string())?
            .with_style_hint(settings.music_taste.as_str());

        match source {
            CaptureSource::Photo(photo) => {
                let payload = photo.to_base64_jpeg().map_err(|e| e.to_string())?;
                client
                    .analyze_photo(payload)
                    .await
                    .map_err(|e| e.to_string())
            }
            CaptureSource::Emotion(emotion) => client
                .analyze_emotion(&emotion.label)
                .await
                .map_err(|e| e.to_string()),
        }
    })
}

/// Launches the Mood Melody window and blocks until it closes.
pub fn run(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 700.0])
            .with_min_inner_size([440.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mood Melody",
        options,
        Box::new(move |_cc| Ok(Box::new(MoodMelodyApp::new(config)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| crate::error::AppError::ui(format!("Failed to run UI: {}", e)))?;

    Ok(())
}
