use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mood_melody_core::{AnalysisResult, Config, Emotion, MoodMelody, init, state::EMOTION_CHOICES};
use std::path::PathBuf;
use std::time::Duration;
use termimad::MadSkin;
use termimad::crossterm::style::Color;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Photo of your face to find a song for
    #[arg(short, long, conflicts_with = "emotion")]
    photo: Option<PathBuf>,

    /// Emotion label instead of a photo (see --list-emotions)
    #[arg(short, long)]
    emotion: Option<String>,

    /// Override the model defined in .env
    #[arg(short, long)]
    model: Option<String>,

    /// Copy the suggested song to clipboard automatically
    #[arg(short, long, default_value_t = false)]
    copy: bool,

    /// List available emotions and exit
    #[arg(long)]
    list_emotions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    let _ = dotenvy::dotenv();
    init();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    // Handle --list-emotions
    if args.list_emotions {
        println!("Available emotions:");
        for (label, emoji) in EMOTION_CHOICES {
            println!("  {} {}", emoji, label);
        }
        return Ok(());
    }

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = args.model {
        config.model_name = m;
    }

    let app = MoodMelody::with_config(config);

    // No capture argument: open the window
    if args.photo.is_none() && args.emotion.is_none() {
        return app
            .run_interactive()
            .context("Failed to run the Mood Melody window");
    }

    // Send to API
    println!(); // Spacer
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!(
        "Finding your soundtrack with {}...",
        app.config().model_name
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let response = if let Some(path) = &args.photo {
        app.analyze_photo_file(path).await
    } else {
        let label = args.emotion.as_deref().unwrap_or_default();
        app.analyze_emotion(label).await
    };

    spinner.finish_and_clear();

    match response {
        Ok(result) => {
            // Echo the picked emotion the way the window does
            if let Some(emotion) = args.emotion.as_deref().and_then(Emotion::from_label) {
                println!("{} {}", emotion.emoji, emotion.label);
            }

            print_markdown(&render_suggestion(&result));

            // Copy to clipboard if requested
            if args.copy {
                let line = format!("{} — {}", result.song_title, result.artist);
                match Clipboard::new() {
                    Ok(mut clipboard) => {
                        if let Err(e) = clipboard.set_text(line) {
                            eprintln!("Warning: Failed to copy to clipboard: {}", e);
                        } else {
                            println!("(Copied to clipboard)");
                        }
                    }
                    Err(e) => eprintln!("Warning: Could not access clipboard: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Analysis error: {}", e),
    }

    Ok(())
}

/// Formats a suggestion as markdown for terminal rendering.
fn render_suggestion(result: &AnalysisResult) -> String {
    format!(
        "# {}\n**by {}**\n\n*Mood: {}*\n\n{}\n",
        result.song_title, result.artist, result.mood, result.commentary
    )
}

/// Helper to print markdown
fn print_markdown(text: &str) {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin.code_block.set_bg(Color::Rgb {
        r: 40,
        g: 40,
        b: 40,
    });

    skin.print_text(text);
}
