//! Binary entrypoint for caption-canvas.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use caption_canvas::caption;
use caption_canvas::config::Configuration;
use caption_canvas::controller::CaptionController;
use caption_canvas::events::UiEvent;
use caption_canvas::speech::EspeakSynth;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "caption-canvas", about = "Caption an image on a fixed canvas")]
struct Cli {
    /// Source image to caption
    image: Option<PathBuf>,

    /// Top caption text
    #[arg(long, value_name = "TEXT", default_value = "")]
    top: String,

    /// Bottom caption text
    #[arg(long, value_name = "TEXT", default_value = "")]
    bottom: String,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE", default_value = "captioned.png")]
    output: PathBuf,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Read the captions aloud after rendering
    #[arg(long)]
    speak: bool,

    /// Voice name for read-aloud
    #[arg(long, value_name = "NAME")]
    voice: Option<String>,

    /// Speech volume, 0-100
    #[arg(long, value_name = "PERCENT")]
    volume: Option<u8>,

    /// List available voices and exit
    #[arg(long)]
    list_voices: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("caption_canvas={}", level).parse().unwrap());
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<Configuration> {
    if path.exists() {
        Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?
            .validated()
            .context("validating configuration")
    } else {
        // Missing default config file is fine; explicit paths should exist.
        info!(path = %path.display(), "config file not found, using defaults");
        Configuration::default().validated()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = load_config(&cli.config)?;
    let mut controller = CaptionController::new(cfg.clone(), EspeakSynth::new());
    controller.refresh_voices();

    if cli.list_voices {
        for voice in controller.voices() {
            println!("{:<12} {}", voice.language, voice.name);
        }
        return Ok(());
    }

    if let Some(percent) = cli.volume {
        controller.handle(UiEvent::VolumeChanged(percent))?;
        info!(
            volume = controller.volume_percent(),
            icon = controller.volume_icon().asset_name(),
            "volume set"
        );
    }
    if let Some(name) = &cli.voice {
        controller.select_voice(name)?;
    }

    let image = cli
        .image
        .context("an image path is required (see --help)")?;

    let font = caption::load_font(cfg.caption.font_path.as_deref())
        .context("resolving caption font")?;
    let mut controller = controller.with_font(font);

    controller.handle(UiEvent::ImageSelected(image))?;
    controller.handle(UiEvent::Generate {
        top: cli.top,
        bottom: cli.bottom,
    })?;
    controller.save(&cli.output)?;

    if cli.speak {
        controller.handle(UiEvent::ReadAloud)?;
    }
    Ok(())
}
