//! The one stateful object in the tool: current image, captions, voice
//! snapshot, and volume. Everything it owns is driven by [`UiEvent`]s on a
//! single thread.

use std::path::Path;

use ab_glyph::FontVec;
use anyhow::{Context, Result, ensure};
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::caption::{self, Placement};
use crate::compose;
use crate::config::Configuration;
use crate::error::Error;
use crate::events::UiEvent;
use crate::meta;
use crate::speech::{SpeechSynth, Utterance, Voice, VolumeIcon, gain};

pub struct CaptionController<S> {
    config: Configuration,
    engine: S,
    font: Option<FontVec>,
    voices: Vec<Voice>,
    selected_voice: Option<String>,
    volume_percent: u8,
    top: String,
    bottom: String,
    /// Composed canvas without captions; captions are drawn per render.
    base: Option<RgbaImage>,
    label: Option<String>,
}

impl<S: SpeechSynth> CaptionController<S> {
    pub fn new(config: Configuration, engine: S) -> Self {
        let volume_percent = config.speech.volume.min(100);
        let selected_voice = config.speech.voice.clone();
        Self {
            config,
            engine,
            font: None,
            voices: Vec::new(),
            selected_voice,
            volume_percent,
            top: String::new(),
            bottom: String::new(),
            base: None,
            label: None,
        }
    }

    /// Attach the caption font. Without one, rendering still produces the
    /// composed canvas but captions are skipped with a warning.
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::ImageSelected(path) => self.select_image(&path),
            UiEvent::Generate { top, bottom } => {
                self.top = top;
                self.bottom = bottom;
                Ok(())
            }
            UiEvent::Clear => {
                self.top.clear();
                self.bottom.clear();
                Ok(())
            }
            UiEvent::ReadAloud => self.read_aloud(),
            UiEvent::VolumeChanged(percent) => {
                self.volume_percent = percent.min(100);
                Ok(())
            }
            UiEvent::VoicesChanged(voices) => {
                self.voices_changed(voices);
                Ok(())
            }
        }
    }

    fn select_image(&mut self, path: &Path) -> Result<()> {
        let meta = meta::probe(path)?;
        let source = meta::load_oriented(&meta)?;
        let canvas = compose::compose(
            &source,
            self.config.canvas.width,
            self.config.canvas.height,
            self.config.canvas.background,
        )?;
        info!(
            label = %meta.label,
            width = meta.display_w,
            height = meta.display_h,
            "image selected"
        );
        self.base = Some(canvas);
        self.label = Some(meta.label);
        // A fresh image starts with a cleared form.
        self.top.clear();
        self.bottom.clear();
        Ok(())
    }

    /// Replace the voice snapshot. Stands in for the engine's asynchronous
    /// voices-changed callback; the first voice becomes the selection when
    /// the current one is absent from the new list.
    pub fn voices_changed(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
        let still_present = self
            .selected_voice
            .as_deref()
            .is_some_and(|name| self.voices.iter().any(|v| v.name == name));
        if !still_present {
            self.selected_voice = self.voices.first().map(|v| v.name.clone());
        }
        debug!(count = self.voices.len(), "voice snapshot replaced");
    }

    /// Query the engine and apply the result. Engine failure keeps the old
    /// snapshot and downgrades to a warning.
    pub fn refresh_voices(&mut self) {
        match self.engine.voices() {
            Ok(voices) => self.voices_changed(voices),
            Err(err) => warn!("speech engine unavailable: {err:#}"),
        }
    }

    pub fn select_voice(&mut self, name: &str) -> Result<()> {
        ensure!(
            self.voices.iter().any(|v| v.name == name),
            "unknown voice {name:?}; try --list-voices"
        );
        self.selected_voice = Some(name.to_string());
        Ok(())
    }

    fn read_aloud(&self) -> Result<()> {
        let text = [self.top.as_str(), self.bottom.as_str()]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            debug!("both captions empty; nothing to read");
            return Ok(());
        }
        if self.voices.is_empty() {
            warn!("no voices available; skipping read-aloud");
            return Ok(());
        }
        let utterance = Utterance {
            text,
            voice: self.selected_voice.clone(),
            volume: gain(self.volume_percent),
        };
        self.engine.speak(&utterance).map_err(Error::Speech)?;
        Ok(())
    }

    /// Compose the current canvas: the fitted image (or bare background when
    /// nothing is selected) with both captions drawn on top.
    pub fn render(&self) -> Result<RgbaImage> {
        let mut canvas = match &self.base {
            Some(base) => base.clone(),
            None => compose::blank_canvas(
                self.config.canvas.width,
                self.config.canvas.height,
                self.config.canvas.background,
            ),
        };
        match &self.font {
            Some(font) => {
                let style = self
                    .config
                    .caption
                    .style_for(self.config.canvas.height);
                caption::draw_caption(&mut canvas, font, &style, Placement::Top, &self.top);
                caption::draw_caption(&mut canvas, font, &style, Placement::Bottom, &self.bottom);
            }
            None if !self.top.is_empty() || !self.bottom.is_empty() => {
                warn!("no caption font attached; rendering without captions");
            }
            None => {}
        }
        Ok(canvas)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let canvas = self.render()?;
        canvas
            .save(path)
            .with_context(|| format!("writing canvas to {}", path.display()))?;
        info!(path = %path.display(), "canvas written");
        Ok(())
    }

    pub fn captions(&self) -> (&str, &str) {
        (&self.top, &self.bottom)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }

    pub fn volume_icon(&self) -> VolumeIcon {
        VolumeIcon::for_percent(self.volume_percent)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
