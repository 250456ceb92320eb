use std::path::{Path, PathBuf};

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::caption::CaptionStyle;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Fixed canvas the image is fitted onto.
    pub canvas: CanvasOptions,
    /// Caption text styling.
    pub caption: CaptionOptions,
    /// Read-aloud defaults.
    pub speech: SpeechOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    /// RGB background fill painted before the image is drawn.
    pub background: [u8; 3],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CaptionOptions {
    /// Explicit font file; system bold faces are queried when absent.
    pub font_path: Option<PathBuf>,
    /// Caption glyph size as a fraction of canvas height.
    pub font_fraction: f32,
    /// RGB fill color of the caption glyphs.
    pub fill: [u8; 3],
    /// RGB color of the stroke halo behind the glyphs.
    pub stroke: [u8; 3],
    /// Stroke halo radius as a fraction of the glyph size.
    pub stroke_fraction: f32,
    /// Gap between a caption and the nearest canvas edge, as a fraction of
    /// canvas height.
    pub edge_fraction: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SpeechOptions {
    /// Preferred voice name; the first enumerated voice is used when absent.
    pub voice: Option<String>,
    /// Initial volume slider position, 0-100.
    pub volume: u8,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: Self::default_side(),
            height: Self::default_side(),
            background: [0, 0, 0],
        }
    }
}

impl CanvasOptions {
    const fn default_side() -> u32 {
        400
    }
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            font_path: None,
            font_fraction: Self::default_font_fraction(),
            fill: [255, 255, 255],
            stroke: [0, 0, 0],
            stroke_fraction: Self::default_stroke_fraction(),
            edge_fraction: Self::default_edge_fraction(),
        }
    }
}

impl CaptionOptions {
    const fn default_font_fraction() -> f32 {
        0.1
    }

    const fn default_stroke_fraction() -> f32 {
        0.08
    }

    const fn default_edge_fraction() -> f32 {
        0.04
    }

    /// Resolve the fractional knobs against a concrete canvas height.
    pub fn style_for(&self, canvas_h: u32) -> CaptionStyle {
        let font_px = (canvas_h as f32 * self.font_fraction).max(1.0);
        CaptionStyle {
            font_px,
            fill: self.fill,
            stroke: self.stroke,
            stroke_px: font_px * self.stroke_fraction,
            margin_px: canvas_h as f32 * self.edge_fraction,
        }
    }
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: None,
            volume: Self::default_volume(),
        }
    }
}

impl SpeechOptions {
    const fn default_volume() -> u8 {
        100
    }
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde
    /// defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(self.canvas.width > 0, "canvas width must be greater than zero");
        ensure!(
            self.canvas.height > 0,
            "canvas height must be greater than zero"
        );
        ensure!(
            self.caption.font_fraction > 0.0 && self.caption.font_fraction <= 1.0,
            "font-fraction must be within (0, 1]"
        );
        ensure!(
            self.caption.stroke_fraction >= 0.0,
            "stroke-fraction must not be negative"
        );
        ensure!(
            self.caption.edge_fraction >= 0.0 && self.caption.edge_fraction < 0.5,
            "edge-fraction must be within [0, 0.5)"
        );
        ensure!(self.speech.volume <= 100, "volume must be within 0-100");
        Ok(self)
    }
}
