//! Speech-synthesis collaborator interface and the espeak-ng adapter.

use std::process::Command;

use anyhow::{Context, Result, ensure};
use tracing::debug;

/// One synthetic voice offered by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47-ish language tag as reported by the engine, e.g. `en-US`.
    pub language: String,
}

/// A unit of text submitted for audible playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Voice name; the engine default is used when absent.
    pub voice: Option<String>,
    /// Playback gain in `[0, 1]`.
    pub volume: f32,
}

/// Minimal surface the captioning controller needs from a speech engine.
///
/// `voices` may legitimately return an empty list while the engine is still
/// warming up; callers re-query rather than treating that as an error.
pub trait SpeechSynth {
    fn voices(&self) -> Result<Vec<Voice>>;

    /// Speak the utterance, blocking until playback finishes.
    fn speak(&self, utterance: &Utterance) -> Result<()>;
}

/// Discrete state of the volume indicator for a slider value in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeIcon {
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            0 => Self::Muted,
            1..=33 => Self::Low,
            34..=66 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Icon asset stem matching the indicator artwork.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Muted => "volume-level-0",
            Self::Low => "volume-level-1",
            Self::Medium => "volume-level-2",
            Self::High => "volume-level-3",
        }
    }
}

/// Linear mapping from a slider percent to engine gain.
pub fn gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Adapter over the `espeak-ng` command-line synthesizer.
#[derive(Debug, Default)]
pub struct EspeakSynth;

impl EspeakSynth {
    pub fn new() -> Self {
        Self
    }
}

// espeak amplitude runs 0..=200 with 100 as the default loudness.
const ESPEAK_MAX_AMPLITUDE: f32 = 200.0;

impl SpeechSynth for EspeakSynth {
    fn voices(&self) -> Result<Vec<Voice>> {
        let output = Command::new("espeak-ng")
            .arg("--voices")
            .output()
            .context("failed to run `espeak-ng --voices`")?;
        ensure!(
            output.status.success(),
            "`espeak-ng --voices` exited with {}",
            output.status
        );
        let voices = parse_voice_table(&String::from_utf8_lossy(&output.stdout));
        debug!(count = voices.len(), "enumerated espeak voices");
        Ok(voices)
    }

    fn speak(&self, utterance: &Utterance) -> Result<()> {
        let amplitude =
            (utterance.volume.clamp(0.0, 1.0) * ESPEAK_MAX_AMPLITUDE).round() as u32;
        let mut cmd = Command::new("espeak-ng");
        cmd.arg("-a").arg(amplitude.to_string());
        if let Some(voice) = &utterance.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("--").arg(&utterance.text);
        let status = cmd.status().context("failed to spawn espeak-ng")?;
        ensure!(status.success(), "espeak-ng exited with {status}");
        Ok(())
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// Layout: `Pty Language Age/Gender VoiceName File Other Languages`, one
/// voice per line after a single header row.
fn parse_voice_table(raw: &str) -> Vec<Voice> {
    raw.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return None;
            }
            Some(Voice {
                language: cols[1].to_string(),
                name: cols[3].to_string(),
            })
        })
        .collect()
}
