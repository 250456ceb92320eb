use std::path::PathBuf;

use crate::speech::Voice;

/// UI-surface events forwarded to the controller.
#[derive(Debug)]
pub enum UiEvent {
    /// A new image file was chosen.
    ImageSelected(PathBuf),
    /// The caption form was submitted.
    Generate { top: String, bottom: String },
    /// The reset control was pressed.
    Clear,
    /// The read-aloud control was pressed.
    ReadAloud,
    /// The volume slider moved to a new percent value.
    VolumeChanged(u8),
    /// The speech engine finished (re)enumerating its voices.
    VoicesChanged(Vec<Voice>),
}
