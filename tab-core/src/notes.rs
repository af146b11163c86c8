//! # Transcribed Note Normalization
//!
//! The note-transcription collaborator emits notes in several shapes
//! depending on its version: field names vary (`start`/`start_time`/
//! `start_seconds`, `midi`/`pitch`/`pitch_number`) and pitches may
//! arrive as floats. All of that tolerance lives here, in one adapter at
//! the boundary; the rest of the crate only ever sees [`TranscribedNote`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A normalized transcribed note, not yet assigned to a string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TranscribedNote {
    /// Note start in seconds, never negative
    pub start: f64,
    /// Note end in seconds, when the collaborator reports one
    pub end: Option<f64>,
    /// MIDI pitch, 0..=127
    pub midi: u8,
}

/// One note as the transcription collaborator serialized it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNote {
    #[serde(default, alias = "start_time", alias = "start_seconds")]
    pub start: f64,
    #[serde(default, alias = "end_time", alias = "end_seconds")]
    pub end: Option<f64>,
    #[serde(default, alias = "pitch", alias = "pitch_number")]
    pub midi: Option<f64>,
}

/// Normalizes raw collaborator notes into [`TranscribedNote`]s.
///
/// Notes without a resolvable pitch, or with a pitch outside MIDI
/// 0..=127, are skipped rather than reported as errors. Fractional
/// pitches are truncated. Negative starts clamp to zero.
pub fn normalize_notes(raw: &[RawNote]) -> Vec<TranscribedNote> {
    let mut notes = Vec::with_capacity(raw.len());
    for note in raw {
        let Some(pitch) = note.midi else {
            debug!("skipping transcribed note without a pitch");
            continue;
        };
        let midi = pitch.trunc();
        if !(0.0..=127.0).contains(&midi) {
            debug!(pitch, "skipping transcribed note with out-of-range pitch");
            continue;
        }
        notes.push(TranscribedNote {
            start: note.start.max(0.0),
            end: note.end,
            midi: midi as u8,
        });
    }
    notes
}
