// tab-core/src/lib.rs

//! The core logic for guitar practice analysis and tablature generation.
//! This crate turns the numeric output of upstream audio analyses
//! (onset times, pitch-track frequencies, transcribed MIDI notes) into
//! practice-quality metrics and playable tablature. It is completely
//! headless: it never reads or writes audio samples and contains no
//! transport code.

pub mod fretboard;
pub mod notes;
pub mod report;
pub mod scoring;
pub mod tab;
pub mod timing;
pub mod tuning;

use thiserror::Error;

/// Result type for fallible tab-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when collaborator input violates a documented invariant.
///
/// The analysis functions themselves are total; only boundary
/// construction (onset sequences, tuning profiles) can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Onset times were negative or not strictly increasing
    #[error("invalid onset sequence: {0}")]
    InvalidOnsets(String),

    /// A tuning profile's open strings were not in ascending pitch order
    #[error("invalid tuning profile: {0}")]
    InvalidTuning(String),
}

pub use fretboard::{classify_frequency, map_midi, FretPosition};
pub use notes::{normalize_notes, RawNote, TranscribedNote};
pub use report::{
    feedback_report, tab_from_pitch_track, tab_from_transcription, DetectedNote, FeedbackReport,
    PitchFrame, PlacedNote, RawData, TabResult,
};
pub use scoring::{ArticulationScorer, PalmMuteDepth, PickAttackConsistency};
pub use tab::TabSheet;
pub use timing::{OnsetSequence, TimingMetrics};
pub use tuning::{midi_note_name, TuningProfile};
