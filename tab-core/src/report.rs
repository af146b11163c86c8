//! # Report Assembly Module
//!
//! Combines the leaf components into the two results the transport
//! layer serializes: a practice feedback report (timing metrics plus
//! articulation scores) and a tablature result (detected notes plus
//! their fretboard placements and rendered tab).

use crate::fretboard::{classify_frequency, map_midi};
use crate::notes::TranscribedNote;
use crate::scoring::{clamp_unit, ArticulationScorer};
use crate::tab::TabSheet;
use crate::timing::{score_onsets, OnsetSequence};
use crate::tuning::{midi_note_name, TuningProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One voiced frame from the pitch-tracking collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame time in seconds
    pub time: f64,
    /// Detected fundamental in Hz, always positive for voiced frames
    pub frequency: f32,
}

/// A transcribed note with its human-readable name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedNote {
    pub start: f64,
    pub end: Option<f64>,
    pub midi: u8,
    pub note: String,
}

/// A detected note placed on the fretboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNote {
    pub start: f64,
    pub string: u8,
    pub fret: i32,
    pub note: String,
    /// False when the pitch is off the instrument and the placement is
    /// a nearest-fret fallback
    pub valid: bool,
}

/// Practice-quality feedback for one take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    /// Timing regularity in [0, 1]
    pub accuracy: f64,
    /// Population standard deviation of inter-onset intervals, seconds
    pub timing_deviation: f64,
    /// Tempo estimate in BPM, passed through from the onset collaborator
    pub tempo: Option<f64>,
    /// Collaborator-computed signal level score, clamped to [0, 1]
    pub noise_score: Option<f32>,
    pub palm_mute_depth: f32,
    pub pick_attack_score: f32,
    /// Raw analysis data echoed for the client
    pub raw_data: RawData,
}

/// Raw upstream analysis data echoed alongside the derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawData {
    /// The scored onset times, in seconds
    pub onsets: Vec<f64>,
}

/// Tablature generated from a transcription pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabResult {
    pub detected_notes: Vec<DetectedNote>,
    pub placements: Vec<PlacedNote>,
    /// Rendered six-line tab, high string first
    pub tab: String,
}

/// Builds a feedback report from onset times and articulation scorers.
///
/// Timing metrics come from the onset scorer; articulation scores come
/// from the supplied models over the collaborator's feature frame; the
/// tempo estimate and noise score pass through from upstream untouched
/// apart from clamping the noise score into [0, 1].
pub fn feedback_report(
    onsets: &OnsetSequence,
    tempo: Option<f64>,
    noise_score: Option<f32>,
    features: &[f32],
    palm_mute: &dyn ArticulationScorer,
    pick_attack: &dyn ArticulationScorer,
) -> FeedbackReport {
    let metrics = score_onsets(onsets);
    FeedbackReport {
        accuracy: metrics.accuracy,
        timing_deviation: metrics.deviation,
        tempo,
        noise_score: noise_score.map(clamp_unit),
        palm_mute_depth: clamp_unit(palm_mute.score(features)),
        pick_attack_score: clamp_unit(pick_attack.score(features)),
        raw_data: RawData {
            onsets: onsets.as_slice().to_vec(),
        },
    }
}

/// Folds a time-ordered pitch track into tablature.
///
/// Frames whose frequency resolves to no fretted note within tolerance
/// are skipped; everything else appends one tab column in frame order.
/// Matched frames also appear as detected notes and placements, with
/// the MIDI pitch recovered from the resolved position, so the pitch
/// path serializes the same result shape as the transcription path.
pub fn tab_from_pitch_track(frames: &[PitchFrame], tuning: &TuningProfile) -> TabResult {
    let mut detected = Vec::new();
    let mut placements = Vec::new();
    let mut sheet = TabSheet::new();

    for frame in frames {
        match classify_frequency(frame.frequency, tuning) {
            Some(position) => {
                // Classified positions always carry a fret in 0..=24
                let midi = (tuning.open_midi(position.string) as i32 + position.fret).min(127) as u8;
                let name = midi_note_name(midi);
                detected.push(DetectedNote {
                    start: frame.time,
                    end: None,
                    midi,
                    note: name.clone(),
                });
                placements.push(PlacedNote {
                    start: frame.time,
                    string: position.string,
                    fret: position.fret,
                    note: name,
                    valid: position.valid,
                });
                sheet.push(position);
            }
            None => debug!(
                time = frame.time,
                frequency = frame.frequency as f64,
                "no fretted note within tolerance"
            ),
        }
    }

    TabResult {
        detected_notes: detected,
        placements,
        tab: sheet.render(),
    }
}

/// Maps a transcription pass onto the fretboard and renders its tab.
///
/// Every note gets a name and a placement; off-instrument pitches keep
/// their nearest-fret fallback placement (flagged not valid) in the
/// placement list but contribute no tab column.
pub fn tab_from_transcription(notes: &[TranscribedNote], tuning: &TuningProfile) -> TabResult {
    let mut detected = Vec::with_capacity(notes.len());
    let mut placements = Vec::with_capacity(notes.len());
    let mut sheet = TabSheet::new();

    for note in notes {
        let name = midi_note_name(note.midi);
        let position = map_midi(note.midi, tuning);
        detected.push(DetectedNote {
            start: note.start,
            end: note.end,
            midi: note.midi,
            note: name.clone(),
        });
        placements.push(PlacedNote {
            start: note.start,
            string: position.string,
            fret: position.fret,
            note: name,
            valid: position.valid,
        });
        sheet.push(position);
    }

    TabResult {
        detected_notes: detected,
        placements,
        tab: sheet.render(),
    }
}
