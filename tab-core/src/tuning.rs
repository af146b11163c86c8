//! # Guitar Tuning Module
//!
//! This module provides the open-string pitch tables used by the fretboard
//! mapping components. It handles tuning profiles, note naming, and
//! equal temperament frequency calculations for a six-string instrument.
//!
//! ## Features
//! - Standard tuning (E2 A2 D3 G3 B3 E4) as a shared immutable default
//! - Alternate tunings built from open-string MIDI numbers
//! - MIDI number to pitch name conversion (e.g. 64 -> "E4")
//! - Equal temperament frequency calculation with A4 = 440 Hz

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Pitch-class names indexed by `midi % 12`.
const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Open-string pitches for one instrument tuning.
///
/// The tables are ordered from the lowest-pitched string to the highest:
/// index 0 is string 6 (thick low string), index 5 is string 1 (high
/// string). A profile is immutable configuration; build one per desired
/// tuning and share it read-only across concurrent analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningProfile {
    name: String,
    /// Open-string MIDI numbers, ascending
    open_midi: [u8; STRING_COUNT],
    /// Open-string frequencies in Hz, ascending
    open_frequencies: [f32; STRING_COUNT],
}

/// Statically computed standard tuning, shared by all callers that do not
/// supply their own profile.
static STANDARD: Lazy<TuningProfile> = Lazy::new(|| TuningProfile {
    name: "standard".to_string(),
    open_midi: [40, 45, 50, 55, 59, 64], // E2 A2 D3 G3 B3 E4
    open_frequencies: [82.41, 110.00, 146.83, 196.00, 246.94, 329.63],
});

impl TuningProfile {
    /// Returns the shared standard tuning (E2 A2 D3 G3 B3 E4).
    pub fn standard() -> &'static TuningProfile {
        &STANDARD
    }

    /// Builds a tuning profile from six open-string MIDI numbers.
    ///
    /// Open frequencies are derived with equal temperament (A4 = 440 Hz).
    ///
    /// # Arguments
    /// * `name` - Display name for the tuning (e.g. "drop D")
    /// * `open_midi` - Open-string MIDI numbers, lowest string first
    ///
    /// # Returns
    /// * `Ok(profile)` - Valid profile
    /// * `Err(Error::InvalidTuning)` - Open strings not strictly ascending
    pub fn from_midi(name: &str, open_midi: [u8; STRING_COUNT]) -> Result<TuningProfile> {
        if open_midi.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidTuning(format!(
                "open strings must ascend in pitch, got {:?}",
                open_midi
            )));
        }
        let mut open_frequencies = [0.0_f32; STRING_COUNT];
        for (freq, &midi) in open_frequencies.iter_mut().zip(open_midi.iter()) {
            *freq = midi_to_frequency(midi);
        }
        Ok(TuningProfile {
            name: name.to_string(),
            open_midi,
            open_frequencies,
        })
    }

    /// Display name of this tuning.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open-string MIDI number for a string number (1 = highest pitch,
    /// 6 = lowest pitch).
    ///
    /// # Panics
    /// * If `string` is outside 1..=6
    pub fn open_midi(&self, string: u8) -> u8 {
        debug_assert!((1..=STRING_COUNT as u8).contains(&string));
        self.open_midi[STRING_COUNT - string as usize]
    }

    /// Open-string frequency in Hz for a string number (1 = highest).
    ///
    /// # Panics
    /// * If `string` is outside 1..=6
    pub fn open_frequency(&self, string: u8) -> f32 {
        debug_assert!((1..=STRING_COUNT as u8).contains(&string));
        self.open_frequencies[STRING_COUNT - string as usize]
    }

    /// Open-string MIDI numbers in table order (string 6 first).
    pub fn open_midi_ascending(&self) -> &[u8; STRING_COUNT] {
        &self.open_midi
    }
}

/// Converts a MIDI number to its equal temperament frequency.
///
/// The formula is f = 440 * 2^((midi - 69) / 12), with A4 (MIDI 69)
/// anchored at 440 Hz.
pub fn midi_to_frequency(midi: u8) -> f32 {
    440.0 * 2.0_f32.powf((midi as f32 - 69.0) / 12.0)
}

/// Converts a MIDI number to a human-readable pitch name.
///
/// Uses the fixed 12-entry pitch-class table and the octave formula
/// `midi / 12 - 1`, so MIDI 60 is "C4" and MIDI 21 is "A0". MIDI 0
/// through 11 land in octave -1 ("C-1" and up).
pub fn midi_note_name(midi: u8) -> String {
    let name = PITCH_CLASSES[(midi % 12) as usize];
    let octave = (midi / 12) as i32 - 1;
    format!("{}{}", name, octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tuning_tables() {
        let tuning = TuningProfile::standard();
        assert_eq!(tuning.open_midi(1), 64); // high E
        assert_eq!(tuning.open_midi(6), 40); // low E
        assert!((tuning.open_frequency(1) - 329.63).abs() < 1e-3);
        assert!((tuning.open_frequency(6) - 82.41).abs() < 1e-3);
    }

    #[test]
    fn from_midi_derives_frequencies() {
        // Drop D: D2 A2 D3 G3 B3 E4
        let tuning = TuningProfile::from_midi("drop D", [38, 45, 50, 55, 59, 64]).unwrap();
        assert_eq!(tuning.open_midi(6), 38);
        // D2 in equal temperament is ~73.42 Hz
        assert!((tuning.open_frequency(6) - 73.42).abs() < 0.01);
        // A2 should stay at 110 Hz
        assert!((tuning.open_frequency(5) - 110.0).abs() < 0.01);
    }

    #[test]
    #[should_panic]
    fn open_midi_rejects_string_zero() {
        TuningProfile::standard().open_midi(0);
    }

    #[test]
    #[should_panic]
    fn open_frequency_rejects_string_seven() {
        TuningProfile::standard().open_frequency(7);
    }

    #[test]
    fn from_midi_rejects_unordered_strings() {
        let result = TuningProfile::from_midi("bad", [45, 40, 50, 55, 59, 64]);
        assert!(matches!(result, Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn note_names() {
        assert_eq!(midi_note_name(60), "C4");
        assert_eq!(midi_note_name(69), "A4");
        assert_eq!(midi_note_name(21), "A0");
        assert_eq!(midi_note_name(64), "E4");
        assert_eq!(midi_note_name(0), "C-1");
    }

    #[test]
    fn a4_is_440() {
        assert!((midi_to_frequency(69) - 440.0).abs() < 1e-3);
    }
}
