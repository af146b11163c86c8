//! # Fretboard Mapping Module
//!
//! This module resolves pitch estimates to concrete fretboard positions.
//! Two separate strategies exist because the two upstream analyses hand
//! us different pitch representations:
//!
//! - [`classify_frequency`] searches the fretboard for a fretted note
//!   whose equal temperament frequency lies within a fixed tolerance of
//!   a continuous frequency estimate (pitch-track path).
//! - [`map_midi`] places a discrete MIDI number on the string that
//!   minimizes the fret, with a deterministic tie-break (transcription
//!   path).
//!
//! The two orderings and tie-breaks are intentionally different and must
//! not be unified: the frequency search has an ambiguity window and a
//! string-major scan order, the MIDI mapping is exact and fret-minimal.

use crate::tuning::{TuningProfile, STRING_COUNT};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Highest playable fret.
pub const MAX_FRET: i32 = 24;

/// Match window for the frequency search, in Hz.
pub const FREQUENCY_TOLERANCE_HZ: f32 = 1.0;

/// A resolved position on the fretboard.
///
/// `string` runs 1 (highest pitch) to 6 (lowest pitch). `fret` is the
/// semitone offset from the open string; 0 means open. `valid` is false
/// for best-effort fallback positions whose fret is negative or above
/// [`MAX_FRET`] (the pitch is not actually playable on the instrument).
/// Positions are immutable values owned by whoever requested them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    pub string: u8,
    pub fret: i32,
    pub valid: bool,
}

/// Resolves a continuous frequency estimate to a fretted position.
///
/// Scans string-major from string 1 (highest) down to string 6, and
/// fret-minor from 0 to [`MAX_FRET`], returning the first position whose
/// expected frequency `open * 2^(fret/12)` lies within
/// [`FREQUENCY_TOLERANCE_HZ`] of `freq`. When a frequency is playable on
/// several strings within tolerance (octave equivalences near fret 12,
/// overlapping windows between adjacent notes), the scan order means the
/// highest string with the lowest fret found wins, which is not always
/// the globally lowest fret. Callers depend on that ordering; keep it.
///
/// # Arguments
/// * `freq` - Frequency estimate in Hz (non-positive input never matches)
/// * `tuning` - Open-string frequency table
///
/// # Returns
/// * `Some(position)` - First fretted note within tolerance, `valid` true
/// * `None` - No fretted note within tolerance anywhere on the neck
pub fn classify_frequency(freq: f32, tuning: &TuningProfile) -> Option<FretPosition> {
    if freq <= 0.0 {
        return None;
    }
    for string in 1..=STRING_COUNT as u8 {
        let open = tuning.open_frequency(string);
        for fret in 0..=MAX_FRET {
            let expected = open * 2.0_f32.powf(fret as f32 / 12.0);
            if (freq - expected).abs() < FREQUENCY_TOLERANCE_HZ {
                return Some(FretPosition {
                    string,
                    fret,
                    valid: true,
                });
            }
        }
    }
    None
}

/// Places a discrete MIDI pitch on the fretboard.
///
/// Computes `fret = midi - open` for every string and collects the
/// strings where the fret lands in `0..=MAX_FRET`. Among those, the
/// smallest fret wins; an equal fret on two strings goes to the larger
/// string number (the lower-pitched, thicker string). When no string can
/// play the pitch at all, the string whose fret is closest to playable is
/// returned with `valid` false, so the caller always gets a position.
///
/// # Arguments
/// * `midi` - MIDI pitch number (0..=127)
/// * `tuning` - Open-string MIDI table
pub fn map_midi(midi: u8, tuning: &TuningProfile) -> FretPosition {
    let playable = tuning
        .open_midi_ascending()
        .iter()
        .enumerate()
        .map(|(idx, &open)| FretPosition {
            string: (STRING_COUNT - idx) as u8,
            fret: midi as i32 - open as i32,
            valid: true,
        })
        .filter(|p| (0..=MAX_FRET).contains(&p.fret))
        .min_by_key(|p| (p.fret, Reverse(p.string)));

    if let Some(position) = playable {
        return position;
    }

    // Off-instrument pitch: fall back to the nearest fret, even if it is
    // negative or beyond the last fret. Table order makes the
    // lower-pitched string win a distance tie.
    tuning
        .open_midi_ascending()
        .iter()
        .enumerate()
        .map(|(idx, &open)| FretPosition {
            string: (STRING_COUNT - idx) as u8,
            fret: midi as i32 - open as i32,
            valid: false,
        })
        .min_by_key(|p| p.fret.abs())
        .unwrap() // This is safe as the instrument always has six strings.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_open_strings() {
        let tuning = TuningProfile::standard();
        // High E open string, dead on
        let pos = classify_frequency(329.63, tuning).unwrap();
        assert_eq!(pos, FretPosition { string: 1, fret: 0, valid: true });
        // Low E open string
        let pos = classify_frequency(82.41, tuning).unwrap();
        assert_eq!(pos, FretPosition { string: 6, fret: 0, valid: true });
    }

    #[test]
    fn classify_fretted_note_within_tolerance() {
        let tuning = TuningProfile::standard();
        // A2 at 110 Hz is string 6 fret 5, but also string 5 fret 0.
        // String-major scan from string 1 reaches string 5 first.
        let pos = classify_frequency(110.3, tuning).unwrap();
        assert_eq!(pos.string, 5);
        assert_eq!(pos.fret, 0);
    }

    #[test]
    fn classify_prefers_higher_string_on_octave_equivalence() {
        let tuning = TuningProfile::standard();
        // E4 (329.63 Hz) is open string 1, string 2 fret 5, string 3
        // fret 9... the scan must stop at string 1.
        let pos = classify_frequency(329.8, tuning).unwrap();
        assert_eq!(pos.string, 1);
        assert_eq!(pos.fret, 0);
    }

    #[test]
    fn classify_rejects_far_frequencies() {
        let tuning = TuningProfile::standard();
        // 50 Hz is well below the low E and between no fretted notes
        assert_eq!(classify_frequency(50.0, tuning), None);
        assert_eq!(classify_frequency(0.0, tuning), None);
        assert_eq!(classify_frequency(-440.0, tuning), None);
    }

    #[test]
    fn map_midi_open_high_e() {
        let tuning = TuningProfile::standard();
        let pos = map_midi(64, tuning);
        assert_eq!(pos, FretPosition { string: 1, fret: 0, valid: true });
    }

    #[test]
    fn map_midi_minimal_fret_across_strings() {
        let tuning = TuningProfile::standard();
        // E3 (52): string 6 fret 12, string 5 fret 7, string 4 fret 2;
        // no open string matches, so string 4 fret 2 is minimal.
        assert_eq!(map_midi(52, tuning), FretPosition { string: 4, fret: 2, valid: true });
        // A2 (45): open string 5 beats string 6 fret 5.
        assert_eq!(map_midi(45, tuning), FretPosition { string: 5, fret: 0, valid: true });
        // C5 (72): frets per string are 32/27/22/17/13/8; minimal is
        // fret 8 on string 1.
        assert_eq!(map_midi(72, tuning), FretPosition { string: 1, fret: 8, valid: true });
    }

    #[test]
    fn map_midi_custom_tuning() {
        // Open strings C2 E2 G2 C3 E3 G3. MIDI 55 (G3) is fret 0 on
        // string 1 and fret 12 on string 4; fret 0 wins.
        let tuning = TuningProfile::from_midi("open C", [36, 40, 43, 48, 52, 55]).unwrap();
        assert_eq!(map_midi(55, &tuning), FretPosition { string: 1, fret: 0, valid: true });
        assert_eq!(map_midi(48, &tuning), FretPosition { string: 3, fret: 0, valid: true });
    }

    #[test]
    fn map_midi_fret_tie_prefers_thicker_string() {
        // Distinct open strings can never tie on fret, but the selection
        // must still be deterministic if a profile with a repeated pitch
        // ever reaches it. Check the comparator directly: equal frets
        // sort by descending string number.
        let a = FretPosition { string: 2, fret: 3, valid: true };
        let b = FretPosition { string: 5, fret: 3, valid: true };
        let chosen = [a, b]
            .into_iter()
            .min_by_key(|p| (p.fret, std::cmp::Reverse(p.string)))
            .unwrap();
        assert_eq!(chosen.string, 5);
    }

    #[test]
    fn map_midi_below_range_falls_back() {
        let tuning = TuningProfile::standard();
        // MIDI 30 is below the open low E (40): nearest is string 6,
        // fret -10, flagged not valid.
        let pos = map_midi(30, tuning);
        assert_eq!(pos.string, 6);
        assert_eq!(pos.fret, -10);
        assert!(!pos.valid);
    }

    #[test]
    fn map_midi_above_range_falls_back() {
        let tuning = TuningProfile::standard();
        // MIDI 100 is above fret 24 on every string: nearest is the
        // high string at fret 36.
        let pos = map_midi(100, tuning);
        assert_eq!(pos.string, 1);
        assert_eq!(pos.fret, 36);
        assert!(!pos.valid);
    }
}
