//! # Tablature Assembly Module
//!
//! Folds a time-ordered stream of fretboard positions into six-line
//! textual tablature. Each event appends one column: a `-fret-` marker
//! on the line of the sounding string and a dash run of the same width
//! on the other five lines. All six lines therefore stay in lock-step
//! length after every event, so a vertical slice across the lines is one
//! time column. Fret numbers are embedded without fixed-width padding,
//! so column widths vary for frets of ten and above. Note durations and
//! rests are not encoded.

use crate::fretboard::FretPosition;
use crate::tuning::STRING_COUNT;
use std::fmt;

/// Line labels in print order, string 1 (high e) first.
const STRING_LABELS: [&str; STRING_COUNT] = ["e|", "B|", "G|", "D|", "A|", "E|"];

/// A growing six-line tablature.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSheet {
    lines: [String; STRING_COUNT],
}

impl TabSheet {
    /// Creates an empty sheet with the string labels in place.
    pub fn new() -> TabSheet {
        TabSheet {
            lines: STRING_LABELS.map(String::from),
        }
    }

    /// Appends one note column.
    ///
    /// The line for `position.string` receives `-fret-`; every other
    /// line receives dashes of the same width, preserving the lock-step
    /// length invariant. Fallback positions (`valid` false) are not
    /// renderable and are ignored.
    pub fn push(&mut self, position: FretPosition) {
        if !position.valid {
            return;
        }
        let marker = format!("-{}-", position.fret);
        let filler = "-".repeat(marker.len());
        for (index, line) in self.lines.iter_mut().enumerate() {
            if index + 1 == position.string as usize {
                line.push_str(&marker);
            } else {
                line.push_str(&filler);
            }
        }
    }

    /// The six lines in print order, string 1 first.
    pub fn lines(&self) -> &[String; STRING_COUNT] {
        &self.lines
    }

    /// Current line length in characters (identical across all six lines).
    pub fn line_len(&self) -> usize {
        self.lines[0].len()
    }

    /// Renders the sheet as newline-joined text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for TabSheet {
    fn default() -> TabSheet {
        TabSheet::new()
    }
}

impl fmt::Display for TabSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(string: u8, fret: i32) -> FretPosition {
        FretPosition {
            string,
            fret,
            valid: true,
        }
    }

    #[test]
    fn empty_sheet_has_labels() {
        let sheet = TabSheet::new();
        assert_eq!(sheet.render(), "e|\nB|\nG|\nD|\nA|\nE|");
    }

    #[test]
    fn single_event_marks_one_line() {
        let mut sheet = TabSheet::new();
        sheet.push(pos(3, 5));
        let marked: Vec<&String> = sheet
            .lines()
            .iter()
            .filter(|line| line.contains('5'))
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(sheet.lines()[2], "G|-5-");
        assert_eq!(sheet.lines()[0], "e|---");
    }

    #[test]
    fn lines_stay_in_lock_step() {
        let mut sheet = TabSheet::new();
        for position in [pos(1, 0), pos(6, 3), pos(4, 12), pos(2, 7)] {
            sheet.push(position);
            let len = sheet.lines()[0].len();
            assert!(sheet.lines().iter().all(|line| line.len() == len));
        }
    }

    #[test]
    fn two_digit_frets_widen_the_column() {
        let mut sheet = TabSheet::new();
        sheet.push(pos(2, 12));
        assert_eq!(sheet.lines()[1], "B|-12-");
        assert_eq!(sheet.lines()[0], "e|----");
    }

    #[test]
    fn invalid_positions_are_skipped() {
        let mut sheet = TabSheet::new();
        sheet.push(FretPosition {
            string: 6,
            fret: -3,
            valid: false,
        });
        assert_eq!(sheet.line_len(), 2);
    }
}
