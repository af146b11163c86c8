//! # Timing Analysis Module
//!
//! Reduces a sequence of detected note onsets to scalar practice
//! metrics. The score measures the regularity of inter-onset spacing:
//! a perfectly even performance scores 1.0, and the score falls toward
//! 0.0 as the spacing spreads out relative to its mean.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Onset times in seconds, non-negative and strictly increasing.
///
/// The constructor enforces the ordering invariant once, at the
/// collaborator boundary, so the scorer can assume well-formed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnsetSequence(Vec<f64>);

impl OnsetSequence {
    /// Validates and wraps a list of onset times.
    ///
    /// # Returns
    /// * `Ok(sequence)` - Times are non-negative and strictly increasing
    /// * `Err(Error::InvalidOnsets)` - Otherwise
    pub fn new(onsets: Vec<f64>) -> Result<OnsetSequence> {
        if onsets.iter().any(|&t| !t.is_finite() || t < 0.0) {
            return Err(Error::InvalidOnsets(
                "onset times must be finite and non-negative".to_string(),
            ));
        }
        if onsets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidOnsets(
                "onset times must be strictly increasing".to_string(),
            ));
        }
        Ok(OnsetSequence(onsets))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Timing regularity metrics for one onset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingMetrics {
    /// Regularity score in [0, 1]; 1.0 is perfectly even spacing
    pub accuracy: f64,
    /// Population standard deviation of the inter-onset intervals, in
    /// seconds; 0.0 when fewer than two onsets exist
    pub deviation: f64,
}

/// Scores the timing regularity of an onset sequence.
///
/// With `n` onsets the scorer takes the `n - 1` consecutive differences,
/// computes their mean and population standard deviation, and returns
/// `accuracy = clamp(1 - sigma/mu, 0, 1)` with `deviation = sigma`.
/// Zero or one onset defines no intervals; both metrics are 0.0 then.
/// A zero interval mean (onsets at identical times cannot pass the
/// sequence constructor, but the guard stays) also scores 0.0 instead
/// of dividing by zero.
pub fn score_onsets(onsets: &OnsetSequence) -> TimingMetrics {
    let times = onsets.as_slice();
    if times.len() <= 1 {
        return TimingMetrics {
            accuracy: 0.0,
            deviation: 0.0,
        };
    }

    let intervals: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    let n = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / n;
    let variance = intervals.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    let deviation = variance.sqrt();

    let accuracy = if mean > 0.0 {
        (1.0 - deviation / mean).clamp(0.0, 1.0)
    } else {
        0.0
    };

    TimingMetrics { accuracy, deviation }
}
