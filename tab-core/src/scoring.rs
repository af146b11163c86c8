//! # Articulation Scoring Module
//!
//! Pluggable scoring of playing technique (palm-mute depth, pick-attack
//! consistency). A scorer maps collaborator-extracted features to a
//! score in [0, 1]. The models shipped here are placeholders returning
//! the constants their eventual learned replacements will calibrate
//! against; real models plug in through the same trait.

/// Scores one aspect of playing technique from collaborator-supplied
/// feature data. Implementations must be pure and return values in
/// [0, 1]; use [`clamp_unit`] on anything computed.
pub trait ArticulationScorer {
    /// Short identifier for the scored technique.
    fn name(&self) -> &'static str;

    /// Scores the technique over the supplied feature frame.
    fn score(&self, features: &[f32]) -> f32;
}

/// Clamps a raw model output into the [0, 1] score range.
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Placeholder palm-mute depth model (0.0 no mute, 1.0 full mute).
#[derive(Debug, Clone, Copy, Default)]
pub struct PalmMuteDepth;

impl ArticulationScorer for PalmMuteDepth {
    fn name(&self) -> &'static str {
        "palm_mute_depth"
    }

    fn score(&self, _features: &[f32]) -> f32 {
        0.5
    }
}

/// Placeholder pick-attack consistency model (0.0 inconsistent, 1.0
/// consistent).
#[derive(Debug, Clone, Copy, Default)]
pub struct PickAttackConsistency;

impl ArticulationScorer for PickAttackConsistency {
    fn name(&self) -> &'static str {
        "pick_attack"
    }

    fn score(&self, _features: &[f32]) -> f32 {
        0.8
    }
}
