//! # tab-cli - Guitar Practice Analysis Frontend
//!
//! Thin transport layer over `tab-core`. Reads the JSON output of the
//! upstream audio-analysis collaborators from files and prints practice
//! feedback or generated tablature. Audio decoding, onset detection,
//! pitch tracking, and note transcription all happen upstream; this
//! binary only moves their numbers into the core and the core's results
//! to stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tab_core::{
    OnsetSequence, PalmMuteDepth, PickAttackConsistency, PitchFrame, RawNote, TuningProfile,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "tab-cli", about = "Practice feedback and tablature from upstream audio analyses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score timing regularity from an onset analysis file
    Timing {
        /// JSON file: {"onsets": [..], "tempo"?: .., "noise_score"?: ..}
        input: PathBuf,
    },
    /// Generate tablature from a pitch track or a note transcription
    Tab {
        /// JSON file with pitch-track frames: [{"time": .., "frequency": ..}, ..]
        #[arg(long, conflicts_with = "notes")]
        pitches: Option<PathBuf>,
        /// JSON file with transcribed notes: [{"start": .., "end"?: .., "midi": ..}, ..]
        #[arg(long)]
        notes: Option<PathBuf>,
        /// Print the rendered tab text instead of the JSON result
        #[arg(long)]
        plain: bool,
    },
}

/// Onset collaborator output, as uploaded by the analysis pass.
#[derive(Debug, Deserialize)]
struct OnsetAnalysis {
    onsets: Vec<f64>,
    /// Tempo estimate in BPM, passed through verbatim
    tempo: Option<f64>,
    /// Pre-computed signal level score
    noise_score: Option<f32>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the requested result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Timing { input } => run_timing(&input),
        Command::Tab { pitches, notes, plain } => run_tab(pitches.as_deref(), notes.as_deref(), plain),
    }
}

fn run_timing(input: &Path) -> Result<()> {
    let analysis: OnsetAnalysis = read_json(input)?;
    info!(onsets = analysis.onsets.len(), "scoring onset sequence");

    let onsets = OnsetSequence::new(analysis.onsets)
        .with_context(|| format!("unusable onset analysis in {}", input.display()))?;
    let report = tab_core::feedback_report(
        &onsets,
        analysis.tempo,
        analysis.noise_score,
        &[],
        &PalmMuteDepth,
        &PickAttackConsistency,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_tab(pitches: Option<&Path>, notes: Option<&Path>, plain: bool) -> Result<()> {
    let tuning = TuningProfile::standard();
    match (pitches, notes) {
        (Some(path), None) => {
            let frames: Vec<PitchFrame> = read_json(path)?;
            info!(frames = frames.len(), "generating tab from pitch track");
            let result = tab_core::tab_from_pitch_track(&frames, tuning);
            if plain {
                println!("{}", result.tab);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
        (None, Some(path)) => {
            let raw: Vec<RawNote> = read_json(path)?;
            let normalized = tab_core::normalize_notes(&raw);
            info!(
                raw = raw.len(),
                notes = normalized.len(),
                "generating tab from transcription"
            );
            let result = tab_core::tab_from_transcription(&normalized, tuning);
            if plain {
                println!("{}", result.tab);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
        // clap already rejects passing both
        (None, None) => bail!(
            "note transcription output is not available: supply --pitches or --notes \
             from an upstream analysis"
        ),
        (Some(_), Some(_)) => unreachable!(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
