use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use contour_melody::{NoteTiming, PatternCatalog, PlaybackSchedule, ReferencePattern};
use contour_score::{ScoreConfig, ScoreResult, Scorer};
use contour_trace::TraceReader;

#[derive(Parser)]
#[command(name = "contour")]
#[command(about = "Hear a melodic contour, redraw it, and score the drawing with DTW")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for melody selection
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel pattern matching (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared scoring parameters.
#[derive(Args, Debug, Clone)]
struct ScoringArgs {
    /// Scores below this value count as a match
    #[arg(long, default_value_t = 0.1)]
    threshold: f64,

    /// Added to the reference length before dividing the DTW distance
    #[arg(long, default_value_t = 1e-4)]
    epsilon: f64,

    /// Moving-average window applied to raw traces
    #[arg(long, default_value_t = 2)]
    smoothing_window: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Print the reference pattern catalog
    Catalog,

    /// Pick a reference melody and print its playback schedule
    Play {
        /// Pattern name; picked at random from the seed when omitted
        #[arg(long)]
        pattern: Option<String>,

        /// Length of each note in milliseconds
        #[arg(long, default_value_t = 300)]
        note_ms: u64,

        /// Pitch glide into each note in milliseconds
        #[arg(long, default_value_t = 100)]
        glide_ms: u64,
    },

    /// Score an already-normalized candidate contour against a reference
    Score {
        /// Reference pitches, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        reference: Vec<f64>,

        /// Candidate contour, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        candidate: Vec<f64>,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Preprocess a recorded raw trace and score it against a reference pattern
    Evaluate {
        /// CSV file with a header row; samples come from the `y` column
        #[arg(long)]
        trace: PathBuf,

        /// Size of the sampled axis (canvas height)
        #[arg(long, default_value_t = 400.0)]
        extent: f64,

        /// Pattern name; picked at random from the seed when omitted
        #[arg(long)]
        pattern: Option<String>,

        #[command(flatten)]
        scoring: ScoringArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct PatternOutput<'a> {
    name: &'a str,
    pitches: &'a [f64],
}

#[derive(Serialize)]
struct NoteOutput {
    frequency_hz: f64,
    start_ms: u128,
    duration_ms: u128,
    glide_ms: u128,
}

#[derive(Serialize)]
struct PlayOutput<'a> {
    pattern: PatternOutput<'a>,
    total_ms: u128,
    notes: Vec<NoteOutput>,
}

#[derive(Serialize)]
struct ScoreOutput {
    distance: f64,
    score: f64,
    threshold: f64,
    is_match: bool,
    verdict: String,
    message: String,
}

#[derive(Serialize)]
struct EvaluateOutput<'a> {
    pattern: &'a str,
    samples: usize,
    candidate: &'a [f64],
    nearest_pattern: String,
    result: ScoreOutput,
}

impl ScoreOutput {
    fn new(result: &ScoreResult, threshold: f64) -> Self {
        Self {
            distance: result.distance.value(),
            score: result.normalized_score,
            threshold,
            is_match: result.is_match(),
            verdict: result.verdict.to_string(),
            message: result.to_string(),
        }
    }
}

fn build_scorer(args: &ScoringArgs) -> Result<Scorer> {
    let config = ScoreConfig::new()
        .with_threshold(args.threshold)
        .with_epsilon(args.epsilon)
        .with_smoothing_window(args.smoothing_window);
    Scorer::new(config).context("invalid scoring configuration")
}

fn pick_pattern<'a>(
    catalog: &'a PatternCatalog,
    name: Option<&str>,
    seed: u64,
) -> Result<&'a ReferencePattern> {
    match name {
        Some(name) => catalog.get(name).with_context(|| {
            format!(
                "unknown pattern: {name} (expected one of {})",
                catalog.names().join(", ")
            )
        }),
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Ok(catalog.select(&mut rng))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let catalog = PatternCatalog::standard();

    match cli.command {
        Command::Catalog => {
            let output: Vec<PatternOutput<'_>> = catalog
                .iter()
                .map(|p| PatternOutput {
                    name: p.name(),
                    pitches: p.pitches(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Play {
            pattern,
            note_ms,
            glide_ms,
        } => {
            let chosen = pick_pattern(&catalog, pattern.as_deref(), cli.seed)?;
            let timing = NoteTiming {
                note: std::time::Duration::from_millis(note_ms),
                glide: std::time::Duration::from_millis(glide_ms),
            };
            let schedule = PlaybackSchedule::new(chosen, timing);
            info!(pattern = chosen.name(), notes = schedule.notes().len(), "melody scheduled");

            let output = PlayOutput {
                pattern: PatternOutput {
                    name: chosen.name(),
                    pitches: chosen.pitches(),
                },
                total_ms: schedule.total_duration().as_millis(),
                notes: schedule
                    .notes()
                    .iter()
                    .map(|n| NoteOutput {
                        frequency_hz: n.frequency_hz,
                        start_ms: n.start.as_millis(),
                        duration_ms: n.duration.as_millis(),
                        glide_ms: n.glide.as_millis(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Score {
            reference,
            candidate,
            scoring,
        } => {
            let scorer = build_scorer(&scoring)?;
            let result = scorer
                .score(&reference, &candidate)
                .context("scoring failed")?;
            info!(score = result.normalized_score, "scored");

            let output = ScoreOutput::new(&result, scoring.threshold);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate {
            trace,
            extent,
            pattern,
            scoring,
        } => {
            let scorer = build_scorer(&scoring)?;
            let chosen = pick_pattern(&catalog, pattern.as_deref(), cli.seed)?;
            info!(pattern = chosen.name(), "reference chosen");

            let raw = TraceReader::new(&trace)
                .read()
                .context("failed to read trace CSV")?;

            let evaluation = scorer
                .evaluate(chosen.pitches(), raw.as_slice(), extent)
                .context("evaluation failed")?;
            let nearest = scorer
                .classify(&catalog, evaluation.candidate.as_ref())
                .context("classification failed")?;
            info!(
                nearest = %nearest.pattern,
                distance = nearest.distance.value(),
                "nearest catalog pattern"
            );

            let output = EvaluateOutput {
                pattern: chosen.name(),
                samples: raw.len(),
                candidate: evaluation.candidate.as_ref(),
                nearest_pattern: nearest.pattern,
                result: ScoreOutput::new(&evaluation.result, scoring.threshold),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
