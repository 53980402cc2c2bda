//! Application entry point — `ctc-decode`.
//!
//! Decodes one probability table (a JSON array of rows, one row per
//! timestep, one column per vocabulary symbol with the blank first) and
//! prints the best hypotheses.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse command-line flags.
//! 3. Load [`AppConfig`] (`--config`, else the platform `settings.toml`,
//!    else defaults) and apply flag overrides.
//! 4. Validate, build the decoder, load the table, decode, render.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use ctc_decoder::{
    config::{AppConfig, DecodeStrategy, OutputFormat},
    decoder::{build_decoder, load_table, BeamSearchDecoder, Hypothesis},
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "ctc-decode")]
#[command(version, about = "Decode a CTC probability table into text", long_about = None)]
#[command(group(ArgGroup::new("strategy").args(["greedy", "beam"])))]
struct Cli {
    /// Settings file (default: platform settings.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Best-path decoding
    #[arg(long, default_value_t = false)]
    greedy: bool,

    /// Beam search keeping N states per timestep
    #[arg(long, value_name = "N")]
    beam: Option<usize>,

    /// Print at most K hypotheses
    #[arg(long, value_name = "K")]
    n_best: Option<usize>,

    /// Print hypotheses as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// JSON array of probability rows
    table: PathBuf,
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if cli.greedy {
        config.decoder.strategy = DecodeStrategy::Greedy;
    }
    if let Some(beam_size) = cli.beam {
        config.decoder.strategy = DecodeStrategy::BeamSearch;
        config.decoder.beam_size = beam_size;
    }
    if let Some(n_best) = cli.n_best {
        config.output.n_best = n_best;
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
}

fn render(hypotheses: &[Hypothesis], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(hypotheses)?,
        OutputFormat::Text => hypotheses
            .iter()
            .map(|h| format!("{:.6}\t{}", h.probability, h.text))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Everything after flag parsing; returns the rendered hypotheses.
fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let decoder = build_decoder(&config)?;
    let vocab_size = config.vocabulary()?.size();
    let probs = load_table(&cli.table, vocab_size)?;

    log::info!(
        "decoding {} timesteps with {:?}",
        probs.nrows(),
        config.decoder.strategy
    );
    let mut hypotheses = decoder.decode(probs.view())?;
    hypotheses.truncate(config.output.n_best);

    render(&hypotheses, config.output.format)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Flags
    let cli = Cli::parse();

    // 3-4. Configuration, decode
    println!("{}", run(cli)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
