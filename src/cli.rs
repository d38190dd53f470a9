//! Command-line interface of the `dicebayes` binary.
//!
//! ```text
//! dicebayes simulate --mode biased --rolls 5000      # roll one die and estimate it
//! dicebayes estimate --counts 3,1,4,1,5,9            # estimate from known counts
//! dicebayes compare --rolls 1000 --seed 42           # both dice side by side
//! dicebayes compare --json                           # machine-readable output
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::DiceConfig;
use crate::error::{DiceError, Result};
use crate::faces::UNIFORM_WEIGHTS;
use crate::report::Analysis;
use crate::sampler::DiceMode;
use crate::session::DiceSession;

/// dicebayes - roll biased and unbiased dice and estimate their faces
#[derive(Parser, Debug)]
#[command(name = "dicebayes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Seed for reproducible rolls (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// JSON config file (weights, priors, theme, seed)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Roll one die and estimate its face probabilities
    Simulate {
        /// Which die to roll
        #[arg(short, long, default_value = "biased")]
        mode: DiceMode,

        /// Number of rolls
        #[arg(short = 'n', long, default_value_t = 1000)]
        rolls: usize,

        /// Prior pseudo-counts, six comma-separated values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        prior: Option<Vec<f64>>,
    },

    /// Estimate face probabilities from observed counts
    Estimate {
        /// Observed count per face, six comma-separated values
        #[arg(long, value_delimiter = ',', required = true)]
        counts: Vec<u64>,

        /// Prior pseudo-counts, six comma-separated values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        prior: Option<Vec<f64>>,

        /// Use this die's configured prior when --prior is absent
        #[arg(short, long)]
        mode: Option<DiceMode>,
    },

    /// Roll both dice and compare their estimates
    Compare {
        /// Number of rolls per die
        #[arg(short = 'n', long, default_value_t = 1000)]
        rolls: usize,
    },
}

/// Runs a parsed command and returns what should be printed.
///
/// # Errors
///
/// Returns config loading errors and [`DiceError::InvalidInput`] for bad
/// counts or priors.
pub fn run(cli: &Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => DiceConfig::load(path)?,
        None => DiceConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let analyses = match &cli.command {
        Commands::Simulate { mode, rolls, prior } => {
            let mut session = DiceSession::new(config.clone())?;
            if let Some(prior) = prior {
                session.set_prior(*mode, prior)?;
            }
            session.roll(*mode, *rolls);
            vec![session.analyze(*mode)?]
        }
        Commands::Estimate {
            counts,
            prior,
            mode,
        } => {
            let prior = match (prior, mode) {
                (Some(prior), _) => prior.clone(),
                (None, Some(mode)) => config.priors.for_mode(*mode).to_vec(),
                (None, None) => UNIFORM_WEIGHTS.to_vec(),
            };
            let analysis = Analysis::from_counts(&prior, counts)?;
            vec![match mode {
                Some(mode) => analysis.with_mode(*mode),
                None => analysis,
            }]
        }
        Commands::Compare { rolls } => {
            let mut session = DiceSession::new(config.clone())?;
            DiceMode::ALL
                .into_iter()
                .map(|mode| {
                    session.roll(mode, *rolls);
                    session.analyze(mode)
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    if cli.json {
        render_json(&analyses)
    } else {
        render_text(&analyses, &config)
    }
}

fn render_json(analyses: &[Analysis]) -> Result<String> {
    let json = match analyses {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json + "\n")
}

fn render_text(analyses: &[Analysis], config: &DiceConfig) -> Result<String> {
    let mut out = String::new();
    for (i, analysis) in analyses.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(mode) = analysis.mode {
            let (r, g, b) = config.theme.rgb(mode)?;
            let title = format!("== {mode} die ==");
            writeln!(out, "{}", title.truecolor(r, g, b).bold())
                .map_err(|e| DiceError::Serialization(e.to_string()))?;
        }
        write!(out, "{analysis}").map_err(|e| DiceError::Serialization(e.to_string()))?;
    }
    Ok(out)
}
