//! dicebayes - roll biased and unbiased dice, then recover their face
//! probabilities with Dirichlet-multinomial inference.
//!
//! Usage:
//!   dicebayes simulate --mode biased -n 5000    # one die, table output
//!   dicebayes estimate --counts 3,1,4,1,5,9     # estimate from known counts
//!   dicebayes compare -n 1000 --seed 42 --json  # both dice, JSON output

use std::process::ExitCode;

use clap::Parser;

use dicebayes::cli::{run, Cli};
use dicebayes::logging::init_tracing;
use dicebayes::DiceError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            match err {
                DiceError::InvalidInput { .. } | DiceError::Config(_) => ExitCode::from(2),
                DiceError::Io(_) | DiceError::Serialization(_) => ExitCode::FAILURE,
            }
        }
    }
}
