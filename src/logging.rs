//! Tracing initialization for the `dicebayes` binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! application.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `DICEBAYES_LOG=dicebayes=trace`.
pub const LOG_ENV: &str = "DICEBAYES_LOG";

/// Install a stderr fmt subscriber.
///
/// Reads the filter from [`LOG_ENV`]. Without it the level is `info`, or
/// `debug` when `verbose` is set. Calling this more than once is a no-op.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "dicebayes=debug"
        } else {
            "dicebayes=info"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

        // A subscriber installed by an embedding application wins.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
