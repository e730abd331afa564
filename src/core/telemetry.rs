//! Diagnostic logging for the CLI
//!
//! Events go to stderr so that stdout stays clean for notes, tables and JSON.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "NOVA_RELEASE_LOG";

/// Install the global subscriber
///
/// `NOVA_RELEASE_LOG` wins when set; otherwise `warn`, or `debug` with
/// `verbose`. Later calls are ignored.
pub fn init_tracing(verbose: bool) {
  let level = if verbose { Level::DEBUG } else { Level::WARN };
  let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .try_init()
    .ok();
}
