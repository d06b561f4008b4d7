//! Tracing setup: subscriber initialization, span definitions, event helpers.

pub mod events;
pub mod spans;

use jackpot_core::config::ObservabilityConfig;
use jackpot_core::errors::{ConfigurationError, JackpotResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "JACKPOT_LOG";

/// Install the global subscriber.
///
/// `JACKPOT_LOG` takes precedence over `log_level`. Fails if the filter is
/// invalid or a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> JackpotResult<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            ConfigurationError::InvalidConfig {
                reason: format!("invalid log level '{}': {e}", config.log_level),
            }
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        ConfigurationError::InvalidConfig {
            reason: format!("tracing subscriber already installed: {e}"),
        }
        .into()
    })
}
