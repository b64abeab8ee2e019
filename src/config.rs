//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `TICKWATCH_WEBSOCKET_URL` - push channel endpoint
//! - `TICKWATCH_API_URL` - fallback market-data endpoint
//! - `TICKWATCH_MAX_ATTEMPTS`, `TICKWATCH_BASE_DELAY_MS`,
//!   `TICKWATCH_MAX_DELAY_MS`, `TICKWATCH_TIMEOUT_MS` - reconnection policy
//! - `TICKWATCH_LOG_FILE` - where tracing output is written
//!
//! Empty values are treated as absent.

use std::path::PathBuf;
use std::time::Duration;

/// Default push channel endpoint exposed by the relay.
const DEFAULT_WEBSOCKET_URL: &str = "ws://127.0.0.1:5000/ws";

/// Default fallback endpoint exposed by the relay.
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/market-data";

/// Default log destination. The TUI owns stdout, so logs go to a file.
const DEFAULT_LOG_FILE: &str = "tickwatch.log";

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
const DEFAULT_MAX_DELAY_MS: u64 = 5_000;
const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub reconnect: ReconnectConfig,
    pub log_file: PathBuf,
}

/// Relay endpoints.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub websocket_url: String,
    pub api_url: String,
}

/// Bounded retry policy for the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectConfig {
    /// Automatic attempts made after a failure before giving up.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub base_delay: Duration,
    /// Upper bound for the delay between attempts.
    pub max_delay: Duration,
    /// Upper bound for a single connection handshake.
    pub timeout: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ReconnectConfig {
    /// Returns the delay to wait before reconnect attempt `attempt` (1-based).
    ///
    /// Exponential: `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TickwatchError::Config`](crate::TickwatchError::Config) if a
/// numeric variable does not parse, `TICKWATCH_MAX_ATTEMPTS` is zero, or
/// the base delay exceeds the maximum delay.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let websocket_url = non_empty_var("TICKWATCH_WEBSOCKET_URL")
        .unwrap_or_else(|| DEFAULT_WEBSOCKET_URL.to_string());
    let api_url =
        non_empty_var("TICKWATCH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let log_file = non_empty_var("TICKWATCH_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let max_attempts = parse_var("TICKWATCH_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
    let base_delay_ms = parse_var("TICKWATCH_BASE_DELAY_MS", DEFAULT_BASE_DELAY_MS)?;
    let max_delay_ms = parse_var("TICKWATCH_MAX_DELAY_MS", DEFAULT_MAX_DELAY_MS)?;
    let timeout_ms = parse_var("TICKWATCH_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;

    if max_attempts == 0 {
        return Err(crate::TickwatchError::Config(
            "TICKWATCH_MAX_ATTEMPTS must be at least 1".to_string(),
        ));
    }
    if base_delay_ms > max_delay_ms {
        return Err(crate::TickwatchError::Config(format!(
            "TICKWATCH_BASE_DELAY_MS ({base_delay_ms}) exceeds TICKWATCH_MAX_DELAY_MS ({max_delay_ms})"
        )));
    }

    Ok(AppConfig {
        relay: RelayConfig {
            websocket_url,
            api_url,
        },
        reconnect: ReconnectConfig {
            max_attempts,
            base_delay: Duration::from_millis(base_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            timeout: Duration::from_millis(timeout_ms),
        },
        log_file,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a numeric environment variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> crate::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| crate::TickwatchError::Config(format!("{name}={raw:?} is invalid: {e}"))),
        None => Ok(default),
    }
}
