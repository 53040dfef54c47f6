//! Logging setup
//!
//! The library only emits `tracing` events; binaries decide where they go.
//! Output is written to stderr so stdout stays free for reports.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Install a global subscriber
///
/// `RUST_LOG` wins over [`ObservabilityConfig::level`] when it is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use xmlsynth::observability::{self, ObservabilityConfig};
///
/// observability::init(&ObservabilityConfig::from_verbosity(1)).unwrap();
/// tracing::info!("ready");
/// ```
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Level for the xmlsynth crates
    pub level: String,

    /// Level for everything else
    pub dependency_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            dependency_level: "warn".to_string(),
            json: false,
        }
    }
}

impl ObservabilityConfig {
    /// Map a `-v` count to a level: 0 warn, 1 info, 2 debug, 3+ trace
    #[must_use]
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            level: level.to_string(),
            ..Self::default()
        }
    }

    /// Switch to JSON output
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset
    #[must_use]
    pub fn directive(&self) -> String {
        format!(
            "{},xmlsynth={level},xmlsynth_cli={level}",
            self.dependency_level,
            level = self.level
        )
    }
}
