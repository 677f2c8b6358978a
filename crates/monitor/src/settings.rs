//! Layered application settings
//!
//! Defaults, then an optional TOML/JSON/YAML file, then `NEURODRIVE__*`
//! environment variables (e.g. `NEURODRIVE__DMS__CONSEC_FRAMES_THRESHOLD=15`).

use alerting::AlarmConfig;
use dms::DmsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "NEURODRIVE";

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decision-core thresholds
    pub dms: DmsConfig,
    /// Alarm actuator settings
    pub alarm: AlarmConfig,
    /// Observations buffered between ingestion and the decision loop
    pub channel_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dms: DmsConfig::default(),
            alarm: AlarmConfig::default(),
            channel_capacity: 64,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Settings::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
