use std::sync::Arc;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::DEFAULT_BIND_ADDR;
use crate::services::{RandomSource, SeededRandom, ThreadRandom};

/// Runtime settings. Read from an optional `quiz.toml` next to the binary and
/// then from the environment (`DB_PATH`, `BIND_ADDR`, `RANDOM_SEED`), the
/// latter taking precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub bind_addr: String,
    /// Makes random question selection reproducible when set.
    pub random_seed: Option<u64>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_config(
            Config::builder()
                .add_source(File::with_name("quiz").required(false))
                .add_source(Environment::default().try_parsing(true)),
        )
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .build()?
            .try_deserialize()
    }

    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.random_seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random question selection");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        }
    }
}
