//! Server configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use trainer_core::TrainerSettings;

use crate::registry::DEFAULT_SESSION_TTL;

/// Runtime configuration of the trainer service.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub settings: TrainerSettings,
    /// Seed for the selection RNG; entropy when absent.
    pub rng_seed: Option<u64>,
    /// Idle time after which a practice session is dropped.
    pub session_ttl: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = TrainerSettings::default();

        if let Some(raw) = lookup("MATCH_THRESHOLD") {
            let threshold: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("MATCH_THRESHOLD is not a number: {raw}"))?;
            if !(threshold > 0.0 && threshold <= 1.0) {
                bail!("MATCH_THRESHOLD must be in (0, 1], got {threshold}");
            }
            settings.match_threshold = threshold;
        }

        if let Some(mode) = lookup("DEFAULT_MODE").filter(|m| !m.trim().is_empty()) {
            settings.default_mode = mode.trim().to_string();
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => 3000,
        };

        let rng_seed = lookup("RNG_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("RNG_SEED is not an unsigned integer: {raw}"))
            })
            .transpose()?;

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("SESSION_TTL_SECS is not an unsigned integer: {raw}"))?;
                if secs == 0 {
                    bail!("SESSION_TTL_SECS must be positive");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_SESSION_TTL,
        };

        Ok(Self {
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/specimens.json")),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            settings,
            rng_seed,
            session_ttl,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_database_path() -> PathBuf {
    // App data directory, falling back to the working directory
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("specimen-trainer")
        .join("trainer.db")
}
