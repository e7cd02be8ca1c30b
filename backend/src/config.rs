use crate::competition::{CompetitionFormat, Super8Mode};
use anyhow::{bail, Context};
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub roster_path: PathBuf,
    pub format: CompetitionFormat,
    pub mode: Super8Mode,
    /// Fixed shuffle seed for replaying a draw; `None` draws from OS entropy
    pub shuffle_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let is_production = env::var("ARENA_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let format = match env::var("SUPER8_FORMAT") {
            Ok(value) => value.parse::<CompetitionFormat>().map_err(anyhow::Error::msg)?,
            Err(_) => CompetitionFormat::Individual,
        };

        let mode = match env::var("SUPER8_MODE") {
            Ok(value) => value.parse::<Super8Mode>().map_err(anyhow::Error::msg)?,
            Err(_) => Super8Mode::Knockout,
        };

        let shuffle_seed = match env::var("SUPER8_SEED") {
            Ok(value) => {
                if is_production {
                    bail!("SUPER8_SEED must not be set in production; draws use OS entropy");
                }
                let seed = value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("SUPER8_SEED must be a number, got {:?}", value))?;
                tracing::warn!("Using fixed shuffle seed {}; draws are reproducible", seed);
                Some(seed)
            }
            Err(_) => None,
        };

        Ok(Self {
            roster_path: env::var("SUPER8_ROSTER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("roster.json")),
            format,
            mode,
            shuffle_seed,
        })
    }
}
