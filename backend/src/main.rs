use arena_server::competition::{generate_from_roster, RandomShuffler, RosterEntry};
use arena_server::config;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG=debug lists every match
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = config::Config::from_env()?;
    tracing::info!(
        "Generating {} {} Super 8 from {}",
        config.format,
        config.mode,
        config.roster_path.display()
    );

    // Load roster
    let raw = std::fs::read_to_string(&config.roster_path)
        .with_context(|| format!("Failed to read roster {}", config.roster_path.display()))?;
    let entries: Vec<RosterEntry> =
        serde_json::from_str(&raw).context("Roster must be a JSON array of entries")?;

    let mut shuffler = match config.shuffle_seed {
        Some(seed) => RandomShuffler::seeded(seed),
        None => RandomShuffler::from_entropy(),
    };

    let result = match generate_from_roster(config.format, config.mode, &entries, &mut shuffler) {
        Ok(result) => result,
        Err(err) => {
            if err.is_invariant_violation() {
                tracing::error!("Schedule failed validation: {}", err);
            } else {
                tracing::error!("Cannot generate schedule: {}", err);
            }
            return Err(err.into());
        }
    };

    for violation in &result.violations {
        tracing::warn!("Opponent coverage gap: {}", violation);
    }
    for m in &result.matches {
        tracing::debug!("{} #{}: {}", m.round, m.match_number, m.describe());
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
