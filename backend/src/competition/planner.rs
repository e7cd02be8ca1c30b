//! Roster-to-schedule pipeline
//!
//! Entry point used by the competition service when a Super 8 is created:
//! normalize the roster, generate the first stage (or the whole round robin)
//! and hand back the validated result.

use super::bracket::generate_bracket;
use super::error::{CompetitionError, CompetitionResult};
use super::models::{CompetitionFormat, GenerationResult, RosterEntry};
use super::roster::{normalize_athletes, normalize_roster};
use super::round_robin::generate_round_robin_doubles;
use super::shuffle::Shuffler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a Super 8 is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Super8Mode {
    /// Single elimination from quarterfinals
    Knockout,
    /// 7 rounds of rotating doubles partners
    RoundRobin,
}

impl fmt::Display for Super8Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Super8Mode::Knockout => write!(f, "knockout"),
            Super8Mode::RoundRobin => write!(f, "round_robin"),
        }
    }
}

impl FromStr for Super8Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "knockout" | "bracket" => Ok(Super8Mode::Knockout),
            "round_robin" | "roundrobin" => Ok(Super8Mode::RoundRobin),
            other => Err(format!("Unknown Super 8 mode: {}", other)),
        }
    }
}

pub fn generate_from_roster<S: Shuffler>(
    format: CompetitionFormat,
    mode: Super8Mode,
    entries: &[RosterEntry],
    shuffler: &mut S,
) -> CompetitionResult<GenerationResult> {
    let result = match mode {
        Super8Mode::Knockout => {
            let units = normalize_roster(format, entries)?;
            generate_bracket(&units, shuffler)?
        }
        Super8Mode::RoundRobin => {
            // Doubles are formed per round, so the roster must be individual athletes
            if format != CompetitionFormat::Individual {
                return Err(CompetitionError::InvalidRoster {
                    format,
                    reason: "round robin pairs athletes per round and needs an INDIVIDUAL roster"
                        .to_string(),
                });
            }
            let athletes = normalize_athletes(entries)?;
            generate_round_robin_doubles(&athletes, shuffler)?
        }
    };

    tracing::info!(
        "Generated {} {} Super 8: {} matches, {} violations",
        format,
        mode,
        result.matches.len(),
        result.violations.len()
    );
    Ok(result)
}
