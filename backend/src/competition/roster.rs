//! Roster normalization
//!
//! Turns raw registration rows into the units the engine schedules:
//! - INDIVIDUAL: one `Athlete` per distinct athlete id (first-seen name wins)
//! - DUPLAS: one `Pair` per distinct partnership id
//!
//! The roster must contain exactly the Super 8 size after deduplication.
//! Nothing is truncated or padded here.

use super::constants::SUPER8_SIZE;
use super::error::{CompetitionError, CompetitionResult};
use super::models::{Athlete, CompetitionFormat, Pair, RosterEntry, SchedulableUnit};
use std::collections::{HashMap, HashSet};

pub fn normalize_roster(
    format: CompetitionFormat,
    entries: &[RosterEntry],
) -> CompetitionResult<Vec<SchedulableUnit>> {
    match format {
        CompetitionFormat::Individual => Ok(normalize_athletes(entries)?
            .into_iter()
            .map(SchedulableUnit::from)
            .collect()),
        CompetitionFormat::Duplas => Ok(normalize_pairs(entries)?
            .into_iter()
            .map(SchedulableUnit::from)
            .collect()),
    }
}

/// Distinct athletes of an individual roster, in first-seen order
pub fn normalize_athletes(entries: &[RosterEntry]) -> CompetitionResult<Vec<Athlete>> {
    let mut seen = HashSet::new();
    let athletes: Vec<Athlete> = entries
        .iter()
        .filter(|entry| seen.insert(entry.athlete_id.as_str()))
        .map(|entry| Athlete::new(entry.athlete_id.clone(), entry.athlete_name.clone()))
        .collect();

    ensure_roster_size(CompetitionFormat::Individual, athletes.len())?;
    Ok(athletes)
}

/// Fixed pairs of a DUPLAS roster, in first-seen partnership order
pub fn normalize_pairs(entries: &[RosterEntry]) -> CompetitionResult<Vec<Pair>> {
    let format = CompetitionFormat::Duplas;
    let mut order: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<Athlete>> = HashMap::new();
    let mut partnership_of: HashMap<&str, &str> = HashMap::new();

    for entry in entries {
        let partnership_id = entry.partnership_id.as_deref().ok_or_else(|| {
            CompetitionError::InvalidRoster {
                format,
                reason: format!("athlete {} has no partnership", entry.athlete_id),
            }
        })?;

        match partnership_of.get(entry.athlete_id.as_str()) {
            Some(existing) if *existing != partnership_id => {
                return Err(CompetitionError::InvalidRoster {
                    format,
                    reason: format!(
                        "athlete {} is listed in partnerships {} and {}",
                        entry.athlete_id, existing, partnership_id
                    ),
                });
            }
            // Repeated row for the same athlete and partnership
            Some(_) => continue,
            None => {
                partnership_of.insert(entry.athlete_id.as_str(), partnership_id);
            }
        }

        members
            .entry(partnership_id)
            .or_insert_with(|| {
                order.push(partnership_id);
                Vec::new()
            })
            .push(Athlete::new(entry.athlete_id.clone(), entry.athlete_name.clone()));
    }

    let mut pairs = Vec::with_capacity(order.len());
    for partnership_id in order {
        let athletes = members.remove(partnership_id).unwrap_or_default();
        let [athlete_a, athlete_b]: [Athlete; 2] =
            athletes
                .try_into()
                .map_err(|athletes: Vec<Athlete>| CompetitionError::InvalidRoster {
                    format,
                    reason: format!(
                        "partnership {} has {} athletes, expected 2",
                        partnership_id,
                        athletes.len()
                    ),
                })?;
        pairs.push(Pair::new(partnership_id, athlete_a, athlete_b));
    }

    ensure_roster_size(format, pairs.len())?;
    Ok(pairs)
}

fn ensure_roster_size(format: CompetitionFormat, found: usize) -> CompetitionResult<()> {
    if found != SUPER8_SIZE {
        return Err(CompetitionError::InvalidRoster {
            format,
            reason: format!("expected {} participants, found {}", SUPER8_SIZE, found),
        });
    }
    Ok(())
}
