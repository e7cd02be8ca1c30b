//! Post-generation schedule checks
//!
//! Pure functions over a finished match list. Hard invariants come back as
//! errors; opponent coverage gaps in a round robin come back as data.

use super::error::{CompetitionError, CompetitionResult};
use super::models::{Athlete, Match, Round, SchedulableUnit};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Check a knockout stage: no athlete twice in a match, every unit in exactly one match
pub fn validate_knockout(matches: &[Match], units: &[SchedulableUnit]) -> CompetitionResult<()> {
    let roster: HashSet<&str> = units.iter().flat_map(|unit| unit.athlete_ids()).collect();
    let mut placed: HashSet<&str> = HashSet::new();

    for m in matches {
        ensure_distinct_sides(m)?;
        for athlete_id in match_athletes(m) {
            ensure_participant(&roster, athlete_id, m)?;
            if !placed.insert(athlete_id) {
                return Err(CompetitionError::DuplicateAssignment {
                    athlete_id: athlete_id.to_string(),
                    round: m.round,
                    match_number: m.match_number,
                });
            }
        }
    }

    let unplaced = units
        .iter()
        .flat_map(|unit| unit.athlete_ids())
        .find(|athlete_id| !placed.contains(athlete_id));
    if let Some(athlete_id) = unplaced {
        return Err(match matches.first() {
            Some(m) => CompetitionError::MissingFromRound {
                athlete_id: athlete_id.to_string(),
                round: m.round,
            },
            None => CompetitionError::InvalidParticipantCount {
                expected: roster.len(),
                found: 0,
            },
        });
    }
    Ok(())
}

/// Check a doubles round robin schedule
///
/// Returns the opponent coverage gaps on success. Foreign athletes, athletes
/// sitting out a round, repeated partners and incomplete partner sets abort
/// with an error.
pub fn validate_round_robin(matches: &[Match], athletes: &[Athlete]) -> CompetitionResult<Vec<String>> {
    let roster: HashSet<&str> = athletes.iter().map(|athlete| athlete.id.as_str()).collect();
    let mut partners: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut opponents: HashSet<(&str, &str)> = HashSet::new();
    let mut seen_in_round: HashSet<(Round, &str)> = HashSet::new();

    for m in matches {
        ensure_distinct_sides(m)?;

        for athlete_id in match_athletes(m) {
            ensure_participant(&roster, athlete_id, m)?;
            if !seen_in_round.insert((m.round, athlete_id)) {
                return Err(CompetitionError::DuplicateAssignment {
                    athlete_id: athlete_id.to_string(),
                    round: m.round,
                    match_number: m.match_number,
                });
            }
        }

        for side in [&m.side1, &m.side2] {
            let ids = side.athlete_ids();
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    record_partners(&mut partners, a, b, m.round)?;
                    record_partners(&mut partners, b, a, m.round)?;
                }
            }
        }

        for a in m.side1.athlete_ids() {
            for b in m.side2.athlete_ids() {
                opponents.insert(unordered(a, b));
            }
        }
    }

    // Every athlete plays once in every round that was scheduled
    let rounds: BTreeSet<Round> = matches.iter().map(|m| m.round).collect();
    for &round in &rounds {
        if let Some(athlete) = athletes
            .iter()
            .find(|athlete| !seen_in_round.contains(&(round, athlete.id.as_str())))
        {
            return Err(CompetitionError::MissingFromRound {
                athlete_id: athlete.id.clone(),
                round,
            });
        }
    }

    let expected_partners = athletes.len().saturating_sub(1);
    for athlete in athletes {
        let partnered = partners.get(athlete.id.as_str());
        let missing: Vec<String> = athletes
            .iter()
            .filter(|other| other.id != athlete.id)
            .filter(|other| !partnered.map_or(false, |set| set.contains(other.id.as_str())))
            .map(|other| other.id.clone())
            .collect();
        let partner_count = partnered.map_or(0, HashSet::len);
        if !missing.is_empty() || partner_count != expected_partners {
            return Err(CompetitionError::IncompletePartnerCoverage {
                athlete_id: athlete.id.clone(),
                missing,
            });
        }
    }

    Ok(opponent_gaps(&opponents, athletes))
}

fn match_athletes(m: &Match) -> impl Iterator<Item = &str> + '_ {
    m.side1.athlete_ids().into_iter().chain(m.side2.athlete_ids())
}

fn ensure_participant(roster: &HashSet<&str>, athlete_id: &str, m: &Match) -> CompetitionResult<()> {
    if !roster.contains(athlete_id) {
        return Err(CompetitionError::UnknownAthlete {
            athlete_id: athlete_id.to_string(),
            round: m.round,
            match_number: m.match_number,
        });
    }
    Ok(())
}

fn record_partners<'a>(
    partners: &mut HashMap<&'a str, HashSet<&'a str>>,
    athlete: &'a str,
    partner: &'a str,
    round: Round,
) -> CompetitionResult<()> {
    if !partners.entry(athlete).or_default().insert(partner) {
        return Err(CompetitionError::RepeatedPartner {
            first: athlete.to_string(),
            second: partner.to_string(),
            round,
        });
    }
    Ok(())
}

fn ensure_distinct_sides(m: &Match) -> CompetitionResult<()> {
    let mut in_match = BTreeSet::new();
    for athlete_id in match_athletes(m) {
        if !in_match.insert(athlete_id) {
            return Err(CompetitionError::DuplicateAssignment {
                athlete_id: athlete_id.to_string(),
                round: m.round,
                match_number: m.match_number,
            });
        }
    }
    Ok(())
}

fn opponent_gaps(opponents: &HashSet<(&str, &str)>, athletes: &[Athlete]) -> Vec<String> {
    let mut gaps = Vec::new();
    for (i, a) in athletes.iter().enumerate() {
        for b in &athletes[i + 1..] {
            if !opponents.contains(&unordered(&a.id, &b.id)) {
                gaps.push(format!("{} and {} never face each other", a.name, b.name));
            }
        }
    }
    gaps
}

fn unordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
