//! Single-elimination bracket seeding
//!
//! Only the first stage is built here. Later stages come from
//! `progression`, which keeps this seeding order.

use super::constants::{QUARTERFINAL_MATCHES, SUPER8_SIZE};
use super::error::{CompetitionError, CompetitionResult};
use super::models::{GenerationResult, Match, Round, SchedulableUnit};
use super::shuffle::Shuffler;
use super::validator::validate_knockout;
use std::collections::HashSet;

/// Shuffle 8 units and pair them into 4 quarterfinals
pub fn generate_bracket<S: Shuffler>(
    units: &[SchedulableUnit],
    shuffler: &mut S,
) -> CompetitionResult<GenerationResult> {
    let distinct = units.len() - overlapping_units(units).len();
    if units.len() != SUPER8_SIZE || distinct != SUPER8_SIZE {
        return Err(CompetitionError::InvalidParticipantCount {
            expected: SUPER8_SIZE,
            found: distinct,
        });
    }

    let mut seeding = units.to_vec();
    shuffler.shuffle(&mut seeding);

    let matches = pair_in_order(Round::Quarterfinal, seeding);
    debug_assert_eq!(matches.len(), QUARTERFINAL_MATCHES);
    validate_knockout(&matches, units)?;

    tracing::debug!("Seeded {} quarterfinals", matches.len());
    Ok(GenerationResult {
        matches,
        violations: Vec::new(),
    })
}

/// Pair consecutive units: (0, 1), (2, 3), ... numbered from 1
pub(crate) fn pair_in_order(round: Round, units: Vec<SchedulableUnit>) -> Vec<Match> {
    let mut matches = Vec::with_capacity(units.len() / 2);
    let mut iter = units.into_iter();
    while let (Some(side1), Some(side2)) = (iter.next(), iter.next()) {
        let match_number = matches.len() as u8 + 1;
        matches.push(Match::new(round, match_number, side1.into(), side2.into()));
    }
    matches
}

/// Units whose id or athletes were already claimed by an earlier unit
pub(crate) fn overlapping_units(units: &[SchedulableUnit]) -> Vec<&SchedulableUnit> {
    let mut unit_ids = HashSet::new();
    let mut athlete_ids = HashSet::new();
    units
        .iter()
        .filter(|&unit| {
            let ids = unit.athlete_ids();
            let fresh = !unit_ids.contains(unit.id())
                && ids.iter().all(|id| !athlete_ids.contains(id));
            if fresh {
                unit_ids.insert(unit.id());
                athlete_ids.extend(ids);
            }
            !fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::models::{Athlete, Pair};
    use crate::competition::shuffle::{IdentityShuffler, RandomShuffler};

    fn athlete_units(n: usize) -> Vec<SchedulableUnit> {
        (0..n)
            .map(|i| Athlete::new(format!("a{}", i), format!("Athlete {}", i)).into())
            .collect()
    }

    #[test]
    fn test_identity_seeding_pairs_neighbours() {
        let units = athlete_units(8);
        let result = generate_bracket(&units, &mut IdentityShuffler).unwrap();

        assert_eq!(result.matches.len(), 4);
        assert!(result.violations.is_empty());
        for (i, m) in result.matches.iter().enumerate() {
            assert_eq!(m.round, Round::Quarterfinal);
            assert_eq!(m.match_number as usize, i + 1);
            assert_eq!(m.side1.athlete_ids(), vec![units[2 * i].id()]);
            assert_eq!(m.side2.athlete_ids(), vec![units[2 * i + 1].id()]);
        }
    }

    #[test]
    fn test_seeded_bracket_places_every_unit_once() {
        let units = athlete_units(8);
        let result = generate_bracket(&units, &mut RandomShuffler::seeded(99)).unwrap();

        let mut placed: Vec<&str> = result
            .matches
            .iter()
            .flat_map(|m| m.side1.athlete_ids().into_iter().chain(m.side2.athlete_ids()))
            .collect();
        placed.sort();
        let mut expected: Vec<&str> = units.iter().map(|u| u.id()).collect();
        expected.sort();
        assert_eq!(placed, expected);
    }

    #[test]
    fn test_wrong_size_is_rejected() {
        for n in [0, 4, 7, 9, 16] {
            let err = generate_bracket(&athlete_units(n), &mut IdentityShuffler).unwrap_err();
            assert_eq!(
                err,
                CompetitionError::InvalidParticipantCount {
                    expected: 8,
                    found: n,
                }
            );
        }
    }

    #[test]
    fn test_duplicate_units_do_not_count() {
        let mut units = athlete_units(7);
        units.push(units[0].clone());
        let err = generate_bracket(&units, &mut IdentityShuffler).unwrap_err();
        assert_eq!(
            err,
            CompetitionError::InvalidParticipantCount {
                expected: 8,
                found: 7,
            }
        );
    }

    #[test]
    fn test_pair_bracket() {
        let units: Vec<SchedulableUnit> = (0..8)
            .map(|p| {
                Pair::new(
                    format!("p{}", p),
                    Athlete::new(format!("a{}", 2 * p), "A"),
                    Athlete::new(format!("a{}", 2 * p + 1), "B"),
                )
                .into()
            })
            .collect();
        let result = generate_bracket(&units, &mut RandomShuffler::seeded(3)).unwrap();
        assert_eq!(result.matches.len(), 4);
        assert_eq!(result.matches[0].side1.athlete_ids().len(), 2);
    }

    #[test]
    fn test_pairs_sharing_an_athlete_are_rejected() {
        let mut units = athlete_units(7);
        units.push(
            Pair::new("p", Athlete::new("a0", "A"), Athlete::new("x", "X")).into(),
        );
        assert!(matches!(
            generate_bracket(&units, &mut IdentityShuffler),
            Err(CompetitionError::InvalidParticipantCount { found: 7, .. })
        ));
    }
}
