//! Super 8 doubles round robin
//!
//! Eight athletes play 7 rounds of 2 doubles matches. Partners change every
//! round and every athlete partners each of the other seven exactly once.
//!
//! The combinatorial structure lives in a fixed rotation matrix over seeding
//! slots 0..7. Shuffling only decides which athlete sits in which slot, so
//! every draw has the same structure and the same guarantees.

use super::constants::{MATCHES_PER_ROUND, ROUND_ROBIN_MATCHES, ROUND_ROBIN_ROUNDS, SUPER8_SIZE};
use super::error::{CompetitionError, CompetitionResult};
use super::models::{Athlete, GenerationResult, Match, MatchSide, Round};
use super::shuffle::Shuffler;
use super::validator::validate_round_robin;
use std::collections::HashSet;

/// One doubles game expressed in seeding slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGame {
    pub side_a: [usize; 2],
    pub side_b: [usize; 2],
}

/// Games of a single round
pub type SlotRound = [SlotGame; MATCHES_PER_ROUND];

/// Full partner rotation for one round robin
pub type RotationMatrix = [SlotRound; ROUND_ROBIN_ROUNDS];

const fn game(side_a: [usize; 2], side_b: [usize; 2]) -> SlotGame {
    SlotGame { side_a, side_b }
}

/// Partner rotation for 8 slots (a one-factorization of K8)
///
/// Each row uses all 8 slots once. Across the 7 rows every unordered slot
/// pair sits on the same side exactly once, and every pair also meets as
/// opponents at least once.
pub const SUPER8_ROTATION: RotationMatrix = [
    [game([0, 1], [2, 3]), game([4, 5], [6, 7])],
    [game([0, 2], [4, 6]), game([1, 3], [5, 7])],
    [game([0, 3], [5, 6]), game([1, 2], [4, 7])],
    [game([0, 4], [1, 5]), game([2, 6], [3, 7])],
    [game([0, 5], [2, 7]), game([1, 4], [3, 6])],
    [game([0, 6], [1, 7]), game([2, 4], [3, 5])],
    [game([0, 7], [1, 6]), game([2, 5], [3, 4])],
];

/// Shuffle 8 athletes into seeding slots and build the 14-match schedule
pub fn generate_round_robin_doubles<S: Shuffler>(
    athletes: &[Athlete],
    shuffler: &mut S,
) -> CompetitionResult<GenerationResult> {
    generate_with_matrix(athletes, shuffler, &SUPER8_ROTATION)
}

/// Same as [`generate_round_robin_doubles`] with an explicit rotation matrix
pub fn generate_with_matrix<S: Shuffler>(
    athletes: &[Athlete],
    shuffler: &mut S,
    matrix: &RotationMatrix,
) -> CompetitionResult<GenerationResult> {
    let mut seen = HashSet::new();
    let distinct = athletes.iter().filter(|a| seen.insert(a.id.as_str())).count();
    if athletes.len() != SUPER8_SIZE || distinct != SUPER8_SIZE {
        return Err(CompetitionError::InvalidParticipantCount {
            expected: SUPER8_SIZE,
            found: distinct,
        });
    }

    let mut seating = athletes.to_vec();
    shuffler.shuffle(&mut seating);

    let matches = schedule_from_seating(&seating, matrix)?;
    let violations = validate_round_robin(&matches, &seating)?;

    tracing::debug!(
        "Built round robin: {} matches, {} opponent gaps",
        matches.len(),
        violations.len()
    );
    Ok(GenerationResult { matches, violations })
}

/// Translate slot indices into matches for a seated roster
fn schedule_from_seating(seating: &[Athlete], matrix: &RotationMatrix) -> CompetitionResult<Vec<Match>> {
    let mut matches = Vec::with_capacity(ROUND_ROBIN_MATCHES);

    for (&round, slot_round) in Round::ROUND_ROBIN.iter().zip(matrix.iter()) {
        for (game_index, slot_game) in slot_round.iter().enumerate() {
            let side1 = seat_side(seating, slot_game.side_a)?;
            let side2 = seat_side(seating, slot_game.side_b)?;
            matches.push(Match::new(round, game_index as u8 + 1, side1, side2));
        }
    }
    Ok(matches)
}

fn seat_side(seating: &[Athlete], slots: [usize; 2]) -> CompetitionResult<MatchSide> {
    match (seating.get(slots[0]), seating.get(slots[1])) {
        (Some(a), Some(b)) => Ok(MatchSide::doubles(a, b)),
        _ => Err(CompetitionError::InvalidParticipantCount {
            expected: SUPER8_SIZE,
            found: seating.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::shuffle::{IdentityShuffler, RandomShuffler};
    use std::collections::{BTreeSet, HashMap};

    fn letters() -> Vec<Athlete> {
        ["A", "B", "C", "D", "E", "F", "G", "H"]
            .iter()
            .map(|name| Athlete::new(*name, *name))
            .collect()
    }

    fn slot_pair(a: usize, b: usize) -> (usize, usize) {
        (a.min(b), a.max(b))
    }

    #[test]
    fn test_matrix_rows_use_every_slot_once() {
        for row in SUPER8_ROTATION.iter() {
            let slots: BTreeSet<usize> = row
                .iter()
                .flat_map(|g| g.side_a.iter().chain(g.side_b.iter()).copied())
                .collect();
            assert_eq!(slots, (0..SUPER8_SIZE).collect::<BTreeSet<_>>());
        }
    }

    #[test]
    fn test_matrix_partners_every_pair_exactly_once() {
        let mut partner_counts: HashMap<(usize, usize), usize> = HashMap::new();
        for row in SUPER8_ROTATION.iter() {
            for g in row {
                for side in [g.side_a, g.side_b] {
                    *partner_counts.entry(slot_pair(side[0], side[1])).or_default() += 1;
                }
            }
        }
        assert_eq!(partner_counts.len(), SUPER8_SIZE * (SUPER8_SIZE - 1) / 2);
        assert!(partner_counts.values().all(|&count| count == 1));
    }

    #[test]
    fn test_matrix_covers_every_opponent_pair() {
        let mut opponents = HashSet::new();
        for row in SUPER8_ROTATION.iter() {
            for g in row {
                for &a in &g.side_a {
                    for &b in &g.side_b {
                        opponents.insert(slot_pair(a, b));
                    }
                }
            }
        }
        assert_eq!(opponents.len(), SUPER8_SIZE * (SUPER8_SIZE - 1) / 2);
    }

    #[test]
    fn test_identity_seating_round_one() {
        let result = generate_round_robin_doubles(&letters(), &mut IdentityShuffler).unwrap();

        assert_eq!(result.matches.len(), 14);
        assert_eq!(result.matches[0].round, Round::Round1);
        assert_eq!(result.matches[0].describe(), "A & B vs C & D");
        assert_eq!(result.matches[1].round, Round::Round1);
        assert_eq!(result.matches[1].match_number, 2);
        assert_eq!(result.matches[1].describe(), "E & F vs G & H");
        assert_eq!(result.matches[13].round, Round::Round7);
        assert_eq!(result.matches[13].describe(), "C & F vs D & E");
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_identity_seating_partners_of_a() {
        let result = generate_round_robin_doubles(&letters(), &mut IdentityShuffler).unwrap();

        let mut partners = Vec::new();
        for m in &result.matches {
            for side in [&m.side1, &m.side2] {
                let ids = side.athlete_ids();
                if ids.contains(&"A") {
                    partners.extend(ids.into_iter().filter(|id| *id != "A"));
                }
            }
        }
        assert_eq!(partners, vec!["B", "C", "D", "E", "F", "G", "H"]);
    }

    #[test]
    fn test_seeded_schedule_is_reproducible() {
        let first = generate_round_robin_doubles(&letters(), &mut RandomShuffler::seeded(11)).unwrap();
        let second = generate_round_robin_doubles(&letters(), &mut RandomShuffler::seeded(11)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_roster_size() {
        let mut athletes = letters();
        athletes.pop();
        assert_eq!(
            generate_round_robin_doubles(&athletes, &mut IdentityShuffler).unwrap_err(),
            CompetitionError::InvalidParticipantCount {
                expected: 8,
                found: 7,
            }
        );

        let mut athletes = letters();
        athletes[7] = athletes[0].clone();
        assert!(matches!(
            generate_round_robin_doubles(&athletes, &mut IdentityShuffler),
            Err(CompetitionError::InvalidParticipantCount { found: 7, .. })
        ));
    }

    #[test]
    fn test_corrupted_matrix_aborts() {
        let mut matrix = SUPER8_ROTATION;
        matrix[6] = matrix[0];
        let err = generate_with_matrix(&letters(), &mut IdentityShuffler, &matrix).unwrap_err();
        assert_eq!(
            err,
            CompetitionError::RepeatedPartner {
                first: "A".to_string(),
                second: "B".to_string(),
                round: Round::Round7,
            }
        );

        let mut matrix = SUPER8_ROTATION;
        matrix[2][1] = game([1, 2], [4, 1]);
        let err = generate_with_matrix(&letters(), &mut IdentityShuffler, &matrix).unwrap_err();
        assert!(matches!(
            err,
            CompetitionError::DuplicateAssignment { round: Round::Round3, match_number: 2, .. }
        ));
        assert!(err.is_invariant_violation());
    }
}
