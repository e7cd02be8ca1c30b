//! Knockout progression
//!
//! Winners are paired in the order they arrive, so the winner of match 1
//! always meets the winner of match 2. No reshuffling between stages.

use super::bracket::{overlapping_units, pair_in_order};
use super::constants::{QUARTERFINAL_MATCHES, SEMIFINAL_MATCHES};
use super::error::{CompetitionError, CompetitionResult};
use super::models::{Match, Round, SchedulableUnit};
use super::validator::validate_knockout;

/// Winners a completed stage must supply
fn expected_winners(stage: Round) -> Option<usize> {
    match stage {
        Round::Quarterfinal => Some(QUARTERFINAL_MATCHES),
        Round::Semifinal => Some(SEMIFINAL_MATCHES),
        _ => None,
    }
}

/// Build the matches of the stage after `stage` from its winners
pub fn advance(stage: Round, winners: &[SchedulableUnit]) -> CompetitionResult<Vec<Match>> {
    let (next, expected) = match (stage.next(), expected_winners(stage)) {
        (Some(next), Some(expected)) => (next, expected),
        _ => return Err(CompetitionError::NoFollowingStage { round: stage }),
    };

    if winners.len() != expected {
        return Err(CompetitionError::WrongWinnerCount {
            stage,
            expected,
            found: winners.len(),
        });
    }

    if let Some(unit) = overlapping_units(winners).first() {
        return Err(CompetitionError::DuplicateWinner {
            stage,
            unit_id: unit.id().to_string(),
        });
    }

    let matches = pair_in_order(next, winners.to_vec());
    validate_knockout(&matches, winners)?;

    tracing::debug!("Advanced {} winners from {} into {}", winners.len(), stage, next);
    Ok(matches)
}

/// Semifinals from the 4 quarterfinal winners, in quarterfinal order
pub fn advance_from_quarterfinals(winners: &[SchedulableUnit]) -> CompetitionResult<[Match; 2]> {
    advance(Round::Quarterfinal, winners)?
        .try_into()
        .map_err(|_| CompetitionError::WrongWinnerCount {
            stage: Round::Quarterfinal,
            expected: QUARTERFINAL_MATCHES,
            found: winners.len(),
        })
}

/// Final from the 2 semifinal winners
pub fn advance_from_semifinals(winners: &[SchedulableUnit]) -> CompetitionResult<Match> {
    advance(Round::Semifinal, winners)?
        .into_iter()
        .next()
        .ok_or(CompetitionError::WrongWinnerCount {
            stage: Round::Semifinal,
            expected: SEMIFINAL_MATCHES,
            found: winners.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::models::Athlete;

    fn winners(n: usize) -> Vec<SchedulableUnit> {
        (0..n)
            .map(|i| Athlete::new(format!("w{}", i), format!("Winner {}", i)).into())
            .collect()
    }

    #[test]
    fn test_semifinals_keep_quarterfinal_order() {
        let w = winners(4);
        let [sf1, sf2] = advance_from_quarterfinals(&w).unwrap();

        assert_eq!(sf1.round, Round::Semifinal);
        assert_eq!(sf1.match_number, 1);
        assert_eq!(sf1.describe(), "Winner 0 vs Winner 1");
        assert_eq!(sf2.match_number, 2);
        assert_eq!(sf2.describe(), "Winner 2 vs Winner 3");
    }

    #[test]
    fn test_final_from_semifinals() {
        let w = winners(2);
        let final_match = advance_from_semifinals(&w).unwrap();
        assert_eq!(final_match.round, Round::Final);
        assert_eq!(final_match.match_number, 1);
        assert_eq!(final_match.describe(), "Winner 0 vs Winner 1");
    }

    #[test]
    fn test_wrong_winner_counts() {
        for n in [0, 3, 5, 8] {
            assert_eq!(
                advance_from_quarterfinals(&winners(n)).unwrap_err(),
                CompetitionError::WrongWinnerCount {
                    stage: Round::Quarterfinal,
                    expected: 4,
                    found: n,
                }
            );
        }
        assert!(matches!(
            advance_from_semifinals(&winners(3)),
            Err(CompetitionError::WrongWinnerCount { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_nothing_follows_the_final() {
        assert_eq!(
            advance(Round::Final, &winners(1)).unwrap_err(),
            CompetitionError::NoFollowingStage { round: Round::Final }
        );
        assert!(matches!(
            advance(Round::Round2, &winners(2)),
            Err(CompetitionError::NoFollowingStage { .. })
        ));
    }

    #[test]
    fn test_same_winner_twice_is_a_caller_error() {
        let mut w = winners(2);
        w[1] = w[0].clone();
        let err = advance_from_semifinals(&w).unwrap_err();
        assert_eq!(
            err,
            CompetitionError::DuplicateWinner {
                stage: Round::Semifinal,
                unit_id: "w0".to_string(),
            }
        );
        assert!(!err.is_invariant_violation());

        let mut w = winners(4);
        w[3] = w[1].clone();
        assert!(matches!(
            advance_from_quarterfinals(&w),
            Err(CompetitionError::DuplicateWinner { stage: Round::Quarterfinal, .. })
        ));
    }
}
