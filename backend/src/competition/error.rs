//! Competition error types
//!
//! Caller errors (wrong roster size, wrong winner count) are rejected before
//! any pairing happens. Invariant violations are detected after generation and
//! abort the whole call: no partial schedule is ever returned.

use super::models::{CompetitionFormat, Round};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompetitionError {
    // Caller errors
    #[error("Invalid {format} roster: {reason}")]
    InvalidRoster {
        format: CompetitionFormat,
        reason: String,
    },

    #[error("Expected {expected} distinct participants, found {found}")]
    InvalidParticipantCount { expected: usize, found: usize },

    #[error("Advancing from {stage} needs {expected} winners, got {found}")]
    WrongWinnerCount {
        stage: Round,
        expected: usize,
        found: usize,
    },

    #[error("{round} has no following stage")]
    NoFollowingStage { round: Round },

    #[error("Unit {unit_id} is listed more than once among the {stage} winners")]
    DuplicateWinner { stage: Round, unit_id: String },

    // Invariant violations
    #[error("Athlete {athlete_id} assigned twice in {round} (match {match_number})")]
    DuplicateAssignment {
        athlete_id: String,
        round: Round,
        match_number: u8,
    },

    #[error("Athletes {first} and {second} partnered again in {round}")]
    RepeatedPartner {
        first: String,
        second: String,
        round: Round,
    },

    #[error("Athlete {athlete_id} never partners with: {}", .missing.join(", "))]
    IncompletePartnerCoverage {
        athlete_id: String,
        missing: Vec<String>,
    },

    #[error("Athlete {athlete_id} in {round} (match {match_number}) is not a participant")]
    UnknownAthlete {
        athlete_id: String,
        round: Round,
        match_number: u8,
    },

    #[error("Athlete {athlete_id} does not play in {round}")]
    MissingFromRound { athlete_id: String, round: Round },
}

impl CompetitionError {
    /// True for errors that point at a defect in the engine rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            CompetitionError::DuplicateAssignment { .. }
                | CompetitionError::RepeatedPartner { .. }
                | CompetitionError::IncompletePartnerCoverage { .. }
                | CompetitionError::UnknownAthlete { .. }
                | CompetitionError::MissingFromRound { .. }
        )
    }
}

/// Result type for competition operations
pub type CompetitionResult<T> = Result<T, CompetitionError>;
