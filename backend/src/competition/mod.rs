//! Super 8 pairing engine
//!
//! Builds knockout brackets, knockout progression and the doubles round robin
//! for 8-participant competitions. Every call is a pure function of the
//! roster and the injected shuffler; persistence and delivery live elsewhere.

pub mod bracket;
pub mod constants;
pub mod error;
pub mod models;
pub mod planner;
pub mod progression;
pub mod roster;
pub mod round_robin;
pub mod shuffle;
pub mod validator;

pub use bracket::generate_bracket;
pub use error::{CompetitionError, CompetitionResult};
pub use models::{
    Athlete, CompetitionFormat, GenerationResult, Match, MatchSide, Pair, RosterEntry, Round,
    SchedulableUnit,
};
pub use planner::{generate_from_roster, Super8Mode};
pub use progression::{advance, advance_from_quarterfinals, advance_from_semifinals};
pub use roster::normalize_roster;
pub use round_robin::{generate_round_robin_doubles, SUPER8_ROTATION};
pub use shuffle::{IdentityShuffler, RandomShuffler, Shuffler};
