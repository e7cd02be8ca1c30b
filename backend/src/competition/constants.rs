//! Fixed sizes of the Super 8 competition format
//!
//! Every Super 8 draw works on exactly eight schedulable units, so the
//! knockout stages and the doubles rotation are all derived from these values.

/// Number of units (athletes or fixed pairs) in a Super 8 draw
pub const SUPER8_SIZE: usize = 8;

/// Athletes on each side of a doubles match
pub const DOUBLES_SIDE_SIZE: usize = 2;

/// Rounds in the doubles round robin (each athlete partners the other 7 once)
pub const ROUND_ROBIN_ROUNDS: usize = SUPER8_SIZE - 1;

/// Matches played in every round robin round
pub const MATCHES_PER_ROUND: usize = SUPER8_SIZE / (2 * DOUBLES_SIDE_SIZE);

/// Total matches in a round robin schedule
pub const ROUND_ROBIN_MATCHES: usize = ROUND_ROBIN_ROUNDS * MATCHES_PER_ROUND;

/// Knockout stage sizes
pub const QUARTERFINAL_MATCHES: usize = SUPER8_SIZE / 2;
pub const SEMIFINAL_MATCHES: usize = QUARTERFINAL_MATCHES / 2;
