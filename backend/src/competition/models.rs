//! Competition data model
//!
//! Units, rounds and matches produced by the pairing engine. Persistence and
//! rendering layers consume these types as-is, so everything here is serde
//! friendly and carries no scores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How participants enter a competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionFormat {
    /// Every athlete plays for themselves
    Individual,
    /// Athletes enter as fixed doubles partnerships
    Duplas,
}

impl fmt::Display for CompetitionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionFormat::Individual => write!(f, "INDIVIDUAL"),
            CompetitionFormat::Duplas => write!(f, "DUPLAS"),
        }
    }
}

impl FromStr for CompetitionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(CompetitionFormat::Individual),
            "duplas" | "doubles" => Ok(CompetitionFormat::Duplas),
            other => Err(format!("Unknown competition format: {}", other)),
        }
    }
}

/// One row of the competition roster as supplied by the registration layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub athlete_id: String,
    pub athlete_name: String,
    /// Links the two athletes of a fixed pair (DUPLAS only)
    #[serde(default)]
    pub partnership_id: Option<String>,
}

impl RosterEntry {
    pub fn individual(athlete_id: impl Into<String>, athlete_name: impl Into<String>) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            athlete_name: athlete_name.into(),
            partnership_id: None,
        }
    }

    pub fn partnered(
        athlete_id: impl Into<String>,
        athlete_name: impl Into<String>,
        partnership_id: impl Into<String>,
    ) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            athlete_name: athlete_name.into(),
            partnership_id: Some(partnership_id.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
}

impl Athlete {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A fixed doubles partnership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: String,
    pub athlete_a: Athlete,
    pub athlete_b: Athlete,
    /// Derived from the athletes' names, never used for identity
    pub display_name: String,
}

impl Pair {
    pub fn new(id: impl Into<String>, athlete_a: Athlete, athlete_b: Athlete) -> Self {
        let display_name = pair_display_name(&athlete_a.name, &athlete_b.name);
        Self {
            id: id.into(),
            athlete_a,
            athlete_b,
            display_name,
        }
    }
}

/// Synthesized `"A & B"` name for two partnered athletes
pub fn pair_display_name(a: &str, b: &str) -> String {
    format!("{} & {}", a, b)
}

/// Anything the engine can place into a bracket slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulableUnit {
    Athlete(Athlete),
    Pair(Pair),
}

impl SchedulableUnit {
    pub fn id(&self) -> &str {
        match self {
            SchedulableUnit::Athlete(athlete) => &athlete.id,
            SchedulableUnit::Pair(pair) => &pair.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SchedulableUnit::Athlete(athlete) => &athlete.name,
            SchedulableUnit::Pair(pair) => &pair.display_name,
        }
    }

    /// Ids of the athletes behind this unit
    pub fn athlete_ids(&self) -> Vec<&str> {
        match self {
            SchedulableUnit::Athlete(athlete) => vec![athlete.id.as_str()],
            SchedulableUnit::Pair(pair) => vec![pair.athlete_a.id.as_str(), pair.athlete_b.id.as_str()],
        }
    }
}

impl From<Athlete> for SchedulableUnit {
    fn from(athlete: Athlete) -> Self {
        SchedulableUnit::Athlete(athlete)
    }
}

impl From<Pair> for SchedulableUnit {
    fn from(pair: Pair) -> Self {
        SchedulableUnit::Pair(pair)
    }
}

/// Competition rounds
///
/// Knockout rounds form a strict chain (QUARTERFINAL -> SEMIFINAL -> FINAL);
/// round robin rounds are siblings with no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "QUARTERFINAL")]
    Quarterfinal,
    #[serde(rename = "SEMIFINAL")]
    Semifinal,
    #[serde(rename = "FINAL")]
    Final,
    #[serde(rename = "ROUND_1")]
    Round1,
    #[serde(rename = "ROUND_2")]
    Round2,
    #[serde(rename = "ROUND_3")]
    Round3,
    #[serde(rename = "ROUND_4")]
    Round4,
    #[serde(rename = "ROUND_5")]
    Round5,
    #[serde(rename = "ROUND_6")]
    Round6,
    #[serde(rename = "ROUND_7")]
    Round7,
}

impl Round {
    pub const ROUND_ROBIN: [Round; 7] = [
        Round::Round1,
        Round::Round2,
        Round::Round3,
        Round::Round4,
        Round::Round5,
        Round::Round6,
        Round::Round7,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Round::Quarterfinal => "QUARTERFINAL",
            Round::Semifinal => "SEMIFINAL",
            Round::Final => "FINAL",
            Round::Round1 => "ROUND_1",
            Round::Round2 => "ROUND_2",
            Round::Round3 => "ROUND_3",
            Round::Round4 => "ROUND_4",
            Round::Round5 => "ROUND_5",
            Round::Round6 => "ROUND_6",
            Round::Round7 => "ROUND_7",
        }
    }

    pub fn is_knockout(&self) -> bool {
        matches!(self, Round::Quarterfinal | Round::Semifinal | Round::Final)
    }

    /// Knockout successor; `None` for the final and for round robin rounds
    pub fn next(&self) -> Option<Round> {
        match self {
            Round::Quarterfinal => Some(Round::Semifinal),
            Round::Semifinal => Some(Round::Final),
            _ => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchSide {
    /// A bracket unit (knockout stages)
    Unit { unit: SchedulableUnit },
    /// Two athletes partnered for this match only (round robin doubles)
    Doubles {
        athlete_ids: [String; 2],
        display_name: String,
    },
}

impl MatchSide {
    pub fn doubles(a: &Athlete, b: &Athlete) -> Self {
        MatchSide::Doubles {
            athlete_ids: [a.id.clone(), b.id.clone()],
            display_name: pair_display_name(&a.name, &b.name),
        }
    }

    pub fn athlete_ids(&self) -> Vec<&str> {
        match self {
            MatchSide::Unit { unit } => unit.athlete_ids(),
            MatchSide::Doubles { athlete_ids, .. } => athlete_ids.iter().map(String::as_str).collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            MatchSide::Unit { unit } => unit.display_name(),
            MatchSide::Doubles { display_name, .. } => display_name,
        }
    }
}

impl From<SchedulableUnit> for MatchSide {
    fn from(unit: SchedulableUnit) -> Self {
        MatchSide::Unit { unit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub round: Round,
    /// 1-based position within the round
    pub match_number: u8,
    pub side1: MatchSide,
    pub side2: MatchSide,
}

impl Match {
    pub fn new(round: Round, match_number: u8, side1: MatchSide, side2: MatchSide) -> Self {
        Self {
            round,
            match_number,
            side1,
            side2,
        }
    }

    pub fn describe(&self) -> String {
        format!("{} vs {}", self.side1.display_name(), self.side2.display_name())
    }
}

/// Output of a generation call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub matches: Vec<Match>,
    /// Non-fatal opponent coverage gaps, empty when every pair meets
    pub violations: Vec<String>,
}

impl GenerationResult {
    pub fn is_fully_covered(&self) -> bool {
        self.violations.is_empty()
    }

    /// Matches grouped by round, in generation order
    pub fn rounds(&self) -> Vec<(Round, Vec<&Match>)> {
        let mut grouped: Vec<(Round, Vec<&Match>)> = Vec::new();
        for m in &self.matches {
            match grouped.iter_mut().find(|(round, _)| *round == m.round) {
                Some((_, matches)) => matches.push(m),
                None => grouped.push((m.round, vec![m])),
            }
        }
        grouped
    }
}
