//! Moves, histories, and tournament entrants

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata placeholder for entrants that omit a required field
pub const MISSING_ASSIGNMENT: &str = "missing assignment";

/// A move in the Prisoner's Dilemma
///
/// `Invalid` is the sentinel recorded when a decision function returned
/// something other than a single `'c'` or `'b'`. It is never handed back
/// to a strategy as a collude or betray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Collude,
    Betray,
    Invalid,
}

impl Move {
    /// Single-character encoding: `'c'`, `'b'`, or `' '` for invalid
    pub fn symbol(self) -> char {
        match self {
            Move::Collude => 'c',
            Move::Betray => 'b',
            Move::Invalid => ' ',
        }
    }

    pub fn is_valid(self) -> bool {
        !matches!(self, Move::Invalid)
    }
}

/// One player's moves against one specific opponent, in round order
///
/// Histories are per ordered (player, opponent) pair and are never shared
/// or merged across opponents. Invalid rounds appear as blank cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History(Vec<Move>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self(Vec::with_capacity(rounds))
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<Move> {
        self.0.last().copied()
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    /// Compact symbol form, e.g. `"ccb b"`
    pub fn symbols(&self) -> String {
        self.0.iter().map(|mv| mv.symbol()).collect()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv.symbol())?;
        }
        Ok(())
    }
}

impl FromIterator<Move> for History {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A decision function failed to produce any value
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("decision function failed: {0}")]
    Decision(String),
}

/// Capability interface for a strategy's decision function
///
/// Arguments are always from the caller's own perspective: own history
/// first, opponent history second, own score, opponent score. The return
/// value is the raw move symbol (`"c"` or `"b"`); anything else is
/// sanitized to an invalid move by the engine rather than rejected.
pub trait Decider {
    fn decide(
        &self,
        my_history: &History,
        their_history: &History,
        my_score: i64,
        their_score: i64,
    ) -> Result<String, StrategyError>;
}

/// A fully-formed tournament entrant: display metadata plus a decider
///
/// Construction performs the metadata defaulting up front, so the rest of
/// the engine never probes for missing fields.
pub struct Entrant {
    team_name: String,
    strategy_name: String,
    description: String,
    decider: Box<dyn Decider>,
}

impl Entrant {
    /// Build an entrant, substituting a placeholder for any blank metadata
    pub fn new(
        team_name: impl Into<String>,
        strategy_name: impl Into<String>,
        description: impl Into<String>,
        decider: Box<dyn Decider>,
    ) -> Self {
        Self {
            team_name: default_if_blank(team_name.into()),
            strategy_name: default_if_blank(strategy_name.into()),
            description: default_if_blank(description.into()),
            decider,
        }
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke the decision function from this entrant's perspective
    pub fn decide(
        &self,
        my_history: &History,
        their_history: &History,
        my_score: i64,
        their_score: i64,
    ) -> Result<String, StrategyError> {
        self.decider
            .decide(my_history, their_history, my_score, their_score)
    }
}

impl fmt::Debug for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entrant")
            .field("team_name", &self.team_name)
            .field("strategy_name", &self.strategy_name)
            .finish_non_exhaustive()
    }
}

fn default_if_blank(value: String) -> String {
    if value.trim().is_empty() {
        MISSING_ASSIGNMENT.to_string()
    } else {
        value
    }
}
