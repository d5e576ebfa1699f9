//! Round-robin Iterated Prisoner's Dilemma tournament engine
//!
//! Plays every unordered pair of entrants against each other for a
//! randomized number of rounds and collects per-pairing average scores
//! and full move histories. Report rendering and file output live in the
//! front-end crate; this crate only produces the matrices.

mod builtin;
mod game;
mod random;
mod strategy;
mod tournament;

pub use builtin::{
    builtin_names, by_name, AlwaysBetray, AlwaysCollude, GrimTrigger, Pavlov, Random,
    SuspiciousTitForTat, TitForTat, TitForTwoTats,
};
pub use game::{play_round, run_match, sanitize, MatchResult, RoundOutcome, RoundRange};
pub use random::SeededRng;
pub use strategy::{Decider, Entrant, History, Move, StrategyError, MISSING_ASSIGNMENT};
pub use tournament::{play_tournament, TournamentResult};

/// R: both players collude
pub const REWARD: i64 = 0;
/// T: you betray a colluding partner
pub const TEMPTATION: i64 = 100;
/// S ("sucker"): your partner betrays you while you collude
pub const SEVERE: i64 = -500;
/// P: both players betray
pub const PUNISHMENT: i64 = -250;
/// Both sides when either decision was invalid
pub const ERROR: i64 = -250;

// Keep T > R > P > S to be a Prisoner's Dilemma,
// and 2R > T + S to be an Iterated Prisoner's Dilemma.
const _: () = assert!(TEMPTATION > REWARD && REWARD > PUNISHMENT && PUNISHMENT > SEVERE);
const _: () = assert!(2 * REWARD > TEMPTATION + SEVERE);

/// Payoff matrix for one round
///
/// Returns (delta_a, delta_b). Any combination involving an invalid move
/// penalizes both sides with the error score.
pub fn payoff(a: Move, b: Move) -> (i64, i64) {
    match (a, b) {
        (Move::Collude, Move::Collude) => (REWARD, REWARD),
        (Move::Collude, Move::Betray) => (SEVERE, TEMPTATION),
        (Move::Betray, Move::Collude) => (TEMPTATION, SEVERE),
        (Move::Betray, Move::Betray) => (PUNISHMENT, PUNISHMENT),
        _ => (ERROR, ERROR),
    }
}
