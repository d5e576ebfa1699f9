//! Built-in strategies
//!
//! A roster of classic Iterated Prisoner's Dilemma strategies, each exposed
//! through the [`Decider`] capability interface. These double as the default
//! field for the CLI and as opponents for testing externally authored
//! strategies.

use std::cell::RefCell;

use crate::random::SeededRng;
use crate::strategy::{Decider, Entrant, History, Move, StrategyError};
use crate::{payoff, REWARD};

// Separate RNG stream for strategy-internal randomness, distinct from
// every per-match stream (match indices count up from zero).
const STRATEGY_STREAM: u32 = u32::MAX;

fn collude() -> Result<String, StrategyError> {
    Ok("c".to_string())
}

fn betray() -> Result<String, StrategyError> {
    Ok("b".to_string())
}

/// Never betrays
pub struct AlwaysCollude;

impl Decider for AlwaysCollude {
    fn decide(
        &self,
        _my: &History,
        _their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        collude()
    }
}

/// Never colludes
pub struct AlwaysBetray;

impl Decider for AlwaysBetray {
    fn decide(
        &self,
        _my: &History,
        _their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        betray()
    }
}

/// Copy the opponent's last move, starting with collude
///
/// A blank cell in the opponent's history (their invalid round) is not a
/// betrayal; it is answered with collude.
pub struct TitForTat;

impl Decider for TitForTat {
    fn decide(
        &self,
        _my: &History,
        their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        match their.last() {
            Some(Move::Betray) => betray(),
            _ => collude(),
        }
    }
}

/// Tit-for-tat, but open with betray
pub struct SuspiciousTitForTat;

impl Decider for SuspiciousTitForTat {
    fn decide(
        &self,
        _my: &History,
        their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        match their.last() {
            None => betray(),
            Some(Move::Betray) => betray(),
            Some(_) => collude(),
        }
    }
}

/// Only retaliate after two consecutive betrayals
pub struct TitForTwoTats;

impl Decider for TitForTwoTats {
    fn decide(
        &self,
        _my: &History,
        their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        let moves = their.moves();
        if moves.len() >= 2
            && moves[moves.len() - 1] == Move::Betray
            && moves[moves.len() - 2] == Move::Betray
        {
            betray()
        } else {
            collude()
        }
    }
}

/// Collude until betrayed once, then betray forever
pub struct GrimTrigger;

impl Decider for GrimTrigger {
    fn decide(
        &self,
        _my: &History,
        their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        if their.moves().iter().any(|mv| *mv == Move::Betray) {
            betray()
        } else {
            collude()
        }
    }
}

/// Win-stay, lose-switch
///
/// Repeats the previous move when it earned at least the mutual-collusion
/// reward, switches otherwise. An error round always reads as a loss.
pub struct Pavlov;

impl Decider for Pavlov {
    fn decide(
        &self,
        my: &History,
        their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        let (my_last, their_last) = match (my.last(), their.last()) {
            (Some(mine), Some(theirs)) => (mine, theirs),
            _ => return collude(),
        };

        let (earned, _) = payoff(my_last, their_last);
        if earned >= REWARD {
            match my_last {
                Move::Betray => betray(),
                _ => collude(),
            }
        } else {
            match my_last {
                Move::Collude => betray(),
                _ => collude(),
            }
        }
    }
}

/// Random choice with a configurable collusion bias
pub struct Random {
    collude_bias: u8,
    rng: RefCell<SeededRng>,
}

impl Random {
    /// `collude_bias` is the percentage chance to collude (0-100)
    pub fn new(rng: SeededRng, collude_bias: u8) -> Self {
        Self { collude_bias, rng: RefCell::new(rng) }
    }
}

impl Decider for Random {
    fn decide(
        &self,
        _my: &History,
        _their: &History,
        _my_score: i64,
        _their_score: i64,
    ) -> Result<String, StrategyError> {
        if self.rng.borrow_mut().next_percent() < self.collude_bias {
            collude()
        } else {
            betray()
        }
    }
}

/// Names accepted by [`by_name`], in roster order
pub fn builtin_names() -> &'static [&'static str] {
    &[
        "always-collude",
        "always-betray",
        "tit-for-tat",
        "suspicious-tit-for-tat",
        "tit-for-two-tats",
        "grim-trigger",
        "pavlov",
        "random",
    ]
}

/// Look up a built-in strategy and wrap it as a tournament entrant
///
/// The seed only matters for `random`, which draws from its own stream so
/// its choices never perturb the per-match round count draws.
pub fn by_name(name: &str, seed: &[u8; 32]) -> Option<Entrant> {
    let (decider, label, description): (Box<dyn Decider>, &str, &str) = match name {
        "always-collude" => (
            Box::new(AlwaysCollude),
            "Always Collude",
            "Never defects. Colludes every round no matter what.",
        ),
        "always-betray" => (
            Box::new(AlwaysBetray),
            "Always Betray",
            "Never cooperates. Betrays every round no matter what.",
        ),
        "tit-for-tat" => (
            Box::new(TitForTat),
            "Tit for Tat",
            "Copies the opponent's last move. Starts by colluding.",
        ),
        "suspicious-tit-for-tat" => (
            Box::new(SuspiciousTitForTat),
            "Suspicious Tit for Tat",
            "Like Tit for Tat, but opens with a betrayal.",
        ),
        "tit-for-two-tats" => (
            Box::new(TitForTwoTats),
            "Tit for Two Tats",
            "Only retaliates after two consecutive betrayals.",
        ),
        "grim-trigger" => (
            Box::new(GrimTrigger),
            "Grim Trigger",
            "Colludes until betrayed once, then betrays forever.",
        ),
        "pavlov" => (
            Box::new(Pavlov),
            "Pavlov",
            "Win-stay, lose-switch. Repeats its move after a good round.",
        ),
        "random" => (
            Box::new(Random::new(SeededRng::new(seed, STRATEGY_STREAM), 50)),
            "Random",
            "Colludes or betrays at random each round.",
        ),
        _ => return None,
    };

    Some(Entrant::new(name, label, description, decider))
}
