//! Round simulation and match execution

use log::warn;
use serde::{Deserialize, Serialize};

use crate::payoff;
use crate::random::SeededRng;
use crate::strategy::{Entrant, History, Move, StrategyError};

/// Inclusive bounds for the per-match round count draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRange {
    pub min: u32,
    pub max: u32,
}

impl RoundRange {
    /// The standard 100-200 round match
    pub fn standard() -> Self {
        Self { min: 100, max: 200 }
    }

    /// A fixed round count, mainly for deterministic tests
    pub fn fixed(rounds: u32) -> Self {
        Self { min: rounds, max: rounds }
    }
}

impl Default for RoundRange {
    fn default() -> Self {
        Self::standard()
    }
}

/// One simultaneous decision exchange and the score deltas it produced
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub move_a: Move,
    pub move_b: Move,
    pub delta_a: i64,
    pub delta_b: i64,
}

/// Result of a complete match between two entrants
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: i64,
    pub score_b: i64,
    pub history_a: History,
    pub history_b: History,
    pub round_count: u32,
}

/// Sanitize a raw decision into a move
///
/// Exactly `"c"` or `"b"` is accepted; any other value, and any decision
/// failure, becomes `Move::Invalid`. Recovery is local to the round — no
/// error leaves this boundary.
pub fn sanitize(raw: Result<String, StrategyError>, who: &str) -> Move {
    match raw {
        Ok(symbol) => {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some('c'), None) => Move::Collude,
                (Some('b'), None) => Move::Betray,
                _ => {
                    warn!("{who}: malformed decision {symbol:?}, scoring as invalid");
                    Move::Invalid
                }
            }
        }
        Err(err) => {
            warn!("{who}: decision failed ({err}), scoring as invalid");
            Move::Invalid
        }
    }
}

/// Apply the payoff table to two (possibly invalid) moves
pub fn play_round(move_a: Move, move_b: Move) -> RoundOutcome {
    let (delta_a, delta_b) = payoff(move_a, move_b);
    RoundOutcome { move_a, move_b, delta_a, delta_b }
}

/// Run a complete match between two entrants
///
/// The round count is drawn once from `rounds`, so both sides play the
/// identical number of rounds. Each decision function sees its own history
/// first, then the opponent's, then both cumulative scores; decisions are
/// taken simultaneously against the history before this round.
pub fn run_match(
    a: &Entrant,
    b: &Entrant,
    seed: &[u8; 32],
    match_index: u32,
    rounds: RoundRange,
) -> MatchResult {
    let mut rng = SeededRng::new(seed, match_index);
    let round_count = rng.next_in(rounds.min, rounds.max);

    let mut history_a = History::with_capacity(round_count as usize);
    let mut history_b = History::with_capacity(round_count as usize);
    let mut score_a = 0i64;
    let mut score_b = 0i64;

    for _ in 0..round_count {
        let move_a = sanitize(
            a.decide(&history_a, &history_b, score_a, score_b),
            a.team_name(),
        );
        let move_b = sanitize(
            b.decide(&history_b, &history_a, score_b, score_a),
            b.team_name(),
        );

        let outcome = play_round(move_a, move_b);
        score_a += outcome.delta_a;
        score_b += outcome.delta_b;

        // A valid move is recorded verbatim even when the opponent's was
        // invalid; only the offending side gets the blank cell.
        history_a.push(outcome.move_a);
        history_b.push(outcome.move_b);
    }

    MatchResult { score_a, score_b, history_a, history_b, round_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{AlwaysBetray, AlwaysCollude, TitForTat};
    use crate::strategy::Decider;
    use crate::{ERROR, PUNISHMENT, SEVERE, TEMPTATION};
    use proptest::prelude::*;

    struct Verbatim(&'static str);

    impl Decider for Verbatim {
        fn decide(
            &self,
            _my: &History,
            _their: &History,
            _my_score: i64,
            _their_score: i64,
        ) -> Result<String, StrategyError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl Decider for Failing {
        fn decide(
            &self,
            _my: &History,
            _their: &History,
            _my_score: i64,
            _their_score: i64,
        ) -> Result<String, StrategyError> {
            Err(StrategyError::Decision("no value produced".into()))
        }
    }

    fn entrant(team: &str, decider: Box<dyn Decider>) -> Entrant {
        Entrant::new(team, "test strategy", "test description", decider)
    }

    #[test]
    fn test_sanitize_valid_symbols() {
        assert_eq!(sanitize(Ok("c".into()), "t"), Move::Collude);
        assert_eq!(sanitize(Ok("b".into()), "t"), Move::Betray);
    }

    #[test]
    fn test_sanitize_malformed() {
        assert_eq!(sanitize(Ok("cc".into()), "t"), Move::Invalid);
        assert_eq!(sanitize(Ok("".into()), "t"), Move::Invalid);
        assert_eq!(sanitize(Ok("x".into()), "t"), Move::Invalid);
        assert_eq!(sanitize(Ok("C".into()), "t"), Move::Invalid);
        assert_eq!(sanitize(Ok(" b".into()), "t"), Move::Invalid);
    }

    #[test]
    fn test_sanitize_failure_is_invalid() {
        let raw = Err(StrategyError::Decision("boom".into()));
        assert_eq!(sanitize(raw, "t"), Move::Invalid);
    }

    #[test]
    fn test_play_round_deltas() {
        let outcome = play_round(Move::Collude, Move::Betray);
        assert_eq!(outcome.delta_a, SEVERE);
        assert_eq!(outcome.delta_b, TEMPTATION);

        let outcome = play_round(Move::Invalid, Move::Collude);
        assert_eq!((outcome.delta_a, outcome.delta_b), (ERROR, ERROR));
    }

    #[test]
    fn test_collude_vs_betray_150_rounds() {
        let a = entrant("loyal", Box::new(AlwaysCollude));
        let b = entrant("backstab", Box::new(AlwaysBetray));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(150));

        assert_eq!(result.round_count, 150);
        assert_eq!(result.score_a, 150 * SEVERE);
        assert_eq!(result.score_b, 150 * TEMPTATION);
        assert_eq!(result.history_a.symbols(), "c".repeat(150));
        assert_eq!(result.history_b.symbols(), "b".repeat(150));
    }

    #[test]
    fn test_mutual_collusion_scores_zero() {
        let a = entrant("a", Box::new(AlwaysCollude));
        let b = entrant("b", Box::new(AlwaysCollude));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(100));

        assert_eq!(result.score_a, 0);
        assert_eq!(result.score_b, 0);
    }

    #[test]
    fn test_mutual_betrayal() {
        let a = entrant("a", Box::new(AlwaysBetray));
        let b = entrant("b", Box::new(AlwaysBetray));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(120));

        assert_eq!(result.score_a, 120 * PUNISHMENT);
        assert_eq!(result.score_b, 120 * PUNISHMENT);
    }

    #[test]
    fn test_malformed_decision_round() {
        // One side always returns the two-character "cc": every round is an
        // error round for both sides, but the colluder's own history still
        // records its valid move.
        let a = entrant("mangled", Box::new(Verbatim("cc")));
        let b = entrant("loyal", Box::new(AlwaysCollude));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(10));

        assert_eq!(result.score_a, 10 * ERROR);
        assert_eq!(result.score_b, 10 * ERROR);
        assert_eq!(result.history_a.symbols(), " ".repeat(10));
        assert_eq!(result.history_b.symbols(), "c".repeat(10));
    }

    #[test]
    fn test_failing_decider_is_contained() {
        let a = entrant("broken", Box::new(Failing));
        let b = entrant("loyal", Box::new(AlwaysCollude));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(5));

        assert_eq!(result.score_a, 5 * ERROR);
        assert_eq!(result.score_b, 5 * ERROR);
        assert_eq!(result.history_a.symbols(), "     ");
    }

    #[test]
    fn test_invalid_never_reaches_opponent_as_valid() {
        // Tit-for-tat facing a malformed opponent must never read the blank
        // cell as a betrayal-by-symbol; it sees Invalid and stays colluding.
        let a = entrant("tft", Box::new(TitForTat));
        let b = entrant("mangled", Box::new(Verbatim("??")));

        let result = run_match(&a, &b, &[42u8; 32], 0, RoundRange::fixed(20));

        assert_eq!(result.history_a.symbols(), "c".repeat(20));
        assert_eq!(result.history_b.symbols(), " ".repeat(20));
    }

    #[test]
    fn test_match_determinism() {
        let a = entrant("a", Box::new(TitForTat));
        let b = entrant("b", Box::new(AlwaysBetray));
        let seed = [7u8; 32];

        let r1 = run_match(&a, &b, &seed, 3, RoundRange::standard());
        let r2 = run_match(&a, &b, &seed, 3, RoundRange::standard());

        assert_eq!(r1.round_count, r2.round_count);
        assert_eq!(r1.score_a, r2.score_a);
        assert_eq!(r1.history_a, r2.history_a);
        assert_eq!(r1.history_b, r2.history_b);
    }

    proptest! {
        /// Round count is always in [100, 200] and both histories are
        /// exactly that long
        #[test]
        fn round_count_in_standard_range(seed in any::<[u8; 32]>(), idx in any::<u32>()) {
            let a = entrant("a", Box::new(AlwaysCollude));
            let b = entrant("b", Box::new(AlwaysBetray));

            let result = run_match(&a, &b, &seed, idx, RoundRange::standard());

            prop_assert!((100..=200).contains(&result.round_count));
            prop_assert_eq!(result.history_a.len(), result.round_count as usize);
            prop_assert_eq!(result.history_b.len(), result.round_count as usize);
        }
    }
}
