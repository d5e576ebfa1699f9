//! Round-robin tournament scheduling

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::{run_match, RoundRange};
use crate::strategy::{Entrant, History};

/// Fully populated score and move matrices for one tournament
///
/// Both matrices are square over the entrant indices. `scores[i][j]` is
/// player i's average per-round score against player j (total match score
/// divided by that match's round count); `moves[i][j]` is i's complete
/// history against j. Diagonal entries are fixed at zero score and empty
/// history — self-play is never simulated. Nothing mutates the matrices
/// after the scheduler returns them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentResult {
    pub scores: Vec<Vec<f64>>,
    pub moves: Vec<Vec<History>>,
}

impl TournamentResult {
    pub fn player_count(&self) -> usize {
        self.scores.len()
    }
}

/// Play every unordered pair of entrants against each other exactly once
///
/// Each pair gets one match; its two directions populate the (i, j) and
/// (j, i) entries of both matrices. Match indices count up in visitation
/// order, so a run is reproducible from the seed alone. Fewer than two
/// entrants yields the trivial all-zero, all-empty matrices.
pub fn play_tournament(
    entrants: &[Entrant],
    seed: &[u8; 32],
    rounds: RoundRange,
) -> TournamentResult {
    let n = entrants.len();
    let mut scores = vec![vec![0.0f64; n]; n];
    let mut moves = vec![vec![History::new(); n]; n];

    info!("tournament: {n} entrants, rounds {}..={}", rounds.min, rounds.max);

    let mut match_index = 0u32;
    for i in 0..n {
        for j in 0..i {
            let result = run_match(&entrants[i], &entrants[j], seed, match_index, rounds);
            debug!(
                "match {match_index}: {} vs {} — {} rounds, {} / {}",
                entrants[i].team_name(),
                entrants[j].team_name(),
                result.round_count,
                result.score_a,
                result.score_b,
            );

            let played = result.round_count as f64;
            scores[i][j] = result.score_a as f64 / played;
            scores[j][i] = result.score_b as f64 / played;
            moves[i][j] = result.history_a;
            moves[j][i] = result.history_b;

            match_index += 1;
        }
        // Playing yourself doesn't do anything; the diagonal stays zero/empty.
    }

    TournamentResult { scores, moves }
}
