//! Report assembly
//!
//! Renders a tournament result as the classic four-section text report:
//! line up, player-vs-player grid, leaderboard, and per-team game data.
//! The engine guarantees the matrices are fully populated before handoff;
//! nothing here mutates them.

use dilemma_engine::{Entrant, TournamentResult};

const WIDTH: usize = 80;
const DESCRIPTION_WIDTH: usize = 72;

/// The four report sections
///
/// Sections 0-2 go to the screen; the file additionally gets every team's
/// section 3.
pub struct Report {
    pub lineup: String,
    pub versus: String,
    pub leaderboard: String,
    pub game_data: Vec<String>,
}

impl Report {
    /// The on-screen portion: sections 0 through 2
    pub fn screen(&self) -> String {
        format!("{}{}{}", self.lineup, self.versus, self.leaderboard)
    }

    /// The full report, including each team's game data
    pub fn full_text(&self) -> String {
        let mut text = self.screen();
        for section in &self.game_data {
            text.push_str(section);
        }
        text
    }
}

pub fn assemble(entrants: &[Entrant], result: &TournamentResult) -> Report {
    Report {
        lineup: lineup(entrants),
        versus: versus(entrants, result),
        leaderboard: leaderboard(entrants, result),
        game_data: (0..entrants.len())
            .map(|index| game_data(entrants, result, index))
            .collect(),
    }
}

fn rule() -> String {
    format!("{}\n", "-".repeat(WIDTH))
}

/// Truncate to at most `max` characters for fixed-width columns
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Section 0 - Line up: one entry per player with the wrapped description
fn lineup(entrants: &[Entrant]) -> String {
    let mut section = rule();
    section.push_str("Section 0 - Line up\n");
    section.push_str(&rule());

    for (index, entrant) in entrants.iter().enumerate() {
        section.push_str(&format!(
            "Player {index} (P{index}): {}, {}\n",
            entrant.team_name(),
            entrant.strategy_name(),
        ));
        for line in entrant.description().lines() {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(DESCRIPTION_WIDTH) {
                section.push_str("        ");
                section.extend(chunk.iter());
                section.push('\n');
            }
        }
    }

    section
}

/// Section 1 - Player vs. Player: per-round averages, one column per player
fn versus(entrants: &[Entrant], result: &TournamentResult) -> String {
    let n = entrants.len();
    let mut section = rule();
    section.push_str("Section 1 - Player vs. Player\n");
    section.push_str(&rule());
    section.push_str("Each column shows pts/round earned against each other player:\n");

    section.push_str("        ");
    for i in 0..n {
        section.push_str(&format!("{:>7}", format!("P{i}")));
    }
    section.push('\n');

    for index in 0..n {
        section.push_str(&format!("vs. P{index} :"));
        for i in 0..n {
            section.push_str(&format!("{:>7}", result.scores[i][index] as i64));
        }
        section.push('\n');
    }

    section.push_str("TOTAL  :");
    for index in 0..n {
        let total: f64 = result.scores[index].iter().sum();
        section.push_str(&format!("{:>7}", total as i64));
    }
    section.push('\n');

    section
}

/// Section 2 - Leaderboard: teams ranked by mean per-round average
///
/// The ranking score is the sum of a player's row divided by the number of
/// entrants (self-play contributes its fixed zero).
fn leaderboard(entrants: &[Entrant], result: &TournamentResult) -> String {
    let n = entrants.len();
    let mut section = rule();
    section.push_str("Section 2 - Leaderboard\n");
    section.push_str(&rule());
    section.push_str("Average points per round:\n");
    section.push_str("Team name (P#):  Score      with strategy name\n");

    let mut standings: Vec<(usize, f64)> = (0..n)
        .map(|index| {
            let row_sum: f64 = result.scores[index].iter().sum();
            (index, row_sum / n as f64)
        })
        .collect();
    standings.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (index, points) in standings {
        section.push_str(&format!(
            "{:<10}(P{index}): {:>10} points with {:<40}\n",
            clip(entrants[index].team_name(), 10),
            points as i64,
            clip(entrants[index].strategy_name(), 40),
        ));
    }

    section
}

/// Section 3 - Game Data for one team: both directions of every pairing,
/// with the move histories in 80-column slabs
fn game_data(entrants: &[Entrant], result: &TournamentResult, index: usize) -> String {
    let mut section = rule();
    section.push_str(&format!(
        "Section 3 - Game Data for Team {}\n",
        entrants[index].team_name()
    ));
    section.push_str(&rule());

    for opponent in 0..entrants.len() {
        if opponent == index {
            continue;
        }

        section.push_str(&format!(
            "{:.2} pt/round: {}(P{index}) \"{}\"\n",
            result.scores[index][opponent],
            entrants[index].team_name(),
            entrants[index].strategy_name(),
        ));
        section.push_str(&format!(
            "{:.2} pt/round: {}(P{opponent}) \"{}\"\n",
            result.scores[opponent][index],
            entrants[opponent].team_name(),
            entrants[opponent].strategy_name(),
        ));

        let (mine, theirs) = capitalize(
            &result.moves[index][opponent].symbols(),
            &result.moves[opponent][index].symbols(),
        );
        let mine: Vec<char> = mine.chars().collect();
        let theirs: Vec<char> = theirs.chars().collect();
        for (chunk1, chunk2) in mine.chunks(WIDTH).zip(theirs.chunks(WIDTH)) {
            section.extend(chunk1.iter());
            section.push('\n');
            section.extend(chunk2.iter());
            section.push_str("\n\n");
        }
        section.push_str(&rule());
    }

    section
}

/// Uppercase each player's symbol in the rounds where the opponent colluded
///
/// Makes collusion-vs-betrayal patterns readable at a glance: a capital
/// letter means "my opponent colluded this round".
fn capitalize(history1: &str, history2: &str) -> (String, String) {
    let mut cap1 = String::with_capacity(history1.len());
    let mut cap2 = String::with_capacity(history2.len());

    for (p1, p2) in history1.chars().zip(history2.chars()) {
        let up2 = if p1 == 'c' { p2.to_ascii_uppercase() } else { p2 };
        let up1 = if p2 == 'c' { p1.to_ascii_uppercase() } else { p1 };
        cap1.push(up1);
        cap2.push(up2);
    }

    (cap1, cap2)
}
