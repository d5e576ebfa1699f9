//! Tournament front end
//!
//! Assembles a roster of built-in strategies, runs the round-robin
//! tournament, prints the summary sections to the screen, and writes the
//! complete report (including per-team game data) to a text file.

mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dilemma_engine::{builtin_names, by_name, play_tournament, Entrant, RoundRange};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "dilemma", about = "Round-robin Iterated Prisoner's Dilemma tournament")]
struct Args {
    /// Tournament seed; the same seed reproduces the same run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Minimum rounds per match (inclusive)
    #[arg(long, default_value_t = 100)]
    min_rounds: u32,

    /// Maximum rounds per match (inclusive)
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Built-in strategies to enter, comma separated; defaults to the full
    /// roster
    #[arg(long, value_delimiter = ',')]
    roster: Vec<String>,

    /// Where to write the full report
    #[arg(long, default_value = "tournament.txt")]
    output: PathBuf,

    /// Also dump the raw score/move matrices as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

/// Spread a u64 seed across the engine's 32-byte seed format
fn expand_seed(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for chunk in bytes.chunks_mut(8) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }
    bytes
}

fn build_roster(names: &[String], seed: &[u8; 32]) -> Result<Vec<Entrant>> {
    let names: Vec<String> = if names.is_empty() {
        builtin_names().iter().map(|name| name.to_string()).collect()
    } else {
        names.to_vec()
    };

    names
        .iter()
        .map(|name| {
            by_name(name, seed).with_context(|| {
                format!(
                    "unknown strategy {name:?} (available: {})",
                    builtin_names().join(", ")
                )
            })
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.min_rounds == 0 || args.max_rounds < args.min_rounds {
        bail!(
            "invalid round range {}..={}",
            args.min_rounds,
            args.max_rounds
        );
    }

    let seed = expand_seed(args.seed);
    let entrants = build_roster(&args.roster, &seed)?;
    let rounds = RoundRange { min: args.min_rounds, max: args.max_rounds };

    info!(
        "seed {}: {} entrants, writing report to {}",
        args.seed,
        entrants.len(),
        args.output.display()
    );

    let result = play_tournament(&entrants, &seed, rounds);
    let report = report::assemble(&entrants, &result);

    print!("{}", report.screen());

    fs::write(&args.output, report.full_text())
        .with_context(|| format!("failed to write report to {}", args.output.display()))?;

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&result).context("serializing result")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_seed_repeats_le_bytes() {
        let bytes = expand_seed(0x0102030405060708);
        assert_eq!(&bytes[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&bytes[..8], &bytes[8..16]);
        assert_eq!(expand_seed(0), [0u8; 32]);
    }

    #[test]
    fn test_default_roster_is_full() {
        let seed = expand_seed(42);
        let entrants = build_roster(&[], &seed).unwrap();
        assert_eq!(entrants.len(), builtin_names().len());
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let seed = expand_seed(42);
        let err = build_roster(&["no-such-team".to_string()], &seed).unwrap_err();
        assert!(err.to_string().contains("no-such-team"));
    }

    #[test]
    fn test_explicit_roster_order_preserved() {
        let seed = expand_seed(42);
        let names = vec!["always-betray".to_string(), "tit-for-tat".to_string()];
        let entrants = build_roster(&names, &seed).unwrap();
        assert_eq!(entrants[0].team_name(), "always-betray");
        assert_eq!(entrants[1].team_name(), "tit-for-tat");
    }
}
