use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use ppg_terminal::http_client::http_client;
use ppg_terminal::player_index::{self, RetryPolicy};

fn main() -> Result<()> {
    let out = parse_out_arg().unwrap_or_else(|| PathBuf::from(player_index::DEFAULT_OUTPUT));

    let client = http_client(Duration::from_secs(30))?;
    let players = player_index::fetch_active_players(client, RetryPolicy::default())
        .context("scrape active players")?;
    player_index::write_index(&out, &players)?;

    println!("Active player index written");
    println!("File: {}", out.display());
    println!("Players: {}", players.len());
    Ok(())
}

fn parse_out_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--out=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--out" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
