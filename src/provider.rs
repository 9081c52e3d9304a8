use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::api::StatsSource;
use crate::error::FetchError;
use crate::state::{Delta, ProviderCommand};

/// Runs fetches off the UI thread. Commands are served in arrival order; the
/// thread exits once every command sender is dropped or the UI stops listening.
pub fn spawn_provider<S>(
    source: S,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()>
where
    S: StatsSource + Send + 'static,
{
    thread::spawn(move || {
        for cmd in cmd_rx {
            for delta in handle_command(&source, cmd) {
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    })
}

pub fn handle_command(source: &impl StatsSource, cmd: ProviderCommand) -> Vec<Delta> {
    match cmd {
        ProviderCommand::FetchPlayers => match source.fetch_players() {
            Ok(players) => vec![Delta::SetPlayers(players)],
            Err(err) => vec![Delta::PlayersFailed(FetchError::players(&err))],
        },
        ProviderCommand::FetchStats { request_id, player } => {
            match source.fetch_player_stats(&player) {
                Ok(records) => vec![
                    Delta::Log(format!(
                        "[INFO] {} season rows for {player}",
                        records.len()
                    )),
                    Delta::SetStats {
                        request_id,
                        player,
                        records,
                    },
                ],
                Err(err) => {
                    let error = FetchError::stats(&player, &err);
                    vec![Delta::StatsFailed {
                        request_id,
                        player,
                        error,
                    }]
                }
            }
        }
    }
}
