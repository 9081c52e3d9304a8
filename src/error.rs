use thiserror::Error;

pub const PLAYERS_ERROR_LABEL: &str = "Error loading players";
pub const STATS_ERROR_TEXT: &str = "Error loading player stats.";
pub const NO_DATA_TEXT: &str = "No data available for this player.";

/// Failure of one of the two fetch operations. Network errors, bad status codes
/// and malformed payloads all land here with the cause flattened into a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to load players: {0}")]
    LoadPlayersFailed(String),

    #[error("failed to load stats for {player}: {reason}")]
    LoadStatsFailed { player: String, reason: String },
}

impl FetchError {
    pub fn players(err: &anyhow::Error) -> Self {
        Self::LoadPlayersFailed(format!("{err:#}"))
    }

    pub fn stats(player: &str, err: &anyhow::Error) -> Self {
        Self::LoadStatsFailed {
            player: player.to_string(),
            reason: format!("{err:#}"),
        }
    }

    /// Fixed text shown in place of the control that failed.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LoadPlayersFailed(_) => PLAYERS_ERROR_LABEL,
            Self::LoadStatsFailed { .. } => STATS_ERROR_TEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("season {season}: PTS value {raw:?} is not a number")]
    InvalidPts { season: String, raw: String },
}
