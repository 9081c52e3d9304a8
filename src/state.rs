use std::collections::VecDeque;

use chrono::Local;

use crate::chart::{self, PlayerChart};
use crate::error::{FetchError, NO_DATA_TEXT, PLAYERS_ERROR_LABEL, STATS_ERROR_TEXT};

pub const PLACEHOLDER_LABEL: &str = "Select a player";
const MAX_LOGS: usize = 200;

/// One season of a player's scoring line as served by `/api/player_stats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRecord {
    pub season: String,
    pub pts: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorState {
    Loading,
    Ready { players: Vec<String> },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Idle,
    Loading { player: String },
    Chart(PlayerChart),
    NoData { player: String },
    Error { player: String },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub selector: SelectorState,
    /// Cursor row in `selector_options()`.
    pub highlighted: usize,
    /// Committed value; empty while the placeholder is selected.
    pub selected_value: String,
    pub chart: ChartView,
    /// Id of the most recent stats request; older results are stale.
    pub stats_request: u64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selector: SelectorState::Loading,
            highlighted: 0,
            selected_value: String::new(),
            chart: ChartView::Idle,
            stats_request: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn selector_options(&self) -> Vec<SelectOption> {
        match &self.selector {
            SelectorState::Loading => Vec::new(),
            SelectorState::Failed => vec![SelectOption {
                value: String::new(),
                label: PLAYERS_ERROR_LABEL.to_string(),
                disabled: true,
                selected: false,
            }],
            SelectorState::Ready { players } => {
                let mut options = Vec::with_capacity(players.len() + 1);
                options.push(SelectOption {
                    value: String::new(),
                    label: PLACEHOLDER_LABEL.to_string(),
                    disabled: true,
                    selected: self.selected_value.is_empty(),
                });
                options.extend(players.iter().map(|name| SelectOption {
                    value: name.clone(),
                    label: name.clone(),
                    disabled: false,
                    selected: *name == self.selected_value,
                }));
                options
            }
        }
    }

    fn option_count(&self) -> usize {
        match &self.selector {
            SelectorState::Ready { players } => players.len() + 1,
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1).min(count - 1);
    }

    pub fn select_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Commits the highlighted option, as if it had been picked in the selector.
    pub fn commit_highlighted(&mut self) -> Option<ProviderCommand> {
        let value = match &self.selector {
            SelectorState::Ready { players } if self.highlighted > 0 => {
                players.get(self.highlighted - 1)?.clone()
            }
            SelectorState::Ready { .. } => String::new(),
            _ => return None,
        };
        self.on_selection_change(&value)
    }

    /// Reacts to a selector value change. An empty value (the placeholder) is a
    /// no-op, and so is re-picking the current player unless its last load
    /// failed. Anything else starts a new stats request and supersedes the last one.
    pub fn on_selection_change(&mut self, value: &str) -> Option<ProviderCommand> {
        if value.is_empty() {
            return None;
        }
        if !matches!(self.selector, SelectorState::Ready { .. }) {
            return None;
        }
        if value == self.selected_value && !matches!(self.chart, ChartView::Error { .. }) {
            return None;
        }

        self.selected_value = value.to_string();
        self.stats_request += 1;
        self.chart = ChartView::Loading {
            player: value.to_string(),
        };
        Some(ProviderCommand::FetchStats {
            request_id: self.stats_request,
            player: value.to_string(),
        })
    }

    /// Plain text shown in the chart pane instead of a chart, if any.
    pub fn chart_text(&self) -> Option<String> {
        match &self.chart {
            ChartView::Idle => None,
            ChartView::Chart(_) => None,
            ChartView::Loading { player } => Some(format!("Loading {player}...")),
            ChartView::NoData { .. } => Some(NO_DATA_TEXT.to_string()),
            ChartView::Error { .. } => Some(STATS_ERROR_TEXT.to_string()),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let line = format!("{} {}", Local::now().format("%H:%M:%S"), msg.into());
        self.logs.push_back(line);
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers(Vec<String>),
    PlayersFailed(FetchError),
    SetStats {
        request_id: u64,
        player: String,
        records: Vec<SeasonRecord>,
    },
    StatsFailed {
        request_id: u64,
        player: String,
        error: FetchError,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchPlayers,
    FetchStats { request_id: u64, player: String },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers(players) => {
            if state.selector != SelectorState::Loading {
                state.push_log("[WARN] Ignoring repeated player list");
                return;
            }
            state.push_log(format!("[INFO] Loaded {} players", players.len()));
            state.selector = SelectorState::Ready { players };
            state.highlighted = 0;
            state.selected_value.clear();
        }
        Delta::PlayersFailed(error) => {
            if state.selector != SelectorState::Loading {
                state.push_log("[WARN] Ignoring late player list failure");
                return;
            }
            state.push_log(format!("[WARN] {error}"));
            state.selector = SelectorState::Failed;
            state.highlighted = 0;
        }
        Delta::SetStats {
            request_id,
            player,
            records,
        } => {
            if request_id != state.stats_request {
                state.push_log(format!("[INFO] Dropped stale stats for {player}"));
                return;
            }
            state.chart = match chart::build_player_chart(&player, &records) {
                Ok(Some(chart)) => ChartView::Chart(chart),
                Ok(None) => ChartView::NoData { player },
                Err(err) => {
                    state.push_log(format!("[WARN] Stats for {player}: {err}"));
                    ChartView::Error { player }
                }
            };
        }
        Delta::StatsFailed {
            request_id,
            player,
            error,
        } => {
            if request_id != state.stats_request {
                state.push_log(format!("[INFO] Dropped stale failure for {player}"));
                return;
            }
            state.push_log(format!("[WARN] {error}"));
            state.chart = ChartView::Error { player };
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
