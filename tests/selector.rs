use ppg_terminal::error::{FetchError, PLAYERS_ERROR_LABEL};
use ppg_terminal::state::{
    AppState, ChartView, Delta, PLACEHOLDER_LABEL, ProviderCommand, SelectorState, apply_delta,
};

fn loaded(players: &[&str]) -> AppState {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetPlayers(players.iter().map(|p| p.to_string()).collect()),
    );
    state
}

#[test]
fn players_list_yields_placeholder_then_names_in_order() {
    let state = loaded(&["A", "B"]);
    let options = state.selector_options();

    assert_eq!(options.len(), 3);
    assert_eq!(options[0].label, PLACEHOLDER_LABEL);
    assert_eq!(options[0].value, "");
    assert!(options[0].disabled);
    assert!(options[0].selected);

    assert_eq!((options[1].value.as_str(), options[1].label.as_str()), ("A", "A"));
    assert_eq!((options[2].value.as_str(), options[2].label.as_str()), ("B", "B"));
    assert!(options[1..].iter().all(|o| !o.disabled && !o.selected));
}

#[test]
fn players_failure_leaves_single_disabled_error_option() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::PlayersFailed(FetchError::LoadPlayersFailed("http 500".to_string())),
    );

    let options = state.selector_options();
    assert_eq!(options.len(), 1);
    assert!(options[0].disabled);
    assert_eq!(options[0].label, PLAYERS_ERROR_LABEL);
    assert_eq!(state.selector, SelectorState::Failed);
}

#[test]
fn failed_selector_is_inert() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::PlayersFailed(FetchError::LoadPlayersFailed("offline".to_string())),
    );

    state.select_next();
    assert_eq!(state.highlighted, 0);
    assert_eq!(state.commit_highlighted(), None);
    assert_eq!(state.on_selection_change("A"), None);
    assert_eq!(state.chart, ChartView::Idle);
}

#[test]
fn selector_contents_are_written_once() {
    let mut state = loaded(&["A", "B"]);
    apply_delta(&mut state, Delta::SetPlayers(vec!["C".to_string()]));
    apply_delta(
        &mut state,
        Delta::PlayersFailed(FetchError::LoadPlayersFailed("late".to_string())),
    );

    let labels: Vec<String> = state
        .selector_options()
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert_eq!(labels, vec![PLACEHOLDER_LABEL, "A", "B"]);
}

#[test]
fn committing_a_player_requests_stats_and_marks_it_selected() {
    let mut state = loaded(&["A", "B"]);
    state.select_next();
    state.select_next();

    let cmd = state.commit_highlighted();
    assert_eq!(
        cmd,
        Some(ProviderCommand::FetchStats {
            request_id: 1,
            player: "B".to_string(),
        })
    );
    assert_eq!(
        state.chart,
        ChartView::Loading {
            player: "B".to_string()
        }
    );

    let options = state.selector_options();
    assert!(!options[0].selected);
    assert!(options[2].selected);
}

#[test]
fn placeholder_commit_sends_nothing_and_keeps_chart() {
    let mut state = loaded(&["A"]);
    state.select_next();
    let cmd = state.commit_highlighted().expect("first commit fetches");
    let ProviderCommand::FetchStats { request_id, player } = cmd else {
        panic!("expected stats request");
    };
    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player,
            records: Vec::new(),
        },
    );
    let before = state.chart.clone();

    state.select_prev();
    assert_eq!(state.highlighted, 0);
    assert_eq!(state.commit_highlighted(), None);
    assert_eq!(state.on_selection_change(""), None);
    assert_eq!(state.chart, before);
    assert_eq!(state.stats_request, 1);
}

#[test]
fn recommitting_the_shown_player_sends_nothing() {
    let mut state = loaded(&["A", "B"]);
    state.select_next();
    let Some(ProviderCommand::FetchStats { request_id, player }) = state.commit_highlighted() else {
        panic!("expected stats request");
    };
    assert_eq!(state.commit_highlighted(), None);

    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player,
            records: Vec::new(),
        },
    );
    let before = state.chart.clone();
    assert_eq!(state.commit_highlighted(), None);
    assert_eq!(state.on_selection_change("A"), None);
    assert_eq!(state.chart, before);
    assert_eq!(state.stats_request, 1);
}

#[test]
fn recommitting_after_a_failed_load_retries() {
    let mut state = loaded(&["A"]);
    state.select_next();
    let Some(ProviderCommand::FetchStats { request_id, player }) = state.commit_highlighted() else {
        panic!("expected stats request");
    };
    apply_delta(
        &mut state,
        Delta::StatsFailed {
            request_id,
            player: player.clone(),
            error: FetchError::LoadStatsFailed {
                player,
                reason: "http 503".to_string(),
            },
        },
    );
    assert!(matches!(state.chart, ChartView::Error { .. }));

    assert_eq!(
        state.commit_highlighted(),
        Some(ProviderCommand::FetchStats {
            request_id: 2,
            player: "A".to_string(),
        })
    );
    assert!(matches!(state.chart, ChartView::Loading { .. }));
}

#[test]
fn highlight_stays_within_options() {
    let mut state = loaded(&["A", "B"]);
    for _ in 0..10 {
        state.select_next();
    }
    assert_eq!(state.highlighted, 2);
    for _ in 0..10 {
        state.select_prev();
    }
    assert_eq!(state.highlighted, 0);
}

#[test]
fn selector_is_empty_while_loading() {
    let mut state = AppState::new();
    assert!(state.selector_options().is_empty());
    assert_eq!(state.commit_highlighted(), None);
}
