use ppg_terminal::chart::{LineShape, RangeMode, TraceMode};
use ppg_terminal::error::{FetchError, NO_DATA_TEXT, STATS_ERROR_TEXT};
use ppg_terminal::state::{AppState, ChartView, Delta, ProviderCommand, SeasonRecord, apply_delta};

fn record(season: &str, pts: &str) -> SeasonRecord {
    SeasonRecord {
        season: season.to_string(),
        pts: pts.to_string(),
    }
}

fn state_with_request(player: &str) -> (AppState, u64) {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetPlayers(vec![player.to_string()]));
    match state.on_selection_change(player) {
        Some(ProviderCommand::FetchStats { request_id, .. }) => (state, request_id),
        other => panic!("expected stats request, got {other:?}"),
    }
}

#[test]
fn season_records_become_parallel_series() {
    let (mut state, request_id) = state_with_request("Jane Doe");
    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player: "Jane Doe".to_string(),
            records: vec![record("2019-20", "25.3"), record("2020-21", "27.1")],
        },
    );

    let ChartView::Chart(chart) = &state.chart else {
        panic!("expected chart, got {:?}", state.chart);
    };
    assert_eq!(chart.trace.x, vec!["2019-20", "2020-21"]);
    assert_eq!(chart.trace.y, vec![25.3, 27.1]);
    assert_eq!(chart.trace.mode, TraceMode::LinesMarkers);
    assert_eq!(chart.trace.line_shape, LineShape::Linear);
    assert_eq!(chart.layout.title, "Points Per Game for Jane Doe");
    assert_eq!(chart.layout.x_axis.title, "Season");
    assert_eq!(chart.layout.y_axis.title, "Points Per Game");
    assert_eq!(chart.layout.y_axis.range_mode, RangeMode::ToZero);
    assert!(chart.layout.responsive);
    assert_eq!(chart.y_bounds()[0], 0.0);
    assert_eq!(state.chart_text(), None);
}

#[test]
fn empty_stats_show_no_data_text() {
    let (mut state, request_id) = state_with_request("Jane Doe");
    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player: "Jane Doe".to_string(),
            records: Vec::new(),
        },
    );

    assert!(matches!(state.chart, ChartView::NoData { .. }));
    assert_eq!(state.chart_text().as_deref(), Some(NO_DATA_TEXT));
}

#[test]
fn failed_stats_show_error_text() {
    let (mut state, request_id) = state_with_request("Jane Doe");
    apply_delta(
        &mut state,
        Delta::StatsFailed {
            request_id,
            player: "Jane Doe".to_string(),
            error: FetchError::LoadStatsFailed {
                player: "Jane Doe".to_string(),
                reason: "request failed".to_string(),
            },
        },
    );

    assert_eq!(
        state.chart,
        ChartView::Error {
            player: "Jane Doe".to_string()
        }
    );
    assert_eq!(state.chart_text().as_deref(), Some(STATS_ERROR_TEXT));
    assert!(state.logs.iter().any(|l| l.contains("request failed")));
}

#[test]
fn non_numeric_pts_is_an_error_not_a_default() {
    let (mut state, request_id) = state_with_request("Jane Doe");
    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player: "Jane Doe".to_string(),
            records: vec![record("2019-20", "25.3"), record("2020-21", "DNP")],
        },
    );

    assert_eq!(state.chart_text().as_deref(), Some(STATS_ERROR_TEXT));
    assert!(state.logs.iter().any(|l| l.contains("DNP")));
}

#[test]
fn stale_results_are_dropped() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec!["A".to_string(), "B".to_string()]),
    );
    let first = state.on_selection_change("A").expect("request for A");
    let second = state.on_selection_change("B").expect("request for B");
    let (ProviderCommand::FetchStats { request_id: a_id, .. }, ProviderCommand::FetchStats { request_id: b_id, .. }) =
        (first, second)
    else {
        panic!("expected stats requests");
    };
    assert!(b_id > a_id);

    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id: b_id,
            player: "B".to_string(),
            records: vec![record("2020-21", "11.0")],
        },
    );
    let shown = state.chart.clone();

    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id: a_id,
            player: "A".to_string(),
            records: vec![record("2020-21", "30.0")],
        },
    );
    apply_delta(
        &mut state,
        Delta::StatsFailed {
            request_id: a_id,
            player: "A".to_string(),
            error: FetchError::LoadStatsFailed {
                player: "A".to_string(),
                reason: "timeout".to_string(),
            },
        },
    );

    assert_eq!(state.chart, shown);
    assert!(state.logs.iter().any(|l| l.contains("Dropped stale stats for A")));
}

#[test]
fn each_result_replaces_the_previous_chart() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec!["A".to_string(), "B".to_string()]),
    );
    let Some(ProviderCommand::FetchStats { request_id: first, .. }) =
        state.on_selection_change("A")
    else {
        panic!("expected stats request");
    };
    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id: first,
            player: "A".to_string(),
            records: vec![record("2019-20", "10.0")],
        },
    );
    let Some(ProviderCommand::FetchStats { request_id, .. }) = state.on_selection_change("B") else {
        panic!("expected stats request");
    };
    assert!(matches!(state.chart, ChartView::Loading { .. }));

    apply_delta(
        &mut state,
        Delta::SetStats {
            request_id,
            player: "B".to_string(),
            records: vec![record("2019-20", "10.0"), record("2020-21", "12.5")],
        },
    );
    let ChartView::Chart(chart) = &state.chart else {
        panic!("expected chart");
    };
    assert_eq!(chart.layout.title, "Points Per Game for B");
    assert_eq!(chart.trace.y, vec![10.0, 12.5]);
}
