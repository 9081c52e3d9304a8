use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Padding, Paragraph, Wrap,
};

use crate::chart::PlayerChart;
use crate::state::{AppState, ChartView, SelectorState};

const SELECTOR_WIDTH: u16 = 32;
const CONSOLE_LINES: usize = 3;

pub fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(CONSOLE_LINES as u16 + 2),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);
    render_selector(frame, body[0], state);
    render_chart_pane(frame, body[1], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    if state.selected_value.is_empty() {
        "PPG TERMINAL".to_string()
    } else {
        format!("PPG TERMINAL | {}", state.selected_value)
    }
}

fn footer_text(state: &AppState) -> String {
    match state.selector {
        SelectorState::Ready { .. } => {
            "j/k/↑/↓ Move | Enter Select | ? Help | q Quit".to_string()
        }
        _ => "? Help | q Quit".to_string(),
    }
}

fn render_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Player").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.selector == SelectorState::Loading {
        let loading =
            Paragraph::new("Loading players...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }

    let options = state.selector_options();
    let (start, end) = visible_range(state.highlighted, options.len(), inner.height as usize);
    let inert = state.selector == SelectorState::Failed;

    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let option = &options[idx];
            let highlighted = !inert && idx == state.highlighted;
            let cursor = if highlighted { ">" } else { " " };
            let mark = if option.selected { "*" } else { " " };
            let mut style = Style::default();
            if option.disabled {
                style = style.fg(Color::DarkGray);
            }
            if inert {
                style = style.fg(Color::Red);
            }
            if highlighted {
                style = style.bg(Color::DarkGray).fg(Color::White);
            }
            Line::from(Span::styled(format!("{cursor}{mark} {}", option.label), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_chart_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    match &state.chart {
        ChartView::Chart(chart) => render_player_chart(frame, area, chart),
        _ => {
            let text = state.chart_text().unwrap_or_default();
            let style = match state.chart {
                ChartView::Error { .. } => Style::default().fg(Color::Red),
                _ => Style::default(),
            };
            let message = Paragraph::new(text)
                .style(style)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Chart").borders(Borders::ALL));
            frame.render_widget(message, area);
        }
    }
}

pub fn render_player_chart(frame: &mut Frame, area: Rect, chart: &PlayerChart) {
    let points = chart.trace.points();
    // Line and markers share one legend entry.
    let datasets = vec![
        Dataset::default()
            .name(chart.trace.name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .data(&points),
    ];

    let x_bounds = chart.x_bounds();
    let y_bounds = chart.y_bounds();
    let plot_width = area.width.saturating_sub(10) as usize;
    let x_labels = season_labels(&chart.trace.x, plot_width)
        .into_iter()
        .map(Span::from)
        .collect::<Vec<_>>();
    let y_labels = value_labels(y_bounds)
        .into_iter()
        .map(Span::from)
        .collect::<Vec<_>>();

    let block = Block::default()
        .title(Line::from(chart.layout.title.clone()).alignment(Alignment::Center))
        .borders(Borders::ALL)
        .padding(Padding::new(
            0,
            1,
            chart.layout.margin.top,
            chart.layout.margin.bottom,
        ));

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.layout.x_axis.title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(chart.layout.y_axis.title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );
    frame.render_widget(widget, area);
}

/// Picks season labels that line up with their points: the axis spreads labels
/// evenly, so the chosen indices must be evenly spaced too.
pub fn season_labels(seasons: &[String], width: usize) -> Vec<String> {
    match seasons.len() {
        0 => Vec::new(),
        1 => vec![String::new(), seasons[0].clone(), String::new()],
        n => {
            let widest = seasons.iter().map(|s| s.chars().count()).max().unwrap_or(1);
            let max_labels = (width / (widest + 1)).clamp(2, n);
            let k = (2..=max_labels)
                .rev()
                .find(|k| (n - 1) % (k - 1) == 0)
                .unwrap_or(2);
            (0..k)
                .map(|i| seasons[i * (n - 1) / (k - 1)].clone())
                .collect()
        }
    }
}

fn value_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format!("{v:.1}"))
        .collect()
}

pub fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(CONSOLE_LINES);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "PPG Terminal - Help",
        "",
        "  j/k or ↑/↓   Move in player list",
        "  Enter        Show chart for player",
        "  ?            Toggle help",
        "  q / Esc      Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
