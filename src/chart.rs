use crate::error::ChartError;
use crate::state::SeasonRecord;

pub const SERIES_NAME: &str = "PTS per Season";
pub const X_AXIS_TITLE: &str = "Season";
pub const Y_AXIS_TITLE: &str = "Points Per Game";

const AXIS_PAD: f64 = 0.05;

/// How the series is drawn. The renderer draws a connecting line plus a
/// marker at every season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    LinesMarkers,
}

/// Straight segments between consecutive seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    Normal,
    ToZero,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: TraceMode,
    pub line_shape: LineShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSpec {
    pub title: String,
    pub range_mode: RangeMode,
}

/// Rows kept free above and below the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u16,
    pub bottom: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub margin: Margin,
    /// Follow the pane size on every frame.
    pub responsive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerChart {
    pub trace: Trace,
    pub layout: ChartLayout,
}

pub fn chart_title(player: &str) -> String {
    format!("Points Per Game for {player}")
}

/// Strict float parse for a PTS cell. Blank, non-numeric and non-finite values are errors.
pub fn parse_pts(season: &str, raw: &str) -> Result<f64, ChartError> {
    let invalid = || ChartError::InvalidPts {
        season: season.to_string(),
        raw: raw.to_string(),
    };
    let value = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

/// Turns season records into a line-and-marker chart. `Ok(None)` means there is
/// nothing to draw.
pub fn build_player_chart(
    player: &str,
    records: &[SeasonRecord],
) -> Result<Option<PlayerChart>, ChartError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut x = Vec::with_capacity(records.len());
    let mut y = Vec::with_capacity(records.len());
    for record in records {
        y.push(parse_pts(&record.season, &record.pts)?);
        x.push(record.season.clone());
    }

    Ok(Some(PlayerChart {
        trace: Trace {
            name: SERIES_NAME.to_string(),
            x,
            y,
            mode: TraceMode::LinesMarkers,
            line_shape: LineShape::Linear,
        },
        layout: ChartLayout {
            title: chart_title(player),
            x_axis: AxisSpec {
                title: X_AXIS_TITLE.to_string(),
                range_mode: RangeMode::Normal,
            },
            y_axis: AxisSpec {
                title: Y_AXIS_TITLE.to_string(),
                range_mode: RangeMode::ToZero,
            },
            margin: Margin { top: 1, bottom: 1 },
            responsive: true,
        },
    }))
}

impl Trace {
    /// Markers sit at x = season index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.y
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx as f64, *value))
            .collect()
    }
}

impl PlayerChart {
    pub fn x_bounds(&self) -> [f64; 2] {
        match self.trace.y.len() {
            0 | 1 => [-1.0, 1.0],
            n => [0.0, (n - 1) as f64],
        }
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        axis_range(&self.trace.y, self.layout.y_axis.range_mode)
    }
}

fn axis_range(values: &[f64], mode: RangeMode) -> [f64; 2] {
    let Some(first) = values.first() else {
        return [0.0, 1.0];
    };
    let (mut lo, mut hi) = values
        .iter()
        .fold((*first, *first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if mode == RangeMode::ToZero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        return match mode {
            RangeMode::ToZero => [lo, lo + 1.0],
            RangeMode::Normal => [lo - 0.5, hi + 0.5],
        };
    }

    let pad = (hi - lo) * AXIS_PAD;
    match mode {
        // Zero stays pinned to the edge it touches.
        RangeMode::ToZero => [
            if lo < 0.0 { lo - pad } else { lo },
            if hi > 0.0 { hi + pad } else { hi },
        ],
        RangeMode::Normal => [lo - pad, hi + pad],
    }
}
