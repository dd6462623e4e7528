//! Hand-rolled chart rendering as a pure draw-command pipeline.
//!
//! Both charts are deterministic functions of (labels, series, dimensions);
//! the host paints the returned commands onto a canvas whose backing store is
//! `scale` times the logical size. All coordinates here are logical pixels.

/// Logical canvas size plus the device-pixel-ratio scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    /// Backing-store multiplier (device pixel ratio)
    pub scale: f32,
}

/// A point in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One data series of the line chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub color: String,
    pub points: Vec<f64>,
}

/// Primitive paint operations the host canvas executes in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole backing store (physical pixels, hence scaled).
    Clear {
        width: f32,
        height: f32,
    },
    GridLine {
        from: Point,
        to: Point,
    },
    Polyline {
        points: Vec<Point>,
        color: String,
        width: f32,
    },
    Dot {
        center: Point,
        radius: f32,
        color: String,
    },
    Bar {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
        alpha: f32,
    },
    Label {
        text: String,
        position: Point,
    },
}

const LINE_PADDING: f32 = 40.0;
const BAR_PADDING: f32 = 20.0;
const GRID_ROWS: usize = 5;

fn clear(dims: Dimensions) -> DrawCommand {
    DrawCommand::Clear {
        width: dims.width * dims.scale,
        height: dims.height * dims.scale,
    }
}

/// Shared maximum across all series, defaulting to 1 so an all-zero chart
/// still divides cleanly.
fn series_max(series: &[Series]) -> f64 {
    let max = series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

/// Render the daily-activity line chart.
///
/// Every ⌈n/7⌉-th tick gets an axis label so long periods stay readable.
pub fn line_chart(labels: &[String], series: &[Series], dims: Dimensions) -> Vec<DrawCommand> {
    let mut commands = vec![clear(dims)];

    let chart_w = dims.width - LINE_PADDING * 2.0;
    let chart_h = dims.height - LINE_PADDING * 2.0;
    let max = series_max(series);
    let step_x = chart_w / (labels.len().saturating_sub(1).max(1) as f32);

    for i in 0..=GRID_ROWS {
        let y = LINE_PADDING + chart_h * (i as f32) / (GRID_ROWS as f32);
        commands.push(DrawCommand::GridLine {
            from: Point { x: LINE_PADDING, y },
            to: Point {
                x: LINE_PADDING + chart_w,
                y,
            },
        });
    }

    for s in series {
        let points: Vec<Point> = s
            .points
            .iter()
            .enumerate()
            .map(|(i, value)| Point {
                x: LINE_PADDING + (i as f32) * step_x,
                y: LINE_PADDING + chart_h - ((value / max) as f32) * chart_h,
            })
            .collect();

        commands.push(DrawCommand::Polyline {
            points: points.clone(),
            color: s.color.clone(),
            width: 2.0,
        });
        for point in points {
            commands.push(DrawCommand::Dot {
                center: point,
                radius: 3.0,
                color: s.color.clone(),
            });
        }
    }

    let stride = labels.len().div_ceil(7).max(1);
    for (i, label) in labels.iter().enumerate() {
        if i % stride == 0 {
            commands.push(DrawCommand::Label {
                text: label.clone(),
                position: Point {
                    x: LINE_PADDING + (i as f32) * step_x - 15.0,
                    y: dims.height - 10.0,
                },
            });
        }
    }

    commands
}

/// Render a bar chart over fixed buckets (hour-of-day activity).
pub fn bar_chart(values: &[f64], color: &str, dims: Dimensions) -> Vec<DrawCommand> {
    let mut commands = vec![clear(dims)];
    if values.is_empty() {
        return commands;
    }

    let chart_h = dims.height - BAR_PADDING * 2.0;
    let bar_w = (dims.width - BAR_PADDING * 2.0) / (values.len() as f32);
    let max = values.iter().copied().fold(0.0_f64, f64::max).max(1.0);

    for (i, value) in values.iter().enumerate() {
        let height = ((value / max) as f32) * chart_h;
        commands.push(DrawCommand::Bar {
            x: BAR_PADDING + (i as f32) * bar_w + bar_w * 0.1,
            y: dims.height - BAR_PADDING - height,
            width: bar_w * 0.8,
            height,
            color: color.to_string(),
            alpha: 0.8,
        });
    }

    commands
}

/// Fold sparse hourly records into the 24 fixed buckets of the bar chart.
///
/// Hours missing from the input render as zero; out-of-range hours are
/// dropped.
pub fn hourly_buckets(entries: &[crate::models::HourlyActivity]) -> [f64; 24] {
    let mut buckets = [0.0; 24];
    for entry in entries {
        if let Some(bucket) = buckets.get_mut(entry.hour as usize) {
            *bucket = entry.count as f64;
        }
    }
    buckets
}
