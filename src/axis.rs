use crate::{
    core::{PlotArea, Vec2},
    format::format_clock,
    scale::{LinearScale, Scales},
};

pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    pub value: f64,
    pub offset: f64, // pixel along the axis
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Caption {
    pub text: String,
    pub at: Vec2,
    pub rotate_deg: f64,
    /// Applied after the rotation, in the rotated frame.
    pub offset: Vec2,
    pub dy: Option<&'static str>,
    pub anchor: &'static str,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Axis {
    pub orient: Orient,
    pub translate: Vec2,
    pub extent: (f64, f64), // pixel span of the domain line
    pub ticks: Vec<Tick>,
    pub caption: Caption,
}

impl Axis {
    pub fn class(&self) -> &'static str {
        match self.orient {
            Orient::Bottom => "graph__axis graph__axis--x",
            Orient::Left => "graph__axis graph__axis--y",
        }
    }
}

/// Elapsed-time axis along the bottom edge, labeled `MM:SS`.
pub fn x_axis(scales: &Scales, area: PlotArea, count: usize, margin_bottom: f64) -> Axis {
    let ticks = collect_ticks(&scales.x, scales.x.time_ticks(count), format_clock);
    Axis {
        orient: Orient::Bottom,
        translate: Vec2::new(0.0, area.height),
        extent: scales.x.range,
        ticks,
        caption: Caption {
            text: "Time behind #1".to_string(),
            at: Vec2::new(area.width, -margin_bottom),
            rotate_deg: 0.0,
            offset: Vec2::ZERO,
            dy: Some("0.875em"),
            anchor: "end",
        },
    }
}

/// Place axis along the left edge.
pub fn y_axis(scales: &Scales, count: usize) -> Axis {
    let ticks = collect_ticks(&scales.y, scales.y.ticks(count), format_number);
    Axis {
        orient: Orient::Left,
        translate: Vec2::ZERO,
        extent: scales.y.range,
        ticks,
        caption: Caption {
            text: "Place".to_string(),
            at: Vec2::ZERO,
            rotate_deg: -90.0,
            offset: Vec2::new(0.0, 15.0),
            dy: None,
            anchor: "end",
        },
    }
}

fn collect_ticks(scale: &LinearScale, values: Vec<f64>, fmt: fn(f64) -> String) -> Vec<Tick> {
    values
        .into_iter()
        .map(|value| Tick {
            value,
            offset: scale.map(value),
            label: fmt(value),
        })
        .collect()
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
