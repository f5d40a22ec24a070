use crate::error::{RaceChartError, RaceChartResult};

pub use kurbo::{Point, Vec2};

/// Output document size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 75.0,
            bottom: 20.0,
            left: 40.0,
        }
    }
}

/// How the canvas size is chosen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Fixed { width: u32, height: u32 },
    /// Fraction of a viewport: 80% of its width, 75% of its height.
    Viewport { width: u32, height: u32 },
}

impl Default for Layout {
    fn default() -> Self {
        Self::SMALL
    }
}

impl Layout {
    pub const SMALL: Self = Self::Fixed {
        width: 800,
        height: 400,
    };
    pub const TALL: Self = Self::Fixed {
        width: 800,
        height: 500,
    };
    pub const VIEWPORT_FRACTION_W: f64 = 0.8;
    pub const VIEWPORT_FRACTION_H: f64 = 0.75;

    pub fn canvas(self) -> RaceChartResult<Canvas> {
        let canvas = match self {
            Self::Fixed { width, height } => Canvas { width, height },
            Self::Viewport { width, height } => Canvas {
                width: (f64::from(width) * Self::VIEWPORT_FRACTION_W).round() as u32,
                height: (f64::from(height) * Self::VIEWPORT_FRACTION_H).round() as u32,
            },
        };
        if canvas.width == 0 || canvas.height == 0 {
            return Err(RaceChartError::config("canvas width/height must be > 0"));
        }
        Ok(canvas)
    }
}

/// Drawable region inside the margins, in plot-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub origin: Vec2, // translate of the plot group inside the canvas
}

impl PlotArea {
    pub fn new(canvas: Canvas, margins: Margins) -> RaceChartResult<Self> {
        let width = f64::from(canvas.width) - margins.left - margins.right;
        let height = f64::from(canvas.height) - margins.top - margins.bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(RaceChartError::config(format!(
                "margins leave no plot area on a {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        Ok(Self {
            width,
            height,
            origin: Vec2::new(margins.left, margins.top),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layouts_match_presets() {
        assert_eq!(
            Layout::SMALL.canvas().unwrap(),
            Canvas {
                width: 800,
                height: 400
            }
        );
        assert_eq!(Layout::TALL.canvas().unwrap().height, 500);
    }

    #[test]
    fn viewport_layout_takes_fraction() {
        let c = Layout::Viewport {
            width: 1000,
            height: 800,
        }
        .canvas()
        .unwrap();
        assert_eq!(c.width, 800);
        assert_eq!(c.height, 600);
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let l = Layout::Fixed {
            width: 0,
            height: 10,
        };
        assert!(l.canvas().is_err());
    }

    #[test]
    fn plot_area_subtracts_margins() {
        let area = PlotArea::new(Layout::SMALL.canvas().unwrap(), Margins::default()).unwrap();
        assert_eq!(area.width, 685.0);
        assert_eq!(area.height, 370.0);
        assert_eq!(area.origin, Vec2::new(40.0, 10.0));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let canvas = Canvas {
            width: 100,
            height: 20,
        };
        assert!(PlotArea::new(canvas, Margins::default()).is_err());
    }
}
