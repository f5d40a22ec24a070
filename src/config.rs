use std::path::Path;

use anyhow::Context as _;

use crate::{
    anim::Entrance,
    core::{Canvas, Layout, Margins, PlotArea},
    error::{RaceChartError, RaceChartResult},
    scale::{DomainPolicy, ScaleParams},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub clean: String,
    pub doping: String,
    pub text: String,
    pub axis: String,
    pub tooltip_bg: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            clean: "#2a9d8f".to_string(),
            doping: "#e63946".to_string(),
            text: "#1d3557".to_string(),
            axis: "#333333".to_string(),
            tooltip_bg: "#f1faee".to_string(),
        }
    }
}

/// Layout constants for one chart. Every field has a default, so a config
/// file only lists what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: Layout,
    pub margins: Margins,
    pub domain: DomainPolicy,
    pub padding_x_ms: f64,
    pub padding_y: f64,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub marker_radius: f64,
    pub entrance: Entrance,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let scale = ScaleParams::default();
        Self {
            layout: Layout::default(),
            margins: Margins::default(),
            domain: scale.policy,
            padding_x_ms: scale.padding_x_ms,
            padding_y: scale.padding_y,
            x_ticks: 12,
            y_ticks: 10,
            marker_radius: 5.0,
            entrance: Entrance::default(),
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_file(path: &Path) -> RaceChartResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| RaceChartError::config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RaceChartResult<()> {
        self.plot_area()?;
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(RaceChartError::config("marker_radius must be > 0"));
        }
        if !(self.padding_x_ms.is_finite() && self.padding_x_ms >= 0.0) {
            return Err(RaceChartError::config("padding_x_ms must be >= 0"));
        }
        if !(self.padding_y.is_finite() && self.padding_y >= 0.0) {
            return Err(RaceChartError::config("padding_y must be >= 0"));
        }
        if self.x_ticks == 0 || self.y_ticks == 0 {
            return Err(RaceChartError::config("tick counts must be > 0"));
        }
        if self.entrance.duration_ms < 0.0 || self.entrance.stagger_ms < 0.0 {
            return Err(RaceChartError::config(
                "entrance duration/stagger must be >= 0",
            ));
        }
        Ok(())
    }

    pub fn canvas(&self) -> RaceChartResult<Canvas> {
        self.layout.canvas()
    }

    pub fn plot_area(&self) -> RaceChartResult<PlotArea> {
        PlotArea::new(self.canvas()?, self.margins)
    }

    pub fn scale_params(&self) -> ScaleParams {
        ScaleParams {
            policy: self.domain,
            padding_x_ms: self.padding_x_ms,
            padding_y: self.padding_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = ChartConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.canvas().unwrap().width, 800);
        assert_eq!(cfg.scale_params(), ScaleParams::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ChartConfig = serde_json::from_str(
            r#"{"layout":{"viewport":{"width":1280,"height":800}},"domain":"extent"}"#,
        )
        .unwrap();
        assert_eq!(cfg.domain, DomainPolicy::Extent);
        assert_eq!(cfg.canvas().unwrap().width, 1024);
        assert_eq!(cfg.canvas().unwrap().height, 600);
        assert_eq!(cfg.x_ticks, 12);
        assert_eq!(cfg.entrance, Entrance::default());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = ChartConfig {
            marker_radius: 0.0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ChartConfig {
            y_ticks: 0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ChartConfig {
            layout: Layout::Fixed {
                width: 100,
                height: 25,
            },
            ..ChartConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RaceChartError::Config(_))));
    }

    #[test]
    fn unknown_file_is_an_error() {
        assert!(ChartConfig::from_json_file(Path::new("target/no/such/config.json")).is_err());
    }
}
