use crate::{
    anim::Entrance,
    axis::{Axis, x_axis, y_axis},
    config::{ChartConfig, Palette},
    core::{Canvas, PlotArea},
    error::RaceChartResult,
    load::load_dataset,
    marks::{Mark, layout_marks},
    model::Dataset,
    scale::Scales,
    tooltip::HoverRegistry,
};

/// Everything needed to draw the chart, computed once from a dataset.
#[derive(Clone, Debug)]
pub struct Chart {
    pub canvas: Canvas,
    pub area: PlotArea,
    pub scales: Scales,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub marks: Vec<Mark>,
    pub hover: HoverRegistry,
    pub entrance: Entrance,
    pub palette: Palette,
}

impl Chart {
    #[tracing::instrument(skip_all, fields(records = dataset.len()))]
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> RaceChartResult<Self> {
        config.validate()?;
        let canvas = config.canvas()?;
        let area = config.plot_area()?;
        let scales = Scales::build(dataset, area, config.scale_params());

        let x_axis = x_axis(&scales, area, config.x_ticks, config.margins.bottom);
        let y_axis = y_axis(&scales, config.y_ticks);

        let mut hover = HoverRegistry::default();
        let marks = layout_marks(dataset, &scales, area, config.marker_radius, &mut hover);
        tracing::debug!(
            marks = marks.len(),
            x_ticks = x_axis.ticks.len(),
            y_ticks = y_axis.ticks.len(),
            "chart laid out"
        );

        Ok(Self {
            canvas,
            area,
            scales,
            x_axis,
            y_axis,
            marks,
            hover,
            entrance: config.entrance,
            palette: config.palette.clone(),
        })
    }

    /// Loads the dataset and lays out the chart. A load failure returns before
    /// anything is laid out.
    pub fn load(source: &str, config: &ChartConfig) -> RaceChartResult<Self> {
        let dataset = load_dataset(source)?;
        Self::build(&dataset, config)
    }

    /// Time after which every marker sits at its final position.
    pub fn settled_ms(&self) -> f64 {
        self.entrance.total_ms(self.marks.len())
    }
}
