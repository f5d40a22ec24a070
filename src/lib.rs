#![forbid(unsafe_code)]

pub mod anim;
pub mod anim_ease;
pub mod axis;
pub mod chart;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod load;
pub mod marks;
pub mod model;
pub mod render;
pub mod scale;
pub mod svg_raster;
pub mod tooltip;

pub use anim::{Entrance, Lerp};
pub use anim_ease::Ease;
pub use axis::{Axis, Orient, Tick};
pub use chart::Chart;
pub use config::{ChartConfig, Palette};
pub use crate::core::{Canvas, Layout, Margins, PlotArea, Point, Vec2};
pub use error::{LoadStage, RaceChartError, RaceChartResult};
pub use format::{format_clock, format_seconds, parse_clock};
pub use load::{DEFAULT_SOURCE, Source, load_dataset, parse_dataset};
pub use marks::Mark;
pub use model::{Dataset, Record};
pub use render::{RenderContext, SvgMode, render_svg, render_svg_with_overlay};
pub use scale::{DomainPolicy, LinearScale, ScaleParams, Scales};
pub use svg_raster::{FrameRGBA, rasterize_svg, write_png};
pub use tooltip::{HoverRegistry, MarkId, Overlay, PointerEvent, TooltipContent};
