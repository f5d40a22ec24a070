use std::fmt::Write as _;

use crate::{
    axis::{Axis, Orient, TICK_PADDING, TICK_SIZE},
    chart::Chart,
    config::Palette,
    core::{Canvas, Point, Vec2},
    marks::{Mark, label_for},
    tooltip::{OVERLAY_OFFSET, Overlay, TooltipContent, VISIBLE_OPACITY},
};

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 10.0;
const TOOLTIP_LINE_HEIGHT: f64 = 14.0;

const STYLESHEET: &str = "\
.graph__dot{stroke:#000;stroke-width:0.5}\
.graph__name{pointer-events:none}\
.graph__tooltip{pointer-events:none}";

/// What kind of document to emit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SvgMode {
    /// Stylesheet, SMIL entrance animation and hover tooltips.
    Interactive,
    /// Plain shapes with markers frozen at `at_ms` into the entrance.
    Snapshot { at_ms: f64 },
}

impl SvgMode {
    pub fn settled() -> Self {
        Self::Snapshot { at_ms: f64::MAX }
    }
}

/// The one SVG document a render writes into. Renderers receive it explicitly.
pub struct RenderContext {
    canvas: Canvas,
    body: String,
    depth: usize,
}

impl RenderContext {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            body: String::new(),
            depth: 1,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn line(&mut self, s: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.body.push_str("  ");
        }
        self.body.push_str(s.as_ref());
        self.body.push('\n');
    }

    pub fn open_group(&mut self, class: Option<&str>, translate: Option<Vec2>) {
        let mut tag = String::from("<g");
        if let Some(class) = class {
            let _ = write!(tag, " class=\"{class}\"");
        }
        if let Some(t) = translate {
            let _ = write!(tag, " transform=\"translate({},{})\"", num(t.x), num(t.y));
        }
        tag.push('>');
        self.open(tag);
    }

    /// Writes an already formatted opening tag and indents what follows.
    pub fn open(&mut self, tag: impl AsRef<str>) {
        self.line(tag);
        self.depth += 1;
    }

    pub fn close_group(&mut self) {
        self.depth = self.depth.saturating_sub(1).max(1);
        self.line("</g>");
    }

    pub fn finish(self) -> String {
        let Canvas { width, height } = self.canvas;
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"graph\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

pub fn render_svg(chart: &Chart, mode: SvgMode) -> String {
    render_svg_with_overlay(chart, mode, None)
}

/// Renders the chart; `overlay`, when visible, is drawn on top as a fixed tooltip.
#[tracing::instrument(skip_all, fields(marks = chart.marks.len(), mode = ?mode))]
pub fn render_svg_with_overlay(chart: &Chart, mode: SvgMode, overlay: Option<&Overlay>) -> String {
    let mut ctx = RenderContext::new(chart.canvas);
    if mode == SvgMode::Interactive {
        ctx.line(format!("<style>{STYLESHEET}</style>"));
    }
    let canvas = ctx.canvas();
    ctx.line(format!(
        "<rect class=\"graph__bg\" width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
        canvas.width, canvas.height
    ));

    ctx.open_group(Some("graph__plot"), Some(chart.area.origin));
    render_axis(&mut ctx, &chart.x_axis, &chart.palette);
    render_axis(&mut ctx, &chart.y_axis, &chart.palette);
    render_marks(&mut ctx, chart, mode);
    if mode == SvgMode::Interactive {
        render_tooltip_layer(&mut ctx, chart);
    }
    if let Some(overlay) = overlay.filter(|o| o.is_visible()) {
        render_overlay(&mut ctx, overlay, &chart.palette);
    }
    ctx.close_group();

    ctx.finish()
}

pub fn render_axis(ctx: &mut RenderContext, axis: &Axis, palette: &Palette) {
    let stroke = &palette.axis;
    ctx.open_group(Some(axis.class()), Some(axis.translate));

    let (a, b) = (axis.extent.0.min(axis.extent.1), axis.extent.0.max(axis.extent.1));
    let domain = match axis.orient {
        Orient::Bottom => format!("M{},{}V0H{}V{}", num(a), num(TICK_SIZE), num(b), num(TICK_SIZE)),
        Orient::Left => format!("M{},{}H0V{}H{}", num(-TICK_SIZE), num(a), num(b), num(-TICK_SIZE)),
    };
    ctx.line(format!(
        "<path class=\"domain\" d=\"{domain}\" fill=\"none\" stroke=\"{stroke}\"/>"
    ));

    for tick in &axis.ticks {
        let (translate, line, text) = match axis.orient {
            Orient::Bottom => (
                Vec2::new(tick.offset, 0.0),
                format!("<line y2=\"{}\" stroke=\"{stroke}\"/>", num(TICK_SIZE)),
                format!(
                    "<text y=\"{}\" dy=\"0.71em\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{stroke}\">{}</text>",
                    num(TICK_SIZE + TICK_PADDING),
                    escape_xml(&tick.label)
                ),
            ),
            Orient::Left => (
                Vec2::new(0.0, tick.offset),
                format!("<line x2=\"{}\" stroke=\"{stroke}\"/>", num(-TICK_SIZE)),
                format!(
                    "<text x=\"{}\" dy=\"0.32em\" text-anchor=\"end\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{stroke}\">{}</text>",
                    num(-(TICK_SIZE + TICK_PADDING)),
                    escape_xml(&tick.label)
                ),
            ),
        };
        ctx.open_group(Some("tick"), Some(translate));
        ctx.line(line);
        ctx.line(text);
        ctx.close_group();
    }

    let cap = &axis.caption;
    let mut transform = Vec::new();
    if cap.at != Vec2::ZERO {
        transform.push(format!("translate({},{})", num(cap.at.x), num(cap.at.y)));
    }
    if cap.rotate_deg != 0.0 {
        transform.push(format!("rotate({})", num(cap.rotate_deg)));
    }
    let mut tag = String::from("<text class=\"graph__label\"");
    if !transform.is_empty() {
        let _ = write!(tag, " transform=\"{}\"", transform.join(" "));
    }
    if cap.offset.x != 0.0 {
        let _ = write!(tag, " x=\"{}\"", num(cap.offset.x));
    }
    if cap.offset.y != 0.0 {
        let _ = write!(tag, " y=\"{}\"", num(cap.offset.y));
    }
    if let Some(dy) = cap.dy {
        let _ = write!(tag, " dy=\"{dy}\"");
    }
    ctx.line(format!(
        "{tag} text-anchor=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{}\">{}</text>",
        cap.anchor,
        palette.text,
        escape_xml(&cap.text)
    ));
    ctx.close_group();
}

pub fn render_marks(ctx: &mut RenderContext, chart: &Chart, mode: SvgMode) {
    ctx.open_group(Some("graph__marks"), None);
    for (i, mark) in chart.marks.iter().enumerate() {
        let fill = if mark.doped {
            &chart.palette.doping
        } else {
            &chart.palette.clean
        };
        match mode {
            SvgMode::Snapshot { at_ms } => {
                let center = chart
                    .entrance
                    .sample(i, &mark.baseline, &mark.center, at_ms);
                render_mark_static(ctx, mark, center, fill, &chart.palette);
            }
            SvgMode::Interactive => render_mark_interactive(ctx, chart, i, mark, fill),
        }
    }
    ctx.close_group();
}

fn render_mark_static(
    ctx: &mut RenderContext,
    mark: &Mark,
    center: Point,
    fill: &str,
    palette: &Palette,
) {
    let label = label_for(center);
    ctx.line(format!(
        "<circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"/>",
        mark.class(),
        num(center.x),
        num(center.y),
        num(mark.radius)
    ));
    ctx.line(format!(
        "<text class=\"graph__name\" x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{}\">{}</text>",
        num(label.x),
        num(label.y),
        palette.text,
        escape_xml(&mark.label)
    ));
}

fn render_mark_interactive(ctx: &mut RenderContext, chart: &Chart, i: usize, mark: &Mark, fill: &str) {
    let entrance = &chart.entrance;
    let delay = entrance.delay_ms(i);
    let total = delay + entrance.duration_ms.max(0.0);
    // Hold at the baseline for `delay`, then ease to the final position.
    let hold = if total > 0.0 { delay / total } else { 0.0 };
    let animate = |attr: &str, from: f64, to: f64| {
        format!(
            "<animate attributeName=\"{attr}\" values=\"{};{};{}\" keyTimes=\"0;{};1\" calcMode=\"spline\" keySplines=\"0 0 1 1;{}\" dur=\"{}ms\" begin=\"0s\" fill=\"freeze\"/>",
            num(from),
            num(from),
            num(to),
            num(hold),
            entrance.ease.key_splines(),
            num(total.max(1.0))
        )
    };
    let label = mark.label_at();
    let baseline_label = label_for(mark.baseline);

    ctx.open(format!("<g class=\"graph__mark\" id=\"{}\">", mark_element_id(mark)));
    ctx.line(format!(
        "<circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\">",
        mark.class(),
        num(mark.center.x),
        num(mark.center.y),
        num(mark.radius)
    ));
    ctx.line(format!(
        "  <title>{}</title>",
        escape_xml(&mark.tooltip.lines().join("\n"))
    ));
    ctx.line(format!("  {}", animate("cy", mark.baseline.y, mark.center.y)));
    ctx.line("</circle>");
    ctx.line(format!(
        "<text class=\"graph__name\" x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{}\">{}",
        num(label.x),
        num(label.y),
        chart.palette.text,
        escape_xml(&mark.label)
    ));
    ctx.line(format!("  {}", animate("y", baseline_label.y, label.y)));
    ctx.line("</text>");
    ctx.close_group();
}

fn mark_element_id(mark: &Mark) -> String {
    format!("mark-{}", mark.id.0)
}

/// Hover tooltips for every mark, drawn after all marks so none is covered.
/// Each stays transparent until the pointer is over its mark.
fn render_tooltip_layer(ctx: &mut RenderContext, chart: &Chart) {
    ctx.open_group(Some("graph__tooltips"), None);
    for mark in &chart.marks {
        let at = mark.center + OVERLAY_OFFSET;
        let target = mark_element_id(mark);
        render_tooltip_box(ctx, &mark.tooltip, at, &chart.palette, Some(0.0), Some(&target));
    }
    ctx.close_group();
}

/// Draws the overlay exactly as its current state describes.
pub fn render_overlay(ctx: &mut RenderContext, overlay: &Overlay, palette: &Palette) {
    let (Some(content), Some(at)) = (&overlay.content, overlay.at) else {
        return;
    };
    render_tooltip_box(ctx, content, at, palette, Some(overlay.opacity), None);
}

fn render_tooltip_box(
    ctx: &mut RenderContext,
    content: &TooltipContent,
    at: Point,
    palette: &Palette,
    opacity: Option<f64>,
    shown_by: Option<&str>,
) {
    let lines = content.lines();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = widest as f64 * FONT_SIZE * 0.6 + 12.0;
    let height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + 8.0;

    let mut tag = format!(
        "<g class=\"graph__tooltip\" transform=\"translate({},{})\"",
        num(at.x),
        num(at.y)
    );
    if let Some(o) = opacity {
        let _ = write!(tag, " opacity=\"{}\"", num(o));
    }
    tag.push('>');
    ctx.line(tag);
    if let Some(target) = shown_by {
        ctx.line(format!(
            "  <set attributeName=\"opacity\" to=\"{}\" begin=\"{target}.mouseover\" end=\"{target}.mouseout\"/>",
            num(VISIBLE_OPACITY)
        ));
    }
    ctx.line(format!(
        "  <rect width=\"{}\" height=\"{}\" rx=\"3\" fill=\"{}\" stroke=\"{}\"/>",
        num(width),
        num(height),
        palette.tooltip_bg,
        palette.axis
    ));
    for (i, line) in lines.iter().enumerate() {
        ctx.line(format!(
            "  <text x=\"6\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{}\">{}</text>",
            num(4.0 + TOOLTIP_LINE_HEIGHT * (i as f64 + 0.75)),
            palette.text,
            escape_xml(line)
        ));
    }
    ctx.line("</g>");
}

/// Shortest round-trippable decimal for a coordinate, at most 3 fractional digits.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = (v * 1000.0).round() / 1000.0;
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
