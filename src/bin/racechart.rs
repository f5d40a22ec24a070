use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "racechart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart as SVG or PNG (picked from the output extension).
    Render(RenderArgs),
    /// Print a JSON summary of the dataset and the derived scales.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Dataset location: http(s) URL, file:// URI or local path.
    #[arg(long, default_value = racechart::DEFAULT_SOURCE)]
    source: String,

    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,

    /// Optional chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas preset; overrides the config file.
    #[arg(long, value_enum)]
    layout: Option<LayoutChoice>,

    /// Viewport size for `--layout viewport`, as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_viewport, default_value = "1280x800")]
    viewport: (u32, u32),

    /// Freeze the entrance at this many milliseconds instead of the final frame.
    /// SVG output becomes a static snapshot.
    #[arg(long, value_parser = parse_snapshot_ms)]
    snapshot_ms: Option<f64>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Dataset location: http(s) URL, file:// URI or local path.
    #[arg(long, default_value = racechart::DEFAULT_SOURCE)]
    source: String,

    /// Optional chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    /// 800x400
    Small,
    /// 800x500
    Tall,
    /// 80% x 75% of --viewport
    Viewport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn parse_viewport(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

fn parse_snapshot_ms(s: &str) -> Result<f64, String> {
    let ms: f64 = s.trim().parse().map_err(|e| format!("bad time: {e}"))?;
    if !ms.is_finite() || ms < 0.0 {
        return Err(format!("expected a finite, non-negative millisecond count, got '{s}'"));
    }
    Ok(ms)
}

fn output_format(path: &Path) -> anyhow::Result<OutputFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("svg") => Ok(OutputFormat::Svg),
        Some("png") => Ok(OutputFormat::Png),
        _ => anyhow::bail!("output '{}' must end in .svg or .png", path.display()),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<racechart::ChartConfig> {
    match path {
        Some(p) => Ok(racechart::ChartConfig::from_json_file(p)?),
        None => Ok(racechart::ChartConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let format = output_format(&args.out)?;
    let mut config = read_config(args.config.as_deref())?;
    if let Some(choice) = args.layout {
        config.layout = match choice {
            LayoutChoice::Small => racechart::Layout::SMALL,
            LayoutChoice::Tall => racechart::Layout::TALL,
            LayoutChoice::Viewport => racechart::Layout::Viewport {
                width: args.viewport.0,
                height: args.viewport.1,
            },
        };
    }

    // Nothing is written unless the whole dataset loads.
    let chart = racechart::Chart::load(&args.source, &config)
        .with_context(|| format!("load chart data from '{}'", args.source))?;

    let mode = match (format, args.snapshot_ms) {
        (_, Some(at_ms)) => racechart::SvgMode::Snapshot { at_ms },
        (OutputFormat::Svg, None) => racechart::SvgMode::Interactive,
        (OutputFormat::Png, None) => racechart::SvgMode::settled(),
    };
    let svg = racechart::render_svg(&chart, mode);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    match format {
        OutputFormat::Svg => std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?,
        OutputFormat::Png => {
            let frame = racechart::rasterize_svg(&svg)?;
            racechart::write_png(frame, &args.out)?;
        }
    }

    tracing::info!(
        out = %args.out.display(),
        marks = chart.marks.len(),
        width = chart.canvas.width,
        height = chart.canvas.height,
        "chart written"
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct Summary<'a> {
    source: &'a str,
    records: usize,
    doped: usize,
    reference: Option<&'a str>,
    time_offset_seconds: f64,
    max_elapsed: String,
    max_place: u32,
    x_domain_ms: (f64, f64),
    y_domain: (f64, f64),
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let dataset = racechart::load_dataset(&args.source)
        .with_context(|| format!("load dataset from '{}'", args.source))?;
    let scales = racechart::Scales::build(&dataset, config.plot_area()?, config.scale_params());

    let summary = Summary {
        source: &args.source,
        records: dataset.len(),
        doped: dataset.doped_count(),
        reference: dataset.reference().map(|r| r.name.as_str()),
        time_offset_seconds: dataset.time_offset(),
        max_elapsed: racechart::format_clock(dataset.max_elapsed_ms()),
        max_place: dataset.max_place(),
        x_domain_ms: scales.x.domain,
        y_domain: scales.y.domain,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_time_must_be_finite() {
        assert_eq!(parse_snapshot_ms("250"), Ok(250.0));
        assert_eq!(parse_snapshot_ms("0"), Ok(0.0));
        for bad in ["NaN", "nan", "inf", "-inf", "-5", "soon"] {
            assert!(parse_snapshot_ms(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn viewport_parses_both_separators() {
        assert_eq!(parse_viewport("1280x800"), Ok((1280, 800)));
        assert_eq!(parse_viewport("640X480"), Ok((640, 480)));
        assert!(parse_viewport("640").is_err());
    }
}
