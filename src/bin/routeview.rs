use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use routeview::{
    CpuSurface, DEFAULT_OWNER_DURATION_MS, FeatureKind, FrameRGBA, HeadlessSurface, ManualClock,
    MapSurface, PathIndicatorMode, RenderedFeature, Rgba8, RouteViewport, Size,
    VehiclePathResponse, VehicleRoute, ViewportEvent, ZoomRange, load_image,
};

#[derive(Parser, Debug)]
#[command(name = "routeview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered features of a vehicle-path response as JSON.
    Inspect(InspectArgs),
    /// Rasterize a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Vehicle-path response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Map entry to draw (0-based).
    #[arg(long, default_value_t = 0)]
    map: usize,

    /// Arc length between direction arrows, in image pixels.
    #[arg(long, conflicts_with = "animate")]
    spacing: Option<f64>,

    /// Draw a moving marker instead of arrows.
    #[arg(long)]
    animate: bool,

    /// Duration of one marker pass in milliseconds.
    #[arg(long, requires = "animate")]
    duration: Option<f64>,

    /// Time since the path was drawn, in milliseconds.
    #[arg(long, requires = "animate")]
    at_ms: Option<f64>,

    /// Container width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Container height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    route: RouteArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    route: RouteArgs,

    /// Backdrop image; without it the frame is drawn as if the image failed to load.
    #[arg(long)]
    backdrop: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    projection: &'a str,
    zoom_range: ZoomRange,
    resolution: f64,
    route_length: f64,
    arrows: usize,
    animation_fraction: Option<f64>,
    features: &'a [RenderedFeature],
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_route(args: &RouteArgs) -> anyhow::Result<VehicleRoute> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read payload '{}'", args.in_path.display()))?;
    let response = VehiclePathResponse::from_json(&json).context("parse vehicle-path payload")?;
    Ok(response.route(args.map)?)
}

fn indicator(args: &RouteArgs) -> PathIndicatorMode {
    if args.animate {
        PathIndicatorMode::MovingMarker {
            duration_ms: args.duration.unwrap_or(DEFAULT_OWNER_DURATION_MS),
        }
    } else {
        PathIndicatorMode::StaticArrows {
            spacing: args.spacing,
        }
    }
}

fn advance_animation<S: MapSurface>(
    viewport: &mut RouteViewport<S>,
    clock: &ManualClock,
    at_ms: Option<f64>,
) {
    if let Some(at_ms) = at_ms {
        clock.set(at_ms);
        if viewport.wants_frame() {
            viewport.handle_event(ViewportEvent::AnimationFrame);
        }
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let args = args.route;
    let route = read_route(&args)?;
    let config = route.viewport_config(indicator(&args));
    let clock = ManualClock::new(0.0);

    let surface = HeadlessSurface::new(Size::new(f64::from(args.width), f64::from(args.height)));
    let mut viewport = RouteViewport::builder(config, surface)
        .path(route.path)
        .clock(clock.clone())
        .build()?;
    viewport.handle_event(ViewportEvent::BackdropLoaded);
    advance_animation(&mut viewport, &clock, args.at_ms);

    let report = InspectReport {
        projection: viewport.projection().code(),
        zoom_range: viewport.zoom_range(),
        resolution: viewport.surface().resolution(),
        route_length: viewport.route_line().map_or(0.0, |l| l.length()),
        arrows: viewport.features().count(FeatureKind::Arrow),
        animation_fraction: viewport.animation_fraction(),
        features: viewport.features().features(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let FrameArgs {
        route: route_args,
        backdrop,
        out,
    } = args;
    let route = read_route(&route_args)?;
    let config = route.viewport_config(indicator(&route_args));
    let clock = ManualClock::new(0.0);

    let mut surface = CpuSurface::new(route_args.width, route_args.height)?
        .with_clear_color(Rgba8::rgb(240, 240, 240));
    let loaded = match backdrop.as_deref() {
        Some(path) => {
            let image = load_image(path)?;
            surface.set_backdrop_image(&image)?;
            true
        }
        None => false,
    };

    let mut viewport = RouteViewport::builder(config, surface)
        .path(route.path)
        .clock(clock.clone())
        .build()?;
    viewport.handle_event(if loaded {
        ViewportEvent::BackdropLoaded
    } else {
        ViewportEvent::BackdropFailed
    });
    advance_animation(&mut viewport, &clock, route_args.at_ms);

    let frame = viewport.surface().snapshot()?;
    write_png(&out, &frame)
}

fn write_png(out: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
