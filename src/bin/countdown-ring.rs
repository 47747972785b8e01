use std::{
    io::Write as _,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use countdown_ring::{
    CountdownProgressBar, Fps, Phase, ProgressBarConfig, Rasterizer, Simulation, ThreadClock,
    frame_svg, save_png,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "countdown-ring", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single simulated frame as PNG (or SVG when the output ends in `.svg`).
    Frame(FrameArgs),
    /// Render every frame of one simulated countdown into a directory.
    Frames(FramesArgs),
    /// Print one JSON snapshot per simulated frame.
    Timeline(TimelineArgs),
    /// Run a countdown in real time and print label changes.
    Live(CountdownArgs),
}

#[derive(Args, Debug)]
struct CountdownArgs {
    /// Countdown length in seconds (defaults to the configured duration).
    #[arg(long)]
    duration: Option<f64>,

    /// Show the pulse around the ring.
    #[arg(long)]
    pulse: bool,

    /// Widget configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    countdown: CountdownArgs,

    /// Simulated time of the frame, in seconds after start.
    #[arg(long)]
    at: f64,

    /// Output path (`.png` or `.svg`).
    #[arg(long)]
    out: PathBuf,

    /// Extra directory to load fonts from.
    #[arg(long)]
    font_dir: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    countdown: CountdownArgs,

    /// Render-loop frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Write SVG documents instead of PNGs.
    #[arg(long)]
    svg: bool,

    /// Extra directory to load fonts from.
    #[arg(long)]
    font_dir: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    countdown: CountdownArgs,

    /// Render-loop frame rate.
    #[arg(long, default_value_t = 10)]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("countdown_ring=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Live(args) => cmd_live(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProgressBarConfig> {
    match path {
        Some(p) => ProgressBarConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(ProgressBarConfig::default()),
    }
}

fn started_simulation(args: &CountdownArgs, fps: u32) -> anyhow::Result<Simulation> {
    let config = load_config(args.config.as_deref())?;
    let duration = args.duration.unwrap_or(config.default_duration_secs);
    let mut sim = Simulation::new(config, Fps::new(fps, 1)?)?;
    sim.start(duration, args.pulse)
        .with_context(|| format!("start countdown of {duration}s"))?;
    Ok(sim)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !args.at.is_finite() || args.at < 0.0 {
        anyhow::bail!("--at must be a non-negative number of seconds");
    }
    // 120fps keeps the sampled frame within ~8ms of the requested time.
    let mut sim = started_simulation(&args.countdown, 120)?;
    let snap = sim
        .seek_to(args.at)
        .unwrap_or_else(|| sim.widget().snapshot());
    let layers = sim.widget().layers();

    let is_svg = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        write_svg(&args.out, &frame_svg(layers, &snap))?;
    } else {
        let raster = Rasterizer::new(&args.font_dir);
        let frame = raster.render(layers, &snap)?;
        save_png(&frame, &args.out)?;
    }

    eprintln!("wrote {} (label {}, stroke {:.3})", args.out.display(), snap.label, snap.stroke_fraction);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut sim = started_simulation(&args.countdown, args.fps)?;
    let limit = sim
        .widget()
        .state()
        .map_or(0.0, |s| s.duration_secs)
        + 1.0;
    let frames = sim.run_to_completion(limit);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let layers = sim.widget().layers();
    let raster = (!args.svg).then(|| Rasterizer::new(&args.font_dir));
    for (i, snap) in frames.iter().enumerate() {
        match &raster {
            Some(r) => {
                let path = args.out.join(format!("frame_{i:05}.png"));
                save_png(&r.render(layers, snap)?, &path)?;
            }
            None => {
                let path = args.out.join(format!("frame_{i:05}.svg"));
                write_svg(&path, &frame_svg(layers, snap))?;
            }
        }
    }

    eprintln!("wrote {} frames to {}", frames.len(), args.out.display());
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let mut sim = started_simulation(&args.countdown, args.fps)?;
    let limit = sim
        .widget()
        .state()
        .map_or(0.0, |s| s.duration_secs)
        + 1.0;
    let frames = sim.run_to_completion(limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for snap in &frames {
        serde_json::to_writer(&mut out, snap).context("serialize snapshot")?;
        writeln!(out).context("write stdout")?;
    }
    Ok(())
}

fn cmd_live(args: CountdownArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let duration = args.duration.unwrap_or(config.default_duration_secs);

    let clock = ThreadClock::new();
    let probe = clock.probe();
    let mut widget = CountdownProgressBar::new(config, clock)?;
    widget
        .start(duration, args.pulse)
        .with_context(|| format!("start countdown of {duration}s"))?;

    // UI loop at ~60Hz: apply queued ticks, then drive the animation engine.
    let origin = Instant::now();
    let frame = Duration::from_micros(16_667);
    let mut shown = String::new();
    loop {
        widget.pump();
        let snap = widget.render_frame(origin.elapsed().as_secs_f64());
        if snap.label != shown {
            println!("{}", snap.label);
            shown = snap.label;
        }
        if snap.phase == Phase::Idle && !widget.is_timer_running() {
            break;
        }
        thread::sleep(frame);
    }

    drop(widget);
    tracing::debug!(live_timers = probe.live(), "live countdown finished");
    Ok(())
}

fn write_svg(path: &Path, svg: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))
}
