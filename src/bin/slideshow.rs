use std::{
    io::IsTerminal as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slideshow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a slideshow file and resolve its images.
    Check(CheckArgs),
    /// Print the draw lists for one point in time as JSON.
    Sample(SampleArgs),
    /// Play the slideshow headless, logging each frame's draw lists.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Slideshow configuration file.
    #[arg(default_value = "slideshow.txt")]
    file: PathBuf,

    /// Do not read image files; only check that every entry names one.
    #[arg(long)]
    skip_assets: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the parsed registry as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Show time in seconds.
    #[arg(long)]
    at: f64,

    /// Number of side-by-side monitors sharing the virtual screen.
    #[arg(long, default_value_t = 1)]
    monitors: u32,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of side-by-side monitors sharing the virtual screen.
    #[arg(long, default_value_t = 1)]
    monitors: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(args: &SourceArgs) -> anyhow::Result<slideshow::Slideshow> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read slideshow '{}'", args.file.display()))?;
    tracing::info!("running slideshow from file '{}'", args.file.display());

    let show = if args.skip_assets {
        slideshow::Slideshow::load(&text, &mut slideshow::SourceCatalog::new())
    } else {
        let root = args.file.parent().unwrap_or_else(|| Path::new("."));
        slideshow::Slideshow::load(&text, &mut slideshow::ImageStore::new(root))
    };
    show.with_context(|| format!("load slideshow '{}'", args.file.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let show = load(&args.source)?;
    let registry = show.registry();

    if args.json {
        let out = serde_json::to_string_pretty(registry).context("serialize registry")?;
        println!("{out}");
        return Ok(());
    }

    match registry.screen() {
        Some(s) => println!("screen: {} x {}", s.width, s.height),
        None => println!("screen: (not set)"),
    }
    println!("images: {} (drawn bottom to top)", registry.len());
    for entry in registry {
        let t = entry.timing;
        println!(
            "  {:<32} pos ({:.4}, {:.4}) size ({:.4}, {:.4}) start {} duration {} fade {}/{}",
            entry.source,
            entry.position.x,
            entry.position.y,
            entry.size.x,
            entry.size.y,
            t.start,
            t.duration,
            t.fade_in,
            t.fade_out,
        );
    }
    println!("show ends at {}s", registry.show_end());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let show = load(&args.source)?;
    let views = slideshow::MonitorView::columns(args.monitors)?;
    let draws = show.draw(args.at, &views)?;
    let out = serde_json::to_string_pretty(&draws).context("serialize draw lists")?;
    println!("{out}");
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !(args.fps > 0.0 && args.fps.is_finite()) {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }
    let show = load(&args.source)?;
    let views = slideshow::MonitorView::columns(args.monitors)?;
    let frame_interval = Duration::from_secs_f64(1.0 / args.fps);

    let clock = slideshow::MonotonicClock::start();
    loop {
        let (time, draws) = show.draw_now(&clock, &views)?;
        if show.is_finished(time) {
            tracing::info!(time, "slideshow finished");
            return Ok(());
        }
        for (monitor, draw) in draws.iter().enumerate() {
            for ins in &draw.instructions {
                tracing::debug!(
                    time,
                    monitor,
                    image = ins.image.as_u32(),
                    opacity = ins.opacity,
                    "draw"
                );
            }
        }
        let visible = draws.first().map_or(0, |d| d.instructions.len());
        tracing::trace!(time, visible, "frame");
        std::thread::sleep(frame_interval);
    }
}
