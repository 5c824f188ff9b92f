use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::Level;
use wavy_bg::{BackgroundSession, CpuCanvas, FrameRGBA, HeadlessHost, ViewportSize, WaveOptions};

#[derive(Parser, Debug)]
#[command(name = "wavy-bg", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the background after N frame ticks and write it as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence, one file per frame tick.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Wave options JSON (colors, waveWidth, backgroundFill, blur, speed, waveOpacity, seed).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Platform identifier (user agent) used for blur engine detection.
    #[arg(long, default_value = "")]
    platform: String,

    /// PNG composited above the background, unblurred. Must match the viewport size.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Noise seed; overrides the config file.
    #[arg(long)]
    seed: Option<u32>,

    /// Resize the viewport before tick K, as `K:WxH`. Repeatable.
    #[arg(long = "resize-at", value_name = "K:WxH")]
    resize_at: Vec<ResizeAt>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame ticks to run after the first (mount-time) frame.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to write.
    #[arg(long)]
    count: u64,

    /// Output directory; files are named `frame_NNNNN.png`.
    #[arg(long = "out-dir")]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ResizeAt {
    tick: u64,
    size: ViewportSize,
}

impl FromStr for ResizeAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("expected K:WxH, got '{s}'");
        let (tick, dims) = s.split_once(':').ok_or_else(err)?;
        let (w, h) = dims.split_once(['x', 'X']).ok_or_else(err)?;
        Ok(Self {
            tick: tick.trim().parse().map_err(|_| err())?,
            size: ViewportSize::new(
                w.trim().parse().map_err(|_| err())?,
                h.trim().parse().map_err(|_| err())?,
            ),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_options(scene: &SceneArgs) -> anyhow::Result<WaveOptions> {
    let mut opts = match &scene.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read wave options '{}'", path.display()))?;
            WaveOptions::from_json_str(&text)
                .with_context(|| format!("parse wave options '{}'", path.display()))?
        }
        None => WaveOptions::default(),
    };
    if scene.seed.is_some() {
        opts.seed = scene.seed;
    }
    if let Some(path) = &scene.overlay {
        opts.children = Some(read_overlay(path)?);
    }
    Ok(opts)
}

fn read_overlay(path: &Path) -> anyhow::Result<FrameRGBA> {
    let img = image::open(path)
        .with_context(|| format!("open overlay '{}'", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Ok(FrameRGBA::from_straight_rgba8(w, h, img.into_raw())?)
}

fn start_session(scene: &SceneArgs) -> anyhow::Result<BackgroundSession<CpuCanvas>> {
    let opts = read_options(scene)?;
    let host = HeadlessHost::new(ViewportSize::new(scene.width, scene.height))
        .with_platform_id(scene.platform.clone());
    let mut session = BackgroundSession::cpu(opts, host)?;
    session.mount();
    Ok(session)
}

fn apply_resizes(session: &mut BackgroundSession<CpuCanvas>, plan: &[ResizeAt], tick: u64) {
    for r in plan.iter().filter(|r| r.tick == tick) {
        session.resize(Some(r.size));
    }
}

fn write_png(frame: &FrameRGBA, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
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
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = start_session(&args.scene)?;
    for tick in 0..args.ticks {
        apply_resizes(&mut session, &args.scene.resize_at, tick);
        session.step();
    }

    let frame = session.present().context("present frame")?;
    write_png(&frame, &args.out)?;
    session.unmount();

    eprintln!(
        "wrote {} ({}x{}, t={:.3})",
        args.out.display(),
        frame.width,
        frame.height,
        session.background().time()
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut session = start_session(&args.scene)?;
    for i in 0..args.count {
        apply_resizes(&mut session, &args.scene.resize_at, i);
        session.step();
        let frame = session
            .present()
            .with_context(|| format!("present frame {i}"))?;
        write_png(&frame, &args.out_dir.join(format!("frame_{i:05}.png")))?;
    }
    session.unmount();

    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}
