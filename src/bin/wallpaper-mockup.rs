use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wallpaper_mockup::{
    DeviceProfile, GenerationOutcome, GenerationRequest, MockupConfig, MockupSession,
    OverlayToggles, SelectedFile,
};

#[derive(Parser, Debug)]
#[command(name = "wallpaper-mockup", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a photo into a phone mockup and write it as a PNG.
    Render(RenderArgs),
    /// List the built-in device profiles.
    Devices,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path, or a directory to receive `wallpaper-mockup-<unix-ms>.png`.
    #[arg(long)]
    out: PathBuf,

    /// Device silhouette (`iphone` or `android`).
    #[arg(long, default_value = "iphone")]
    device: DeviceProfile,

    /// Skip the app icon grid.
    #[arg(long, default_value_t = false)]
    no_icons: bool,

    /// Skip the clock.
    #[arg(long, default_value_t = false)]
    no_clock: bool,

    /// Clock time as `HH:MM` (defaults to the local time).
    #[arg(long, value_parser = parse_time)]
    time: Option<chrono::NaiveTime>,

    /// Directory with frame/icon art overriding the built-in art.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_time(s: &str) -> Result<chrono::NaiveTime, String> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Devices => {
            cmd_devices();
            Ok(())
        }
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_devices() {
    for device in DeviceProfile::ALL {
        let r = device.screen_rect();
        println!(
            "{device}\tscreen {}x{} at ({}, {})\tframe {}",
            r.width,
            r.height,
            r.x,
            r.y,
            device.frame_path()
        );
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => MockupConfig::from_path(path)?,
        None => MockupConfig::default(),
    };
    if let Some(dir) = &args.assets {
        config.assets_root = Some(dir.clone());
    }

    let file = SelectedFile::from_path(&args.in_path)?;
    let mut request = GenerationRequest::new(args.device).with_toggles(OverlayToggles {
        show_icons: !args.no_icons,
        show_clock: !args.no_clock,
    });
    if let Some(time) = args.time {
        request = request.at_time(time);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let exported = rt.block_on(async {
        let session = MockupSession::new(&config)?;
        session.select_file(file)?;
        match session.generate(request).await? {
            GenerationOutcome::Ready(report) => {
                for failure in &report.icons_failed {
                    eprintln!("warning: icon {} skipped: {}", failure.id, failure.reason);
                }
            }
            GenerationOutcome::Superseded { token } => {
                anyhow::bail!("generation {token} was superseded");
            }
        }
        Ok::<_, anyhow::Error>(session.export()?)
    })?;

    let out = output_path(&args.out, &exported.file_name);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &exported.bytes)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn output_path(out: &Path, file_name: &str) -> PathBuf {
    let as_dir = out.is_dir() || out.as_os_str().to_string_lossy().ends_with(['/', '\\']);
    if as_dir {
        out.join(file_name)
    } else {
        out.to_path_buf()
    }
}
