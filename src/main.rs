use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use pivision::config::{self, Config, NtMode};
use pivision::telemetry::TelemetryStore;
use pivision::{
    CameraRouter, ImageSequenceSource, TargetPipeline, TargetPublisher, TelemetryTable,
    VisionRunner, VisionThread,
};

#[derive(Parser)]
#[command(name = "pivision")]
#[command(about = "Find a colored vision target and publish its offset from image center")]
struct Cli {
    /// Path to the configuration file
    #[arg(value_name = "CONFIG", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Read frames for the first camera from this directory of images
    #[arg(long, value_name = "DIR")]
    frames: Option<PathBuf>,

    /// Restart the image sequence when it ends
    #[arg(long = "loop")]
    looping: bool,

    /// Stop after processing this many frames
    #[arg(long, value_name = "N")]
    max_frames: Option<u64>,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("pivision={}", log_level)));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load(&args.config)?;
    info!("Configuration loaded from {}", args.config.display());

    let table = Arc::new(TelemetryTable::new());
    match config.ntmode {
        NtMode::Server => info!("Setting up telemetry server"),
        NtMode::Client => info!("Setting up telemetry client for team {}", config.team),
    }

    for camera in &config.cameras {
        info!("Starting camera '{}' on {}", camera.name, camera.path);
        tracing::debug!("camera '{}' settings: {}", camera.name, serde_json::to_string(camera)?);
    }

    let router = CameraRouter::new(config.cameras.iter().map(|c| c.name.clone()));
    for switched in &config.switched_cameras {
        info!("Starting switched camera '{}' on {}", switched.name, switched.key);
        router.listen(switched.name.clone(), table.subscribe(&switched.key))?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let frames_dir = args.frames.clone().or_else(|| {
        config
            .cameras
            .first()
            .map(|c| PathBuf::from(&c.path))
            .filter(|p| p.is_dir())
    });
    let Some(frames_dir) = frames_dir else {
        warn!("No frame source available for the first camera, vision processing disabled");
        // switched camera listeners keep running until shutdown
        runtime.block_on(wait_for_shutdown())?;
        return Ok(());
    };

    let source = ImageSequenceSource::open(&frames_dir)?.with_looping(args.looping);
    info!("Reading {} frames from {}", source.len(), frames_dir.display());

    let publisher = TargetPublisher::new(table.clone());
    let mut runner = VisionRunner::new(source, TargetPipeline::default(), publisher)
        .with_max_frames(args.max_frames);
    if let Some(debug_dir) = args.debug_out {
        runner = runner.with_debug(debug_dir)?;
    }

    let vision = VisionThread::spawn(runner)?;
    let stats = runtime.block_on(vision.run_until(async {
        if let Err(e) = wait_for_shutdown().await {
            warn!("Failed to listen for shutdown signals: {}", e);
            std::future::pending::<()>().await;
        }
    }))?;
    info!(
        "Processed {} frames ({} skipped, {} published)",
        stats.frames, stats.skipped, stats.published
    );

    print_table(&table, pivision::telemetry::TABLE_NAME);
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = signal::ctrl_c() => result?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c().await?;

    info!("Shutdown signal received");
    Ok(())
}

fn print_table(table: &TelemetryTable, name: &str) {
    println!("\n=== {} ===", name);
    for (key, value) in table.entries(name) {
        println!("  {} = {:?}", key, value);
    }
}
