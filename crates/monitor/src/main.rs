//! NeuroDrive - Main Entry Point
//!
//! Usage:
//!   neurodrive observations.jsonl           # Replay collaborator output
//!   neurodrive < observations.jsonl         # Read from stdin
//!   neurodrive --simulate "OOCCCCN" --tail 5
//!   neurodrive -c neurodrive.toml --summary summary.json obs.jsonl

use anyhow::Context;
use clap::Parser;
use monitor::ingest::{run_pipeline, spawn_reader, spawn_replay, IngestHandle};
use monitor::{init_logging, simulate, LogFormat, LoggingAudioSink, Session, Settings};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "neurodrive")]
#[command(author, version, about = "Driver alertness monitor: eye-closure and head-pose decision pipeline", long_about = None)]
struct Args {
    /// JSON-lines face observations (default: stdin)
    input: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a synthetic eye-state pattern instead of reading input (O/C/N)
    #[arg(long, conflicts_with = "input")]
    simulate: Option<String>,

    /// Open-eye frames appended after the simulated pattern
    #[arg(long, default_value = "1", requires = "simulate")]
    tail: usize,

    /// Write the session summary as JSON to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Override the closed-eye EAR threshold
    #[arg(long)]
    ear_threshold: Option<f32>,

    /// Override the consecutive closed-frame threshold
    #[arg(long)]
    consec_frames: Option<u32>,

    /// Override the pose smoothing window
    #[arg(long)]
    pose_window: Option<usize>,

    /// Keep the closed-eye run across face-absent frames
    #[arg(long)]
    keep_run_on_face_loss: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(v) = self.ear_threshold {
            settings.dms.closed_ear_threshold = v;
        }
        if let Some(v) = self.consec_frames {
            settings.dms.consec_frames_threshold = v;
        }
        if let Some(v) = self.pose_window {
            settings.dms.pose_window = v;
        }
        if self.keep_run_on_face_loss {
            settings.dms.reset_on_face_loss = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level, args.log_format)?;

    info!("=== NeuroDrive v{} ===", env!("CARGO_PKG_VERSION"));

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    args.apply_overrides(&mut settings);

    let mut session = Session::new(&settings, LoggingAudioSink::new())
        .context("Invalid configuration, session not started")?;

    let (tx, rx) = mpsc::channel(settings.channel_capacity.max(1));

    let ingest: IngestHandle = if let Some(pattern) = &args.simulate {
        let observations = simulate::observations(pattern, args.tail)?;
        info!(frames = observations.len(), "Replaying simulated pattern");
        spawn_replay(observations, tx)?
    } else if let Some(path) = &args.input {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        spawn_reader(file, tx)?
    } else {
        spawn_reader(std::io::stdin(), tx)?
    };

    let stdout = std::io::stdout();
    let end = run_pipeline(&mut session, rx, stdout.lock(), async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    // An interrupted reader may be parked on stdin; it is left detached and
    // ends with the process.
    if !end.interrupted {
        match ingest.join() {
            Ok(Ok(stats)) => info!(
                frames = end.frames,
                lines = stats.lines,
                skipped = stats.skipped,
                "Ingestion complete"
            ),
            Ok(Err(e)) => warn!("Input read failed: {}", e),
            Err(_) => warn!("Ingestion thread panicked"),
        }
    }

    let summary = session.finish();
    if let Some(path) = &args.summary {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
