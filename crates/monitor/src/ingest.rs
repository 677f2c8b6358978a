//! Observation ingestion and the ordered decision loop
//!
//! A reader thread parses JSON lines into observations and sends them over a
//! bounded channel. The single consumer applies them strictly in arrival
//! order, since the closed-eye run and pose window depend on ordering.
//!
//! Readers run on plain OS threads rather than the runtime's blocking pool:
//! a read parked on an idle stdin must not keep the process alive after the
//! decision loop has been shut down.

use alerting::AudioSink;
use dms::{FaceObservation, FrameRecord};
use std::future::Future;
use std::io::{BufRead, BufReader, Read, Write};
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::session::Session;

/// Counters from the reader thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: u64,
    pub accepted: u64,
    pub skipped: u64,
}

/// Handle to a running reader thread
pub type IngestHandle = thread::JoinHandle<std::io::Result<IngestStats>>;

/// Parse one input line; blank lines yield `Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<FaceObservation>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Read JSON-lines observations and forward them in order.
///
/// Blocks the calling thread. Malformed lines are logged and skipped. Stops
/// at end of input or when the consumer goes away.
pub fn read_observations<R: Read>(
    reader: R,
    tx: mpsc::Sender<FaceObservation>,
) -> std::io::Result<IngestStats> {
    let mut stats = IngestStats::default();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        stats.lines += 1;
        match parse_line(&line) {
            Ok(Some(obs)) => {
                if tx.blocking_send(obs).is_err() {
                    debug!("Decision loop closed, stopping reader");
                    break;
                }
                stats.accepted += 1;
            }
            Ok(None) => {}
            Err(e) => {
                stats.skipped += 1;
                warn!(line = stats.lines, "Skipping malformed observation: {}", e);
            }
        }
    }

    info!(
        lines = stats.lines,
        accepted = stats.accepted,
        skipped = stats.skipped,
        "Input exhausted"
    );
    Ok(stats)
}

/// Run [`read_observations`] on a dedicated thread
pub fn spawn_reader<R>(
    reader: R,
    tx: mpsc::Sender<FaceObservation>,
) -> std::io::Result<IngestHandle>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("ingest".into())
        .spawn(move || read_observations(reader, tx))
}

/// Feed a fixed list of observations into the channel from a dedicated thread
pub fn spawn_replay(
    observations: Vec<FaceObservation>,
    tx: mpsc::Sender<FaceObservation>,
) -> std::io::Result<IngestHandle> {
    thread::Builder::new().name("replay".into()).spawn(move || {
        let mut stats = IngestStats::default();
        for obs in observations {
            stats.lines += 1;
            if tx.blocking_send(obs).is_err() {
                break;
            }
            stats.accepted += 1;
        }
        Ok(stats)
    })
}

/// How the decision loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineEnd {
    pub frames: u64,
    /// Stopped by `shutdown` rather than end of input
    pub interrupted: bool,
}

/// Consume observations until the channel closes or `shutdown` resolves,
/// writing one [`FrameRecord`] JSON line per frame to `out`.
pub async fn run_pipeline<S, W, F>(
    session: &mut Session<S>,
    mut rx: mpsc::Receiver<FaceObservation>,
    mut out: W,
    shutdown: F,
) -> anyhow::Result<PipelineEnd>
where
    S: AudioSink,
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut frames = 0u64;
    let mut interrupted = false;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping between frames");
                interrupted = true;
                break;
            }
            next = rx.recv() => {
                let Some(obs) = next else { break };
                let frame = session.process(&obs);
                frames += 1;

                serde_json::to_writer(&mut out, &FrameRecord::now(&frame.analysis))?;
                out.write_all(b"\n")?;
            }
        }
    }

    out.flush()?;
    Ok(PipelineEnd { frames, interrupted })
}
