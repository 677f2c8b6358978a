//! Ingestion through the ordered decision loop

use alerting::{AlarmTransition, RecordingSink, SinkCommand};
use dms::FrameRecord;
use monitor::ingest::{parse_line, run_pipeline, spawn_reader, spawn_replay};
use monitor::{simulate, Session, Settings};
use std::io::{Cursor, Read};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::sync::mpsc;

fn jsonl(pattern: &str) -> String {
    simulate::observations(pattern, 0)
        .unwrap()
        .iter()
        .map(|o| serde_json::to_string(o).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Input that blocks until its sender is dropped, like an idle terminal
struct StalledInput(std_mpsc::Receiver<Vec<u8>>);

impl Read for StalledInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.recv() {
            Ok(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Err(_) => Ok(0),
        }
    }
}

fn records(out: &[u8]) -> Vec<FrameRecord> {
    std::str::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn replays_lines_in_order_and_skips_garbage() {
    let mut input = jsonl("OCC");
    input.push_str("\nnot json\n\n");
    input.push_str(&jsonl("NO"));

    let settings = Settings::default();
    let mut session = Session::new(&settings, RecordingSink::new()).unwrap();
    let (tx, rx) = mpsc::channel(2);

    let reader = spawn_reader(Cursor::new(input.into_bytes()), tx).unwrap();
    let mut out = Vec::new();
    let end = run_pipeline(&mut session, rx, &mut out, std::future::pending())
        .await
        .unwrap();

    let stats = reader.join().unwrap().unwrap();
    assert_eq!(stats.accepted, 5);
    assert_eq!(stats.skipped, 1);
    assert_eq!(end.frames, 5);
    assert!(!end.interrupted);

    let statuses: Vec<String> = records(&out).into_iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec!["Active", "Active", "Active", "NoFace", "Active"]);

    assert_eq!(
        session.alarm().sink().commands,
        vec![SinkCommand::StartLoop("alarm.wav".into()), SinkCommand::Stop]
    );
}

#[tokio::test]
async fn drowsy_run_latches_alarm_once() {
    let mut settings = Settings::default();
    settings.dms.consec_frames_threshold = 3;
    let mut session = Session::new(&settings, RecordingSink::new()).unwrap();

    let (tx, rx) = mpsc::channel(4);
    let replay = spawn_replay(simulate::observations("CCCCCO", 0).unwrap(), tx).unwrap();

    let mut out = Vec::new();
    run_pipeline(&mut session, rx, &mut out, std::future::pending())
        .await
        .unwrap();

    assert_eq!(replay.join().unwrap().unwrap().accepted, 6);

    let recs = records(&out);
    assert_eq!(recs[1].status, "Active");
    assert_eq!(recs[2].status, "Drowsy");
    assert!(recs[2].alert);
    assert_eq!(recs[5].status, "Active");

    let summary = session.finish();
    assert_eq!(summary.alarm_starts, 1);
    assert_eq!(summary.alarm_stops, 1);
    assert_eq!(summary.statuses.drowsy, 3);
}

#[tokio::test]
async fn shutdown_stops_between_frames() {
    let mut session = Session::new(&Settings::default(), RecordingSink::new()).unwrap();
    let (_tx, rx) = mpsc::channel::<dms::FaceObservation>(1);

    let mut out = Vec::new();
    let end = run_pipeline(&mut session, rx, &mut out, async {})
        .await
        .unwrap();

    assert!(end.interrupted);
    assert_eq!(end.frames, 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn shutdown_returns_while_reader_is_blocked() {
    let mut session = Session::new(&Settings::default(), RecordingSink::new()).unwrap();
    let (feed, stalled) = std_mpsc::channel::<Vec<u8>>();
    let (tx, rx) = mpsc::channel(1);
    let reader = spawn_reader(StalledInput(stalled), tx).unwrap();

    let mut out = Vec::new();
    let end = run_pipeline(
        &mut session,
        rx,
        &mut out,
        tokio::time::sleep(Duration::from_millis(20)),
    )
    .await
    .unwrap();

    assert!(end.interrupted);
    assert_eq!(end.frames, 0);
    assert!(!reader.is_finished());

    drop(feed);
    let stats = reader.join().unwrap().unwrap();
    assert_eq!(stats.lines, 0);
}

#[test]
fn parse_line_handles_blank_and_minimal() {
    assert_eq!(parse_line("   ").unwrap(), None);
    let obs = parse_line(r#"{"landmarks_present": false, "yaw": 12.5}"#)
        .unwrap()
        .unwrap();
    assert!(!obs.landmarks_present);
    assert_eq!(obs.yaw, 12.5);
    assert!(parse_line("{").is_err());
}

#[test]
fn session_frame_reports_transition() {
    let mut session = Session::new(&Settings::default(), RecordingSink::new()).unwrap();
    let frame = session.process(&dms::FaceObservation::no_face());
    assert_eq!(frame.transition, AlarmTransition::Started);
}
