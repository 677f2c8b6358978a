//! Running latency and FPS statistics

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Timing of one completed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Entry to exit of the decision pipeline
    pub latency_ms: f64,
    /// Reciprocal of the interval since the previous frame entry
    pub fps: Option<f64>,
}

/// Running sums and counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceAccumulator {
    pub frames: u64,
    pub latency_sum_ms: f64,
    pub max_latency_ms: f64,
    pub fps_sum: f64,
    pub fps_samples: u64,
}

impl PerformanceAccumulator {
    fn record(&mut self, timing: &FrameTiming) {
        self.frames += 1;
        self.latency_sum_ms += timing.latency_ms;
        self.max_latency_ms = self.max_latency_ms.max(timing.latency_ms);
        if let Some(fps) = timing.fps {
            self.fps_sum += fps;
            self.fps_samples += 1;
        }
    }

    /// Mean latency, `None` before the first frame
    pub fn average_latency_ms(&self) -> Option<f64> {
        (self.frames > 0).then(|| self.latency_sum_ms / self.frames as f64)
    }

    /// Mean instantaneous FPS, `None` until two frames have been seen
    pub fn average_fps(&self) -> Option<f64> {
        (self.fps_samples > 0).then(|| self.fps_sum / self.fps_samples as f64)
    }
}

/// Point-in-time view of the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub frames: u64,
    pub average_fps: Option<f64>,
    pub average_latency_ms: Option<f64>,
    pub last_fps: Option<f64>,
    pub last_latency_ms: Option<f64>,
}

/// Final session report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub frames: u64,
    pub average_fps: f64,
    pub average_latency_ms: f64,
    pub max_latency_ms: f64,
    pub elapsed_secs: f64,
}

/// Wraps each frame's decision call with entry/exit timestamps
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    accumulator: PerformanceAccumulator,
    /// Entry time of the frame in flight
    frame_start: Option<Instant>,
    /// Entry time of the previous frame
    prev_start: Option<Instant>,
    /// FPS computed at the current frame's entry
    pending_fps: Option<f64>,
    last: Option<FrameTiming>,
    session_start: Instant,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            accumulator: PerformanceAccumulator::default(),
            frame_start: None,
            prev_start: None,
            pending_fps: None,
            last: None,
            session_start: Instant::now(),
        }
    }

    /// Mark pipeline entry now
    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    /// Mark pipeline entry at `now`
    pub fn begin_frame_at(&mut self, now: Instant) {
        self.pending_fps = self.prev_start.and_then(|prev| {
            let interval = now.saturating_duration_since(prev).as_secs_f64();
            (interval > 0.0).then(|| 1.0 / interval)
        });
        self.prev_start = Some(now);
        self.frame_start = Some(now);
    }

    /// Mark pipeline exit now
    pub fn end_frame(&mut self) -> Option<FrameTiming> {
        self.end_frame_at(Instant::now())
    }

    /// Mark pipeline exit at `now`; `None` if no frame was begun
    pub fn end_frame_at(&mut self, now: Instant) -> Option<FrameTiming> {
        let start = self.frame_start.take()?;
        let latency = now.saturating_duration_since(start);
        let timing = FrameTiming {
            latency_ms: duration_ms(latency),
            fps: self.pending_fps.take(),
        };

        self.accumulator.record(&timing);
        self.last = Some(timing);
        publish(&timing);
        debug!(latency_ms = timing.latency_ms, fps = ?timing.fps, "Frame timed");

        Some(timing)
    }

    /// Time one call of the decision pipeline
    pub fn measure<R>(&mut self, frame: impl FnOnce() -> R) -> (R, FrameTiming) {
        let start = Instant::now();
        self.begin_frame_at(start);
        let out = frame();
        let timing = self
            .end_frame_at(Instant::now())
            .unwrap_or(FrameTiming { latency_ms: 0.0, fps: None });
        (out, timing)
    }

    /// Current averages
    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot {
            frames: self.accumulator.frames,
            average_fps: self.accumulator.average_fps(),
            average_latency_ms: self.accumulator.average_latency_ms(),
            last_fps: self.last.and_then(|t| t.fps),
            last_latency_ms: self.last.map(|t| t.latency_ms),
        }
    }

    pub fn accumulator(&self) -> &PerformanceAccumulator {
        &self.accumulator
    }

    /// Flush the running sums into the session summary
    pub fn finish(&self) -> PerformanceSummary {
        let summary = PerformanceSummary {
            frames: self.accumulator.frames,
            average_fps: self.accumulator.average_fps().unwrap_or(0.0),
            average_latency_ms: self.accumulator.average_latency_ms().unwrap_or(0.0),
            max_latency_ms: self.accumulator.max_latency_ms,
            elapsed_secs: self.session_start.elapsed().as_secs_f64(),
        };
        info!(
            frames = summary.frames,
            "Average FPS: {:.2}, average latency: {:.3}ms",
            summary.average_fps,
            summary.average_latency_ms
        );
        summary
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn publish(timing: &FrameTiming) {
    metrics::counter!("dms_frames_total").increment(1);
    metrics::histogram!("dms_frame_latency_ms").record(timing.latency_ms);
    if let Some(fps) = timing.fps {
        metrics::gauge!("dms_instant_fps").set(fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(monitor: &mut PerformanceMonitor, base: Instant, entry_ms: u64, latency_ms: u64) -> FrameTiming {
        let entry = base + Duration::from_millis(entry_ms);
        monitor.begin_frame_at(entry);
        monitor
            .end_frame_at(entry + Duration::from_millis(latency_ms))
            .unwrap()
    }

    #[test]
    fn test_first_frame_has_no_fps() {
        let mut m = PerformanceMonitor::new();
        let timing = run(&mut m, Instant::now(), 0, 5);
        assert_eq!(timing.fps, None);
        assert!((timing.latency_ms - 5.0).abs() < 1e-6);
        assert_eq!(m.snapshot().average_fps, None);
    }

    #[test]
    fn test_fps_from_entry_interval() {
        let mut m = PerformanceMonitor::new();
        let base = Instant::now();
        run(&mut m, base, 0, 2);
        let t = run(&mut m, base, 100, 4);
        assert!((t.fps.unwrap() - 10.0).abs() < 1e-6);

        let t = run(&mut m, base, 150, 6);
        assert!((t.fps.unwrap() - 20.0).abs() < 1e-6);

        let snap = m.snapshot();
        assert_eq!(snap.frames, 3);
        assert!((snap.average_fps.unwrap() - 15.0).abs() < 1e-6);
        assert!((snap.average_latency_ms.unwrap() - 4.0).abs() < 1e-6);
        assert!((snap.last_latency_ms.unwrap() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_end_without_begin() {
        let mut m = PerformanceMonitor::new();
        assert!(m.end_frame().is_none());
        assert_eq!(m.accumulator().frames, 0);
    }

    #[test]
    fn test_measure_passes_output_through() {
        let mut m = PerformanceMonitor::new();
        let (out, timing) = m.measure(|| 41 + 1);
        assert_eq!(out, 42);
        assert!(timing.latency_ms >= 0.0);
        assert_eq!(m.accumulator().frames, 1);
    }

    #[test]
    fn test_summary() {
        let mut m = PerformanceMonitor::new();
        let base = Instant::now();
        run(&mut m, base, 0, 1);
        run(&mut m, base, 50, 9);

        let summary = m.finish();
        assert_eq!(summary.frames, 2);
        assert!((summary.average_fps - 20.0).abs() < 1e-6);
        assert!((summary.average_latency_ms - 5.0).abs() < 1e-6);
        assert!((summary.max_latency_ms - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_summary() {
        let summary = PerformanceMonitor::new().finish();
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.average_fps, 0.0);
    }
}
