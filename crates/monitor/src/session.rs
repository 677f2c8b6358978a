//! One monitoring session: decision core, alarm latch and timing together

use alerting::{AlarmController, AlarmTransition, AudioSink};
use dms::{DriverStateMachine, DriverStatus, FaceObservation, FrameAnalysis};
use perf_monitor::{FrameTiming, PerformanceMonitor, PerformanceSummary};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use crate::settings::Settings;

/// Result of pushing one observation through the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionFrame {
    pub analysis: FrameAnalysis,
    pub transition: AlarmTransition,
    pub timing: FrameTiming,
}

/// Frames seen per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active: u64,
    pub drowsy: u64,
    pub no_face: u64,
}

impl StatusCounts {
    fn record(&mut self, status: DriverStatus) {
        match status {
            DriverStatus::Active => self.active += 1,
            DriverStatus::Drowsy => self.drowsy += 1,
            DriverStatus::NoFace => self.no_face += 1,
        }
    }
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub statuses: StatusCounts,
    pub alarm_starts: u64,
    pub alarm_stops: u64,
    pub performance: PerformanceSummary,
}

/// Owns every stateful component of a session
pub struct Session<S: AudioSink> {
    id: Uuid,
    state_machine: DriverStateMachine,
    alarm: AlarmController<S>,
    perf: PerformanceMonitor,
    statuses: StatusCounts,
}

impl<S: AudioSink> Session<S> {
    /// Start a session; fails on invalid thresholds
    pub fn new(settings: &Settings, sink: S) -> Result<Self, dms::DmsError> {
        let state_machine = DriverStateMachine::new(settings.dms.clone())?;
        let id = Uuid::new_v4();
        info!(session = %id, "Monitoring session started");

        Ok(Self {
            id,
            state_machine,
            alarm: AlarmController::new(settings.alarm.clone(), sink),
            perf: PerformanceMonitor::new(),
            statuses: StatusCounts::default(),
        })
    }

    /// Run the full per-frame decision for one observation
    pub fn process(&mut self, obs: &FaceObservation) -> SessionFrame {
        let state_machine = &mut self.state_machine;
        let alarm = &mut self.alarm;

        let ((analysis, transition), timing) = self.perf.measure(|| {
            let analysis = state_machine.process_observation(obs);
            let transition = alarm.update(analysis.status);
            (analysis, transition)
        });

        self.statuses.record(analysis.status);
        SessionFrame {
            analysis,
            transition,
            timing,
        }
    }

    pub fn alarm(&self) -> &AlarmController<S> {
        &self.alarm
    }

    /// Silence the alarm and produce the summary
    pub fn finish(mut self) -> SessionSummary {
        self.alarm.shutdown();
        let summary = SessionSummary {
            session_id: self.id,
            statuses: self.statuses,
            alarm_starts: self.alarm.starts(),
            alarm_stops: self.alarm.stops(),
            performance: self.perf.finish(),
        };
        info!(
            session = %self.id,
            frames = summary.performance.frames,
            alarm_starts = summary.alarm_starts,
            "Monitoring session finished"
        );
        summary
    }
}
