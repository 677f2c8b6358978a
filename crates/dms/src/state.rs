//! Driver state tracking

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use crate::analysis::{FrameAnalysis, FrameSignal};
use crate::debounce::DrowsinessDebouncer;
use crate::landmarks::FaceObservation;
use crate::pose::PoseBucketizer;
use crate::smoother::PoseSmoother;
use crate::{DmsConfig, DmsError};

/// Per-frame driver verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriverStatus {
    #[default]
    Active,
    Drowsy,
    NoFace,
}

impl DriverStatus {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "Active",
            DriverStatus::Drowsy => "Drowsy",
            DriverStatus::NoFace => "NoFace",
        }
    }

    /// Drowsy and NoFace both sound the alarm
    pub fn is_alarming(&self) -> bool {
        !matches!(self, DriverStatus::Active)
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composes EAR, debouncing and pose smoothing into one verdict per frame.
///
/// Frames must be fed in arrival order; both the closed-eye run and the pose
/// window are order-sensitive.
#[derive(Debug, Clone)]
pub struct DriverStateMachine {
    config: DmsConfig,
    bucketizer: PoseBucketizer,
    smoother: PoseSmoother,
    debouncer: DrowsinessDebouncer,
    last_status: Option<DriverStatus>,
    frames: u64,
}

impl DriverStateMachine {
    /// Validate the configuration and start a session
    pub fn new(config: DmsConfig) -> Result<Self, DmsError> {
        config.validate()?;
        info!(
            ear_threshold = config.closed_ear_threshold,
            consec_frames = config.consec_frames_threshold,
            pose_window = config.pose_window,
            reset_on_face_loss = config.reset_on_face_loss,
            "Driver state machine created"
        );

        Ok(Self {
            bucketizer: PoseBucketizer::new(&config),
            smoother: PoseSmoother::new(config.pose_window)?,
            debouncer: DrowsinessDebouncer::new(
                config.closed_ear_threshold,
                config.consec_frames_threshold,
            ),
            last_status: None,
            frames: 0,
            config,
        })
    }

    /// Analyze one collaborator observation
    pub fn process_observation(&mut self, obs: &FaceObservation) -> FrameAnalysis {
        self.process(&FrameSignal::from_observation(obs))
    }

    /// Analyze one frame signal
    pub fn process(&mut self, signal: &FrameSignal) -> FrameAnalysis {
        self.frames += 1;
        let avg_ear = signal.avg_ear();

        let analysis = if !signal.face_detected || avg_ear.is_none() {
            if self.config.reset_on_face_loss {
                self.debouncer.reset();
            }
            FrameAnalysis {
                status: DriverStatus::NoFace,
                avg_ear,
                smoothed_pose: None,
                attentive: None,
                closed_frames: self.debouncer.counter(),
            }
        } else {
            let closed = self.debouncer.eyes_closed(signal.left_ear, signal.right_ear);
            let status = self.debouncer.update(closed);

            let raw_pose = self.bucketizer.classify(signal.pitch, signal.yaw);
            let smoothed = self.smoother.push(raw_pose);

            FrameAnalysis {
                status,
                avg_ear,
                smoothed_pose: Some(smoothed),
                attentive: Some(self.bucketizer.is_attentive(signal.pitch, signal.yaw)),
                closed_frames: self.debouncer.counter(),
            }
        };

        if self.last_status != Some(analysis.status) {
            info!(
                frame = self.frames,
                from = ?self.last_status,
                to = %analysis.status,
                "Driver status changed"
            );
            self.last_status = Some(analysis.status);
        }
        debug!(
            frame = self.frames,
            status = %analysis.status,
            avg_ear = ?analysis.avg_ear,
            pose = ?analysis.smoothed_pose,
            closed_frames = analysis.closed_frames,
            "Frame analyzed"
        );

        analysis
    }

    /// Status of the last processed frame
    pub fn last_status(&self) -> Option<DriverStatus> {
        self.last_status
    }

    /// Frames processed since the session started
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Reset driver state (explicit restart)
    pub fn restart(&mut self) {
        info!("Driver state machine restarted");
        self.debouncer.reset();
        self.smoother.reset();
        self.last_status = None;
        self.frames = 0;
    }
}
