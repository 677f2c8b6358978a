//! DMS configuration

use serde::{Deserialize, Serialize};
use crate::DmsError;

/// DMS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmsConfig {
    /// Both eyes below this EAR count as closed (strict less-than)
    pub closed_ear_threshold: f32,

    /// Consecutive closed-eye frames before the driver is drowsy
    pub consec_frames_threshold: u32,

    /// Yaw deviation (degrees) beyond which the head is turned left/right
    pub yaw_threshold: f32,

    /// Pitch (degrees) above which the head is tilted down
    pub pitch_down_threshold: f32,

    /// Pitch (degrees) below which the head is tilted up
    pub pitch_up_threshold: f32,

    /// Number of recent pose labels in the majority vote
    pub pose_window: usize,

    /// Treat a face-absent frame as a break in the closed-eye run
    pub reset_on_face_loss: bool,
}

impl Default for DmsConfig {
    fn default() -> Self {
        Self {
            closed_ear_threshold: 0.25,
            consec_frames_threshold: 20, // ~2s at 10fps
            yaw_threshold: 25.0,
            pitch_down_threshold: 15.0,
            pitch_up_threshold: -10.0,
            pose_window: 5,
            reset_on_face_loss: true,
        }
    }
}

impl DmsConfig {
    /// Create strict config (react sooner)
    pub fn strict() -> Self {
        Self {
            closed_ear_threshold: 0.27,
            consec_frames_threshold: 10,
            yaw_threshold: 20.0,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerate longer closures)
    pub fn lenient() -> Self {
        Self {
            closed_ear_threshold: 0.22,
            consec_frames_threshold: 30,
            yaw_threshold: 35.0,
            ..Default::default()
        }
    }

    /// Reject configurations a session must not start with
    pub fn validate(&self) -> Result<(), DmsError> {
        if !self.closed_ear_threshold.is_finite() || self.closed_ear_threshold <= 0.0 {
            return Err(DmsError::Config(format!(
                "closed_ear_threshold must be a positive number, got {}",
                self.closed_ear_threshold
            )));
        }
        if self.consec_frames_threshold == 0 {
            return Err(DmsError::Config(
                "consec_frames_threshold must be at least 1".into(),
            ));
        }
        if !self.yaw_threshold.is_finite() || self.yaw_threshold < 0.0 {
            return Err(DmsError::Config(format!(
                "yaw_threshold must be a non-negative number, got {}",
                self.yaw_threshold
            )));
        }
        if !self.pitch_down_threshold.is_finite() || !self.pitch_up_threshold.is_finite() {
            return Err(DmsError::Config("pitch thresholds must be finite".into()));
        }
        if self.pitch_up_threshold >= self.pitch_down_threshold {
            return Err(DmsError::Config(format!(
                "pitch_up_threshold ({}) must be below pitch_down_threshold ({})",
                self.pitch_up_threshold, self.pitch_down_threshold
            )));
        }
        if self.pose_window == 0 {
            return Err(DmsError::Config("pose_window must be at least 1".into()));
        }
        Ok(())
    }
}
