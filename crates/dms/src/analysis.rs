//! Per-frame signals and analysis results

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use crate::ear::{average_ear, optional_ear};
use crate::landmarks::FaceObservation;
use crate::pose::PoseLabel;
use crate::state::DriverStatus;

/// Display format of [`FrameRecord::timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Measurements derived once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSignal {
    pub left_ear: Option<f32>,
    pub right_ear: Option<f32>,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub face_detected: bool,
}

impl FrameSignal {
    /// Derive EAR values from the collaborator's landmarks
    pub fn from_observation(obs: &FaceObservation) -> Self {
        Self {
            left_ear: optional_ear(obs.left_eye.as_ref()),
            right_ear: optional_ear(obs.right_eye.as_ref()),
            pitch: obs.pitch,
            yaw: obs.yaw,
            roll: obs.roll,
            face_detected: obs.landmarks_present,
        }
    }

    /// Frame-level EAR (mean of the eyes that are present)
    pub fn avg_ear(&self) -> Option<f32> {
        average_ear(self.left_ear, self.right_ear)
    }
}

/// Driver state verdict for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Authoritative status
    pub status: DriverStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ear: Option<f32>,

    /// Majority-vote head orientation, absent without a face
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_pose: Option<PoseLabel>,

    /// Raw head inside the forward band, absent without a face
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attentive: Option<bool>,

    /// Current closed-eye run length
    pub closed_frames: u32,
}

impl FrameAnalysis {
    /// Whether this frame calls for the alarm
    pub fn needs_alarm(&self) -> bool {
        self.status.is_alarming()
    }
}

/// Render-facing view of a frame (data only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub status: String,
    pub avg_ear: Option<f32>,
    pub pose_label: Option<String>,
    pub timestamp: String,
    /// Draw the status emblem in the warning colour
    pub alert: bool,
    pub attentive: Option<bool>,
}

impl FrameRecord {
    pub fn new(analysis: &FrameAnalysis, at: DateTime<Local>) -> Self {
        Self {
            status: analysis.status.as_str().to_string(),
            avg_ear: analysis.avg_ear,
            pose_label: analysis.smoothed_pose.map(|p| p.as_str().to_string()),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            alert: analysis.needs_alarm(),
            attentive: analysis.attentive,
        }
    }

    /// Record stamped with the current local time
    pub fn now(analysis: &FrameAnalysis) -> Self {
        Self::new(analysis, Local::now())
    }
}
