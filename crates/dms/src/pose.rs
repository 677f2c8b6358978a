//! Head-pose bucketing

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::DmsConfig;

/// Discrete head orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoseLabel {
    Forward,
    Left,
    Right,
    Down,
    Up,
}

impl PoseLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseLabel::Forward => "Forward",
            PoseLabel::Left => "Left",
            PoseLabel::Right => "Right",
            PoseLabel::Down => "Down",
            PoseLabel::Up => "Up",
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps pitch/yaw (degrees) onto a [`PoseLabel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseBucketizer {
    yaw_threshold: f32,
    pitch_down_threshold: f32,
    pitch_up_threshold: f32,
}

impl PoseBucketizer {
    pub fn new(config: &DmsConfig) -> Self {
        Self {
            yaw_threshold: config.yaw_threshold,
            pitch_down_threshold: config.pitch_down_threshold,
            pitch_up_threshold: config.pitch_up_threshold,
        }
    }

    /// Classify a head orientation.
    ///
    /// Yaw is checked before pitch, so a head turned sideways and tilted
    /// down reports Left/Right.
    pub fn classify(&self, pitch: f32, yaw: f32) -> PoseLabel {
        if yaw < -self.yaw_threshold {
            PoseLabel::Right
        } else if yaw > self.yaw_threshold {
            PoseLabel::Left
        } else if pitch > self.pitch_down_threshold {
            PoseLabel::Down
        } else if pitch < self.pitch_up_threshold {
            PoseLabel::Up
        } else {
            PoseLabel::Forward
        }
    }

    /// Whether the head is strictly inside the forward band on both axes
    pub fn is_attentive(&self, pitch: f32, yaw: f32) -> bool {
        -self.yaw_threshold < yaw
            && yaw < self.yaw_threshold
            && self.pitch_up_threshold < pitch
            && pitch < self.pitch_down_threshold
    }
}

impl Default for PoseBucketizer {
    fn default() -> Self {
        Self::new(&DmsConfig::default())
    }
}
