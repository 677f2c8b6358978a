//! Driver Monitoring System (DMS)
//!
//! Temporal decision layer turning per-frame face geometry into a stable
//! driver-alertness verdict:
//! - Eye Aspect Ratio from six eye landmarks
//! - Consecutive-frame debouncing of eye closure
//! - Head-pose bucketing with majority-vote smoothing
//! - Face-presence handling (NoFace)

pub mod analysis;
pub mod config;
pub mod debounce;
pub mod ear;
pub mod landmarks;
pub mod pose;
pub mod smoother;
pub mod state;

pub use analysis::{FrameAnalysis, FrameRecord, FrameSignal};
pub use config::DmsConfig;
pub use debounce::DrowsinessDebouncer;
pub use ear::{average_ear, eye_aspect_ratio};
pub use landmarks::{EyeLandmarks, FaceObservation, LandmarkPoint};
pub use pose::{PoseBucketizer, PoseLabel};
pub use smoother::PoseSmoother;
pub use state::{DriverStateMachine, DriverStatus};

use ring_buffer::RingBufferError;
use thiserror::Error;

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pose window error: {0}")]
    Window(#[from] RingBufferError),
}
