//! Consecutive-frame debouncing of eye closure

use crate::state::DriverStatus;

/// Counts the current run of closed-eye frames
#[derive(Debug, Clone)]
pub struct DrowsinessDebouncer {
    closed_ear_threshold: f32,
    consec_frames_threshold: u32,
    counter: u32,
}

impl DrowsinessDebouncer {
    pub fn new(closed_ear_threshold: f32, consec_frames_threshold: u32) -> Self {
        Self {
            closed_ear_threshold,
            consec_frames_threshold,
            counter: 0,
        }
    }

    /// Both eyes present and strictly below the threshold
    pub fn eyes_closed(&self, left_ear: Option<f32>, right_ear: Option<f32>) -> bool {
        match (left_ear, right_ear) {
            (Some(l), Some(r)) => l < self.closed_ear_threshold && r < self.closed_ear_threshold,
            _ => false,
        }
    }

    /// Advance one frame and return the resulting status (Active or Drowsy)
    pub fn update(&mut self, eyes_closed: bool) -> DriverStatus {
        if eyes_closed {
            self.counter = self.counter.saturating_add(1);
        } else {
            self.counter = 0;
        }
        self.status()
    }

    /// Status implied by the current run length
    pub fn status(&self) -> DriverStatus {
        if self.counter >= self.consec_frames_threshold {
            DriverStatus::Drowsy
        } else {
            DriverStatus::Active
        }
    }

    /// Length of the current closed-eye run
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
