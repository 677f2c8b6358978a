//! Synthetic eye-state replay
//!
//! Pattern symbols: `O` eyes open, `C` eyes closed, `N` no face. Spaces
//! are ignored. A run of `tail` open frames follows the pattern.

use dms::{EyeLandmarks, FaceObservation, LandmarkPoint};
use thiserror::Error;

/// EAR of a synthetic open eye
pub const OPEN_EAR: f32 = 0.32;

/// EAR of a synthetic closed eye
pub const CLOSED_EAR: f32 = 0.08;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulateError {
    #[error("Invalid symbol {symbol:?} at position {position} (expected O, C or N)")]
    InvalidSymbol { symbol: char, position: usize },
}

/// Expand a pattern into observations
pub fn observations(pattern: &str, tail: usize) -> Result<Vec<FaceObservation>, SimulateError> {
    let mut frames = Vec::with_capacity(pattern.len() + tail);
    for (position, symbol) in pattern.chars().enumerate() {
        let obs = match symbol.to_ascii_uppercase() {
            'O' => face_with_ear(OPEN_EAR),
            'C' => face_with_ear(CLOSED_EAR),
            'N' => FaceObservation::no_face(),
            c if c.is_whitespace() => continue,
            _ => return Err(SimulateError::InvalidSymbol { symbol, position }),
        };
        frames.push(obs);
    }
    frames.extend((0..tail).map(|_| face_with_ear(OPEN_EAR)));
    Ok(frames)
}

/// Forward-facing face whose eyes both measure `ear`
pub fn face_with_ear(ear: f32) -> FaceObservation {
    let eye = eye_with_ear(ear);
    FaceObservation {
        landmarks_present: true,
        left_eye: Some(eye),
        right_eye: Some(eye),
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    }
}

fn eye_with_ear(ear: f32) -> EyeLandmarks {
    // Width 4, lid gap 4*ear on both vertical pairs
    let h = ear * 2.0;
    EyeLandmarks::new([
        LandmarkPoint::new(0.0, 0.0),
        LandmarkPoint::new(1.0, -h),
        LandmarkPoint::new(3.0, -h),
        LandmarkPoint::new(4.0, 0.0),
        LandmarkPoint::new(3.0, h),
        LandmarkPoint::new(1.0, h),
    ])
}
