//! Eye Aspect Ratio (EAR)
//!
//! `EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|)`
//!
//! Open eyes sit around 0.3, a closed eye drops towards 0. Degenerate
//! geometry yields `None` instead of an error.

use crate::landmarks::EyeLandmarks;

/// Compute the EAR of one eye
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> Option<f32> {
    let width = eye.p(1).distance(&eye.p(4));
    if width <= 0.0 || !width.is_finite() {
        return None;
    }

    let vertical = eye.p(2).distance(&eye.p(6)) + eye.p(3).distance(&eye.p(5));
    let ear = vertical / (2.0 * width);

    ear.is_finite().then_some(ear)
}

/// EAR for an eye that may be missing
pub fn optional_ear(eye: Option<&EyeLandmarks>) -> Option<f32> {
    eye.and_then(eye_aspect_ratio)
}

/// Mean of the EAR values that are present
pub fn average_ear(left: Option<f32>, right: Option<f32>) -> Option<f32> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l + r) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}
