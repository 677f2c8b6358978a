//! Facial landmark types supplied by the geometry collaborator

use serde::{Deserialize, Serialize};

/// Face-mesh indices of the left eye, ordered p1..p6
pub const LEFT_EYE_INDICES: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Face-mesh indices of the right eye, ordered p1..p6
pub const RIGHT_EYE_INDICES: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// 2-D landmark coordinate (normalized or pixel space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &LandmarkPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Six ordered eye landmarks.
///
/// p1 and p4 are the eye corners, p2/p3 sit on the upper lid and p6/p5
/// face them on the lower lid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EyeLandmarks(pub [LandmarkPoint; 6]);

impl EyeLandmarks {
    pub fn new(points: [LandmarkPoint; 6]) -> Self {
        Self(points)
    }

    /// Pick the six eye points out of a full face mesh.
    ///
    /// Returns `None` if any index falls outside the mesh.
    pub fn from_mesh(mesh: &[LandmarkPoint], indices: &[usize; 6]) -> Option<Self> {
        let mut points = [LandmarkPoint::default(); 6];
        for (slot, &idx) in points.iter_mut().zip(indices.iter()) {
            *slot = *mesh.get(idx)?;
        }
        Some(Self(points))
    }

    /// Point by 1-based landmark number (p1..p6)
    ///
    /// # Panics
    ///
    /// If `n` is outside `1..=6`.
    pub(crate) fn p(&self, n: usize) -> LandmarkPoint {
        self.0[n - 1]
    }
}

/// Per-frame output of the geometry and pose collaborators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    /// Whether the landmark model found a face
    pub landmarks_present: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eye: Option<EyeLandmarks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eye: Option<EyeLandmarks>,

    /// Head pitch in degrees; 0 when the pose solve failed
    #[serde(default)]
    pub pitch: f32,

    /// Head yaw in degrees; 0 when the pose solve failed
    #[serde(default)]
    pub yaw: f32,

    /// Head roll in degrees; 0 when the pose solve failed
    #[serde(default)]
    pub roll: f32,
}

impl FaceObservation {
    /// Observation for a frame with no detected face
    pub fn no_face() -> Self {
        Self::default()
    }

    /// Build an observation from a full face mesh using the default eye indices
    pub fn from_mesh(mesh: &[LandmarkPoint], pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            landmarks_present: !mesh.is_empty(),
            left_eye: EyeLandmarks::from_mesh(mesh, &LEFT_EYE_INDICES),
            right_eye: EyeLandmarks::from_mesh(mesh, &RIGHT_EYE_INDICES),
            pitch,
            yaw,
            roll,
        }
    }
}
