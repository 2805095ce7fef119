//! Visual transform attributes of a placed strip.

use serde::{Deserialize, Serialize};

/// Placement transform of a strip on the timeline.
///
/// Placement copies it verbatim from the source record onto every record it
/// creates; nothing in SceneSplit composes or evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripTransform {
    /// Offset in pixels from the canvas origin
    pub offset: [f32; 2],
    /// Rotation in radians
    pub rotation: f32,
    /// Per-axis scale factors
    pub scale: [f32; 2],
    /// Mirror horizontally
    pub flip_x: bool,
    /// Mirror vertically
    pub flip_y: bool,
}

impl StripTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        offset: [0.0, 0.0],
        rotation: 0.0,
        scale: [1.0, 1.0],
        flip_x: false,
        flip_y: false,
    };

    /// Create a transform from offset, rotation (radians), and scale.
    pub fn from_trs(offset: [f32; 2], rotation: f32, scale: [f32; 2]) -> Self {
        Self {
            offset,
            rotation,
            scale,
            ..Self::IDENTITY
        }
    }

    /// Same transform with the given mirroring.
    pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    /// True when the transform leaves the strip untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for StripTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
