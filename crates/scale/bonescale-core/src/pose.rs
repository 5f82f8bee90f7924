//! Host capability traits.
//!
//! The core never touches skeleton memory directly. Hosts (Bevy, a game's
//! native pose buffers, the in-memory types in `memory.rs`) implement these
//! traits and hand them to `ScaleApplicator::apply`. Every read and write is
//! bounds-checked by index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vector::ScaleVector;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoseError {
    #[error("bone index {index} out of bounds for pose of {len} bones")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("bone {index} is no longer available")]
    Unavailable { index: usize },
}

/// One bone's local transform split to TRS.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneTransform {
    pub translation: [f32; 4],
    /// Quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub scale: ScaleVector,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            translation: [0.0; 4],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: ScaleVector::ONE,
        }
    }
}

/// Live pose of one skeletal partial: ordered transforms plus a parallel
/// bone-name table.
pub trait Pose {
    fn bone_count(&self) -> usize;

    /// `None` when the index is out of range or the host cannot resolve a name.
    fn bone_name(&self, index: usize) -> Option<&str>;

    fn transform(&self, index: usize) -> Option<BoneTransform>;

    fn set_transform(&mut self, index: usize, transform: BoneTransform) -> Result<(), PoseError>;
}

impl<P: Pose + ?Sized> Pose for &mut P {
    #[inline]
    fn bone_count(&self) -> usize {
        (**self).bone_count()
    }

    #[inline]
    fn bone_name(&self, index: usize) -> Option<&str> {
        (**self).bone_name(index)
    }

    #[inline]
    fn transform(&self, index: usize) -> Option<BoneTransform> {
        (**self).transform(index)
    }

    #[inline]
    fn set_transform(&mut self, index: usize, transform: BoneTransform) -> Result<(), PoseError> {
        (**self).set_transform(index, transform)
    }
}

/// A character's resolved render handle: its skeleton's partials and its
/// overall scale field.
pub trait RenderObject {
    type Pose<'a>: Pose
    where
        Self: 'a;

    fn partial_count(&self) -> usize;

    /// `None` when the partial's pose is not ready this frame.
    fn partial_pose(&mut self, index: usize) -> Option<Self::Pose<'_>>;

    fn scale(&self) -> ScaleVector;

    fn set_scale(&mut self, scale: ScaleVector);
}

/// Anything that can resolve to a render handle. Resolution may fail while
/// the character is spawning or being rebuilt.
pub trait Character {
    type Render: RenderObject + ?Sized;

    fn render_object(&mut self) -> Option<&mut Self::Render>;
}
