//! Plain in-memory host types.
//!
//! Useful for tests and for hosts that keep pose buffers as ordinary vectors.

use crate::pose::{BoneTransform, Character, Pose, PoseError, RenderObject};
use crate::vector::ScaleVector;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryPose {
    /// `None` models a bone whose name the host cannot resolve.
    pub names: Vec<Option<String>>,
    pub transforms: Vec<BoneTransform>,
}

impl MemoryPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named bone with the given transform.
    pub fn push(&mut self, name: impl Into<String>, transform: BoneTransform) -> usize {
        self.names.push(Some(name.into()));
        self.transforms.push(transform);
        self.transforms.len() - 1
    }

    /// Append a bone whose name cannot be resolved.
    pub fn push_unnamed(&mut self, transform: BoneTransform) -> usize {
        self.names.push(None);
        self.transforms.push(transform);
        self.transforms.len() - 1
    }

    /// Build a pose of named bones at identity transform.
    pub fn with_bones<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pose = Self::new();
        for name in names {
            pose.push(name, BoneTransform::default());
        }
        pose
    }
}

impl Pose for MemoryPose {
    #[inline]
    fn bone_count(&self) -> usize {
        self.transforms.len()
    }

    fn bone_name(&self, index: usize) -> Option<&str> {
        self.names.get(index)?.as_deref()
    }

    #[inline]
    fn transform(&self, index: usize) -> Option<BoneTransform> {
        self.transforms.get(index).copied()
    }

    fn set_transform(&mut self, index: usize, transform: BoneTransform) -> Result<(), PoseError> {
        let len = self.transforms.len();
        let slot = self
            .transforms
            .get_mut(index)
            .ok_or(PoseError::IndexOutOfBounds { index, len })?;
        *slot = transform;
        Ok(())
    }
}

/// Skeleton as a list of partial poses; `None` entries are partials whose
/// pose is not ready yet.
#[derive(Clone, Debug, Default)]
pub struct MemoryRenderObject {
    pub partials: Vec<Option<MemoryPose>>,
    pub scale: ScaleVector,
}

impl MemoryRenderObject {
    pub fn new(partials: Vec<MemoryPose>) -> Self {
        Self {
            partials: partials.into_iter().map(Some).collect(),
            scale: ScaleVector::ONE,
        }
    }

    pub fn pose(&self, partial: usize) -> Option<&MemoryPose> {
        self.partials.get(partial)?.as_ref()
    }
}

impl RenderObject for MemoryRenderObject {
    type Pose<'a> = &'a mut MemoryPose;

    #[inline]
    fn partial_count(&self) -> usize {
        self.partials.len()
    }

    fn partial_pose(&mut self, index: usize) -> Option<Self::Pose<'_>> {
        self.partials.get_mut(index)?.as_mut()
    }

    #[inline]
    fn scale(&self) -> ScaleVector {
        self.scale
    }

    #[inline]
    fn set_scale(&mut self, scale: ScaleVector) {
        self.scale = scale;
    }
}

/// Character whose render handle may not exist yet.
#[derive(Clone, Debug, Default)]
pub struct MemoryCharacter {
    pub render: Option<MemoryRenderObject>,
}

impl MemoryCharacter {
    pub fn spawned(render: MemoryRenderObject) -> Self {
        Self {
            render: Some(render),
        }
    }

    pub fn unspawned() -> Self {
        Self { render: None }
    }
}

impl Character for MemoryCharacter {
    type Render = MemoryRenderObject;

    fn render_object(&mut self) -> Option<&mut MemoryRenderObject> {
        self.render.as_mut()
    }
}
