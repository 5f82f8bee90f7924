//! bonescale-core: per-frame skeletal bone scale overrides (engine-agnostic)
//!
//! Given a [`ScaleProfile`] (bone name -> scale, plus a root scale), a
//! [`ScaleApplicator`] rewrites a character's live pose every frame so each
//! named bone carries the profile's scale. Which bones need overriding is
//! decided once per skeletal partial by a [`PartialPoseCache`] and replayed
//! cheaply afterwards. Hosts expose their skeleton through the traits in
//! [`pose`].

pub mod applicator;
pub mod config;
pub mod memory;
pub mod partial;
pub mod pose;
pub mod profile;
pub mod registry;
pub mod vector;

// Re-exports for consumers (adapters)
pub use applicator::ScaleApplicator;
pub use config::{Config, ROOT_SCALE_FLOOR};
pub use memory::{MemoryCharacter, MemoryPose, MemoryRenderObject};
pub use partial::PartialPoseCache;
pub use pose::{BoneTransform, Character, Pose, PoseError, RenderObject};
pub use profile::{ProfileError, ScaleProfile};
pub use registry::CacheRegistry;
pub use vector::{ScaleVector, VectorError, APPROX_EPSILON};
