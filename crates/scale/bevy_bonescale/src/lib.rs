use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod components;
pub mod systems;

pub use components::{
    BoneScaleCache, BoneScaleProfile, DiscoveredPartials, InvalidateBoneScale, SkeletalPartial,
};
pub use systems::{CharacterRig, CharacterView, JointPose};

/// Systems of this plugin run in this set, in `PostUpdate`. The set runs after
/// animation has written the frame's pose and ahead of transform propagation,
/// so the overridden local scales reach `GlobalTransform` the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoneScaleSet;

pub struct BoneScalePlugin;

impl Plugin for BoneScalePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            PostUpdate,
            BoneScaleSet.before(TransformSystem::TransformPropagate),
        );
        #[cfg(feature = "animation")]
        app.configure_sets(
            PostUpdate,
            BoneScaleSet.after(bevy::animation::animate_targets),
        );

        app.add_event::<InvalidateBoneScale>().add_systems(
            PostUpdate,
            (
                systems::attach_caches_system,
                systems::invalidate_caches_system,
                systems::apply_bone_scale_system,
            )
                .chain()
                .in_set(BoneScaleSet),
        );
    }
}
