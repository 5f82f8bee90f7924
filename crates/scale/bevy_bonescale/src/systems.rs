use bevy::prelude::*;

use crate::components::{
    BoneScaleCache, BoneScaleProfile, DiscoveredPartials, InvalidateBoneScale, SkeletalPartial,
};
use bonescale_core::{BoneTransform, Character, Pose, PoseError, RenderObject, ScaleVector};

/// Joint lookup shared by every partial of every character.
pub type JointQuery<'w, 's> = Query<'w, 's, (Option<&'static Name>, &'static mut Transform)>;

fn to_bone(tf: &Transform) -> BoneTransform {
    BoneTransform {
        translation: [tf.translation.x, tf.translation.y, tf.translation.z, 0.0],
        rotation: tf.rotation.to_array(),
        scale: ScaleVector::new(tf.scale.x, tf.scale.y, tf.scale.z),
    }
}

/// Pose view over one partial's joint entities.
pub struct JointPose<'a, 'w, 's> {
    joints: &'a [Entity],
    transforms: &'a mut JointQuery<'w, 's>,
}

impl Pose for JointPose<'_, '_, '_> {
    fn bone_count(&self) -> usize {
        self.joints.len()
    }

    fn bone_name(&self, index: usize) -> Option<&str> {
        let entity = *self.joints.get(index)?;
        let (name, _) = self.transforms.get(entity).ok()?;
        name.map(Name::as_str)
    }

    fn transform(&self, index: usize) -> Option<BoneTransform> {
        let entity = *self.joints.get(index)?;
        let (_, tf) = self.transforms.get(entity).ok()?;
        Some(to_bone(tf))
    }

    fn set_transform(&mut self, index: usize, bone: BoneTransform) -> Result<(), PoseError> {
        let len = self.joints.len();
        let entity = *self
            .joints
            .get(index)
            .ok_or(PoseError::IndexOutOfBounds { index, len })?;
        let (_, mut tf) = self
            .transforms
            .get_mut(entity)
            .map_err(|_| PoseError::Unavailable { index })?;
        let [x, y, z, _] = bone.translation;
        tf.translation = Vec3::new(x, y, z);
        tf.rotation = Quat::from_array(bone.rotation);
        tf.scale = Vec3::new(bone.scale.x, bone.scale.y, bone.scale.z);
        Ok(())
    }
}

/// Render handle for one character: its discovered partials and its root
/// `Transform`, which carries the overall scale.
pub struct CharacterRig<'a, 'w, 's> {
    root: Entity,
    partials: &'a [Entity],
    partial_query: &'a Query<'a, 'a, &'static SkeletalPartial>,
    transforms: &'a mut JointQuery<'w, 's>,
}

impl<'a, 'w, 's> RenderObject for CharacterRig<'a, 'w, 's> {
    type Pose<'p> = JointPose<'p, 'w, 's> where Self: 'p;

    fn partial_count(&self) -> usize {
        self.partials.len()
    }

    fn partial_pose(&mut self, index: usize) -> Option<JointPose<'_, 'w, 's>> {
        let entity = *self.partials.get(index)?;
        let partial = self.partial_query.get(entity).ok()?;
        Some(JointPose {
            joints: &partial.joints,
            transforms: &mut *self.transforms,
        })
    }

    fn scale(&self) -> ScaleVector {
        self.transforms
            .get(self.root)
            .map(|(_, tf)| ScaleVector::new(tf.scale.x, tf.scale.y, tf.scale.z))
            .unwrap_or(ScaleVector::ONE)
    }

    fn set_scale(&mut self, scale: ScaleVector) {
        if let Ok((_, mut tf)) = self.transforms.get_mut(self.root) {
            tf.scale = Vec3::new(scale.x, scale.y, scale.z);
        }
    }
}

/// A character whose rig is absent while its root has no `Transform`.
pub struct CharacterView<'a, 'w, 's> {
    rig: Option<CharacterRig<'a, 'w, 's>>,
}

impl<'a, 'w, 's> Character for CharacterView<'a, 'w, 's> {
    type Render = CharacterRig<'a, 'w, 's>;

    fn render_object(&mut self) -> Option<&mut Self::Render> {
        self.rig.as_mut()
    }
}

/// Depth-first walk collecting entities that carry a `SkeletalPartial`. The
/// visit order defines partial indices.
fn collect_partials(
    e: Entity,
    children: &Query<&'static Children>,
    partials: &Query<&'static SkeletalPartial>,
    out: &mut Vec<Entity>,
) {
    if partials.contains(e) {
        out.push(e);
    }
    if let Ok(cs) = children.get(e) {
        for &c in cs.iter() {
            collect_partials(c, children, partials, out);
        }
    }
}

/// Give every profiled character its own cache registry and partial list.
pub fn attach_caches_system(
    mut commands: Commands,
    fresh: Query<
        (Entity, Has<BoneScaleCache>),
        (With<BoneScaleProfile>, Without<DiscoveredPartials>),
    >,
) {
    for (entity, has_cache) in fresh.iter() {
        let mut e = commands.entity(entity);
        e.insert(DiscoveredPartials::default());
        if !has_cache {
            e.insert(BoneScaleCache::default());
        }
    }
}

/// Clear caches on profile reassignment and on explicit invalidation events.
pub fn invalidate_caches_system(
    reassigned: Query<(Entity, &BoneScaleCache), Changed<BoneScaleProfile>>,
    caches: Query<&BoneScaleCache>,
    mut events: EventReader<InvalidateBoneScale>,
) {
    for (entity, cache) in reassigned.iter() {
        if cache.0.cached_partials() > 0 {
            debug!("profile changed on {entity:?}, clearing bone scale caches");
        }
        cache.0.clear_cache();
    }
    for InvalidateBoneScale(entity) in events.read() {
        if let Ok(cache) = caches.get(*entity) {
            debug!("invalidating bone scale caches on {entity:?}");
            cache.0.clear_cache();
        }
    }
}

/// Per-frame apply: discover partials, drop caches when the partial list or a
/// partial's joints changed (skeleton rebuilt), then run the applicator for
/// each character.
pub fn apply_bone_scale_system(
    mut characters: Query<(
        Entity,
        &BoneScaleProfile,
        &BoneScaleCache,
        &mut DiscoveredPartials,
    )>,
    children: Query<&'static Children>,
    partials: Query<&'static SkeletalPartial>,
    rebuilt: Query<(), Changed<SkeletalPartial>>,
    mut transforms: JointQuery,
    mut found: Local<Vec<Entity>>,
) {
    for (entity, profile, cache, mut known) in characters.iter_mut() {
        found.clear();
        collect_partials(entity, &children, &partials, &mut found);

        if known.0 != *found {
            if cache.0.cached_partials() > 0 {
                debug!("partials of {entity:?} changed, clearing bone scale caches");
            }
            cache.0.clear_cache();
            known.0.clone_from(&found);
        } else if found.iter().any(|p| rebuilt.contains(*p)) {
            cache.0.clear_cache();
        }

        let rig = if transforms.contains(entity) {
            Some(CharacterRig {
                root: entity,
                partials: found.as_slice(),
                partial_query: &partials,
                transforms: &mut transforms,
            })
        } else {
            None
        };
        let mut view = CharacterView { rig };
        cache.0.apply(&mut view, &profile.0);
    }
}
