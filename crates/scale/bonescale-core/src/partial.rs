//! Per-partial override cache.
//!
//! A `PartialPoseCache` decides once which bones of one skeletal partial need
//! their scale overwritten, then re-applies exactly those overrides every frame.
//!
//! The decision (the "initialized" flag together with the override map) lives in
//! a single `CacheState` behind one mutex, so `initialize` and `update` always
//! observe either no decision or a complete one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

use crate::pose::Pose;
use crate::profile::ScaleProfile;
use crate::vector::{ScaleVector, APPROX_EPSILON};

/// Bone index -> override scale, sorted by bone index.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OverrideMap {
    entries: Vec<(usize, ScaleVector)>,
}

impl OverrideMap {
    /// Scan `pose` against `profile`, keeping only bones whose profile scale
    /// differs from their current X/Y/Z scale.
    fn build<P: Pose + ?Sized>(pose: &P, profile: &ScaleProfile, epsilon: f32) -> Self {
        let mut entries = Vec::new();
        for index in 0..pose.bone_count() {
            let Some(name) = pose.bone_name(index) else {
                trace!("bone {index}: unresolved name, skipped");
                continue;
            };
            let Some(target) = profile.bone_scale(name) else {
                continue;
            };
            let Some(current) = pose.transform(index) else {
                continue;
            };
            if current.scale.approx_eq_within(&target, false, epsilon) {
                trace!("bone {index} ({name}): already at profile scale");
                continue;
            }
            entries.push((index, target));
        }
        Self { entries }
    }

    #[inline]
    pub(crate) fn get(&self, bone: usize) -> Option<ScaleVector> {
        self.entries
            .binary_search_by_key(&bone, |(i, _)| *i)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, ScaleVector)> + '_ {
        self.entries.iter().copied()
    }
}

#[derive(Debug)]
enum CacheState {
    Uninitialized,
    Initialized(OverrideMap),
}

/// Override cache for one (character, partial index) pair.
#[derive(Debug)]
pub struct PartialPoseCache {
    index: usize,
    epsilon: f32,
    state: Mutex<CacheState>,
}

impl PartialPoseCache {
    pub fn new(index: usize) -> Self {
        Self::with_epsilon(index, APPROX_EPSILON)
    }

    pub fn with_epsilon(index: usize, epsilon: f32) -> Self {
        Self {
            index,
            epsilon,
            state: Mutex::new(CacheState::Uninitialized),
        }
    }

    /// Skeletal partial index this cache is bound to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the override decision from `pose`. A missing pose leaves the
    /// cache untouched so the next call with a pose can retry.
    pub fn initialize<P: Pose + ?Sized>(&self, pose: Option<&P>, profile: &ScaleProfile) {
        let Some(pose) = pose else {
            return;
        };
        let mut state = self.lock();
        self.initialize_locked(&mut state, pose, profile);
    }

    fn initialize_locked<P: Pose + ?Sized>(
        &self,
        state: &mut CacheState,
        pose: &P,
        profile: &ScaleProfile,
    ) {
        let map = OverrideMap::build(pose, profile, self.epsilon);
        debug!(
            "partial {} of '{}': {} of {} bones overridden",
            self.index,
            profile.character_name,
            map.len(),
            pose.bone_count()
        );
        *state = CacheState::Initialized(map);
    }

    /// Apply cached overrides to `pose`, initializing from this same pose first
    /// if no decision exists yet. Only X/Y/Z of each overridden scale are
    /// written; translation, rotation and W are preserved.
    pub fn update<P: Pose + ?Sized>(&self, pose: Option<&mut P>, profile: &ScaleProfile) {
        let Some(pose) = pose else {
            return;
        };
        let mut state = self.lock();
        if matches!(*state, CacheState::Uninitialized) {
            self.initialize_locked(&mut state, &*pose, profile);
        }
        let CacheState::Initialized(map) = &*state else {
            return;
        };
        for (bone, scale) in map.iter() {
            let Some(mut transform) = pose.transform(bone) else {
                trace!("partial {}: bone {bone} missing from pose", self.index);
                continue;
            };
            transform.scale = transform.scale.with_xyz(scale);
            if let Err(err) = pose.set_transform(bone, transform) {
                trace!("partial {}: {err}", self.index);
            }
        }
    }

    /// Drop the decision; the next `update` re-initializes.
    pub fn reset(&self) {
        *self.lock() = CacheState::Uninitialized;
    }

    pub fn is_initialized(&self) -> bool {
        matches!(*self.lock(), CacheState::Initialized(_))
    }

    pub fn override_for(&self, bone: usize) -> Option<ScaleVector> {
        match &*self.lock() {
            CacheState::Initialized(map) => map.get(bone),
            CacheState::Uninitialized => None,
        }
    }

    pub fn override_count(&self) -> usize {
        match &*self.lock() {
            CacheState::Initialized(map) => map.len(),
            CacheState::Uninitialized => 0,
        }
    }

    /// Snapshot of the override map, sorted by bone index.
    pub fn overrides(&self) -> Vec<(usize, ScaleVector)> {
        match &*self.lock() {
            CacheState::Initialized(map) => map.iter().collect(),
            CacheState::Uninitialized => Vec::new(),
        }
    }
}
