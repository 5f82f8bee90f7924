//! ScaleApplicator: per-character orchestration.
//!
//! Methods:
//! - new, apply (resolve render handle → per-partial update → root scale), clear_cache

use std::sync::Arc;

use crate::config::Config;
use crate::partial::PartialPoseCache;
use crate::pose::{Character, RenderObject};
use crate::profile::ScaleProfile;
use crate::registry::CacheRegistry;

/// Applies a [`ScaleProfile`] to one character every frame.
///
/// One applicator is bound to one character and owns that character's cache
/// registry. All per-frame failures (no render handle, pose not ready) are
/// silent no-ops.
#[derive(Debug)]
pub struct ScaleApplicator {
    cfg: Config,
    caches: CacheRegistry,
}

impl Default for ScaleApplicator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ScaleApplicator {
    pub fn new(cfg: Config) -> Self {
        Self {
            caches: CacheRegistry::new(cfg.epsilon),
            cfg,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Resolve `character`'s render handle and apply `profile` to it. Nothing
    /// happens when the character has no render handle this frame.
    pub fn apply<C: Character + ?Sized>(&self, character: &mut C, profile: &ScaleProfile) {
        if let Some(render) = character.render_object() {
            self.apply_to_render(render, profile);
        }
    }

    /// Apply `profile` to an already resolved render handle.
    pub fn apply_to_render<R: RenderObject + ?Sized>(&self, render: &mut R, profile: &ScaleProfile) {
        for index in 0..render.partial_count() {
            let cache = self.caches.fetch_or_create(index);
            cache.update(render.partial_pose(index).as_mut(), profile);
        }

        let scale = render
            .scale()
            .with_xyz(profile.root_scale())
            .floor_xyz(self.cfg.root_scale_floor);
        render.set_scale(scale);
    }

    /// Forget every override decision for this character. Call after the
    /// skeleton is rebuilt or a different profile is bound.
    pub fn clear_cache(&self) {
        self.caches.clear();
    }

    pub fn cache(&self, index: usize) -> Option<Arc<PartialPoseCache>> {
        self.caches.get(index)
    }

    /// Number of partials that currently have a cache.
    pub fn cached_partials(&self) -> usize {
        self.caches.len()
    }
}
