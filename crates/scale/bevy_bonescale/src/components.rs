use bevy::prelude::*;
use bonescale_core::{ScaleApplicator, ScaleProfile};

/// Scale profile bound to a character root. Replacing or mutating this
/// component counts as a profile reassignment and clears the character's
/// override caches.
#[derive(Component, Debug, Clone, Default)]
pub struct BoneScaleProfile(pub ScaleProfile);

/// Per-character override caches. Inserted automatically next to
/// [`BoneScaleProfile`].
#[derive(Component, Debug, Default)]
pub struct BoneScaleCache(pub ScaleApplicator);

/// Partials found under a character on the last frame, in index order. A
/// different list means indices shifted and the caches are stale.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DiscoveredPartials(pub Vec<Entity>);

/// One skeletal partial: ordered joint entities, each carrying a `Transform`
/// and usually a `Name`. Partials are found by walking the character's
/// descendants depth-first.
#[derive(Component, Debug, Clone, Default)]
pub struct SkeletalPartial {
    pub joints: Vec<Entity>,
}

/// Explicit invalidation signal for one character (skeleton rebuilt, redraw).
#[derive(Event, Debug, Clone, Copy)]
pub struct InvalidateBoneScale(pub Entity);
