//! User-authored scale profile for one character.
//!
//! The authoring layer owns and edits profiles; the applicator only reads them,
//! one snapshot per `apply` call.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vector::ScaleVector;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("serialize profile: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Bone-name keyed scale overrides plus a uniform root scale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleProfile {
    /// Display name only; never used for lookup.
    #[serde(rename = "characterName", default)]
    pub character_name: String,
    /// Case-sensitive bone name -> desired scale.
    #[serde(default)]
    bones: HashMap<String, ScaleVector>,
    #[serde(rename = "rootScale", default)]
    root_scale: ScaleVector,
}

impl ScaleProfile {
    pub fn new(character_name: impl Into<String>) -> Self {
        Self {
            character_name: character_name.into(),
            bones: HashMap::new(),
            root_scale: ScaleVector::ONE,
        }
    }

    /// Builder-style variant of [`ScaleProfile::set_bone_scale`].
    pub fn with_bone(mut self, name: impl Into<String>, scale: ScaleVector) -> Self {
        self.set_bone_scale(name, scale);
        self
    }

    pub fn with_root_scale(mut self, scale: ScaleVector) -> Self {
        self.root_scale = scale;
        self
    }

    /// Insert or replace the override for `name`, returning the previous value.
    pub fn set_bone_scale(
        &mut self,
        name: impl Into<String>,
        scale: ScaleVector,
    ) -> Option<ScaleVector> {
        self.bones.insert(name.into(), scale)
    }

    pub fn remove_bone(&mut self, name: &str) -> Option<ScaleVector> {
        self.bones.remove(name)
    }

    #[inline]
    pub fn bone_scale(&self, name: &str) -> Option<ScaleVector> {
        self.bones.get(name).copied()
    }

    pub fn bones(&self) -> impl Iterator<Item = (&str, ScaleVector)> {
        self.bones.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    pub fn root_scale(&self) -> ScaleVector {
        self.root_scale
    }

    pub fn set_root_scale(&mut self, scale: ScaleVector) {
        self.root_scale = scale;
    }

    /// Parse the persisted profile record.
    pub fn from_json(s: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(s).map_err(ProfileError::Parse)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string(self).map_err(ProfileError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bone_lookup_is_case_sensitive() {
        let profile = ScaleProfile::new("Aria").with_bone("Chest", ScaleVector::splat(1.5));
        assert_eq!(profile.bone_scale("Chest"), Some(ScaleVector::splat(1.5)));
        assert_eq!(profile.bone_scale("chest"), None);
    }

    #[test]
    fn set_bone_scale_replaces_existing_entry() {
        let mut profile = ScaleProfile::new("Aria");
        assert_eq!(profile.set_bone_scale("Waist", ScaleVector::splat(2.0)), None);
        assert_eq!(
            profile.set_bone_scale("Waist", ScaleVector::splat(3.0)),
            Some(ScaleVector::splat(2.0))
        );
        assert_eq!(profile.bone_count(), 1);
        assert_eq!(profile.remove_bone("Waist"), Some(ScaleVector::splat(3.0)));
        assert_eq!(profile.bone_count(), 0);
    }

    #[test]
    fn missing_fields_default_to_identity() {
        let profile = ScaleProfile::from_json(r#"{ "characterName": "Solo" }"#).unwrap();
        assert_eq!(profile.character_name, "Solo");
        assert_eq!(profile.bone_count(), 0);
        assert_eq!(profile.root_scale(), ScaleVector::ONE);
    }

    #[test]
    fn json_survives_serialize_and_parse() {
        let profile = ScaleProfile::new("Aria")
            .with_bone("Chest", ScaleVector::new(1.2, 1.1, 1.0))
            .with_root_scale(ScaleVector::splat(0.9));
        let text = profile.to_json().unwrap();
        assert_eq!(ScaleProfile::from_json(&text).unwrap(), profile);
    }

    #[test]
    fn bad_vector_is_a_parse_error() {
        let err = ScaleProfile::from_json(r#"{ "bones": { "Chest": [1.0] } }"#).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }
}
