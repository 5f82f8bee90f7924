//! Core configuration for bonescale-core.

use serde::{Deserialize, Serialize};

use crate::vector::APPROX_EPSILON;

/// Smallest per-axis root scale written back to a character.
pub const ROOT_SCALE_FLOOR: f32 = 0.01;

/// Tolerances used by the applicator.
/// Keep this minimal; the per-frame path reads it without locking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Tolerance for deciding whether a profile scale differs from the
    /// animation-driven scale when a partial is first seen.
    pub epsilon: f32,

    /// Each root scale axis is floored to this value before it is written.
    pub root_scale_floor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: APPROX_EPSILON,
            root_scale_floor: ROOT_SCALE_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "epsilon": 0.5 }"#).unwrap();
        assert_eq!(cfg.epsilon, 0.5);
        assert_eq!(cfg.root_scale_floor, ROOT_SCALE_FLOOR);
    }

    #[test]
    fn fields_use_camel_case() {
        let cfg: Config = serde_json::from_str(r#"{ "rootScaleFloor": 0.2 }"#).unwrap();
        assert_eq!(cfg.root_scale_floor, 0.2);
        assert_eq!(cfg.epsilon, APPROX_EPSILON);

        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json.get("rootScaleFloor").is_some());
        assert!(json.get("root_scale_floor").is_none());
    }
}
