//! Four-component scale values.
//!
//! A `ScaleVector` mirrors the host's SIMD-friendly `(x, y, z, w)` layout. Only
//! X/Y/Z carry scale; W is preserved as-is and only takes part in comparisons
//! when asked to.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Default tolerance for [`ScaleVector::approx_eq`].
pub const APPROX_EPSILON: f32 = 0.001;

#[derive(Debug, Error, PartialEq)]
pub enum VectorError {
    #[error("scale vector needs 3 or 4 components, got {0}")]
    ComponentCount(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ScaleVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl ScaleVector {
    /// Identity scale for bone overrides and root scale.
    pub const ONE: ScaleVector = ScaleVector::new4(1.0, 1.0, 1.0, 1.0);

    /// Three-component constructor; W is 1.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    #[inline]
    pub const fn new4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Component-wise comparison using [`APPROX_EPSILON`].
    #[inline]
    pub fn approx_eq(&self, other: &ScaleVector, include_w: bool) -> bool {
        self.approx_eq_within(other, include_w, APPROX_EPSILON)
    }

    /// True iff every considered component differs by less than `epsilon`.
    pub fn approx_eq_within(&self, other: &ScaleVector, include_w: bool, epsilon: f32) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() < epsilon;
        close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
            && (!include_w || close(self.w, other.w))
    }

    /// X/Y/Z taken from `other`, W kept from `self`.
    #[inline]
    pub fn with_xyz(self, other: ScaleVector) -> Self {
        Self {
            x: other.x,
            y: other.y,
            z: other.z,
            w: self.w,
        }
    }

    /// Floor X/Y/Z independently; W is left alone.
    #[inline]
    pub fn floor_xyz(self, min: f32) -> Self {
        Self {
            x: self.x.max(min),
            y: self.y.max(min),
            z: self.z.max(min),
            w: self.w,
        }
    }
}

impl Default for ScaleVector {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<[f32; 3]> for ScaleVector {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<[f32; 4]> for ScaleVector {
    fn from(a: [f32; 4]) -> Self {
        Self::new4(a[0], a[1], a[2], a[3])
    }
}

impl TryFrom<&[f32]> for ScaleVector {
    type Error = VectorError;

    fn try_from(s: &[f32]) -> Result<Self, Self::Error> {
        match *s {
            [x, y, z] => Ok(Self::new(x, y, z)),
            [x, y, z, w] => Ok(Self::new4(x, y, z, w)),
            _ => Err(VectorError::ComponentCount(s.len())),
        }
    }
}

/// Accepted persisted shapes: `{x, y, z, w?}` (any case) or `[x, y, z, w?]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVector {
    Object {
        #[serde(alias = "X")]
        x: f32,
        #[serde(alias = "Y")]
        y: f32,
        #[serde(alias = "Z")]
        z: f32,
        #[serde(default = "one", alias = "W")]
        w: f32,
    },
    Array(Vec<f32>),
}

fn one() -> f32 {
    1.0
}

impl<'de> Deserialize<'de> for ScaleVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawVector::deserialize(deserializer)? {
            RawVector::Object { x, y, z, w } => Ok(ScaleVector::new4(x, y, z, w)),
            RawVector::Array(v) => {
                ScaleVector::try_from(v.as_slice()).map_err(serde::de::Error::custom)
            }
        }
    }
}
