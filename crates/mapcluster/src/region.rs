//! World bounds and point positions.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// A point instance position.
///
/// `z` is carried through from the source data but never takes part in
/// distance or containment tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Position {
    /// Create a flat position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a position that keeps its height.
    #[must_use]
    pub const fn with_height(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned rectangle bounding every valid input position.
///
/// Containment is half-open on both axes: `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct WorldRegion {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

#[derive(Deserialize)]
struct RawRegion {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl TryFrom<RawRegion> for WorldRegion {
    type Error = ConfigError;

    fn try_from(raw: RawRegion) -> ConfigResult<Self> {
        Self::new(raw.min_x, raw.min_y, raw.max_x, raw.max_y)
    }
}

impl WorldRegion {
    /// Create a region, rejecting non-finite or zero-area bounds.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> ConfigResult<Self> {
        for (field, value) in [
            ("region min_x", min_x),
            ("region min_y", min_y),
            ("region max_x", max_x),
            ("region max_y", max_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if max_x <= min_x || max_y <= min_y {
            return Err(ConfigError::EmptyRegion {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    #[must_use]
    pub const fn min_x(&self) -> f32 {
        self.min_x
    }

    #[must_use]
    pub const fn min_y(&self) -> f32 {
        self.min_y
    }

    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.max_x
    }

    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Check whether a position lies inside the region.
    ///
    /// A point exactly on `max_x` or `max_y` is outside. NaN is never inside.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x < self.max_x
            && position.y >= self.min_y
            && position.y < self.max_y
    }
}
