//! Bounding-box clusters.

use crate::region::Position;

/// An axis-aligned bounding box plus the number of points folded into it.
///
/// The box only ever grows, both when absorbing points and when merging
/// with another cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub count: u32,
}

impl Cluster {
    /// A single-point cluster.
    #[must_use]
    pub const fn from_point(position: Position) -> Self {
        Self {
            min_x: position.x,
            max_x: position.x,
            min_y: position.y,
            max_y: position.y,
            count: 1,
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether `position` lies in this box inflated by `threshold` on every side.
    ///
    /// Edges are inclusive.
    #[must_use]
    pub fn reaches(&self, position: Position, threshold: f32) -> bool {
        position.x >= self.min_x - threshold
            && position.x <= self.max_x + threshold
            && position.y >= self.min_y - threshold
            && position.y <= self.max_y + threshold
    }

    /// Grow the box to cover `position` and count it.
    pub fn absorb(&mut self, position: Position) {
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
        self.count += 1;
    }

    /// Symmetric closeness test used when merging across cells.
    ///
    /// Every opposing edge pair must be strictly closer than `threshold`:
    /// `|self.max - other.min|` and `|self.min - other.max|` on both axes.
    /// This is not the same rule as [`Cluster::reaches`] and the two must not
    /// be unified; wide boxes can fail it even when they overlap.
    #[must_use]
    pub fn is_close_to(&self, other: &Self, threshold: f32) -> bool {
        (self.max_x - other.min_x).abs() < threshold
            && (self.min_x - other.max_x).abs() < threshold
            && (self.max_y - other.min_y).abs() < threshold
            && (self.min_y - other.max_y).abs() < threshold
    }

    /// Grow to the union of both boxes and take over `other`'s count.
    pub fn merge(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.count += other.count;
    }

    /// Whether `position` lies inside the box itself, edges included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.reaches(position, 0.0)
    }
}
