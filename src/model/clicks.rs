//! Click collection for the current image.

use crate::geometry::Point;

/// Number of clicks that make up one box.
pub const MAX_PENDING_CLICKS: usize = 2;

/// Up to two clicks collected towards the next box.
///
/// A click beyond the second empties the collection, so the operator can
/// start over by clicking again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingClicks {
    points: Vec<Point>,
}

impl PendingClicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click. Returns `false` when the click overflowed and the
    /// collection was reset.
    pub fn push(&mut self, point: Point) -> bool {
        if self.points.len() < MAX_PENDING_CLICKS {
            self.points.push(point);
            true
        } else {
            self.points.clear();
            false
        }
    }

    /// Both corners, if exactly two clicks are pending.
    pub fn corners(&self) -> Option<[Point; 2]> {
        match self.points.as_slice() {
            [a, b] => Some([*a, *b]),
            _ => None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
