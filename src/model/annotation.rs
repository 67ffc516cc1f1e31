//! Committed and pending box annotations.

use crate::geometry::{NormalizedBox, Point, Rect};

/// Class label of a box (0-based).
pub type Label = u32;

/// One exported bounding box in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxRecord {
    /// Path of the annotated image, as listed in the image set
    pub image_id: String,
    pub label: Label,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBoxRecord {
    pub fn new(image_id: impl Into<String>, label: Label, geometry: NormalizedBox) -> Self {
        Self {
            image_id: image_id.into(),
            label,
            center_x: geometry.center_x,
            center_y: geometry.center_y,
            width: geometry.width,
            height: geometry.height,
        }
    }

    /// Normalized geometry of this record.
    pub fn geometry(&self) -> NormalizedBox {
        NormalizedBox {
            center_x: self.center_x,
            center_y: self.center_y,
            width: self.width,
            height: self.height,
        }
    }
}

/// A labelled two-corner box waiting for the current image to be committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingAssignment {
    /// Corners in click order, image pixel space
    pub corners: [Point; 2],
    pub label: Label,
}

impl PendingAssignment {
    pub fn new(corners: [Point; 2], label: Label) -> Self {
        Self { corners, label }
    }

    /// Bounding rectangle of the two corners.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.corners[0], self.corners[1])
    }
}
