//! Box geometry: pixel corners to normalized boxes, and the display viewport.

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two corners given in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p1.x - p2.x).abs(),
            height: (p1.y - p2.y).abs(),
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Box geometry normalized to image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert two pixel corners into a normalized center/size box.
///
/// The corners are used as given: when `corner1` lies right of or below
/// `corner2` the resulting width or height is negative. Only zero image
/// dimensions are rejected.
pub fn annotate(corner1: Point, corner2: Point, image_size: ImageSize) -> Result<NormalizedBox> {
    if image_size.is_degenerate() {
        return Err(LabelError::Geometry {
            width: image_size.width,
            height: image_size.height,
        });
    }

    let image_w = f64::from(image_size.width);
    let image_h = f64::from(image_size.height);

    let w = corner2.x - corner1.x;
    let h = corner2.y - corner1.y;

    Ok(NormalizedBox {
        center_x: (corner1.x + w / 2.0) / image_w,
        center_y: (corner1.y + h / 2.0) / image_h,
        width: w / image_w,
        height: h / image_h,
    })
}

/// Placement of the current image on screen.
///
/// The image is anchored at the screen origin and shrunk (never enlarged) to
/// fit the display box with its aspect ratio intact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Displayed image rectangle in screen coordinates
    pub rect: Rect,
    /// Screen pixels per image pixel
    pub scale: f64,
}

impl Viewport {
    /// Fit an image of `size` into a `max_box` of (width, height).
    pub fn fit(size: ImageSize, max_box: (f64, f64)) -> Self {
        let width = f64::from(size.width);
        let height = f64::from(size.height);

        let scale = if width > 0.0 && height > 0.0 {
            (max_box.0 / width).min(max_box.1 / height).min(1.0)
        } else {
            1.0
        };

        Self {
            rect: Rect::new(0.0, 0.0, width * scale, height * scale),
            scale,
        }
    }

    /// Whether a screen point falls on the displayed image.
    pub fn contains(&self, screen: Point) -> bool {
        self.rect.contains(screen)
    }

    /// Map a screen point to image pixel coordinates.
    pub fn to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.rect.x) / self.scale,
            (screen.y - self.rect.y) / self.scale,
        )
    }

    /// Map an image pixel coordinate to the screen.
    pub fn to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.rect.x,
            image.y * self.scale + self.rect.y,
        )
    }
}
