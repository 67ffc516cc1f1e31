//! End-to-end session tests.
//!
//! These tests drive sessions through the dispatcher against real image files
//! and annotation tables in temporary folders.


use std::path::Path;

use crate::geometry::ImageSize;

/// Write an empty image of the given size. The format follows the extension.
fn write_image(dir: &Path, name: &str, size: ImageSize) {
    image::RgbImage::new(size.width, size.height)
        .save(dir.join(name))
        .unwrap();
}
