//! Image set discovery and dimension probing.

use std::path::{Path, PathBuf};

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{LabelError, Result};
use crate::geometry::ImageSize;

/// Check if a path ends in one of the labelable extensions.
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Fixed, ordered list of images labelled in one session.
#[derive(Clone, Debug)]
pub struct ImageSet {
    /// Folder the images were discovered in (empty for explicit lists)
    folder: PathBuf,
    images: Vec<PathBuf>,
}

impl ImageSet {
    /// Discover images directly inside `folder`, keeping directory-listing order.
    pub fn from_dir(folder: impl Into<PathBuf>) -> Result<Self> {
        let folder = folder.into();

        let mut images = Vec::new();
        for entry in std::fs::read_dir(&folder)? {
            let path = entry?.path();
            if path.is_file() && is_image_file(&path) {
                images.push(path);
            }
        }

        if images.is_empty() {
            return Err(LabelError::EmptyDirectory { path: folder });
        }

        log::info!("Scanned folder {:?}: found {} images", folder, images.len());

        Ok(Self { folder, images })
    }

    /// Build a set from an explicit list of paths, in the given order.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let images: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if images.is_empty() {
            return Err(LabelError::EmptyDirectory {
                path: PathBuf::new(),
            });
        }

        Ok(Self {
            folder: PathBuf::new(),
            images,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.images.get(index).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.images
    }

    /// Index after `index`, wrapping to 0 after the last image.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.images.len()
    }

    /// Identifier written to the annotation table for the image at `index`.
    pub fn image_id(&self, index: usize) -> Option<String> {
        self.get(index).map(|p| p.to_string_lossy().into_owned())
    }

    /// Progress string like "3/15".
    pub fn progress(&self, index: usize) -> String {
        format!("{}/{}", index + 1, self.images.len())
    }
}

/// Source of image pixel dimensions.
pub trait ImageProbe {
    /// Pixel dimensions of the image at `path`.
    fn dimensions(&self, path: &Path) -> Result<ImageSize>;
}

/// Reads dimensions from image file headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProbe;

impl ImageProbe for FileProbe {
    fn dimensions(&self, path: &Path) -> Result<ImageSize> {
        let (width, height) = image::image_dimensions(path)?;
        Ok(ImageSize::new(width, height))
    }
}

impl<F> ImageProbe for F
where
    F: Fn(&Path) -> Result<ImageSize>,
{
    fn dimensions(&self, path: &Path) -> Result<ImageSize> {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter_is_exact() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("dir/b.png")));
        assert!(!is_image_file(Path::new("c.jpeg")));
        assert!(!is_image_file(Path::new("d.JPG")));
        assert!(!is_image_file(Path::new("e.txt")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn test_from_dir_filters_and_skips_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"").unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let set = ImageSet::from_dir(dir.path()).unwrap();
        assert_eq!(set.len(), 2);

        let mut names: Vec<_> = set
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["a.jpg", "b.png"]);

        // Paths are joined onto the scanned folder
        assert!(set.paths().iter().all(|p| p.starts_with(dir.path())));
    }

    #[test]
    fn test_from_dir_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), b"").unwrap();

        let err = ImageSet::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LabelError::EmptyDirectory { .. }));
    }

    #[test]
    fn test_next_index_wraps() {
        let set = ImageSet::from_paths(["a.jpg", "b.jpg", "c.jpg"]).unwrap();
        assert_eq!(set.next_index(0), 1);
        assert_eq!(set.next_index(1), 2);
        assert_eq!(set.next_index(2), 0);
        assert_eq!(set.progress(2), "3/3");
        assert_eq!(set.image_id(1).as_deref(), Some("b.jpg"));
    }

    #[test]
    fn test_from_paths_empty_is_error() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(ImageSet::from_paths(paths).is_err());
    }

    #[test]
    fn test_file_probe_reads_png_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        image::RgbImage::new(32, 24).save(&path).unwrap();

        let size = FileProbe.dimensions(&path).unwrap();
        assert_eq!(size, ImageSize::new(32, 24));
    }

    #[test]
    fn test_file_probe_missing_file_is_error() {
        assert!(FileProbe.dimensions(Path::new("/nonexistent/x.png")).is_err());
    }
}
