//! Annotation session state.
//!
//! A session walks a fixed image list. For the current image it collects
//! corner clicks, turns click pairs into labelled pending boxes, and on
//! advance commits those boxes as normalized records to the output table.
//! Saving writes the table loaded at startup followed by every record
//! committed in this session.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::{ImageSize, Point, annotate};
use crate::images::{FileProbe, ImageProbe, ImageSet};
use crate::model::{BoundingBoxRecord, Label, PendingAssignment, PendingClicks};
use crate::store::{AnnotationTable, TableStore};

/// Status text before any command has run.
pub const INITIAL_STATUS: &str = "Started";

/// Mutable state of one labelling run.
#[derive(Debug)]
pub struct Session<P = FileProbe> {
    images: ImageSet,
    probe: P,
    label_count: Label,
    current_index: usize,
    clicks: PendingClicks,
    assignments: Vec<PendingAssignment>,
    output: Vec<BoundingBoxRecord>,
    store: TableStore,
    /// Table as loaded at startup; never refreshed
    prior: AnnotationTable,
    status: String,
    /// Dimensions of the image at the cached index
    size_cache: Option<(usize, ImageSize)>,
}

impl Session<FileProbe> {
    /// Start a session over the images in `folder`, merging into `output`.
    ///
    /// Fails if the folder has no labelable images or the existing output
    /// table cannot be read.
    pub fn open(
        folder: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        label_count: Label,
    ) -> Result<Self> {
        let images = ImageSet::from_dir(folder)?;
        let store = TableStore::new(output);
        let prior = store.load()?;
        Ok(Self::new(images, store, prior, label_count, FileProbe))
    }
}

impl<P: ImageProbe> Session<P> {
    pub fn new(
        images: ImageSet,
        store: TableStore,
        prior: AnnotationTable,
        label_count: Label,
        probe: P,
    ) -> Self {
        log::info!(
            "Session started: {} images, {} labels, {} prior annotations",
            images.len(),
            label_count,
            prior.len()
        );

        Self {
            images,
            probe,
            label_count,
            current_index: 0,
            clicks: PendingClicks::new(),
            assignments: Vec::new(),
            output: Vec::new(),
            store,
            prior,
            status: INITIAL_STATUS.to_string(),
            size_cache: None,
        }
    }

    /// Add a corner click for the current image.
    ///
    /// A third click empties the pending clicks; the click itself is dropped.
    pub fn register_click(&mut self, point: Point) {
        if self.clicks.push(point) {
            log::debug!("Click {} at ({:.1}, {:.1})", self.clicks.len(), point.x, point.y);
        } else {
            log::debug!("Third click, pending clicks reset");
        }
    }

    /// Drop all pending work and restart the walk from the first image.
    ///
    /// Records already committed by [`Session::advance`] are kept.
    pub fn clear(&mut self) {
        self.reset_for_new_image();
        self.current_index = 0;
        log::debug!("Cleared pending annotations, back to image 1");
    }

    /// Label the two pending clicks as one box.
    ///
    /// Returns `false` and changes nothing unless exactly two clicks are pending.
    pub fn assign(&mut self, label: Label) -> bool {
        let Some(corners) = self.clicks.corners() else {
            return false;
        };

        self.assignments.push(PendingAssignment::new(corners, label));
        self.clicks.clear();
        log::debug!(
            "Assigned label {} ({} boxes pending)",
            label,
            self.assignments.len()
        );
        true
    }

    /// Commit the current image's boxes and move to the next image.
    ///
    /// Returns the number of records committed. If the image dimensions
    /// cannot be determined the session is left unchanged.
    pub fn advance(&mut self) -> Result<usize> {
        let image_id = self.current_image_id();

        let records = if self.assignments.is_empty() {
            Vec::new()
        } else {
            let size = self.current_image_size()?;
            self.assignments
                .iter()
                .map(|a| {
                    annotate(a.corners[0], a.corners[1], size)
                        .map(|geometry| BoundingBoxRecord::new(image_id.clone(), a.label, geometry))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let committed = records.len();
        self.output.extend(records);
        self.reset_for_new_image();
        self.current_index = self.images.next_index(self.current_index);

        log::info!(
            "Committed {} boxes for {}, now at image {}",
            committed,
            image_id,
            self.images.progress(self.current_index)
        );
        Ok(committed)
    }

    /// Write the startup table followed by this session's records.
    ///
    /// Repeated saves write the session's records again on top of the
    /// startup table; what earlier saves wrote is not re-read. On failure the
    /// in-memory state is untouched, so the save can be retried.
    pub fn save(&self) -> Result<usize> {
        let merged = self.prior.concat(&self.output);
        self.store.save(&merged)?;
        Ok(merged.len())
    }

    /// Forget clicks and boxes collected for the current image.
    pub fn reset_for_new_image(&mut self) {
        self.clicks.clear();
        self.assignments.clear();
    }

    /// Pixel dimensions of the current image, probed once per image.
    pub fn current_image_size(&mut self) -> Result<ImageSize> {
        if let Some((index, size)) = self.size_cache {
            if index == self.current_index {
                return Ok(size);
            }
        }

        let size = self.probe.dimensions(self.current_image())?;
        self.size_cache = Some((self.current_index, size));
        Ok(size)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_image(&self) -> &Path {
        // current_index is kept below images.len(), which is never zero
        &self.images.paths()[self.current_index]
    }

    /// Identifier of the current image in the output table.
    pub fn current_image_id(&self) -> String {
        self.current_image().to_string_lossy().into_owned()
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn label_count(&self) -> Label {
        self.label_count
    }

    pub fn pending_clicks(&self) -> &PendingClicks {
        &self.clicks
    }

    pub fn pending_assignments(&self) -> &[PendingAssignment] {
        &self.assignments
    }

    /// Records committed during this session, in commit order.
    pub fn output(&self) -> &[BoundingBoxRecord] {
        &self.output
    }

    /// Table loaded at startup.
    pub fn prior(&self) -> &AnnotationTable {
        &self.prior
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}
