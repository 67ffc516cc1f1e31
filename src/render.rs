//! Renderer-facing snapshot of a session.
//!
//! The core never draws. Once per tick the driver captures a [`Frame`] and
//! hands it to a [`Renderer`], which decides how to present it.

use std::io::Write;
use std::path::Path;

use crate::constants::window;
use crate::error::Result;
use crate::geometry::{Point, Rect, Viewport};
use crate::images::ImageProbe;
use crate::layout::{Button, ButtonLayout};
use crate::model::Label;
use crate::session::Session;

/// Everything needed to draw one frame, in screen coordinates.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub image: &'a Path,
    /// Position in the image list, like "3/15"
    pub progress: String,
    /// Where the image is displayed; `None` when its size is unknown
    pub viewport: Option<Viewport>,
    /// Markers for pending clicks
    pub clicks: Vec<Point>,
    /// Outline spanned by the two pending clicks
    pub selection: Option<Rect>,
    /// Labelled boxes waiting for Done&Next
    pub boxes: Vec<(Rect, Label)>,
    pub buttons: &'a [Button],
    pub status: &'a str,
    pub status_position: Point,
    /// Records committed so far in this session
    pub committed: usize,
}

impl<'a> Frame<'a> {
    /// Capture the current state of `session`.
    pub fn capture<P: ImageProbe>(
        session: &'a Session<P>,
        layout: &'a ButtonLayout,
        viewport: Option<Viewport>,
    ) -> Self {
        let to_screen = |p: Point| viewport.map_or(p, |vp| vp.to_screen(p));
        let screen_rect = |a: Point, b: Point| Rect::from_corners(to_screen(a), to_screen(b));

        let clicks = session
            .pending_clicks()
            .points()
            .iter()
            .map(|p| to_screen(*p))
            .collect();

        let selection = session
            .pending_clicks()
            .corners()
            .map(|[a, b]| screen_rect(a, b));

        let boxes = session
            .pending_assignments()
            .iter()
            .map(|a| (screen_rect(a.corners[0], a.corners[1]), a.label))
            .collect();

        Self {
            image: session.current_image(),
            progress: session.images().progress(session.current_index()),
            viewport,
            clicks,
            selection,
            boxes,
            buttons: layout.buttons(),
            status: session.status(),
            status_position: window::STATUS_POSITION.into(),
            committed: session.output().len(),
        }
    }

    /// One-line text summary of the frame.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} | clicks: {} | boxes: {} | committed: {} | {}",
            self.progress,
            self.image.display(),
            self.clicks.len(),
            self.boxes.len(),
            self.committed,
            self.status
        )
    }
}

/// Presentation layer that draws frames.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Writes the frame summary to a text sink whenever it changes.
pub struct TextRenderer<W> {
    out: W,
    last: Option<String>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let line = frame.summary();
        if self.last.as_deref() == Some(line.as_str()) {
            return Ok(());
        }

        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        log::trace!("Frame: {:?}", frame);
        self.last = Some(line);
        Ok(())
    }
}
