//! BBAT - Bounding Box Annotation Tool
//!
//! Click two corners on an image, assign a label, move to the next image, and
//! save the boxes as a CSV table of normalized center/size records.
//!
//! The crate holds the session state machine and its collaborators. Drawing
//! is left to a [`render::Renderer`] and input comes from an
//! [`input::InputSource`]; [`app::App`] ties them together in a tick loop.

pub mod app;
pub mod command;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod images;
pub mod input;
pub mod layout;
pub mod model;
pub mod render;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use app::App;
pub use command::{Command, Key, KeyBindings};
pub use config::{AppConfig, LogLevel};
pub use dispatch::{Dispatcher, Flow};
pub use error::{LabelError, Result};
pub use geometry::{ImageSize, NormalizedBox, Point, annotate};
pub use images::{FileProbe, ImageProbe, ImageSet};
pub use input::{InputEvent, InputSource, ScriptInput};
pub use model::{BoundingBoxRecord, Label};
pub use render::{Frame, Renderer, TextRenderer};
pub use session::Session;
pub use store::{AnnotationTable, TableStore};
