//! Error types for annotation session operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while setting up or running an annotation session.
#[derive(Error, Debug)]
pub enum LabelError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Image header could not be read
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration file could not be parsed or serialized
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The image folder contains no labelable images
    #[error("No .jpg or .png images found in {path:?}")]
    EmptyDirectory {
        /// Folder that was scanned
        path: PathBuf,
    },

    /// The existing annotation table is unreadable or lacks expected columns
    #[error("Malformed annotation table {path:?}: {message}")]
    MalformedTable {
        /// Path of the table file
        path: PathBuf,
        /// Description of the problem
        message: String,
    },

    /// Image dimensions cannot be used for normalization
    #[error("Invalid image dimensions {width}x{height}")]
    Geometry {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    ConfigVersionTooNew {
        /// Version found in the file
        file_version: u32,
        /// Newest version this build reads
        supported_version: u32,
    },

    /// A line of scripted input could not be understood
    #[error("Invalid input on line {line}: {message}")]
    Script {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },
}

impl LabelError {
    /// Create a malformed table error.
    pub fn malformed_table(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedTable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a script error.
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, LabelError>;
