//! Annotation table persistence.
//!
//! The table is a CSV file with a leading, unnamed row-index column:
//!
//! ```text
//! ,i,l,x,y,w,h
//! 0,images/a.jpg,1,0.3,0.175,0.4,0.25
//! ```
//!
//! `i` is the image path, `l` the label and `x`, `y`, `w`, `h` the normalized
//! center and size. The index column carries no meaning and is discarded on
//! load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::constants::TABLE_COLUMNS;
use crate::error::{LabelError, Result};
use crate::model::{BoundingBoxRecord, Label};

/// Ordered collection of box records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationTable {
    pub rows: Vec<BoundingBoxRecord>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// This table's rows followed by `rows`, without removing duplicates.
    pub fn concat(&self, rows: &[BoundingBoxRecord]) -> Self {
        let mut merged = Vec::with_capacity(self.rows.len() + rows.len());
        merged.extend_from_slice(&self.rows);
        merged.extend_from_slice(rows);
        Self { rows: merged }
    }
}

impl From<Vec<BoundingBoxRecord>> for AnnotationTable {
    fn from(rows: Vec<BoundingBoxRecord>) -> Self {
        Self { rows }
    }
}

/// One CSV row, matched to columns by header name.
#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(rename = "i")]
    image_id: String,
    #[serde(rename = "l", deserialize_with = "deserialize_label")]
    label: Label,
    #[serde(rename = "x")]
    center_x: f64,
    #[serde(rename = "y")]
    center_y: f64,
    #[serde(rename = "w")]
    width: f64,
    #[serde(rename = "h")]
    height: f64,
}

impl From<TableRow> for BoundingBoxRecord {
    fn from(row: TableRow) -> Self {
        Self {
            image_id: row.image_id,
            label: row.label,
            center_x: row.center_x,
            center_y: row.center_y,
            width: row.width,
            height: row.height,
        }
    }
}

/// Accept `1` as well as `1.0`; tables written through a float column store
/// labels that way.
fn deserialize_label<'de, D>(deserializer: D) -> std::result::Result<Label, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(Label::MAX) {
        Ok(value as Label)
    } else {
        Err(serde::de::Error::custom(format!(
            "label {value} is not a non-negative integer"
        )))
    }
}

/// Format a float so integral values keep a decimal point.
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Reads and writes the annotation table at a fixed path.
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table, or an empty one when the file does not exist yet.
    pub fn load(&self) -> Result<AnnotationTable> {
        if !self.path.exists() {
            log::info!("No annotation table at {:?}, starting empty", self.path);
            return Ok(AnnotationTable::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let headers = reader
            .headers()
            .map_err(|e| LabelError::malformed_table(&self.path, e.to_string()))?
            .clone();
        for column in TABLE_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LabelError::malformed_table(
                    &self.path,
                    format!("missing column '{column}'"),
                ));
            }
        }

        let rows = reader
            .deserialize::<TableRow>()
            .map(|row| {
                row.map(BoundingBoxRecord::from)
                    .map_err(|e| LabelError::malformed_table(&self.path, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Loaded {} annotations from {:?}", rows.len(), self.path);

        Ok(AnnotationTable { rows })
    }

    /// Write `table`, replacing any existing file.
    pub fn save(&self, table: &AnnotationTable) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        writer.write_record(std::iter::once("").chain(TABLE_COLUMNS))?;
        for (index, row) in table.rows.iter().enumerate() {
            writer.write_record([
                index.to_string(),
                row.image_id.clone(),
                row.label.to_string(),
                format_float(row.center_x),
                format_float(row.center_y),
                format_float(row.width),
                format_float(row.height),
            ])?;
        }
        writer.flush()?;

        log::info!("Saved {} annotations to {:?}", table.len(), self.path);
        Ok(())
    }
}
