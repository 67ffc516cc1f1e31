//! Global constants for the BBAT application

/// Image extensions picked up from the image folder (matched case-sensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Column headers of the annotation table, after the leading index column.
pub const TABLE_COLUMNS: [&str; 6] = ["i", "l", "x", "y", "w", "h"];

/// Highest label reachable from the digit keys.
pub const MAX_DIGIT_LABEL: u32 = 9;

/// Default polling rate of the driver loop.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Window layout used by the on-screen buttons and status text.
pub mod window {
    /// Screen size the layout was designed for
    pub const SIZE: (u32, u32) = (1280, 800);

    /// Largest box a displayed image is fitted into (width, height)
    pub const MAX_IMAGE_BOX: (f64, f64) = (800.0, 1000.0);

    /// Where the status text is drawn
    pub const STATUS_POSITION: (f64, f64) = (950.0, 750.0);

    /// Window title
    pub const TITLE: &str = "bbat";
}

/// Button placement.
pub mod buttons {
    /// Hit area of a single button
    pub const SIZE: (f64, f64) = (80.0, 22.0);

    /// Top-left of the Clear button
    pub const CLEAR: (f64, f64) = (865.0, 50.0);

    /// Top-left of the Done&Next button
    pub const ADVANCE: (f64, f64) = (975.0, 50.0);

    /// Top-left of the first Assign button
    pub const ASSIGN_ORIGIN: (f64, f64) = (850.0, 160.0);

    /// Horizontal distance between Assign buttons
    pub const ASSIGN_STEP_X: f64 = 85.0;

    /// Vertical distance between Assign button rows
    pub const ASSIGN_STEP_Y: f64 = 100.0;

    /// Assign buttons wrap to a new row once x passes this value
    pub const ASSIGN_WRAP_X: f64 = 1220.0;
}
