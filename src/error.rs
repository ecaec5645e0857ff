//! Configuration errors.
//!
//! Everything here is fatal at startup. Geometry problems met while tracing a
//! frame are never reported as errors; they resolve to a miss or a clamped
//! strip instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The map has no rows, or its first row has no cells.
    #[error("map is empty")]
    EmptyMap,

    /// A row's length differs from the first row's.
    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character in a text map is not a decimal digit.
    #[error("invalid map cell {found:?} at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("failed to read map file {path}: {source}")]
    MapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("screen dimensions must be non-zero, got {width}x{height}")]
    ZeroScreen { width: usize, height: usize },

    #[error("column count must be positive")]
    ZeroColumns,

    /// More columns than pixel columns would leave strips zero pixels wide.
    #[error("{columns} columns do not fit a {width} pixel wide screen")]
    TooManyColumns { columns: usize, width: usize },

    #[error("field of view must lie strictly between 0 and pi radians, got {0}")]
    InvalidFov(f32),
}
