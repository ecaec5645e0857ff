//! Grid map: a rectangular occupancy grid of wall kinds.
//!
//! Cell `(x, y)` spans `[x, x+1) × [y, y+1)` in world space. A value of `0`
//! is open floor; anything greater is a wall variant that selects a texture.

use std::path::Path;

use tracing::info;

use crate::error::ConfigError;

pub type WallKind = u8;

pub const EMPTY: WallKind = 0;

/// Immutable after construction; shared by reference across a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Row-major cells (y * width + x)
    cells: Vec<WallKind>,
}

impl GridMap {
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ConfigError>
    where
        R: AsRef<[WallKind]>,
    {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(ConfigError::EmptyMap);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, cells_in_row) in rows.iter().enumerate() {
            let cells_in_row = cells_in_row.as_ref();
            if cells_in_row.len() != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend_from_slice(cells_in_row);
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Parse the text map format: one line per row, one digit per cell.
    /// Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut rows: Vec<Vec<WallKind>> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .chars()
                .enumerate()
                .map(|(column, ch)| {
                    ch.to_digit(10)
                        .map(|d| d as WallKind)
                        .ok_or(ConfigError::InvalidCell {
                            line: line_no + 1,
                            column: column + 1,
                            found: ch,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Self::from_rows(&rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::MapIo {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&text)?;
        info!(path = %path.display(), width = map.width, height = map.height, "map loaded");
        Ok(map)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Wall kind at `(x, y)`, or `None` outside the map.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<WallKind> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Occupied or outside the map. Used for collision, where leaving the map
    /// must be as impossible as walking into a wall.
    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|kind| kind != EMPTY)
    }

    /// True when every border cell is a wall, so no ray cast from inside can
    /// leave the map.
    pub fn is_enclosed(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        let top_bottom = (0..w).all(|x| self.is_blocked(x, 0) && self.is_blocked(x, h - 1));
        let sides = (0..h).all(|y| self.is_blocked(0, y) && self.is_blocked(w - 1, y));
        top_bottom && sides
    }
}
