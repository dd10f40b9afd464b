use std::time::Duration;

use crate::foundation::error::{PixelGridError, PixelGridResult};

pub use kurbo::{Point, Rect, Size};

/// Row/column address of one grid cell.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CellCoord {
    /// Zero-based row (vertical) index.
    pub row: usize,
    /// Zero-based column (horizontal) index.
    pub col: usize,
}

impl CellCoord {
    /// Build a coordinate from `(row, col)`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is this cell or one of its eight neighbors.
    pub fn touches(self, other: Self) -> bool {
        self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

/// Rational frame rate driving the background animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, frames.
    pub num: u32,
    /// Denominator, seconds. Must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> PixelGridResult<Self> {
        if den == 0 {
            return Err(PixelGridError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PixelGridError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Length of one frame as a timer period.
    pub fn period(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
