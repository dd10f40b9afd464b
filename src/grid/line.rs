use crate::foundation::core::CellCoord;
use crate::foundation::error::PixelGridResult;
use crate::grid::model::Grid;

/// Cells strictly between `a` and `b` on a digital line, in order from `a` to `b`.
///
/// The walk steps one unit at a time along the axis with the larger span (columns on a
/// tie) and rounds the other axis to the nearest cell. Adjacent or identical endpoints
/// have no gap, so the result is empty.
pub fn cells_between(a: CellCoord, b: CellCoord) -> Vec<CellCoord> {
    let (ai, aj) = (a.row as i64, a.col as i64);
    let di = b.row as i64 - ai;
    let dj = b.col as i64 - aj;
    let (span_i, span_j) = (di.abs(), dj.abs());

    if span_i <= 1 && span_j <= 1 {
        return Vec::new();
    }

    let at = |i: i64, j: i64| CellCoord::new(i as usize, j as usize);
    if span_i > span_j {
        let slope = dj as f64 / span_i as f64;
        (1..span_i)
            .map(|k| at(ai + di.signum() * k, aj + (k as f64 * slope).round() as i64))
            .collect()
    } else {
        let slope = di as f64 / span_j as f64;
        (1..span_j)
            .map(|k| at(ai + (k as f64 * slope).round() as i64, aj + dj.signum() * k))
            .collect()
    }
}

impl Grid {
    /// Bounds-checked [`cells_between`] for two cells of this grid.
    pub fn cells_between(&self, a: CellCoord, b: CellCoord) -> PixelGridResult<Vec<CellCoord>> {
        self.index_of(a)?;
        self.index_of(b)?;
        Ok(cells_between(a, b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/line.rs"]
mod tests;
