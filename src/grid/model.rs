use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::{CellCoord, Rect};
use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::paint::color::{ColorLayer, Rgba};
use crate::paint::stack::LayerStack;

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

/// Fixed layer indices every cell maintains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerRoles {
    /// Animated pattern or solid background.
    pub background: usize,
    /// Accumulated brush strokes.
    pub brush: usize,
    /// Transient hover feedback.
    pub highlight: usize,
}

impl Default for LayerRoles {
    fn default() -> Self {
        Self {
            background: 0,
            brush: 1,
            highlight: 2,
        }
    }
}

/// Largest layer index a role may name.
pub const MAX_ROLE_INDEX: usize = 15;

impl LayerRoles {
    /// Roles must name three distinct layers, each at most [`MAX_ROLE_INDEX`].
    pub fn validate(&self) -> PixelGridResult<()> {
        let Self {
            background,
            brush,
            highlight,
        } = *self;
        if background == brush || background == highlight || brush == highlight {
            return Err(PixelGridError::validation(format!(
                "layer roles must be distinct, got background={background} brush={brush} \
                 highlight={highlight}"
            )));
        }
        let top = background.max(brush).max(highlight);
        if top > MAX_ROLE_INDEX {
            return Err(PixelGridError::validation(format!(
                "layer role index {top} exceeds {MAX_ROLE_INDEX}"
            )));
        }
        Ok(())
    }

    /// Number of layers a cell needs so every role index exists.
    pub fn required_layers(&self) -> usize {
        self.background.max(self.brush).max(self.highlight) + 1
    }
}

/// One addressable grid unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    coord: CellCoord,
    /// The cell's layers and composited color.
    pub stack: LayerStack,
}

impl Cell {
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }
}

/// Row-major arena of cells with immutable dimensions.
///
/// Cell `(row, col)` lives at `row * columns + col`. Every grid gets a process-unique
/// `epoch`, so work scheduled against one grid can tell that it has been replaced.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    epoch: u64,
}

impl Grid {
    /// Build a grid whose every bottom layer is `initial`.
    pub fn new(rows: usize, columns: usize, initial: ColorLayer) -> PixelGridResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(PixelGridError::validation(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| CellCoord::new(row, col)))
            .map(|coord| Cell {
                coord,
                stack: LayerStack::new(initial),
            })
            .collect();
        Ok(Self {
            rows,
            columns,
            cells,
            epoch: NEXT_EPOCH.fetch_add(1, Ordering::Relaxed),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Arena index of `coord`, bounds-checked.
    pub fn index_of(&self, coord: CellCoord) -> PixelGridResult<usize> {
        if coord.row >= self.rows || coord.col >= self.columns {
            return Err(PixelGridError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(coord.row * self.columns + coord.col)
    }

    pub fn cell(&self, row: usize, col: usize) -> PixelGridResult<&Cell> {
        let i = self.index_of(CellCoord::new(row, col))?;
        Ok(&self.cells[i])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> PixelGridResult<&mut Cell> {
        let i = self.index_of(CellCoord::new(row, col))?;
        Ok(&mut self.cells[i])
    }

    pub fn cell_at(&self, coord: CellCoord) -> PixelGridResult<&Cell> {
        self.cell(coord.row, coord.col)
    }

    pub fn cell_at_mut(&mut self, coord: CellCoord) -> PixelGridResult<&mut Cell> {
        self.cell_mut(coord.row, coord.col)
    }

    /// Map a canvas fraction to a cell.
    ///
    /// `x` runs across columns and `y` down rows; both are clamped to `[0, 1]` and a
    /// fraction of exactly 1 lands on the last row/column.
    pub fn coord_at_normalized(&self, x: f64, y: f64) -> CellCoord {
        fn scale(f: f64, n: usize) -> usize {
            let f = if f.is_finite() { f.clamp(0.0, 1.0) } else { 0.0 };
            ((f * n as f64).floor() as usize).min(n - 1)
        }
        CellCoord::new(scale(y, self.rows), scale(x, self.columns))
    }

    pub fn cell_at_normalized(&self, x: f64, y: f64) -> &Cell {
        let coord = self.coord_at_normalized(x, y);
        &self.cells[coord.row * self.columns + coord.col]
    }

    /// Row-major traversal; stops when `visit` breaks.
    pub fn for_each_cell(&self, mut visit: impl FnMut(&Cell) -> ControlFlow<()>) {
        for cell in &self.cells {
            if visit(cell).is_break() {
                return;
            }
        }
    }

    /// Mutable row-major traversal; stops when `visit` breaks or fails.
    pub fn for_each_cell_mut(
        &mut self,
        mut visit: impl FnMut(&mut Cell) -> PixelGridResult<ControlFlow<()>>,
    ) -> PixelGridResult<()> {
        for cell in &mut self.cells {
            if visit(cell)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Overwrite layer `layer_index` of every cell with `rgba`.
    pub fn set_layer_color(&mut self, layer_index: usize, rgba: Rgba) -> PixelGridResult<()> {
        self.for_each_cell_mut(|cell| {
            cell.stack
                .with_layer(layer_index, |layer| layer.set_rgba(rgba))?;
            Ok(ControlFlow::Continue(()))
        })
    }

    /// Truncate every cell to its bottom layer.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.stack.clear_layers();
        }
    }

    /// Push transparent layers on every cell until each role index exists.
    ///
    /// The cursor ends on the topmost layer.
    pub fn init_role_layers(&mut self, roles: &LayerRoles) -> PixelGridResult<()> {
        let needed = roles.required_layers();
        for cell in &mut self.cells {
            while cell.stack.layer_count() < needed {
                cell.stack.switch_layer(cell.stack.layer_count() - 1)?;
                cell.stack.push_layer(true);
            }
        }
        Ok(())
    }

    /// Rectangles tiling `width x height`, one per cell, with the cell's composite color.
    pub fn cell_rects(&self, width: f64, height: f64) -> impl Iterator<Item = (Rect, Rgba)> + '_ {
        let dx = width / self.columns as f64;
        let dy = height / self.rows as f64;
        self.cells.iter().map(move |cell| {
            let x0 = cell.col() as f64 * dx;
            let y0 = cell.row() as f64 * dy;
            (
                Rect::new(x0, y0, x0 + dx, y0 + dy),
                cell.stack.computed_color(),
            )
        })
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
