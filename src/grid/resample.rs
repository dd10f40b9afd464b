use crate::grid::model::Grid;

impl Grid {
    /// Copy `source` into this grid with nearest-neighbor scaling.
    ///
    /// Cell `(i, j)` takes the layers of source cell
    /// `(floor(i * src_rows / rows), floor(j * src_cols / cols))`; stacks grow or shrink to
    /// the source's layer count.
    #[tracing::instrument(
        skip_all,
        fields(src_rows = source.rows(), src_columns = source.columns())
    )]
    pub fn resample_from(&mut self, source: &Grid) {
        let (rows, columns) = (self.rows(), self.columns());
        let (src_rows, src_columns) = (source.rows(), source.columns());
        let src_cells = source.cells();

        for cell in self.cells_mut() {
            let si = cell.row() * src_rows / rows;
            let sj = cell.col() * src_columns / columns;
            cell.stack
                .copy_layers_from(&src_cells[si * src_columns + sj].stack);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/resample.rs"]
mod tests;
