/// Convenience result type used across pixelgrid.
pub type PixelGridResult<T> = Result<T, PixelGridError>;

/// Top-level error taxonomy used by the drawing surface APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixelGridError {
    /// Invalid user-provided configuration, color or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A layer index outside `[0, len)` was selected on a layer stack.
    #[error("layer index {index} out of range (stack has {len} layers)")]
    IndexOutOfRange {
        /// Requested layer index.
        index: usize,
        /// Number of layers in the stack.
        len: usize,
    },

    /// A cell coordinate outside the grid was addressed.
    #[error("cell ({row}, {col}) out of bounds for {rows}x{columns} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        columns: usize,
    },

    /// Errors while producing or rasterizing the vector export.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelGridError {
    /// Build a [`PixelGridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixelGridError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
