use std::fmt::Write as _;

use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::grid::model::Grid;

pub const DEFAULT_EXPORT_WIDTH: f64 = 256.0;
pub const DEFAULT_EXPORT_HEIGHT: f64 = 256.0;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "sketch.svg";

/// Serialize the grid's composite colors as an SVG document of `width x height` user units.
///
/// One `<rect>` per cell, row-major, stroked with its own fill color.
#[tracing::instrument(skip(grid), fields(rows = grid.rows(), columns = grid.columns()))]
pub fn export_svg(grid: &Grid, width: f64, height: f64) -> PixelGridResult<String> {
    check_extent(width, height)?;

    let mut out = String::with_capacity(96 * grid.cell_count() + 128);
    write_svg(&mut out, grid, width, height)
        .map_err(|e| PixelGridError::export(format!("format svg: {e}")))?;
    tracing::debug!(bytes = out.len(), "svg exported");
    Ok(out)
}

fn write_svg(out: &mut String, grid: &Grid, width: f64, height: f64) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    for (rect, color) in grid.cell_rects(width, height) {
        let hex = color.rgb();
        write!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{hex}" stroke="{hex}" stroke-width="0.5""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        )?;
        if color.a < 1.0 {
            write!(out, r#" fill-opacity="{}""#, color.a)?;
        }
        writeln!(out, "/>")?;
    }
    writeln!(out, "</svg>")
}

/// Parse `svg` and render it into a `width x height` premultiplied RGBA8 buffer.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> PixelGridResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PixelGridError::validation(format!(
            "raster size must be non-zero, got {width}x{height}"
        )));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| PixelGridError::export(format!("parse svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PixelGridError::export("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

fn check_extent(width: f64, height: f64) -> PixelGridResult<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(PixelGridError::validation(format!(
            "export size must be finite and positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
