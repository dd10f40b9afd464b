/// Digital line interpolation between cells.
pub mod line;
/// Grid arena, cells and layer roles.
pub mod model;
mod resample;
