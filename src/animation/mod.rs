/// Fixed-rate background animation.
pub mod driver;
/// Procedural background patterns.
pub mod pattern;
