/// Color values and the per-layer "over" compositing law.
pub mod color;
/// Per-cell layer stacks and their cached composite.
pub mod stack;
