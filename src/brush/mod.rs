//! Pointer input and the stroke state machine that turns it into paint.

pub mod engine;
pub mod pointer;
pub mod schedule;
