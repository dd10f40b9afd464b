//! PixelGrid is a layered pixel-grid drawing surface.
//!
//! Every cell of a `rows x columns` [`Grid`] owns a [`LayerStack`] of translucent
//! [`ColorLayer`]s composited bottom-to-top with the "over" operator. Three layers have fixed
//! roles ([`LayerRoles`]):
//!
//! 1. **Background**: an animated [`Pattern`] driven by [`AnimationDriver`], or a solid color
//! 2. **Brush**: accumulated strokes from [`BrushEngine`]
//! 3. **Highlight**: transient hover feedback, reverted through a generation-checked queue
//!
//! A [`Session`] owns the live grid together with the brush, the animation and the
//! [`SessionConfig`], and accepts host commands: pointer events, resize, clear, export.
//! All time-dependent calls take the host's monotonic clock as a `Duration`; nothing in this
//! crate sleeps or spawns.
//!
//! The composite can be exported as SVG ([`export_svg`]) and rasterized with `resvg`
//! ([`rasterize_svg`]).
#![forbid(unsafe_code)]

mod foundation;

/// Background patterns and the fixed-rate driver that paints them.
pub mod animation;
/// Pointer normalization, stroke state machine and delayed highlight reverts.
pub mod brush;
/// Session configuration loaded from JSON.
pub mod config;
/// SVG export and rasterization.
pub mod export;
/// Cell arena, addressing, line interpolation and resampling.
pub mod grid;
/// Color values, layers and per-cell layer stacks.
pub mod paint;
pub mod session;

pub use animation::driver::{AnimationDriver, FrameTimer};
pub use animation::pattern::{Pattern, RingPattern, SolidPattern};
pub use brush::engine::{BrushEngine, BrushSettings, LeavePolicy};
pub use brush::pointer::{ButtonChanges, PointerEvent, PointerKind, PointerState, button};
pub use brush::schedule::{RevertQueue, RevertTask};
pub use config::{
    DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE, SessionConfig, clamp_grid_size,
};
pub use export::svg::{
    DEFAULT_EXPORT_FILE_NAME, DEFAULT_EXPORT_HEIGHT, DEFAULT_EXPORT_WIDTH, export_svg,
    rasterize_svg,
};
pub use foundation::core::{CellCoord, Fps, Point, Rect, Size};
pub use foundation::error::{PixelGridError, PixelGridResult};
pub use grid::line::cells_between;
pub use grid::model::{Cell, Grid, LayerRoles};
pub use paint::color::{ALPHA_MAX, CHANNEL_MAX, ColorLayer, Rgb, Rgba};
pub use paint::stack::LayerStack;
pub use session::Session;
pub use session::script::{ScriptEvent, StrokeScript};
