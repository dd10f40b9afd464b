//! Application state for one drawing surface, and replayable stroke scripts against it.

use std::time::Duration;

use crate::animation::driver::AnimationDriver;
use crate::brush::engine::BrushEngine;
use crate::brush::pointer::{PointerEvent, PointerState};
use crate::config::{SessionConfig, clamp_grid_size};
use crate::export::svg::export_svg;
use crate::foundation::core::CellCoord;
use crate::foundation::error::PixelGridResult;
use crate::grid::model::Grid;
use crate::paint::color::{Rgb, Rgba};

pub mod script;

/// Owns the live [`Grid`] together with the brush, the background animation and the
/// configuration they were built from.
///
/// Every time-dependent call takes the host's monotonic `now`; the session never reads a
/// clock itself.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    brush: BrushEngine,
    driver: AnimationDriver,
    pointer: PointerState,
}

impl Session {
    /// Validate `config`, build the grid and paint its first background frame.
    #[tracing::instrument(skip(config), fields(rows = config.rows, columns = config.columns))]
    pub fn new(config: SessionConfig, now: Duration) -> PixelGridResult<Self> {
        let config = config.validated()?;
        let mut grid = Grid::new(config.rows, config.columns, config.initial_layer())?;
        grid.init_role_layers(&config.roles)?;

        let brush = BrushEngine::new(
            config.brush_settings()?,
            config.roles,
            config.highlight_delay(),
            config.leave_policy,
        );
        let mut driver = AnimationDriver::new(config.fps()?, config.roles.background);
        match config.solid_background {
            Some(color) => {
                driver.set_solid_background(Some(color), now, &mut grid, config.aspect_ratio)?
            }
            None => driver.start(now, &mut grid, config.aspect_ratio)?,
        }

        tracing::debug!(epoch = grid.epoch(), "session started");
        Ok(Self {
            config,
            grid,
            brush,
            driver,
            pointer: PointerState::default(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn brush(&self) -> &BrushEngine {
        &self.brush
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    pub fn cursor_visible(&self) -> bool {
        self.config.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.config.cursor_visible = visible;
    }

    /// Button pressed. A primary press starts a stroke on the cell under the pointer.
    ///
    /// Off-canvas presses only update the button state.
    pub fn pointer_down(&mut self, event: PointerEvent, now: Duration) -> PixelGridResult<()> {
        let cell = self.hover(event, now)?;
        let changes = self.pointer.press(event.kind, event.button);
        if let Some(cell) = cell.filter(|_| changes.primary && self.pointer.primary_pressed()) {
            self.brush.pointer_down(&mut self.grid, cell)?;
        }
        Ok(())
    }

    /// Pointer moved. Off-canvas positions are ignored; the host reports leaving separately.
    pub fn pointer_move(&mut self, event: PointerEvent, now: Duration) -> PixelGridResult<()> {
        self.hover(event, now).map(|_| ())
    }

    /// Button released. Releasing the last primary button paints the selected cell, if a
    /// stroke is still in progress.
    pub fn pointer_up(&mut self, event: PointerEvent, now: Duration) -> PixelGridResult<()> {
        self.hover(event, now)?;
        let changes = self.pointer.release(event.kind, event.button);
        if changes.primary && !self.pointer.primary_pressed() {
            self.brush.pointer_up(&mut self.grid, event.kind)?;
        }
        Ok(())
    }

    /// Pointer left the drawing surface.
    pub fn pointer_leave(&mut self, now: Duration) -> PixelGridResult<()> {
        self.brush.container_leave(&mut self.grid, now)
    }

    /// Run the animation tick and highlight reverts due at `now`. Returns whether a tick ran.
    pub fn poll(&mut self, now: Duration) -> PixelGridResult<bool> {
        let ticked = self
            .driver
            .poll(now, &mut self.grid, self.config.aspect_ratio)?;
        self.brush.poll(&mut self.grid, now)?;
        Ok(ticked)
    }

    /// Replace the grid with a `rows x columns` one (clamped), resampled from the current.
    ///
    /// Pending highlight reverts are dropped and any stroke in progress ends without paint.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, rows: usize, columns: usize, now: Duration) -> PixelGridResult<()> {
        let (rows, columns) = (clamp_grid_size(rows), clamp_grid_size(columns));
        let roles = self.config.roles;

        let mut next = Grid::new(rows, columns, self.config.initial_layer())?;
        next.init_role_layers(&roles)?;
        next.resample_from(&self.grid);
        next.set_layer_color(roles.highlight, Rgba::TRANSPARENT)?;

        self.brush.cancel_pending();
        self.grid = next;
        self.config.rows = rows;
        self.config.columns = columns;
        self.repaint_background(now)?;
        tracing::debug!(epoch = self.grid.epoch(), "grid replaced");
        Ok(())
    }

    /// Wipe every layer above the bottom one, then repaint the background.
    pub fn clear(&mut self, now: Duration) -> PixelGridResult<()> {
        self.brush.cancel_pending();
        self.grid.reset_all();
        self.grid.init_role_layers(&self.config.roles)?;
        self.repaint_background(now)
    }

    /// SVG document of the current composite at the configured export size.
    pub fn export_svg(&self) -> PixelGridResult<String> {
        export_svg(&self.grid, self.config.export_width, self.config.export_height)
    }

    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }

    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush.settings_mut().set_color(color);
        self.config.brush_color = color;
    }

    pub fn set_brush_opacity(&mut self, opacity: f64) -> PixelGridResult<()> {
        self.brush.settings_mut().set_opacity(opacity)?;
        self.config.brush_opacity = self.brush.settings().opacity();
        Ok(())
    }

    pub fn set_solid_background(
        &mut self,
        solid: Option<Rgb>,
        now: Duration,
    ) -> PixelGridResult<()> {
        self.config.solid_background = solid;
        self.driver
            .set_solid_background(solid, now, &mut self.grid, self.config.aspect_ratio)
    }

    /// Flip between the animated pattern and `solid_background_color`.
    pub fn toggle_solid_background(&mut self, now: Duration) -> PixelGridResult<()> {
        let solid = match self.config.solid_background {
            Some(_) => None,
            None => Some(self.config.solid_background_color),
        };
        self.set_solid_background(solid, now)
    }

    pub fn set_visible(&mut self, visible: bool, now: Duration) -> PixelGridResult<()> {
        self.driver
            .set_visible(visible, now, &mut self.grid, self.config.aspect_ratio)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.driver.set_paused(paused);
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.driver.toggle_paused()
    }

    /// Move the hover to the cell under `event`; `None` when the event is off the canvas.
    fn hover(&mut self, event: PointerEvent, now: Duration) -> PixelGridResult<Option<CellCoord>> {
        if !event.is_on_canvas() {
            return Ok(None);
        }
        let cell = self.grid.coord_at_normalized(event.x, event.y);
        self.brush
            .pointer_enter(&mut self.grid, cell, event.kind, now)?;
        Ok(Some(cell))
    }

    fn repaint_background(&mut self, now: Duration) -> PixelGridResult<()> {
        let aspect = self.config.aspect_ratio;
        match self.driver.solid_background() {
            Some(color) => {
                self.driver
                    .set_solid_background(Some(color), now, &mut self.grid, aspect)
            }
            None => self.driver.render_frame(&mut self.grid, aspect),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
