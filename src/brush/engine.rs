use std::time::Duration;

use crate::brush::pointer::PointerKind;
use crate::brush::schedule::RevertQueue;
use crate::foundation::core::CellCoord;
use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::grid::model::{Grid, LayerRoles};
use crate::paint::color::{ColorLayer, Rgb, Rgba};

/// What happens to an active stroke when the pointer leaves the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// Paint the selected cell once, as a release would.
    #[default]
    Finalize,
    /// Drop the selection without painting.
    Discard,
}

/// Brush color and per-step opacity increment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSettings {
    color: Rgb,
    opacity: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            opacity: 0.1,
        }
    }
}

impl BrushSettings {
    pub fn new(color: Rgb, opacity: f64) -> PixelGridResult<Self> {
        let mut settings = Self {
            color,
            ..Self::default()
        };
        settings.set_opacity(opacity)?;
        Ok(settings)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Opacity in `[0, 1]`, quantized to steps of 0.01.
    pub fn set_opacity(&mut self, opacity: f64) -> PixelGridResult<()> {
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(PixelGridError::validation(format!(
                "brush opacity must be in [0, 1], got {opacity}"
            )));
        }
        self.opacity = (opacity * 100.0).round() / 100.0;
        Ok(())
    }
}

/// Stroke state machine: idle, or dragging with the last entered cell selected.
///
/// Painting happens synchronously when a dragged pointer leaves a cell and on release.
/// Only the hover highlight is reverted later, through the [`RevertQueue`].
#[derive(Clone, Debug)]
pub struct BrushEngine {
    settings: BrushSettings,
    roles: LayerRoles,
    highlight_delay: Duration,
    leave_policy: LeavePolicy,
    hovered: Option<CellCoord>,
    dragging: bool,
    reverts: RevertQueue,
}

impl Default for BrushEngine {
    fn default() -> Self {
        Self::new(
            BrushSettings::default(),
            LayerRoles::default(),
            Duration::from_millis(200),
            LeavePolicy::default(),
        )
    }
}

impl BrushEngine {
    pub fn new(
        settings: BrushSettings,
        roles: LayerRoles,
        highlight_delay: Duration,
        leave_policy: LeavePolicy,
    ) -> Self {
        Self {
            settings,
            roles,
            highlight_delay,
            leave_policy,
            hovered: None,
            dragging: false,
            reverts: RevertQueue::new(),
        }
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.settings
    }

    pub fn roles(&self) -> LayerRoles {
        self.roles
    }

    pub fn leave_policy(&self) -> LeavePolicy {
        self.leave_policy
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cell the pointer was last seen over, whether or not a stroke is active.
    pub fn hovered(&self) -> Option<CellCoord> {
        self.hovered
    }

    /// The stroke's armed cell; `None` while idle.
    pub fn selected(&self) -> Option<CellCoord> {
        self.hovered.filter(|_| self.dragging)
    }

    /// Highlight reverts still waiting.
    pub fn pending_reverts(&self) -> usize {
        self.reverts.pending()
    }

    /// Apply one brush step to the brush layer of `cell`.
    ///
    /// A layer already holding the brush color gains `opacity` alpha; any other color gets
    /// a `(brush, opacity)` patch composited over it.
    pub fn paint_step(&self, grid: &mut Grid, cell: CellCoord) -> PixelGridResult<()> {
        let BrushSettings { color, opacity } = self.settings;
        grid.cell_at_mut(cell)?
            .stack
            .with_layer(self.roles.brush, |layer| {
                if layer.same_rgb(color) {
                    layer.set_rgba(color.with_alpha(layer.alpha() + opacity));
                } else {
                    layer.merge_over(&ColorLayer::from_rgba(color.with_alpha(opacity)));
                }
            })
    }

    /// Primary button pressed over `cell`: highlight it and start a stroke there.
    pub fn pointer_down(&mut self, grid: &mut Grid, cell: CellCoord) -> PixelGridResult<()> {
        if self.hovered != Some(cell) {
            self.highlight(grid, cell)?;
        }
        self.hovered = Some(cell);
        self.dragging = true;
        tracing::trace!(?cell, "stroke started");
        Ok(())
    }

    /// The pointer moved onto `cell`.
    #[tracing::instrument(level = "trace", skip(self, grid))]
    pub fn pointer_enter(
        &mut self,
        grid: &mut Grid,
        cell: CellCoord,
        kind: PointerKind,
        now: Duration,
    ) -> PixelGridResult<()> {
        let previous = self.hovered;
        if previous == Some(cell) {
            return Ok(());
        }
        grid.index_of(cell)?;
        self.highlight(grid, cell)?;

        if let Some(prev) = previous {
            if self.dragging {
                self.paint_step(grid, prev)?;
                for skipped in grid.cells_between(prev, cell)? {
                    self.paint_step(grid, skipped)?;
                }
            }
            if self.dragging && kind != PointerKind::Touch {
                self.reverts
                    .schedule(prev, now + self.highlight_delay, grid.epoch());
            } else {
                self.revert_now(grid, prev)?;
            }
        }
        self.hovered = Some(cell);
        Ok(())
    }

    /// Primary button released: paint the selected cell and go idle.
    pub fn pointer_up(&mut self, grid: &mut Grid, kind: PointerKind) -> PixelGridResult<()> {
        if let Some(cell) = self.selected() {
            self.paint_step(grid, cell)?;
            if kind == PointerKind::Touch {
                self.revert_now(grid, cell)?;
                self.hovered = None;
            }
        }
        self.dragging = false;
        Ok(())
    }

    /// The pointer left the drawing surface.
    pub fn container_leave(&mut self, grid: &mut Grid, now: Duration) -> PixelGridResult<()> {
        if let Some(cell) = self.hovered.take() {
            if self.dragging && self.leave_policy == LeavePolicy::Finalize {
                self.paint_step(grid, cell)?;
                self.reverts
                    .schedule(cell, now + self.highlight_delay, grid.epoch());
            } else {
                self.revert_now(grid, cell)?;
            }
        }
        self.dragging = false;
        Ok(())
    }

    /// Run highlight reverts that are due at `now`.
    pub fn poll(&mut self, grid: &mut Grid, now: Duration) -> PixelGridResult<usize> {
        self.reverts.run_due(now, grid, self.roles.highlight)
    }

    /// Drop queued reverts and any stroke in progress; used when the grid is replaced.
    pub fn cancel_pending(&mut self) {
        self.reverts.cancel_pending();
        self.hovered = None;
        self.dragging = false;
    }

    fn highlight(&mut self, grid: &mut Grid, cell: CellCoord) -> PixelGridResult<()> {
        self.reverts.bump(cell);
        let color = self.settings.color.with_alpha(1.0);
        grid.cell_at_mut(cell)?
            .stack
            .with_layer(self.roles.highlight, |layer| layer.set_rgba(color))
    }

    fn revert_now(&mut self, grid: &mut Grid, cell: CellCoord) -> PixelGridResult<()> {
        self.reverts.bump(cell);
        grid.cell_at_mut(cell)?
            .stack
            .with_layer(self.roles.highlight, |layer| layer.set_rgba(Rgba::TRANSPARENT))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/engine.rs"]
mod tests;
