use std::ops::ControlFlow;
use std::time::Duration;

use kurbo::{Point, Size};

use crate::animation::pattern::{Pattern, RingPattern};
use crate::foundation::core::Fps;
use crate::foundation::error::PixelGridResult;
use crate::grid::model::Grid;
use crate::paint::color::{Rgb, Rgba};

/// Periodic timer state. Ticks never overlap: one due tick fires per poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTimer {
    /// No ticks fire until re-armed.
    Cancelled,
    /// The next tick fires once the clock reaches `next_due`.
    Armed {
        /// Host-clock instant of the next tick.
        next_due: Duration,
    },
}

/// Drives the background layer of every cell from a [`Pattern`] at a fixed rate.
///
/// The host owns the clock and passes `now` (a monotonic offset) to every call. The timer
/// is cancelled while the view is hidden or a solid background is shown; pausing keeps it
/// firing but freezes `time`.
#[derive(Debug)]
pub struct AnimationDriver {
    fps: Fps,
    pattern: Box<dyn Pattern>,
    background_layer: usize,
    time: f64,
    paused: bool,
    visible: bool,
    solid_background: Option<Rgb>,
    timer: FrameTimer,
}

impl AnimationDriver {
    /// Driver with the default [`RingPattern`].
    pub fn new(fps: Fps, background_layer: usize) -> Self {
        Self::with_pattern(fps, background_layer, Box::new(RingPattern::default()))
    }

    pub fn with_pattern(fps: Fps, background_layer: usize, pattern: Box<dyn Pattern>) -> Self {
        Self {
            fps,
            pattern,
            background_layer,
            time: 0.0,
            paused: false,
            visible: true,
            solid_background: None,
            timer: FrameTimer::Cancelled,
        }
    }

    /// Animation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.timer, FrameTimer::Armed { .. })
    }

    pub fn timer(&self) -> FrameTimer {
        self.timer
    }

    pub fn solid_background(&self) -> Option<Rgb> {
        self.solid_background
    }

    /// Paint the initial background and arm the timer when animating.
    pub fn start(&mut self, now: Duration, grid: &mut Grid, aspect: f64) -> PixelGridResult<()> {
        match self.solid_background {
            Some(color) => {
                self.timer = FrameTimer::Cancelled;
                self.paint_solid(grid, color)
            }
            None => self.resume(now, grid, aspect),
        }
    }

    /// Fire the timer if it is due. Returns whether a tick ran.
    ///
    /// An overrunning host gets the next tick one period after `now` rather than a burst
    /// of catch-up ticks.
    pub fn poll(&mut self, now: Duration, grid: &mut Grid, aspect: f64) -> PixelGridResult<bool> {
        let FrameTimer::Armed { next_due } = self.timer else {
            return Ok(false);
        };
        if now < next_due {
            return Ok(false);
        }

        let period = self.fps.period();
        let mut next = next_due + period;
        if next <= now {
            next = now + period;
        }
        self.timer = FrameTimer::Armed { next_due: next };

        if !self.paused {
            self.time += self.fps.frame_duration_secs();
            self.render_frame(grid, aspect)?;
            tracing::trace!(time = self.time, "background tick");
        }
        Ok(true)
    }

    /// Rewrite every background layer from the pattern at the current time.
    pub fn render_frame(&self, grid: &mut Grid, aspect: f64) -> PixelGridResult<()> {
        let (rows, columns) = (grid.rows() as f64, grid.columns() as f64);
        let extent = Size::new(aspect, 1.0);
        let layer = self.background_layer;
        grid.for_each_cell_mut(|cell| {
            let p = Point::new(cell.col() as f64 / columns * aspect, cell.row() as f64 / rows);
            let color = self.pattern.sample(p, extent, self.time);
            cell.stack.with_layer(layer, |l| l.set_rgba(color))?;
            Ok(ControlFlow::Continue(()))
        })
    }

    /// Host view shown or hidden. Showing re-renders one frame at once, then re-arms.
    pub fn set_visible(
        &mut self,
        visible: bool,
        now: Duration,
        grid: &mut Grid,
        aspect: f64,
    ) -> PixelGridResult<()> {
        if self.visible == visible {
            return Ok(());
        }
        self.visible = visible;
        tracing::debug!(visible, "animation visibility changed");
        if self.solid_background.is_some() {
            return Ok(());
        }
        if visible {
            self.resume(now, grid, aspect)
        } else {
            self.timer = FrameTimer::Cancelled;
            Ok(())
        }
    }

    /// Switch between a solid background (`Some`) and the animated pattern (`None`).
    pub fn set_solid_background(
        &mut self,
        solid: Option<Rgb>,
        now: Duration,
        grid: &mut Grid,
        aspect: f64,
    ) -> PixelGridResult<()> {
        self.solid_background = solid;
        tracing::debug!(solid = ?solid.map(|c| c.to_string()), "background mode changed");
        match solid {
            Some(color) => {
                self.timer = FrameTimer::Cancelled;
                self.paint_solid(grid, color)
            }
            None if self.visible => self.resume(now, grid, aspect),
            None => Ok(()),
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    fn resume(&mut self, now: Duration, grid: &mut Grid, aspect: f64) -> PixelGridResult<()> {
        self.render_frame(grid, aspect)?;
        self.timer = FrameTimer::Armed {
            next_due: now + self.fps.period(),
        };
        Ok(())
    }

    fn paint_solid(&self, grid: &mut Grid, color: Rgb) -> PixelGridResult<()> {
        grid.set_layer_color(self.background_layer, Rgba::opaque(color))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
