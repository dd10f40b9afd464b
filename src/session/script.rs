use std::time::Duration;

use crate::brush::pointer::{PointerEvent, PointerKind};
use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::paint::color::Rgb;
use crate::session::Session;

/// One step of a recorded interaction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        button: u8,
        x: f64,
        y: f64,
    },
    Move {
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        button: u8,
        x: f64,
        y: f64,
    },
    Up {
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        button: u8,
        x: f64,
        y: f64,
    },
    /// Pointer left the drawing surface.
    Leave,
    /// Advance the virtual clock.
    Wait { ms: u64 },
    Resize { rows: usize, columns: usize },
    Clear,
    /// Toggle the background animation's pause state.
    Pause,
    /// Change brush color and/or opacity.
    Brush {
        #[serde(default)]
        color: Option<Rgb>,
        #[serde(default)]
        opacity: Option<f64>,
    },
}

/// Ordered interaction replayed against a [`Session`] on a virtual clock.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeScript {
    pub events: Vec<ScriptEvent>,
}

impl StrokeScript {
    pub fn from_json(text: &str) -> PixelGridResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| PixelGridError::validation(format!("stroke script json: {e}")))
    }

    /// Apply every event starting at `start`; returns the clock value after the last one.
    ///
    /// The clock only moves on `wait`, and the session is polled once per frame period
    /// while it does, plus once at the end of the wait.
    #[tracing::instrument(skip_all, fields(events = self.events.len()))]
    pub fn replay(&self, session: &mut Session, start: Duration) -> PixelGridResult<Duration> {
        let mut now = start;
        for event in &self.events {
            tracing::trace!(?event, ?now, "replay");
            match *event {
                ScriptEvent::Down {
                    pointer,
                    button,
                    x,
                    y,
                } => session.pointer_down(PointerEvent::new(pointer, button, x, y), now)?,
                ScriptEvent::Move {
                    pointer,
                    button,
                    x,
                    y,
                } => session.pointer_move(PointerEvent::new(pointer, button, x, y), now)?,
                ScriptEvent::Up {
                    pointer,
                    button,
                    x,
                    y,
                } => session.pointer_up(PointerEvent::new(pointer, button, x, y), now)?,
                ScriptEvent::Leave => session.pointer_leave(now)?,
                ScriptEvent::Wait { ms } => now = advance(session, now, ms)?,
                ScriptEvent::Resize { rows, columns } => session.resize(rows, columns, now)?,
                ScriptEvent::Clear => session.clear(now)?,
                ScriptEvent::Pause => {
                    session.toggle_paused();
                }
                ScriptEvent::Brush { color, opacity } => {
                    if let Some(color) = color {
                        session.set_brush_color(color);
                    }
                    if let Some(opacity) = opacity {
                        session.set_brush_opacity(opacity)?;
                    }
                }
            }
        }
        Ok(now)
    }
}

fn advance(session: &mut Session, from: Duration, ms: u64) -> PixelGridResult<Duration> {
    let end = from + Duration::from_millis(ms);
    let period = session.driver().fps().period();
    let mut now = from;
    while now + period < end {
        now += period;
        session.poll(now)?;
    }
    session.poll(end)?;
    Ok(end)
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
