/// Input device that produced a pointer event.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Mouse; buttons 0 (left), 1 (middle), 2 (right).
    #[default]
    Mouse,
    /// Stylus; buttons 0 (tip contact), 2 (barrel), 5 (eraser).
    Pen,
    /// Touch contact; the button id is ignored.
    Touch,
}

/// Raw button ids as reported by pointer events.
pub mod button {
    /// Left mouse button.
    pub const LEFT_MOUSE: u8 = 0;
    /// Middle mouse button.
    pub const MIDDLE_MOUSE: u8 = 1;
    /// Right mouse button.
    pub const RIGHT_MOUSE: u8 = 2;
    /// Pen tip touching the surface.
    pub const PEN_CONTACT: u8 = 0;
    /// Pen barrel button.
    pub const PEN_BARREL: u8 = 2;
    /// Pen eraser end.
    pub const PEN_ERASER: u8 = 5;
    /// Touch contact.
    pub const TOUCH_CONTACT: u8 = 0;
}

/// One pointer event in canvas-fraction coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Device kind.
    pub kind: PointerKind,
    /// Raw button id, see [`button`].
    #[serde(default)]
    pub button: u8,
    /// Horizontal position, `0` = left edge, `1` = right edge.
    pub x: f64,
    /// Vertical position, `0` = top edge, `1` = bottom edge.
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, button: u8, x: f64, y: f64) -> Self {
        Self { kind, button, x, y }
    }

    /// Whether `(x, y)` lies on the canvas, edges included.
    pub fn is_on_canvas(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Left mouse button at `(x, y)`.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Mouse, button::LEFT_MOUSE, x, y)
    }
}

/// Which normalized buttons changed state on a press or release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonChanges {
    pub primary: bool,
    pub middle: bool,
    pub auxiliary: bool,
}

/// Per-device button flags folded into primary / middle / auxiliary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    left_mouse: bool,
    middle_mouse: bool,
    right_mouse: bool,
    pen_contact: bool,
    pen_barrel: bool,
    pen_eraser: bool,
    touch: bool,
}

impl PointerState {
    /// Left mouse, pen tip or touch.
    pub fn primary_pressed(&self) -> bool {
        self.left_mouse || self.pen_contact || self.touch
    }

    pub fn middle_pressed(&self) -> bool {
        self.middle_mouse
    }

    /// Right mouse, pen barrel or pen eraser.
    pub fn auxiliary_pressed(&self) -> bool {
        self.right_mouse || self.pen_barrel || self.pen_eraser
    }

    pub fn press(&mut self, kind: PointerKind, button: u8) -> ButtonChanges {
        self.update(kind, button, true)
    }

    pub fn release(&mut self, kind: PointerKind, button: u8) -> ButtonChanges {
        self.update(kind, button, false)
    }

    /// Forget every pressed button.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn update(&mut self, kind: PointerKind, id: u8, down: bool) -> ButtonChanges {
        let before = *self;
        match kind {
            PointerKind::Mouse => match id {
                button::LEFT_MOUSE => self.left_mouse = down,
                button::MIDDLE_MOUSE => self.middle_mouse = down,
                button::RIGHT_MOUSE => self.right_mouse = down,
                _ => {}
            },
            PointerKind::Pen => match id {
                button::PEN_CONTACT => self.pen_contact = down,
                button::PEN_BARREL => self.pen_barrel = down,
                button::PEN_ERASER => self.pen_eraser = down,
                _ => {}
            },
            PointerKind::Touch => self.touch = down,
        }
        ButtonChanges {
            primary: before.primary_pressed() != self.primary_pressed(),
            middle: before.middle_pressed() != self.middle_pressed(),
            auxiliary: before.auxiliary_pressed() != self.auxiliary_pressed(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/pointer.rs"]
mod tests;
