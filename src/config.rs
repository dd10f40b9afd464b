use std::time::Duration;

use crate::brush::engine::{BrushSettings, LeavePolicy};
use crate::export::svg::{DEFAULT_EXPORT_FILE_NAME, DEFAULT_EXPORT_HEIGHT, DEFAULT_EXPORT_WIDTH};
use crate::foundation::core::Fps;
use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::grid::model::LayerRoles;
use crate::paint::color::{ColorLayer, Rgb, Rgba};

/// Smallest accepted row/column count.
pub const MIN_GRID_SIZE: usize = 16;
/// Largest accepted row/column count.
pub const MAX_GRID_SIZE: usize = 128;
/// Row/column count of a fresh session.
pub const DEFAULT_GRID_SIZE: usize = 32;

/// Clamp a requested row/column count into `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
pub fn clamp_grid_size(n: usize) -> usize {
    n.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything a [`Session`](crate::session::Session) is configured with. Every field is optional
/// in JSON.
pub struct SessionConfig {
    /// Grid rows, clamped to `[16, 128]`.
    #[serde(default = "default_grid_size")]
    pub rows: usize,
    /// Grid columns, clamped to `[16, 128]`.
    #[serde(default = "default_grid_size")]
    pub columns: usize,
    /// Bottom layer color; black when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_color: Option<Rgb>,
    #[serde(default = "default_brush_color")]
    pub brush_color: Rgb,
    /// Alpha added per paint step, `[0, 1]`, quantized to 0.01.
    #[serde(default = "default_brush_opacity")]
    pub brush_opacity: f64,
    /// Solid background instead of the animated pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solid_background: Option<Rgb>,
    /// Color used when the solid background is toggled on.
    #[serde(default = "default_solid_background_color")]
    pub solid_background_color: Rgb,
    #[serde(default = "default_true")]
    pub cursor_visible: bool,
    /// Animation ticks per second.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Canvas width over height, used when sampling the background pattern.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Delay before a left cell loses its highlight during a stroke.
    #[serde(default = "default_highlight_delay_ms")]
    pub highlight_delay_ms: u64,
    #[serde(default)]
    pub leave_policy: LeavePolicy,
    #[serde(default)]
    pub roles: LayerRoles,
    #[serde(default = "default_export_width")]
    pub export_width: f64,
    #[serde(default = "default_export_height")]
    pub export_height: f64,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIZE,
            columns: DEFAULT_GRID_SIZE,
            initial_color: None,
            brush_color: default_brush_color(),
            brush_opacity: default_brush_opacity(),
            solid_background: None,
            solid_background_color: default_solid_background_color(),
            cursor_visible: true,
            fps: default_fps(),
            aspect_ratio: default_aspect_ratio(),
            highlight_delay_ms: default_highlight_delay_ms(),
            leave_policy: LeavePolicy::default(),
            roles: LayerRoles::default(),
            export_width: DEFAULT_EXPORT_WIDTH,
            export_height: DEFAULT_EXPORT_HEIGHT,
            export_file_name: default_export_file_name(),
        }
    }
}

impl SessionConfig {
    /// Parse JSON and validate.
    pub fn from_json(text: &str) -> PixelGridResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| PixelGridError::validation(format!("config json: {e}")))?;
        config.validated()
    }

    /// Clamp the fields that have a documented range and reject everything else out of range.
    pub fn validated(mut self) -> PixelGridResult<Self> {
        self.rows = clamp_grid_size(self.rows);
        self.columns = clamp_grid_size(self.columns);

        self.brush_opacity = self.brush_settings()?.opacity();
        self.fps()?;
        self.roles.validate()?;
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(PixelGridError::validation(format!(
                "aspect_ratio must be finite and > 0, got {}",
                self.aspect_ratio
            )));
        }
        let extent = [
            ("export_width", self.export_width),
            ("export_height", self.export_height),
        ];
        for (name, v) in extent {
            if !(v.is_finite() && v > 0.0) {
                return Err(PixelGridError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.export_file_name.trim().is_empty() {
            return Err(PixelGridError::validation("export_file_name must not be empty"));
        }
        Ok(self)
    }

    pub fn fps(&self) -> PixelGridResult<Fps> {
        Fps::new(self.fps, 1)
    }

    pub fn highlight_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_delay_ms)
    }

    pub fn brush_settings(&self) -> PixelGridResult<BrushSettings> {
        BrushSettings::new(self.brush_color, self.brush_opacity)
    }

    /// Opaque bottom layer for every cell.
    pub fn initial_layer(&self) -> ColorLayer {
        ColorLayer::from_rgba(Rgba::opaque(self.initial_color.unwrap_or(Rgb::BLACK)))
    }
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_brush_color() -> Rgb {
    Rgb::BLACK
}

fn default_brush_opacity() -> f64 {
    0.1
}

fn default_solid_background_color() -> Rgb {
    Rgb::WHITE
}

fn default_true() -> bool {
    true
}

fn default_fps() -> u32 {
    32
}

fn default_aspect_ratio() -> f64 {
    1.0
}

fn default_highlight_delay_ms() -> u64 {
    200
}

fn default_export_width() -> f64 {
    DEFAULT_EXPORT_WIDTH
}

fn default_export_height() -> f64 {
    DEFAULT_EXPORT_HEIGHT
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_owned()
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
