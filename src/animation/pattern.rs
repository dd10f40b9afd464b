use std::f64::consts::{FRAC_PI_4, TAU};

use kurbo::{Affine, Point, Size, Vec2};

use crate::foundation::math::{fract, mix, smoothstep};
use crate::paint::color::{CHANNEL_MAX, Rgb, Rgba};

/// Background generator: a pure function of position and time.
///
/// `p` is in canvas units where the canvas spans `extent` (width scaled by the aspect ratio,
/// height 1).
pub trait Pattern: std::fmt::Debug {
    /// Color at `p` and `time` seconds.
    fn sample(&self, p: Point, extent: Size, time: f64) -> Rgba;
}

/// Tiled rings whose radii pulse with distance from the origin tile.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingPattern {
    /// Tiles per canvas unit.
    pub density: f64,
    /// Angular speed of the radius wave, radians per second.
    pub speed: f64,
    /// Ring diameter at the wave trough.
    pub min_diam: f64,
    /// Ring diameter at the wave crest.
    pub max_diam: f64,
}

impl Default for RingPattern {
    fn default() -> Self {
        Self {
            density: 8.0,
            speed: 7.0,
            min_diam: 0.5,
            max_diam: 0.8,
        }
    }
}

const RING_EDGE: f64 = 0.00009;
const RING_WEIGHT: f64 = 0.3;

impl RingPattern {
    /// Scalar field `m` accumulated over the 3x3 tile neighborhood.
    pub fn field(&self, p: Point, extent: Size, time: f64) -> f64 {
        let centered = p - Vec2::new(extent.width * 0.5, extent.height * 0.5);
        let uv = (Affine::scale(self.density) * Affine::rotate(-FRAC_PI_4)) * centered;

        let gv = Vec2::new(fract(uv.x), fract(uv.y));
        let id = Vec2::new(uv.x.floor(), uv.y.floor());
        let phase_t = self.wrapped_time(time);

        let mut m = 0.0;
        for i in -1..=1 {
            for j in -1..=1 {
                let offset = Vec2::new(f64::from(i), f64::from(j));
                let d = (gv - offset).hypot();
                let dist = (id + offset).hypot();
                let wave = (dist - self.speed * phase_t).sin() * 0.5 + 0.5;
                let r = mix(self.min_diam, self.max_diam, wave);
                m += smoothstep(r, r - RING_EDGE, d) * RING_WEIGHT;
            }
        }
        m
    }

    /// `time` reduced modulo the wave period, so large times keep full precision.
    fn wrapped_time(&self, time: f64) -> f64 {
        if self.speed == 0.0 || !time.is_finite() {
            return 0.0;
        }
        time.rem_euclid(TAU / self.speed.abs())
    }
}

impl Pattern for RingPattern {
    fn sample(&self, p: Point, extent: Size, time: f64) -> Rgba {
        let m = self.field(p, extent, time);
        let channel = |v: f64| (CHANNEL_MAX * v).clamp(0.0, CHANNEL_MAX);
        Rgba::new(
            channel(m + 0.4),
            channel(m * 0.6 + 0.6),
            channel(m * 0.5 + 0.4),
            1.0,
        )
    }
}

/// Constant opaque color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidPattern(pub Rgb);

impl Pattern for SolidPattern {
    fn sample(&self, _p: Point, _extent: Size, _time: f64) -> Rgba {
        Rgba::opaque(self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pattern.rs"]
mod tests;
