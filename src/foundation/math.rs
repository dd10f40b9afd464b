/// Hermite interpolation between two edges.
///
/// Edges may be given in either order; with `lo > hi` the curve falls from 1 to 0,
/// which the ring pattern uses to produce filled discs.
pub(crate) fn smoothstep(lo: f64, hi: f64, x: f64) -> f64 {
    let t = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub(crate) fn mix(lo: f64, hi: f64, t: f64) -> f64 {
    lo * (1.0 - t) + hi * t
}

/// Fractional part in `[0, 1)`, also for negative inputs.
pub(crate) fn fract(x: f64) -> f64 {
    x - x.floor()
}
