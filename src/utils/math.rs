//! # Animation Mathematics
//!
//! Closed-form easing polynomials and the sine pulse used for glowing cards.

use std::f32::consts::PI;

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Cubic ease-in-out.
///
/// # Examples
///
/// ```
/// use tienlen_render::ease_in_out_cubic;
///
/// assert_eq!(ease_in_out_cubic(0.0), 0.0);
/// assert_eq!(ease_in_out_cubic(0.5), 0.5);
/// assert_eq!(ease_in_out_cubic(1.0), 1.0);
/// ```
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-in-out, used for the dealing bounce.
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Glow intensity oscillating between `min` and `max` with the given period.
///
/// `now_ms` is wall-clock time; the phase is not anchored to any animation.
pub fn pulse(now_ms: f64, period_ms: f64, min: f32, max: f32) -> f32 {
    let phase = ((now_ms % period_ms) / period_ms) as f32;
    let mid = (min + max) / 2.0;
    let amplitude = (max - min) / 2.0;
    mid + amplitude * (phase * 2.0 * PI).sin()
}
