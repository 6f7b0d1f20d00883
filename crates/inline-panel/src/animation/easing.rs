//! Easing curves for the cosmetic animations.

use std::f32::consts::PI;

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Sinusoidal ease-in-out, the classic "swing" curve of slide effects.
    #[default]
    Swing,
    /// Quadratic ease-out.
    EaseOut,
}

/// Apply an easing function to a progress value in `0.0..=1.0`.
///
/// # Example
///
/// ```
/// use inline_panel::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert!((ease(Easing::Swing, 0.5) - 0.5).abs() < 1e-6);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::Swing => 0.5 - (t * PI).cos() / 2.0,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::Swing, Easing::EaseOut] {
            assert!(ease(easing, 0.0).abs() < 1e-6);
            assert!((ease(easing, 1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(ease(Easing::Linear, -1.0), 0.0);
        assert_eq!(ease(Easing::Linear, 2.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp_eased(Easing::Linear, 2.0, 4.0, 0.5), 3.0);
    }
}
