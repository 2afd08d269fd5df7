//! Math utilities and types
//!
//! The input core only needs 2D vectors: stick positions, D-pad directions
//! and the semantic directional axes.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Scale `vector` down to unit length if its magnitude exceeds 1.
///
/// Vectors already inside the unit circle are left untouched, so partial
/// stick deflection survives.
pub fn clamp_to_unit(vector: &mut Vec2) {
    if vector.magnitude() > 1.0 {
        vector.normalize_mut();
    }
}

/// Check whether both components are exactly zero
pub fn is_zero(vector: &Vec2) -> bool {
    vector.x == 0.0 && vector.y == 0.0
}

/// Apply a radial deadzone, rescaling the live range back to `0.0..=1.0`.
///
/// Magnitudes at or below `deadzone` collapse to zero. Anything above is
/// remapped so that the edge of the deadzone reads as 0 and full deflection
/// still reads as 1.
pub fn apply_radial_deadzone(vector: Vec2, deadzone: f32) -> Vec2 {
    let magnitude = vector.magnitude();
    if magnitude <= deadzone || magnitude == 0.0 {
        return Vec2::zeros();
    }

    let live_range = 1.0 - deadzone;
    if live_range <= 0.0 {
        return Vec2::zeros();
    }

    let scaled = ((magnitude - deadzone) / live_range).min(1.0);
    vector * (scaled / magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_scales_long_vectors_to_unit() {
        let mut v = Vec2::new(1.0, 1.0);
        clamp_to_unit(&mut v);
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.x, v.y, epsilon = 1e-6);
    }

    #[test]
    fn test_clamp_keeps_short_vectors() {
        let mut v = Vec2::new(0.3, -0.4);
        clamp_to_unit(&mut v);
        assert_eq!(v, Vec2::new(0.3, -0.4));

        let mut unit = Vec2::new(0.0, 1.0);
        clamp_to_unit(&mut unit);
        assert_eq!(unit, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_deadzone_zeroes_small_input() {
        assert!(is_zero(&apply_radial_deadzone(Vec2::new(0.1, 0.1), 0.25)));
        assert!(is_zero(&apply_radial_deadzone(Vec2::zeros(), 0.25)));
    }

    #[test]
    fn test_deadzone_rescales_live_range() {
        let full = apply_radial_deadzone(Vec2::new(1.0, 0.0), 0.25);
        assert_relative_eq!(full.x, 1.0, epsilon = 1e-6);

        let half = apply_radial_deadzone(Vec2::new(0.0, -0.625), 0.25);
        assert_relative_eq!(half.y, -0.5, epsilon = 1e-6);
        assert_relative_eq!(half.x, 0.0);
    }
}
