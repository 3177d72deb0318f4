//! Small vector and hashing helpers shared by the shadow model and the RNG.

use glam::Vec2;

/// FNV-1a 32-bit hash of a string's UTF-16 code units.
///
/// Used to turn string seeds into numeric RNG seeds.
pub fn fnv1a(value: &str) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for unit in value.encode_utf16() {
        hash ^= unit as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// Rotate `v` by `angle` radians (counter-clockwise in a Y-up frame).
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Clamp the magnitude of `v` to `max`. A `max` of zero or less leaves `v` untouched.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    if max > 0.0 {
        v.clamp_length_max(max)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_values() {
        assert_eq!(fnv1a(""), 2_166_136_261);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((r - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn clamp_zero_means_unclamped() {
        let v = Vec2::new(30.0, 40.0);
        assert_eq!(clamp_magnitude(v, 0.0), v);
        assert!((clamp_magnitude(v, 5.0).length() - 5.0).abs() < 1e-5);
    }
}
