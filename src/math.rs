pub use std::f32::consts::TAU;

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(value.min(max))
}

/// Wraps an angle into `[0, 2π)`.
pub fn clamp_angle(value: f32) -> f32 {
    let wrapped = value.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn clamp_angle_wraps_into_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let a = (rng.f32() - 0.5) * 40.0 * PI;
            let w = clamp_angle(a);
            assert!((0.0..TAU).contains(&w), "{a} -> {w}");
            // same direction
            assert!((w.cos() - a.cos()).abs() < 1e-3);
            assert!((w.sin() - a.sin()).abs() < 1e-3);
        }
        assert_eq!(clamp_angle(TAU), 0.0);
        assert!((clamp_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-6);
        assert_eq!(clamp_angle(-1e-9), 0.0);
    }

    #[test]
    fn clamp_angle_idempotent_in_range() {
        for a in [0.0, 0.5, PI, 1.5 * PI, TAU - 1e-4] {
            assert_eq!(clamp_angle(a), a);
            assert_eq!(clamp_angle(clamp_angle(a)), clamp_angle(a));
        }
    }

    #[test]
    fn degree_conversion() {
        assert!((to_radians(180.0) - PI).abs() < 1e-6);
        assert!((to_degrees(PI / 2.0) - 90.0).abs() < 1e-4);
    }
}
