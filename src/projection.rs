//! Turns ray hits into screen-space wall slabs.

use crate::color::{self, Color};
use crate::math::{TAU, clamp, clamp_angle};
use crate::ray::RayHit;

pub const WALL_COLOR: Color = color::rgb(0xFF, 0x47, 0x57);

/// Distance at which shading saturates. Reuses 2π as a plain distance constant.
pub const MAX_SHADE_DISTANCE: f32 = TAU;

const MIN_SHADE: f32 = 0.15;
const MAX_SHADE_PERCENT: f32 = 90.0;
const X_STEP_DARKEN_PERCENT: f32 = 10.0;

/// Nearest distance a slab is projected at. A ray starting on the face of
/// the wall it hits reports distance 0.
pub const MIN_WALL_DISTANCE: f32 = 1.0e-3;

/// Extra pixels drawn on each side of a slab so neighbouring columns don't seam.
pub const WALL_PADDING: f32 = 1.0;

/// Projects a ray distance onto the view direction to remove fisheye curvature.
#[inline]
pub fn correct_fisheye(distance: f32, view_angle: f32, ray_angle: f32) -> f32 {
    distance * clamp_angle(view_angle - ray_angle).cos()
}

/// Slab height for a corrected distance: `(viewport_height / 2) / distance`.
#[inline]
pub fn wall_height(viewport_height: f32, corrected_distance: f32) -> f32 {
    (viewport_height / 2.0) / corrected_distance
}

/// Darkening percentage for a wall at `distance`.
pub fn shade_percent(distance: f32, x_step: bool) -> f32 {
    let normalized = clamp(distance, 0.0, MAX_SHADE_DISTANCE) / MAX_SHADE_DISTANCE;
    let shade = clamp(normalized, MIN_SHADE, 1.0) * MAX_SHADE_PERCENT;
    if x_step {
        shade + X_STEP_DARKEN_PERCENT
    } else {
        shade
    }
}

/// One vertical wall slab in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Column {
    /// Slab for ray `index` of `ray_count`, from a hit whose distance is
    /// already fisheye corrected.
    pub fn project(
        hit: &RayHit,
        index: usize,
        ray_count: usize,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        let distance = hit.distance.max(MIN_WALL_DISTANCE);
        let height = wall_height(viewport_height, distance);
        let slab_width = viewport_width / ray_count.max(1) as f32;
        let shade = shade_percent(distance, hit.is_horizontal());

        Self {
            x: index as f32 * slab_width - WALL_PADDING,
            y: viewport_height / 2.0 - height / 2.0 - WALL_PADDING,
            width: slab_width + 2.0 * WALL_PADDING,
            height: height + 2.0 * WALL_PADDING,
            color: color::darken(WALL_COLOR, shade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::StepAxis;
    use crate::vector::Vector2;
    use std::f32::consts::PI;

    fn hit(distance: f32, axis: StepAxis) -> RayHit {
        RayHit {
            position: Vector2::zero(),
            distance,
            axis,
        }
    }

    #[test]
    fn fisheye_identity_on_view_axis() {
        for angle in [0.0, 1.0, PI, 5.5] {
            assert_eq!(correct_fisheye(3.25, angle, angle), 3.25);
        }
    }

    #[test]
    fn fisheye_at_fan_edge() {
        let fov = 60f32.to_radians();
        let view = 1.0;
        for ray in [view - fov / 2.0, view + fov / 2.0] {
            let corrected = correct_fisheye(4.0, view, ray);
            assert!((corrected - 4.0 * (fov / 2.0).cos()).abs() < 1e-5);
        }
    }

    #[test]
    fn wall_height_is_inverse_distance() {
        assert_eq!(wall_height(380.0, 1.0), 190.0);
        assert_eq!(wall_height(380.0, 2.0), 95.0);
        assert!(wall_height(380.0, 0.5) > wall_height(380.0, 1.0));
    }

    #[test]
    fn shade_clamps_both_ends() {
        assert!((shade_percent(0.0, false) - 13.5).abs() < 1e-4);
        assert!((shade_percent(100.0, false) - 90.0).abs() < 1e-4);
        assert!((shade_percent(TAU / 2.0, false) - 45.0).abs() < 1e-3);
        assert!((shade_percent(TAU / 2.0, true) - 55.0).abs() < 1e-3);
    }

    #[test]
    fn x_step_walls_are_darker() {
        let a = Column::project(&hit(2.0, StepAxis::X), 0, 10, 640.0, 380.0);
        let b = Column::project(&hit(2.0, StepAxis::Y), 0, 10, 640.0, 380.0);
        let (ar, _, _) = color::channels(a.color);
        let (br, _, _) = color::channels(b.color);
        assert!(ar < br);
    }

    #[test]
    fn column_geometry() {
        let c = Column::project(&hit(1.0, StepAxis::Y), 3, 10, 640.0, 380.0);
        assert_eq!(c.x, 3.0 * 64.0 - 1.0);
        assert_eq!(c.width, 66.0);
        assert_eq!(c.height, 192.0);
        // vertically centred
        assert_eq!(c.y + c.height / 2.0, 190.0);
    }

    #[test]
    fn touching_wall_projects_finite_slab() {
        let c = Column::project(&hit(0.0, StepAxis::X), 0, 10, 640.0, 380.0);
        assert!(c.y.is_finite() && c.height.is_finite());
        assert!(c.y < 0.0 && c.y + c.height > 380.0);
    }
}
