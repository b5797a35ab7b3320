//! DDA grid traversal (Amanatides & Woo).
//!
//! A ray walks cell by cell, always crossing whichever grid line (vertical
//! or horizontal) lies closest along the ray. Distances are exact, so hit
//! points land on cell boundaries regardless of the ray angle.

use crate::grid::{Cell, Grid};
use crate::vector::Vector2;

/// Axis the ray stepped along to enter the hit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAxis {
    /// Stepped in x: the ray crossed a vertical grid line (east/west face).
    X,
    /// Stepped in y: the ray crossed a horizontal grid line (north/south face).
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space intersection point.
    pub position: Vector2,
    /// Euclidean distance from the origin, before fisheye correction.
    pub distance: f32,
    pub axis: StepAxis,
}

impl RayHit {
    /// True for x-step hits. Named after the stepping axis, not the face.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.axis == StepAxis::X
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.axis == StepAxis::Y
    }
}

/// Per-axis ray state: unit step size, accumulated boundary distance and
/// the integer step direction.
#[derive(Debug, Clone, Copy)]
struct AxisWalk {
    unit: f32,
    length: f32,
    step: i32,
}

impl AxisWalk {
    fn new(origin: f32, cell: f32, dir: f32) -> Self {
        if dir == 0.0 {
            // parallel to this axis' grid lines: never crosses one
            return Self {
                unit: f32::INFINITY,
                length: f32::INFINITY,
                step: 0,
            };
        }
        let unit = (1.0 / dir).abs();
        let (step, partial) = if dir < 0.0 {
            (-1, origin - cell)
        } else {
            (1, cell + 1.0 - origin)
        };
        Self {
            unit,
            length: partial * unit,
            step,
        }
    }

    /// Advances one cell and returns the distance at which the boundary was crossed.
    #[inline]
    fn advance(&mut self, current: &mut i32) -> f32 {
        *current += self.step;
        let crossed = self.length;
        self.length += self.unit;
        crossed
    }
}

/// Largest usable ray budget in cells. Longer budgets are clamped to it so
/// the walk stays well inside f32 integer precision.
pub const MAX_RAY_DISTANCE: f32 = 1.0e6;

/// Casts a ray from `origin` along `angle` and returns the first solid cell hit
/// within `max_distance`. Cells outside the grid are treated as empty, so a ray
/// leaving the map ends on the distance budget. A non-finite or non-positive
/// budget yields no hit; budgets above [`MAX_RAY_DISTANCE`] are clamped.
pub fn cast(origin: Vector2, angle: f32, grid: &Grid, max_distance: f32) -> Option<RayHit> {
    if !(max_distance.is_finite() && max_distance > 0.0) {
        return None;
    }
    let max_distance = max_distance.min(MAX_RAY_DISTANCE);

    let dir = Vector2::from_angle(angle).normalize();
    if dir == Vector2::zero() {
        return None;
    }

    let cell = origin.floor();
    let mut current = (cell.x as i32, cell.y as i32);
    let mut walk_x = AxisWalk::new(origin.x, cell.x, dir.x);
    let mut walk_y = AxisWalk::new(origin.y, cell.y, dir.y);

    // a unit direction crosses at most |dx|+|dy| <= 2 lines per unit of distance
    let max_steps = 2 * max_distance.ceil() as usize + 4;
    for _ in 0..max_steps {
        // strict compare: exact ties step y
        let (distance, axis) = if walk_x.length < walk_y.length {
            (walk_x.advance(&mut current.0), StepAxis::X)
        } else {
            (walk_y.advance(&mut current.1), StepAxis::Y)
        };

        if distance >= max_distance {
            return None;
        }

        if let Some(Cell::Solid) = grid.cell_at(current.0 as f32, current.1 as f32) {
            return Some(RayHit {
                position: origin + dir * distance,
                distance,
                axis,
            });
        }
    }
    None
}
