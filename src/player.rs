use std::f32::consts::{FRAC_PI_2, PI};

use crate::color::{self, Color};
use crate::controller::{Controller, Scene, Tick};
use crate::grid::Grid;
use crate::input::Key;
use crate::math::{TAU, clamp_angle};
use crate::vector::Vector2;

const MARKER_COLOR: Color = color::rgb(0xFF, 0x00, 0x00);
const MARKER_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Cells per second.
    pub movement_speed: f32,
    /// Radians per second.
    pub angular_velocity: f32,
    /// Applied to both speeds while Shift is held.
    pub sprint_multiplier: f32,
    /// Reject moves into solid cells.
    pub collision: bool,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            angular_velocity: 2.5,
            sprint_multiplier: 2.5,
            collision: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vector2,
    /// Radians in `[0, 2π)`; 0 faces +x, `π/2` faces +y (down on screen).
    pub angle: f32,
    pub motion: Motion,
}

impl Player {
    pub fn new(motion: Motion) -> Self {
        Self {
            position: Vector2::zero(),
            angle: 0.0,
            motion,
        }
    }

    #[inline]
    pub fn facing(&self) -> Vector2 {
        Vector2::from_angle(self.angle)
    }

    fn translate(&mut self, delta: Vector2, grid: &Grid) {
        if !self.motion.collision {
            self.position += delta;
            return;
        }
        // per axis so the player slides along walls
        let along_x = self.position + Vector2::new(delta.x, 0.0);
        if !grid.is_solid(along_x) {
            self.position = along_x;
        }
        let along_y = self.position + Vector2::new(0.0, delta.y);
        if !grid.is_solid(along_y) {
            self.position = along_y;
        }
    }
}

impl Controller for Player {
    /// Centre of the grid, facing up.
    fn init(&mut self, grid: &Grid) {
        self.position = grid.center();
        self.angle = clamp_angle(-FRAC_PI_2);
    }

    fn update(&mut self, tick: &Tick<'_>) {
        let input = tick.input;
        let dt = tick.delta_time;
        let multiplier = if input.is_key_down(Key::Shift) {
            self.motion.sprint_multiplier
        } else {
            1.0
        };
        let velocity = self.motion.movement_speed * multiplier;
        let angular = self.motion.angular_velocity * multiplier;

        let axis = input.axis();
        if axis.x != 0.0 {
            self.angle = clamp_angle(self.angle + axis.x * (angular / 4.0) * dt);
        }

        if input.is_key_down(Key::ArrowLeft) {
            self.angle -= angular * dt;
            if self.angle < 0.0 {
                self.angle += TAU;
            }
        }
        if input.is_key_down(Key::ArrowRight) {
            self.angle += angular * dt;
            if self.angle >= TAU {
                self.angle -= TAU;
            }
        }

        let forward = self.facing();
        // left of facing in screen space (y down)
        let left = Vector2::from_angle(self.angle - PI / 2.0);
        let mut delta = Vector2::zero();

        if input.is_key_down(Key::A) {
            delta += left * (velocity * dt);
        }
        if input.is_key_down(Key::D) {
            delta -= left * (velocity * dt);
        }
        if input.is_key_down(Key::W) || input.is_key_down(Key::ArrowUp) {
            delta += forward * (velocity * dt);
        }
        if input.is_key_down(Key::S) || input.is_key_down(Key::ArrowDown) {
            delta -= forward * (velocity * dt);
        }

        if delta != Vector2::zero() {
            self.translate(delta, tick.grid);
        }
    }

    fn render(&self, scene: &mut Scene<'_>) {
        let minimap = &mut *scene.minimap;
        let cell = scene
            .grid
            .cell_size(minimap.width() as f32, minimap.height() as f32);
        minimap.fill_circle(self.position * cell, MARKER_RADIUS, MARKER_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    const EPS: f32 = 1e-5;

    fn spawned() -> (Player, Grid) {
        let grid = Grid::bordered(8, 8).unwrap();
        let mut p = Player::new(Motion::default());
        p.init(&grid);
        (p, grid)
    }

    fn step(p: &mut Player, grid: &Grid, input: &InputState, dt: f32) {
        p.update(&Tick {
            input,
            grid,
            delta_time: dt,
        });
    }

    #[test]
    fn spawns_centred_facing_up() {
        let (p, _) = spawned();
        assert_eq!(p.position, Vector2::new(4.0, 4.0));
        assert!((p.angle - 1.5 * PI).abs() < EPS);
        assert!((p.facing().y + 1.0).abs() < EPS);
    }

    #[test]
    fn forward_moves_along_facing() {
        let (mut p, grid) = spawned();
        let mut input = InputState::default();
        input.handle_key(Key::W, true);
        step(&mut p, &grid, &input, 0.1);
        // 5 cells/s * 0.1 s, facing up
        assert!((p.position.y - 3.5).abs() < EPS);
        assert!((p.position.x - 4.0).abs() < EPS);
    }

    #[test]
    fn sprint_scales_speed() {
        let (mut p, grid) = spawned();
        let mut input = InputState::default();
        input.handle_key(Key::ArrowDown, true);
        input.handle_key(Key::Shift, true);
        step(&mut p, &grid, &input, 0.1);
        assert!((p.position.y - 5.25).abs() < EPS);
    }

    #[test]
    fn strafe_is_perpendicular() {
        let (mut p, grid) = spawned();
        p.angle = 0.0;
        let mut input = InputState::default();
        input.handle_key(Key::A, true);
        step(&mut p, &grid, &input, 0.1);
        // facing +x, left is -y on screen
        assert!((p.position.y - 3.5).abs() < EPS);
        assert!((p.position.x - 4.0).abs() < EPS);

        input.handle_key(Key::A, false);
        input.handle_key(Key::D, true);
        step(&mut p, &grid, &input, 0.2);
        assert!((p.position.y - 4.5).abs() < EPS);
    }

    #[test]
    fn arrow_rotation_wraps_once() {
        let (mut p, grid) = spawned();
        p.angle = 0.1;
        let mut input = InputState::default();
        input.handle_key(Key::ArrowLeft, true);
        step(&mut p, &grid, &input, 0.1);
        assert!((p.angle - (TAU - 0.15)).abs() < 1e-4);

        input.handle_key(Key::ArrowLeft, false);
        input.handle_key(Key::ArrowRight, true);
        step(&mut p, &grid, &input, 0.1);
        assert!((p.angle - 0.1).abs() < 1e-4);
    }

    #[test]
    fn pointer_turns_view() {
        let (mut p, grid) = spawned();
        p.angle = 1.0;
        let mut input = InputState::default();
        input.pointer_delta(Vector2::new(8.0, 50.0));
        step(&mut p, &grid, &input, 0.1);
        // 8 * (2.5 / 4) * 0.1
        assert!((p.angle - 1.5).abs() < EPS);
    }

    #[test]
    fn walks_through_walls_by_default() {
        let (mut p, grid) = spawned();
        let mut input = InputState::default();
        input.handle_key(Key::W, true);
        for _ in 0..10 {
            step(&mut p, &grid, &input, 0.1);
        }
        assert!(p.position.y < 0.0);
    }

    #[test]
    fn collision_stops_at_walls() {
        let grid = Grid::bordered(8, 8).unwrap();
        let mut p = Player::new(Motion {
            collision: true,
            ..Motion::default()
        });
        p.init(&grid);
        let mut input = InputState::default();
        input.handle_key(Key::W, true);
        for _ in 0..10 {
            step(&mut p, &grid, &input, 0.1);
        }
        assert!(p.position.y >= 1.0);
        assert!(!grid.is_solid(p.position));
    }
}
