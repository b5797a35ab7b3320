use crate::canvas::Canvas;
use crate::color::{self, Color};
use crate::controller::{Controller, Scene};
use crate::frame::FrameClock;
use crate::grid::Grid;
use crate::level::Level;
use crate::math::clamp_angle;
use crate::player::Player;
use crate::projection::{Column, correct_fisheye};
use crate::ray::{self, RayHit};
use crate::vector::Vector2;

const CEILING_COLOR: Color = color::rgb(0x57, 0x60, 0x6F);
const FLOOR_COLOR: Color = color::rgb(0x2F, 0x35, 0x42);
const MINIMAP_RAY_COLOR: Color = color::rgb(0xFF, 0xC0, 0xCB);

/// Projection parameters of the 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Horizontal field of view in radians.
    pub fov: f32,
    /// Logical pixels covered by one ray.
    pub column_width: f32,
    /// Ray budget in cells.
    pub max_distance: f32,
}

impl View {
    /// Rays for a viewport `width` pixels wide, at least one.
    pub fn ray_count(&self, width: usize) -> usize {
        ((width as f32 / self.column_width).floor() as usize).max(1)
    }
}

/// One ray of the fan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanRay {
    /// Wrapped into `[0, 2π)`.
    pub angle: f32,
    pub hit: Option<RayHit>,
}

/// Casts `count` evenly spaced rays across `[angle - fov/2, angle + fov/2)`.
pub fn cast_fan(origin: Vector2, angle: f32, grid: &Grid, view: &View, count: usize) -> Vec<FanRay> {
    let gap = view.fov / count.max(1) as f32;
    let first = angle - view.fov / 2.0;
    (0..count)
        .map(|i| {
            let ray_angle = clamp_angle(first + gap * i as f32);
            FanRay {
                angle: ray_angle,
                hit: ray::cast(origin, ray_angle, grid, view.max_distance),
            }
        })
        .collect()
}

pub fn draw_ceiling_and_floor(view: &mut Canvas) {
    let (w, h) = (view.width() as f32, view.height() as f32);
    view.fill_rect(0.0, 0.0, w, h / 2.0, CEILING_COLOR);
    view.fill_rect(0.0, h / 2.0, w, h / 2.0, FLOOR_COLOR);
}

/// Draws the fan: a line per hit on the minimap and a shaded wall slab per
/// hit in the view. Returns the number of rays that hit a wall.
pub fn draw_walls(scene: &mut Scene<'_>, player: &Player, view: &View) -> usize {
    let viewport_w = scene.view.width() as f32;
    let viewport_h = scene.view.height() as f32;
    let count = view.ray_count(scene.view.width());
    let cell = scene
        .grid
        .cell_size(scene.minimap.width() as f32, scene.minimap.height() as f32);

    let fan = cast_fan(player.position, player.angle, scene.grid, view, count);
    let mut hits = 0;
    for (index, ray) in fan.iter().enumerate() {
        let Some(mut hit) = ray.hit else {
            continue;
        };
        hits += 1;

        scene
            .minimap
            .draw_line(player.position * cell, hit.position * cell, MINIMAP_RAY_COLOR);

        hit.distance = correct_fisheye(hit.distance, player.angle, ray.angle);
        let slab = Column::project(&hit, index, count, viewport_w, viewport_h);
        scene
            .view
            .fill_rect(slab.x, slab.y, slab.width, slab.height, slab.color);
    }
    hits
}

/// Renders one frame: minimap (grid, player, rays) then the 3D view and HUD.
pub fn render_frame(
    scene: &mut Scene<'_>,
    level: &Level,
    player: &Player,
    clock: &FrameClock,
    view: &View,
) {
    scene.minimap.clear();
    level.render(scene);
    player.render(scene);

    scene.view.clear();
    draw_ceiling_and_floor(scene.view);
    draw_walls(scene, player, view);

    clock.render(scene);
}
