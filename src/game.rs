use std::time::{Duration, Instant};

use tracing::info;

use crate::canvas::Canvas;
use crate::controller::{Controller, Scene, Tick};
use crate::frame::FrameClock;
use crate::grid::Grid;
use crate::input::InputState;
use crate::level::Level;
use crate::player::Player;
use crate::renderer::{self, View};
use crate::settings::Settings;

/// Narrowest logical framebuffer, whatever the window aspect.
const MIN_LOGICAL_WIDTH: usize = 160;

/// Logical framebuffer size for a window: fixed height, width from the aspect ratio.
pub fn logical_size(settings: &Settings, window_w: usize, window_h: usize) -> (usize, usize) {
    let height = settings.logical_height as usize;
    let aspect = if window_h > 0 {
        window_w as f32 / window_h as f32
    } else {
        1.0
    };
    let width = ((height as f32 * aspect).round() as usize).max(MIN_LOGICAL_WIDTH);
    (width, height)
}

/// Minimap edge in window pixels.
pub fn minimap_size(settings: &Settings, window_w: usize, window_h: usize) -> usize {
    (window_w.min(window_h) as f32 * settings.minimap_fraction) as usize
}

/// One level with its player and frame pacing.
pub struct Game {
    settings: Settings,
    level: Level,
    player: Player,
    clock: FrameClock,
}

impl Game {
    /// Loads `layout` and spawns the player on it.
    pub fn new(settings: Settings, layout: Grid, now: Instant) -> Self {
        let mut level = Level::new();
        level.init(&layout);
        let mut player = Player::new(settings.motion());
        player.init(&layout);
        info!("player spawned at {}", player.position);
        Self {
            clock: FrameClock::new(settings.target_fps, now),
            settings,
            level,
            player,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.level.grid()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn view(&self) -> View {
        View {
            fov: self.settings.fov(),
            column_width: self.settings.column_width,
            max_distance: self.settings.max_ray_distance,
        }
    }

    /// Runs one frame (start, update, render, consume pointer axis, end) and
    /// returns the delay before the next one. `now` is read once when the
    /// frame starts and once when it ends. After [`destroy`](Self::destroy)
    /// only the clock advances.
    pub fn frame(
        &mut self,
        input: &mut InputState,
        mut now: impl FnMut() -> Instant,
        view: &mut Canvas,
        minimap: &mut Canvas,
    ) -> Duration {
        self.clock.start_frame(now());

        if let Some(grid) = self.level.grid() {
            self.player.update(&Tick {
                input: &*input,
                grid,
                delta_time: self.clock.delta_time(),
            });

            let mut scene = Scene {
                grid,
                view,
                minimap,
            };
            let projection = self.view();
            renderer::render_frame(
                &mut scene,
                &self.level,
                &self.player,
                &self.clock,
                &projection,
            );
        }

        input.reset_axis();
        self.clock.end_frame(now())
    }

    /// Wait before retrying when no frame could be drawn, e.g. while minimized.
    pub fn idle_delay(&self) -> Duration {
        self.clock.target_frame_time()
    }

    /// Releases the level. Further frames draw nothing.
    pub fn destroy(&mut self) {
        self.player.destroy();
        self.clock.destroy();
        self.level.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn logical_size_keeps_height() {
        let s = Settings::default();
        assert_eq!(logical_size(&s, 1280, 760), (640, 380));
        assert_eq!(logical_size(&s, 100, 1000), (160, 380));
        assert_eq!(logical_size(&s, 800, 0), (380, 380));
    }

    #[test]
    fn minimap_is_quarter_of_short_side() {
        let s = Settings::default();
        assert_eq!(minimap_size(&s, 1280, 720), 180);
    }

    #[test]
    fn frame_moves_player_and_consumes_axis() {
        let t0 = Instant::now();
        let mut game = Game::new(Settings::default(), Grid::bordered(8, 8).unwrap(), t0);
        let mut input = InputState::default();
        input.handle_key(Key::W, true);
        input.pointer_delta(crate::vector::Vector2::new(3.0, 0.0));
        let mut view = Canvas::new(64, 38);
        let mut minimap = Canvas::new(32, 32);

        let start_y = game.player().position.y;
        let delay = game.frame(&mut input, || t0 + Duration::from_millis(50), &mut view, &mut minimap);
        assert!(delay <= game.clock().target_frame_time());
        assert!(game.player().position.y < start_y);
        assert_eq!(input.axis(), crate::vector::Vector2::zero());
        assert!((game.clock().delta_time() - 0.05).abs() < 1e-4);
    }

    #[test]
    fn destroy_releases_grid() {
        let t0 = Instant::now();
        let mut game = Game::new(Settings::default(), Grid::sample(), t0);
        game.destroy();
        assert!(game.grid().is_none());

        let mut input = InputState::default();
        input.handle_key(Key::W, true);
        let before = game.player().position;
        let mut view = Canvas::new(16, 16);
        let mut minimap = Canvas::new(8, 8);
        game.frame(&mut input, || t0 + Duration::from_millis(16), &mut view, &mut minimap);
        assert_eq!(game.player().position, before);
        assert!(view.pixels().iter().all(|&p| p == crate::color::BLACK));
    }

    #[test]
    fn frame_delay_subtracts_render_time() {
        let t0 = Instant::now();
        let mut game = Game::new(Settings::default(), Grid::sample(), t0);
        let mut input = InputState::default();
        let mut view = Canvas::new(64, 38);
        let mut minimap = Canvas::new(32, 32);

        // starts at +50 ms, ends at +55 ms: 16.67 - 5 ms truncates to 11 ms
        let mut stamps = [50, 55].into_iter().map(|ms| t0 + Duration::from_millis(ms));
        let delay = game.frame(
            &mut input,
            || stamps.next().unwrap_or(t0),
            &mut view,
            &mut minimap,
        );
        assert_eq!(delay, Duration::from_millis(11));

        // a frame slower than the target leaves no delay
        let mut stamps = [100, 140].into_iter().map(|ms| t0 + Duration::from_millis(ms));
        let delay = game.frame(
            &mut input,
            || stamps.next().unwrap_or(t0),
            &mut view,
            &mut minimap,
        );
        assert_eq!(delay, Duration::ZERO);
    }

    #[test]
    fn idle_delay_is_one_target_frame() {
        let game = Game::new(Settings::default(), Grid::sample(), Instant::now());
        assert!(game.idle_delay() > Duration::ZERO);
        assert_eq!(game.idle_delay(), game.clock().target_frame_time());
    }
}
