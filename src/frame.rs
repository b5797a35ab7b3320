//! Frame pacing: variable delta time, an FPS counter and the delay until
//! the next frame should start.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::canvas::Canvas;
use crate::color;
use crate::controller::{Controller, Scene};
use crate::font;
use crate::vector::Vector2;

const HUD_SCALE: usize = 2;
const HUD_MARGIN: f32 = 12.0;
const HUD_SHADOW_OFFSET: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct FrameClock {
    delta_time: f32,
    fps: u32,
    frame_count: u32,
    frame_timer: f32,
    frame_start_time: Instant,
    last_frame_time: Instant,
    target_frame_time: Duration,
}

impl FrameClock {
    /// Starts with the ideal delta time for `target_fps`.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let target_frame_time = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        Self {
            delta_time: target_frame_time.as_secs_f32(),
            fps: 0,
            frame_count: 0,
            frame_timer: 0.0,
            frame_start_time: now,
            last_frame_time: now,
            target_frame_time,
        }
    }

    /// Seconds between the previous frame start and this one.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Frames counted over the last full second.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[inline]
    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    pub fn start_frame(&mut self, now: Instant) {
        self.delta_time = now
            .saturating_duration_since(self.frame_start_time)
            .as_secs_f32();
        self.frame_start_time = now;

        self.frame_count += 1;
        self.frame_timer += self.delta_time;
        if self.frame_timer >= 1.0 {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.frame_timer -= 1.0;
            debug!(fps = self.fps, "frame rate");
        }
    }

    /// Marks the frame finished and returns how long to wait before the next one.
    pub fn end_frame(&mut self, now: Instant) -> Duration {
        self.last_frame_time = now;
        self.next_frame_delay()
    }

    /// `clamp(target - elapsed, 0, target)`, truncated to whole milliseconds.
    pub fn next_frame_delay(&self) -> Duration {
        let elapsed = self
            .last_frame_time
            .saturating_duration_since(self.frame_start_time);
        let remaining = self.target_frame_time.saturating_sub(elapsed);
        Duration::from_millis(remaining.as_millis() as u64)
    }

    pub fn draw_fps(&self, view: &mut Canvas) {
        let text = format!("FPS: {}", self.fps);
        let width = font::text_width(&text, HUD_SCALE) as f32;
        let height = Canvas::text_height(HUD_SCALE) as f32;
        let pos = Vector2::new(
            view.width() as f32 - width - HUD_MARGIN,
            view.height() as f32 - height - HUD_MARGIN,
        );
        view.draw_text_shadowed(
            &text,
            pos,
            HUD_SCALE,
            color::WHITE,
            color::BLACK,
            HUD_SHADOW_OFFSET,
        );
    }
}

impl Controller for FrameClock {
    fn render(&self, scene: &mut Scene<'_>) {
        self.draw_fps(scene.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn initial_delta_is_target() {
        let clock = FrameClock::new(60, Instant::now());
        assert!((clock.delta_time() - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.fps(), 0);
    }

    #[test]
    fn delta_measured_between_starts() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60, t0);
        clock.start_frame(t0 + ms(20));
        assert!((clock.delta_time() - 0.020).abs() < 1e-6);
        clock.end_frame(t0 + ms(25));
        clock.start_frame(t0 + ms(36));
        assert!((clock.delta_time() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn delay_fills_remaining_budget() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60, t0);
        clock.start_frame(t0);
        // budget is 16.67 ms, 5 ms used
        assert_eq!(clock.end_frame(t0 + ms(5)), ms(11));
    }

    #[test]
    fn delay_clamps_to_zero_when_over_budget() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60, t0);
        clock.start_frame(t0);
        assert_eq!(clock.end_frame(t0 + ms(40)), Duration::ZERO);
    }

    #[test]
    fn delay_never_exceeds_target() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60, t0 + ms(10));
        clock.start_frame(t0 + ms(10));
        // end reported before start
        let delay = clock.end_frame(t0);
        assert!(delay <= clock.target_frame_time());
        assert_eq!(delay, ms(16));
    }

    #[test]
    fn fps_counts_frames_per_second() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60, t0);
        let mut now = t0;
        for _ in 0..16 {
            now += Duration::from_micros(62_500);
            clock.start_frame(now);
        }
        assert_eq!(clock.fps(), 16);
        for _ in 0..8 {
            now += ms(125);
            clock.start_frame(now);
        }
        assert_eq!(clock.fps(), 8);
    }

    #[test]
    fn fps_overlay_draws_bottom_right() {
        let mut clock = FrameClock::new(60, Instant::now());
        clock.fps = 60;
        let mut view = Canvas::new(200, 100);
        clock.draw_fps(&mut view);
        let lit = |x0: usize, x1: usize, y0: usize, y1: usize| {
            (y0..y1).any(|y| (x0..x1).any(|x| view.pixel(x, y) == Some(color::WHITE)))
        };
        assert!(lit(100, 200, 50, 100));
        assert!(!lit(0, 100, 0, 100));
    }
}
