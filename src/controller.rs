use crate::canvas::Canvas;
use crate::grid::Grid;
use crate::input::InputState;

/// Read-only inputs of one update pass.
pub struct Tick<'a> {
    pub input: &'a InputState,
    pub grid: &'a Grid,
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

/// Render targets of one frame.
pub struct Scene<'a> {
    pub grid: &'a Grid,
    pub view: &'a mut Canvas,
    pub minimap: &'a mut Canvas,
}

/// Per-frame participant. Every hook is optional.
pub trait Controller {
    fn init(&mut self, _grid: &Grid) {}

    fn update(&mut self, _tick: &Tick<'_>) {}

    fn render(&self, _scene: &mut Scene<'_>) {}

    fn destroy(&mut self) {}
}
