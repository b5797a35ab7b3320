use tracing::info;

use crate::controller::{Controller, Scene};
use crate::grid::Grid;

/// Owns the tile grid while a level is loaded and draws it on the minimap.
#[derive(Debug, Default)]
pub struct Level {
    grid: Option<Grid>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded grid, `None` before init and after destroy.
    #[inline]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }
}

impl Controller for Level {
    /// Builds the level from `layout`.
    fn init(&mut self, layout: &Grid) {
        info!(
            width = layout.width(),
            height = layout.height(),
            "level loaded"
        );
        self.grid = Some(layout.clone());
    }

    /// Every cell once, filled and outlined with its palette.
    fn render(&self, scene: &mut Scene<'_>) {
        let Some(grid) = &self.grid else {
            return;
        };
        let minimap = &mut *scene.minimap;
        let cell = grid.cell_size(minimap.width() as f32, minimap.height() as f32);
        for (col, row, kind) in grid.cells() {
            let palette = kind.palette();
            let (x, y) = (col as f32 * cell.x, row as f32 * cell.y);
            minimap.fill_rect(x, y, cell.x, cell.y, palette.fill);
            minimap.stroke_rect(x, y, cell.x, cell.y, palette.stroke, palette.stroke_alpha);
        }
    }

    fn destroy(&mut self) {
        if self.grid.take().is_some() {
            info!("level released");
        }
    }
}
