use std::fmt;

use crate::color::{self, Color};
use crate::vector::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Solid,
}

/// Minimap fill and stroke for a cell kind. Stroke carries its own alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_alpha: f32,
}

impl Cell {
    pub fn is_solid(self) -> bool {
        matches!(self, Cell::Solid)
    }

    pub fn palette(self) -> Palette {
        match self {
            Cell::Open => Palette {
                fill: color::rgb(0x15, 0x1D, 0x3B),
                stroke: color::WHITE,
                stroke_alpha: 0.15,
            },
            Cell::Solid => Palette {
                fill: color::rgb(0xDA, 0xDB, 0xBD),
                stroke: color::BLACK,
                stroke_alpha: 0.35,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a first row with no cells.
    Empty,
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid has no cells"),
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Rectangular tile map, row-major (`cells[y * width + x]`). Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }

        let height = rows.len();
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            width,
            height,
        })
    }

    /// Solid border, open interior.
    pub fn bordered(width: usize, height: usize) -> Result<Self, GridError> {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                            Cell::Solid
                        } else {
                            Cell::Open
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// The built-in 8x8 level.
    pub fn sample() -> Self {
        const LAYOUT: [&str; 8] = [
            "########",
            "#...#..#",
            "#.#....#",
            "#.#....#",
            "#......#",
            "#....#.#",
            "#....#.#",
            "########",
        ];
        let cells = LAYOUT
            .iter()
            .flat_map(|row| row.bytes())
            .map(|b| if b == b'#' { Cell::Solid } else { Cell::Open })
            .collect();
        Self {
            cells,
            width: 8,
            height: 8,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell containing the continuous point `(x, y)`, or `None` outside
    /// `[0, width) x [0, height)`. Callers treat `None` as "no collision".
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        // negated comparisons also reject NaN
        if !(x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32) {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        self.cells.get(row * self.width + col).copied()
    }

    #[inline]
    pub fn cell_at_vec(&self, p: Vector2) -> Option<Cell> {
        self.cell_at(p.x, p.y)
    }

    pub fn is_solid(&self, p: Vector2) -> bool {
        self.cell_at_vec(p).is_some_and(Cell::is_solid)
    }

    /// Pixel size of one cell when the grid is stretched over a surface.
    pub fn cell_size(&self, surface_width: f32, surface_height: f32) -> Vector2 {
        Vector2::new(
            surface_width / self.width as f32,
            surface_height / self.height as f32,
        )
    }

    /// Every cell once as `(col, row, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i % self.width, i / self.width, c))
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}
