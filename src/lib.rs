//! Grid raycaster: DDA ray casting over a tile map, projected into wall
//! slabs with fisheye correction and distance shading, plus a top-down
//! minimap. Windowing lives in the binary; everything here is headless.

pub mod canvas;
pub mod color;
pub mod controller;
pub mod font;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod level;
pub mod logging;
pub mod math;
pub mod player;
pub mod projection;
pub mod ray;
pub mod renderer;
pub mod scaler;
pub mod settings;
pub mod vector;

pub use grid::{Cell, Grid};
pub use ray::{RayHit, StepAxis, cast};
pub use vector::Vector2;
