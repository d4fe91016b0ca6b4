/// The narrow drawing/input capability the simulation consumes.
///
/// The terminal front-end implements both traits; tests use in-memory fakes.

use crate::entities::Color;
use crate::error::Result;

/// Playfield width in playfield units.
pub const WIDTH: f64 = 480.0;
/// Playfield height in playfield units.
pub const HEIGHT: f64 = 720.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Quit,
}

pub trait Keyboard {
    /// Drain pending input events. Called once at the start of each frame.
    fn poll(&mut self) {}

    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Drawing primitives in playfield coordinates, using the last color set.
pub trait Canvas {
    fn set_color(&mut self, color: Color);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64);
    fn fill_diamond(&mut self, cx: f64, cy: f64, radius: f64);
    /// Circle outline only.
    fn draw_ring(&mut self, cx: f64, cy: f64, radius: f64);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_player(&mut self, cx: f64, cy: f64, radius: f64);

    /// Present the finished frame. Called exactly once per frame, last.
    fn display(&mut self) -> Result<()>;
}
