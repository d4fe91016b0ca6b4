/// Terminal back-end for `Canvas`.
///
/// `TerminalCanvas` rasterizes playfield-space shapes into a back buffer of
/// colored cells. `display` diffs it against what is already on screen,
/// queues only the changed cells, flushes, and swaps the buffers.

use std::f64::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use shoot_em_up::entities::Color as Tag;
use shoot_em_up::error::Result;
use shoot_em_up::platform::{Canvas, HEIGHT, WIDTH};

const CELL: &str = "█";
const EMPTY: &str = " ";

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

fn terminal_color(tag: Tag) -> Color {
    match tag {
        Tag::Blue => Color::Blue,
        Tag::Cyan => Color::Cyan,
        Tag::Magenta => Color::Magenta,
        Tag::Red => Color::Red,
        Tag::Yellow => Color::Yellow,
        Tag::Orange => Color::DarkYellow,
        Tag::Green => Color::Green,
        Tag::White => Color::White,
        Tag::Gray => Color::Grey,
        Tag::LightGray => Color::Grey,
        Tag::DarkGray => Color::DarkGrey,
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Terminal columns per playfield unit.
    scale: f64,
    /// Left edge of the playfield, so it sits centered.
    offset_col: u16,
    color: Tag,
    back: Vec<Option<Tag>>,
    front: Vec<Option<Tag>>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(mut out: W) -> Result<Self> {
        let (term_cols, term_rows) = terminal::size()?;
        let scale = (term_cols as f64 / WIDTH).min(term_rows as f64 * CELL_ASPECT / HEIGHT);
        let cols = ((WIDTH * scale) as u16).max(1);
        let rows = ((HEIGHT * scale / CELL_ASPECT) as u16).max(1);
        let offset_col = term_cols.saturating_sub(cols) / 2;

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.flush()?;

        let cells = cols as usize * rows as usize;
        Ok(Self {
            out,
            cols,
            rows,
            scale,
            offset_col,
            color: Tag::White,
            back: vec![None; cells],
            front: vec![None; cells],
        })
    }

    fn to_cell(&self, x: f64, y: f64) -> (i64, i64) {
        let col = (x * self.scale).floor() as i64;
        let row = (y * self.scale / CELL_ASPECT).floor() as i64;
        (col, row)
    }

    /// Playfield coordinates of a cell's center.
    fn cell_center(&self, col: i64, row: i64) -> (f64, f64) {
        let x = (col as f64 + 0.5) / self.scale;
        let y = (row as f64 + 0.5) * CELL_ASPECT / self.scale;
        (x, y)
    }

    fn plot(&mut self, col: i64, row: i64) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.back[index] = Some(self.color);
    }

    /// Plot every cell whose center passes `inside`, and always the center.
    fn fill(&mut self, cx: f64, cy: f64, radius: f64, inside: impl Fn(f64, f64) -> bool) {
        let (min_col, min_row) = self.to_cell(cx - radius, cy - radius);
        let (max_col, max_row) = self.to_cell(cx + radius, cy + radius);
        let (min_col, min_row) = (min_col.max(0), min_row.max(0));
        let max_col = max_col.min(self.cols as i64 - 1);
        let max_row = max_row.min(self.rows as i64 - 1);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let (x, y) = self.cell_center(col, row);
                if inside(x - cx, y - cy) {
                    self.plot(col, row);
                }
            }
        }
        let (col, row) = self.to_cell(cx, cy);
        self.plot(col, row);
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn set_color(&mut self, color: Tag) {
        self.color = color;
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let r2 = radius * radius;
        self.fill(cx, cy, radius, |dx, dy| dx * dx + dy * dy <= r2);
    }

    fn fill_diamond(&mut self, cx: f64, cy: f64, radius: f64) {
        self.fill(cx, cy, radius, |dx, dy| dx.abs() + dy.abs() <= radius);
    }

    fn draw_ring(&mut self, cx: f64, cy: f64, radius: f64) {
        // Two samples per cell of circumference leave no gaps.
        let steps = ((TAU * radius * self.scale).ceil() as usize * 2).max(8);
        for i in 0..steps {
            let angle = TAU * i as f64 / steps as f64;
            let (col, row) = self.to_cell(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.plot(col, row);
        }
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (c1, r1) = self.to_cell(x1, y1);
        let (c2, r2) = self.to_cell(x2, y2);
        let steps = (c2 - c1).abs().max((r2 - r1).abs()).max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let col = c1 as f64 + (c2 - c1) as f64 * t;
            let row = r1 as f64 + (r2 - r1) as f64 * t;
            self.plot(col.round() as i64, row.round() as i64);
        }
    }

    /// Arrow-head ship pointing up.
    fn draw_player(&mut self, cx: f64, cy: f64, radius: f64) {
        self.fill(cx, cy, radius, |dx, dy| {
            let depth = (dy + radius) / (2.0 * radius);
            (0.0..=1.0).contains(&depth) && dx.abs() <= radius * depth
        });
    }

    fn display(&mut self) -> Result<()> {
        let mut current: Option<Tag> = None;
        for (index, (back, front)) in self.back.iter().zip(&self.front).enumerate() {
            if back == front {
                continue;
            }
            let col = (index % self.cols as usize) as u16 + self.offset_col;
            let row = (index / self.cols as usize) as u16;
            self.out.queue(cursor::MoveTo(col, row))?;
            match back {
                Some(tag) => {
                    if current != Some(*tag) {
                        self.out
                            .queue(style::SetForegroundColor(terminal_color(*tag)))?;
                        current = Some(*tag);
                    }
                    self.out.queue(Print(CELL))?;
                }
                None => {
                    self.out.queue(Print(EMPTY))?;
                }
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;

        std::mem::swap(&mut self.back, &mut self.front);
        self.back.fill(None);
        Ok(())
    }
}
