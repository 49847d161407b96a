use std::io::Write;

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, RestorePosition, SavePosition, Show};
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetForegroundColor};

use crate::color::color::Color;
use crate::foundation::core::{Coord, OutputArea};
use crate::foundation::error::{TermfxError, TermfxResult};
use crate::render::backend::RenderBackend;

/// Cursor-relative ANSI backend.
///
/// `begin` scrolls `top` blank lines into view and leaves the cursor on the line below the
/// output area; every cell write saves the cursor, moves up `row` lines, prints, and restores.
/// Cells outside the output area are dropped.
pub struct AnsiBackend<W: Write> {
    out: W,
    area: OutputArea,
}

impl<W: Write> AnsiBackend<W> {
    /// Backend writing escape sequences to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            area: OutputArea::new(0, 0),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn put(&mut self, symbol: &str, color: Option<Color>, coord: Coord) -> TermfxResult<()> {
        if !self.area.contains(coord) {
            return Ok(());
        }
        let (Ok(up), Ok(col)) = (u16::try_from(coord.row), u16::try_from(coord.column - 1)) else {
            return Err(TermfxError::render(format!(
                "cell ({}, {}) is beyond terminal cursor range",
                coord.row, coord.column
            )));
        };
        queue!(self.out, SavePosition, MoveUp(up), MoveToColumn(col))?;
        match color {
            Some(c) => queue!(
                self.out,
                SetForegroundColor(term_color(c)),
                Print(symbol),
                ResetColor
            )?,
            None => queue!(self.out, Print(symbol))?,
        }
        queue!(self.out, RestorePosition)?;
        Ok(())
    }
}

fn term_color(c: Color) -> TermColor {
    match c {
        Color::Rgb(rgb) => TermColor::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
        Color::Xterm(idx) => TermColor::AnsiValue(idx),
    }
}

impl<W: Write> RenderBackend for AnsiBackend<W> {
    fn begin(&mut self, area: OutputArea) -> TermfxResult<()> {
        self.area = area;
        queue!(self.out, Hide)?;
        for _ in 0..area.top {
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write(&mut self, symbol: &str, color: Option<Color>, coord: Coord) -> TermfxResult<()> {
        self.put(symbol, color, coord)
    }

    fn clear(&mut self, coord: Coord) -> TermfxResult<()> {
        self.put(" ", None, coord)
    }

    fn flush(&mut self) -> TermfxResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn end(&mut self, _area: OutputArea) -> TermfxResult<()> {
        queue!(self.out, ResetColor, Show)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ansi.rs"]
mod tests;
