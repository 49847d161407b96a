use crate::color::color::Color;
use crate::foundation::core::{Coord, OutputArea};
use crate::foundation::error::TermfxResult;

/// Cell-level output surface consumed by [`crate::Canvas::print`].
///
/// Coordinates use the canvas convention (row 1 is the bottom line, column 1 the left edge).
/// Translating them into cursor movement is the backend's job, including what to do with cells
/// outside the output area.
///
/// Ordering contract: `begin` once, then any number of frames made of `clear`/`write` calls
/// followed by one `flush`, then `end` once.
pub trait RenderBackend {
    /// Prepare the surface for `area`. Called once before any frame.
    fn begin(&mut self, area: OutputArea) -> TermfxResult<()>;
    /// Paint one cell.
    fn write(&mut self, symbol: &str, color: Option<Color>, coord: Coord) -> TermfxResult<()>;
    /// Blank one cell.
    fn clear(&mut self, coord: Coord) -> TermfxResult<()>;
    /// End of frame: make queued cells visible.
    fn flush(&mut self) -> TermfxResult<()>;
    /// Restore the surface. Called once, also after a failed run.
    fn end(&mut self, area: OutputArea) -> TermfxResult<()>;
}

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    /// A `write` call.
    Write {
        /// Printed grapheme.
        symbol: String,
        /// Foreground color.
        color: Option<Color>,
        /// Target cell.
        coord: Coord,
    },
    /// A `clear` call.
    Clear {
        /// Target cell.
        coord: Coord,
    },
}

/// In-memory backend for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    area: Option<OutputArea>,
    pending: Vec<RenderOp>,
    /// Ops grouped by flushed frame, in call order.
    pub frames: Vec<Vec<RenderOp>>,
    /// Set by `end`.
    pub ended: bool,
}

impl RecordingBackend {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Area passed to the last `begin`.
    pub fn area(&self) -> Option<OutputArea> {
        self.area
    }

    /// All ops across frames, flattened.
    pub fn ops(&self) -> impl Iterator<Item = &RenderOp> {
        self.frames.iter().flatten()
    }
}

impl RenderBackend for RecordingBackend {
    fn begin(&mut self, area: OutputArea) -> TermfxResult<()> {
        self.area = Some(area);
        self.pending.clear();
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn write(&mut self, symbol: &str, color: Option<Color>, coord: Coord) -> TermfxResult<()> {
        self.pending.push(RenderOp::Write {
            symbol: symbol.to_owned(),
            color,
            coord,
        });
        Ok(())
    }

    fn clear(&mut self, coord: Coord) -> TermfxResult<()> {
        self.pending.push(RenderOp::Clear { coord });
        Ok(())
    }

    fn flush(&mut self) -> TermfxResult<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn end(&mut self, _area: OutputArea) -> TermfxResult<()> {
        self.ended = true;
        Ok(())
    }
}
