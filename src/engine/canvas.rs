use std::collections::{BTreeMap, BTreeSet};

use crate::color::color::Color;
use crate::engine::character::EffectCharacter;
use crate::engine::input::split_text;
use crate::foundation::core::{Coord, OutputArea};
use crate::foundation::error::{TermfxError, TermfxResult};
use crate::foundation::ids::CharId;
use crate::render::backend::RenderBackend;

#[derive(Clone, Debug, PartialEq)]
struct RenderedCell {
    coord: Coord,
    symbol: String,
    color: Option<Color>,
}

/// Counts of backend calls issued by one [`Canvas::print`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrintStats {
    /// Cells written.
    pub writes: usize,
    /// Cells cleared.
    pub clears: usize,
}

/// Owner of the full character population and of what is currently on screen.
///
/// Characters live in an arena indexed by [`CharId`] for the whole run. Rendering is diffed
/// against the previous pass, so an unchanged character costs nothing.
#[derive(Debug)]
pub struct Canvas {
    characters: Vec<EffectCharacter>,
    area: OutputArea,
    rendered: BTreeMap<CharId, RenderedCell>,
}

impl Canvas {
    /// Build one character per printable grapheme of `text`.
    #[tracing::instrument(skip(text), fields(bytes = text.len()))]
    pub fn from_text(text: &str) -> Self {
        let (cells, area) = split_text(text);
        let characters = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| EffectCharacter::new(CharId(i as u32), cell.symbol, cell.coord))
            .collect::<Vec<_>>();
        tracing::debug!(
            characters = characters.len(),
            top = area.top,
            right = area.right,
            "canvas built"
        );
        Self {
            characters,
            area,
            rendered: BTreeMap::new(),
        }
    }

    /// Bounds derived from the input text.
    pub fn output_area(&self) -> OutputArea {
        self.area
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// `true` when the input had no printable graphemes.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// All characters in input order.
    pub fn characters(&self) -> &[EffectCharacter] {
        &self.characters
    }

    /// Mutable access for effect setup.
    pub fn characters_mut(&mut self) -> &mut [EffectCharacter] {
        &mut self.characters
    }

    /// Look up a character by id.
    pub fn get(&self, id: CharId) -> Option<&EffectCharacter> {
        self.characters.get(id.0 as usize)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: CharId) -> Option<&mut EffectCharacter> {
        self.characters.get_mut(id.0 as usize)
    }

    pub(crate) fn character_mut(&mut self, id: CharId) -> TermfxResult<&mut EffectCharacter> {
        self.characters
            .get_mut(id.0 as usize)
            .ok_or_else(|| TermfxError::invariant(format!("unknown character {id:?}")))
    }

    /// Show or hide a character. Fails on an unknown id.
    pub fn set_visibility(&mut self, id: CharId, visible: bool) -> TermfxResult<()> {
        self.character_mut(id)?.set_visible(visible);
        Ok(())
    }

    /// Characters currently flagged visible, in id order.
    pub fn visible(&self) -> impl Iterator<Item = &EffectCharacter> {
        self.characters.iter().filter(|c| c.is_visible())
    }

    /// Push the changes since the previous pass to `backend` and flush one frame.
    ///
    /// All clears are issued before any write, so a character arriving on a cell another one
    /// just left is never erased. Unchanged characters whose cell was cleared are repainted.
    pub fn print(&mut self, backend: &mut dyn RenderBackend) -> TermfxResult<PrintStats> {
        let mut stats = PrintStats::default();
        let mut cleared = BTreeSet::new();

        let mut gone = Vec::new();
        for (id, cell) in &self.rendered {
            let moved = match self.characters.get(id.0 as usize) {
                Some(c) if c.is_visible() => c.current_coord() != cell.coord,
                _ => {
                    gone.push(*id);
                    true
                }
            };
            if moved {
                backend.clear(cell.coord)?;
                cleared.insert(cell.coord);
                stats.clears += 1;
            }
        }
        for id in gone {
            self.rendered.remove(&id);
        }

        for c in self.characters.iter().filter(|c| c.is_visible()) {
            let now = RenderedCell {
                coord: c.current_coord(),
                symbol: c.symbol().to_owned(),
                color: c.color(),
            };
            let stale = match self.rendered.get(&c.id()) {
                Some(prev) => *prev != now || cleared.contains(&now.coord),
                None => true,
            };
            if stale {
                backend.write(&now.symbol, now.color, now.coord)?;
                stats.writes += 1;
                self.rendered.insert(c.id(), now);
            }
        }

        for c in &mut self.characters {
            c.mark_rendered();
        }
        backend.flush()?;
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/canvas.rs"]
mod tests;
