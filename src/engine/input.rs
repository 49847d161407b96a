use unicode_segmentation::UnicodeSegmentation;

use crate::foundation::core::{Coord, OutputArea};

const TAB_WIDTH: usize = 4;

/// A printable grapheme and where it sits in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputCell {
    /// Printable grapheme.
    pub symbol: String,
    /// Position in the input.
    pub coord: Coord,
}

/// Split raw text into printable cells and the output area they span.
///
/// Tabs expand to four spaces. Whitespace and control graphemes occupy a column but produce no
/// cell. The last line is row 1.
pub fn split_text(text: &str) -> (Vec<InputCell>, OutputArea) {
    let expanded = text.replace('\t', &" ".repeat(TAB_WIDTH));
    let lines: Vec<&str> = expanded.lines().collect();
    let top = lines.len() as i32;

    let mut cells = Vec::new();
    let mut right = 0i32;
    for (line_idx, line) in lines.iter().enumerate() {
        let row = top - line_idx as i32;
        let mut width = 0i32;
        for (col_idx, g) in line.graphemes(true).enumerate() {
            width = col_idx as i32 + 1;
            if g.chars().all(|c| c.is_whitespace() || c.is_control()) {
                continue;
            }
            cells.push(InputCell {
                symbol: g.to_owned(),
                coord: Coord::new(row, width),
            });
        }
        right = right.max(width);
    }

    (cells, OutputArea::new(top, right))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/input.rs"]
mod tests;
