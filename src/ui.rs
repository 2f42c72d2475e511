//! Text rendering of boards and heatmaps, and `A1`-style coordinates.

use core::fmt;

use crate::board::Board;
use crate::common::GuessResult;
use crate::engine::BeliefEngine;
use crate::probability::ProbabilityMap;

/// Column letter for `col`, wrapping past `Z` into lowercase.
fn column_label(col: usize) -> char {
    match col {
        0..=25 => (b'A' + col as u8) as char,
        26..=51 => (b'a' + (col - 26) as u8) as char,
        _ => '?',
    }
}

/// Format a scalar cell as `A1` (column letter, 1-based row).
pub fn coord_to_string(cell: usize, width: usize) -> String {
    let (row, col) = (cell / width, cell % width);
    format!("{}{}", column_label(col), row + 1)
}

/// Parse `A1` or `row,col` (both 1-based, so `2,3` is `C2`) into a scalar
/// cell on the given grid.
pub fn parse_coord(input: &str, width: usize, height: usize) -> Option<usize> {
    let input = input.trim();
    let (row, col) = if let Some((r, c)) = input.split_once(',') {
        let row = r.trim().parse::<usize>().ok()?.checked_sub(1)?;
        let col = c.trim().parse::<usize>().ok()?.checked_sub(1)?;
        (row, col)
    } else {
        let mut chars = input.chars();
        let col_ch = chars.next()?;
        let col = match col_ch {
            'A'..='Z' => col_ch as usize - 'A' as usize,
            'a'..='z' if width <= 26 => col_ch as usize - 'a' as usize,
            'a'..='z' => 26 + col_ch as usize - 'a' as usize,
            _ => return None,
        };
        let row: usize = chars.as_str().parse().ok()?;
        if row == 0 {
            return None;
        }
        (row - 1, col)
    };
    if row >= height || col >= width {
        return None;
    }
    Some(row * width + col)
}

fn write_header(f: &mut fmt::Formatter<'_>, width: usize, cell_width: usize) -> fmt::Result {
    write!(f, "   ")?;
    for c in 0..width {
        write!(f, " {:>w$}", column_label(c), w = cell_width)?;
    }
    writeln!(f)
}

/// Shows a board's ships as `o` and water as `~`.
pub struct BoardGrid<'a> {
    pub board: &'a Board,
    pub width: usize,
}

impl fmt::Display for BoardGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.board.grid_cells() / self.width;
        write_header(f, self.width, 1)?;
        for r in 0..height {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..self.width {
                let ch = if self.board.contains(r * self.width + c) {
                    'o'
                } else {
                    '~'
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ProbabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width().max(1);
        write_header(f, width, 5)?;
        for (r, row) in self.values().chunks(width).enumerate() {
            write!(f, "{:2} ", r + 1)?;
            for p in row {
                write!(f, " {:5.1}", p)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A game in progress: `X` for hits, `O` for misses, percentages elsewhere,
/// and the suggested cell bracketed as `>pp<`.
pub struct BeliefGrid<'a, 's> {
    pub engine: &'a BeliefEngine<'s>,
    pub suggestion: Option<usize>,
}

impl fmt::Display for BeliefGrid<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let space = self.engine.space();
        let width = space.width();
        let map = self.engine.probability_map();
        write_header(f, width, 5)?;
        for r in 0..space.height() {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..width {
                let cell = r * width + c;
                match self.engine.trace().result(cell) {
                    Some(GuessResult::Hit) => write!(f, "   X  ")?,
                    Some(GuessResult::Miss) => write!(f, "   O  ")?,
                    None => {
                        let p = map.get(cell).unwrap_or(0.0);
                        if self.suggestion == Some(cell) {
                            write!(f, " >{:3.0}<", p)?;
                        } else {
                            write!(f, "  {:3.0} ", p)?;
                        }
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
