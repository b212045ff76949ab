//! 3×3 neighbourhoods and the crossing-number classifier.
//!
//! The crossing number of a ridge pixel is the count of ridge→background
//! transitions met while walking its 8 neighbours clockwise, starting at the
//! top-left cell and closing the loop back to it:
//!
//! ```text
//!  0 1 2      TL T  TR
//!  7 . 3      L  .  R
//!  6 5 4      BL B  BR
//! ```
//!
//! A value of 1 marks a ridge ending, values above 2 mark a ridge split.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::minutia::MinutiaKind;

/// Clockwise neighbour walk as `(dy, dx)` offsets, starting top-left.
const RING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Binary 3×3 block centred on a skeleton pixel (`true` = ridge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Row-major cells; `cells[1][1]` is the centre pixel.
    pub cells: [[bool; 3]; 3],
}

impl Neighborhood {
    pub fn from_cells(cells: [[bool; 3]; 3]) -> Self {
        Self { cells }
    }

    /// Sample the block centred at `(row, col)`.
    ///
    /// The centre must be an interior pixel (`1 <= row < h-1`, `1 <= col < w-1`).
    pub(crate) fn sample(img: &GrayImage, row: u32, col: u32, ridge_value: u8) -> Self {
        let mut cells = [[false; 3]; 3];
        for (dy, cells_row) in cells.iter_mut().enumerate() {
            for (dx, cell) in cells_row.iter_mut().enumerate() {
                let y = row + dy as u32 - 1;
                let x = col + dx as u32 - 1;
                *cell = img.get_pixel(x, y)[0] == ridge_value;
            }
        }
        Self { cells }
    }

    /// Neighbour values in clockwise walk order.
    pub fn ring(&self) -> [bool; 8] {
        RING_OFFSETS.map(|(dy, dx)| self.cells[(1 + dy) as usize][(1 + dx) as usize])
    }

    pub fn crossing_number(&self) -> u32 {
        let ring = self.ring();
        (0..ring.len())
            .filter(|&k| ring[k] && !ring[(k + 1) % ring.len()])
            .count() as u32
    }

    pub fn classify(&self) -> Option<MinutiaKind> {
        classify_crossing_number(self.crossing_number())
    }

    /// Text rendering of the block, `#` for ridge and `.` for background.
    pub fn render(&self) -> [String; 3] {
        self.cells
            .map(|r| r.iter().map(|&c| if c { '#' } else { '.' }).collect())
    }
}

/// Map a crossing number to a minutia class.
pub fn classify_crossing_number(crossing_number: u32) -> Option<MinutiaKind> {
    match crossing_number {
        1 => Some(MinutiaKind::Termination),
        n if n > 2 => Some(MinutiaKind::Bifurcation),
        _ => None,
    }
}
