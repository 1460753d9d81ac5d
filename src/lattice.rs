//! Compiled-in geometry of the parallelogram ball lattice.
//!
//! The display is a parallelogram slanted to the left, wired as one 128-LED
//! strip that snakes through the balls. Imagining the panel as a 7×20
//! `(row, col)` grid, this module holds the lookup table from grid cell to
//! strip index, the ordered border path used for the seconds sweep, and the
//! fixed strip addresses of the four warning indicators.
//!
//! ```text
//!        / 012 013 ...
//!      / 001 011   ...
//!    / 002 010 015 ...
//!  < 000 003 009   ...
//!    \ 004 008 017 ...
//!      \ 005 007   ...
//!        \ 006 019 ...
//! ```
//!
//! Cells that do not exist physically (the clipped corners of the
//! parallelogram) are marked absent; [`strip_index`] returns `None` for
//! them and for any out-of-range coordinate, so animation code can do
//! signed coordinate arithmetic at the edges without bounds bookkeeping.

use crate::error::{Error, Result};

/// Number of lattice rows.
pub const ROWS: usize = 7;
/// Number of lattice columns.
pub const COLS: usize = 20;
/// Number of LEDs on the physical strip.
pub const LED_COUNT: usize = 128;

/// Marker for lattice cells with no ball behind them.
const ABSENT: u16 = 999;

/// Strip index for each `(row, col)` lattice cell.
const ADDRESS: [[u16; COLS]; ROWS] = [
    [999, 999, 999, 12, 13, 26, 27, 40, 41, 54, 55, 68, 69, 82, 83, 96, 97, 110, 111, 124],
    [999, 999, 1, 11, 14, 25, 28, 39, 42, 53, 56, 67, 70, 81, 84, 95, 98, 109, 112, 123],
    [999, 2, 10, 15, 24, 29, 38, 43, 52, 57, 66, 71, 80, 85, 94, 99, 108, 113, 122, 125],
    [0, 3, 9, 16, 23, 30, 37, 44, 51, 58, 65, 72, 79, 86, 93, 100, 107, 114, 121, 126],
    [4, 8, 17, 22, 31, 36, 45, 50, 59, 64, 73, 78, 87, 92, 101, 106, 115, 120, 127, 999],
    [5, 7, 18, 21, 32, 35, 46, 49, 60, 63, 74, 77, 88, 91, 102, 105, 116, 119, 999, 999],
    [6, 19, 20, 33, 34, 47, 48, 61, 62, 75, 76, 89, 90, 103, 104, 117, 118, 999, 999, 999],
];

/// Strip indices of the display's outer border, ordered clockwise starting
/// at the top middle. Painting a prefix of this path produces the seconds
/// sweep.
pub const BORDER: [u8; 44] = [
    68, 69, 82, 83, 96, 97, 110, 111, 124, // top, from the middle rightwards
    123, 125, 126, 127, 119, // right point
    118, 117, 104, 103, 90, 89, 76, 75, 62, 61, 48, 47, 34, 33, 20, 19, 6, // bottom
    5, 4, 0, 2, 1, // left point
    12, 13, 26, 27, 40, 41, 54, 55, // top, back to the middle
];

/// Strip addresses of the four warning indicators: the parallelogram's
/// left tip, top-left corner, top-right corner, and right tip.
pub const WARNING_ADDRESSES: [usize; 4] = [0, 12, 124, 127];

/// Strip index of the lattice cell `(row, col)`, or `None` when the cell is
/// absent or the coordinates fall outside the 7×20 grid.
#[must_use]
pub const fn strip_index(row: i32, col: i32) -> Option<usize> {
    if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLS as i32 {
        return None;
    }
    let value = ADDRESS[row as usize][col as usize];
    if value == ABSENT {
        None
    } else {
        Some(value as usize)
    }
}

/// Verify at runtime that the lattice table reaches every strip index
/// exactly once and that the border path stays on the strip.
///
/// The same properties are asserted at compile time below; this form exists
/// for hosts that want an explicit startup self test with a reportable
/// error.
///
/// # Errors
///
/// Returns the first missing or duplicated strip index found, or the first
/// border entry outside the strip.
pub fn self_check() -> Result<()> {
    let mut seen = [false; LED_COUNT];
    for row in ADDRESS {
        for value in row {
            if value == ABSENT {
                continue;
            }
            let index = value as usize;
            if index >= LED_COUNT {
                return Err(Error::UnreachableStripIndex { index });
            }
            if seen[index] {
                return Err(Error::DuplicateStripIndex { index });
            }
            seen[index] = true;
        }
    }
    for (index, reached) in seen.iter().enumerate() {
        if !reached {
            return Err(Error::UnreachableStripIndex { index });
        }
    }
    for entry in BORDER {
        if entry as usize >= LED_COUNT {
            return Err(Error::BorderOutOfRange {
                entry: entry as usize,
            });
        }
    }
    Ok(())
}

const fn address_table_is_exact() -> bool {
    let mut seen = [false; LED_COUNT];
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col < COLS {
            let value = ADDRESS[row][col];
            if value != ABSENT {
                if value as usize >= LED_COUNT || seen[value as usize] {
                    return false;
                }
                seen[value as usize] = true;
            }
            col += 1;
        }
        row += 1;
    }
    let mut index = 0;
    while index < LED_COUNT {
        if !seen[index] {
            return false;
        }
        index += 1;
    }
    true
}

const fn border_is_unique() -> bool {
    let mut i = 0;
    while i < BORDER.len() {
        if BORDER[i] as usize >= LED_COUNT {
            return false;
        }
        let mut j = i + 1;
        while j < BORDER.len() {
            if BORDER[i] == BORDER[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    address_table_is_exact(),
    "lattice table must reach every strip index exactly once"
);
const _: () = assert!(border_is_unique(), "border path must not repeat a strip index");
