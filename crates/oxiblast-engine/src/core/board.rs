use std::fmt::Write as _;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::OutOfRangeError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, shape::Shape};

// All cells of a row occupied.
#[expect(clippy::cast_possible_truncation)]
const FULL_ROW_MASK: u8 = ((1u16 << BOARD_WIDTH) - 1) as u8;

/// Single board row stored as a bitmask.
///
/// Bit `x` corresponds to column `x`; a set bit is an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRow {
    bits: u8,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every cell in the row is occupied.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    /// Checks if the cell at column `x` is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, x: usize) -> bool {
        self.bits & (1 << x) != 0
    }

    /// Checks if any cell in `mask` (shifted by `x0`) is occupied.
    #[inline]
    fn is_any_cell_occupied(self, x0: usize, mask: u8) -> bool {
        self.bits & (mask << x0) != 0
    }

    /// Sets cells in `mask` (shifted by `x0`) as occupied.
    #[inline]
    fn occupy_cells(&mut self, x0: usize, mask: u8) {
        self.bits |= mask << x0;
    }

    /// Empties every cell in `mask`.
    #[inline]
    fn clear_cells(&mut self, mask: u8) {
        self.bits &= !mask;
    }

    /// Iterates the row's cells left to right, yielding occupancy.
    pub fn iter_cells(self) -> impl Iterator<Item = bool> {
        (0..BOARD_WIDTH).map(move |x| self.bits & (1 << x) != 0)
    }
}

/// The 8×8 occupancy grid.
///
/// Coordinates are `(x, y)` with `x` as column 0..8 left to right and `y` as
/// row 0..8 top to bottom. Dimensions never change; cell occupancy changes
/// only through [`Self::fill_shape`] and [`Self::sweep_full_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BitRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "ff,00,..." (one two-digit hex value per row, top to bottom)
        let mut hex_string = String::with_capacity(BOARD_HEIGHT * 3);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                hex_string.push(',');
            }
            write!(&mut hex_string, "{:02x}", row.bits).unwrap();
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} comma-separated hex values, got {}",
                BOARD_HEIGHT,
                parts.len()
            )));
        }

        let mut rows = [BitRow::EMPTY; BOARD_HEIGHT];
        for (i, hex_str) in parts.iter().enumerate() {
            let bits = u8::from_str_radix(hex_str, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at row {i}: {hex_str} ({e})"))
            })?;
            rows[i] = BitRow { bits };
        }

        Ok(Board { rows })
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BitRow::EMPTY; BOARD_HEIGHT],
    };

    /// Checks whether the cell at `(x, y)` is empty.
    ///
    /// Out-of-range coordinates are a caller contract violation and are
    /// reported as an error rather than folded into `false`.
    pub fn is_empty(&self, x: usize, y: usize) -> Result<bool, OutOfRangeError> {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return Err(OutOfRangeError { x, y });
        }
        Ok(!self.rows[y].is_cell_occupied(x))
    }

    /// Iterates the rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    /// Checks whether `shape` fits with its mask's top-left corner anchored
    /// at `(x, y)`: every occupied cell must map to an in-bounds, empty
    /// board cell.
    ///
    /// This is a query, not a precondition check: any violation yields
    /// `false`, never an error.
    #[must_use]
    pub fn can_place(&self, shape: Shape, x: usize, y: usize) -> bool {
        if x >= Self::WIDTH || y >= Self::HEIGHT || y + shape.height() > Self::HEIGHT {
            return false;
        }
        for (dy, &mask) in shape.row_masks().iter().enumerate() {
            if (u16::from(mask) << x) > u16::from(FULL_ROW_MASK) {
                // An occupied cell would fall past the right edge.
                return false;
            }
            if self.rows[y + dy].is_any_cell_occupied(x, mask) {
                return false;
            }
        }
        true
    }

    /// Marks every occupied cell of `shape` anchored at `(x, y)` as
    /// occupied.
    ///
    /// Callers must have checked [`Self::can_place`] first; the commit
    /// itself has no failure path and never partially applies.
    pub fn fill_shape(&mut self, shape: Shape, x: usize, y: usize) {
        debug_assert!(self.can_place(shape, x, y));
        for (dy, &mask) in shape.row_masks().iter().enumerate() {
            self.rows[y + dy].occupy_cells(x, mask);
        }
    }

    /// Clears every fully occupied row and column and returns the number of
    /// lines cleared.
    ///
    /// Rows and columns are detected on the pre-sweep snapshot as two
    /// independent passes: a cell belonging to both a full row and a full
    /// column is cleared once but counted twice, once per line.
    pub fn sweep_full_lines(&mut self) -> usize {
        let full_rows: ArrayVec<usize, BOARD_HEIGHT> = (0..BOARD_HEIGHT)
            .filter(|&y| self.rows[y].is_filled())
            .collect();
        // A column is full when its bit survives an AND across every row.
        let full_cols = self
            .rows
            .iter()
            .fold(FULL_ROW_MASK, |acc, row| acc & row.bits);

        for &y in &full_rows {
            self.rows[y] = BitRow::EMPTY;
        }
        for row in &mut self.rows {
            row.clear_cells(full_cols);
        }

        full_rows.len() + full_cols.count_ones() as usize
    }

    /// Checks whether any anchor on the board accepts `shape`.
    #[must_use]
    pub fn can_place_anywhere(&self, shape: Shape) -> bool {
        (0..Self::HEIGHT).any(|y| (0..Self::WIDTH).any(|x| self.can_place(shape, x, y)))
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// `#` is an occupied cell, `.` an empty cell. Rows are given top to
    /// bottom, eight cells each; trailing rows may be omitted and are left
    /// empty.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= Self::HEIGHT,
            "expected at most {} rows, got {}",
            Self::HEIGHT,
            lines.len()
        );

        for (y, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                Self::WIDTH,
                "each row must have exactly {} cells, got {} at row {y}",
                Self::WIDTH,
                cells.len(),
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    board.rows[y].occupy_cells(x, 0b1);
                }
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use crate::core::shape::{ShapeColor, all_shapes};

    use super::*;

    const DOT: Shape = Shape::new(&[0b1], ShapeColor::Yellow);
    const BAR_H4: Shape = Shape::new(&[0b1111], ShapeColor::Lime);
    const SQUARE: Shape = Shape::new(&[0b11, 0b11], ShapeColor::Aquamarine);

    fn random_board(rng: &mut Pcg32) -> Board {
        let mut rows = [BitRow::EMPTY; BOARD_HEIGHT];
        for row in &mut rows {
            *row = BitRow { bits: rng.random() };
        }
        Board { rows }
    }

    /// Cell-by-cell reference implementation of the placement query.
    fn can_place_brute_force(board: &Board, shape: Shape, x: usize, y: usize) -> bool {
        shape.occupied_cells().all(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            px < Board::WIDTH && py < Board::HEIGHT && board.is_empty(px, py).unwrap()
        })
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                assert_eq!(board.is_empty(x, y), Ok(true));
            }
        }
    }

    #[test]
    fn test_is_empty_out_of_range() {
        let board = Board::EMPTY;
        assert_eq!(
            board.is_empty(Board::WIDTH, 0),
            Err(OutOfRangeError { x: Board::WIDTH, y: 0 })
        );
        assert_eq!(
            board.is_empty(0, Board::HEIGHT),
            Err(OutOfRangeError { x: 0, y: Board::HEIGHT })
        );
    }

    #[test]
    fn test_fill_shape_marks_cells() {
        let mut board = Board::EMPTY;
        board.fill_shape(SQUARE, 3, 4);

        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                let expected = (3..5).contains(&x) && (4..6).contains(&y);
                assert_eq!(board.is_empty(x, y), Ok(!expected), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_can_place_respects_bounds_and_occupancy() {
        let mut board = Board::EMPTY;
        assert!(board.can_place(SQUARE, 6, 6));
        assert!(!board.can_place(SQUARE, 7, 6));
        assert!(!board.can_place(SQUARE, 6, 7));
        assert!(!board.can_place(SQUARE, 7, 7));

        board.fill_shape(DOT, 6, 6);
        assert!(!board.can_place(SQUARE, 6, 6));
        assert!(board.can_place(SQUARE, 4, 6));
    }

    #[test]
    fn test_can_place_matches_brute_force() {
        let mut rng = Pcg32::seed_from_u64(0x0b1a57);
        for _ in 0..200 {
            let board = random_board(&mut rng);
            for &shape in all_shapes() {
                // Anchors past the edge are included on purpose.
                for y in 0..Board::HEIGHT + 2 {
                    for x in 0..Board::WIDTH + 2 {
                        assert_eq!(
                            board.can_place(shape, x, y),
                            can_place_brute_force(&board, shape, x, y),
                            "shape {shape:?} at ({x}, {y}) on {board:?}",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sweep_single_row() {
        let mut board = Board::EMPTY;
        board.fill_shape(BAR_H4, 0, 2);
        board.fill_shape(BAR_H4, 4, 2);

        assert_eq!(board.sweep_full_lines(), 1);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_sweep_single_column() {
        let board_art = "
            ....#...
            ....#...
            ....#...
            ....#...
            ....#...
            ....#...
            ....#...
            ....#...
        ";
        let mut board = Board::from_ascii(board_art);

        assert_eq!(board.sweep_full_lines(), 1);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_sweep_counts_shared_cell_twice() {
        // Row 3 and column 3 are both full; they share cell (3, 3).
        let mut board = Board::from_ascii(
            "
            ...#....
            ...#....
            ...#....
            ########
            ...#....
            ...#....
            ...#....
            ...#....
            ",
        );

        assert_eq!(board.sweep_full_lines(), 2);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_sweep_leaves_partial_lines() {
        let art = "
            ########
            #######.
            ........
            ........
            ........
            ........
            ........
            #.......
        ";
        let mut board = Board::from_ascii(art);

        assert_eq!(board.sweep_full_lines(), 1);

        // The partial row and the stray cell survive.
        assert_eq!(board.is_empty(0, 1), Ok(false));
        assert_eq!(board.is_empty(7, 1), Ok(true));
        assert_eq!(board.is_empty(0, 7), Ok(false));
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut board = Board::from_ascii(
            "
            ########
            ##......
            ########
            ",
        );

        assert_eq!(board.sweep_full_lines(), 2);
        assert_eq!(board.sweep_full_lines(), 0);
    }

    #[test]
    fn test_sweep_full_board() {
        let mut board = Board::EMPTY;
        for row in &mut board.rows {
            *row = BitRow::FULL;
        }

        // Eight rows plus eight columns.
        assert_eq!(board.sweep_full_lines(), 16);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_can_place_anywhere() {
        let mut board = Board::EMPTY;
        assert!(board.can_place_anywhere(SQUARE));

        // Checkerboard leaves no room for anything but the dot.
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                if (x + y) % 2 == 0 {
                    board.fill_shape(DOT, x, y);
                }
            }
        }
        assert!(board.can_place_anywhere(DOT));
        assert!(!board.can_place_anywhere(SQUARE));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let board = Board::from_ascii(
            "
            #.......
            .#......
            ########
            ",
        );

        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, "\"01,02,ff,00,00,00,00,00\"");

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_deserialization_error_cases() {
        // Wrong row count
        assert!(serde_json::from_str::<Board>("\"00,00\"").is_err());
        // Bad hex digit
        assert!(serde_json::from_str::<Board>("\"zz,00,00,00,00,00,00,00\"").is_err());
    }
}
