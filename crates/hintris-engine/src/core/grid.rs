use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InvalidGridError;

use super::piece::{Piece, PieceKind};

/// Number of columns in the grid.
pub const GRID_WIDTH: usize = 10;
/// Number of rows in the grid.
pub const GRID_HEIGHT: usize = 20;

/// A single row of cells. `0` is empty; any other value is occupied.
pub type GridRow = [u8; GRID_WIDTH];

/// The 20×10 playfield.
///
/// Row 0 is the top of the visible field and row 19 the bottom. A cell holds
/// `0` when empty, otherwise the [`PieceKind::cell_tag`] of the piece that
/// filled it. Only occupancy matters for collision and analysis.
///
/// All operations that simulate a move have two flavors: an in-place one
/// (`fill_piece`, `clear_lines`) for private scratch copies, and a pure one
/// (`placed`, `cleared`) that leaves `self` untouched.
///
/// # Example
///
/// ```
/// use hintris_engine::{Grid, Piece, PieceKind, Rotation};
///
/// let piece = Piece::with_placement(PieceKind::I, 0, 18, Rotation::SPAWN);
/// let grid = Grid::EMPTY.placed(piece);
/// assert!(grid.is_occupied(0, 19));
/// assert!(Grid::EMPTY.is_colliding(piece.down()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: [GridRow; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = InvalidGridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.rows.iter().map(|row| row.to_vec()).collect()
    }
}

impl Grid {
    pub const WIDTH: usize = GRID_WIDTH;
    pub const HEIGHT: usize = GRID_HEIGHT;
    pub const EMPTY_ROW: GridRow = [0; GRID_WIDTH];
    pub const EMPTY: Self = Self {
        rows: [Self::EMPTY_ROW; GRID_HEIGHT],
    };

    /// Builds a grid from a caller-supplied matrix, validating its dimensions.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, InvalidGridError>
    where
        R: AsRef<[u8]>,
    {
        if rows.len() != GRID_HEIGHT {
            return Err(InvalidGridError::RowCount { actual: rows.len() });
        }
        let mut grid = Self::EMPTY;
        for (y, (dst, src)) in grid.rows.iter_mut().zip(rows).enumerate() {
            let src = src.as_ref();
            *dst = src
                .try_into()
                .map_err(|_| InvalidGridError::ColumnCount {
                    row: y,
                    actual: src.len(),
                })?;
        }
        Ok(grid)
    }

    #[must_use]
    pub const fn from_array(rows: [GridRow; GRID_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Builds a grid from ASCII art, `#` for occupied and `.` for empty.
    ///
    /// The given lines form the bottom rows of the grid; rows above them are
    /// empty. Blank lines and other characters are ignored.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly 10 cells or there are more than 20 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= GRID_HEIGHT,
            "At most {GRID_HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        let mut grid = Self::EMPTY;
        let top = GRID_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                GRID_WIDTH,
                "Each row must have exactly {GRID_WIDTH} cells, got {} at row {i}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    grid.rows[top + i][x] = 1;
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn rows(&self) -> &[GridRow; GRID_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x] != 0
    }

    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        self.rows[y][x] = value;
    }

    /// Returns whether the piece cannot exist at its position.
    ///
    /// A cell collides when it is left of column 0, right of column 9, at or
    /// below row 20, or on an occupied cell. Cells above row 0 never collide.
    #[must_use]
    pub fn is_colliding(&self, piece: Piece) -> bool {
        piece.cells().into_iter().any(|(x, y)| {
            let Ok(col) = usize::try_from(x) else {
                return true;
            };
            if col >= GRID_WIDTH {
                return true;
            }
            let Ok(row) = usize::try_from(y) else {
                return false;
            };
            row >= GRID_HEIGHT || self.rows[row][col] != 0
        })
    }

    /// Writes the piece's cells with its kind tag. Cells outside the grid are dropped.
    pub fn fill_piece(&mut self, piece: Piece) {
        let tag = piece.kind().cell_tag();
        for (x, y) in piece.cells() {
            if let Some((col, row)) = Self::grid_position(x, y) {
                self.rows[row][col] = tag;
            }
        }
    }

    /// Like [`Self::fill_piece`], but returns a new grid.
    #[must_use]
    pub fn placed(&self, piece: Piece) -> Self {
        let mut grid = self.clone();
        grid.fill_piece(piece);
        grid
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down; empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..GRID_HEIGHT).rev() {
            if Self::is_row_filled(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(Self::EMPTY_ROW);
        count
    }

    /// Like [`Self::clear_lines`], but returns a new grid with the count.
    #[must_use]
    pub fn cleared(&self) -> (Self, usize) {
        let mut grid = self.clone();
        let count = grid.clear_lines();
        (grid, count)
    }

    fn is_row_filled(row: &GridRow) -> bool {
        row.iter().all(|&c| c != 0)
    }

    fn grid_position(x: i32, y: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(x).ok().filter(|&c| c < GRID_WIDTH)?;
        let row = usize::try_from(y).ok().filter(|&r| r < GRID_HEIGHT)?;
        Some((col, row))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &cell in row {
                let c = match cell {
                    0 => '.',
                    tag => PieceKind::ALL
                        .iter()
                        .find(|k| k.cell_tag() == tag)
                        .map_or('#', |k| k.as_char()),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rotation;

    fn filled_row() -> GridRow {
        [1; GRID_WIDTH]
    }

    #[test]
    fn test_from_rows_validates_dimensions() {
        let rows = vec![vec![0u8; GRID_WIDTH]; GRID_HEIGHT];
        assert_eq!(Grid::from_rows(&rows).unwrap(), Grid::EMPTY);

        let short = vec![vec![0u8; GRID_WIDTH]; GRID_HEIGHT - 1];
        let err = Grid::from_rows(&short).unwrap_err();
        assert!(err.is_row_count());

        let mut ragged = vec![vec![0u8; GRID_WIDTH]; GRID_HEIGHT];
        ragged[7].pop();
        let err = Grid::from_rows(&ragged).unwrap_err();
        assert_eq!(err, InvalidGridError::ColumnCount { row: 7, actual: 9 });
    }

    #[test]
    fn test_collision_at_side_walls() {
        let grid = Grid::EMPTY;
        // O occupies box columns 0 and 1.
        let o = Piece::with_placement(PieceKind::O, 0, 5, Rotation::SPAWN);
        assert!(!grid.is_colliding(o));
        assert!(grid.is_colliding(o.with_position(-1, 5)));
        assert!(!grid.is_colliding(o.with_position(8, 5)));
        assert!(grid.is_colliding(o.with_position(9, 5)));
    }

    #[test]
    fn test_collision_at_floor() {
        let grid = Grid::EMPTY;
        let o = Piece::with_placement(PieceKind::O, 4, 18, Rotation::SPAWN);
        assert!(!grid.is_colliding(o));
        // Lowest cell reaches row 20.
        assert!(grid.is_colliding(o.down()));
    }

    #[test]
    fn test_cells_above_top_never_collide() {
        let grid = Grid::EMPTY;
        let o = Piece::with_placement(PieceKind::O, 4, -5, Rotation::SPAWN);
        assert!(!grid.is_colliding(o));
        // Still collides with the side walls above the top.
        assert!(grid.is_colliding(o.with_position(-1, -5)));
    }

    #[test]
    fn test_collision_with_occupied_cell() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(5, 10, 3);
        let o = Piece::with_placement(PieceKind::O, 4, 9, Rotation::SPAWN);
        assert!(grid.is_colliding(o));
        assert!(!grid.is_colliding(o.up()));
    }

    #[test]
    fn test_placed_leaves_original_untouched() {
        let grid = Grid::EMPTY;
        let t = Piece::with_placement(PieceKind::T, 0, 18, Rotation::SPAWN);
        let placed = grid.placed(t);
        assert_eq!(grid, Grid::EMPTY);
        assert_eq!(placed.cell(1, 18), PieceKind::T.cell_tag());
        assert_eq!(placed.cell(0, 19), PieceKind::T.cell_tag());
        assert_eq!(placed.cell(2, 19), PieceKind::T.cell_tag());
        assert_eq!(placed.cell(0, 18), 0);
    }

    #[test]
    fn test_placed_drops_cells_above_top() {
        // Vertical I spanning rows -2..=1.
        let i = Piece::with_placement(PieceKind::I, 0, -2, Rotation::new(1));
        let placed = Grid::EMPTY.placed(i);
        assert!(placed.is_occupied(2, 0));
        assert!(placed.is_occupied(2, 1));
        let occupied = placed.rows().iter().flatten().filter(|&&c| c != 0).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_zero_footprint_placement_is_identity() {
        // Horizontal I at y = -2 occupies row -1 only.
        let i = Piece::with_placement(PieceKind::I, 3, -2, Rotation::SPAWN);
        let (grid, cleared) = Grid::EMPTY.placed(i).cleared();
        assert_eq!(grid, Grid::EMPTY);
        assert_eq!(cleared, 0);
    }

    #[test]
    fn test_clear_single_line() {
        let mut rows = [Grid::EMPTY_ROW; GRID_HEIGHT];
        rows[19] = filled_row();
        rows[18][0] = 2;
        let (grid, cleared) = Grid::from_array(rows).cleared();
        assert_eq!(cleared, 1);
        assert_eq!(grid.rows().len(), GRID_HEIGHT);
        assert_eq!(grid.rows()[0], Grid::EMPTY_ROW);
        // The row above the cleared one shifted down.
        assert_eq!(grid.cell(0, 19), 2);
        assert_eq!(grid.rows()[18], Grid::EMPTY_ROW);
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut rows = [Grid::EMPTY_ROW; GRID_HEIGHT];
        rows[19] = filled_row();
        rows[18][4] = 5;
        rows[17] = filled_row();
        rows[16][9] = 6;
        let mut grid = Grid::from_array(rows);
        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.cell(4, 19), 5);
        assert_eq!(grid.cell(9, 18), 6);
        assert!(grid.rows()[..18].iter().all(|r| *r == Grid::EMPTY_ROW));
    }

    #[test]
    fn test_partial_row_is_not_cleared() {
        let mut rows = [Grid::EMPTY_ROW; GRID_HEIGHT];
        rows[19] = filled_row();
        rows[19][3] = 0;
        let grid = Grid::from_array(rows);
        let (after, cleared) = grid.cleared();
        assert_eq!(cleared, 0);
        assert_eq!(after, grid);
    }

    #[test]
    fn test_clear_all_lines() {
        let mut grid = Grid::from_array([filled_row(); GRID_HEIGHT]);
        assert_eq!(grid.clear_lines(), GRID_HEIGHT);
        assert_eq!(grid, Grid::EMPTY);
    }

    #[test]
    fn test_grid_serialization() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(0, 19, 1);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let bad = serde_json::to_string(&vec![vec![0u8; GRID_WIDTH]; 3]).unwrap();
        let err = serde_json::from_str::<Grid>(&bad).unwrap_err();
        assert!(err.to_string().contains("expected 20 rows"));
    }

    #[test]
    fn test_from_ascii_is_bottom_aligned() {
        let grid = Grid::from_ascii(
            "
            #.........
            ##########
            ",
        );
        assert!(grid.is_occupied(0, 18));
        assert!(!grid.is_occupied(1, 18));
        assert!(grid.rows()[19].iter().all(|&c| c != 0));
        assert!(grid.rows()[..18].iter().all(|r| *r == Grid::EMPTY_ROW));
    }

    #[test]
    fn test_grid_display() {
        let grid = Grid::EMPTY.placed(Piece::with_placement(
            PieceKind::J,
            0,
            18,
            Rotation::SPAWN,
        ));
        let text = grid.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), GRID_HEIGHT);
        assert_eq!(lines[18], "J.........");
        assert_eq!(lines[19], "JJJ.......");
    }
}
