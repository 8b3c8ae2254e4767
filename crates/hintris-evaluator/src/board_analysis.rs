use std::cell::OnceCell;

use hintris_engine::Grid;

/// Lazily computed surface metrics of a grid.
///
/// Each metric is computed on first access and cached, so evaluators that
/// only need a subset pay only for what they read.
#[derive(Debug)]
pub struct BoardAnalysis {
    grid: Grid,
    column_heights: OnceCell<[u8; Grid::WIDTH]>,
    aggregate_height: OnceCell<u32>,
    holes: OnceCell<u32>,
    bumpiness: OnceCell<u32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            column_heights: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Height of each column: `20 - topmost occupied row`, or 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> &[u8; Grid::WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; Grid::WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top = (0..Grid::HEIGHT).find(|&y| self.grid.is_occupied(x, y));
                let Some(top) = top else {
                    continue;
                };
                *h = u8::try_from(Grid::HEIGHT - top).unwrap();
            }
            column_heights
        })
    }

    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        *self
            .aggregate_height
            .get_or_init(|| self.column_heights().iter().copied().map(u32::from).sum())
    }

    /// Empty cells lying below the topmost occupied cell of their column.
    #[must_use]
    pub fn holes(&self) -> u32 {
        *self.holes.get_or_init(|| {
            let mut holes = 0;
            for (x, &h) in self.column_heights().iter().enumerate() {
                let top = Grid::HEIGHT - usize::from(h);
                holes += (top..Grid::HEIGHT)
                    .filter(|&y| !self.grid.is_occupied(x, y))
                    .map(|_| 1)
                    .sum::<u32>();
            }
            holes
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| {
                    let left = i32::from(w[0]);
                    let right = i32::from(w[1]);
                    (right - left).unsigned_abs()
                })
                .sum()
        })
    }
}
