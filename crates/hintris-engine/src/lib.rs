//! Board and piece model for the hintris move predictor.
//!
//! - [`Grid`] - The 20×10 playfield with collision, placement and line clearing
//! - [`Piece`] / [`PieceKind`] / [`Rotation`] - Tetrominoes and their static shape tables
//! - [`PieceBuffer`] - 7-bag piece generation for headless play
//! - [`GameStats`] - Score and line-clear bookkeeping

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A caller-supplied grid matrix did not have 20 rows of 10 cells.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum InvalidGridError {
    #[display("expected {} rows, got {actual}", crate::GRID_HEIGHT)]
    RowCount { actual: usize },
    #[display("expected {} cells in row {row}, got {actual}", crate::GRID_WIDTH)]
    ColumnCount { row: usize, actual: usize },
}

/// A piece kind was not one of `I`, `O`, `T`, `S`, `Z`, `J`, `L`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown piece kind: {name:?}")]
pub struct UnknownPieceKindError {
    name: String,
}

impl UnknownPieceKindError {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self { name }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
