//! Headless game bookkeeping used to drive the predictor outside a real game.
//!
//! - [`PieceBuffer`] - 7-bag piece generation with a preview queue
//! - [`GameStats`] - Cumulative score fed back to the predictor's difficulty adaptation

pub use self::{game_stats::*, piece_buffer::*};

mod game_stats;
mod piece_buffer;
