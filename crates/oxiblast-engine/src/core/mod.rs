pub use self::{board::*, shape::*};

pub(crate) mod board;
pub(crate) mod shape;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 8;
/// Board height in cells.
pub const BOARD_HEIGHT: usize = 8;
