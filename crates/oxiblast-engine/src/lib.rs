pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A cell coordinate query referenced a position outside the board.
///
/// This is a caller contract violation, not a gameplay outcome; placement
/// attempts at bad anchors yield [`Placement::Rejected`](crate::Placement)
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("coordinate ({x}, {y}) is outside the board")]
pub struct OutOfRangeError {
    pub x: usize,
    pub y: usize,
}

/// A tray slot was addressed incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SlotError {
    #[display("tray slot index {index} is out of range")]
    IndexOutOfRange { index: usize },
    #[display("tray slot {index} is empty")]
    Empty { index: usize },
}

/// A placement command violated the session contract.
///
/// Both variants are programming errors in the calling layer and should be
/// surfaced, not retried. An anchor that merely does not fit is reported as
/// [`Placement::Rejected`](crate::Placement), which is not an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum PlaceError {
    #[display("session is already over")]
    GameOver,
    #[display("{_0}")]
    #[from]
    Slot(SlotError),
}
