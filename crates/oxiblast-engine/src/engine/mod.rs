//! Game engine logic and state management.
//!
//! This module provides the high-level game logic that orchestrates the core
//! data structures into a playable session:
//!
//! - [`GameSession`] - Full game state (board, tray, score, lifecycle)
//! - [`Tray`] - The three-slot holding area for shapes awaiting placement
//! - [`ShapeDrawer`] / [`CatalogueDrawer`] - Injectable source of tray refills
//! - [`DrawSeed`] - Seed for deterministic shape draws
//! - [`GameStats`] - Score and placement counters
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the tray starts with three drawn shapes
//! 2. The input layer picks a tray slot and a board anchor and calls
//!    [`GameSession::try_place`]
//! 3. A committed placement scores, sweeps full rows and columns, and
//!    refills the tray once all three slots have been emptied
//! 4. When no held shape fits anywhere, the session ends
//!
//! # Example
//!
//! ```
//! use oxiblast_engine::GameSession;
//!
//! let mut session = GameSession::new();
//!
//! // Every catalogue shape fits at (3, 3) on an empty board.
//! let placement = session.try_place(0, 3, 3).unwrap();
//! assert!(placement.is_committed());
//! assert_eq!(session.stats().placed_shapes(), 1);
//! ```

pub use self::{game_session::*, game_stats::*, shape_drawer::*, tray::*};

mod game_session;
mod game_stats;
mod shape_drawer;
mod tray;
