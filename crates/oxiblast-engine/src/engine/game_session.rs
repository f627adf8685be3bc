use crate::{
    PlaceError,
    core::{board::Board, shape::Shape},
};

use super::{
    GameStats,
    shape_drawer::{CatalogueDrawer, DrawSeed, ShapeDrawer},
    tray::Tray,
};

/// Lifecycle of a game session.
///
/// `GameOver` is terminal: the only way back to `Active` is
/// [`GameSession::reset`] or constructing a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Active,
    GameOver,
}

/// Outcome of a placement attempt.
///
/// `Rejected` is a normal, frequent outcome meaning "this anchor does not
/// work"; interactive layers lean on it continuously for previews and
/// highlighting. It carries no error semantics and must not be logged as a
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Placement {
    /// The shape was committed; `score` is the post-commit session total.
    Committed { score: usize, cleared_lines: usize },
    /// The shape does not fit at the requested anchor; nothing changed.
    Rejected,
}

/// A full game: board, tray, draw source, score, and lifecycle state.
///
/// The session is the sole owner and mutator of its board and tray; every
/// state change goes through [`Self::try_place`] or [`Self::reset`].
/// Operations are synchronous value-returning calls with no background
/// work, so hosting many independent sessions needs no coordination beyond
/// one lock (or actor) per session.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{GameSession, Placement};
///
/// let mut session = GameSession::new();
/// match session.try_place(0, 0, 0) {
///     Ok(Placement::Committed { score, .. }) => assert!(score >= 10),
///     Ok(Placement::Rejected) => {} // try another anchor
///     Err(err) => panic!("input layer bug: {err}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<D = CatalogueDrawer> {
    board: Board,
    tray: Tray,
    drawer: D,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    /// Creates a session with an OS-seeded catalogue drawer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_drawer(CatalogueDrawer::new())
    }

    /// Like [`Self::new`], but seeded for a reproducible game.
    #[must_use]
    pub fn with_seed(seed: DrawSeed) -> Self {
        Self::with_drawer(CatalogueDrawer::with_seed(seed))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ShapeDrawer> GameSession<D> {
    /// Creates a session with an empty board, drawing the opening tray from
    /// `drawer`.
    #[must_use]
    pub fn with_drawer(mut drawer: D) -> Self {
        let tray = Tray::new(drawer.draw_three());
        Self::from_parts(Board::EMPTY, tray, drawer)
    }

    /// Assembles a session from an explicit board and tray.
    ///
    /// The terminal evaluation runs immediately: a position where no held
    /// shape has a legal anchor starts in [`SessionState::GameOver`].
    #[must_use]
    pub fn from_parts(board: Board, tray: Tray, drawer: D) -> Self {
        let mut this = Self {
            board,
            tray,
            drawer,
            stats: GameStats::new(),
            session_state: SessionState::Active,
        };
        this.update_session_state();
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Attempts to place the shape held in tray slot `slot` with its mask's
    /// top-left corner anchored at board cell `(x, y)`.
    ///
    /// On success the shape is committed, the slot emptied, the placement
    /// and line-clear scores credited (in that order), full rows and columns
    /// swept, the tray refilled if it just became fully empty, and the
    /// terminal evaluation run against the resulting tray.
    ///
    /// # Errors
    ///
    /// [`PlaceError::GameOver`] when the session is over and
    /// [`PlaceError::Slot`] for a bad or empty slot index; both are caller
    /// contract violations. An anchor that merely does not fit yields
    /// `Ok(Placement::Rejected)` and leaves board, tray, and score
    /// untouched.
    pub fn try_place(&mut self, slot: usize, x: usize, y: usize) -> Result<Placement, PlaceError> {
        if self.session_state.is_game_over() {
            return Err(PlaceError::GameOver);
        }
        let shape = self.tray.peek_slot(slot)?;
        if !self.board.can_place(shape, x, y) {
            return Ok(Placement::Rejected);
        }

        let shape = self.tray.take_from_slot(slot)?;
        self.board.fill_shape(shape, x, y);
        let cleared_lines = self.board.sweep_full_lines();
        self.stats.complete_placement(cleared_lines);
        if self.tray.is_fully_empty() {
            self.tray.refill(self.drawer.draw_three());
        }
        self.update_session_state();

        Ok(Placement::Committed {
            score: self.stats.score(),
            cleared_lines,
        })
    }

    /// Starts a fresh game in place: empty board, zeroed counters, and a new
    /// tray batch drawn from the same drawer.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.tray.refill(self.drawer.draw_three());
        self.session_state = SessionState::Active;
        self.update_session_state();
    }

    /// Flips to `GameOver` when no held shape has a legal anchor anywhere.
    fn update_session_state(&mut self) {
        let any_move = self
            .tray
            .occupied_slots()
            .any(|(_, shape)| self.board.can_place_anywhere(shape));
        if !any_move {
            self.session_state = SessionState::GameOver;
        }
    }
}
