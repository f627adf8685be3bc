/// Score credited for committing a shape to the board.
const SHAPE_PLACED_SCORE: usize = 10;
/// Score credited per cleared line; a full row and a full column each count
/// as one line even when they share a cell.
const LINE_CLEARED_SCORE: usize = 50;

/// Counters for a running game.
///
/// Tracks the score, the number of committed placements, and the total
/// number of lines cleared. The score never decreases within a session; all
/// counters restart at zero on reset.
///
/// # Example
///
/// ```
/// use oxiblast_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(2); // placement clearing a row and a column
///
/// assert_eq!(stats.score(), 110);
/// assert_eq!(stats.placed_shapes(), 1);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    placed_shapes: usize,
    total_cleared_lines: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placed_shapes: 0,
            total_cleared_lines: 0,
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of shapes committed to the board.
    #[must_use]
    pub const fn placed_shapes(&self) -> usize {
        self.placed_shapes
    }

    /// Returns the total number of lines cleared across all placements.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Updates counters after a committed placement.
    ///
    /// The placement score is credited before the line-clear score.
    pub const fn complete_placement(&mut self, cleared_lines: usize) {
        self.placed_shapes += 1;
        self.score += SHAPE_PLACED_SCORE;
        self.total_cleared_lines += cleared_lines;
        self.score += cleared_lines * LINE_CLEARED_SCORE;
    }
}
