use serde::Serialize;

/// Largest number of rows a single tetromino can complete at once.
const MAX_ROWS_PER_LOCK: usize = 4;

/// Session statistics: score, locked pieces, and cleared rows.
///
/// Scoring is linear: every cleared row is worth the same number of points, with
/// no bonus for clearing several rows at once.
///
/// # Example
///
/// ```
/// use quadris_engine::GameStats;
///
/// let mut stats = GameStats::new(10);
/// stats.complete_piece_lock(0);
/// stats.complete_piece_lock(2);
///
/// assert_eq!(stats.score(), 20);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.row_clear_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    points_per_row: usize,
    score: usize,
    completed_pieces: usize,
    total_cleared_rows: usize,
    row_clear_counter: [usize; MAX_ROWS_PER_LOCK + 1],
}

impl GameStats {
    #[must_use]
    pub const fn new(points_per_row: usize) -> Self {
        Self {
            points_per_row,
            score: 0,
            completed_pieces: 0,
            total_cleared_rows: 0,
            row_clear_counter: [0; MAX_ROWS_PER_LOCK + 1],
        }
    }

    /// Returns the current score. Never decreases.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` rows.
    #[must_use]
    pub const fn row_clear_counter(&self) -> &[usize; MAX_ROWS_PER_LOCK + 1] {
        &self.row_clear_counter
    }

    /// Records a lock-in that cleared `cleared_rows` rows.
    pub fn complete_piece_lock(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        if let Some(count) = self.row_clear_counter.get_mut(cleared_rows) {
            *count += 1;
        }
        self.score = self
            .score
            .saturating_add(cleared_rows.saturating_mul(self.points_per_row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let stats = GameStats::new(10);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.total_cleared_rows(), 0);
        assert_eq!(stats.row_clear_counter(), &[0; 5]);
    }

    #[test]
    fn test_score_is_linear() {
        let mut stats = GameStats::new(10);
        stats.complete_piece_lock(1);
        assert_eq!(stats.score(), 10);
        stats.complete_piece_lock(4);
        assert_eq!(stats.score(), 50);
        stats.complete_piece_lock(0);
        assert_eq!(stats.score(), 50);

        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_rows(), 5);
        assert_eq!(stats.row_clear_counter(), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_custom_points() {
        let mut stats = GameStats::new(100);
        stats.complete_piece_lock(3);
        assert_eq!(stats.score(), 300);
    }
}
