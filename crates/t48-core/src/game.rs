use crate::board::Board;
use crate::direction::Direction;
use crate::error::CoreError;

/// Partie en cours : une grille et le score cumulé.
///
/// # Example
/// ```
/// use t48_core::game::Game;
/// use t48_core::direction::Direction;
///
/// let mut game = Game::with_seed(4, 4, 1).unwrap();
/// let before = game.current_score();
/// game.swipe(Direction::Left);
/// assert!(game.current_score() >= before);
/// ```
#[derive(Debug)]
pub struct Game {
    board: Board,
    score: u64,
    moves: u64,
}

impl Game {
    /// Starts a game on a fresh `width × height` board.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        Ok(Self::from_board(Board::new(width, height)?))
    }

    /// Like [`Game::new`] with a seeded board RNG.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if `width` or `height` is zero.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, CoreError> {
        Ok(Self::from_board(Board::with_seed(width, height, seed)?))
    }

    /// Wraps an existing board with a zero score.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            score: 0,
            moves: 0,
        }
    }

    /// Pushes the board, adds the merge score, and spawns a tile if anything moved.
    ///
    /// Returns `false` when the push changed nothing; no tile is spawned then.
    pub fn swipe(&mut self, direction: Direction) -> bool {
        let outcome = self.board.push(direction);
        self.score = self.score.saturating_add(outcome.score_delta);
        if !outcome.changed {
            return false;
        }
        self.board.spawn_random_tile();
        self.moves += 1;
        log::debug!(
            "swipe {direction} : +{} (score {})\n{}",
            outcome.score_delta,
            self.score,
            self.board
        );
        true
    }

    /// `true` once no move can change the board.
    #[must_use]
    pub fn over(&self) -> bool {
        self.board.dead()
    }

    /// Sum of every merge score since the game started.
    #[must_use]
    pub fn current_score(&self) -> u64 {
        self.score
    }

    /// Number of swipes that changed the board.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_game_is_rejected() {
        assert!(Game::new(0, 3).is_err());
    }

    #[test]
    fn changing_swipe_spawns_and_scores() {
        let board = Board::from_tiles(4, 1, vec![1, 1, 0, 0], 5).unwrap();
        let mut game = Game::from_board(board);
        assert!(game.swipe(Direction::Left));
        assert_eq!(game.current_score(), 4);
        assert_eq!(game.moves(), 1);
        // 2 from the merge, one spawned tile.
        assert_eq!(game.board().empty_count(), 2);
        assert_eq!(game.board().exponent(0), 2);
        assert!(game.board().latest_tile().is_some_and(|i| i != 0));
    }

    #[test]
    fn noop_swipe_does_not_spawn() {
        let board = Board::from_tiles(4, 1, vec![1, 2, 0, 0], 5).unwrap();
        let mut game = Game::from_board(board);
        assert!(!game.swipe(Direction::Left));
        assert_eq!(game.board().tiles(), &[1, 2, 0, 0]);
        assert_eq!(game.board().latest_tile(), None);
        assert_eq!(game.current_score(), 0);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn score_is_sum_of_push_deltas() {
        let mut game = Game::with_seed(4, 4, 99).unwrap();
        let mut mirror = Board::with_seed(4, 4, 99).unwrap();
        let mut expected = 0;
        for step in 0..300 {
            if game.over() {
                break;
            }
            let dir = Direction::ALL[(step * 7 + step / 3) % 4];
            let outcome = mirror.push(dir);
            expected += outcome.score_delta;
            if outcome.changed {
                mirror.spawn_random_tile();
            }
            assert_eq!(game.swipe(dir), outcome.changed);
            assert_eq!(game.current_score(), expected);
            assert_eq!(game.board().tiles(), mirror.tiles());
        }
    }

    #[test]
    fn over_delegates_to_board() {
        let dead = Board::from_tiles(2, 2, vec![1, 2, 2, 1], 0).unwrap();
        assert!(Game::from_board(dead).over());
        let alive = Board::from_tiles(2, 2, vec![1, 1, 2, 3], 0).unwrap();
        assert!(!Game::from_board(alive).over());
    }
}
