use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::direction::{Direction, Sweep};
use crate::error::CoreError;

/// Result of one [`Board::push`].
///
/// # Example
/// ```
/// use t48_core::board::PushOutcome;
/// let o = PushOutcome::default();
/// assert!(!o.changed);
/// assert_eq!(o.score_delta, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushOutcome {
    /// Sum of `2^k` over every merge of the push, `k` being the new exponent.
    pub score_delta: u64,
    /// `true` if at least one tile slid or merged.
    pub changed: bool,
}

/// Displayed value of a tile exponent (`0` for an empty cell).
///
/// Saturates at `u64::MAX` for exponents past 63.
///
/// # Example
/// ```
/// use t48_core::board::tile_value;
/// assert_eq!(tile_value(0), 0);
/// assert_eq!(tile_value(11), 2048);
/// ```
#[inline]
#[must_use]
pub fn tile_value(exponent: u8) -> u64 {
    if exponent == 0 {
        return 0;
    }
    1u64.checked_shl(u32::from(exponent)).unwrap_or(u64::MAX)
}

/// Grille de jeu : exposants des tuiles, row-major, 0 = case vide.
///
/// Owns the cell storage, the per-push merge mask and its own RNG. The
/// cached `empty_count` always equals the number of zero cells.
///
/// # Example
/// ```
/// use t48_core::board::Board;
/// use t48_core::direction::Direction;
///
/// let mut board = Board::from_tiles(4, 1, vec![1, 0, 1, 0], 0).unwrap();
/// let outcome = board.push(Direction::Left);
/// assert_eq!(board.tiles(), &[2, 0, 0, 0]);
/// assert_eq!(outcome.score_delta, 4);
/// ```
pub struct Board {
    width: usize,
    height: usize,
    /// Exposants, row-major.
    tiles: Vec<u8>,
    /// Cases fusionnées lors du dernier push ayant modifié la grille.
    merged: Vec<bool>,
    /// Scratch reused by every push, swapped into `merged` on change.
    merge_scratch: Vec<bool>,
    empty_count: usize,
    latest_tile: Option<usize>,
    /// One traversal per direction, indexed by `Direction::index`.
    sweeps: [Sweep; 4],
    rng: StdRng,
}

impl Board {
    /// Crée une grille vide puis place une première tuile aléatoire.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if `width` or `height` is zero.
    ///
    /// # Example
    /// ```
    /// use t48_core::board::Board;
    /// let board = Board::new(4, 4).unwrap();
    /// assert_eq!(board.empty_count(), 15);
    /// assert!(Board::new(0, 4).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        Self::spawned(width, height, StdRng::from_entropy())
    }

    /// Like [`Board::new`] with a seeded RNG, for reproducible games.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if `width` or `height` is zero.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, CoreError> {
        Self::spawned(width, height, StdRng::seed_from_u64(seed))
    }

    /// Builds a board from an explicit exponent layout. No tile is spawned.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` on a zero dimension and
    /// `CoreError::TileCount` if `tiles.len() != width * height`.
    ///
    /// # Example
    /// ```
    /// use t48_core::board::Board;
    /// let board = Board::from_tiles(2, 2, vec![1, 0, 0, 3], 7).unwrap();
    /// assert_eq!(board.empty_count(), 2);
    /// assert_eq!(board.latest_tile(), None);
    /// ```
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<u8>,
        seed: u64,
    ) -> Result<Self, CoreError> {
        let mut board = Self::empty(width, height, StdRng::seed_from_u64(seed))?;
        if tiles.len() != board.tiles.len() {
            return Err(CoreError::TileCount {
                expected: board.tiles.len(),
                actual: tiles.len(),
            });
        }
        board.empty_count = tiles.iter().filter(|&&t| t == 0).count();
        board.tiles = tiles;
        Ok(board)
    }

    fn spawned(width: usize, height: usize, rng: StdRng) -> Result<Self, CoreError> {
        let mut board = Self::empty(width, height, rng)?;
        board.spawn_random_tile();
        log::debug!("Nouvelle grille {width}×{height}");
        Ok(board)
    }

    fn empty(width: usize, height: usize, rng: StdRng) -> Result<Self, CoreError> {
        let size = width
            .checked_mul(height)
            .filter(|&s| s > 0)
            .ok_or(CoreError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            tiles: vec![0; size],
            merged: vec![false; size],
            merge_scratch: vec![false; size],
            empty_count: size,
            latest_tile: None,
            sweeps: Direction::ALL.map(|d| d.sweep(width, height)),
            rng,
        })
    }

    /// Place un 2 (90 %) ou un 4 (10 %) sur une case vide tirée uniformément.
    ///
    /// Returns `false` and leaves the grid untouched when it is full.
    pub fn spawn_random_tile(&mut self) -> bool {
        if self.empty_count == 0 {
            return false;
        }
        let nth = self.rng.gen_range(0..self.empty_count);
        let exponent = if self.rng.gen_range(0..10) < 9 { 1 } else { 2 };
        let Some(index) = self
            .tiles
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| (t == 0).then_some(i))
            .nth(nth)
        else {
            return false;
        };
        self.tiles[index] = exponent;
        self.empty_count -= 1;
        self.latest_tile = Some(index);
        true
    }

    /// Slides and merges every line toward the edge named by `direction`.
    ///
    /// Each cell absorbs at most one merge per push. The merge mask is
    /// rewritten only when the board changed. Does not spawn a tile.
    pub fn push(&mut self, direction: Direction) -> PushOutcome {
        let sweep = self.sweeps[direction.index()];
        self.merge_scratch.fill(false);

        let mut outcome = PushOutcome::default();
        for line in 0..sweep.major_len {
            self.push_line(&sweep, line, &mut outcome);
        }

        if outcome.changed {
            std::mem::swap(&mut self.merged, &mut self.merge_scratch);
        }
        outcome
    }

    /// Two-pointer sweep of one line: `gravity` is the furthest settled
    /// position, `search` scans ahead of it.
    fn push_line(&mut self, sweep: &Sweep, line: usize, outcome: &mut PushOutcome) {
        let mut gravity = 0;
        for search in 1..sweep.minor_len {
            let s = sweep.index(line, search);
            let searched = self.tiles[s];
            if searched == 0 {
                continue;
            }

            let g = sweep.index(line, gravity);
            let resting = self.tiles[g];
            if resting == 0 {
                self.tiles[g] = searched;
                self.tiles[s] = 0;
            } else if resting == searched {
                let exponent = resting + 1;
                self.tiles[g] = exponent;
                self.tiles[s] = 0;
                self.empty_count += 1;
                self.merge_scratch[g] = true;
                outcome.score_delta = outcome.score_delta.saturating_add(tile_value(exponent));
                gravity += 1;
            } else if gravity + 1 != search {
                let next = sweep.index(line, gravity + 1);
                self.tiles[next] = searched;
                self.tiles[s] = 0;
                gravity += 1;
            } else {
                gravity += 1;
                continue;
            }
            outcome.changed = true;
        }
    }

    /// `true` if the grid is full and no two adjacent cells hold the same exponent.
    ///
    /// # Example
    /// ```
    /// use t48_core::board::Board;
    /// let full = Board::from_tiles(2, 2, vec![1, 2, 2, 1], 0).unwrap();
    /// assert!(full.dead());
    /// ```
    #[must_use]
    pub fn dead(&self) -> bool {
        if self.empty_count > 0 {
            return false;
        }
        let w = self.width;
        let horizontal = self
            .tiles
            .chunks_exact(w)
            .any(|row| row.windows(2).any(|pair| pair[0] == pair[1]));
        if horizontal {
            return false;
        }
        let vertical = self
            .tiles
            .iter()
            .zip(&self.tiles[w..])
            .any(|(above, below)| above == below);
        !vertical
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: a board has at least one cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All exponents, row-major.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Exponent at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn tile(&self, x: usize, y: usize) -> u8 {
        self.tiles[y * self.width + x]
    }

    /// Exponent at linear `index`.
    #[inline(always)]
    #[must_use]
    pub fn exponent(&self, index: usize) -> u8 {
        self.tiles[index]
    }

    /// `true` if the cell merged during the last push that changed the board.
    #[inline(always)]
    #[must_use]
    pub fn is_merged(&self, index: usize) -> bool {
        self.merged[index]
    }

    /// Merge mask of the last changing push, row-major.
    #[inline]
    #[must_use]
    pub fn merged(&self) -> &[bool] {
        &self.merged
    }

    /// Number of empty cells.
    #[inline]
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    /// Index of the most recently spawned tile, `None` before any spawn.
    #[inline]
    #[must_use]
    pub fn latest_tile(&self) -> Option<usize> {
        self.latest_tile
    }

    /// Largest exponent on the board (0 if empty).
    #[must_use]
    pub fn highest_exponent(&self) -> u8 {
        self.tiles.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = tile_value(self.highest_exponent()).to_string().len();
        for (y, row) in self.tiles.chunks_exact(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, &t) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                if t == 0 {
                    write!(f, "{:>cell_width$}", ".")?;
                } else {
                    write!(f, "{:>cell_width$}", tile_value(t))?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tiles", &self.tiles)
            .field("empty_count", &self.empty_count)
            .field("latest_tile", &self.latest_tile)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize, tiles: &[u8]) -> Board {
        Board::from_tiles(width, height, tiles.to_vec(), 42).unwrap()
    }

    fn zeros(board: &Board) -> usize {
        board.tiles().iter().filter(|&&t| t == 0).count()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Board::new(0, 4).unwrap_err(),
            CoreError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert!(Board::new(4, 0).is_err());
        assert!(Board::from_tiles(0, 0, Vec::new(), 0).is_err());
    }

    #[test]
    fn layout_length_must_match() {
        assert_eq!(
            Board::from_tiles(2, 2, vec![0; 3], 0).unwrap_err(),
            CoreError::TileCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn construction_spawns_one_tile() {
        let b = Board::with_seed(4, 4, 3).unwrap();
        assert_eq!(b.empty_count(), 15);
        assert_eq!(zeros(&b), 15);
        let idx = b.latest_tile().unwrap();
        assert!(matches!(b.exponent(idx), 1 | 2));
    }

    #[test]
    fn one_by_one_board_is_dead_after_spawn() {
        let b = Board::with_seed(1, 1, 0).unwrap();
        assert_eq!(b.empty_count(), 0);
        assert!(b.dead());
    }

    #[test]
    fn equal_run_merges_pairwise() {
        let mut b = board(4, 1, &[1, 1, 1, 1]);
        let o = b.push(Direction::Left);
        assert_eq!(b.tiles(), &[2, 2, 0, 0]);
        assert_eq!(
            o,
            PushOutcome {
                score_delta: 8,
                changed: true
            }
        );
        assert_eq!(b.empty_count(), 2);
    }

    #[test]
    fn separated_pair_slides_and_merges_once() {
        let mut b = board(4, 1, &[1, 0, 1, 0]);
        let o = b.push(Direction::Left);
        assert_eq!(b.tiles(), &[2, 0, 0, 0]);
        assert_eq!(o.score_delta, 4);
        assert!(o.changed);
    }

    #[test]
    fn compacted_line_without_pairs_is_unchanged() {
        let mut b = board(4, 1, &[1, 2, 1, 0]);
        for _ in 0..3 {
            let o = b.push(Direction::Left);
            assert_eq!(o, PushOutcome::default());
            assert_eq!(b.tiles(), &[1, 2, 1, 0]);
        }
    }

    #[test]
    fn empty_board_never_changes() {
        let mut b = board(3, 3, &[0; 9]);
        for dir in Direction::ALL {
            assert_eq!(b.push(dir), PushOutcome::default(), "direction {dir}");
        }
    }

    #[test]
    fn merged_cell_does_not_absorb_a_second_merge() {
        // The new 4 must not swallow the 4 sliding in behind it.
        let mut b = board(4, 1, &[1, 1, 2, 0]);
        let o = b.push(Direction::Left);
        assert_eq!(b.tiles(), &[2, 2, 0, 0]);
        assert_eq!(o.score_delta, 4);
    }

    #[test]
    fn gap_after_different_tile_is_closed() {
        let mut b = board(4, 1, &[2, 0, 1, 0]);
        let o = b.push(Direction::Left);
        assert_eq!(b.tiles(), &[2, 1, 0, 0]);
        assert_eq!(o.score_delta, 0);
        assert!(o.changed);
    }

    #[test]
    fn right_mirrors_left() {
        let mut b = board(4, 1, &[1, 1, 1, 1]);
        let o = b.push(Direction::Right);
        assert_eq!(b.tiles(), &[0, 0, 2, 2]);
        assert_eq!(o.score_delta, 8);

        let mut b = board(4, 1, &[0, 3, 0, 2]);
        b.push(Direction::Right);
        assert_eq!(b.tiles(), &[0, 0, 3, 2]);
    }

    #[test]
    fn columns_push_up_and_down() {
        let mut b = board(1, 4, &[1, 0, 1, 2]);
        let o = b.push(Direction::Up);
        assert_eq!(b.tiles(), &[2, 2, 0, 0]);
        assert_eq!(o.score_delta, 4);

        let mut b = board(1, 4, &[1, 0, 1, 2]);
        let o = b.push(Direction::Down);
        assert_eq!(b.tiles(), &[0, 0, 2, 2]);
        assert_eq!(o.score_delta, 4);
    }

    #[test]
    fn lines_are_independent() {
        // 3×2:
        // 1 1 0
        // 0 2 2
        let mut b = board(3, 2, &[1, 1, 0, 0, 2, 2]);
        let o = b.push(Direction::Left);
        assert_eq!(b.tiles(), &[2, 0, 0, 3, 0, 0]);
        assert_eq!(o.score_delta, 4 + 8);
        assert_eq!(b.empty_count(), 4);
    }

    #[test]
    fn merge_mask_tracks_last_changing_push() {
        let mut b = board(4, 1, &[1, 1, 0, 0]);
        b.push(Direction::Left);
        assert_eq!(b.merged(), &[true, false, false, false]);

        // No-op push keeps the previous mask.
        assert!(!b.push(Direction::Left).changed);
        assert!(b.is_merged(0));

        // A changing push without merges clears it.
        assert!(b.push(Direction::Right).changed);
        assert_eq!(b.merged(), &[false; 4]);
    }

    #[test]
    fn tile_reads_column_and_row() {
        let b = board(3, 2, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(b.tile(0, 0), 1);
        assert_eq!(b.tile(2, 0), 3);
        assert_eq!(b.tile(0, 1), 4);
        assert_eq!(b.tile(2, 1), b.exponent(5));
    }

    #[test]
    fn spawn_on_full_board_is_a_noop() {
        let mut b = board(2, 2, &[1, 2, 3, 4]);
        assert!(!b.spawn_random_tile());
        assert_eq!(b.tiles(), &[1, 2, 3, 4]);
        assert_eq!(b.latest_tile(), None);
    }

    #[test]
    fn spawn_fills_only_empty_cells() {
        let mut b = board(3, 1, &[5, 0, 5]);
        assert!(b.spawn_random_tile());
        assert_eq!(b.latest_tile(), Some(1));
        assert!(matches!(b.exponent(1), 1 | 2));
        assert_eq!(b.empty_count(), 0);
    }

    #[test]
    fn spawn_picks_each_empty_cell_equally() {
        let mut counts = [0usize; 5];
        for seed in 0..8_000 {
            let mut b = Board::from_tiles(5, 1, vec![0, 3, 0, 0, 0], seed).unwrap();
            assert!(b.spawn_random_tile());
            let cell = b.latest_tile().unwrap();
            assert_ne!(cell, 1, "seed {seed}");
            counts[cell] += 1;
        }
        assert_eq!(counts[1], 0);
        for (cell, &n) in counts.iter().enumerate().filter(|&(i, _)| i != 1) {
            assert!((1_800..2_200).contains(&n), "cellule {cell} : {n} tirages");
        }
    }

    #[test]
    fn spawn_yields_four_about_one_time_in_ten() {
        let mut b = board(100, 100, &[0; 10_000]);
        for _ in 0..5_000 {
            assert!(b.spawn_random_tile());
        }
        let fours = b.tiles().iter().filter(|&&t| t == 2).count();
        let twos = b.tiles().iter().filter(|&&t| t == 1).count();
        assert_eq!(fours + twos, 5_000);
        let ratio = fours as f64 / 5_000.0;
        assert!((0.07..0.13).contains(&ratio), "ratio de 4 : {ratio}");
    }

    #[test]
    fn empty_count_stays_consistent() {
        let mut b = Board::with_seed(5, 4, 11).unwrap();
        for step in 0..400 {
            let dir = Direction::ALL[step % 4];
            if b.push(dir).changed {
                b.spawn_random_tile();
            }
            assert_eq!(b.empty_count(), zeros(&b), "step {step}\n{b}");
            if b.dead() {
                break;
            }
        }
    }

    #[test]
    fn dead_requires_full_board_without_pairs() {
        assert!(board(2, 2, &[1, 2, 2, 1]).dead());
        assert!(!board(2, 2, &[1, 1, 2, 3]).dead());
        assert!(!board(2, 2, &[1, 2, 1, 3]).dead());
        assert!(!board(2, 2, &[1, 2, 0, 3]).dead());
        assert!(board(3, 1, &[1, 2, 1]).dead());
    }

    #[test]
    fn display_right_aligns_values() {
        let b = board(2, 2, &[1, 2, 0, 4]);
        assert_eq!(b.to_string(), " 2  4\n . 16");
    }
}
