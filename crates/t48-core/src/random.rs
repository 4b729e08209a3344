use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::direction::Direction;
use crate::traits::DirectionSource;

/// Générateur de coups aléatoires pour l'autoplay.
///
/// Each of the four directions is drawn with equal probability.
///
/// # Example
/// ```
/// use t48_core::random::RandomMoves;
/// use t48_core::traits::DirectionSource;
///
/// let mut moves = RandomMoves::with_seed(3);
/// let _ = moves.next_direction();
/// ```
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    /// Seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoves {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionSource for RandomMoves {
    fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }
}
