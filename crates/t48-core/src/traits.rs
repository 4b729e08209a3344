use crate::direction::Direction;

/// Fournit la prochaine direction à jouer.
///
/// Implémenté par : `RandomMoves` (autoplay). Le clavier passe par la
/// boucle d'événements de l'app.
///
/// # Example
/// ```
/// use t48_core::traits::DirectionSource;
/// use t48_core::direction::Direction;
///
/// struct AlwaysLeft;
/// impl DirectionSource for AlwaysLeft {
///     fn next_direction(&mut self) -> Direction { Direction::Left }
/// }
/// assert_eq!(AlwaysLeft.next_direction(), Direction::Left);
/// ```
pub trait DirectionSource {
    /// Direction suivante. Ne bloque pas.
    fn next_direction(&mut self) -> Direction;
}
