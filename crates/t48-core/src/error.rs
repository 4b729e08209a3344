use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A board needs at least one column and one row.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: usize,
        /// Height value.
        height: usize,
    },

    /// Tile layout length does not match `width × height`.
    #[error("Nombre de cases incorrect : attendu {expected}, reçu {actual}")]
    TileCount {
        /// `width × height`.
        expected: usize,
        /// Length of the provided layout.
        actual: usize,
    },
}
