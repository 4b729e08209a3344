/// TUI rendering module for tile2048.
///
/// Provides the tile palette, the board canvas and the full-screen layout.
pub mod canvas;
pub mod palette;
pub mod ui;
