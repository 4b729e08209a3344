/// Terminal shell for tile2048: CLI, input, config hot-reload and the game loop.
pub mod app;
pub mod cancel;
pub mod cli;
pub mod hotreload;
pub mod input;
