use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use clap::Parser;
use t48_app::app::App;
use t48_app::cancel::{self, CancelToken};
use t48_app::cli::Cli;
use t48_app::hotreload;
use t48_core::config::GameConfig;
use t48_core::game::Game;
use t48_core::random::RandomMoves;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let overrides = cli.overrides();
    let mut config = resolve_config(&cli)?;
    overrides.apply(&mut config);
    log::info!(
        "Grille {}×{}, autoplay {}, délai {} ms",
        config.width,
        config.height,
        config.autoplay,
        config.delay_ms
    );

    let config = Arc::new(ArcSwap::from_pointee(config));

    // 4. Hot-reload (seulement si le fichier existe)
    let _watcher = if cli.config.exists() {
        match hotreload::spawn_config_watcher(&cli.config, &config, overrides) {
            Ok(w) => Some(w),
            Err(e) => {
                log::warn!("Hot-reload indisponible : {e}");
                None
            }
        }
    } else {
        None
    };

    // 5. Ctrl-C → jeton d'arrêt
    let cancel = CancelToken::new();
    cancel::install_interrupt_handler(&cancel)?;

    // 6. Construire la partie
    let (width, height) = {
        let c = config.load();
        (c.width, c.height)
    };
    let game = Game::new(width, height)?;
    let mut app = App::new(game, config, cancel, Box::new(RandomMoves::new()));

    // 7. Boucle principale
    let terminal = ratatui::init();
    let result = app.run(terminal);

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    println!("\tScore: {}", app.game.current_score());
    if let Some(message) = app.final_message() {
        println!("\t{message}");
    }

    result
}

/// Resolve config: --config file if present, defaults otherwise.
fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    if cli.config.exists() {
        t48_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(GameConfig::default())
    }
}
