use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use t48_core::config::GameConfig;

use crate::cli::Overrides;

/// Lance un thread qui surveille le fichier config et met à jour l'ArcSwap.
///
/// Retourne le Watcher (doit rester vivant tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use arc_swap::ArcSwap;
/// use t48_core::config::GameConfig;
/// use t48_app::cli::Overrides;
/// use t48_app::hotreload::spawn_config_watcher;
/// use std::path::Path;
///
/// let config = Arc::new(ArcSwap::from_pointee(GameConfig::default()));
/// let _watcher = spawn_config_watcher(Path::new("config/default.toml"), &config, Overrides::default());
/// ```
pub fn spawn_config_watcher(
    config_path: &Path,
    config: &Arc<ArcSwap<GameConfig>>,
    overrides: Overrides,
) -> Result<impl Watcher + use<>> {
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_))
        {
            match t48_core::config::load_config(&path) {
                Ok(fresh) => {
                    let merged = merge_reload(&config.load(), fresh, &overrides);
                    config.store(Arc::new(merged));
                    log::info!("Config rechargée depuis {}", path.display());
                }
                Err(e) => {
                    log::warn!("Erreur de rechargement config : {e:#}");
                    // On garde l'ancienne config. Pas de panic.
                }
            }
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Combine une config rechargée avec la config courante.
///
/// Display settings and the autoplay delay come from `fresh` (CLI overrides
/// still win); board size and autoplay mode stay as they were at start-up.
#[must_use]
pub fn merge_reload(current: &GameConfig, mut fresh: GameConfig, overrides: &Overrides) -> GameConfig {
    overrides.apply(&mut fresh);
    if (fresh.width, fresh.height) != (current.width, current.height) {
        log::warn!(
            "Taille de grille {}×{} ignorée jusqu'au redémarrage",
            fresh.width,
            fresh.height
        );
    }
    fresh.width = current.width;
    fresh.height = current.height;
    fresh.autoplay = current.autoplay;
    fresh
}
