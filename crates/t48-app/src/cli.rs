use std::path::PathBuf;

use clap::Parser;
use t48_core::config::GameConfig;

/// tile2048 — sliding-tile merge game in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Taille de grille : largeur puis hauteur, chacune ramenée dans [1, 100].
    #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub size: Option<Vec<usize>>,

    /// Autoplay : coups aléatoires.
    #[arg(short, long, default_value_t = false)]
    pub random: bool,

    /// Délai entre deux coups d'autoplay en ms, ramené dans [0, 1000].
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Désactiver la couleur.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Command-line values that take precedence over the config file.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            size: self
                .size
                .as_deref()
                .and_then(|s| match s {
                    [w, h] => Some((*w, *h)),
                    _ => None,
                }),
            autoplay: self.random,
            delay_ms: self.delay,
            no_color: self.no_color,
        }
    }
}

/// Overrides CLI, réappliqués à chaque rechargement de la config.
///
/// # Example
/// ```
/// use t48_app::cli::Overrides;
/// use t48_core::config::GameConfig;
///
/// let mut config = GameConfig::default();
/// Overrides { size: Some((0, 300)), ..Overrides::default() }.apply(&mut config);
/// assert_eq!((config.width, config.height), (1, 100));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--size W H`.
    pub size: Option<(usize, usize)>,
    /// `--random`; only ever turns autoplay on.
    pub autoplay: bool,
    /// `--delay MS`.
    pub delay_ms: Option<u64>,
    /// `--no-color`.
    pub no_color: bool,
}

impl Overrides {
    /// Writes the overrides into `config`, then clamps it.
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some((w, h)) = self.size {
            config.width = w;
            config.height = h;
        }
        if self.autoplay {
            config.autoplay = true;
        }
        if let Some(d) = self.delay_ms {
            config.delay_ms = d;
        }
        if self.no_color {
            config.color_enabled = false;
        }
        config.clamp_all();
    }
}
