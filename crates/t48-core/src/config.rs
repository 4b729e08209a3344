use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Plus petite dimension de grille acceptée.
pub const MIN_BOARD_SIZE: usize = 1;
/// Plus grande dimension de grille acceptée.
pub const MAX_BOARD_SIZE: usize = 100;
/// Délai maximal entre deux coups en autoplay (ms).
pub const MAX_DELAY_MS: u64 = 1000;

/// Configuration complète du jeu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
/// The display fields and `delay_ms` are hot-reloadable; the board size
/// is only read at start-up.
///
/// # Example
/// ```
/// use t48_core::config::GameConfig;
/// let config = GameConfig::default();
/// assert_eq!((config.width, config.height), (4, 4));
/// assert_eq!(config.delay_ms, 100);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GameConfig {
    // === Grille ===
    /// Columns [1, 100].
    pub width: usize,
    /// Rows [1, 100].
    pub height: usize,

    // === Autoplay ===
    /// Jouer des coups aléatoires au lieu de lire le clavier.
    pub autoplay: bool,
    /// Pause entre deux coups d'autoplay, en ms [0, 1000].
    pub delay_ms: u64,

    // === Affichage ===
    /// Fond coloré par valeur de tuile.
    pub color_enabled: bool,
    /// Souligner la dernière tuile apparue.
    pub highlight_latest: bool,
    /// Coins ┌┐└┘ sur les tuiles fusionnées au dernier coup.
    pub highlight_merges: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            autoplay: false,
            delay_ms: 100,
            color_enabled: true,
            highlight_latest: true,
            highlight_merges: true,
        }
    }
}

impl GameConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and after CLI overrides.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        self.height = self.height.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        self.delay_ms = self.delay_ms.min(MAX_DELAY_MS);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    board: Option<BoardSection>,
    autoplay: Option<AutoplaySection>,
    display: Option<DisplaySection>,
}

/// Board section, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardSection {
    width: Option<usize>,
    height: Option<usize>,
}

/// Autoplay section, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AutoplaySection {
    enabled: Option<bool>,
    delay_ms: Option<u64>,
}

/// Display section, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    color_enabled: Option<bool>,
    highlight_latest: Option<bool>,
    highlight_merges: Option<bool>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use t48_core::config::parse_config;
/// let config = parse_config("[board]\nwidth = 6\n").unwrap();
/// assert_eq!((config.width, config.height), (6, 4));
/// ```
pub fn parse_config(content: &str) -> Result<GameConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = GameConfig::default();

    if let Some(b) = file.board {
        if let Some(v) = b.width {
            config.width = v;
        }
        if let Some(v) = b.height {
            config.height = v;
        }
    }
    if let Some(a) = file.autoplay {
        if let Some(v) = a.enabled {
            config.autoplay = v;
        }
        if let Some(v) = a.delay_ms {
            config.delay_ms = v;
        }
    }
    if let Some(d) = file.display {
        if let Some(v) = d.color_enabled {
            config.color_enabled = v;
        }
        if let Some(v) = d.highlight_latest {
            config.highlight_latest = v;
        }
        if let Some(v) = d.highlight_merges {
            config.highlight_merges = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use t48_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), GameConfig::default());
    }

    #[test]
    fn sections_override_partially() {
        let config = parse_config(
            "[autoplay]\nenabled = true\n\n[display]\ncolor_enabled = false\n",
        )
        .unwrap();
        assert!(config.autoplay);
        assert_eq!(config.delay_ms, 100);
        assert!(!config.color_enabled);
        assert!(config.highlight_latest);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            parse_config("[board]\nwidth = 0\nheight = 500\n[autoplay]\ndelay_ms = 9000\n")
                .unwrap();
        assert_eq!(config.width, MIN_BOARD_SIZE);
        assert_eq!(config.height, MAX_BOARD_SIZE);
        assert_eq!(config.delay_ms, MAX_DELAY_MS);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[board]\nwidht = 5\n").is_err());
        assert!(parse_config("[board]\nwidth = -1\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[board]\nwidth = 5\nheight = 3").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!((config.width, config.height), (5, 3));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Impossible de lire"));
    }
}
