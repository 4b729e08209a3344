use ratatui::style::{Color, Modifier, Style};

/// Largeur d'une tuile en colonnes terminal.
pub const TILE_WIDTH: u16 = 7;
/// Hauteur d'une tuile en lignes terminal.
pub const TILE_HEIGHT: u16 = 3;

/// Fond 256 couleurs par exposant, 0 = case vide.
const TILE_BG: [u8; 12] = [244, 44, 75, 105, 135, 165, 170, 175, 180, 149, 40, 196];
/// Fond des tuiles au-delà de 2048.
const OVERFLOW_BG: u8 = 236;
/// Texte blanc sur les tuiles.
const TILE_FG: u8 = 15;

/// Exposant à partir duquel le label passe en notation `2^k`.
const POWER_LABEL_FROM: u8 = 12;

/// Style (fg/bg) of a tile.
///
/// Without colour, empty cells stay on the terminal background and tiles
/// are drawn reversed.
///
/// # Example
/// ```
/// use ratatui::style::Color;
/// use t48_render::palette::tile_style;
/// assert_eq!(tile_style(1, true).bg, Some(Color::Indexed(44)));
/// assert_eq!(tile_style(20, true).bg, Some(Color::Indexed(236)));
/// ```
#[must_use]
pub fn tile_style(exponent: u8, color_enabled: bool) -> Style {
    if !color_enabled {
        return if exponent == 0 {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        };
    }
    let bg = TILE_BG
        .get(usize::from(exponent))
        .copied()
        .unwrap_or(OVERFLOW_BG);
    // Case vide : texte de la couleur du fond.
    let fg = if exponent == 0 { bg } else { TILE_FG };
    Style::default().fg(Color::Indexed(fg)).bg(Color::Indexed(bg))
}

/// Text shown on a tile: its value, `2^k` past 2048, nothing when empty.
///
/// # Example
/// ```
/// use t48_render::palette::tile_label;
/// assert_eq!(tile_label(0), "");
/// assert_eq!(tile_label(11), "2048");
/// assert_eq!(tile_label(13), "2^13");
/// ```
#[must_use]
pub fn tile_label(exponent: u8) -> String {
    match exponent {
        0 => String::new(),
        e if e >= POWER_LABEL_FROM => format!("2^{e}"),
        e => t48_core::board::tile_value(e).to_string(),
    }
}

/// Colonne de départ du label dans une tuile (centré, arrondi à droite).
#[inline]
#[must_use]
pub fn label_offset(label: &str) -> u16 {
    let len = label.chars().count() as u16;
    (TILE_WIDTH + 1).saturating_sub(len) / 2
}
