use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Widget};
use t48_core::board::Board;
use t48_core::config::GameConfig;

use crate::palette::{TILE_HEIGHT, TILE_WIDTH, label_offset, tile_label, tile_style};

/// Taille en cellules terminal de la grille dessinée, bordure comprise.
///
/// # Example
/// ```
/// use t48_core::board::Board;
/// use t48_render::canvas::board_extent;
/// let board = Board::from_tiles(4, 4, vec![0; 16], 0).unwrap();
/// assert_eq!(board_extent(&board), (30, 14));
/// ```
#[must_use]
pub fn board_extent(board: &Board) -> (u16, u16) {
    let w = (board.width() as u16).saturating_mul(TILE_WIDTH);
    let h = (board.height() as u16).saturating_mul(TILE_HEIGHT);
    (w.saturating_add(2), h.saturating_add(2))
}

/// Écrit directement une `Board` dans un `ratatui::Buffer`.
///
/// Each tile is a 7×3 block. Tiles that merged in the last changing push
/// get corner markers, the latest spawned tile has its label underlined.
/// Anything outside `area` is clipped.
pub fn render_board(buf: &mut Buffer, area: Rect, board: &Board, config: &GameConfig) {
    let area = area.intersection(buf.area);
    Block::bordered().render(area, buf);
    let inner = area.inner(ratatui::layout::Margin::new(1, 1));
    if inner.is_empty() {
        return;
    }

    for y in 0..board.height() {
        for x in 0..board.width() {
            let index = y * board.width() + x;
            let origin_x = u32::from(inner.x) + x as u32 * u32::from(TILE_WIDTH);
            let origin_y = u32::from(inner.y) + y as u32 * u32::from(TILE_HEIGHT);
            if origin_x >= u32::from(inner.right()) || origin_y >= u32::from(inner.bottom()) {
                continue;
            }
            let tile = Rect::new(origin_x as u16, origin_y as u16, TILE_WIDTH, TILE_HEIGHT)
                .intersection(inner);
            draw_tile(buf, tile, board, index, config);
        }
    }
}

fn draw_tile(buf: &mut Buffer, tile: Rect, board: &Board, index: usize, config: &GameConfig) {
    let exponent = board.exponent(index);
    let style = tile_style(exponent, config.color_enabled);
    let merged = config.highlight_merges && board.is_merged(index);

    for dy in 0..tile.height {
        for dx in 0..tile.width {
            let ch = if merged { corner(dx, dy) } else { ' ' };
            if let Some(cell) = buf.cell_mut((tile.x + dx, tile.y + dy)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    let label = tile_label(exponent);
    if label.is_empty() || tile.height < 2 {
        return;
    }
    let label_style = if config.highlight_latest && board.latest_tile() == Some(index) {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    };
    let row = tile.y + 1;
    for (i, ch) in label.chars().enumerate() {
        let x = tile.x + label_offset(&label) + i as u16;
        if x >= tile.right() {
            break;
        }
        if let Some(cell) = buf.cell_mut((x, row)) {
            cell.set_char(ch).set_style(label_style);
        }
    }
}

/// Marqueur de coin d'une tuile fusionnée.
fn corner(dx: u16, dy: u16) -> char {
    let right = TILE_WIDTH - 1;
    let bottom = TILE_HEIGHT - 1;
    match (dx, dy) {
        (0, 0) => '┌',
        (x, 0) if x == right => '┐',
        (0, y) if y == bottom => '└',
        (x, y) if x == right && y == bottom => '┘',
        _ => ' ',
    }
}
