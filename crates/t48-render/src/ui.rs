use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use t48_core::board::tile_value;
use t48_core::config::GameConfig;
use t48_core::game::Game;

use crate::canvas;

/// Application state enum (mirrored for rendering decisions).
///
/// # Example
/// ```
/// use t48_render::ui::RenderState;
/// let state = RenderState::Playing;
/// assert_eq!(state.message(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Waiting for a direction key.
    Playing,
    /// Random moves on a timer.
    Autoplay,
    /// No move left.
    GameOver,
    /// Autoplay interrupted.
    Stopping,
    /// Player quit.
    Goodbye,
}

impl RenderState {
    /// Final message for terminal states, `None` while the game runs.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            RenderState::Playing | RenderState::Autoplay => None,
            RenderState::GameOver => Some("Game Over"),
            RenderState::Stopping => Some("Stopping..."),
            RenderState::Goodbye => Some("Goodbye!"),
        }
    }
}

/// Everything `draw` needs for one frame.
pub struct DrawContext<'a> {
    /// Partie affichée.
    pub game: &'a Game,
    /// Options d'affichage courantes.
    pub config: &'a GameConfig,
    /// État de l'app.
    pub state: RenderState,
}

/// Draw the full UI: header, board, status line and key help.
pub fn draw(frame: &mut Frame, ctx: &DrawContext) {
    let area = frame.area();

    // Vertical split: [header(1) | gap(1) | board | status(1) | help(1)]
    let [header_area, _, board_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(header(ctx.game), header_area);

    let board = ctx.game.board();
    let (w, h) = canvas::board_extent(board);
    let target = centred(board_area, w, h);
    canvas::render_board(frame.buffer_mut(), target, board, ctx.config);

    frame.render_widget(status(ctx), status_area);
    frame.render_widget(help(ctx.state), help_area);
}

/// Centre horizontalement un bloc `w × h` en haut de `area`.
fn centred(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width - w) / 2;
    Rect::new(x, area.y, w, h)
}

fn header(game: &Game) -> Paragraph<'static> {
    let best = tile_value(game.board().highest_exponent());
    let label = Style::default().fg(Color::Yellow);
    Paragraph::new(Line::from(vec![
        Span::styled(" Score: ", label),
        Span::styled(
            game.current_score().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Moves: ", label),
        Span::raw(game.moves().to_string()),
        Span::styled("   Best: ", label),
        Span::raw(best.to_string()),
    ]))
}

fn status(ctx: &DrawContext) -> Paragraph<'static> {
    let line = match ctx.state {
        RenderState::Playing => Line::from(Span::styled(
            " ▶ Playing",
            Style::default().fg(Color::Green),
        )),
        RenderState::Autoplay => Line::from(Span::styled(
            format!(" ▶ Autoplay ({} ms)", ctx.config.delay_ms),
            Style::default().fg(Color::Cyan),
        )),
        state => Line::from(Span::styled(
            format!(" {}", state.message().unwrap_or_default()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    };
    Paragraph::new(line)
}

fn help(state: RenderState) -> Paragraph<'static> {
    let text = match state {
        RenderState::Playing => " ←↑↓→ / hjkl / wasd  move    q/Esc  quit",
        RenderState::Autoplay => " q/Esc/Ctrl-C  stop",
        RenderState::GameOver | RenderState::Stopping | RenderState::Goodbye => {
            " press any key to exit"
        }
    };
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
}
