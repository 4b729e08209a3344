use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use t48_core::direction::Direction;

/// Source d'événements terminal, lue par la boucle principale.
pub trait EventSource {
    /// `true` si un événement est disponible avant `timeout`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be polled.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Prochain événement. Bloque si aucun n'est disponible.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read.
    fn read(&mut self) -> Result<Event>;
}

/// Événements crossterm du terminal réel.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Action demandée par une touche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Pousser la grille.
    Move(Direction),
    /// Quitter (q, Esc, Ctrl-C).
    Quit,
}

/// Traduit un événement terminal en commande. `None` pour tout le reste.
///
/// # Example
/// ```
/// use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
/// use t48_app::input::{command_for, Command};
/// use t48_core::direction::Direction;
///
/// let ev = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
/// assert_eq!(command_for(&ev), Some(Command::Move(Direction::Left)));
/// ```
#[must_use]
pub fn command_for(event: &Event) -> Option<Command> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = *event
    else {
        return None;
    };

    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c' | 'C')).then_some(Command::Quit);
    }

    let direction = match code {
        KeyCode::Up | KeyCode::Char('k' | 'w' | 'K' | 'W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j' | 's' | 'J' | 'S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h' | 'a' | 'H' | 'A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l' | 'd' | 'L' | 'D') => Direction::Right,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Move(direction))
}

/// `true` pour n'importe quel appui de touche.
#[must_use]
pub fn is_key_press(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        })
    )
}
