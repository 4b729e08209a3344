use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use arc_swap::ArcSwap;
use crossterm::event::Event;
use ratatui::DefaultTerminal;
use t48_core::config::GameConfig;
use t48_core::game::Game;
use t48_core::traits::DirectionSource;
use t48_render::ui::{DrawContext, RenderState};

use crate::cancel::CancelToken;
use crate::input::{self, Command, EventSource, TerminalEvents};

/// Période de vérification du jeton d'arrêt en mode clavier.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Application state.
///
/// # Example
/// ```
/// use t48_app::app::AppState;
/// assert!(AppState::GameOver.is_final());
/// assert!(!AppState::Playing.is_final());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Le joueur choisit les directions au clavier.
    Playing,
    /// Coups aléatoires cadencés par `delay_ms`.
    Autoplay,
    /// Plus aucun coup possible.
    GameOver,
    /// Autoplay interrompu (Ctrl-C ou touche quitter).
    Stopping,
    /// Le joueur a quitté.
    Goodbye,
}

impl AppState {
    /// `true` once the loop should stop playing.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(
            self,
            AppState::GameOver | AppState::Stopping | AppState::Goodbye
        )
    }
}

/// Main application struct holding all state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// La partie.
    pub game: Game,
    /// Config courante (lecture via arc-swap, mise à jour par le hot-reload).
    pub config: Arc<ArcSwap<GameConfig>>,
    /// Arrêt coopératif de l'autoplay.
    pub cancel: CancelToken,
    /// Source des coups en autoplay.
    moves: Box<dyn DirectionSource>,
    /// Clavier et redimensionnements.
    events: Box<dyn EventSource>,
}

impl App {
    /// Create a new App instance. Starts in autoplay if the config asks for it.
    #[must_use]
    pub fn new(
        game: Game,
        config: Arc<ArcSwap<GameConfig>>,
        cancel: CancelToken,
        moves: Box<dyn DirectionSource>,
    ) -> Self {
        let state = if config.load().autoplay {
            AppState::Autoplay
        } else {
            AppState::Playing
        };
        Self {
            state,
            game,
            config,
            cancel,
            moves,
            events: Box::new(TerminalEvents),
        }
    }

    /// Main event loop: draw, then wait for a key (manual) or the autoplay timer.
    ///
    /// The final screen stays up until a key is pressed.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            if !self.state.is_final() && self.game.over() {
                self.state = AppState::GameOver;
                log::info!(
                    "Partie terminée : score {} en {} coups",
                    self.game.current_score(),
                    self.game.moves()
                );
            }

            self.draw(&mut terminal)?;

            match self.state {
                AppState::Playing => self.wait_for_key()?,
                AppState::Autoplay => {
                    self.wait_for_delay()?;
                    self.autoplay_step();
                }
                AppState::GameOver | AppState::Stopping | AppState::Goodbye => break,
            }
        }

        // Laisser l'écran final visible.
        loop {
            if input::is_key_press(&self.events.read()?) {
                return Ok(());
            }
        }
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        let config = self.config.load();
        let state = self.render_state();
        terminal.draw(|frame| {
            let ctx = DrawContext {
                game: &self.game,
                config: &config,
                state,
            };
            t48_render::ui::draw(frame, &ctx);
        })?;
        Ok(())
    }

    /// Convert `AppState` to `RenderState` for the UI.
    fn render_state(&self) -> RenderState {
        match self.state {
            AppState::Playing => RenderState::Playing,
            AppState::Autoplay => RenderState::Autoplay,
            AppState::GameOver => RenderState::GameOver,
            AppState::Stopping => RenderState::Stopping,
            AppState::Goodbye => RenderState::Goodbye,
        }
    }

    /// "Game Over", "Stopping..." or "Goodbye!" once the loop has ended.
    #[must_use]
    pub fn final_message(&self) -> Option<&'static str> {
        self.render_state().message()
    }

    /// Attend une touche en surveillant le jeton d'arrêt.
    fn wait_for_key(&mut self) -> Result<()> {
        loop {
            if self.events.poll(INPUT_POLL)? {
                let event = self.events.read()?;
                // Resize : on sort pour redessiner.
                if input::command_for(&event).is_some() || matches!(event, Event::Resize(..)) {
                    self.handle_event(&event);
                    return Ok(());
                }
            } else if self.cancel.is_cancelled() {
                self.state = AppState::Goodbye;
                return Ok(());
            }
        }
    }

    /// Dort `delay_ms` en restant réactif aux touches.
    ///
    /// Pending events are drained on every pass, so a zero delay still
    /// sees the quit keys.
    fn wait_for_delay(&mut self) -> Result<()> {
        let delay = Duration::from_millis(self.config.load().delay_ms);
        let deadline = Instant::now() + delay;
        loop {
            while self.events.poll(Duration::ZERO)? {
                let event = self.events.read()?;
                self.handle_event(&event);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.events.poll(remaining)? {
                return Ok(());
            }
        }
    }

    /// Handle a terminal event.
    ///
    /// In manual play a direction swipes and a quit key ends the game. In
    /// autoplay directions are ignored and a quit key cancels.
    pub fn handle_event(&mut self, event: &Event) {
        match (self.state, input::command_for(event)) {
            (AppState::Playing, Some(Command::Move(direction))) => {
                if !self.game.swipe(direction) {
                    log::trace!("{direction} : aucun mouvement");
                }
            }
            (AppState::Playing, Some(Command::Quit)) => self.state = AppState::Goodbye,
            (AppState::Autoplay, Some(Command::Quit)) => self.cancel.cancel(),
            _ => {}
        }
    }

    /// One autoplay move: stop if cancelled, else draw random directions
    /// until one changes the board.
    pub fn autoplay_step(&mut self) {
        if self.cancel.is_cancelled() {
            self.state = AppState::Stopping;
            return;
        }
        if self.game.over() {
            return;
        }
        // A live board always has a changing direction, so this terminates.
        while !self.game.swipe(self.moves.next_direction()) {}
    }
}
