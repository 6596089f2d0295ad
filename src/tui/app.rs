//! Application state and input handling.

use super::layout::BoardLayout;
use checkmate_client::{BoardController, Game, Offset, Outcome, Preferences, RemoteDriver};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, instrument, warn};

/// Main application state.
pub struct App {
    controller: BoardController<RemoteDriver>,
    preferences: Preferences,
    layout: BoardLayout,
    status_message: String,
    press: Option<(u16, u16)>,
    quit: bool,
}

impl App {
    /// Creates a new application over a connected driver.
    pub fn new(driver: RemoteDriver, preferences: Preferences) -> Self {
        Self {
            controller: BoardController::new(driver),
            preferences,
            layout: BoardLayout::default(),
            status_message: "Drag a piece to move. n: new game, q: quit.".to_string(),
            press: None,
            quit: false,
        }
    }

    /// Gesture controller, for rendering.
    pub fn controller(&self) -> &BoardController<RemoteDriver> {
        &self.controller
    }

    /// Display preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Records where the board was drawn.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    /// Handles a mouse event.
    #[instrument(skip(self), fields(kind = ?event.kind, column = event.column, row = event.row))]
    pub async fn handle_mouse(&mut self, event: MouseEvent) {
        self.hover(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some((event.column, event.row));
                self.controller.pointer_down(Offset::default());
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((x, y)) = self.press {
                    self.controller.pointer_move(Offset::new(
                        i32::from(event.column) - i32::from(x),
                        i32::from(event.row) - i32::from(y),
                    ));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.press = None;
                let result = self.controller.pointer_up().await;
                self.report(result);
            }
            _ => {}
        }
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(code = ?key.code))]
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => {
                self.controller.cancel();
                self.status_message = "Cancelled.".to_string();
            }
            KeyCode::Char('n') => self.restart().await,
            KeyCode::Char(digit @ '1'..='9') => {
                let index = usize::from(digit as u8 - b'1');
                let result = self.controller.choose(index).await;
                self.report(result);
            }
            _ => {}
        }
    }

    fn hover(&mut self, column: u16, row: u16) {
        match self.layout.square_at(column, row) {
            Some(square) => self.controller.pointer_enter(square),
            None => self.controller.pointer_leave(),
        }
    }

    async fn restart(&mut self) {
        if !self.controller.game().supports_restart() {
            self.status_message = "This server cannot start a new game.".to_string();
            return;
        }
        self.status_message = match self.controller.restart().await {
            Ok(_) => "New game started.".to_string(),
            Err(err) => {
                warn!(error = %err, "Restart failed");
                format!("Restart failed: {}", err)
            }
        };
    }

    fn report(&mut self, result: Result<Outcome, checkmate_client::DriverError>) {
        debug!(?result, "Gesture finished");
        self.status_message = match result {
            Ok(Outcome::Idle) => return,
            Ok(Outcome::Choosing) => "Several moves match: press a number, Esc cancels.".to_string(),
            Ok(Outcome::Accepted) => "Move played.".to_string(),
            Ok(Outcome::Refused) => {
                let driver = self.controller.game();
                match driver.last_rejection() {
                    Some(rejection) if !driver.state().is_over() => {
                        format!("Server refused the move: {}", rejection.message)
                    }
                    _ if driver.state().is_over() => "The game is over.".to_string(),
                    _ => "Move not applied.".to_string(),
                }
            }
            Err(err) => format!("Error: {}", err),
        };
    }
}
