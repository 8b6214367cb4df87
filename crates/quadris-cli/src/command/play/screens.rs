use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use quadris_engine::{GameSession, Intent, IntentSet, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Stylize as _,
    text::{Line, Text},
};

use crate::view::widgets::{SessionDisplay, style};

/// How long the final board stays on screen after a game ends.
const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum Screen {
    Menu,
    Playing(PlayingScreen),
    GameOver(GameOverScreen),
}

/// What the app should do after a screen handled an event or a frame.
#[derive(Debug)]
pub enum Transition {
    Stay,
    Replace(Box<Screen>),
    StartGame,
    Exit,
}

impl Screen {
    pub fn handle_event(&mut self, event: &Event) -> Transition {
        let Some(key) = event
            .as_key_event()
            .filter(|key| key.kind == KeyEventKind::Press)
        else {
            return Transition::Stay;
        };
        match self {
            Screen::Menu => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Transition::Exit,
                _ => Transition::StartGame,
            },
            Screen::Playing(screen) => screen.handle_key(key.code),
            Screen::GameOver(_) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Transition::Replace(Box::new(Screen::Menu)),
                _ => Transition::Stay,
            },
        }
    }

    pub fn update(&mut self, elapsed: Duration) -> Transition {
        match self {
            Screen::Menu => Transition::Stay,
            Screen::Playing(screen) => screen.update(elapsed),
            Screen::GameOver(screen) => screen.update(elapsed),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self {
            Screen::Menu => draw_menu(frame),
            Screen::Playing(screen) => draw_session(frame, screen.session()),
            Screen::GameOver(screen) => draw_session(frame, &screen.session),
        }
    }
}

/// Maps arrow keys to the intents they request.
pub fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),
        KeyCode::Up => Some(Intent::Rotate),
        _ => None,
    }
}

/// A running session plus the intents collected since the last frame.
#[derive(Debug)]
pub struct PlayingScreen {
    session: GameSession,
    intents: IntentSet,
}

impl PlayingScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            intents: IntentSet::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[cfg(test)]
    pub fn pending_intents(&self) -> &IntentSet {
        &self.intents
    }

    fn handle_key(&mut self, code: KeyCode) -> Transition {
        if let Some(intent) = intent_for_key(code) {
            self.intents.insert(intent);
            return Transition::Stay;
        }
        match code {
            KeyCode::Char('p') => self.session.toggle_pause(),
            KeyCode::Char('q') | KeyCode::Esc => {
                return Transition::Replace(Box::new(Screen::Menu));
            }
            _ => {}
        }
        Transition::Stay
    }

    fn update(&mut self, elapsed: Duration) -> Transition {
        let snapshot = self.session.tick(elapsed, &self.intents);
        self.intents.clear();
        if snapshot.state().is_game_over() {
            let screen = GameOverScreen::new(self.session.clone());
            return Transition::Replace(Box::new(Screen::GameOver(screen)));
        }
        Transition::Stay
    }
}

/// The final board, shown for a fixed time before returning to the menu.
#[derive(Debug)]
pub struct GameOverScreen {
    session: GameSession,
    remaining: Duration,
}

impl GameOverScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            remaining: GAME_OVER_HOLD,
        }
    }

    fn update(&mut self, elapsed: Duration) -> Transition {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            return Transition::Replace(Box::new(Screen::Menu));
        }
        Transition::Stay
    }
}

fn draw_menu(frame: &mut Frame) {
    let text = Text::from(vec![
        Line::from("QUADRIS").bold(),
        Line::default(),
        Line::from("Press any key to play"),
        Line::from("Q / Esc: quit").style(style::HELP),
    ])
    .style(style::DEFAULT)
    .centered();
    let area = frame
        .area()
        .centered(Constraint::Length(30), Constraint::Length(4));
    frame.render_widget(text, area);
}

fn draw_session(frame: &mut Frame, session: &GameSession) {
    let help_text = match session.state() {
        SessionState::Falling | SessionState::Locking => {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | P (Pause) | Q (Menu)"
        }
        SessionState::Paused => "Controls: P (Resume) | Q (Menu)",
        SessionState::GameOver => "Controls: Q (Menu)",
    };
    let help_text = Text::from(help_text).style(style::HELP).centered();

    let [main_area, help_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
    frame.render_widget(SessionDisplay::new(session), main_area);
    frame.render_widget(help_text, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_intents() {
        assert_eq!(intent_for_key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Down), Some(Intent::SoftDrop));
        assert_eq!(intent_for_key(KeyCode::Up), Some(Intent::Rotate));
        assert_eq!(intent_for_key(KeyCode::Char('p')), None);
        assert_eq!(intent_for_key(KeyCode::Enter), None);
    }
}
