use std::time::Duration;

use crossterm::event::Event;
use quadris_engine::{ConfigError, EngineConfig, GameSession, PieceSeed};
use rand::Rng as _;
use ratatui::Frame;

use crate::{
    command::play::screens::{PlayingScreen, Screen, Transition},
    tui::{App, Runtime},
};

/// Menu, play, and game-over screens around one [`EngineConfig`].
#[derive(Debug)]
pub struct PlayApp {
    config: EngineConfig,
    seed: Option<PieceSeed>,
    fps: u32,
    screen: Screen,
    should_exit: bool,
    error: Option<ConfigError>,
}

impl PlayApp {
    pub fn new(config: EngineConfig, seed: Option<PieceSeed>, fps: u32) -> Self {
        Self {
            config,
            seed,
            fps,
            screen: Screen::Menu,
            should_exit: false,
            error: None,
        }
    }

    /// Returns the error that stopped the app, if any.
    pub fn into_result(self) -> Result<(), ConfigError> {
        self.error.map_or(Ok(()), Err)
    }

    fn start_game(&mut self) {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        match GameSession::with_seed(self.config.clone(), seed) {
            Ok(session) => self.screen = Screen::Playing(PlayingScreen::new(session)),
            Err(error) => {
                self.error = Some(error);
                self.should_exit = true;
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Replace(screen) => self.screen = *screen,
            Transition::StartGame => self.start_game(),
            Transition::Exit => self.should_exit = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.fps);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        let transition = self.screen.handle_event(event);
        self.apply(transition);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        let transition = self.screen.update(elapsed);
        self.apply(transition);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
