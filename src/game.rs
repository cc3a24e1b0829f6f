//! Top-level game flow: menu, playing, game over

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::{HighScore, ScoreStore};
use crate::renderer::{Frame, RenderSink, build_frame};
use crate::sim::{Outcome, Session, TickInput};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver { won: bool },
}

/// The game state machine. Owns the running session (if any), the high
/// score and the audio/score collaborators.
pub struct Game {
    screen: Screen,
    session: Option<Session>,
    high_score: HighScore,
    last_score: u64,
    store: Box<dyn ScoreStore>,
    audio: AudioManager,
    next_seed: u64,
    running: bool,
}

impl Game {
    /// `seed` fixes the first session's seed; later sessions count up from it
    pub fn new(mut store: Box<dyn ScoreStore>, audio: AudioManager, seed: Option<u64>) -> Self {
        let high_score = HighScore::load(store.as_mut());
        Self {
            screen: Screen::Menu,
            session: None,
            high_score,
            last_score: 0,
            store,
            audio,
            next_seed: seed.unwrap_or_else(rand::random),
            running: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Score of the most recently finished session
    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame. Returns false once the game has exited.
    pub fn update(&mut self, dt: f32, input: &TickInput, sink: &mut dyn RenderSink) -> bool {
        if !self.running {
            return false;
        }

        match self.screen {
            Screen::Menu => self.menu_frame(input, sink),
            Screen::Playing => self.play_frame(dt, input, sink),
            Screen::GameOver { won } => self.game_over_frame(won, input, sink),
        }

        self.running
    }

    fn menu_frame(&mut self, input: &TickInput, sink: &mut dyn RenderSink) {
        if input.quit || input.cancel {
            self.exit();
            return;
        }
        if input.confirm {
            self.audio.play(SoundEffect::ButtonPress);
            self.start_session();
            return;
        }
        sink.present(&Frame::menu(self.high_score.best()));
    }

    fn game_over_frame(&mut self, won: bool, input: &TickInput, sink: &mut dyn RenderSink) {
        if input.quit {
            self.exit();
            return;
        }
        if input.confirm {
            self.audio.play(SoundEffect::ButtonPress);
            self.start_session();
            return;
        }
        if input.cancel {
            self.screen = Screen::Menu;
            return;
        }
        sink.present(&Frame::game_over(won, self.last_score, self.high_score.best()));
    }

    fn play_frame(&mut self, dt: f32, input: &TickInput, sink: &mut dyn RenderSink) {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };

        let outcome = session.step(dt, input);
        self.audio.play_events(&session.events);

        let Some(outcome) = outcome else {
            sink.present(&build_frame(session));
            return;
        };

        self.finish_session(outcome);
    }

    fn start_session(&mut self) {
        self.audio.play(SoundEffect::Splash);
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.session = Some(Session::new(seed, self.high_score.best()));
        self.screen = Screen::Playing;
    }

    fn finish_session(&mut self, outcome: Outcome) {
        let score = outcome.score();
        self.last_score = score;
        self.high_score.record(score, self.store.as_mut());
        self.session = None;
        log::info!("Session ended: {:?}", outcome);

        match outcome {
            Outcome::Win { .. } => {
                self.audio.play(SoundEffect::GameWin);
                self.screen = Screen::GameOver { won: true };
            }
            Outcome::Lose { .. } => {
                self.audio.play(SoundEffect::GameLose);
                self.screen = Screen::GameOver { won: false };
            }
            Outcome::ReturnToMenu { .. } => self.screen = Screen::Menu,
            Outcome::Quit { .. } => self.exit(),
        }
    }

    fn exit(&mut self) {
        log::info!("Exiting with high score {}", self.high_score.best());
        self.running = false;
    }
}
