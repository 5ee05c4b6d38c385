//! Game controller - the top-level mode state machine
//!
//! ```text
//! Title --click--> MainMenu --Start--> Playing --Menu/Esc--> MainMenu
//!                     |  ^                 |  ^
//!                   Help Back/Esc          Reset / R
//!                     v  |                 +--+
//!                   HelpMenu
//! ```
//!
//! Every tick is routed to exactly one mode handler. A handler can mutate its
//! own mode's state and ask for a transition; entry actions (board generation,
//! dropping the round) run in [`GameController::enter`]. The round session is
//! carried inside the `Playing` state, so it exists exactly while playing.

use log::{debug, info};

use crate::board::Board;
use crate::coords::Cursor;
use crate::input::InputSampler;
use crate::rng::SimpleRng;
use crate::session::{RoundEvent, RoundSession};
use crate::types::{
    setting_buttons, BoardConfig, Button, ConfigField, GameMode, BUTTON_BACK, BUTTON_GAME_MENU,
    BUTTON_GAME_RESET, BUTTON_HELP, BUTTON_MENU_RESET, BUTTON_START, KEY_ESCAPE, KEY_MOUSE_LEFT,
    KEY_R,
};

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// Escape on the title screen; closing the window is up to the host
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Stay,
    Goto(GameMode),
    Exit,
}

#[derive(Debug, Clone)]
enum ModeState {
    Title,
    MainMenu,
    HelpMenu,
    Playing(RoundSession),
}

impl ModeState {
    fn mode(&self) -> GameMode {
        match self {
            ModeState::Title => GameMode::Title,
            ModeState::MainMenu => GameMode::MainMenu,
            ModeState::HelpMenu => GameMode::HelpMenu,
            ModeState::Playing(_) => GameMode::Playing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameController {
    state: ModeState,
    config: BoardConfig,
    high_score: u32,
    rng: SimpleRng,
    cursor: Cursor,
}

impl GameController {
    /// Start on the title screen with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self {
            state: ModeState::Title,
            config: BoardConfig::default(),
            high_score: 0,
            rng: SimpleRng::new(seed),
            cursor: Cursor::default(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replace the board config outright.
    ///
    /// No bounds are enforced here; see [`BoardConfig::is_within_bounds`].
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Cursor as seen on the last tick
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The running round, present only while playing.
    pub fn session(&self) -> Option<&RoundSession> {
        match &self.state {
            ModeState::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn rng(&self) -> &SimpleRng {
        &self.rng
    }

    /// Enter `Playing` on a prepared board instead of a generated one.
    ///
    /// Useful for replaying a specific puzzle.
    pub fn start_round_with(&mut self, board: Board, now_ms: u64) {
        self.log_transition(GameMode::Playing);
        self.state = ModeState::Playing(RoundSession::with_board(self.config, board, now_ms));
    }

    /// Route one frame of input to the active mode.
    pub fn tick(&mut self, input: &InputSampler, cursor: Cursor, now_ms: u64) -> Signal {
        self.cursor = cursor;

        let step = match self.mode() {
            GameMode::Title => self.tick_title(input),
            GameMode::MainMenu => self.tick_main_menu(input),
            GameMode::HelpMenu => self.tick_help_menu(input),
            GameMode::Playing => self.tick_playing(input, now_ms),
        };

        match step {
            Step::Stay => Signal::Continue,
            Step::Goto(mode) => {
                self.enter(mode, now_ms);
                Signal::Continue
            }
            Step::Exit => Signal::Exit,
        }
    }

    fn clicked(&self, input: &InputSampler, button: &Button) -> bool {
        input.just_down(KEY_MOUSE_LEFT) && button.hover(self.cursor.logical_x, self.cursor.logical_y)
    }

    fn tick_title(&mut self, input: &InputSampler) -> Step {
        if input.just_down(KEY_ESCAPE) {
            return Step::Exit;
        }
        if input.just_down(KEY_MOUSE_LEFT) {
            return Step::Goto(GameMode::MainMenu);
        }
        Step::Stay
    }

    fn tick_main_menu(&mut self, input: &InputSampler) -> Step {
        if self.clicked(input, &BUTTON_START) {
            return Step::Goto(GameMode::Playing);
        }
        if self.clicked(input, &BUTTON_HELP) {
            return Step::Goto(GameMode::HelpMenu);
        }
        if self.clicked(input, &BUTTON_MENU_RESET) {
            self.config = BoardConfig::default();
            debug!("board config reset to defaults");
            return Step::Stay;
        }

        for field in ConfigField::ALL {
            let (minus, plus) = setting_buttons(field);
            let increase = if self.clicked(input, &plus) {
                true
            } else if self.clicked(input, &minus) {
                false
            } else {
                continue;
            };
            if self.config.adjust(field, increase) {
                debug!("{} -> {}", field.label(), self.config.get(field));
            }
            break;
        }
        Step::Stay
    }

    fn tick_help_menu(&mut self, input: &InputSampler) -> Step {
        if input.just_down(KEY_ESCAPE) || self.clicked(input, &BUTTON_BACK) {
            return Step::Goto(GameMode::MainMenu);
        }
        Step::Stay
    }

    fn tick_playing(&mut self, input: &InputSampler, now_ms: u64) -> Step {
        if input.just_down(KEY_ESCAPE) || self.clicked(input, &BUTTON_GAME_MENU) {
            return Step::Goto(GameMode::MainMenu);
        }
        let reset = input.just_down(KEY_R) || self.clicked(input, &BUTTON_GAME_RESET);

        let ModeState::Playing(session) = &mut self.state else {
            return Step::Stay;
        };

        if reset {
            session.restart(&mut self.rng, now_ms);
            debug!("round restarted");
            return Step::Stay;
        }

        match session.tick(input, &self.cursor, now_ms) {
            Some(RoundEvent::TimeUp { score }) => {
                if session.config().is_default() && score > self.high_score {
                    self.high_score = score;
                    info!("new high score {}", score);
                }
            }
            Some(RoundEvent::Cleared(popped)) => {
                debug!("cleared {} apples, score {}", popped.len(), session.score());
            }
            None => {}
        }
        Step::Stay
    }

    /// Switch modes and run the target's entry action.
    fn enter(&mut self, mode: GameMode, now_ms: u64) {
        self.log_transition(mode);
        self.state = match mode {
            GameMode::Title => ModeState::Title,
            GameMode::MainMenu => ModeState::MainMenu,
            GameMode::HelpMenu => ModeState::HelpMenu,
            GameMode::Playing => {
                ModeState::Playing(RoundSession::new(self.config, &mut self.rng, now_ms))
            }
        };
    }

    fn log_transition(&self, to: GameMode) {
        debug!("mode {} -> {}", self.mode().as_str(), to.as_str());
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KEY_COUNT;

    /// Drives the controller one frame at a time.
    struct Rig {
        game: GameController,
        input: InputSampler,
        now: u64,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                game: GameController::new(12345),
                input: InputSampler::new(),
                now: 1_000,
            }
        }

        fn frame(&mut self, down: &[u8], x: f32, y: f32) -> Signal {
            let mut keys = [false; KEY_COUNT];
            for &c in down {
                keys[c as usize] = true;
            }
            self.input.poll(true, &keys);
            self.now += 16;
            let cursor = Cursor {
                physical_x: x,
                physical_y: y,
                logical_x: x,
                logical_y: y,
            };
            self.game.tick(&self.input, cursor, self.now)
        }

        /// Press then release at the centre of `button`.
        fn click(&mut self, button: &Button) {
            let (x, y) = center(button);
            self.frame(&[KEY_MOUSE_LEFT], x, y);
            self.frame(&[], x, y);
        }

        fn press_key(&mut self, key: u8) -> Signal {
            let signal = self.frame(&[key], 0.0, 0.0);
            self.frame(&[], 0.0, 0.0);
            signal
        }
    }

    fn center(button: &Button) -> (f32, f32) {
        (
            (button.rect.left + button.rect.right) / 2.0,
            (button.rect.top + button.rect.bottom) / 2.0,
        )
    }

    #[test]
    fn test_starts_on_title_without_session() {
        let game = GameController::new(1);
        assert_eq!(game.mode(), GameMode::Title);
        assert!(game.session().is_none());
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn test_title_click_opens_main_menu() {
        let mut rig = Rig::new();
        rig.frame(&[KEY_MOUSE_LEFT], 5.0, 5.0);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);
    }

    #[test]
    fn test_title_escape_signals_exit() {
        let mut rig = Rig::new();
        assert_eq!(rig.press_key(KEY_ESCAPE), Signal::Exit);
        assert_eq!(rig.game.mode(), GameMode::Title);
    }

    #[test]
    fn test_held_click_does_not_chain_through_menus() {
        let mut rig = Rig::new();
        let (x, y) = center(&BUTTON_START);
        rig.frame(&[KEY_MOUSE_LEFT], x, y);
        rig.frame(&[KEY_MOUSE_LEFT], x, y);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);
    }

    #[test]
    fn test_start_generates_board_from_config() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        rig.click(&BUTTON_START);

        assert_eq!(rig.game.mode(), GameMode::Playing);
        let session = rig.game.session().unwrap();
        assert_eq!(session.board().columns(), 17);
        assert_eq!(session.board().rows(), 10);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_help_round_trip() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        rig.click(&BUTTON_HELP);
        assert_eq!(rig.game.mode(), GameMode::HelpMenu);
        rig.click(&BUTTON_BACK);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);

        rig.click(&BUTTON_HELP);
        rig.press_key(KEY_ESCAPE);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);
    }

    #[test]
    fn test_settings_buttons_adjust_and_reset() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);

        let (minus, plus) = setting_buttons(ConfigField::Duration);
        rig.click(&plus);
        assert_eq!(rig.game.config().duration_secs, 125);
        rig.click(&minus);
        rig.click(&minus);
        assert_eq!(rig.game.config().duration_secs, 115);

        let (_, plus_cols) = setting_buttons(ConfigField::Columns);
        rig.click(&plus_cols);
        assert_eq!(rig.game.config().columns, 18);

        rig.click(&BUTTON_MENU_RESET);
        assert_eq!(*rig.game.config(), BoardConfig::default());
    }

    #[test]
    fn test_settings_stop_at_bounds() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        let (minus_rows, _) = setting_buttons(ConfigField::Rows);
        for _ in 0..20 {
            rig.click(&minus_rows);
        }
        assert_eq!(rig.game.config().rows, crate::types::ROWS_MIN);
    }

    #[test]
    fn test_escape_leaves_round_and_drops_session() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        rig.click(&BUTTON_START);
        rig.press_key(KEY_ESCAPE);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);
        assert!(rig.game.session().is_none());

        rig.click(&BUTTON_START);
        rig.click(&BUTTON_GAME_MENU);
        assert_eq!(rig.game.mode(), GameMode::MainMenu);
    }

    #[test]
    fn test_r_key_regenerates_and_restarts_clock() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        rig.click(&BUTTON_START);
        let first = rig.game.session().unwrap().board().clone();
        let first_start = rig.game.session().unwrap().start_ms();

        rig.press_key(KEY_R);
        let session = rig.game.session().unwrap();
        assert_eq!(rig.game.mode(), GameMode::Playing);
        assert!(session.start_ms() > first_start);
        assert_ne!(*session.board(), first);
    }

    #[test]
    fn test_reset_button_restarts_round() {
        let mut rig = Rig::new();
        rig.press_key(KEY_MOUSE_LEFT);
        rig.click(&BUTTON_START);
        let first_start = rig.game.session().unwrap().start_ms();
        rig.click(&BUTTON_GAME_RESET);
        assert!(rig.game.session().unwrap().start_ms() > first_start);
    }
}
