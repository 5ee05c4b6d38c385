//! Scene module - renderer-agnostic draw list
//!
//! [`Scene::build_into`] reads the controller once per frame and emits
//! [`DrawCommand`]s in logical canvas coordinates. Renderers map them through
//! a `CoordinateMapper` and never look at game rules.
//!
//! Labels are `&'static str` plus an optional number, so a reused `Scene`
//! rebuilds without allocating once its command vector has grown.

use crate::controller::GameController;
use crate::session::RoundSession;
use crate::types::{
    setting_buttons, setting_row_center_y, Button, ConfigField, GameMode, Rect, BUTTON_BACK,
    BUTTON_GAME_MENU, BUTTON_GAME_RESET, BUTTON_HELP, BUTTON_MENU_RESET, BUTTON_START, PLAY_AREA,
};

/// Frame drawn around the whole canvas
pub const CANVAS_BORDER: Rect = Rect::new(30.0, 30.0, 1890.0, 1050.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Text {
    pub x: f32,
    pub y: f32,
    pub label: &'static str,
    /// Appended after the label when present
    pub value: Option<u64>,
    pub size: TextSize,
    pub align: Align,
}

impl Text {
    fn new(x: f32, y: f32, label: &'static str, size: TextSize, align: Align) -> Self {
        Self {
            x,
            y,
            label,
            value: None,
            size,
            align,
        }
    }

    fn with_value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Border(Rect),
    /// Filled background of the play area
    Panel(Rect),
    Button {
        rect: Rect,
        label: &'static str,
        hovered: bool,
    },
    Text(Text),
    Apple {
        x: f32,
        y: f32,
        /// Cell edge length
        size: f32,
        angle: f32,
        value: u8,
        selected: bool,
        popped: bool,
    },
    Selection {
        rect: Rect,
        sum: u32,
    },
}

const HELP_LINES: [&str; 5] = [
    "Drag a box over apples whose numbers add up to exactly 10.",
    "Release to clear them: every cleared apple scores one point.",
    "Any other total clears nothing.",
    "Clear as many as you can before the timer runs out.",
    "R restarts the round, Esc returns to the menu.",
];

#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Convenience helper that allocates a new scene.
    pub fn build(game: &GameController, now_ms: u64) -> Self {
        let mut scene = Self::new();
        scene.build_into(game, now_ms);
        scene
    }

    /// Rebuild the draw list for the current frame.
    pub fn build_into(&mut self, game: &GameController, now_ms: u64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Border(CANVAS_BORDER));

        let cursor = game.cursor();
        let hover = |b: &Button| b.hover(cursor.logical_x, cursor.logical_y);

        match game.mode() {
            GameMode::Title => {
                self.text(Text::new(960.0, 400.0, "APPLE CONTAINER", TextSize::Large, Align::Center));
                self.text(Text::new(960.0, 650.0, "Click anywhere to start", TextSize::Medium, Align::Center));
                self.text(Text::new(960.0, 760.0, "Esc to quit", TextSize::Small, Align::Center));
            }
            GameMode::MainMenu => {
                self.text(Text::new(960.0, 80.0, "MAIN MENU", TextSize::Large, Align::Center));
                let config = game.config();
                for field in ConfigField::ALL {
                    let y = setting_row_center_y(field);
                    let (minus, plus) = setting_buttons(field);
                    self.text(Text::new(1040.0, y, field.label(), TextSize::Medium, Align::Right));
                    self.button(&minus, hover(&minus));
                    self.text(
                        Text::new(1300.0, y, "", TextSize::Medium, Align::Center)
                            .with_value(u64::from(config.get(field))),
                    );
                    self.button(&plus, hover(&plus));
                }
                for b in [BUTTON_START, BUTTON_HELP, BUTTON_MENU_RESET] {
                    self.button(&b, hover(&b));
                }
                self.text(
                    Text::new(960.0, 1000.0, "High score: ", TextSize::Small, Align::Center)
                        .with_value(u64::from(game.high_score())),
                );
            }
            GameMode::HelpMenu => {
                self.text(Text::new(960.0, 150.0, "HOW TO PLAY", TextSize::Large, Align::Center));
                for (i, &line) in HELP_LINES.iter().enumerate() {
                    let y = 300.0 + i as f32 * 80.0;
                    self.text(Text::new(960.0, y, line, TextSize::Medium, Align::Center));
                }
                self.button(&BUTTON_BACK, hover(&BUTTON_BACK));
            }
            GameMode::Playing => {
                if let Some(session) = game.session() {
                    self.build_round(session, game.high_score(), now_ms);
                }
                self.button(&BUTTON_GAME_MENU, hover(&BUTTON_GAME_MENU));
                self.button(&BUTTON_GAME_RESET, hover(&BUTTON_GAME_RESET));
            }
        }
    }

    fn build_round(&mut self, session: &RoundSession, high_score: u32, now_ms: u64) {
        self.commands.push(DrawCommand::Panel(PLAY_AREA));

        let board = session.board();
        let size = board.cell_size();
        // Resting apples first so falling ones pass over them.
        for popped in [false, true] {
            for apple in board.apples().iter().filter(|a| a.popped() == popped) {
                if popped && !apple.is_falling() {
                    continue;
                }
                self.commands.push(DrawCommand::Apple {
                    x: apple.x,
                    y: apple.y,
                    size,
                    angle: apple.angle,
                    value: apple.value,
                    selected: apple.selected(),
                    popped,
                });
            }
        }

        if let Some(rect) = session.drag_rect() {
            self.commands.push(DrawCommand::Selection {
                rect,
                sum: session.selection().sum(),
            });
        }

        let stats = [
            ("Score: ", u64::from(session.score())),
            ("Time: ", session.remaining_secs(now_ms)),
            ("High: ", u64::from(high_score)),
        ];
        for (i, (label, value)) in stats.into_iter().enumerate() {
            let y = 500.0 + i as f32 * 110.0;
            self.text(Text::new(60.0, y, label, TextSize::Medium, Align::Left).with_value(value));
        }

        if session.times_over() {
            let cx = (PLAY_AREA.left + PLAY_AREA.right) / 2.0;
            let cy = (PLAY_AREA.top + PLAY_AREA.bottom) / 2.0;
            self.text(Text::new(cx, cy - 60.0, "TIME'S UP", TextSize::Large, Align::Center));
            self.text(
                Text::new(cx, cy + 60.0, "Final score: ", TextSize::Medium, Align::Center)
                    .with_value(u64::from(session.score())),
            );
        }
    }

    fn text(&mut self, text: Text) {
        self.commands.push(DrawCommand::Text(text));
    }

    fn button(&mut self, button: &Button, hovered: bool) {
        self.commands.push(DrawCommand::Button {
            rect: button.rect,
            label: button.label,
            hovered,
        });
    }
}
