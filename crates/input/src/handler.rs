//! Terminal key and mouse state exposed as a [`KeyProbe`].
//!
//! Terminals deliver events, not key levels. This handler folds the event
//! stream into a 256-entry "is it down" table that `InputSampler::poll` can read.
//!
//! Two terminal quirks shape it:
//! - A click can be pressed and released between two polls. Presses are latched
//!   until [`TermInput::end_frame`], so the sampler still sees one down frame.
//! - Many terminals never send key-release events. A keyboard key is released
//!   automatically once no press or repeat has arrived for a short timeout.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::core::KeyProbe;
use crate::map::{key_code, should_quit};
use crate::types::{CELL_PX_HEIGHT, CELL_PX_WIDTH, KEY_COUNT, KEY_MOUSE_LEFT};

// Long enough to bridge the gap before a terminal's auto-repeat starts.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// What the host should do after an event was folded in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Handled,
    Ignored,
    Quit,
    Focus(bool),
    Resize(u16, u16),
}

#[derive(Debug, Clone)]
pub struct TermInput {
    held: [bool; KEY_COUNT],
    latched: [bool; KEY_COUNT],
    last_seen_ms: [u64; KEY_COUNT],
    mouse_col: u16,
    mouse_row: u16,
    key_release_timeout_ms: u64,
}

impl TermInput {
    pub fn new() -> Self {
        Self {
            held: [false; KEY_COUNT],
            latched: [false; KEY_COUNT],
            last_seen_ms: [0; KEY_COUNT],
            mouse_col: 0,
            mouse_row: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    /// Fold one terminal event into the key table.
    pub fn handle_event(&mut self, event: &Event, now_ms: u64) -> Feed {
        match event {
            Event::Key(key) => {
                if should_quit(*key) {
                    return Feed::Quit;
                }
                self.handle_key(*key, now_ms)
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::FocusGained => Feed::Focus(true),
            Event::FocusLost => {
                self.release_all();
                Feed::Focus(false)
            }
            Event::Resize(w, h) => Feed::Resize(*w, *h),
            _ => Feed::Ignored,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> Feed {
        let Some(code) = key_code(key.code) else {
            return Feed::Ignored;
        };
        let i = code as usize;
        match key.kind {
            KeyEventKind::Press => {
                self.held[i] = true;
                self.latched[i] = true;
                self.last_seen_ms[i] = now_ms;
            }
            KeyEventKind::Repeat => {
                if self.held[i] {
                    self.last_seen_ms[i] = now_ms;
                }
            }
            KeyEventKind::Release => self.held[i] = false,
        }
        Feed::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Feed {
        self.mouse_col = mouse.column;
        self.mouse_row = mouse.row;
        let i = KEY_MOUSE_LEFT as usize;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.held[i] = true;
                self.latched[i] = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.held[i] = false,
            // A drag implies the button is down even if the press was missed.
            MouseEventKind::Drag(MouseButton::Left) => self.held[i] = true,
            _ => {}
        }
        Feed::Handled
    }

    /// Release keyboard keys whose last press is older than the timeout.
    ///
    /// The mouse button always gets real release events and is left alone.
    pub fn expire(&mut self, now_ms: u64) {
        for (i, held) in self.held.iter_mut().enumerate() {
            if *held
                && i != KEY_MOUSE_LEFT as usize
                && now_ms.saturating_sub(self.last_seen_ms[i]) > self.key_release_timeout_ms
            {
                *held = false;
            }
        }
    }

    /// Drop the latches once the frame that sampled them is over.
    pub fn end_frame(&mut self) {
        self.latched.fill(false);
    }

    pub fn release_all(&mut self) {
        self.held.fill(false);
        self.latched.fill(false);
    }

    /// Last mouse position in terminal cells.
    pub fn mouse_cell(&self) -> (u16, u16) {
        (self.mouse_col, self.mouse_row)
    }

    /// Last mouse position in window pixels, at the centre of its cell.
    pub fn mouse_px(&self) -> (f32, f32) {
        let x = u32::from(self.mouse_col) * CELL_PX_WIDTH + CELL_PX_WIDTH / 2;
        let y = u32::from(self.mouse_row) * CELL_PX_HEIGHT + CELL_PX_HEIGHT / 2;
        (x as f32, y as f32)
    }
}

impl KeyProbe for TermInput {
    fn is_down(&self, code: u8) -> bool {
        self.held[code as usize] || self.latched[code as usize]
    }
}

impl Default for TermInput {
    fn default() -> Self {
        Self::new()
    }
}
