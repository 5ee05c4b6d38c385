//! Input module - edge-triggered key sampling
//!
//! [`InputSampler`] keeps two 256-entry key arrays, one for the current poll and
//! one for the previous. Each poll flips which array is current and refills it
//! from a [`KeyProbe`]. Edge queries compare the two.

use crate::types::KEY_COUNT;

/// Source of raw "is this key down right now" answers.
pub trait KeyProbe {
    fn is_down(&self, code: u8) -> bool;
}

impl KeyProbe for [bool; KEY_COUNT] {
    fn is_down(&self, code: u8) -> bool {
        self[code as usize]
    }
}

impl<F> KeyProbe for F
where
    F: Fn(u8) -> bool,
{
    fn is_down(&self, code: u8) -> bool {
        self(code)
    }
}

/// Double-buffered key state
#[derive(Debug, Clone)]
pub struct InputSampler {
    slots: [[bool; KEY_COUNT]; 2],
    /// Index of the slot holding the current poll
    current: usize,
    focused: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self {
            slots: [[false; KEY_COUNT]; 2],
            current: 0,
            focused: true,
        }
    }

    /// Window focus notification from the host.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Swap buffers and sample every key code.
    ///
    /// With `restrict_to_focus`, an unfocused window reads every key as up.
    pub fn poll(&mut self, restrict_to_focus: bool, probe: &impl KeyProbe) {
        self.current ^= 1;
        let live = self.focused || !restrict_to_focus;
        let slot = &mut self.slots[self.current];
        for (code, down) in slot.iter_mut().enumerate() {
            *down = live && probe.is_down(code as u8);
        }
    }

    #[inline(always)]
    pub fn current(&self, code: u8) -> bool {
        self.slots[self.current][code as usize]
    }

    #[inline(always)]
    pub fn previous(&self, code: u8) -> bool {
        self.slots[self.current ^ 1][code as usize]
    }

    pub fn key_down(&self, code: u8) -> bool {
        self.current(code)
    }

    /// Down now, up on the previous poll
    pub fn just_down(&self, code: u8) -> bool {
        self.current(code) && !self.previous(code)
    }

    /// Up now, down on the previous poll
    pub fn just_up(&self, code: u8) -> bool {
        !self.current(code) && self.previous(code)
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}
