//! Round session - one timed round on one board
//!
//! The session is created when the controller enters `Playing` and dropped when
//! it leaves. It owns the board, the score, the drag selection and the round
//! clock. Time is supplied by the caller as a monotonic millisecond timestamp.

use log::info;

use crate::board::Board;
use crate::coords::Cursor;
use crate::input::InputSampler;
use crate::rng::SimpleRng;
use crate::selection::{Popped, Selection};
use crate::types::{BoardConfig, Rect, KEY_MOUSE_LEFT};

/// Something the controller needs to hear about from a session tick
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// A ten-sum was cleared
    Cleared(Popped),
    /// The round clock ran out on this tick (reported once)
    TimeUp { score: u32 },
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    config: BoardConfig,
    board: Board,
    selection: Selection,
    score: u32,
    start_ms: u64,
    last_tick_ms: u64,
    times_over: bool,
}

impl RoundSession {
    /// Generate a fresh board for `config` and start the clock at `now_ms`.
    pub fn new(config: BoardConfig, rng: &mut SimpleRng, now_ms: u64) -> Self {
        let board = Board::generate(config.columns, config.rows, rng);
        Self::with_board(config, board, now_ms)
    }

    /// Start a round on a prepared board.
    pub fn with_board(config: BoardConfig, board: Board, now_ms: u64) -> Self {
        Self {
            config,
            board,
            selection: Selection::new(),
            score: 0,
            start_ms: now_ms,
            last_tick_ms: now_ms,
            times_over: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn times_over(&self) -> bool {
        self.times_over
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active drag rectangle, if a drag is running.
    pub fn drag_rect(&self) -> Option<Rect> {
        self.selection.rect()
    }

    /// Timestamp after which the round is over
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.config.duration_ms())
    }

    /// Milliseconds since the round started, capped at the round length.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms
            .saturating_sub(self.start_ms)
            .min(self.config.duration_ms())
    }

    /// Whole seconds left for display.
    ///
    /// Never shows the full duration and never goes negative; reads 0 from the
    /// end timestamp onwards.
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        let end = self.end_ms();
        if now_ms >= end {
            0
        } else {
            (end - now_ms - 1) / 1000
        }
    }

    /// Regenerate the board and restart the clock, keeping the config.
    pub fn restart(&mut self, rng: &mut SimpleRng, now_ms: u64) {
        *self = Self::new(self.config, rng, now_ms);
    }

    /// Advance the round by one frame.
    pub fn tick(&mut self, input: &InputSampler, cursor: &Cursor, now_ms: u64) -> Option<RoundEvent> {
        let delta_ms = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;
        self.board.animate(delta_ms);

        if self.times_over {
            return None;
        }

        if now_ms > self.end_ms() {
            self.times_over = true;
            self.selection.cancel(&mut self.board);
            info!("round over, score {}", self.score);
            return Some(RoundEvent::TimeUp { score: self.score });
        }

        if !self.selection.is_active() && input.just_down(KEY_MOUSE_LEFT) {
            self.selection.begin(cursor.logical_x, cursor.logical_y);
        }

        if self.selection.is_active() {
            if input.key_down(KEY_MOUSE_LEFT) {
                self.selection
                    .update(&mut self.board, cursor.logical_x, cursor.logical_y);
            } else if input.just_up(KEY_MOUSE_LEFT) {
                if let Some(popped) = self.selection.commit(&mut self.board) {
                    self.score += popped.len() as u32;
                    return Some(RoundEvent::Cleared(popped));
                }
            }
        }

        None
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KEY_COUNT;

    fn probe(mouse: bool) -> [bool; KEY_COUNT] {
        let mut k = [false; KEY_COUNT];
        k[KEY_MOUSE_LEFT as usize] = mouse;
        k
    }

    fn at(x: f32, y: f32) -> Cursor {
        Cursor {
            physical_x: x,
            physical_y: y,
            logical_x: x,
            logical_y: y,
        }
    }

    fn session(values: [u8; 16], duration_secs: u32) -> RoundSession {
        let config = BoardConfig {
            columns: 4,
            rows: 4,
            duration_secs,
        };
        let board = Board::from_values(4, 4, &values, &mut SimpleRng::new(1));
        RoundSession::with_board(config, board, 1_000)
    }

    /// Press at the first apple, drag to the second, release.
    fn drag_first_pair(s: &mut RoundSession, input: &mut InputSampler, t: u64) -> Option<RoundEvent> {
        let a = *s.board().get(0, 0).unwrap();
        let b = *s.board().get(1, 0).unwrap();

        input.poll(true, &probe(true));
        s.tick(input, &at(a.x, a.y), t);
        input.poll(true, &probe(true));
        s.tick(input, &at(b.x, b.y), t + 16);
        input.poll(true, &probe(false));
        s.tick(input, &at(b.x, b.y), t + 32)
    }

    #[test]
    fn test_remaining_never_shows_full_duration() {
        let s = session([1; 16], 10);
        assert_eq!(s.remaining_secs(1_000), 9);
        assert_eq!(s.remaining_secs(1_001), 9);
        assert_eq!(s.remaining_secs(1_999), 9);
        assert_eq!(s.remaining_secs(2_000), 8);
        assert_eq!(s.remaining_secs(10_999), 0);
        assert_eq!(s.remaining_secs(11_000), 0);
        assert_eq!(s.remaining_secs(50_000), 0);
    }

    #[test]
    fn test_elapsed_is_capped() {
        let s = session([1; 16], 10);
        assert_eq!(s.elapsed_ms(500), 0);
        assert_eq!(s.elapsed_ms(4_000), 3_000);
        assert_eq!(s.elapsed_ms(99_000), 10_000);
    }

    #[test]
    fn test_time_up_fires_once_after_end() {
        let mut s = session([1; 16], 10);
        let input = InputSampler::new();

        assert_eq!(s.tick(&input, &at(0.0, 0.0), 11_000), None);
        assert!(!s.times_over());
        assert_eq!(
            s.tick(&input, &at(0.0, 0.0), 11_001),
            Some(RoundEvent::TimeUp { score: 0 })
        );
        assert!(s.times_over());
        assert_eq!(s.tick(&input, &at(0.0, 0.0), 12_000), None);
    }

    #[test]
    fn test_matching_drag_scores_count() {
        let mut s = session([4, 6, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 60);
        let mut input = InputSampler::new();

        let event = drag_first_pair(&mut s, &mut input, 2_000);
        assert!(matches!(event, Some(RoundEvent::Cleared(ref p)) if p.len() == 2));
        assert_eq!(s.score(), 2);
        assert!(s.drag_rect().is_none());
    }

    #[test]
    fn test_time_up_cancels_drag_and_blocks_new_ones() {
        let mut s = session([4, 6, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 10);
        let mut input = InputSampler::new();
        let a = *s.board().get(0, 0).unwrap();
        let b = *s.board().get(1, 0).unwrap();

        input.poll(true, &probe(true));
        s.tick(&input, &at(a.x, a.y), 2_000);
        input.poll(true, &probe(true));
        s.tick(&input, &at(b.x, b.y), 2_016);
        assert!(s.board().get(0, 0).unwrap().selected());

        input.poll(true, &probe(true));
        assert!(matches!(
            s.tick(&input, &at(b.x, b.y), 11_001),
            Some(RoundEvent::TimeUp { .. })
        ));
        assert!(s.drag_rect().is_none());
        assert!(s.board().apples().iter().all(|x| !x.selected()));

        // Release after time-up commits nothing; a new press starts nothing.
        input.poll(true, &probe(false));
        s.tick(&input, &at(b.x, b.y), 11_020);
        input.poll(true, &probe(true));
        s.tick(&input, &at(a.x, a.y), 11_040);
        assert!(s.drag_rect().is_none());
        assert_eq!(s.board().popped_count(), 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_popped_apples_keep_falling_after_time_up() {
        let mut s = session([1; 16], 10);
        let input = InputSampler::new();
        s.tick(&input, &at(0.0, 0.0), 11_001);
        assert!(s.times_over());

        s.board_mut().get_mut(0, 0).unwrap().pop();
        let y = s.board().get(0, 0).unwrap().y;
        s.tick(&input, &at(0.0, 0.0), 11_101);
        assert_ne!(s.board().get(0, 0).unwrap().y, y);
    }

    #[test]
    fn test_restart_resets_score_and_clock() {
        let mut s = session([4, 6, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 60);
        let mut input = InputSampler::new();
        drag_first_pair(&mut s, &mut input, 2_000);
        assert_eq!(s.score(), 2);

        s.restart(&mut SimpleRng::new(9), 5_000);
        assert_eq!(s.score(), 0);
        assert_eq!(s.start_ms(), 5_000);
        assert_eq!(s.board().popped_count(), 0);
        assert_eq!(s.board().columns(), 4);
    }
}
