//! Weekly bonus accrual.
//!
//! RULE: One bonus per completed run of BONUS_CLOSES inside a window.
//! The window only ever moves forward, in whole multiples of WINDOW_DAYS
//! measured from the tracker's original start. Idle weeks earn nothing.

use crate::types::{SimDuration, SimTime};
use serde::{Deserialize, Serialize};

pub const WINDOW_DAYS: i64 = 7;
pub const BONUS_CLOSES: u32 = 10;

/// What a single `record_close` call did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    /// Counted toward the current window.
    Counted,
    /// Completed the window's quota; the window slid forward one week.
    BonusAwarded,
    /// The window had lapsed; it snapped forward and this close opened the count.
    WindowRolled,
    /// Earlier than the window start. Not counted, tracker unchanged.
    BeforeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTracker {
    window_start:     SimTime,
    closes_in_window: u32,
    bonus_count:      u32,
}

impl BonusTracker {
    pub fn new(start: SimTime) -> Self {
        Self {
            window_start:     start,
            closes_in_window: 0,
            bonus_count:      0,
        }
    }

    pub fn window_start(&self) -> SimTime     { self.window_start }
    pub fn closes_in_window(&self) -> u32     { self.closes_in_window }
    pub fn bonus_count(&self) -> u32          { self.bonus_count }

    pub fn window_end(&self) -> SimTime {
        self.window_start + window()
    }

    /// Record a closed deal at `time`.
    ///
    /// Closes before `window_start` are ignored. With in-order input this
    /// happens after a bonus: the window has already moved a week ahead, so
    /// the rest of that week's closes earn nothing further.
    pub fn record_close(&mut self, time: SimTime) -> CloseOutcome {
        if time < self.window_start {
            return CloseOutcome::BeforeWindow;
        }

        if time < self.window_end() {
            self.closes_in_window += 1;
            if self.closes_in_window == BONUS_CLOSES {
                self.closes_in_window = 0;
                self.bonus_count += 1;
                self.window_start += window();
                return CloseOutcome::BonusAwarded;
            }
            return CloseOutcome::Counted;
        }

        // Snap to the start of the week containing `time`, keeping alignment
        // with the original start.
        let elapsed_days = (time - self.window_start).num_days();
        let skip_days = elapsed_days - elapsed_days % WINDOW_DAYS;
        self.window_start += SimDuration::days(skip_days);
        self.closes_in_window = 1;
        CloseOutcome::WindowRolled
    }
}

fn window() -> SimDuration {
    SimDuration::days(WINDOW_DAYS)
}
