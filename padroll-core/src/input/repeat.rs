use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Initial delay and repeat interval for one class of held action, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRate {
    pub delay_ms: u64,
    pub rate_ms: u64,
}

impl RepeatRate {
    pub const CURSOR: Self = Self::new(200, 50);
    pub const NOTE_LENGTH: Self = Self::new(150, 120);
    pub const NOTE_VELOCITY: Self = Self::new(150, 50);
    pub const SELECTION_MOVE: Self = Self::new(150, 100);

    pub const fn new(delay_ms: u64, rate_ms: u64) -> Self {
        Self { delay_ms, rate_ms }
    }
}

/// Why a poll fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fire {
    /// Fresh press, or a direction change mid-hold.
    Initial,
    /// Auto-repeat after the initial delay.
    Repeat,
}

#[derive(Debug, Clone, Copy)]
struct RepeatTimer {
    start_ms: u64,
    last_fire_ms: u64,
    direction: i8,
}

/// Keyed auto-repeat timers.
///
/// A key names an action together with its variant (`move_x_grid` and
/// `move_x_measure` are separate keys), so switching variants restarts the
/// cadence. A timer exists only while its key keeps being polled with a
/// nonzero direction: polling with 0 deletes it, and [`RepeatScheduler::sweep`]
/// deletes every timer that was not polled since the previous sweep.
#[derive(Debug, Default)]
pub struct RepeatScheduler {
    timers: HashMap<&'static str, RepeatTimer>,
    polled: HashSet<&'static str>,
}

impl RepeatScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer for `key`. Elapsed time is compared against wall-clock
    /// timestamps, never tick counts, so irregular polling is fine.
    pub fn poll(
        &mut self,
        key: &'static str,
        direction: i8,
        now_ms: u64,
        rate: RepeatRate,
    ) -> Option<Fire> {
        if direction == 0 {
            self.timers.remove(key);
            return None;
        }
        self.polled.insert(key);

        match self.timers.get_mut(key) {
            Some(timer) if timer.direction == direction => {
                let since_start = now_ms.saturating_sub(timer.start_ms);
                let since_fire = now_ms.saturating_sub(timer.last_fire_ms);
                if since_start > rate.delay_ms && since_fire > rate.rate_ms {
                    timer.last_fire_ms = now_ms;
                    Some(Fire::Repeat)
                } else {
                    None
                }
            }
            _ => {
                let timer = RepeatTimer {
                    start_ms: now_ms,
                    last_fire_ms: now_ms,
                    direction,
                };
                self.timers.insert(key, timer);
                Some(Fire::Initial)
            }
        }
    }

    pub fn cancel(&mut self, key: &'static str) {
        self.timers.remove(key);
        self.polled.remove(key);
    }

    /// Delete every timer whose key was not polled since the last sweep.
    pub fn sweep(&mut self) {
        let polled = std::mem::take(&mut self.polled);
        self.timers.retain(|key, _| polled.contains(key));
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.polled.clear();
    }

    pub fn is_running(&self, key: &'static str) -> bool {
        self.timers.contains_key(key)
    }

    pub fn running(&self) -> usize {
        self.timers.len()
    }
}
