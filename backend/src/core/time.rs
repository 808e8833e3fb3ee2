//! Bake time tracking
//!
//! A bake runs in discrete one-minute ticks. The timer knows how many ticks
//! were requested up front and how many have been applied so far.

use serde::{Deserialize, Serialize};

/// Counts applied ticks against a fixed total
///
/// # Example
/// ```
/// use oven_core::BakeTimer;
///
/// let mut timer = BakeTimer::new(3);
/// assert_eq!(timer.current_tick(), 0);
/// assert_eq!(timer.remaining(), 3);
///
/// assert_eq!(timer.advance_tick(), Some(1));
/// assert_eq!(timer.remaining(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeTimer {
    /// Ticks applied so far
    current_tick: u32,
    /// Ticks requested for this bake
    total_ticks: u32,
}

impl BakeTimer {
    pub fn new(total_ticks: u32) -> Self {
        Self {
            current_tick: 0,
            total_ticks,
        }
    }

    /// Advance one tick, returning the new 1-based tick index
    ///
    /// Returns `None` once every requested tick has been applied.
    ///
    /// # Example
    /// ```
    /// use oven_core::BakeTimer;
    ///
    /// let mut timer = BakeTimer::new(1);
    /// assert_eq!(timer.advance_tick(), Some(1));
    /// assert_eq!(timer.advance_tick(), None);
    /// assert!(timer.is_finished());
    /// ```
    pub fn advance_tick(&mut self) -> Option<u32> {
        if self.is_finished() {
            return None;
        }
        self.current_tick += 1;
        Some(self.current_tick)
    }

    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    pub fn remaining(&self) -> u32 {
        self.total_ticks - self.current_tick
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.total_ticks
    }
}
