//! Session Engine
//!
//! Drives one batch at a time through the bake lifecycle:
//!
//! ```text
//! Idle --fill--> Filled --run(T)--> Baking --T ticks--> Done --finish--> Idle
//!                  |                                      ^
//!                  +---------------- run(0) --------------+
//! ```
//!
//! During `Baking` every tick:
//! 1. Advances each cookie by one minute
//! 2. Classifies the batch by its first cookie
//! 3. Flags `almost_ready` (on every such tick, not only the first)
//! 4. Logs events
//!
//! `discard` drops a batch from any non-idle state without producing a report.
//!
//! # Example
//!
//! ```rust
//! use oven_core::{BakeStatus, CookieVariant, Session};
//!
//! let mut session = Session::new(26.0, 18.0, CookieVariant::peanut()).unwrap();
//! let filled = session.fill().unwrap();
//! assert_eq!(filled.batch_size, 117);
//!
//! let almost: Vec<u32> = session
//!     .run(10)
//!     .unwrap()
//!     .map(Result::unwrap)
//!     .filter(|t| t.is_almost_ready)
//!     .map(|t| t.tick)
//!     .collect();
//! assert_eq!(almost, vec![9, 10]);
//!
//! let report = session.finish().unwrap();
//! assert_eq!(report.final_status, BakeStatus::AlmostReady);
//! ```

use crate::core::time::BakeTimer;
use crate::models::batch::{fill_batch, Batch, BatchError};
use crate::models::event::{Event, EventLog};
use crate::models::sheet::{Sheet, SheetError};
use crate::models::variant::{BakeStatus, CookieVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

// ============================================================================
// Configuration Types
// ============================================================================

/// Oven configuration
///
/// Defaults to a full-size 26" x 18" sheet of peanut cookies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvenConfig {
    #[serde(default = "default_sheet_length")]
    pub sheet_length: f64,

    #[serde(default = "default_sheet_width")]
    pub sheet_width: f64,

    #[serde(default)]
    pub variant: CookieVariant,
}

fn default_sheet_length() -> f64 {
    Sheet::DEFAULT_LENGTH
}

fn default_sheet_width() -> f64 {
    Sheet::DEFAULT_WIDTH
}

impl Default for OvenConfig {
    fn default() -> Self {
        Self {
            sheet_length: Sheet::DEFAULT_LENGTH,
            sheet_width: Sheet::DEFAULT_WIDTH,
            variant: CookieVariant::default(),
        }
    }
}

impl OvenConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    ///
    /// # Example
    /// ```
    /// use oven_core::{CookieVariant, OvenConfig};
    ///
    /// let config = OvenConfig::from_json_str(
    ///     r#"{ "sheet_width": 12, "variant": { "type": "chocolate_chip", "num_chips": 20 } }"#,
    /// ).unwrap();
    /// assert_eq!(config.sheet_length, 26.0);
    /// assert_eq!(config.sheet_width, 12.0);
    /// assert_eq!(config.variant, CookieVariant::ChocolateChip { num_chips: 20 });
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, SessionError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SessionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build the sheet this config describes, rejecting bad dimensions
    pub fn validate(&self) -> Result<Sheet, SessionError> {
        Ok(Sheet::new(self.sheet_length, self.sheet_width)?)
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Filled,
    Baking,
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Filled => "filled",
            SessionState::Baking => "baking",
            SessionState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of `fill`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillSummary {
    pub batch_size: usize,
    pub capacity: usize,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// 1-based tick number
    pub tick: u32,

    /// Batch status after this tick
    pub status: BakeStatus,

    /// True whenever `status` is `almost_ready`
    pub is_almost_ready: bool,
}

/// Final report produced by `finish`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BakeReport {
    pub batch_id: Uuid,
    pub final_size: usize,
    pub final_status: BakeStatus,
    pub variant_type_name: &'static str,
    pub minutes_baked: u32,
}

impl fmt::Display for BakeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You have baked {} {} {} cookies.",
            self.final_size, self.final_status, self.variant_type_name
        )
    }
}

/// Session error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// Minutes outside `0..=u32::MAX`; rejected before any tick
    #[error("Invalid bake duration {minutes}: minutes must be between 0 and 4294967295")]
    InvalidDuration { minutes: i64 },

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("Bake still in progress: {remaining} minutes remaining")]
    BakeInProgress { remaining: u32 },

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl SessionError {
    pub fn is_empty_batch(&self) -> bool {
        matches!(self, SessionError::Batch(BatchError::Empty))
    }
}

// ============================================================================
// Session
// ============================================================================

/// One oven with a fixed sheet and variant, baking one batch at a time
#[derive(Debug, Clone)]
pub struct Session {
    sheet: Sheet,
    variant: CookieVariant,
    state: SessionState,
    batch: Option<Batch>,
    timer: BakeTimer,
    event_log: EventLog,
}

impl Session {
    /// Create an idle session
    ///
    /// # Errors
    ///
    /// * `SessionError::Sheet` - non-positive, non-finite or oversized dimensions
    pub fn new(
        sheet_length: f64,
        sheet_width: f64,
        variant: CookieVariant,
    ) -> Result<Self, SessionError> {
        let sheet = Sheet::new(sheet_length, sheet_width)?;
        Ok(Self {
            sheet,
            variant,
            state: SessionState::Idle,
            batch: None,
            timer: BakeTimer::default(),
            event_log: EventLog::new(),
        })
    }

    pub fn from_config(config: &OvenConfig) -> Result<Self, SessionError> {
        Self::new(config.sheet_length, config.sheet_width, config.variant)
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn variant(&self) -> &CookieVariant {
        &self.variant
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn timer(&self) -> &BakeTimer {
        &self.timer
    }

    /// Events for the current (or most recently finished) batch
    ///
    /// Cleared at the start of every `fill`.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn capacity(&self) -> usize {
        self.sheet.capacity(&self.variant)
    }

    /// Status of the current batch
    pub fn batch_status(&self) -> Result<BakeStatus, SessionError> {
        Ok(self.current_batch("inspect the batch")?.status()?)
    }

    /// Fill the sheet to capacity (`Idle -> Filled`)
    ///
    /// A zero-capacity sheet still transitions, leaving an empty batch that
    /// can only be discarded.
    pub fn fill(&mut self) -> Result<FillSummary, SessionError> {
        self.expect_state(SessionState::Idle, "fill")?;

        let batch = fill_batch(&self.sheet, self.variant);
        let summary = FillSummary {
            batch_size: batch.len(),
            capacity: batch.capacity(),
        };

        info!(
            batch_id = %batch.id(),
            variant = self.variant.type_name(),
            size = summary.batch_size,
            capacity = summary.capacity,
            "batch filled"
        );
        self.event_log.clear();
        self.event_log.log(Event::BatchFilled {
            tick: 0,
            batch_id: batch.id(),
            variant: self.variant.type_name(),
            size: summary.batch_size,
            capacity: summary.capacity,
        });

        self.timer = BakeTimer::default();
        self.batch = Some(batch);
        self.state = SessionState::Filled;
        Ok(summary)
    }

    /// Start baking for `total_minutes` ticks (`Filled -> Baking`)
    ///
    /// Returns a lazy iterator applying one tick per `next()`. With
    /// `total_minutes == 0` the session goes straight to `Done` and the
    /// iterator is empty.
    ///
    /// # Errors
    ///
    /// * `InvalidDuration` - negative or above `u32::MAX`, checked before anything else
    /// * `InvalidState` - session is not `Filled`
    /// * `Batch(Empty)` - nothing fit on the sheet
    pub fn run(&mut self, total_minutes: i64) -> Result<BakeRun<'_>, SessionError> {
        let minutes = u32::try_from(total_minutes).map_err(|_| SessionError::InvalidDuration {
            minutes: total_minutes,
        })?;
        self.expect_state(SessionState::Filled, "bake")?;
        if self.current_batch("bake")?.is_empty() {
            return Err(BatchError::Empty.into());
        }

        self.timer = BakeTimer::new(minutes);
        self.state = if minutes == 0 {
            SessionState::Done
        } else {
            SessionState::Baking
        };
        info!(minutes, "bake started");

        Ok(BakeRun {
            session: self,
            failed: false,
        })
    }

    /// Report on a fully baked batch and clear it (`Done -> Idle`)
    pub fn finish(&mut self) -> Result<BakeReport, SessionError> {
        match self.state {
            SessionState::Done => {}
            SessionState::Baking => {
                return Err(SessionError::BakeInProgress {
                    remaining: self.timer.remaining(),
                })
            }
            state => {
                return Err(SessionError::InvalidState {
                    operation: "finish",
                    state,
                })
            }
        }

        let batch = self.current_batch("finish")?;
        let report = BakeReport {
            batch_id: batch.id(),
            final_size: batch.len(),
            final_status: batch.status()?,
            variant_type_name: batch.type_name()?,
            minutes_baked: self.timer.current_tick(),
        };

        info!(
            batch_id = %report.batch_id,
            size = report.final_size,
            status = %report.final_status,
            minutes = report.minutes_baked,
            "batch finished"
        );
        self.event_log.log(Event::BatchFinished {
            tick: report.minutes_baked,
            batch_id: report.batch_id,
            size: report.final_size,
            status: report.final_status,
        });

        self.batch = None;
        self.state = SessionState::Idle;
        Ok(report)
    }

    /// Remove the batch without a report, returning how many cookies it held
    pub fn discard(&mut self) -> Result<usize, SessionError> {
        if self.state == SessionState::Idle {
            return Err(SessionError::InvalidState {
                operation: "discard",
                state: self.state,
            });
        }

        let size = match self.batch.take() {
            Some(batch) => {
                info!(batch_id = %batch.id(), size = batch.len(), "batch discarded");
                self.event_log.log(Event::BatchDiscarded {
                    tick: self.timer.current_tick(),
                    batch_id: batch.id(),
                    size: batch.len(),
                });
                batch.len()
            }
            None => 0,
        };

        self.state = SessionState::Idle;
        Ok(size)
    }

    fn bake_one_minute(&mut self) -> Option<Result<TickResult, SessionError>> {
        let tick = self.timer.advance_tick()?;
        let Some(batch) = self.batch.as_mut() else {
            return Some(Err(SessionError::InvalidState {
                operation: "bake",
                state: self.state,
            }));
        };

        batch.bake_tick();
        let status = match batch.status() {
            Ok(status) => status,
            Err(e) => return Some(Err(e.into())),
        };
        let is_almost_ready = status == BakeStatus::AlmostReady;

        debug!(tick, %status, "minute baked");
        self.event_log.log(Event::MinuteBaked { tick, status });
        if is_almost_ready {
            self.event_log.log(Event::AlmostReady { tick });
        }

        if self.timer.is_finished() {
            self.state = SessionState::Done;
        }

        Some(Ok(TickResult {
            tick,
            status,
            is_almost_ready,
        }))
    }

    fn expect_state(
        &self,
        expected: SessionState,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn current_batch(&self, operation: &'static str) -> Result<&Batch, SessionError> {
        self.batch.as_ref().ok_or(SessionError::InvalidState {
            operation,
            state: self.state,
        })
    }
}

/// Lazy, non-restartable sequence of ticks for one bake
///
/// Dropping it early leaves the session `Baking`; `finish` then fails with
/// `BakeInProgress` and the batch can only be discarded.
#[derive(Debug)]
pub struct BakeRun<'a> {
    session: &'a mut Session,
    failed: bool,
}

impl BakeRun<'_> {
    /// Ticks still to be applied
    pub fn remaining(&self) -> u32 {
        self.session.timer.remaining()
    }
}

impl Iterator for BakeRun<'_> {
    type Item = Result<TickResult, SessionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.session.state != SessionState::Baking {
            return None;
        }
        let result = self.session.bake_one_minute()?;
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed || self.session.state != SessionState::Baking {
            return (0, Some(0));
        }
        (0, Some(self.remaining() as usize))
    }
}
