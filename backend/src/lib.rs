//! Oven Simulator Core
//!
//! Turn-based simulation of baking cookie batches on a sheet.
//!
//! # Architecture
//!
//! - **core**: Bake timer
//! - **models**: Domain types (CookieVariant, Sheet, Cookie, Batch, Event)
//! - **orchestrator**: Session state machine driving fill, bake and report
//!
//! # Critical Invariants
//!
//! 1. `batch.len() <= capacity(sheet, variant)`
//! 2. All cookies in a batch bake in lockstep
//! 3. Every status table covers all non-negative minutes exactly once

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use crate::core::time::BakeTimer;
pub use models::{
    batch::{fill_batch, Batch, BatchError},
    cookie::Cookie,
    event::{Event, EventLog},
    sheet::{Sheet, SheetError},
    variant::{BakeStatus, CookieVariant, StatusRange, StatusTable, StatusTableError},
};
pub use orchestrator::{
    BakeReport, BakeRun, FillSummary, OvenConfig, Session, SessionError, SessionState, TickResult,
};
