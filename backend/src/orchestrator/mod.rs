//! Orchestrator - bake session state machine
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    BakeReport, BakeRun, FillSummary, OvenConfig, Session, SessionError, SessionState, TickResult,
};
