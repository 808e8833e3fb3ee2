//! Domain models for the oven simulator

pub mod batch;
pub mod cookie;
pub mod event;
pub mod sheet;
pub mod variant;

// Re-exports
pub use batch::{fill_batch, Batch, BatchError};
pub use cookie::Cookie;
pub use event::{Event, EventLog};
pub use sheet::{Sheet, SheetError};
pub use variant::{BakeStatus, CookieVariant, StatusRange, StatusTable, StatusTableError};
