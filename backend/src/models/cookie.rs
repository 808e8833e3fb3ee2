//! Cookie instance
//!
//! A single cookie on the sheet, counting the minutes it has spent in the oven.

use crate::models::variant::{BakeStatus, CookieVariant, StatusTableError};

/// One cookie in a batch
///
/// The variant is a small `Copy` value, so each cookie keeps its own
/// read-only copy rather than a pointer back to a shared catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cookie {
    variant: CookieVariant,
    elapsed_minutes: u32,
}

impl Cookie {
    pub fn new(variant: CookieVariant) -> Self {
        Self {
            variant,
            elapsed_minutes: 0,
        }
    }

    pub fn variant(&self) -> &CookieVariant {
        &self.variant
    }

    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_minutes
    }

    /// Advance by one simulated minute
    pub fn bake(&mut self) {
        self.elapsed_minutes = self.elapsed_minutes.saturating_add(1);
    }

    pub fn status(&self) -> Result<BakeStatus, StatusTableError> {
        self.variant.status_of(self.elapsed_minutes)
    }
}
