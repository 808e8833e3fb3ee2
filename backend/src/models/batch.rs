//! Batch model
//!
//! A batch is every cookie on one sheet. All cookies share a variant and
//! bake in lockstep, so the first cookie speaks for the whole batch.
//!
//! # Critical Invariants
//!
//! 1. `len() <= capacity()` at all times
//! 2. Every cookie has the same `elapsed_minutes`

use crate::models::cookie::Cookie;
use crate::models::sheet::Sheet;
use crate::models::variant::{BakeStatus, CookieVariant, StatusTableError};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Batch is empty: no cookies fit on the sheet")]
    Empty,

    #[error(transparent)]
    Status(#[from] StatusTableError),
}

/// Same-variant group of cookies baked together
#[derive(Debug, Clone)]
pub struct Batch {
    id: Uuid,
    variant: CookieVariant,
    capacity: usize,
    cookies: Vec<Cookie>,
}

/// Fill a sheet to capacity with fresh `variant` cookies
///
/// A zero-capacity sheet yields an empty batch rather than an error.
///
/// # Example
/// ```
/// use oven_core::{fill_batch, BatchError, CookieVariant, Sheet};
///
/// let batch = fill_batch(&Sheet::default(), CookieVariant::peanut());
/// assert_eq!(batch.len(), 117);
///
/// let tiny = fill_batch(&Sheet::new(1.0, 1.0).unwrap(), CookieVariant::peanut());
/// assert!(tiny.is_empty());
/// assert_eq!(tiny.status(), Err(BatchError::Empty));
/// ```
pub fn fill_batch(sheet: &Sheet, variant: CookieVariant) -> Batch {
    let capacity = sheet.capacity(&variant);
    let mut batch = Batch::new(variant, capacity);

    if capacity == 0 {
        warn!(
            variant = variant.type_name(),
            length = sheet.length(),
            width = sheet.width(),
            "no cookies fit on sheet"
        );
        return batch;
    }

    while batch.add_cookie() {}
    batch
}

impl Batch {
    /// Create an empty batch bounded by `capacity`
    fn new(variant: CookieVariant, capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant,
            capacity,
            cookies: Vec::with_capacity(capacity),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> &CookieVariant {
        &self.variant
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cookies.len() >= self.capacity
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Place one raw cookie on the sheet; `false` once the batch is full
    fn add_cookie(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.cookies.push(Cookie::new(self.variant));
        true
    }

    /// Advance every cookie by one minute
    pub fn bake_tick(&mut self) {
        for cookie in &mut self.cookies {
            cookie.bake();
        }
    }

    /// The representative cookie
    pub fn first(&self) -> Result<&Cookie, BatchError> {
        self.cookies.first().ok_or(BatchError::Empty)
    }

    pub fn elapsed_minutes(&self) -> Result<u32, BatchError> {
        Ok(self.first()?.elapsed_minutes())
    }

    pub fn status(&self) -> Result<BakeStatus, BatchError> {
        Ok(self.first()?.status()?)
    }

    pub fn type_name(&self) -> Result<&'static str, BatchError> {
        Ok(self.first()?.variant().type_name())
    }

    /// True when every cookie has baked for the same number of minutes
    pub fn is_lockstep(&self) -> bool {
        self.cookies
            .windows(2)
            .all(|pair| pair[0].elapsed_minutes() == pair[1].elapsed_minutes())
    }
}
