//! Baking sheet geometry
//!
//! Cookies are laid out on a square grid: each one occupies a
//! `diameter x diameter` cell, so a side fits `floor(side / diameter)` of them.

use crate::models::variant::CookieVariant;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SheetError {
    #[error("Sheet dimensions must be positive and finite, got {length} x {width}")]
    InvalidDimensions { length: f64, width: f64 },

    #[error("Sheet {length} x {width} exceeds the {max} inch limit per side")]
    TooLarge { length: f64, width: f64, max: f64 },
}

/// Baking sheet, dimensions in inches
///
/// # Example
/// ```
/// use oven_core::{CookieVariant, Sheet};
///
/// let sheet = Sheet::new(26.0, 18.0).unwrap();
/// assert_eq!(sheet.capacity(&CookieVariant::peanut()), 117);
/// assert_eq!(sheet.capacity(&CookieVariant::chocolate_chip()), 48);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sheet {
    length: f64,
    width: f64,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            width: Self::DEFAULT_WIDTH,
        }
    }
}

impl Sheet {
    /// Full-size sheet: 26" x 18"
    pub const DEFAULT_LENGTH: f64 = 26.0;
    pub const DEFAULT_WIDTH: f64 = 18.0;

    /// Longest accepted side, in inches
    ///
    /// Keeps every batch small enough to hold in memory: at most
    /// 500 x 500 peanut cookies.
    pub const MAX_SIDE: f64 = 1_000.0;

    pub fn new(length: f64, width: f64) -> Result<Self, SheetError> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if !valid(length) || !valid(width) {
            return Err(SheetError::InvalidDimensions { length, width });
        }
        if length > Self::MAX_SIDE || width > Self::MAX_SIDE {
            return Err(SheetError::TooLarge {
                length,
                width,
                max: Self::MAX_SIDE,
            });
        }
        Ok(Self { length, width })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Maximum number of `variant` cookies that fit on this sheet
    ///
    /// Zero when the diameter exceeds either side.
    pub fn capacity(&self, variant: &CookieVariant) -> usize {
        let diameter = variant.diameter();
        // Sides are capped at MAX_SIDE, so this never actually saturates.
        cookies_along(self.length, diameter).saturating_mul(cookies_along(self.width, diameter))
    }
}

fn cookies_along(side: f64, diameter: f64) -> usize {
    // Both operands are positive, so floor truncates toward zero.
    (side / diameter).floor() as usize
}
