//! Cookie variant catalog
//!
//! Each variant has a fixed diameter (inches) and a status table that maps
//! elapsed bake minutes to a [`BakeStatus`].
//!
//! # Critical Invariants
//!
//! 1. Status tables are ordered, contiguous and disjoint
//! 2. The first range starts at minute 0
//! 3. The last range is unbounded above (`max == None`), so every
//!    non-negative minute count classifies to exactly one status

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bake status label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BakeStatus {
    Doughy,
    AlmostReady,
    Ready,
    Burned,
}

impl BakeStatus {
    /// Stable lowercase label (`doughy`, `almost_ready`, `ready`, `burned`)
    pub fn label(&self) -> &'static str {
        match self {
            BakeStatus::Doughy => "doughy",
            BakeStatus::AlmostReady => "almost_ready",
            BakeStatus::Ready => "ready",
            BakeStatus::Burned => "burned",
        }
    }
}

impl fmt::Display for BakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised by status table lookup or validation
///
/// Either variant indicates a catalog bug rather than bad user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusTableError {
    #[error("No status range covers {minutes} minutes")]
    Uncovered { minutes: u32 },

    #[error("Malformed status table: {reason}")]
    Malformed { reason: String },
}

/// One `[min, max]` row of a status table
///
/// `max == None` marks the open-ended top range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRange {
    pub min: u32,
    pub max: Option<u32>,
    pub status: BakeStatus,
}

impl StatusRange {
    pub const fn bounded(min: u32, max: u32, status: BakeStatus) -> Self {
        Self {
            min,
            max: Some(max),
            status,
        }
    }

    pub const fn unbounded(min: u32, status: BakeStatus) -> Self {
        Self {
            min,
            max: None,
            status,
        }
    }

    /// Inclusive on both ends; the unbounded range accepts everything from `min` up
    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && self.max.map_or(true, |max| minutes <= max)
    }
}

/// Ordered sequence of status ranges
///
/// # Example
/// ```
/// use oven_core::models::variant::{BakeStatus, StatusRange, StatusTable};
///
/// static RANGES: [StatusRange; 2] = [
///     StatusRange::bounded(0, 4, BakeStatus::Doughy),
///     StatusRange::unbounded(5, BakeStatus::Burned),
/// ];
/// let table = StatusTable::new(&RANGES);
///
/// assert!(table.validate().is_ok());
/// assert_eq!(table.status_of(4), Ok(BakeStatus::Doughy));
/// assert_eq!(table.status_of(500), Ok(BakeStatus::Burned));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTable {
    ranges: &'static [StatusRange],
}

impl StatusTable {
    pub const fn new(ranges: &'static [StatusRange]) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &'static [StatusRange] {
        self.ranges
    }

    /// Classify `minutes` by linear scan, returning the first matching range's status
    pub fn status_of(&self, minutes: u32) -> Result<BakeStatus, StatusTableError> {
        self.ranges
            .iter()
            .find(|range| range.contains(minutes))
            .map(|range| range.status)
            .ok_or(StatusTableError::Uncovered { minutes })
    }

    /// Check that the table covers every non-negative minute exactly once
    pub fn validate(&self) -> Result<(), StatusTableError> {
        let malformed =
            |reason: String| -> Result<(), StatusTableError> { Err(StatusTableError::Malformed { reason }) };

        let Some(first) = self.ranges.first() else {
            return malformed("table has no ranges".to_string());
        };
        if first.min != 0 {
            return malformed(format!("first range starts at {} instead of 0", first.min));
        }

        let mut expected_min = 0u32;
        for (index, range) in self.ranges.iter().enumerate() {
            if range.min != expected_min {
                return malformed(format!(
                    "range {} starts at {} but {} was expected",
                    index, range.min, expected_min
                ));
            }
            match range.max {
                Some(max) if max < range.min => {
                    return malformed(format!(
                        "range {} ends at {} before it starts at {}",
                        index, max, range.min
                    ));
                }
                Some(max) => match max.checked_add(1) {
                    Some(next) => expected_min = next,
                    None => return malformed("bounded range reaches u32::MAX".to_string()),
                },
                None if index + 1 != self.ranges.len() => {
                    return malformed(format!("unbounded range {} is not the last one", index));
                }
                None => return Ok(()),
            }
        }

        malformed("last range is bounded above".to_string())
    }
}

static PEANUT_RANGES: [StatusRange; 4] = [
    StatusRange::bounded(0, 8, BakeStatus::Doughy),
    StatusRange::bounded(9, 10, BakeStatus::AlmostReady),
    StatusRange::bounded(11, 15, BakeStatus::Ready),
    StatusRange::unbounded(16, BakeStatus::Burned),
];

static CHOCOLATE_CHIP_RANGES: [StatusRange; 4] = [
    StatusRange::bounded(0, 17, BakeStatus::Doughy),
    StatusRange::bounded(18, 19, BakeStatus::AlmostReady),
    StatusRange::bounded(20, 25, BakeStatus::Ready),
    StatusRange::unbounded(26, BakeStatus::Burned),
];

static PEANUT_TABLE: StatusTable = StatusTable::new(&PEANUT_RANGES);
static CHOCOLATE_CHIP_TABLE: StatusTable = StatusTable::new(&CHOCOLATE_CHIP_RANGES);

pub const DEFAULT_NUM_PEANUTS: u32 = 5;
pub const DEFAULT_NUM_CHIPS: u32 = 8;

fn default_num_peanuts() -> u32 {
    DEFAULT_NUM_PEANUTS
}

fn default_num_chips() -> u32 {
    DEFAULT_NUM_CHIPS
}

/// Cookie kind
///
/// The peanut and chip counts are cosmetic: they never change diameter,
/// capacity or status classification.
///
/// # Example
/// ```
/// use oven_core::{BakeStatus, CookieVariant};
///
/// let peanut = CookieVariant::peanut();
/// assert_eq!(peanut.type_name(), "peanut");
/// assert_eq!(peanut.diameter(), 2.0);
/// assert_eq!(peanut.status_of(9), Ok(BakeStatus::AlmostReady));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CookieVariant {
    Peanut {
        #[serde(default = "default_num_peanuts")]
        num_peanuts: u32,
    },
    ChocolateChip {
        #[serde(default = "default_num_chips")]
        num_chips: u32,
    },
}

impl Default for CookieVariant {
    fn default() -> Self {
        Self::peanut()
    }
}

impl CookieVariant {
    pub fn peanut() -> Self {
        CookieVariant::Peanut {
            num_peanuts: DEFAULT_NUM_PEANUTS,
        }
    }

    pub fn chocolate_chip() -> Self {
        CookieVariant::ChocolateChip {
            num_chips: DEFAULT_NUM_CHIPS,
        }
    }

    /// Every variant in the catalog, with default cosmetic attributes
    pub fn catalog() -> [CookieVariant; 2] {
        [Self::peanut(), Self::chocolate_chip()]
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CookieVariant::Peanut { .. } => "peanut",
            CookieVariant::ChocolateChip { .. } => "chocolate chip",
        }
    }

    /// Diameter in inches
    pub fn diameter(&self) -> f64 {
        match self {
            CookieVariant::Peanut { .. } => 2.0,
            CookieVariant::ChocolateChip { .. } => 3.0,
        }
    }

    pub fn status_table(&self) -> &'static StatusTable {
        match self {
            CookieVariant::Peanut { .. } => &PEANUT_TABLE,
            CookieVariant::ChocolateChip { .. } => &CHOCOLATE_CHIP_TABLE,
        }
    }

    pub fn status_of(&self, elapsed_minutes: u32) -> Result<BakeStatus, StatusTableError> {
        self.status_table().status_of(elapsed_minutes)
    }
}

impl fmt::Display for CookieVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieVariant::Peanut { num_peanuts } => {
                write!(f, "{} ({} peanuts)", self.type_name(), num_peanuts)
            }
            CookieVariant::ChocolateChip { num_chips } => {
                write!(f, "{} ({} chips)", self.type_name(), num_chips)
            }
        }
    }
}
