//! Outcome tiers and their numeric encoding.
//!
//! The grey model works on real numbers, so every tier is mapped onto a
//! consecutive integer (11..=15). Ordering of the encoded values follows
//! the tier ordering, which lets the allocation pass compare scores
//! directly against tier thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest encoded value (Not-Participated).
pub const ENCODED_MIN: u8 = 11;
/// Highest encoded value (Gold).
pub const ENCODED_MAX: u8 = 15;

/// Five ordered outcome tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Not Participated")]
    NotParticipated,
    #[serde(rename = "No Medal")]
    NoMedal,
    Bronze,
    Silver,
    Gold,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown category label: {0}")]
pub struct ParseCategoryError(pub String);

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NotParticipated,
        Category::NoMedal,
        Category::Bronze,
        Category::Silver,
        Category::Gold,
    ];

    /// Integer encoding used by the forecaster.
    pub fn encode(self) -> u8 {
        match self {
            Category::NotParticipated => 11,
            Category::NoMedal => 12,
            Category::Bronze => 13,
            Category::Silver => 14,
            Category::Gold => 15,
        }
    }

    /// Map a forecast score back to a tier using the midpoints between
    /// encodings. Scores sitting exactly on a midpoint resolve upward.
    /// NaN falls through every comparison and lands on Not-Participated.
    pub fn decode(score: f64) -> Category {
        if score >= 14.5 {
            Category::Gold
        } else if score >= 13.5 {
            Category::Silver
        } else if score >= 12.5 {
            Category::Bronze
        } else if score >= 11.5 {
            Category::NoMedal
        } else {
            Category::NotParticipated
        }
    }

    pub fn is_medal(self) -> bool {
        matches!(self, Category::Gold | Category::Silver | Category::Bronze)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::NotParticipated => "Not Participated",
            Category::NoMedal => "No Medal",
            Category::Bronze => "Bronze",
            Category::Silver => "Silver",
            Category::Gold => "Gold",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

/// Encode a raw outcome label from a historical record.
///
/// Only the three medal labels are recognised; anything else, including a
/// missing or blank label, counts as a competed-without-medal result.
pub fn encode_outcome(label: Option<&str>) -> u8 {
    match label.map(str::trim) {
        Some("Gold") => Category::Gold.encode(),
        Some("Silver") => Category::Silver.encode(),
        Some("Bronze") => Category::Bronze.encode(),
        _ => Category::NoMedal.encode(),
    }
}

/// Value substituted for a historical period with no record.
///
/// Always the Not-Participated encoding; the participation count is
/// accepted so callers do not change if the rule ever depends on it.
pub fn missing_period_value(_participation_count: usize) -> u8 {
    Category::NotParticipated.encode()
}
