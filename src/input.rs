//! Search keyword resolution from typed text or a scanned barcode payload.

use crate::error::ScoutError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Text,
    Barcode,
}

/// A validated, non-empty search keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub value: String,
    pub origin: Origin,
}

impl Keyword {
    /// Keyword typed by the user.
    pub fn from_text(text: &str) -> Result<Self, ScoutError> {
        let value = text.trim();
        if value.is_empty() {
            return Err(ScoutError::EmptyKeyword);
        }
        Ok(Self { value: value.to_string(), origin: Origin::Text })
    }

    /// Keyword decoded from a barcode scan.
    ///
    /// All-digit payloads of EAN-8, UPC-A (12) or EAN-13/JAN (13) length
    /// must carry a valid GS1 check digit. Other payloads (QR text, ISBN
    /// with hyphens) are used as-is once trimmed.
    pub fn from_barcode(payload: &str) -> Result<Self, ScoutError> {
        let value = payload.trim();
        if value.is_empty() {
            return Err(ScoutError::Barcode(payload.to_string()));
        }

        let is_numeric = value.chars().all(|c| c.is_ascii_digit());
        if is_numeric && matches!(value.len(), 8 | 12 | 13) && !gs1_check_digit_valid(value) {
            return Err(ScoutError::Barcode(value.to_string()));
        }

        Ok(Self { value: value.to_string(), origin: Origin::Barcode })
    }

    /// Resolves a keyword from whichever input was given; barcode wins.
    pub fn resolve(text: Option<&str>, barcode: Option<&str>) -> Result<Self, ScoutError> {
        match (barcode, text) {
            (Some(payload), _) => Self::from_barcode(payload),
            (None, Some(text)) => Self::from_text(text),
            (None, None) => Err(ScoutError::EmptyKeyword),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Validates the trailing GS1 mod-10 check digit of a numeric code.
fn gs1_check_digit_valid(code: &str) -> bool {
    let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
    let Some((&check, body)) = digits.split_last() else {
        return false;
    };

    // Weights alternate 3,1,3,... starting from the digit next to the check digit
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();

    (10 - sum % 10) % 10 == check
}
