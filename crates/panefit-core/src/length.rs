#![forbid(unsafe_code)]

//! CSS-like length values for panel widths.
//!
//! Panel configuration carries widths as short strings such as `"300px"`,
//! `"20%"`, or `"1.5rem"`. This module parses them into a [`CssLength`]
//! and resolves them to pixels against a container width.
//!
//! # Grammar
//!
//! ```text
//! length := number unit?
//! number := [0-9.]+
//! unit   := "px" | "%" | "rem" | "em"
//! ```
//!
//! A missing unit means pixels. Signs, exponents, surrounding whitespace,
//! and numbers too large to be finite are rejected, so every parsed length
//! is finite and non-negative.
//!
//! # Resolution
//!
//! | Unit | Pixels |
//! |------|--------|
//! | `px` | value |
//! | `%`  | value / 100 × container |
//! | `rem`, `em` | value × [`REM_PX`] |
//!
//! # Example
//!
//! ```
//! use panefit_core::length::{CssLength, resolve_width};
//!
//! let w: CssLength = "20%".parse().unwrap();
//! assert_eq!(w.resolve(1000.0), 200.0);
//!
//! // The lenient form reads the leading number and maps anything
//! // unparseable to 0.
//! assert_eq!(resolve_width(Some("1.2.3px"), 1000.0), 1.2);
//! assert_eq!(resolve_width(Some("wide"), 1000.0), 0.0);
//! assert_eq!(resolve_width(None, 1000.0), 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root font size assumed when resolving `rem` and `em` lengths.
pub const REM_PX: f64 = 16.0;

/// Unit suffix of a [`CssLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Device pixels (also the meaning of a bare number).
    #[default]
    Px,
    /// Percentage of the container width.
    Percent,
    /// Multiples of the root font size.
    Rem,
    /// Multiples of the font size (treated like `rem`).
    Em,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Rem => "rem",
            Self::Em => "em",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "px" => Some(Self::Px),
            "%" => Some(Self::Percent),
            "rem" => Some(Self::Rem),
            "em" => Some(Self::Em),
            _ => None,
        }
    }
}

/// A parsed, non-negative length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssLength {
    value: f64,
    unit: LengthUnit,
}

impl CssLength {
    /// Zero pixels.
    pub const ZERO: Self = Self::px(0.0);

    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// A percentage of the container width.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    /// A length in root-font-size units.
    #[must_use]
    pub const fn rem(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Rem,
        }
    }

    /// Parse a length string.
    pub fn parse(input: &str) -> Result<Self, LengthParseError> {
        if input.is_empty() {
            return Err(LengthParseError::Empty);
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(input.len());
        let (number, suffix) = input.split_at(split);

        if number.is_empty() {
            return Err(LengthParseError::MissingNumber {
                input: input.to_owned(),
            });
        }
        let Some(unit) = LengthUnit::from_suffix(suffix) else {
            return Err(LengthParseError::UnknownUnit {
                input: input.to_owned(),
                unit: suffix.to_owned(),
            });
        };
        let value = number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LengthParseError::MalformedNumber {
                input: input.to_owned(),
            })?;

        Ok(Self { value, unit })
    }

    /// Parse the way a browser-side `parseFloat` reads a width: the number
    /// is the longest valid prefix of the digit-and-dot run, so `"1.2.3px"`
    /// is `1.2px`. Returns `None` where [`parse`](Self::parse) would report
    /// a missing number or unknown unit.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(input.len());
        let (number, suffix) = input.split_at(split);
        let unit = LengthUnit::from_suffix(suffix)?;
        let value = leading_float(number)?;
        Some(Self { value, unit })
    }

    /// Numeric part as written.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// Unit as written.
    #[must_use]
    pub const fn unit(self) -> LengthUnit {
        self.unit
    }

    /// Whether this length depends on the container width.
    #[must_use]
    pub fn is_relative(self) -> bool {
        self.unit == LengthUnit::Percent
    }

    /// Resolve to pixels against `container_px`.
    #[must_use]
    pub fn resolve(self, container_px: f64) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Percent => self.value / 100.0 * container_px,
            LengthUnit::Rem | LengthUnit::Em => self.value * REM_PX,
        }
    }
}

impl Default for CssLength {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for CssLength {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CssLength {
    type Error = LengthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CssLength> for String {
    fn from(value: CssLength) -> Self {
        value.to_string()
    }
}

/// Resolve an optional width string, mapping anything unparseable to `0`.
///
/// This is the forgiving path used while rendering: a bad width collapses
/// the panel instead of failing the layout.
#[must_use]
pub fn resolve_width(width: Option<&str>, container_px: f64) -> f64 {
    width
        .and_then(CssLength::parse_lenient)
        .map_or(0.0, |len| len.resolve(container_px))
}

/// Float prefix of a run of ASCII digits and dots, up to the second dot.
fn leading_float(digits: &str) -> Option<f64> {
    let end = digits.find('.').map_or(digits.len(), |dot| {
        digits[dot + 1..]
            .find('.')
            .map_or(digits.len(), |next| dot + 1 + next)
    });
    digits[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Why a length string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthParseError {
    /// The string was empty.
    Empty,
    /// No leading digits.
    MissingNumber { input: String },
    /// Digits and dots that do not form a number (e.g. `"1.2.3"`).
    MalformedNumber { input: String },
    /// Suffix is not one of `px`, `%`, `rem`, `em`.
    UnknownUnit { input: String, unit: String },
}

impl fmt::Display for LengthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty length"),
            Self::MissingNumber { input } => write!(f, "length {input:?} has no number"),
            Self::MalformedNumber { input } => {
                write!(f, "length {input:?} has a malformed number")
            }
            Self::UnknownUnit { input, unit } => {
                write!(f, "length {input:?} has unknown unit {unit:?}")
            }
        }
    }
}

impl std::error::Error for LengthParseError {}
