//! Validated primitive types shared by the patientor crates.
//!
//! Each type here can only be constructed through a checking constructor, so code holding one
//! can rely on its invariant without re-validating.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing calendar dates.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    /// The input was empty or contained only whitespace
    #[error("Date cannot be empty")]
    Empty,
    /// The input was not a valid `YYYY-MM-DD` calendar date
    #[error("Date must be a calendar date in YYYY-MM-DD format, got: '{0}'")]
    Malformed(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A calendar date exchanged as an ISO 8601 `YYYY-MM-DD` string.
///
/// Ordering follows the calendar, so `IsoDate` values can be compared directly when checking
/// date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a `YYYY-MM-DD` string after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Empty`] for blank input and [`DateError::Malformed`] when the text
    /// is not a real calendar date in the expected format.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DateError::Empty);
        }
        if !has_iso_shape(trimmed) {
            return Err(DateError::Malformed(trimmed.to_owned()));
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| DateError::Malformed(trimmed.to_owned()))
    }
}

/// `dddd-dd-dd`. chrono alone accepts short fields and a leading sign.
fn has_iso_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for IsoDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IsoDate::parse(s)
    }
}

impl serde::Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IsoDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Dr. House  ").expect("valid text");
        assert_eq!(text.as_str(), "Dr. House");
    }

    #[test]
    fn non_empty_text_rejects_blank_input() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty_string() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("should reject");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn iso_date_parses_and_displays_canonical_form() {
        let date = IsoDate::parse(" 2024-01-10 ").expect("valid date");
        assert_eq!(date.to_string(), "2024-01-10");
    }

    #[test]
    fn iso_date_rejects_impossible_dates() {
        assert!(matches!(
            IsoDate::parse("2024-02-30"),
            Err(DateError::Malformed(text)) if text == "2024-02-30"
        ));
        assert!(matches!(
            IsoDate::parse("10/01/2024"),
            Err(DateError::Malformed(_))
        ));
        assert_eq!(IsoDate::parse("   "), Err(DateError::Empty));
    }

    #[test]
    fn iso_date_rejects_short_or_signed_fields() {
        for input in ["2024-1-5", "24-01-10", "24-1-5", "1-01-10", "+2024-01-10", "2024-01-1O"] {
            assert!(
                matches!(IsoDate::parse(input), Err(DateError::Malformed(ref text)) if text == input),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn iso_date_orders_by_calendar() {
        let earlier = IsoDate::parse("2019-08-05").expect("valid date");
        let later = IsoDate::parse("2019-08-28").expect("valid date");
        assert!(earlier < later);
    }

    #[test]
    fn iso_date_serializes_as_string() {
        let date = IsoDate::parse("2015-01-02").expect("valid date");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, "\"2015-01-02\"");
        let back: IsoDate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, date);
    }
}
