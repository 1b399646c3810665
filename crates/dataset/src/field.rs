//! Suffix-driven typed parsing of configuration cells.
//!
//! A configuration field's type is declared by a one- or two-character
//! suffix on its name in the row label: `##` selects float, `#` integer,
//! `^` a `(month, day)` date pair, and no suffix a plain string. The
//! two-character suffix is checked before the one-character one, so
//! `icu_fraction##` is a float field named `icu_fraction`.

use epicurves_calendar::parse_date_spec;

/// The closed set of cell types a configuration field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// No suffix: the raw cell text, unchanged.
    String,
    /// `#` suffix: a signed integer.
    Integer,
    /// `##` suffix: a floating-point number.
    Float,
    /// `^` suffix: a `<month>--<day>` date pair.
    DatePair,
}

/// A parsed configuration cell value, tagged with its type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Value of a [`FieldType::String`] field.
    String(String),
    /// Value of a [`FieldType::Integer`] field.
    Integer(i64),
    /// Value of a [`FieldType::Float`] field.
    Float(f64),
    /// Value of a [`FieldType::DatePair`] field.
    DatePair(u8, u8),
}

impl FieldType {
    /// Splits a raw field name into its declared type and canonical name,
    /// checking the two-character suffix before the one-character ones.
    pub fn split_suffix(raw: &str) -> (FieldType, &str) {
        if let Some(name) = raw.strip_suffix("##") {
            (FieldType::Float, name)
        } else if let Some(name) = raw.strip_suffix('#') {
            (FieldType::Integer, name)
        } else if let Some(name) = raw.strip_suffix('^') {
            (FieldType::DatePair, name)
        } else {
            (FieldType::String, raw)
        }
    }

    /// Human-readable type name used in conversion error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Integer => "an integer",
            FieldType::Float => "a number",
            FieldType::DatePair => "a date",
        }
    }

    /// Converts a raw cell to a [`FieldValue`] of this type, or `None`
    /// when the text does not convert. The caller attaches row/column
    /// context to the failure.
    pub fn parse(self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldType::String => Some(FieldValue::String(raw.to_string())),
            FieldType::Integer => raw.parse::<i64>().ok().map(FieldValue::Integer),
            FieldType::Float => raw.parse::<f64>().ok().map(FieldValue::Float),
            FieldType::DatePair => parse_date_spec(raw).map(|(m, d)| FieldValue::DatePair(m, d)),
        }
    }
}
