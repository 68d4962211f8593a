//! Flat record types produced by the readers.
//!
//! Every record exposes the same contract through [`Record`]: an ordered
//! list of raw values, the parallel list of field names, a `name:value`
//! display form and an unquoted CSV line.
//!
//! # CSV limitation
//!
//! Values are joined with commas as-is. A class name or caption containing a
//! comma produces a line with extra columns; nothing is quoted or escaped.

mod annotation;
mod caption;
mod label;

use std::fmt;

pub use annotation::Annotation;
pub use caption::Caption;
pub use label::{Label, ERROR_PREFIX};

/// Default marker used for files that parse to zero entries.
pub const DEFAULT_EMPTY_MARKER: &str = "NULL";

/// A single raw field value of a record.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Int(value) => write!(f, "{value}"),
            // Debug keeps the fractional part, so 442.0 stays "442.0".
            RawValue::Float(value) => write!(f, "{value:?}"),
        }
    }
}

/// The shared contract of annotation and caption records.
pub trait Record {
    /// Field names, parallel to [`Record::raw`].
    const FIELDS: &'static [&'static str];

    /// Ordered raw field values.
    fn raw(&self) -> Vec<RawValue>;

    /// Image (or source) file this record belongs to.
    fn filename(&self) -> &str;

    /// The class name or caption text of the record.
    fn label(&self) -> &Label;

    fn raw_attributes() -> &'static [&'static str] {
        Self::FIELDS
    }

    /// Header line: the comma-joined field names.
    fn csv_header() -> String {
        Self::FIELDS.join(",")
    }

    /// Comma-joined raw values, unquoted.
    fn csv(&self) -> String {
        self.raw_strings().join(",")
    }

    fn raw_strings(&self) -> Vec<String> {
        self.raw().iter().map(ToString::to_string).collect()
    }
}

/// Writes `name1:value1,name2:value2,...` for a record.
pub(crate) fn fmt_named<R: Record>(record: &R, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, (name, value)) in R::FIELDS.iter().zip(record.raw()).enumerate() {
        if idx > 0 {
            f.write_str(",")?;
        }
        write!(f, "{name}:{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_values_keep_fractional_part() {
        assert_eq!(RawValue::Float(442.0).to_string(), "442.0");
        assert_eq!(RawValue::Float(346.5).to_string(), "346.5");
        assert_eq!(RawValue::Int(-3).to_string(), "-3");
        assert_eq!(RawValue::Text("knife".into()).to_string(), "knife");
    }

    #[test]
    fn csv_header_matches_raw_attributes() {
        assert_eq!(
            Annotation::csv_header(),
            Annotation::raw_attributes().join(",")
        );
        assert_eq!(Caption::csv_header(), "file,caption");
    }
}
