use std::fmt;

use serde::Serialize;

use super::{fmt_named, Label, RawValue, Record};

/// One bounding box read from a VOC annotation file.
///
/// The center is always derived from the corners; there is no way to set it
/// independently. Corners are stored as read, `xmin <= xmax` is not enforced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(rename = "file")]
    filename: String,
    xmin: i64,
    ymin: i64,
    xmax: i64,
    ymax: i64,
    center_x: f64,
    center_y: f64,
    class_name: Label,
}

impl Annotation {
    /// Creates an annotation for a labelled box.
    pub fn new(
        filename: impl Into<String>,
        xmin: i64,
        ymin: i64,
        xmax: i64,
        ymax: i64,
        class_name: impl Into<String>,
    ) -> Self {
        Self::with_label(
            filename,
            [xmin, ymin, xmax, ymax],
            Label::Value(class_name.into()),
        )
    }

    /// Placeholder for a file without any `<object>`.
    pub fn empty(filename: impl Into<String>, marker: impl Into<String>) -> Self {
        Self::with_label(filename, [0; 4], Label::Empty(marker.into()))
    }

    /// Placeholder for a file that could not be parsed.
    pub fn error(filename: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_label(filename, [0; 4], Label::Error(description.into()))
    }

    fn with_label(
        filename: impl Into<String>,
        [xmin, ymin, xmax, ymax]: [i64; 4],
        class_name: Label,
    ) -> Self {
        Self {
            filename: filename.into(),
            xmin,
            ymin,
            xmax,
            ymax,
            center_x: midpoint(xmin, xmax),
            center_y: midpoint(ymin, ymax),
            class_name,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn xmin(&self) -> i64 {
        self.xmin
    }

    pub fn ymin(&self) -> i64 {
        self.ymin
    }

    pub fn xmax(&self) -> i64 {
        self.xmax
    }

    pub fn ymax(&self) -> i64 {
        self.ymax
    }

    pub fn center_x(&self) -> f64 {
        self.center_x
    }

    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    pub fn class_name(&self) -> &Label {
        &self.class_name
    }
}

// Widened so corners anywhere in the i64 range cannot overflow the sum.
fn midpoint(a: i64, b: i64) -> f64 {
    (i128::from(a) + i128::from(b)) as f64 / 2.0
}

impl Record for Annotation {
    const FIELDS: &'static [&'static str] = &[
        "file",
        "xmin",
        "ymin",
        "xmax",
        "ymax",
        "center_x",
        "center_y",
        "class_name",
    ];

    fn raw(&self) -> Vec<RawValue> {
        vec![
            RawValue::Text(self.filename.clone()),
            RawValue::Int(self.xmin),
            RawValue::Int(self.ymin),
            RawValue::Int(self.xmax),
            RawValue::Int(self.ymax),
            RawValue::Float(self.center_x),
            RawValue::Float(self.center_y),
            RawValue::Text(self.class_name.to_string()),
        ]
    }

    fn filename(&self) -> &str {
        &self.filename
    }

    fn label(&self) -> &Label {
        &self.class_name
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_named(self, f)
    }
}
