//! Cell value types and their ODF attribute encoding

use std::fmt;

/// The typed value of a cell, as carried by `office:value-type` and the
/// value attribute that goes with it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// No value and no text
    Empty,
    /// `office:value-type="float"`
    Float(f64),
    /// `office:value-type="percentage"`, stored as a fraction (0.5 = 50%)
    Percentage(f64),
    /// `office:value-type="currency"` with its ISO 4217 code, when present
    Currency { value: f64, currency: Option<String> },
    /// `office:value-type="date"`, the raw ISO 8601 `office:date-value`
    Date(String),
    /// `office:value-type="time"`, the raw ISO 8601 duration `office:time-value`
    Time(String),
    /// `office:value-type="boolean"`
    Boolean(bool),
    /// `office:value-type="string"`, or any cell with text but no typed value
    String(String),
}

impl CellValue {
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The `office:value-type` token, `None` for empty cells
    pub fn value_type(&self) -> Option<&'static str> {
        match self {
            CellValue::Empty => None,
            CellValue::Float(_) => Some("float"),
            CellValue::Percentage(_) => Some("percentage"),
            CellValue::Currency { .. } => Some("currency"),
            CellValue::Date(_) => Some("date"),
            CellValue::Time(_) => Some("time"),
            CellValue::Boolean(_) => Some("boolean"),
            CellValue::String(_) => Some("string"),
        }
    }

    /// Numeric view of the value, where one exists
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) | CellValue::Percentage(n) => Some(*n),
            CellValue::Currency { value, .. } => Some(*value),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Decode from a cell's attributes and its paragraph text
    ///
    /// `attr` looks up an attribute on the cell element. Unknown value types
    /// fall back to the text, and so do numeric types whose value attribute
    /// does not parse.
    pub fn from_attributes<'a, F>(attr: F, text: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let number = |key: &str| attr(key).and_then(|v| v.trim().parse::<f64>().ok());
        let fallback = |text: Option<String>| match text {
            Some(t) => CellValue::String(t),
            None => CellValue::Empty,
        };

        match attr("office:value-type") {
            Some("float") => number("office:value")
                .map(CellValue::Float)
                .unwrap_or_else(|| fallback(text)),
            Some("percentage") => number("office:value")
                .map(CellValue::Percentage)
                .unwrap_or_else(|| fallback(text)),
            Some("currency") => match number("office:value") {
                Some(value) => CellValue::Currency {
                    value,
                    currency: attr("office:currency").map(str::to_string),
                },
                None => fallback(text),
            },
            Some("date") => match attr("office:date-value") {
                Some(d) => CellValue::Date(d.to_string()),
                None => fallback(text),
            },
            Some("time") => match attr("office:time-value") {
                Some(t) => CellValue::Time(t.to_string()),
                None => fallback(text),
            },
            Some("boolean") => match attr("office:boolean-value") {
                Some(b) => CellValue::Boolean(b.eq_ignore_ascii_case("true")),
                None => fallback(text),
            },
            Some("string") => CellValue::String(
                attr("office:string-value")
                    .map(str::to_string)
                    .or(text)
                    .unwrap_or_default(),
            ),
            _ => fallback(text),
        }
    }

    /// Attributes that encode this value on a cell, excluding the display text
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(t) = self.value_type() {
            out.push(("office:value-type", t.to_string()));
        }
        match self {
            CellValue::Float(n) | CellValue::Percentage(n) => {
                out.push(("office:value", n.to_string()));
            }
            CellValue::Currency { value, currency } => {
                out.push(("office:value", value.to_string()));
                if let Some(c) = currency {
                    out.push(("office:currency", c.clone()));
                }
            }
            CellValue::Date(d) => out.push(("office:date-value", d.clone())),
            CellValue::Time(t) => out.push(("office:time-value", t.clone())),
            CellValue::Boolean(b) => out.push(("office:boolean-value", b.to_string())),
            CellValue::Empty | CellValue::String(_) => {}
        }
        out
    }
}

impl fmt::Display for CellValue {
    /// The text a spreadsheet shows in the cell's paragraph by default
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Percentage(n) => write!(f, "{}%", n * 100.0),
            CellValue::Currency {
                value,
                currency: Some(c),
            } => write!(f, "{} {}", value, c),
            CellValue::Currency { value, .. } => write!(f, "{}", value),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::Boolean(true) => write!(f, "TRUE"),
            CellValue::Boolean(false) => write!(f, "FALSE"),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Float(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}
