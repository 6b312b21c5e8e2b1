//! Row and cell value types
//!
//! Rows arrive as JSON objects from whatever service backs the overview table.
//! Strings that parse as timestamps are also kept as [`FieldValue::Timestamp`]
//! so that date range filters compare chronologically instead of lexically.
//! Every cell keeps the text it arrived with; matching and export read that.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawValue", into = "RawValue")]
pub enum FieldValue {
    Text(String),
    Number(Number),
    /// Date-like text. `raw` is what the service sent, `at` orders it.
    Timestamp { raw: String, at: DateTime<Utc> },
}

/// Wire shape of a cell (JSON scalar)
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(Number),
    Bool(bool),
    Text(String),
}

impl From<RawValue> for FieldValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Number(n) => Self::Number(n),
            RawValue::Bool(b) => Self::Text(b.to_string()),
            RawValue::Text(s) => Self::parse(s),
        }
    }
}

impl From<FieldValue> for RawValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Number(n) => Self::Number(n),
            FieldValue::Text(s) | FieldValue::Timestamp { raw: s, .. } => Self::Text(s),
        }
    }
}

impl FieldValue {
    /// Build a value from a string, recognizing timestamps
    pub fn parse(s: impl Into<String>) -> Self {
        let s = s.into();
        match parse_timestamp(&s) {
            Some(at) => Self::Timestamp { raw: s, at },
            None => Self::Text(s),
        }
    }

    /// Convert a JSON scalar. Null, arrays and objects have no cell value.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::parse(s.as_str())),
            serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
            serde_json::Value::Bool(b) => Some(Self::Text(b.to_string())),
            _ => None,
        }
    }

    /// Text as received, used for substring/equality matching and export cells
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) | Self::Timestamp { raw: s, .. } => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// Values only order against values of the same kind
impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => compare_numbers(a, b),
            (Self::Timestamp { at: a, .. }, Self::Timestamp { at: b, .. }) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Integers compare exactly; anything else falls back to f64
fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON number and are kept as text
impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(n.to_string()))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp {
            raw: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            at,
        }
    }
}

/// Parse an RFC 3339 timestamp, a bare `YYYY-MM-DD` date (midnight UTC) or
/// an OData v2 `/Date(<ms>[±hhmm])/` literal
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(at) = parse_odata_date(s) {
        return Some(at);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The milliseconds are UTC; a trailing offset only records the sender's zone.
fn parse_odata_date(s: &str) -> Option<DateTime<Utc>> {
    let inner = s.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let split = inner
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '+' || c == '-')
        .map_or(inner.len(), |(i, _)| i);
    let (millis, offset) = inner.split_at(split);

    let valid_offset = offset.is_empty()
        || (offset.len() == 5 && offset[1..].bytes().all(|b| b.is_ascii_digit()));
    if !valid_offset {
        return None;
    }
    DateTime::from_timestamp_millis(millis.parse().ok()?)
}

/// One request record, keyed by field name. Read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Display text of a field, if present
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.fields.get(field).map(FieldValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Non-scalar and null members are dropped rather than rejected, so service
/// metadata (`__metadata`, navigation properties) does not break loading.
impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .iter()
            .filter_map(|(k, v)| FieldValue::from_json(v).map(|value| (k.clone(), value)))
            .collect())
    }
}
