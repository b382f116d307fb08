//! Defensive parsing of the duck-typed lookup payload.
//!
//! The remote API promises nothing statically: the response is a JSON object
//! whose values are scalars or lists of scalars, keyed by record type or
//! attribute name (`a`, `aaaa`, `mx`, `ns`, `domain`, …). Everything is
//! validated at this boundary before any rendering happens.
//!
//! Values pass through unmodified; in particular, large numbers are never
//! reinterpreted as Unix timestamps.

use serde_json::Value;

use crate::{Error, Result};

/// One value in a record set: either a single scalar or a list of scalars,
/// already rendered to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
  Scalar(String),
  List(Vec<String>),
}

/// One named record group, e.g. `("a", ["93.184.216.34"])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub name:  String,
  pub value: RecordValue,
}

/// The parsed lookup response: every top-level key of the payload, in the
/// order the parser saw them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
  records: Vec<Record>,
}

impl RecordSet {
  /// Convert a raw JSON body into a record set.
  ///
  /// Rules:
  /// - the body must be an object;
  /// - a top-level `"error"` string means the remote reported a failure,
  ///   even though the HTTP status was OK;
  /// - list values keep their scalar elements and drop anything nested;
  /// - scalar values are kept as-is; `null` and nested objects are skipped.
  pub fn from_json(body: Value) -> Result<Self> {
    let Value::Object(map) = body else {
      return Err(Error::Malformed("expected a JSON object"));
    };

    if let Some(Value::String(msg)) = map.get("error") {
      return Err(Error::Remote(msg.clone()));
    }

    let mut records = Vec::with_capacity(map.len());
    for (name, value) in map {
      let value = match value {
        Value::Array(items) => {
          RecordValue::List(items.iter().filter_map(render_scalar).collect())
        }
        ref scalar => match render_scalar(scalar) {
          Some(s) => RecordValue::Scalar(s),
          None => continue,
        },
      };
      records.push(Record { name, value });
    }

    Ok(Self { records })
  }

  pub fn records(&self) -> &[Record] { &self.records }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

fn render_scalar(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
