//! Field-level change computation
//!
//! Compares a partial new state against the prior state of an entity and
//! produces one [`ChangeRecord`] per field that actually changed. Only keys
//! present in the new state are considered; omitted fields are untouched and
//! never reported. Floats compare with a tolerance to absorb
//! serialization round-trip noise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Float comparison tolerance (serialize/deserialize precision loss)
const FLOAT_EPSILON: f64 = 1e-9;

/// A field value as it appears in an audit diff.
///
/// Typed replacement for the loosely-shaped values the entities carry:
/// everything a ticket or order field can hold collapses into one of these.
/// Compound values (arrays, nested objects) are kept as their JSON text so a
/// change to any part of them is still visible in the trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&Value> for ChangeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ChangeValue::Null,
            Value::Bool(b) => ChangeValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ChangeValue::Int(i),
                None => ChangeValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => ChangeValue::Text(s.clone()),
            compound => ChangeValue::Text(compound.to_string()),
        }
    }
}

impl ChangeValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            ChangeValue::Int(i) => Some(*i as f64),
            ChangeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Equality with float tolerance; `Int(2)` and `Float(2.0)` are equal
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() < FLOAT_EPSILON,
            _ => self == other,
        }
    }
}

/// One field's mutation: `{field, old_value, new_value}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub field: String,
    pub old_value: ChangeValue,
    pub new_value: ChangeValue,
}

/// Compute the change set between a prior state and a partial new state.
///
/// Iterates the keys of `new` only. A key absent from `old` diffs against
/// null, so newly introduced fields are reported. An empty result means the
/// update is a no-op and must not be committed as a history entry.
pub fn compute_changes(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for (key, new_val) in new {
        let old_val = old.get(key).cloned().unwrap_or(Value::Null);
        let old_cv = ChangeValue::from(&old_val);
        let new_cv = ChangeValue::from(new_val);

        if !old_cv.loosely_equals(&new_cv) {
            changes.push(ChangeRecord {
                field: key.clone(),
                old_value: old_cv,
                new_value: new_cv,
            });
        }
    }

    changes
}
