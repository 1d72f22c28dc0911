use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ordered::OrderedMap;

/// One `{value, evidence}` pair attached to a target or an instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub evidence: Option<String>,
}

impl Evidence {
    /// Display text for `value`.
    ///
    /// `null`, absent and blank strings have no display text.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("Yes".to_string()),
            Value::Bool(false) => Some("No".to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn evidence_text(&self) -> Option<&str> {
        self.evidence
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instruments: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: OrderedMap<Evidence>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subsidies: OrderedMap<Evidence>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub taxes: OrderedMap<Evidence>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rd: OrderedMap<Evidence>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other: Vec<String>,
}

impl PolicyRecord {
    pub fn has_instrument(&self, code: &str) -> bool {
        self.instruments.iter().any(|c| c == code)
    }

    /// Union of `subsidies`, `taxes` and `rd`, in that order.
    ///
    /// A key present in several mappings keeps its first position and takes the
    /// value of the last mapping that defines it.
    pub fn merged_instruments(&self) -> OrderedMap<&Evidence> {
        let mut merged = OrderedMap::new();
        for source in [&self.subsidies, &self.taxes, &self.rd] {
            for (code, ev) in source.iter() {
                merged.insert(code, ev);
            }
        }
        merged
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Informational; the row count comes from `policies`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_policies: f64,
    #[serde(default)]
    pub top_instrument: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvinceStat {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub subsidy_intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub year: i32,
    #[serde(default)]
    pub count: u64,
}

/// The precomputed policy document served next to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Summary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provinces: OrderedMap<ProvinceStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Vec<TimelineBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub global_instruments: OrderedMap<u64>,
    pub policies: Vec<PolicyRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("policy dataset is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("policy dataset has unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl Dataset {
    pub fn from_json_str(payload: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(payload).map_err(DatasetError::Json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, DatasetError> {
        serde_json::from_value(value).map_err(DatasetError::Shape)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "record id must be a string or number, got {other}"
        ))),
    }
}
