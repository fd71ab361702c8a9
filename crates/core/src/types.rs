//! In-progress form values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current value of one form field.
///
/// An absent key in a [`FormValueMap`] plays the role of "undefined".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Field key -> current value for one form.
pub type FormValueMap = BTreeMap<String, FormValue>;

/// Decode a JSON object of form values. `null` entries count as absent
/// keys, the same as "undefined" in the host form.
pub fn values_from_json(value: serde_json::Value) -> serde_json::Result<FormValueMap> {
    let raw: BTreeMap<String, Option<FormValue>> = serde_json::from_value(value)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

impl FormValue {
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    pub fn empty_list() -> Self {
        Self::List(Vec::new())
    }

    /// Blank strings and empty lists count as "no value". Booleans and
    /// numbers are always a value.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Booleans, plus the `"true"` / `"false"` strings some inputs emit.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Numbers, plus numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Render a scalar as the string id / text it stands for.
    ///
    /// Integral numbers render without a fractional part so that a numeric
    /// option id `12` and the string `"12"` resolve to the same option.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(_) | Self::List(_) => None,
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
