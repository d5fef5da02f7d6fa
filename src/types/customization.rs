//! Free-form, domain-scoped request customizations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A customization value: a single choice or a set of choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    One(String),
    Many(Vec<String>),
}

impl CustomValue {
    pub fn is_many(&self) -> bool {
        matches!(self, CustomValue::Many(_))
    }

    /// Values as a slice-like list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            CustomValue::One(v) => vec![v.as_str()],
            CustomValue::Many(vs) => vs.iter().map(|v| v.as_str()).collect(),
        }
    }
}

impl From<&str> for CustomValue {
    fn from(value: &str) -> Self {
        CustomValue::One(value.to_string())
    }
}

impl From<Vec<&str>> for CustomValue {
    fn from(values: Vec<&str>) -> Self {
        CustomValue::Many(values.into_iter().map(String::from).collect())
    }
}

/// Key/value customizations as sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customizations {
    values: BTreeMap<String, CustomValue>,
}

impl Customizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CustomValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CustomValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One allowed customization key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    /// Accepts a set of values.
    pub multi: bool,
}

impl FieldSpec {
    pub const fn one(key: &'static str) -> Self {
        Self { key, multi: false }
    }

    pub const fn many(key: &'static str) -> Self {
        Self { key, multi: true }
    }
}

/// Per-domain allow-list of keys, in prompt order, plus the values that
/// mean "no preference".
#[derive(Debug, Clone, Copy)]
pub struct CustomizationSchema {
    pub fields: &'static [FieldSpec],
    pub sentinels: &'static [&'static str],
}

impl CustomizationSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Empty values and sentinels (case-insensitive) are unset.
    pub fn is_unset(&self, value: &str) -> bool {
        let value = value.trim();
        value.is_empty() || self.sentinels.iter().any(|s| s.eq_ignore_ascii_case(value))
    }

    /// Set values in schema order; multi-values are joined with `", "`.
    pub fn resolve(&self, customizations: &Customizations) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .filter_map(|field| {
                let value = customizations.get(field.key)?;
                let kept: Vec<&str> = value
                    .values()
                    .into_iter()
                    .map(str::trim)
                    .filter(|v| !self.is_unset(v))
                    .collect();
                if kept.is_empty() {
                    None
                } else {
                    Some((field.key, kept.join(", ")))
                }
            })
            .collect()
    }
}
