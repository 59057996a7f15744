//! Consent Mode vocabulary
//!
//! Categories form a closed enum, so a misspelt key cannot be expressed, and
//! states only ever carry the categories a caller set: the runtime leaves
//! omitted categories untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentCategory {
    AdStorage,
    AnalyticsStorage,
    AdUserData,
    AdPersonalization,
    FunctionalityStorage,
    PersonalizationStorage,
    SecurityStorage,
}

impl ConsentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentCategory::AdStorage => "ad_storage",
            ConsentCategory::AnalyticsStorage => "analytics_storage",
            ConsentCategory::AdUserData => "ad_user_data",
            ConsentCategory::AdPersonalization => "ad_personalization",
            ConsentCategory::FunctionalityStorage => "functionality_storage",
            ConsentCategory::PersonalizationStorage => "personalization_storage",
            ConsentCategory::SecurityStorage => "security_storage",
        }
    }
}

impl fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentValue {
    Granted,
    Denied,
}

impl ConsentValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentValue::Granted => "granted",
            ConsentValue::Denied => "denied",
        }
    }
}

/// `default` seeds consent before tags fire, `update` changes it later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentKind {
    Default,
    Update,
}

impl ConsentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentKind::Default => "default",
            ConsentKind::Update => "update",
        }
    }
}

/// Partial mapping from category to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentState(BTreeMap<ConsentCategory, ConsentValue>);

impl ConsentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ConsentState::set`]
    pub fn with(mut self, category: ConsentCategory, value: ConsentValue) -> Self {
        self.set(category, value);
        self
    }

    pub fn set(&mut self, category: ConsentCategory, value: ConsentValue) {
        self.0.insert(category, value);
    }

    pub fn get(&self, category: ConsentCategory) -> Option<ConsentValue> {
        self.0.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConsentCategory, ConsentValue)> + '_ {
        self.0.iter().map(|(category, value)| (*category, *value))
    }

    /// Wire form: only the categories that were set
    pub fn to_json(&self) -> Value {
        let record: Map<String, Value> = self
            .iter()
            .map(|(category, value)| {
                (
                    category.as_str().to_string(),
                    Value::String(value.as_str().to_string()),
                )
            })
            .collect();
        Value::Object(record)
    }
}

impl FromIterator<(ConsentCategory, ConsentValue)> for ConsentState {
    fn from_iter<I: IntoIterator<Item = (ConsentCategory, ConsentValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Region scoping for a consent command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentOptions {
    /// ISO 3166-2 region codes the command applies to
    pub region: Vec<String>,
    /// Milliseconds tags wait for an update before firing
    pub wait_for_update: Option<u64>,
}

impl ConsentOptions {
    pub fn for_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            region: regions.into_iter().map(Into::into).collect(),
            wait_for_update: None,
        }
    }

    pub fn with_wait_for_update(mut self, millis: u64) -> Self {
        self.wait_for_update = Some(millis);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty() && self.wait_for_update.is_none()
    }

    /// Wire form, or `None` when there is nothing to send
    pub fn to_json(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let mut record = Map::new();
        if !self.region.is_empty() {
            record.insert(
                "region".to_string(),
                Value::Array(self.region.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(millis) = self.wait_for_update {
            record.insert("wait_for_update".to_string(), Value::from(millis));
        }
        Some(Value::Object(record))
    }
}
