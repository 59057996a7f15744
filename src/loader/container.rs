//! Container descriptors and script options
//!
//! These are the configuration-facing types the loader works from. Query
//! parameters keep insertion order because the generated URLs must be
//! reproducible byte for byte.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_HOST: &str = "https://www.googletagmanager.com";
pub const DEFAULT_DATA_LAYER_NAME: &str = "dataLayer";

/// A query parameter value: string, number or boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(value) => write!(f, "{}", value),
            QueryValue::Integer(value) => write!(f, "{}", value),
            QueryValue::Float(value) => write!(f, "{}", value),
            QueryValue::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

/// Ordered query parameters; inserting an existing key replaces its value in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self` overlaid with `overrides`: colliding keys take the override's
    /// value but keep their original position, new keys are appended.
    pub fn merged(&self, overrides: &QueryParams) -> QueryParams {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = QueryParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of query parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<QueryParams, A::Error> {
                let mut params = QueryParams::new();
                while let Some((key, value)) = map.next_entry::<String, QueryValue>()? {
                    params.insert(key, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

/// One container to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    pub id: String,
    /// Per-container parameters such as `gtm_auth` / `gtm_preview`
    #[serde(default, skip_serializing_if = "QueryParams::is_empty")]
    pub query_params: QueryParams,
}

impl ContainerDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            query_params: QueryParams::new(),
        }
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query_params.insert(key, value);
        self
    }
}

impl From<&str> for ContainerDescriptor {
    fn from(id: &str) -> Self {
        ContainerDescriptor::new(id)
    }
}

impl From<String> for ContainerDescriptor {
    fn from(id: String) -> Self {
        ContainerDescriptor::new(id)
    }
}

impl From<&ContainerDescriptor> for ContainerDescriptor {
    fn from(container: &ContainerDescriptor) -> Self {
        container.clone()
    }
}

/// Attributes copied onto every injected script element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptAttributes {
    #[serde(rename = "async")]
    pub is_async: bool,
    pub defer: bool,
    /// CSP nonce
    pub nonce: Option<String>,
    /// Passthrough attributes, e.g. `referrerpolicy`
    pub attributes: BTreeMap<String, String>,
}

impl Default for ScriptAttributes {
    fn default() -> Self {
        Self {
            is_async: true,
            defer: false,
            nonce: None,
            attributes: BTreeMap::new(),
        }
    }
}

/// Everything the loader needs to turn a container into a script element
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Normalised host, no trailing slash
    pub host: String,
    pub data_layer_name: String,
    pub default_query_params: QueryParams,
    pub script_attributes: ScriptAttributes,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            data_layer_name: DEFAULT_DATA_LAYER_NAME.to_string(),
            default_query_params: QueryParams::new(),
            script_attributes: ScriptAttributes::default(),
        }
    }
}
