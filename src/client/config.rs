//! Client configuration
//!
//! `ClientConfig` can be built in code or loaded from TOML:
//!
//! ```toml
//! containers = ["GTM-AAAA", { id = "GTM-BBBB", query_params = { gtm_auth = "x" } }]
//! data_layer_name = "dataLayer"
//! host = "https://www.googletagmanager.com"
//!
//! [default_query_params]
//! gtm_cookies_win = "x"
//!
//! [script_attributes]
//! async = true
//! nonce = "abc123"
//! ```
//!
//! `containers` also accepts a single id or a single table.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::client::error::{GtmError, GtmResult};
use crate::core::validation::{normalize_host, validate_container_id, validate_data_layer_name};
use crate::loader::container::{
    ContainerDescriptor, LoaderConfig, QueryParams, QueryValue, ScriptAttributes,
    DEFAULT_DATA_LAYER_NAME, DEFAULT_HOST,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(deserialize_with = "one_or_many_containers")]
    pub containers: Vec<ContainerDescriptor>,
    pub data_layer_name: String,
    pub host: String,
    pub default_query_params: QueryParams,
    pub script_attributes: ScriptAttributes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            data_layer_name: DEFAULT_DATA_LAYER_NAME.to_string(),
            host: DEFAULT_HOST.to_string(),
            default_query_params: QueryParams::new(),
            script_attributes: ScriptAttributes::default(),
        }
    }
}

impl ClientConfig {
    pub fn new<I>(containers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ContainerDescriptor>,
    {
        Self {
            containers: containers
                .into_iter()
                .map(Into::<ContainerDescriptor>::into)
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_container(mut self, container: impl Into<ContainerDescriptor>) -> Self {
        self.containers.push(container.into());
        self
    }

    pub fn with_data_layer_name(mut self, name: impl Into<String>) -> Self {
        self.data_layer_name = name.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_default_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Self {
        self.default_query_params.insert(key, value);
        self
    }

    pub fn with_script_attributes(mut self, attributes: ScriptAttributes) -> Self {
        self.script_attributes = attributes;
        self
    }

    pub fn from_toml_str(contents: &str) -> GtmResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> GtmResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| GtmError::config_file(path, &e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            GtmError::ConfigParse { message } => GtmError::ConfigParse {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })
    }

    /// Check every value and produce the loader settings
    ///
    /// Rejects an empty container list, empty or duplicate ids, a data layer
    /// name that is not an identifier and a host that is not an http(s) URL.
    pub fn validate(&self) -> GtmResult<LoaderConfig> {
        if self.containers.is_empty() {
            return Err(GtmError::config("At least one container is required"));
        }

        let mut seen = HashSet::new();
        for container in &self.containers {
            validate_container_id(&container.id).map_err(GtmError::config)?;
            if !seen.insert(container.id.as_str()) {
                return Err(GtmError::config(format!(
                    "Container '{}' is configured more than once",
                    container.id
                )));
            }
        }

        let data_layer_name =
            validate_data_layer_name(&self.data_layer_name).map_err(GtmError::config)?;
        let host = normalize_host(&self.host).map_err(GtmError::config)?;

        Ok(LoaderConfig {
            host,
            data_layer_name: data_layer_name.to_string(),
            default_query_params: self.default_query_params.clone(),
            script_attributes: self.script_attributes.clone(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContainerEntry {
    Id(String),
    Descriptor(ContainerDescriptor),
}

impl From<ContainerEntry> for ContainerDescriptor {
    fn from(entry: ContainerEntry) -> Self {
        match entry {
            ContainerEntry::Id(id) => ContainerDescriptor::new(id),
            ContainerEntry::Descriptor(descriptor) => descriptor,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(ContainerEntry),
    Many(Vec<ContainerEntry>),
}

fn one_or_many_containers<'de, D>(deserializer: D) -> Result<Vec<ContainerDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(entry) => vec![ContainerDescriptor::from(entry)],
        OneOrMany::Many(entries) => entries.into_iter().map(ContainerDescriptor::from).collect(),
    })
}
