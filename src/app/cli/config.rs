//! TOML configuration discovery and CLI overrides
//!
//! An explicit `--config` file must exist. Without one, the default file in
//! the user's config directory is used when present; otherwise the
//! configuration comes from flags alone.

use std::path::{Path, PathBuf};

use super::args::Args;
use crate::client::api::{ClientConfig, GtmError, GtmResult};

const CONFIG_DIR_NAME: &str = "gtmkit";
const CONFIG_FILE_NAME: &str = "gtmkit.toml";

/// `<config_dir>/gtmkit/gtmkit.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Pick the configuration file to load, if any
pub fn resolve_config_path(explicit: Option<&Path>) -> GtmResult<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(GtmError::ConfigFile {
            path: path.to_path_buf(),
            message: format!(
                "The specified configuration file does not exist: {}",
                path.display()
            ),
        }),
        None => Ok(default_config_path().filter(|path| path.exists())),
    }
}

impl Args {
    /// Load the configuration file (if any) and apply flag overrides
    ///
    /// Containers given on the command line replace those from the file.
    pub fn client_config(&self) -> GtmResult<ClientConfig> {
        let mut config = match resolve_config_path(self.config_file.as_deref())? {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                ClientConfig::from_file(&path)?
            }
            None => ClientConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        let containers: Vec<&str> = self
            .containers
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();
        if !containers.is_empty() {
            config.containers = ClientConfig::new(containers).containers;
        }
        if let Some(name) = &self.data_layer {
            config.data_layer_name = name.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(nonce) = &self.nonce {
            config.script_attributes.nonce = Some(nonce.clone());
        }
    }
}
