//! Validation utilities for client configuration values
//!
//! Each validator returns the normalised value or a message suitable for a
//! configuration error.

use once_cell::sync::Lazy;
use regex::Regex;

static JS_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// Validate a data layer name: it becomes a property on the global scope and
/// is referenced by the container runtime, so it must be a plain identifier.
pub fn validate_data_layer_name(name: &str) -> Result<&str, String> {
    if JS_IDENTIFIER.is_match(name) {
        Ok(name)
    } else {
        Err(format!(
            "'{}' is not a valid data layer name (expected a JavaScript identifier)",
            name
        ))
    }
}

/// Validate a container id
///
/// Ids are used verbatim as marker attribute values, so quotes and
/// whitespace are rejected as well as empty ids.
pub fn validate_container_id(id: &str) -> Result<&str, String> {
    if id.trim().is_empty() {
        return Err("Container id must not be empty".to_string());
    }
    if id.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        return Err(format!(
            "Container id '{}' must not contain whitespace or quotes",
            id
        ));
    }
    Ok(id)
}

/// Validate the script host and strip any trailing slash
pub fn normalize_host(host: &str) -> Result<String, String> {
    let parsed =
        url::Url::parse(host).map_err(|e| format!("Invalid host '{}': {}", host, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(host.trim_end_matches('/').to_string()),
        other => Err(format!(
            "Invalid host '{}': scheme '{}' is not http or https",
            host, other
        )),
    }
}
