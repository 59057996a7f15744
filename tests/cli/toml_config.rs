//! CLI TOML configuration tests

use clap::Parser;
use gtmkit::app::cli::api::Args;
use gtmkit::client::api::{ClientConfig, GtmError};
use gtmkit::loader::api::QueryValue;
use std::io::Write;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_configuration_file() {
    let file = config_file(
        r#"
containers = [
    "GTM-AAAA",
    { id = "GTM-BBBB", query_params = { gtm_auth = "abc", gtm_preview = "env-3" } },
]
data_layer_name = "siteLayer"
host = "https://tags.example.com/"

[default_query_params]
gtm_cookies_win = "x"
debug = true

[script_attributes]
async = false
defer = true
nonce = "n0nce"

[script_attributes.attributes]
referrerpolicy = "no-referrer"
"#,
    );
    let path = file.path().to_string_lossy().to_string();
    let args = Args::try_parse_from(["gtmkit", "head", "-c", &path]).unwrap();

    let config = args.client_config().unwrap();
    assert_eq!(config.containers.len(), 2);
    assert_eq!(config.containers[1].id, "GTM-BBBB");
    assert_eq!(
        config.default_query_params.get("debug"),
        Some(&QueryValue::Bool(true))
    );
    assert!(!config.script_attributes.is_async);
    assert!(config.script_attributes.defer);
    assert_eq!(
        config
            .script_attributes
            .attributes
            .get("referrerpolicy")
            .map(String::as_str),
        Some("no-referrer")
    );

    let loader = config.validate().unwrap();
    assert_eq!(loader.host, "https://tags.example.com");
}

#[test]
fn test_query_parameter_order_follows_file() {
    let file = config_file(
        r#"
containers = "GTM-AAAA"

[default_query_params]
zeta = "1"
alpha = "2"
"#,
    );
    let config = ClientConfig::from_file(file.path()).unwrap();
    let keys: Vec<&str> = config
        .default_query_params
        .iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn test_unreadable_config_file() {
    let err = ClientConfig::from_file(std::path::Path::new("/no/such/dir/gtmkit.toml")).unwrap_err();
    assert!(matches!(err, GtmError::ConfigFile { .. }));
}

#[test]
fn test_duplicate_containers_rejected_on_validate() {
    let file = config_file("containers = [\"GTM-AAAA\", \"GTM-AAAA\"]\n");
    let config = ClientConfig::from_file(file.path()).unwrap();

    let err = config.validate().unwrap_err();
    assert_eq!(
        err,
        GtmError::Config {
            message: "Container 'GTM-AAAA' is configured more than once".to_string()
        }
    );
}
