//! Tests for script/noscript URLs and rendered markup

use crate::host::api::MARKER_ATTRIBUTE;
use crate::loader::api::{
    build_noscript, build_noscript_url, build_script_url, render_data_layer_bootstrap,
    render_script_tag, script_element, ContainerDescriptor, LoaderConfig, NoscriptOptions,
    QueryParams, DEFAULT_HOST,
};

#[test]
fn test_script_url_for_default_data_layer() {
    let url = build_script_url(
        DEFAULT_HOST,
        &ContainerDescriptor::new("GTM-ABC"),
        &QueryParams::new(),
        "dataLayer",
    );
    assert_eq!(url, "https://www.googletagmanager.com/gtm.js?id=GTM-ABC");
}

#[test]
fn test_script_url_with_custom_data_layer() {
    let url = build_script_url(
        DEFAULT_HOST,
        &ContainerDescriptor::new("GTM-ABC"),
        &QueryParams::new(),
        "myLayer",
    );
    assert_eq!(
        url,
        "https://www.googletagmanager.com/gtm.js?id=GTM-ABC&l=myLayer"
    );
}

#[test]
fn test_script_url_merges_params_in_order() {
    let defaults = QueryParams::new().with("gtm_auth", "shared").with("gtm_cookies_win", "x");
    let container = ContainerDescriptor::new("GTM-ABC")
        .with_query_param("gtm_auth", "own")
        .with_query_param("gtm_preview", "env-2");

    let url = build_script_url("https://tags.example.com", &container, &defaults, "dataLayer");

    assert_eq!(
        url,
        "https://tags.example.com/gtm.js?id=GTM-ABC&gtm_auth=own&gtm_cookies_win=x&gtm_preview=env-2"
    );
}

#[test]
fn test_script_url_encodes_values_and_skips_reserved_keys() {
    let container = ContainerDescriptor::new("GTM-ABC")
        .with_query_param("id", "GTM-OTHER")
        .with_query_param("l", "other")
        .with_query_param("note", "a b&c");

    let url = build_script_url(DEFAULT_HOST, &container, &QueryParams::new(), "dataLayer");

    assert_eq!(
        url,
        "https://www.googletagmanager.com/gtm.js?id=GTM-ABC&note=a+b%26c"
    );
}

#[test]
fn test_script_url_tolerates_trailing_slash_on_host() {
    let url = build_script_url(
        "https://tags.example.com/",
        &ContainerDescriptor::new("GTM-ABC"),
        &QueryParams::new(),
        "dataLayer",
    );
    assert_eq!(url, "https://tags.example.com/gtm.js?id=GTM-ABC");
}

#[test]
fn test_noscript_url_never_carries_layer_name() {
    let container = ContainerDescriptor::new("GTM-ABC").with_query_param("gtm_auth", "a");
    let url = build_noscript_url(DEFAULT_HOST, &container, &QueryParams::new());
    assert_eq!(
        url,
        "https://www.googletagmanager.com/ns.html?id=GTM-ABC&gtm_auth=a"
    );
}

#[test]
fn test_script_element_attribute_order() {
    let mut config = LoaderConfig::default();
    config.script_attributes.defer = true;
    config.script_attributes.nonce = Some("n0nce".to_string());
    config
        .script_attributes
        .attributes
        .insert("referrerpolicy".to_string(), "origin".to_string());

    let element = script_element(&ContainerDescriptor::new("GTM-ABC"), &config);

    let names: Vec<&str> = element.attributes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![MARKER_ATTRIBUTE, "async", "defer", "nonce", "referrerpolicy"]
    );
    assert_eq!(element.attribute(MARKER_ATTRIBUTE), Some("GTM-ABC"));
    assert_eq!(element.attribute("nonce"), Some("n0nce"));
}

#[test]
fn test_script_element_protects_src_and_marker() {
    let mut config = LoaderConfig::default();
    config
        .script_attributes
        .attributes
        .insert("src".to_string(), "https://evil.example".to_string());
    config
        .script_attributes
        .attributes
        .insert(MARKER_ATTRIBUTE.to_string(), "GTM-OTHER".to_string());

    let element = script_element(&ContainerDescriptor::new("GTM-ABC"), &config);

    assert!(element.src.starts_with("https://www.googletagmanager.com/"));
    assert_eq!(element.attribute(MARKER_ATTRIBUTE), Some("GTM-ABC"));
    assert!(!element.has_attribute("src"));
}

#[test]
fn test_script_element_without_async() {
    let mut config = LoaderConfig::default();
    config.script_attributes.is_async = false;

    let element = script_element(&ContainerDescriptor::new("GTM-ABC"), &config);

    assert!(!element.has_attribute("async"));
}

#[test]
fn test_render_script_tag() {
    let html = render_script_tag(&ContainerDescriptor::new("GTM-ABC"), &LoaderConfig::default());
    assert_eq!(
        html,
        "<script src=\"https://www.googletagmanager.com/gtm.js?id=GTM-ABC\" data-gtm-container=\"GTM-ABC\" async></script>"
    );
}

#[test]
fn test_noscript_default_markup() {
    let html = build_noscript(["GTM-ABC"], &NoscriptOptions::default());
    assert_eq!(
        html,
        "<noscript><iframe src=\"https://www.googletagmanager.com/ns.html?id=GTM-ABC\" height=\"0\" width=\"0\" style=\"display:none;visibility:hidden\" title=\"Google Tag Manager\"></iframe></noscript>"
    );
}

#[test]
fn test_noscript_one_block_per_container() {
    let containers = vec![
        ContainerDescriptor::new("GTM-A"),
        ContainerDescriptor::new("GTM-B").with_query_param("gtm_auth", "z"),
    ];

    let html = build_noscript(&containers, &NoscriptOptions::default());

    assert_eq!(html.matches("<noscript>").count(), 2);
    let first = html.find("id=GTM-A").unwrap();
    let second = html.find("id=GTM-B&gtm_auth=z").unwrap();
    assert!(first < second);
}

#[test]
fn test_noscript_attribute_overrides() {
    let options = NoscriptOptions::default()
        .with_attribute("title", "Tags \"fallback\"")
        .with_attribute("loading", "lazy");

    let html = build_noscript(["GTM-ABC"], &options);

    assert!(html.contains("title=\"Tags &quot;fallback&quot;\""));
    assert!(html.ends_with(" loading=\"lazy\"></iframe></noscript>"));
    assert_eq!(html.matches("title=").count(), 1);
}

#[test]
fn test_noscript_empty_input() {
    let containers: Vec<ContainerDescriptor> = Vec::new();
    assert_eq!(build_noscript(&containers, &NoscriptOptions::default()), "");
}

#[test]
fn test_data_layer_bootstrap_uses_layer_name_and_nonce() {
    let mut config = LoaderConfig::default();
    config.data_layer_name = "tagQueue".to_string();
    config.script_attributes.nonce = Some("n0nce".to_string());

    let html = render_data_layer_bootstrap(&config);

    assert_eq!(
        html,
        "<script nonce=\"n0nce\">window.tagQueue=window.tagQueue||[];window.tagQueue.push({\"gtm.start\":new Date().getTime(),\"event\":\"gtm.js\"});</script>"
    );
}
