//! Script URLs and server-side markup
//!
//! Pure string builders shared by the loader (for the elements it injects)
//! and by server-side rendering (for the tags it prints). None of these touch
//! a host.

use url::form_urlencoded;

use crate::host::traits::{escape_attribute, ScriptElement, MARKER_ATTRIBUTE};
use crate::loader::container::{
    ContainerDescriptor, LoaderConfig, QueryParams, DEFAULT_DATA_LAYER_NAME, DEFAULT_HOST,
};

// Keys the URL builders set themselves
const RESERVED_KEYS: [&str; 2] = ["id", "l"];

/// `{host}/gtm.js?id={id}[&l={dataLayerName}][&{key}={value}...]`
///
/// `l` is omitted for the default data layer name. Remaining parameters are
/// the defaults overlaid with the container's own, in merge order.
pub fn build_script_url(
    host: &str,
    container: &ContainerDescriptor,
    default_query_params: &QueryParams,
    data_layer_name: &str,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("id", &container.id);
    if data_layer_name != DEFAULT_DATA_LAYER_NAME {
        query.append_pair("l", data_layer_name);
    }
    append_merged(&mut query, default_query_params, &container.query_params);

    format!("{}/gtm.js?{}", host.trim_end_matches('/'), query.finish())
}

/// `{host}/ns.html?id={id}[&{key}={value}...]`
pub fn build_noscript_url(
    host: &str,
    container: &ContainerDescriptor,
    default_query_params: &QueryParams,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("id", &container.id);
    append_merged(&mut query, default_query_params, &container.query_params);

    format!("{}/ns.html?{}", host.trim_end_matches('/'), query.finish())
}

fn append_merged(
    query: &mut form_urlencoded::Serializer<'_, String>,
    defaults: &QueryParams,
    overrides: &QueryParams,
) {
    for (key, value) in defaults.merged(overrides).iter() {
        if RESERVED_KEYS.contains(&key) {
            log::trace!("Ignoring reserved query parameter '{}'", key);
            continue;
        }
        query.append_pair(key, &value.to_string());
    }
}

/// The element the loader injects for `container`
///
/// Attribute order: marker, `async`, `defer`, `nonce`, then passthrough
/// attributes. Passthrough entries may not replace `src` or the marker.
pub fn script_element(container: &ContainerDescriptor, config: &LoaderConfig) -> ScriptElement {
    let attrs = &config.script_attributes;
    let mut attributes = vec![(MARKER_ATTRIBUTE.to_string(), container.id.clone())];
    if attrs.is_async {
        attributes.push(("async".to_string(), String::new()));
    }
    if attrs.defer {
        attributes.push(("defer".to_string(), String::new()));
    }
    if let Some(nonce) = &attrs.nonce {
        attributes.push(("nonce".to_string(), nonce.clone()));
    }
    for (name, value) in &attrs.attributes {
        if name == "src" || name == MARKER_ATTRIBUTE {
            log::trace!("Ignoring passthrough attribute '{}'", name);
            continue;
        }
        match attributes.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.clone(),
            None => attributes.push((name.clone(), value.clone())),
        }
    }

    ScriptElement {
        container_id: container.id.clone(),
        src: build_script_url(
            &config.host,
            container,
            &config.default_query_params,
            &config.data_layer_name,
        ),
        attributes,
    }
}

/// Server-rendered `<script>` tag identical to what the loader would inject
pub fn render_script_tag(container: &ContainerDescriptor, config: &LoaderConfig) -> String {
    script_element(container, config).to_html()
}

/// Inline `<script>` that seeds the data layer and pushes the bootstrap event
///
/// Server-rendered pages place this before the container tags so the
/// runtime finds `gtm.start` even when no client runs in the page.
pub fn render_data_layer_bootstrap(config: &LoaderConfig) -> String {
    let nonce = config
        .script_attributes
        .nonce
        .as_ref()
        .map(|nonce| format!(" nonce=\"{}\"", escape_attribute(nonce)))
        .unwrap_or_default();
    let name = &config.data_layer_name;

    format!(
        "<script{nonce}>window.{name}=window.{name}||[];window.{name}.push({{\"gtm.start\":new Date().getTime(),\"event\":\"gtm.js\"}});</script>",
        nonce = nonce,
        name = name
    )
}

/// Options for [`build_noscript`]
#[derive(Debug, Clone, PartialEq)]
pub struct NoscriptOptions {
    pub host: String,
    pub default_query_params: QueryParams,
    /// Overrides merged over the default iframe attributes
    pub attributes: Vec<(String, String)>,
}

impl Default for NoscriptOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            default_query_params: QueryParams::new(),
            attributes: Vec::new(),
        }
    }
}

impl NoscriptOptions {
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Noscript fallback markup, one `<noscript><iframe …></iframe></noscript>`
/// per container in input order
pub fn build_noscript<I>(containers: I, options: &NoscriptOptions) -> String
where
    I: IntoIterator,
    I::Item: Into<ContainerDescriptor>,
{
    containers
        .into_iter()
        .map(|container| {
            let container: ContainerDescriptor = container.into();
            noscript_iframe(&container, options)
        })
        .collect()
}

fn noscript_iframe(container: &ContainerDescriptor, options: &NoscriptOptions) -> String {
    let mut attributes = vec![
        (
            "src".to_string(),
            build_noscript_url(&options.host, container, &options.default_query_params),
        ),
        ("height".to_string(), "0".to_string()),
        ("width".to_string(), "0".to_string()),
        (
            "style".to_string(),
            "display:none;visibility:hidden".to_string(),
        ),
        ("title".to_string(), "Google Tag Manager".to_string()),
    ];
    for (name, value) in &options.attributes {
        match attributes.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.clone(),
            None => attributes.push((name.clone(), value.clone())),
        }
    }

    let rendered: String = attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_attribute(value)))
        .collect();
    format!("<noscript><iframe{}></iframe></noscript>", rendered)
}
