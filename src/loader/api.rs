//! Public API for container script loading

pub use crate::loader::container::{
    ContainerDescriptor, LoaderConfig, QueryParams, QueryValue, ScriptAttributes,
    DEFAULT_DATA_LAYER_NAME, DEFAULT_HOST,
};
pub use crate::loader::markup::{
    build_noscript, build_noscript_url, build_script_url, render_data_layer_bootstrap,
    render_script_tag, script_element, NoscriptOptions,
};
pub use crate::loader::readiness::{ReadyCallback, ReadySubscription};
pub use crate::loader::script::ScriptLoader;
pub use crate::loader::state::{all_terminal, ScriptLoadState, ScriptStatus};
