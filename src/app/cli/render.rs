//! Output for each subcommand

use colored::Colorize;

use super::args::Command;
use crate::client::api::{ClientConfig, GtmResult};
use crate::loader::api::{
    build_noscript, build_script_url, render_data_layer_bootstrap, render_script_tag,
    LoaderConfig, NoscriptOptions,
};

/// Validate `config` and render the output for `command`
pub fn render(command: Command, config: &ClientConfig, use_color: bool) -> GtmResult<String> {
    let loader = config.validate()?;
    log::debug!(
        "Rendering {:?} for {} container(s)",
        command,
        config.containers.len()
    );

    Ok(match command {
        Command::Urls => render_urls(config, &loader, use_color),
        Command::Head => render_head(config, &loader),
        Command::Noscript => render_noscript(config, &loader),
        Command::Snippet => render_snippet(config, &loader),
    })
}

fn render_urls(config: &ClientConfig, loader: &LoaderConfig, use_color: bool) -> String {
    config
        .containers
        .iter()
        .map(|container| {
            let url = build_script_url(
                &loader.host,
                container,
                &loader.default_query_params,
                &loader.data_layer_name,
            );
            if use_color {
                format!("{}\t{}", container.id.bold(), url)
            } else {
                format!("{}\t{}", container.id, url)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_head(config: &ClientConfig, loader: &LoaderConfig) -> String {
    config
        .containers
        .iter()
        .map(|container| render_script_tag(container, loader))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_noscript(config: &ClientConfig, loader: &LoaderConfig) -> String {
    let options = NoscriptOptions {
        host: loader.host.clone(),
        default_query_params: loader.default_query_params.clone(),
        attributes: Vec::new(),
    };
    build_noscript(&config.containers, &options)
}

fn render_snippet(config: &ClientConfig, loader: &LoaderConfig) -> String {
    format!(
        "<!-- Google Tag Manager: as high in <head> as possible -->\n{}\n{}\n<!-- End Google Tag Manager -->\n\n<!-- Google Tag Manager (noscript): immediately after <body> -->\n{}\n<!-- End Google Tag Manager (noscript) -->",
        render_data_layer_bootstrap(loader),
        render_head(config, loader),
        render_noscript(config, loader)
    )
}
