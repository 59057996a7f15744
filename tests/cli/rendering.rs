//! Subcommand output through the binary's `run` path

use clap::Parser;
use gtmkit::app::cli::api::Args;
use gtmkit::app::startup::run;

fn run_with(args: &[&str]) -> String {
    let mut argv = vec!["gtmkit", "--no-color", "--config", "/dev/null"];
    argv.extend_from_slice(args);
    run(&Args::try_parse_from(argv).unwrap()).unwrap()
}

#[test]
fn test_urls_from_flags() {
    let output = run_with(&["urls", "-i", "GTM-AAAA,GTM-BBBB", "-d", "siteLayer"]);
    assert_eq!(
        output,
        "GTM-AAAA\thttps://www.googletagmanager.com/gtm.js?id=GTM-AAAA&l=siteLayer\n\
         GTM-BBBB\thttps://www.googletagmanager.com/gtm.js?id=GTM-BBBB&l=siteLayer"
    );
}

#[test]
fn test_head_uses_custom_host_and_nonce() {
    let output = run_with(&[
        "head",
        "-i",
        "GTM-AAAA",
        "--host",
        "https://tags.example.com/",
        "--nonce",
        "abc",
    ]);
    assert_eq!(
        output,
        "<script src=\"https://tags.example.com/gtm.js?id=GTM-AAAA\" data-gtm-container=\"GTM-AAAA\" async nonce=\"abc\"></script>"
    );
}

#[test]
fn test_noscript_markup() {
    let output = run_with(&["noscript", "-i", "GTM-AAAA"]);
    assert_eq!(
        output,
        "<noscript><iframe src=\"https://www.googletagmanager.com/ns.html?id=GTM-AAAA\" height=\"0\" width=\"0\" style=\"display:none;visibility:hidden\" title=\"Google Tag Manager\"></iframe></noscript>"
    );
}

#[test]
fn test_missing_containers_is_an_error() {
    let args = Args::try_parse_from(["gtmkit", "--config", "/dev/null", "urls"]).unwrap();
    assert!(run(&args).is_err());
}

#[test]
fn test_invalid_host_is_an_error() {
    let args = Args::try_parse_from([
        "gtmkit",
        "--config",
        "/dev/null",
        "urls",
        "-i",
        "GTM-AAAA",
        "--host",
        "ftp://tags.example.com",
    ])
    .unwrap();
    assert!(run(&args).is_err());
}
