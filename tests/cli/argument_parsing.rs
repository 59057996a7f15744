//! Core CLI argument parsing tests

use clap::Parser;
use gtmkit::app::cli::api::{Args, Command};

#[test]
fn test_version_flag_is_handled_by_clap() {
    let err = Args::try_parse_from(["gtmkit", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_help_lists_subcommands() {
    let err = Args::try_parse_from(["gtmkit", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let help = err.to_string();
    for name in ["urls", "head", "noscript", "snippet"] {
        assert!(help.contains(name), "help should mention {}", name);
    }
}

#[test]
fn test_all_global_flags_together() {
    let args = Args::try_parse_from([
        "gtmkit",
        "-i",
        "GTM-AAAA",
        "-d",
        "siteLayer",
        "--host",
        "https://tags.example.com/",
        "--nonce",
        "abc",
        "--no-color",
        "-l",
        "info",
        "-o",
        "ext",
        "-f",
        "none",
        "snippet",
    ])
    .unwrap();

    assert_eq!(args.command, Command::Snippet);
    assert_eq!(args.containers, vec!["GTM-AAAA"]);
    assert_eq!(args.data_layer.as_deref(), Some("siteLayer"));
    assert_eq!(args.host.as_deref(), Some("https://tags.example.com/"));
    assert_eq!(args.nonce.as_deref(), Some("abc"));
    assert_eq!(args.log_level.as_deref(), Some("info"));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(args.log_file.as_deref(), Some("none"));
    assert!(!args.use_color());
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(Args::try_parse_from(["gtmkit", "urls", "--since", "yesterday"]).is_err());
}
