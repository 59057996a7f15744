//! Tests for script injection, de-duplication and removal

use std::rc::Rc;

use crate::core::logger::MemoryLogger;
use crate::host::api::{MemoryHost, ScriptElement, ScriptMount, MARKER_ATTRIBUTE};
use crate::loader::api::{ContainerDescriptor, LoaderConfig, ScriptLoader, ScriptStatus};

fn loader_for(host: &Rc<MemoryHost>, ids: &[&str]) -> ScriptLoader {
    let containers = ids.iter().map(|id| ContainerDescriptor::new(*id)).collect();
    ScriptLoader::new(
        host.clone(),
        LoaderConfig::default(),
        containers,
        Rc::new(MemoryLogger::new()),
    )
}

#[test]
fn test_new_loader_tracks_pending_states() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A", "GTM-B"]);

    let states = loader.states();
    assert_eq!(states.len(), 2);
    assert!(states.iter().all(|s| s.status == ScriptStatus::Pending));
    assert_eq!(host.scripts().len(), 0);
    assert!(!loader.is_ready());
}

#[test]
fn test_ensure_injects_one_script_per_container() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A", "GTM-B"]);

    loader.ensure();

    let scripts = host.scripts();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].container_id, "GTM-A");
    assert_eq!(scripts[1].container_id, "GTM-B");
    assert_eq!(scripts[0].attribute(MARKER_ATTRIBUTE), Some("GTM-A"));
    assert_eq!(host.mount_of("GTM-A"), Some(ScriptMount::Head));
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Loading)
    );
}

#[test]
fn test_ensure_is_idempotent() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);

    loader.ensure();
    loader.ensure();
    host.fire_load("GTM-A");
    loader.ensure();

    assert_eq!(host.script_count("GTM-A"), 1);
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Loaded)
    );
}

#[test]
fn test_second_loader_does_not_duplicate_scripts() {
    let host = Rc::new(MemoryHost::new());
    let first = loader_for(&host, &["GTM-A"]);
    let second = loader_for(&host, &["GTM-A"]);

    first.ensure();
    second.ensure();

    assert_eq!(host.script_count("GTM-A"), 1);
}

#[test]
fn test_existing_foreign_script_is_adopted_as_loaded() {
    let host = Rc::new(MemoryHost::new());
    host.insert_foreign_script(ScriptElement {
        container_id: "GTM-A".to_string(),
        src: "https://www.googletagmanager.com/gtm.js?id=GTM-A".to_string(),
        attributes: vec![(MARKER_ATTRIBUTE.to_string(), "GTM-A".to_string())],
    });
    let loader = loader_for(&host, &["GTM-A"]);

    loader.ensure();

    assert_eq!(host.script_count("GTM-A"), 1);
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Loaded)
    );
    assert!(loader.is_ready());
}

#[test]
fn test_falls_back_to_body_without_head() {
    let host = Rc::new(MemoryHost::new());
    host.set_head_available(false);
    let loader = loader_for(&host, &["GTM-A"]);

    loader.ensure();

    assert_eq!(host.mount_of("GTM-A"), Some(ScriptMount::Body));
}

#[test]
fn test_no_mount_point_fails_container() {
    let host = Rc::new(MemoryHost::new());
    host.set_head_available(false);
    host.set_body_available(false);
    let logger = Rc::new(MemoryLogger::new());
    let loader = ScriptLoader::new(
        host.clone(),
        LoaderConfig::default(),
        vec![ContainerDescriptor::new("GTM-A")],
        logger.clone(),
    );

    loader.ensure();

    let state = loader.get_state("GTM-A").unwrap();
    assert_eq!(state.status, ScriptStatus::Failed);
    assert!(state.error.is_some());
    assert!(host.scripts().is_empty());
    assert_eq!(logger.messages(log::Level::Warn).len(), 1);
}

#[test]
fn test_error_event_records_message() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A", "GTM-B"]);
    loader.ensure();

    host.fire_error("GTM-A", "blocked by client");

    let state = loader.get_state("GTM-A").unwrap();
    assert_eq!(state.status, ScriptStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("blocked by client"));
    assert_eq!(
        loader.get_state("GTM-B").map(|s| s.status),
        Some(ScriptStatus::Loading)
    );
}

#[test]
fn test_failed_script_is_not_retried_while_attached() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);
    loader.ensure();
    host.fire_error("GTM-A", "404");

    loader.ensure();

    assert_eq!(host.script_count("GTM-A"), 1);
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Failed)
    );
}

#[test]
fn test_remove_while_loading_marks_failed() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);
    loader.ensure();

    assert!(loader.remove("GTM-A"));

    let state = loader.get_state("GTM-A").unwrap();
    assert_eq!(state.status, ScriptStatus::Failed);
    assert_eq!(
        state.error.as_deref(),
        Some("script removed before it finished loading")
    );
    assert_eq!(host.script_count("GTM-A"), 0);
    // Listener went with the element
    assert!(!host.fire_load("GTM-A"));
}

#[test]
fn test_remove_after_load_keeps_state() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);
    loader.ensure();
    host.fire_load("GTM-A");

    assert!(loader.remove("GTM-A"));
    assert!(!loader.remove("GTM-A"));

    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Loaded)
    );
}

#[test]
fn test_remove_all_counts_removed_elements() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A", "GTM-B"]);
    loader.ensure();

    assert_eq!(loader.remove_all(), 2);
    assert!(host.scripts().is_empty());
    assert_eq!(loader.remove_all(), 0);
}

#[test]
fn test_remove_all_leaves_untouched_containers() {
    let host = Rc::new(MemoryHost::new());
    host.insert_foreign_script(ScriptElement {
        container_id: "GTM-A".to_string(),
        src: "https://www.googletagmanager.com/gtm.js?id=GTM-A".to_string(),
        attributes: vec![(MARKER_ATTRIBUTE.to_string(), "GTM-A".to_string())],
    });
    let loader = loader_for(&host, &["GTM-A"]);

    assert_eq!(loader.remove_all(), 0);
    assert_eq!(host.script_count("GTM-A"), 1);
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Pending)
    );
}

#[test]
fn test_ensure_reinjects_after_removal() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);
    loader.ensure();
    loader.remove("GTM-A");

    loader.ensure();
    host.fire_load("GTM-A");

    assert_eq!(host.script_count("GTM-A"), 1);
    assert_eq!(
        loader.get_state("GTM-A").map(|s| s.status),
        Some(ScriptStatus::Loaded)
    );
}

#[test]
fn test_unknown_container_has_no_state() {
    let host = Rc::new(MemoryHost::new());
    let loader = loader_for(&host, &["GTM-A"]);

    assert!(loader.get_state("GTM-Z").is_none());
    assert!(!loader.remove("GTM-Z"));
}

#[test]
fn test_events_after_loader_dropped_are_ignored() {
    let host = Rc::new(MemoryHost::new());
    {
        let loader = loader_for(&host, &["GTM-A"]);
        loader.ensure();
    }

    // Listener still attached but its loader is gone
    assert!(host.fire_load("GTM-A"));
}
