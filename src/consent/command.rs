//! Consent Command Builder

use sha2::{Digest, Sha256};

use crate::consent::types::{ConsentKind, ConsentOptions, ConsentState};
use crate::queue::api::{CommandTuple, QueueEntry};

/// A consent command ready for the data layer, plus its coalescing key
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentCommand {
    pub kind: ConsentKind,
    pub tuple: CommandTuple,
    /// Hex SHA-256 over the kind, the categories set and the options.
    /// Values are deliberately excluded: two not-yet-delivered commands that
    /// touch the same categories in the same scope are the same command.
    pub signature: String,
}

impl ConsentCommand {
    pub fn into_entry(self) -> QueueEntry {
        QueueEntry::Command(self.tuple)
    }
}

/// Build `["consent", kind, state, options?]`
///
/// Values pass through untouched; options are only appended when they carry
/// a region or a wait time.
pub fn build_consent_command(
    kind: ConsentKind,
    state: &ConsentState,
    options: Option<&ConsentOptions>,
) -> ConsentCommand {
    let mut args = vec![
        serde_json::Value::String(kind.as_str().to_string()),
        state.to_json(),
    ];
    if let Some(options) = options.and_then(ConsentOptions::to_json) {
        args.push(options);
    }

    ConsentCommand {
        kind,
        tuple: CommandTuple::new("consent", args),
        signature: consent_signature(kind, state, options),
    }
}

fn consent_signature(
    kind: ConsentKind,
    state: &ConsentState,
    options: Option<&ConsentOptions>,
) -> String {
    let mut categories: Vec<&str> = state.iter().map(|(category, _)| category.as_str()).collect();
    categories.sort_unstable();

    let mut regions: Vec<&str> = options
        .map(|options| options.region.iter().map(String::as_str).collect())
        .unwrap_or_default();
    regions.sort_unstable();
    regions.dedup();

    let wait = options
        .and_then(|options| options.wait_for_update)
        .map(|millis| millis.to_string())
        .unwrap_or_default();

    let canonical = format!(
        "consent|{}|{}|region={}|wait={}",
        kind.as_str(),
        categories.join(","),
        regions.join(","),
        wait
    );

    Sha256::digest(canonical.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
