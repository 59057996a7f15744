//! Public API for consent signalling

pub use crate::consent::command::{build_consent_command, ConsentCommand};
pub use crate::consent::types::{
    ConsentCategory, ConsentKind, ConsentOptions, ConsentState, ConsentValue,
};
