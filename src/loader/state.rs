//! Per-container script load state

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    /// Not requested yet
    Pending,
    Loading,
    Loaded,
    Failed,
}

impl ScriptStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScriptStatus::Loaded | ScriptStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptStatus::Pending => "pending",
            ScriptStatus::Loading => "loading",
            ScriptStatus::Loaded => "loaded",
            ScriptStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptLoadState {
    pub container_id: String,
    pub status: ScriptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScriptLoadState {
    pub fn pending(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            status: ScriptStatus::Pending,
            error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// True once every state is `loaded` or `failed`
pub fn all_terminal(states: &[ScriptLoadState]) -> bool {
    states.iter().all(ScriptLoadState::is_terminal)
}
