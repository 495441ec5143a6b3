use serde::{Deserialize, Serialize};

/// Status of one fetch channel.
///
/// Transitions are `Idle -> Loading -> Succeeded | Failed`, and any new fetch
/// re-enters `Loading` from every state. There is no cancelled state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FetchStatus<T> {
    Idle,
    Loading,
    Succeeded(T),
    /// Human-readable message from the failed collaborator call.
    Failed(String),
}

impl<T> Default for FetchStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchStatus<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the failure message when the channel ended in `Failed`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the payload when the channel ended in `Succeeded`.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}
