#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the catalog store treats fetch completions that arrive for a channel
/// after a newer fetch was issued on the same channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchOrdering {
    /// Apply a completion only if it belongs to the most recently issued
    /// fetch; older completions are discarded.
    #[default]
    LatestRequest,
    /// Apply every completion as it arrives, so the response received last
    /// wins regardless of issue order.
    LastCompletion,
}

impl std::fmt::Display for FetchOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchOrdering::LatestRequest => write!(f, "latest-request"),
            FetchOrdering::LastCompletion => write!(f, "last-completion"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_ordering: FetchOrdering,
    pub related_products_limit: usize,
}
