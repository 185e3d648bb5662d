use serde::{Deserialize, Serialize};

/// Error object the provider embeds next to an empty `result`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProviderError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.description.as_deref().unwrap_or("no description")
        )
    }
}
