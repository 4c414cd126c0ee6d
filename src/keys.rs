//! Object-store key scheme for cached posters and metadata.

pub const DEFAULT_POSTER_PREFIX: &str = "posters/";
pub const DEFAULT_METADATA_PREFIX: &str = "";

/// Deterministic mapping from an identifier to its object keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    pub poster_prefix: String,
    pub metadata_prefix: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            poster_prefix: DEFAULT_POSTER_PREFIX.to_string(),
            metadata_prefix: DEFAULT_METADATA_PREFIX.to_string(),
        }
    }
}

impl KeyLayout {
    #[must_use]
    pub fn poster_key(&self, id: &str) -> String {
        format!("{}{id}.jpg", self.poster_prefix)
    }

    #[must_use]
    pub fn metadata_key(&self, id: &str) -> String {
        format!("{}{id}.json", self.metadata_prefix)
    }
}
