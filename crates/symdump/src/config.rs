//! Configuration for documentation URL construction.

/// Documentation host used when building links for built-in callables.
pub const DEFAULT_DOC_BASE_URL: &str = "https://secure.php.net";

/// Settings for `DocUrlResolver`.
///
/// Deserializes from any serde format; missing fields fall back to the defaults,
/// so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// Scheme and host of the manual, without a trailing path, e.g. `https://www.php.net`.
    pub base_url: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DOC_BASE_URL.to_owned(),
        }
    }
}

impl DocConfig {
    /// Creates a config pointing at a different documentation host.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The base URL with any trailing slashes removed.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
