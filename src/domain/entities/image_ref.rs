//! Image attachment references.

use serde::{Deserialize, Serialize};

/// Reference to an image attachment inside a chat message.
///
/// Carries a remote locator, a host-local file identifier, or both. The first
/// non-empty of the two is the reference's identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    url: Option<String>,
    file: Option<String>,
}

impl ImageRef {
    /// Creates a reference pointing at a remote URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            file: None,
        }
    }

    /// Creates a reference pointing at a host file identifier.
    #[must_use]
    pub fn from_file(file: impl Into<String>) -> Self {
        Self {
            url: None,
            file: Some(file.into()),
        }
    }

    /// Creates a reference that carries neither a URL nor a file.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            url: None,
            file: None,
        }
    }

    /// Sets the file identifier alongside an existing URL.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Remote URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Host file identifier, if any.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the deduplication key, if one can be established.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.url()
            .filter(|u| !u.is_empty())
            .or_else(|| self.file().filter(|f| !f.is_empty()))
    }

    /// Returns a printable locator for diagnostics.
    #[must_use]
    pub fn locator(&self) -> &str {
        self.identity().unwrap_or("<unknown>")
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.locator())
    }
}
