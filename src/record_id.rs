use sha1::{Digest, Sha1};

/// Number of hex characters shown in human-readable output.
pub const SHORT_LEN: usize = 12;

/// A stable record identifier derived from (title, year, first author).
///
/// Records that agree on those three fields after normalization share the
/// same identifier, so re-importing the same reference from a different
/// dump collapses to one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Derive the identifier from normalized record fields.
    ///
    /// The digest input is `title|year|first_author` with title and first
    /// author trimmed and lowercased. An absent year or author contributes
    /// an empty segment.
    pub fn derive(
        title: &str,
        year: Option<i32>,
        first_author: Option<&str>,
    ) -> Self {
        let year = year.map(|y| y.to_string()).unwrap_or_default();
        let author = first_author.unwrap_or("").trim().to_lowercase();
        let base =
            format!("{}|{year}|{author}", title.trim().to_lowercase());
        Self(hex::encode(Sha1::digest(base.as_bytes())))
    }

    /// The full 40-character hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prefix used for display (e.g. "9b8170811fd3").
    pub fn short(&self) -> &str {
        &self.0[..SHORT_LEN]
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.short())
    }
}
