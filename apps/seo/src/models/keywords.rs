use serde::{Deserialize, Serialize};

/// An ordered, cleaned set of target keywords with an optional explicit primary.
///
/// Entries are trimmed and blank entries dropped on construction. Duplicates are
/// kept: each entry counts on its own for coverage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
    primary: Option<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            primary: None,
        }
    }

    /// Builds a set from a comma-delimited list such as `"kw1, kw2"`.
    pub fn parse_list(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Sets the primary keyword. A blank value leaves the first keyword as primary.
    pub fn with_primary(mut self, primary: Option<&str>) -> Self {
        self.primary = primary
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The explicit primary keyword, or the first keyword of the set.
    pub fn primary(&self) -> Option<&str> {
        self.primary
            .as_deref()
            .or_else(|| self.keywords.first().map(String::as_str))
    }

    /// Keywords joined for display and CSV export.
    pub fn joined(&self) -> String {
        self.keywords.join(", ")
    }
}
