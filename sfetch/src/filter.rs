//! Query options for the joke source.

pub const SAFE_BLACKLIST_FLAGS: &[&str] =
    &["nsfw", "political", "racist", "sexist", "explicit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeFilter {
    category: String,
    blacklist_flags: Vec<String>,
}

impl JokeFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            blacklist_flags: Vec::new(),
        }
    }

    /// Programming jokes with no content filtering.
    pub fn programming() -> Self {
        Self::new("Programming")
    }

    /// Programming jokes with every content flag blacklisted.
    pub fn safe() -> Self {
        Self::programming().with_blacklist_flags(SAFE_BLACKLIST_FLAGS.iter().copied())
    }

    pub fn with_blacklist_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Query parameters for one request. Only single-line jokes are requested.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("type".to_string(), "single".to_string())];
        if !self.blacklist_flags.is_empty() {
            pairs.push(("blacklistFlags".to_string(), self.blacklist_flags.join(",")));
        }
        pairs
    }
}

impl Default for JokeFilter {
    fn default() -> Self {
        Self::safe()
    }
}
