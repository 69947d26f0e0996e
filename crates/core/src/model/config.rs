use serde::{Deserialize, Serialize};

/// Filter over an exact category value such as a topic or difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Convenience constructor for an exact-match filter.
    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    /// Returns true when the filter admits the given value.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(wanted) => wanted == value,
        }
    }
}

/// Default target session length.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// User-configurable selection settings for building a session.
///
/// `pool_size` is kept at 1 or more by the setter: an out-of-range value
/// is clamped rather than rejected, so the UI never has to surface a
/// configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    search_text: String,
    topic: CategoryFilter,
    difficulty: CategoryFilter,
    pool_size: u32,
    shuffle: bool,
    exclude_answered: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            topic: CategoryFilter::All,
            difficulty: CategoryFilter::All,
            pool_size: DEFAULT_POOL_SIZE,
            shuffle: false,
            exclude_answered: false,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn topic(&self) -> &CategoryFilter {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> &CategoryFilter {
        &self.difficulty
    }

    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn exclude_answered(&self) -> bool {
        self.exclude_answered
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_topic(&mut self, filter: CategoryFilter) {
        self.topic = filter;
    }

    pub fn set_difficulty(&mut self, filter: CategoryFilter) {
        self.difficulty = filter;
    }

    /// Sets the desired session length, clamped to at least 1.
    pub fn set_pool_size(&mut self, size: u32) {
        self.pool_size = size.max(1);
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn set_exclude_answered(&mut self, exclude: bool) {
        self.exclude_answered = exclude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_admits_everything() {
        let config = SessionConfig::default();
        assert!(config.topic().matches("SQL"));
        assert!(config.difficulty().matches("Hard"));
        assert_eq!(config.pool_size(), DEFAULT_POOL_SIZE);
        assert!(!config.shuffle());
        assert!(!config.exclude_answered());
    }

    #[test]
    fn pool_size_zero_clamps_to_one() {
        let mut config = SessionConfig::default();
        config.set_pool_size(0);
        assert_eq!(config.pool_size(), 1);
    }

    #[test]
    fn exact_filter_matches_only_its_value() {
        let filter = CategoryFilter::exact("UML");
        assert!(filter.matches("UML"));
        assert!(!filter.matches("SQL"));
    }
}
