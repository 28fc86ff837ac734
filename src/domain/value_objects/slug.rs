use serde::{Deserialize, Serialize};
use std::fmt;

/// URL-safe natural key of a dataset. Local and remote records reconcile on
/// the slug rather than the surrogate id, because the remote store upserts
/// by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Derives the slug from a display title: lowercase, whitespace runs
    /// collapsed to a single `-`.
    pub fn from_title(title: &str) -> Result<Self, String> {
        let normalized = title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Self::new(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Slug cannot be empty".to_string());
        }
        if value.chars().any(|c| c.is_whitespace()) {
            return Err("Slug cannot contain whitespace".to_string());
        }
        if value.chars().any(|c| c.is_uppercase()) {
            return Err("Slug must be lowercase".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_title_lowercases_and_joins() {
        assert_eq!(Slug::from_title("Daily Steps").unwrap().as_str(), "daily-steps");
        assert_eq!(Slug::from_title("  A   B ").unwrap().as_str(), "a-b");
    }

    #[test]
    fn distinct_titles_can_normalize_to_the_same_slug() {
        // "A B" and "a-b" collide after normalization; the collision is a
        // data-integrity concern outside this layer.
        assert_eq!(
            Slug::from_title("A B").unwrap(),
            Slug::new("a-b".to_string()).unwrap()
        );
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(Slug::new(String::new()).is_err());
        assert!(Slug::new("has space".to_string()).is_err());
        assert!(Slug::from_title("   ").is_err());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(Slug::new("Daily".to_string()).is_err());
    }
}
