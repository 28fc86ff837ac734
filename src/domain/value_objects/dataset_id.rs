use super::slug::Slug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Opaque surrogate key of a dataset. Client-created datasets get a
/// slug-prefixed id with a short random suffix; replicated datasets keep
/// whatever id the remote issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Dataset id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn generate(slug: &Slug) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}-{}", slug.as_str(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DatasetId> for String {
    fn from(value: DatasetId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_prefixes_with_slug() {
        let slug = Slug::from_title("Daily Steps").unwrap();
        let id = DatasetId::generate(&slug);
        assert!(id.as_str().starts_with("daily-steps-"));
        assert_eq!(id.as_str().len(), "daily-steps-".len() + SUFFIX_LEN);
    }

    #[test]
    fn generated_ids_differ() {
        let slug = Slug::from_title("Weight").unwrap();
        assert_ne!(DatasetId::generate(&slug), DatasetId::generate(&slug));
    }

    #[test]
    fn rejects_empty() {
        assert!(DatasetId::new("  ".to_string()).is_err());
    }
}
