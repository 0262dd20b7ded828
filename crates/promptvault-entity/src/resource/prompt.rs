//! Prompt snapshot and sensitivity classification.

use serde::{Deserialize, Serialize};

/// Prompt-specific attributes read by policy conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptAttributes {
    /// Whether the prompt is visible to the community.
    pub is_published: bool,
    /// Whether any of the prompt's tags is classified as sensitive.
    pub is_sensitive: bool,
}

/// Classifies prompts as sensitive from their tag names.
///
/// Built once from configuration (`authz.sensitive_tags`) and handed to the
/// resolvers that construct prompt snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitivityClassifier {
    /// Lowercased sensitive tag names.
    tags: Vec<String>,
}

impl SensitivityClassifier {
    /// Create a classifier from a list of tag names (case-insensitive).
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    /// Check whether a single tag is sensitive.
    pub fn is_sensitive_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.binary_search(&tag).is_ok()
    }

    /// Check whether any of a prompt's tags is sensitive.
    pub fn classify<I, S>(&self, prompt_tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        prompt_tags
            .into_iter()
            .any(|t| self.is_sensitive_tag(t.as_ref()))
    }
}

impl Default for SensitivityClassifier {
    fn default() -> Self {
        Self::new(["NSFW"])
    }
}
