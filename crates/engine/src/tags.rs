//! Tag registry shown by the tag-management screen.
//!
//! Usage counts are display values seeded with the registry. They are not
//! recomputed from the store.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine, seed};

/// Suggestions listed under the registry.
pub const RECOMMENDED_TAGS: [&str; 4] = ["健身", "阅读", "交通", "房租"];

/// One-tap tags offered by the edit screen.
pub const QUICK_TAGS: [&str; 8] = ["餐饮", "交通", "工作", "日常", "其他", "购物", "医疗", "旅行"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    next_id: u64,
}

impl TagRegistry {
    /// Registry seeded with the default tags.
    pub fn initial() -> Self {
        Self::from(seed::initial_tags())
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags whose name contains `query`; an empty query keeps everything.
    pub fn search(&self, query: &str) -> Vec<&Tag> {
        let query = query.trim();
        self.tags
            .iter()
            .filter(|tag| tag.name.contains(query))
            .collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let norm = normalize_name(name);
        self.tags.iter().any(|tag| normalize_name(&tag.name) == norm)
    }

    /// Adds a tag with a zero count.
    pub fn create(&mut self, name: &str) -> ResultEngine<&Tag> {
        let name = validate_name(name)?;
        if self.contains_name(&name) {
            return Err(EngineError::ExistingKey(name));
        }
        self.next_id += 1;
        let tag = Tag {
            id: format!("tag-{}", self.next_id),
            name,
            count: 0,
        };
        tracing::debug!(id = %tag.id, name = %tag.name, "create tag");
        self.tags.push(tag);
        let idx = self.tags.len() - 1;
        Ok(&self.tags[idx])
    }

    pub fn rename(&mut self, id: &str, name: &str) -> ResultEngine<()> {
        let name = validate_name(name)?;
        let norm = normalize_name(&name);
        if self
            .tags
            .iter()
            .any(|tag| tag.id != id && normalize_name(&tag.name) == norm)
        {
            return Err(EngineError::ExistingKey(name));
        }
        let tag = self
            .tags
            .iter_mut()
            .find(|tag| tag.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        tag.name = name;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> ResultEngine<Tag> {
        let idx = self
            .tags
            .iter()
            .position(|tag| tag.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        Ok(self.tags.remove(idx))
    }
}

impl From<Vec<Tag>> for TagRegistry {
    fn from(tags: Vec<Tag>) -> Self {
        let next_id = tags.len() as u64;
        Self { tags, next_id }
    }
}

fn validate_name(name: &str) -> ResultEngine<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidTag(
            "tag name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Comparison key for tag names: NFKC, lowercase, no `#` prefix.
fn normalize_name(name: &str) -> String {
    name.trim()
        .trim_start_matches('#')
        .nfkc()
        .collect::<String>()
        .to_lowercase()
}
