//! Tag cloud built from the tags of every loaded type.

use std::collections::{BTreeMap, BTreeSet};

/// Multiset of lowercased tags plus the user's current tag selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCloud {
    counts: BTreeMap<String, usize>,
    selected: BTreeSet<String>,
}

impl TagCloud {
    /// Record one occurrence of a tag
    pub fn add(&mut self, tag: &str) {
        *self.counts.entry(tag.to_lowercase()).or_insert(0) += 1;
    }

    /// Occurrences of `tag`, case-insensitively
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(&tag.to_lowercase()).copied().unwrap_or(0)
    }

    /// Distinct tags with their occurrence counts, sorted by tag
    pub fn tags(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.contains(&tag.to_lowercase())
    }

    pub fn select(&mut self, tag: &str) {
        self.selected.insert(tag.to_lowercase());
    }

    /// Flip the selection of `tag`; returns whether it is now selected
    pub fn toggle(&mut self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        if self.selected.remove(&tag) {
            false
        } else {
            self.selected.insert(tag);
            true
        }
    }

    pub fn clear_selected(&mut self) {
        self.selected.clear();
    }
}
