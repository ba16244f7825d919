//! Visibility filtering for the type catalog
//!
//! A filter pass walks the whole arena once and decides, per node, whether
//! its row is shown (`included`) and whether it counts toward the
//! "N of M" tallies (`visible`). Categories stay included while their own
//! ancestors are expanded so the tree remains navigable, but they are never
//! visible themselves.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::{DocumentedTypeNode, NodeId, TypeCatalog};

/// Which node field the search text is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Label,
    Tags,
}

impl SearchField {
    /// Option text shown in the search field selector
    pub fn option_text(self) -> &'static str {
        match self {
            SearchField::Label => "by type",
            SearchField::Tags => "by tag",
        }
    }

    fn value<'a>(self, node: &'a DocumentedTypeNode) -> &'a str {
        match self {
            SearchField::Label => &node.label,
            SearchField::Tags => &node.tags,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Label => write!(f, "label"),
            SearchField::Tags => write!(f, "tags"),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "label" | "type" => Ok(SearchField::Label),
            "tags" | "tag" => Ok(SearchField::Tags),
            _ => Err(format!(
                "invalid search field '{s}', expected 'type' or 'tag'"
            )),
        }
    }
}

/// Current filter inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub field: SearchField,
    /// Lowercased tags that every shown leaf must contain
    pub selected_tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, field: SearchField) -> Self {
        Self {
            search: search.into(),
            field,
            selected_tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_tags = tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect();
        self
    }
}

/// Compiled form of the search text
enum SearchPattern {
    Any,
    Invalid,
    Regex(Regex),
}

impl SearchPattern {
    fn compile(search: &str) -> Self {
        if search.is_empty() {
            return SearchPattern::Any;
        }

        match RegexBuilder::new(search).case_insensitive(true).build() {
            Ok(regex) => SearchPattern::Regex(regex),
            Err(e) => {
                tracing::debug!("search text is not a valid pattern, matching nothing: {e}");
                SearchPattern::Invalid
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            SearchPattern::Any => true,
            SearchPattern::Invalid => false,
            SearchPattern::Regex(regex) => regex.is_match(text),
        }
    }
}

/// True when every selected tag occurs, case-insensitively, in `tags`
pub fn matches_selected_tags(selected_tags: &BTreeSet<String>, tags: &str) -> bool {
    if selected_tags.is_empty() {
        return true;
    }

    let normalized = tags.to_lowercase();
    selected_tags
        .iter()
        .all(|tag| normalized.contains(tag.to_lowercase().as_str()))
}

/// Result of one filter pass, indexed by [`NodeId`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    included: Vec<bool>,
    visible: Vec<bool>,
}

impl Visibility {
    /// Whether the node's row is shown
    pub fn is_included(&self, id: NodeId) -> bool {
        self.included.get(id.0).copied().unwrap_or(false)
    }

    /// Whether the node counts toward visible tallies; always false for categories
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.visible.get(id.0).copied().unwrap_or(false)
    }

    /// Ids of all shown rows, in catalog order
    pub fn included_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.included
            .iter()
            .enumerate()
            .filter(|(_, included)| **included)
            .map(|(index, _)| NodeId(index))
    }

    /// Number of shown leaf rows
    pub fn displayed_leaf_count(&self, catalog: &TypeCatalog) -> usize {
        self.included_ids()
            .filter(|id| catalog.get(*id).is_some_and(|n| n.is_leaf()))
            .count()
    }

    /// Number of direct children of `id` that are visible
    pub fn visible_children(&self, catalog: &TypeCatalog, id: NodeId) -> usize {
        catalog
            .get(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter(|child| self.is_visible(**child))
                    .count()
            })
            .unwrap_or(0)
    }
}

/// Run one filter pass over the whole catalog.
///
/// Per node, in order of precedence:
/// 1. a collapsed ancestor excludes the node;
/// 2. a category is included but not visible;
/// 3. a leaf is included and visible when it matches both the search text,
///    as a case-insensitive pattern against the selected field, and every
///    selected tag. An invalid pattern matches nothing.
pub fn compute_visibility(catalog: &TypeCatalog, criteria: &FilterCriteria) -> Visibility {
    let pattern = SearchPattern::compile(&criteria.search);
    let mut visibility = Visibility {
        included: vec![false; catalog.len()],
        visible: vec![false; catalog.len()],
    };

    for node in catalog.nodes() {
        let index = node.id.0;

        if !catalog.are_ancestors_expanded(node.id) {
            continue;
        }

        if node.is_category() {
            visibility.included[index] = true;
            continue;
        }

        let matches = pattern.is_match(criteria.field.value(node))
            && matches_selected_tags(&criteria.selected_tags, &node.tags);
        visibility.included[index] = matches;
        visibility.visible[index] = matches;
    }

    visibility
}
