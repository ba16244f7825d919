//! Hierarchical catalog of documented component types.
//!
//! The server describes available controller service and reporting task
//! implementations as a tree of documented types. [`TypeCatalog`] flattens
//! that tree into an arena addressed by [`NodeId`], so the list can be
//! filtered and rendered as flat rows while keeping parent/child links.

pub mod filter;
pub mod rows;
pub mod tags;

use serde::Serialize;

use crate::remote::DocumentedType;
use crate::utils::text::{escape_html, substring_after_last};

pub use filter::{FilterCriteria, SearchField, Visibility, compute_visibility};
pub use rows::{Expansion, RowKind, TypeRow, format_rows, render_rows_text};
pub use tags::TagCloud;

/// Stable index of a node in a [`TypeCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One catalog entry: a concrete implementation (leaf) or a grouping category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentedTypeNode {
    pub id: NodeId,
    /// Simple name, the part of the type after its last `.`
    pub label: String,
    /// Fully-qualified type name
    pub type_name: String,
    /// HTML-escaped description, empty when the server sent none
    pub description: String,
    /// Tags joined with ", "
    pub tags: String,
    pub collapsed: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl DocumentedTypeNode {
    /// Categories have children and are never selectable
    pub fn is_category(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of documented type nodes in depth-first pre-order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeCatalog {
    nodes: Vec<DocumentedTypeNode>,
}

impl TypeCatalog {
    /// Flatten a documented type tree.
    ///
    /// Ids are assigned sequentially with each parent numbered before its
    /// children. Every tag seen is collected, lowercased, into the returned
    /// tag cloud.
    pub fn load(types: &[DocumentedType]) -> (Self, TagCloud) {
        let mut catalog = TypeCatalog::default();
        let mut tag_cloud = TagCloud::default();

        for documented_type in types {
            catalog.add_type(None, documented_type, &mut tag_cloud);
        }

        tracing::debug!(
            "loaded {} documented types ({} leaves, {} distinct tags)",
            catalog.len(),
            catalog.leaf_count(),
            tag_cloud.len()
        );

        (catalog, tag_cloud)
    }

    fn add_type(
        &mut self,
        parent: Option<NodeId>,
        documented_type: &DocumentedType,
        tag_cloud: &mut TagCloud,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocumentedTypeNode {
            id,
            label: substring_after_last(&documented_type.type_name, '.').to_string(),
            type_name: documented_type.type_name.clone(),
            description: documented_type
                .description
                .as_deref()
                .map(escape_html)
                .unwrap_or_default(),
            tags: documented_type.tags.join(", "),
            collapsed: false,
            parent,
            children: Vec::new(),
        });

        for tag in &documented_type.tags {
            tag_cloud.add(tag);
        }

        for child_type in &documented_type.child_types {
            let child = self.add_type(Some(id), child_type, tag_cloud);
            self.nodes[id.0].children.push(child);
        }

        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&DocumentedTypeNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[DocumentedTypeNode] {
        &self.nodes
    }

    /// Number of concrete (leaf) types
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            catalog: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// Number of ancestor hops to the root
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// True unless some ancestor of `id` is collapsed
    pub fn are_ancestors_expanded(&self, id: NodeId) -> bool {
        self.ancestors(id).all(|ancestor| !ancestor.collapsed)
    }

    /// Flip the collapsed flag of a category.
    ///
    /// Returns false, leaving the catalog untouched, when `id` is unknown or a leaf.
    pub fn toggle_collapsed(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) if node.is_category() => {
                node.collapsed = !node.collapsed;
                true
            }
            _ => false,
        }
    }

    /// Find a node by fully-qualified type name, falling back to its label
    pub fn find_by_type(&self, type_name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.type_name == type_name)
            .or_else(|| self.nodes.iter().find(|n| n.label == type_name))
            .map(|n| n.id)
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    catalog: &'a TypeCatalog,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a DocumentedTypeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.catalog.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::sample_types;
    use super::*;

    #[test]
    fn test_load_assigns_preorder_ids() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let labels: Vec<&str> = catalog.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Database", "DbcpPool", "Caches", "RedisCache", "MapCache", "SslContextService"]
        );
        for (index, node) in catalog.nodes().iter().enumerate() {
            assert_eq!(node.id, NodeId(index));
        }
    }

    #[test]
    fn test_load_links_parents_and_children() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let database = catalog.get(NodeId(0)).unwrap();
        assert_eq!(database.children, vec![NodeId(1), NodeId(2)]);
        assert_eq!(catalog.get(NodeId(3)).unwrap().parent, Some(NodeId(2)));
        assert_eq!(catalog.get(NodeId(5)).unwrap().parent, None);
        assert_eq!(catalog.nodes().iter().filter(|n| n.parent.is_none()).count(), 2);
    }

    #[test]
    fn test_load_formats_fields() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let pool = catalog.get(NodeId(1)).unwrap();
        assert_eq!(pool.type_name, "org.example.db.DbcpPool");
        assert_eq!(pool.description, "Pools &lt;JDBC&gt; connections");
        assert_eq!(pool.tags, "JDBC, pool");
        assert!(!pool.collapsed);

        let map_cache = catalog.get(NodeId(4)).unwrap();
        assert_eq!(map_cache.description, "");
    }

    #[test]
    fn test_load_collects_lowercased_tag_multiset() {
        let (_, tags) = TypeCatalog::load(&sample_types());
        assert_eq!(tags.count("cache"), 2);
        assert_eq!(tags.count("jdbc"), 1);
        assert_eq!(tags.count("JDBC"), 1);
        assert_eq!(tags.len(), 7);
    }

    #[test]
    fn test_leaf_count_and_depth() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        assert_eq!(catalog.leaf_count(), 4);
        assert_eq!(catalog.depth(NodeId(0)), 0);
        assert_eq!(catalog.depth(NodeId(1)), 1);
        assert_eq!(catalog.depth(NodeId(4)), 2);
    }

    #[test]
    fn test_toggle_collapsed_only_affects_categories() {
        let (mut catalog, _) = TypeCatalog::load(&sample_types());
        assert!(catalog.toggle_collapsed(NodeId(2)));
        assert!(catalog.get(NodeId(2)).unwrap().collapsed);
        assert!(!catalog.are_ancestors_expanded(NodeId(3)));
        assert!(catalog.are_ancestors_expanded(NodeId(2)));

        assert!(!catalog.toggle_collapsed(NodeId(1)));
        assert!(!catalog.toggle_collapsed(NodeId(99)));

        assert!(catalog.toggle_collapsed(NodeId(2)));
        assert!(catalog.are_ancestors_expanded(NodeId(3)));
    }

    #[test]
    fn test_collapsed_grandparent_hides_grandchildren() {
        let (mut catalog, _) = TypeCatalog::load(&sample_types());
        catalog.toggle_collapsed(NodeId(0));
        assert!(!catalog.are_ancestors_expanded(NodeId(4)));
    }

    #[test]
    fn test_find_by_type_or_label() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        assert_eq!(catalog.find_by_type("org.example.db.RedisCache"), Some(NodeId(3)));
        assert_eq!(catalog.find_by_type("MapCache"), Some(NodeId(4)));
        assert_eq!(catalog.find_by_type("Missing"), None);
    }

    #[test]
    fn test_load_empty() {
        let (catalog, tags) = TypeCatalog::load(&[]);
        assert!(catalog.is_empty());
        assert!(tags.is_empty());
        assert_eq!(catalog.leaf_count(), 0);
    }
}
