//! Filterable type browser with a single-selection detail panel.

use crate::catalog::{
    FilterCriteria, NodeId, SearchField, TagCloud, TypeCatalog, Visibility, compute_visibility,
};
use crate::remote::DocumentedType;

/// Detail panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(NodeId),
}

impl Selection {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }
}

/// A loaded type catalog together with its filter inputs, last filter pass
/// and selection.
#[derive(Debug, Clone, Default)]
pub struct TypeBrowser {
    pub catalog: TypeCatalog,
    pub tag_cloud: TagCloud,
    pub search: String,
    pub field: SearchField,
    pub visibility: Visibility,
    pub selection: Selection,
    pub loaded: bool,
}

impl TypeBrowser {
    /// Replace the catalog with a freshly loaded tree.
    ///
    /// Filter inputs survive a reload; the selection does not, since node ids
    /// are reassigned.
    pub fn load(&mut self, types: &[DocumentedType]) {
        let (catalog, mut tag_cloud) = TypeCatalog::load(types);
        for tag in self.tag_cloud.selected() {
            tag_cloud.select(tag);
        }
        self.catalog = catalog;
        self.tag_cloud = tag_cloud;
        self.selection = Selection::Unselected;
        self.loaded = true;
        self.refresh();
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            field: self.field,
            selected_tags: self.tag_cloud.selected().clone(),
        }
    }

    /// Re-run the filter pass and drop a selection that is no longer shown
    pub fn refresh(&mut self) {
        self.visibility = compute_visibility(&self.catalog, &self.criteria());
        if let Selection::Selected(id) = self.selection
            && !self.visibility.is_included(id)
        {
            tracing::debug!("selected type {} filtered out, clearing selection", id.0);
            self.selection = Selection::Unselected;
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refresh();
    }

    pub fn set_field(&mut self, field: SearchField) {
        self.field = field;
        self.refresh();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.tag_cloud.toggle(tag);
        self.refresh();
    }

    /// Expand or collapse a category; leaves are ignored
    pub fn toggle_node(&mut self, id: NodeId) {
        if self.catalog.toggle_collapsed(id) {
            self.refresh();
        }
    }

    /// Select a shown leaf. Categories and hidden rows are ignored.
    pub fn select_node(&mut self, id: NodeId) {
        let selectable = self.catalog.get(id).is_some_and(|n| n.is_leaf())
            && self.visibility.is_included(id);
        if selectable {
            self.selection = Selection::Selected(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::Unselected;
    }

    /// Clear selection, search text and selected tags
    pub fn reset(&mut self) {
        self.selection = Selection::Unselected;
        self.search.clear();
        self.tag_cloud.clear_selected();
        self.refresh();
    }

    /// Leaves currently shown
    pub fn displayed_count(&self) -> usize {
        self.visibility.displayed_leaf_count(&self.catalog)
    }

    /// Leaves in the catalog
    pub fn total_count(&self) -> usize {
        self.catalog.leaf_count()
    }
}
