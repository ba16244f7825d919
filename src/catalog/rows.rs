//! Row formatting for the flattened type tree.
//!
//! Each shown node becomes a [`TypeRow`] carrying its indentation and either
//! an expand/collapse affordance with a visible-children rollup (categories)
//! or its label and tags (leaves). Rendering targets turn rows into markup
//! or text; [`render_rows_text`] is the plain-text one used by the CLI.

use serde::Serialize;

use super::{NodeId, TypeCatalog, Visibility};

/// Indentation added per tree level
pub const INDENT_PER_LEVEL_PX: u32 = 10;
/// Left padding of a leaf label below a category, and of a category label after its toggle
pub const LABEL_PADDING_PX: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expansion {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowKind {
    Category {
        expansion: Expansion,
        label: String,
        label_margin_px: u32,
        visible_children: usize,
        total_children: usize,
    },
    Leaf {
        label: String,
        tags: String,
        padding_px: u32,
    },
}

/// One rendered row of the type list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRow {
    pub id: NodeId,
    pub depth: usize,
    pub indent_px: u32,
    /// Only leaves can be selected
    pub selectable: bool,
    #[serde(flatten)]
    pub kind: RowKind,
}

impl TypeRow {
    pub fn label(&self) -> &str {
        match &self.kind {
            RowKind::Category { label, .. } | RowKind::Leaf { label, .. } => label,
        }
    }
}

/// Format a single node, regardless of whether it is currently shown
pub fn format_row(catalog: &TypeCatalog, visibility: &Visibility, id: NodeId) -> Option<TypeRow> {
    let node = catalog.get(id)?;
    let depth = catalog.depth(id);
    let indent_px = INDENT_PER_LEVEL_PX * depth as u32;

    let kind = if node.is_category() {
        RowKind::Category {
            expansion: if node.collapsed {
                Expansion::Collapsed
            } else {
                Expansion::Expanded
            },
            label: node.label.clone(),
            label_margin_px: LABEL_PADDING_PX,
            visible_children: visibility.visible_children(catalog, id),
            total_children: node.children.len(),
        }
    } else {
        let padding = if node.parent.is_none() {
            0
        } else {
            LABEL_PADDING_PX
        };
        RowKind::Leaf {
            label: node.label.clone(),
            tags: node.tags.clone(),
            padding_px: indent_px + padding,
        }
    };

    Some(TypeRow {
        id,
        depth,
        indent_px,
        selectable: node.is_leaf(),
        kind,
    })
}

/// Format every shown node, in catalog order
pub fn format_rows(catalog: &TypeCatalog, visibility: &Visibility) -> Vec<TypeRow> {
    visibility
        .included_ids()
        .filter_map(|id| format_row(catalog, visibility, id))
        .collect()
}

/// Render rows as indented text.
///
/// Two spaces per tree level; categories get a `▾`/`▸` toggle and an
/// "(N of M)" rollup, nested leaves line up under their parent's label. The
/// selected row is marked with `>`.
pub fn render_rows_text(rows: &[TypeRow], selected: Option<NodeId>) -> String {
    rows.iter()
        .map(|row| {
            let marker = if Some(row.id) == selected { "> " } else { "  " };
            let indent = "  ".repeat(row.depth);
            match &row.kind {
                RowKind::Category {
                    expansion,
                    label,
                    visible_children,
                    total_children,
                    ..
                } => {
                    let toggle = match expansion {
                        Expansion::Expanded => '▾',
                        Expansion::Collapsed => '▸',
                    };
                    format!("{marker}{indent}{toggle} {label} ({visible_children} of {total_children})")
                }
                RowKind::Leaf {
                    label,
                    tags,
                    padding_px,
                } => {
                    let padding = if *padding_px > row.indent_px { "  " } else { "" };
                    if tags.is_empty() {
                        format!("{marker}{indent}{padding}{label}")
                    } else {
                        format!("{marker}{indent}{padding}{label}  [{tags}]")
                    }
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::sample_types;
    use crate::catalog::{FilterCriteria, SearchField, compute_visibility};

    #[test]
    fn test_category_row_has_rollup_and_toggle() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let visibility = compute_visibility(&catalog, &FilterCriteria::default());
        let row = format_row(&catalog, &visibility, NodeId(2)).unwrap();
        assert_eq!(row.depth, 1);
        assert_eq!(row.indent_px, 10);
        assert!(!row.selectable);
        assert_eq!(
            row.kind,
            RowKind::Category {
                expansion: Expansion::Expanded,
                label: "Caches".to_string(),
                label_margin_px: 3,
                visible_children: 2,
                total_children: 2,
            }
        );
    }

    #[test]
    fn test_leaf_padding_depends_on_root_level() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let visibility = compute_visibility(&catalog, &FilterCriteria::default());

        let root_leaf = format_row(&catalog, &visibility, NodeId(5)).unwrap();
        match root_leaf.kind {
            RowKind::Leaf { padding_px, .. } => assert_eq!(padding_px, 0),
            other => panic!("expected leaf, got {other:?}"),
        }

        let nested_leaf = format_row(&catalog, &visibility, NodeId(4)).unwrap();
        assert_eq!(nested_leaf.indent_px, 20);
        match nested_leaf.kind {
            RowKind::Leaf { padding_px, .. } => assert_eq!(padding_px, 23),
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_rollup_reflects_filter() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let criteria = FilterCriteria::new("redis", SearchField::Label);
        let visibility = compute_visibility(&catalog, &criteria);
        let rows = format_rows(&catalog, &visibility);
        let labels: Vec<&str> = rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["Database", "Caches", "RedisCache"]);

        match &rows[1].kind {
            RowKind::Category {
                visible_children,
                total_children,
                ..
            } => {
                assert_eq!(*visible_children, 1);
                assert_eq!(*total_children, 2);
            }
            other => panic!("expected category, got {other:?}"),
        }
    }

    #[test]
    fn test_collapsed_category_renders_closed_toggle() {
        let (mut catalog, _) = TypeCatalog::load(&sample_types());
        catalog.toggle_collapsed(NodeId(2));
        let visibility = compute_visibility(&catalog, &FilterCriteria::default());
        let rows = format_rows(&catalog, &visibility);
        let text = render_rows_text(&rows, None);
        assert!(text.contains("▸ Caches (0 of 2)"));
        assert!(!text.contains("RedisCache"));
    }

    #[test]
    fn test_render_rows_text() {
        let (catalog, _) = TypeCatalog::load(&sample_types());
        let visibility = compute_visibility(&catalog, &FilterCriteria::default());
        let rows = format_rows(&catalog, &visibility);
        let text = render_rows_text(&rows, Some(NodeId(3)));
        let expected = [
            "  ▾ Database (1 of 2)",
            "      DbcpPool  [JDBC, pool]",
            "    ▾ Caches (2 of 2)",
            ">       RedisCache  [cache, redis]",
            "        MapCache  [Cache, distributed]",
            "  SslContextService  [ssl, tls]",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }
}
