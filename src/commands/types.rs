//! Browse the controller service and reporting task type catalogs.

use owo_colors::OwoColorize;
use serde_json::json;
use tracing::warn;

use super::{CommandOutput, Session};
use crate::catalog::{NodeId, SearchField, render_rows_text};
use crate::cli::OutputOptions;
use crate::error::{FlowsetError, Result};
use crate::settings::{
    SettingsAction, SettingsTab, TypeListViewModel, compute_settings_view_model, operations,
};
use crate::utils::unescape_html;

/// Filter and selection inputs for [`cmd_types`]
#[derive(Debug, Clone, Default)]
pub struct TypesOptions {
    /// Controller Services or Reporting Tasks
    pub tab: SettingsTab,
    pub filter: Option<String>,
    pub field: SearchField,
    pub tags: Vec<String>,
    /// Fully qualified types (or labels) of categories to collapse
    pub collapse: Vec<String>,
    /// Fully qualified type (or label) of the leaf to show details for
    pub select: Option<String>,
}

fn find_node(session: &Session, type_name: &str) -> Result<NodeId> {
    session
        .state
        .active_browser()
        .catalog
        .find_by_type(type_name)
        .ok_or_else(|| FlowsetError::TypeNotFound(type_name.to_string()))
}

fn format_tags(list: &TypeListViewModel) -> String {
    list.tags
        .iter()
        .map(|tag| {
            let entry = format!("{} ({})", tag.tag, tag.count);
            if tag.selected {
                format!("*{}", entry.green())
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// List the type catalog of a tab, applying the same filters as the dialog
pub async fn cmd_types(
    api_url: Option<&str>,
    options: TypesOptions,
    output: OutputOptions,
) -> Result<()> {
    let mut session = Session::connect(api_url)?;
    session.apply(SettingsAction::SelectTab(options.tab))?;

    let loaded = match options.tab {
        SettingsTab::ReportingTasks => operations::load_reporting_task_types(&session.client).await,
        _ => operations::load_controller_service_types(&session.client).await,
    };
    session.apply(loaded)?;

    for type_name in &options.collapse {
        let id = find_node(&session, type_name)?;
        session.apply(SettingsAction::NodeToggled(id))?;
    }
    for tag in &options.tags {
        if !session.state.active_browser().tag_cloud.is_selected(tag) {
            session.apply(SettingsAction::TagToggled(tag.clone()))?;
        }
    }
    session.apply(SettingsAction::SearchFieldChanged(options.field))?;
    if let Some(filter) = options.filter {
        session.apply(SettingsAction::SearchChanged(filter))?;
    }
    if let Some(type_name) = &options.select {
        let id = find_node(&session, type_name)?;
        session.apply(SettingsAction::NodeSelected(id))?;
        if session.state.active_browser().selection.node() != Some(id) {
            warn!("'{type_name}' is not a shown type and cannot be selected");
        }
    }

    let view = compute_settings_view_model(&session.state);
    let list = &view.type_list;
    let detail = list.selected.map(|_| &view.detail);

    let json_output = json!({
        "tab": options.tab.name(),
        "rows": list.rows,
        "displayed_count": list.displayed_count,
        "total_count": list.total_count,
        "search": list.search,
        "search_field": list.search_field,
        "search_field_text": list.search_field_text,
        "tags": list.tags,
        "detail": detail,
    });

    let mut text = String::new();
    text.push_str(&render_rows_text(&list.rows, list.selected));
    text.push_str(&format!(
        "\n\nDisplaying {} of {}",
        list.displayed_count, list.total_count
    ));
    if !list.search.is_empty() {
        text.push_str(&format!(
            "\n{} {} ({})",
            "Filter:".cyan(),
            list.search,
            list.search_field_text
        ));
    }
    if !list.tags.is_empty() {
        text.push_str(&format!("\n{} {}", "Tags:".cyan(), format_tags(list)));
    }
    if let Some(detail) = detail {
        text.push_str(&format!(
            "\n\n{} {}\n{} {}\n{} {}",
            "Name:".cyan(),
            detail.name,
            "Type:".cyan(),
            detail.type_name,
            "Description:".cyan(),
            unescape_html(&detail.description)
        ));
    }

    CommandOutput::new(json_output).with_text(text).print(output)
}
