//! Settings dialog model types for testable state management
//!
//! State ([`SettingsState`]) is separated from the view ([`SettingsViewModel`]).
//! User commands and network completions are both [`SettingsAction`]s applied
//! by the pure [`reduce_settings_state`] reducer, so every transition can be
//! tested without a server or a rendering target.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{NodeId, SearchField, TypeRow, format_rows};
use crate::remote::{ArchiveEntity, ConfigEntity, DocumentedType, Revision};
use crate::utils::text::is_blank;

use super::browser::TypeBrowser;
use super::form::{ConfigurationForm, FormField};
use super::state::{ErrorNotice, Operation, SettingsTab};

pub const SETTINGS_APPLIED: &str = "Settings successfully applied.";
pub const ARCHIVE_CREATED: &str = "A new flow archive was successfully created.";
pub const NO_DESCRIPTION: &str = "No description specified";
pub const FILTER_PLACEHOLDER: &str = "Filter";

// ============================================================================
// State Types
// ============================================================================

/// Raw state of one settings dialog instance
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    /// Currently selected tab
    pub active_tab: SettingsTab,
    /// Whether the settings dialog has been shown
    pub settings_visible: bool,
    /// Dialog header, "<flow name> Settings"
    pub header_text: String,
    /// Flow name shown outside the dialog, updated after a save
    pub flow_title: Option<String>,
    /// General tab form
    pub form: ConfigurationForm,
    /// Revision to send with the next mutating call
    pub revision: Revision,
    /// Catalog behind the new controller service dialog
    pub controller_services: TypeBrowser,
    /// Catalog of reporting task types
    pub reporting_tasks: TypeBrowser,
    /// Whether the new controller service dialog is open
    pub new_controller_service_dialog_open: bool,
    /// Confirmation of the last successful mutation
    pub status_message: Option<String>,
    /// Last routed failure
    pub last_error: Option<ErrorNotice>,
}

impl SettingsState {
    /// Create state that will stamp `client_id` on revisions the server returns without one
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            revision: Revision {
                version: 0,
                client_id: Some(client_id.into()),
            },
            ..Default::default()
        }
    }

    /// Browser the filter and selection commands apply to
    pub fn active_browser(&self) -> &TypeBrowser {
        match self.active_tab {
            SettingsTab::ReportingTasks => &self.reporting_tasks,
            _ => &self.controller_services,
        }
    }

    fn active_browser_mut(&mut self) -> &mut TypeBrowser {
        match self.active_tab {
            SettingsTab::ReportingTasks => &mut self.reporting_tasks,
            _ => &mut self.controller_services,
        }
    }

    fn adopt_revision(&mut self, revision: Revision) {
        let client_id = revision.client_id.or_else(|| self.revision.client_id.take());
        info!(
            "revision {} -> {}",
            self.revision.version, revision.version
        );
        self.revision = Revision {
            version: revision.version,
            client_id,
        };
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// All possible actions on the settings dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    // Shell
    /// Switch tabs
    SelectTab(SettingsTab),
    /// The "create new" button
    NewServiceOrTask,
    /// Close the new controller service dialog
    CloseNewServiceDialog,

    // Type list
    /// Search text edited
    SearchChanged(String),
    /// Search field selector changed
    SearchFieldChanged(SearchField),
    /// Tag clicked in the tag cloud
    TagToggled(String),
    /// Category expand/collapse toggle clicked
    NodeToggled(NodeId),
    /// Row selected
    NodeSelected(NodeId),
    /// Clear the detail panel
    ClearSelection,

    // General tab
    /// Form field edited
    FormEdited(FormField, String),

    // Network completions
    ConfigLoaded(ConfigEntity),
    ConfigSaved(ConfigEntity),
    Archived(ArchiveEntity),
    ControllerServiceTypesLoaded(Vec<DocumentedType>),
    ReportingTaskTypesLoaded(Vec<DocumentedType>),
    RequestFailed {
        operation: Operation,
        message: String,
    },

    // Notices
    DismissError,
    DismissStatus,
}

// ============================================================================
// View Model Types
// ============================================================================

/// Computed view model for rendering the settings dialog
#[derive(Debug, Clone, Serialize)]
pub struct SettingsViewModel {
    pub header_text: String,
    pub flow_title: Option<String>,
    pub tabs: Vec<TabViewModel>,
    /// The "create new" action; absent on the General tab
    pub new_action: Option<NewActionViewModel>,
    pub form: ConfigurationForm,
    pub type_list: TypeListViewModel,
    pub detail: DetailViewModel,
    pub new_controller_service_dialog_open: bool,
    pub status_message: Option<String>,
    pub error: Option<ErrorNotice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabViewModel {
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewActionViewModel {
    pub tooltip: &'static str,
}

/// View model for the filterable type list of the active tab
#[derive(Debug, Clone, Serialize)]
pub struct TypeListViewModel {
    pub rows: Vec<TypeRow>,
    /// Leaves currently shown
    pub displayed_count: usize,
    /// Leaves in the catalog
    pub total_count: usize,
    pub search: String,
    /// Placeholder shown while the search text is empty
    pub search_placeholder: Option<&'static str>,
    pub search_field: SearchField,
    /// Selector text for `search_field`
    pub search_field_text: &'static str,
    pub tags: Vec<TagViewModel>,
    pub selected: Option<NodeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagViewModel {
    pub tag: String,
    pub count: usize,
    pub selected: bool,
}

/// Selected type details; every field is empty while nothing is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailViewModel {
    pub description: String,
    /// True when the description is the "no description" placeholder
    pub description_unset: bool,
    pub name: String,
    pub type_name: String,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// Pure function: compute view model from state
pub fn compute_settings_view_model(state: &SettingsState) -> SettingsViewModel {
    let browser = state.active_browser();

    SettingsViewModel {
        header_text: state.header_text.clone(),
        flow_title: state.flow_title.clone(),
        tabs: SettingsTab::ALL
            .into_iter()
            .map(|tab| TabViewModel {
                name: tab.name(),
                selected: tab == state.active_tab,
            })
            .collect(),
        new_action: state
            .active_tab
            .new_action_tooltip()
            .map(|tooltip| NewActionViewModel { tooltip }),
        form: state.form.clone(),
        type_list: compute_type_list(browser),
        detail: compute_detail(browser),
        new_controller_service_dialog_open: state.new_controller_service_dialog_open,
        status_message: state.status_message.clone(),
        error: state.last_error.clone(),
    }
}

fn compute_type_list(browser: &TypeBrowser) -> TypeListViewModel {
    TypeListViewModel {
        rows: format_rows(&browser.catalog, &browser.visibility),
        displayed_count: browser.displayed_count(),
        total_count: browser.total_count(),
        search: browser.search.clone(),
        search_placeholder: browser.search.is_empty().then_some(FILTER_PLACEHOLDER),
        search_field: browser.field,
        search_field_text: browser.field.option_text(),
        tags: browser
            .tag_cloud
            .tags()
            .map(|(tag, count)| TagViewModel {
                tag: tag.to_string(),
                count,
                selected: browser.tag_cloud.is_selected(tag),
            })
            .collect(),
        selected: browser.selection.node(),
    }
}

/// Detail panel contents for the current selection
pub fn compute_detail(browser: &TypeBrowser) -> DetailViewModel {
    let Some(node) = browser
        .selection
        .node()
        .and_then(|id| browser.catalog.get(id))
    else {
        return DetailViewModel::default();
    };

    let description_unset = is_blank(&node.description);
    DetailViewModel {
        description: if description_unset {
            NO_DESCRIPTION.to_string()
        } else {
            node.description.clone()
        },
        description_unset,
        name: node.label.clone(),
        type_name: node.type_name.clone(),
    }
}

/// Pure function: apply action to state (reducer pattern)
///
/// Network requests are not issued here; see [`super::operations`] for the
/// functions that perform them and return the completion action.
pub fn reduce_settings_state(mut state: SettingsState, action: SettingsAction) -> SettingsState {
    match action {
        // Shell
        SettingsAction::SelectTab(tab) => {
            state.active_tab = tab;
        }
        SettingsAction::NewServiceOrTask => match state.active_tab {
            SettingsTab::ControllerServices => {
                state.new_controller_service_dialog_open = true;
            }
            SettingsTab::General | SettingsTab::ReportingTasks => {}
        },
        SettingsAction::CloseNewServiceDialog => {
            state.new_controller_service_dialog_open = false;
            state.controller_services.reset();
        }

        // Type list
        SettingsAction::SearchChanged(search) => {
            state.active_browser_mut().set_search(search);
        }
        SettingsAction::SearchFieldChanged(field) => {
            state.active_browser_mut().set_field(field);
        }
        SettingsAction::TagToggled(tag) => {
            state.active_browser_mut().toggle_tag(&tag);
        }
        SettingsAction::NodeToggled(id) => {
            state.active_browser_mut().toggle_node(id);
        }
        SettingsAction::NodeSelected(id) => {
            state.active_browser_mut().select_node(id);
        }
        SettingsAction::ClearSelection => {
            state.active_browser_mut().clear_selection();
        }

        // General tab
        SettingsAction::FormEdited(field, value) => {
            state.form.set(field, value);
        }

        // Network completions
        SettingsAction::ConfigLoaded(entity) => {
            if let Some(revision) = entity.revision {
                state.adopt_revision(revision);
            }
            if let Some(config) = entity.config {
                let name = config.name.clone().unwrap_or_default();
                state.header_text = format!("{name} Settings");
                state.form = ConfigurationForm::from_config(&config);
            }
            state.settings_visible = true;
        }
        SettingsAction::ConfigSaved(entity) => {
            if let Some(revision) = entity.revision {
                state.adopt_revision(revision);
            }
            if let Some(config) = entity.config {
                let name = config.name.unwrap_or_default();
                state.header_text = format!("{name} Settings");
                state.flow_title = Some(name);
            }
            state.status_message = Some(SETTINGS_APPLIED.to_string());
        }
        SettingsAction::Archived(entity) => {
            state.adopt_revision(entity.revision);
            state.status_message = Some(ARCHIVE_CREATED.to_string());
        }
        SettingsAction::ControllerServiceTypesLoaded(types) => {
            state.controller_services.load(&types);
        }
        SettingsAction::ReportingTaskTypesLoaded(types) => {
            state.reporting_tasks.load(&types);
        }
        SettingsAction::RequestFailed { operation, message } => {
            warn!("{operation}: {message}");
            state.last_error = Some(ErrorNotice { operation, message });
        }

        // Notices
        SettingsAction::DismissError => {
            state.last_error = None;
        }
        SettingsAction::DismissStatus => {
            state.status_message = None;
        }
    }

    state
}

/// Apply a sequence of actions in order
pub fn reduce_all<I>(state: SettingsState, actions: I) -> SettingsState
where
    I: IntoIterator<Item = SettingsAction>,
{
    actions.into_iter().fold(state, reduce_settings_state)
}
