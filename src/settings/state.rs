//! State types for the settings dialog

use std::fmt;

use serde::Serialize;

/// Tabs of the settings dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SettingsTab {
    #[default]
    General,
    ControllerServices,
    ReportingTasks,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [
        SettingsTab::General,
        SettingsTab::ControllerServices,
        SettingsTab::ReportingTasks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::ControllerServices => "Controller Services",
            SettingsTab::ReportingTasks => "Reporting Tasks",
        }
    }

    /// Tooltip of the "create new" action, which is hidden on the General tab
    pub fn new_action_tooltip(self) -> Option<&'static str> {
        match self {
            SettingsTab::General => None,
            SettingsTab::ControllerServices => Some("Create a new controller service"),
            SettingsTab::ReportingTasks => Some("Create a new reporting task"),
        }
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Network operations whose failures are routed to the shared error path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    LoadConfig,
    SaveConfig,
    ArchiveFlow,
    LoadControllerServiceTypes,
    LoadReportingTaskTypes,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Operation::LoadConfig => "Unable to load settings",
            Operation::SaveConfig => "Unable to save settings",
            Operation::ArchiveFlow => "Unable to archive flow",
            Operation::LoadControllerServiceTypes => "Unable to load controller service types",
            Operation::LoadReportingTaskTypes => "Unable to load reporting task types",
        };
        write!(f, "{title}")
    }
}

/// Error shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub operation: Operation,
    pub message: String,
}

impl ErrorNotice {
    pub fn title(&self) -> String {
        self.operation.to_string()
    }
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)
    }
}
