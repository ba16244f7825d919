//! Network operations of the settings dialog.
//!
//! Each function issues exactly one request and returns the action to feed
//! into [`reduce_settings_state`](super::model::reduce_settings_state).
//! Failures come back as [`SettingsAction::RequestFailed`] so they reach the
//! shared error path; nothing is retried. Callers may run several of these
//! concurrently and apply the results in whatever order they complete.

use crate::error::FlowsetError;
use crate::remote::{ControllerApi, Revision};

use super::form::ConfigurationForm;
use super::model::SettingsAction;
use super::state::Operation;

fn failed(operation: Operation, error: FlowsetError) -> SettingsAction {
    SettingsAction::RequestFailed {
        operation,
        message: error.to_string(),
    }
}

/// Fetch the current configuration for the General tab
pub async fn load_config<A: ControllerApi>(api: &A) -> SettingsAction {
    match api.get_config().await {
        Ok(entity) => SettingsAction::ConfigLoaded(entity),
        Err(e) => failed(Operation::LoadConfig, e),
    }
}

/// Submit the form together with the revision it was edited against
pub async fn save_config<A: ControllerApi>(
    api: &A,
    form: &ConfigurationForm,
    revision: &Revision,
) -> SettingsAction {
    let update = form.marshal(revision);
    match api.update_config(&update).await {
        Ok(entity) => SettingsAction::ConfigSaved(entity),
        Err(e) => failed(Operation::SaveConfig, e),
    }
}

/// Request a new flow archive
pub async fn archive_flow<A: ControllerApi>(api: &A, revision: &Revision) -> SettingsAction {
    match api.create_archive(revision).await {
        Ok(entity) => SettingsAction::Archived(entity),
        Err(e) => failed(Operation::ArchiveFlow, e),
    }
}

pub async fn load_controller_service_types<A: ControllerApi>(api: &A) -> SettingsAction {
    match api.controller_service_types().await {
        Ok(types) => SettingsAction::ControllerServiceTypesLoaded(types),
        Err(e) => failed(Operation::LoadControllerServiceTypes, e),
    }
}

pub async fn load_reporting_task_types<A: ControllerApi>(api: &A) -> SettingsAction {
    match api.reporting_task_types().await {
        Ok(types) => SettingsAction::ReportingTaskTypesLoaded(types),
        Err(e) => failed(Operation::LoadReportingTaskTypes, e),
    }
}
