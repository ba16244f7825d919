//! General tab commands: show, edit and archive the controller configuration.

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Session};
use crate::cli::OutputOptions;
use crate::error::{FlowsetError, Result};
use crate::settings::{ConfigurationForm, FormField, SettingsAction, SettingsState, operations};

/// Load the configuration into the session, failing when the response has none
async fn load(session: &mut Session) -> Result<()> {
    let action = operations::load_config(&session.client).await;
    if let SettingsAction::ConfigLoaded(entity) = &action
        && entity.config.is_none()
    {
        return Err(FlowsetError::MissingConfig);
    }
    session.apply(action)
}

fn format_form(form: &ConfigurationForm) -> String {
    FormField::ALL
        .into_iter()
        .map(|field| format!("{}: {}", field.label().cyan(), form.get(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn settings_json(state: &SettingsState) -> serde_json::Value {
    json!({
        "header": state.header_text,
        "config": state.form,
        "revision": state.revision,
    })
}

/// Show the general settings
pub async fn cmd_general_show(api_url: Option<&str>, output: OutputOptions) -> Result<()> {
    let mut session = Session::connect(api_url)?;
    load(&mut session).await?;

    let state = &session.state;
    let text = format!(
        "{}\n\n{}\n\n{}",
        state.header_text.bold(),
        format_form(&state.form),
        format!("revision {}", state.revision.version).dimmed()
    );

    CommandOutput::new(settings_json(state))
        .with_text(text)
        .print(output)
}

/// Edit the general settings.
///
/// The current configuration is loaded first so unspecified fields keep
/// their values and the save carries the latest revision.
pub async fn cmd_general_set(
    api_url: Option<&str>,
    edits: Vec<(FormField, String)>,
    output: OutputOptions,
) -> Result<()> {
    if edits.is_empty() {
        return Err(FlowsetError::Other(
            "nothing to change; pass at least one of --name, --comments, --max-timer-driven-threads, --max-event-driven-threads".to_string(),
        ));
    }

    let mut session = Session::connect(api_url)?;
    load(&mut session).await?;

    for (field, value) in edits {
        session.apply(SettingsAction::FormEdited(field, value))?;
    }

    let action =
        operations::save_config(&session.client, &session.state.form, &session.state.revision)
            .await;
    session.apply(action)?;

    let state = &session.state;
    let status = state.status_message.clone().unwrap_or_default();
    let mut json_output = settings_json(state);
    json_output["status"] = json!(status);

    let text = format!("{}\n\n{}", status.green(), format_form(&state.form));
    CommandOutput::new(json_output)
        .with_text(text)
        .print(output)
}

/// Create a new flow archive
pub async fn cmd_general_archive(api_url: Option<&str>, output: OutputOptions) -> Result<()> {
    let mut session = Session::connect(api_url)?;
    load(&mut session).await?;

    let action = operations::archive_flow(&session.client, &session.state.revision).await;
    session.apply(action)?;

    let state = &session.state;
    let status = state.status_message.clone().unwrap_or_default();
    CommandOutput::new(json!({
        "status": status,
        "revision": state.revision,
    }))
    .with_text(status.green().to_string())
    .print(output)
}
