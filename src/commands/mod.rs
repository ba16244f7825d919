//! Command implementations for the `flowset` binary.
//!
//! Every command builds a JSON value and, for human output, a text rendering;
//! [`CommandOutput`] prints whichever the caller asked for.

mod config;
mod general;
mod types;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use general::{cmd_general_archive, cmd_general_set, cmd_general_show};
pub use types::{TypesOptions, cmd_types};

use serde_json::Value;
use tracing::debug;

use crate::cli::OutputOptions;
use crate::config::{Config, parse_base_url};
use crate::error::{FlowsetError, Result};
use crate::remote::ControllerClient;
use crate::settings::{SettingsAction, SettingsState, reduce_settings_state};

/// Result of a command in both output formats
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print as pretty JSON when requested (or when there is no text form)
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// A controller connection plus the dialog state the command drives
pub struct Session {
    pub client: ControllerClient,
    pub state: SettingsState,
}

impl Session {
    /// Connect using the stored configuration.
    ///
    /// `api_url` comes from the global `--api-url` flag and wins over both the
    /// environment and the config file. A client id is generated and persisted
    /// on first use.
    pub fn connect(api_url: Option<&str>) -> Result<Self> {
        let mut config = Config::load()?;
        let (client_id, generated) = config.ensure_client_id();
        if generated {
            config.save()?;
            debug!("generated client id {client_id}");
        }

        let base_url = match api_url {
            Some(url) => parse_base_url(url)?,
            None => config.base_url()?,
        };
        debug!("using controller at {base_url}");
        let client = ControllerClient::new(base_url, config.timeout())?;

        Ok(Self {
            client,
            state: SettingsState::with_client_id(client_id),
        })
    }

    /// Feed an action through the reducer, surfacing a routed failure as an error
    pub fn apply(&mut self, action: SettingsAction) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        self.state = reduce_settings_state(state, action);
        match self.state.last_error.take() {
            Some(notice) => Err(FlowsetError::Other(notice.to_string())),
            None => Ok(()),
        }
    }
}
