pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod paths;
pub mod remote;
pub mod settings;
pub mod utils;

pub use catalog::{NodeId, SearchField, TagCloud, TypeCatalog, Visibility, compute_visibility};
pub use config::Config;
pub use error::{FlowsetError, Result};
pub use remote::{ControllerApi, ControllerClient, DocumentedType, Revision};
pub use settings::{
    SettingsAction, SettingsState, SettingsTab, compute_settings_view_model, reduce_settings_state,
};
