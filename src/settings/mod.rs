//! Controller settings dialog
//!
//! A headless model of the tabbed settings dialog: general configuration
//! form, controller service type browser and reporting task type browser.

pub mod browser;
pub mod form;
pub mod model;
pub mod operations;
pub mod state;


pub use browser::{Selection, TypeBrowser};
pub use form::{ConfigurationForm, FormField};
pub use model::{
    DetailViewModel, SettingsAction, SettingsState, SettingsViewModel, TypeListViewModel,
    compute_detail, compute_settings_view_model, reduce_all, reduce_settings_state,
};
pub use state::{ErrorNotice, Operation, SettingsTab};
