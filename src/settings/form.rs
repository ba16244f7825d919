//! General settings form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::remote::{ConfigUpdate, ControllerConfig, Revision};

/// Editable fields of the general settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Comments,
    MaxTimerDrivenThreadCount,
    MaxEventDrivenThreadCount,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Comments,
        FormField::MaxTimerDrivenThreadCount,
        FormField::MaxEventDrivenThreadCount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Data flow name",
            FormField::Comments => "Data flow comments",
            FormField::MaxTimerDrivenThreadCount => "Maximum timer driven thread count",
            FormField::MaxEventDrivenThreadCount => "Maximum event driven thread count",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            FormField::Name => "name",
            FormField::Comments => "comments",
            FormField::MaxTimerDrivenThreadCount => "max-timer-driven-threads",
            FormField::MaxEventDrivenThreadCount => "max-event-driven-threads",
        };
        write!(f, "{key}")
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.to_string() == s)
            .ok_or_else(|| format!("unknown settings field '{s}'"))
    }
}

/// The four values as entered; thread counts are not validated client-side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigurationForm {
    pub name: String,
    pub comments: String,
    pub max_timer_driven_thread_count: String,
    pub max_event_driven_thread_count: String,
}

impl ConfigurationForm {
    /// Populate the form from a server configuration
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            name: config.name.clone().unwrap_or_default(),
            comments: config.comments.clone().unwrap_or_default(),
            max_timer_driven_thread_count: config
                .max_timer_driven_thread_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            max_event_driven_thread_count: config
                .max_event_driven_thread_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Comments => &self.comments,
            FormField::MaxTimerDrivenThreadCount => &self.max_timer_driven_thread_count,
            FormField::MaxEventDrivenThreadCount => &self.max_event_driven_thread_count,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Comments => self.comments = value,
            FormField::MaxTimerDrivenThreadCount => self.max_timer_driven_thread_count = value,
            FormField::MaxEventDrivenThreadCount => self.max_event_driven_thread_count = value,
        }
    }

    /// Build the update request body carrying the current revision
    pub fn marshal(&self, revision: &Revision) -> ConfigUpdate {
        ConfigUpdate {
            name: self.name.clone(),
            comments: self.comments.clone(),
            max_timer_driven_thread_count: self.max_timer_driven_thread_count.clone(),
            max_event_driven_thread_count: self.max_event_driven_thread_count.clone(),
            version: revision.version,
            client_id: revision.client_id.clone(),
        }
    }
}
