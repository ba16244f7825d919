//! Controller REST API access.
//!
//! This module holds the wire types exchanged with the controller and the
//! [`ControllerApi`] trait that the settings operations are written against.

pub mod client;
pub mod error;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use client::ControllerClient;
pub use error::ApiError;

/// Endpoint paths, relative to the configured API base URL
pub mod endpoints {
    pub const CONTROLLER_CONFIG: &str = "controller/config";
    pub const CONTROLLER_ARCHIVE: &str = "controller/archive";
    pub const CONTROLLER_SERVICE_TYPES: &str = "controller/controller-service-types";
    pub const REPORTING_TASK_TYPES: &str = "controller/reporting-task-types";
}

/// Optimistic-concurrency token that must be round-tripped unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    #[serde(default)]
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Revision {
    pub fn new(version: i64, client_id: impl Into<String>) -> Self {
        Self {
            version,
            client_id: Some(client_id.into()),
        }
    }
}

/// Global controller configuration as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerConfig {
    pub name: Option<String>,
    pub comments: Option<String>,
    pub max_timer_driven_thread_count: Option<i32>,
    pub max_event_driven_thread_count: Option<i32>,
}

/// Response of `GET`/`PUT controller/config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntity {
    #[serde(default)]
    pub revision: Option<Revision>,
    #[serde(default)]
    pub config: Option<ControllerConfig>,
}

/// Response of `POST controller/archive`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntity {
    pub revision: Revision,
}

/// Form body of `PUT controller/config`.
///
/// Thread counts are sent exactly as entered; the server validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub name: String,
    pub comments: String,
    pub max_timer_driven_thread_count: String,
    pub max_event_driven_thread_count: String,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// One entry of a type catalog response; categories carry child types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub child_types: Vec<DocumentedType>,
}

impl DocumentedType {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<DocumentedType>) -> Self {
        self.child_types = children;
        self
    }
}

/// Response of `GET controller/controller-service-types`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerServiceTypesEntity {
    #[serde(default)]
    pub controller_service_types: Vec<DocumentedType>,
}

/// Response of `GET controller/reporting-task-types`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingTaskTypesEntity {
    #[serde(default)]
    pub reporting_task_types: Vec<DocumentedType>,
}

/// Operations the settings dialog needs from the controller
pub trait ControllerApi: Send + Sync {
    /// Fetch the current controller configuration
    fn get_config(&self) -> impl std::future::Future<Output = Result<ConfigEntity>> + Send;

    /// Replace the controller configuration
    fn update_config(
        &self,
        update: &ConfigUpdate,
    ) -> impl std::future::Future<Output = Result<ConfigEntity>> + Send;

    /// Archive the current flow
    fn create_archive(
        &self,
        revision: &Revision,
    ) -> impl std::future::Future<Output = Result<ArchiveEntity>> + Send;

    /// Fetch the controller service type tree
    fn controller_service_types(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DocumentedType>>> + Send;

    /// Fetch the reporting task type tree
    fn reporting_task_types(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DocumentedType>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_entity_without_revision() {
        let json = r#"{"config":{"name":"Flow","comments":null,"maxTimerDrivenThreadCount":10,"maxEventDrivenThreadCount":5}}"#;
        let entity: ConfigEntity = serde_json::from_str(json).unwrap();
        assert!(entity.revision.is_none());
        let config = entity.config.unwrap();
        assert_eq!(config.name.as_deref(), Some("Flow"));
        assert!(config.comments.is_none());
        assert_eq!(config.max_timer_driven_thread_count, Some(10));
        assert_eq!(config.max_event_driven_thread_count, Some(5));
    }

    #[test]
    fn test_config_entity_missing_config() {
        let entity: ConfigEntity = serde_json::from_str("{}").unwrap();
        assert!(entity.config.is_none());
    }

    #[test]
    fn test_documented_type_nested() {
        let json = r#"{
            "type": "org.example.Services",
            "tags": [],
            "childTypes": [
                {"type": "org.example.DbcpService", "description": "Pool", "tags": ["jdbc", "Pool"]}
            ]
        }"#;
        let parsed: DocumentedType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.type_name, "org.example.Services");
        assert_eq!(parsed.child_types.len(), 1);
        assert_eq!(parsed.child_types[0].tags, vec!["jdbc", "Pool"]);
        assert!(parsed.child_types[0].child_types.is_empty());
    }

    #[test]
    fn test_config_update_form_encoding() {
        let update = ConfigUpdate {
            name: "My Flow".to_string(),
            comments: "a&b".to_string(),
            max_timer_driven_thread_count: "10".to_string(),
            max_event_driven_thread_count: "5".to_string(),
            version: 3,
            client_id: Some("abc".to_string()),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["maxTimerDrivenThreadCount"], "10");
        assert_eq!(value["version"], 3);
        assert_eq!(value["clientId"], "abc");
    }

    #[test]
    fn test_revision_skips_missing_client_id() {
        let value = serde_json::to_value(Revision::default()).unwrap();
        assert_eq!(value, serde_json::json!({"version": 0}));
    }
}
