//! Integration tests for the controller REST client and the settings
//! operations, run against a mock controller.

use std::time::Duration;

use flowset::config::parse_base_url;
use flowset::error::FlowsetError;
use flowset::remote::{ConfigUpdate, ControllerApi, ControllerClient, Revision};
use flowset::settings::{
    FormField, Operation, SettingsAction, SettingsState, operations, reduce_all,
    reduce_settings_state,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ControllerClient {
    let base_url = parse_base_url(&format!("{}/nifi-api", server.uri())).unwrap();
    ControllerClient::new(base_url, Duration::from_secs(5)).unwrap()
}

fn config_response(version: i64, name: &str) -> serde_json::Value {
    json!({
        "revision": {"version": version, "clientId": "client-a"},
        "config": {
            "name": name,
            "comments": "Primary flow",
            "maxTimerDrivenThreadCount": 10,
            "maxEventDrivenThreadCount": 5
        }
    })
}

// ============================================================================
// Client requests
// ============================================================================

#[tokio::test]
async fn test_get_config_parses_revision_and_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nifi-api/controller/config"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_response(3, "Ingest")))
        .expect(1)
        .mount(&server)
        .await;

    let entity = client_for(&server).get_config().await.unwrap();
    assert_eq!(entity.revision, Some(Revision::new(3, "client-a")));
    let config = entity.config.unwrap();
    assert_eq!(config.name.as_deref(), Some("Ingest"));
    assert_eq!(config.max_timer_driven_thread_count, Some(10));
}

#[tokio::test]
async fn test_update_config_sends_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/nifi-api/controller/config"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("name=Egress"))
        .and(body_string_contains("maxTimerDrivenThreadCount=12"))
        .and(body_string_contains("version=3"))
        .and(body_string_contains("clientId=client-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_response(4, "Egress")))
        .expect(1)
        .mount(&server)
        .await;

    let update = ConfigUpdate {
        name: "Egress".to_string(),
        comments: String::new(),
        max_timer_driven_thread_count: "12".to_string(),
        max_event_driven_thread_count: "5".to_string(),
        version: 3,
        client_id: Some("client-a".to_string()),
    };
    let entity = client_for(&server).update_config(&update).await.unwrap();
    assert_eq!(entity.revision.unwrap().version, 4);
}

#[tokio::test]
async fn test_create_archive_posts_revision() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nifi-api/controller/archive"))
        .and(body_string_contains("version=7"))
        .and(body_string_contains("clientId=client-a"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "revision": {"version": 8, "clientId": "client-a"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entity = client_for(&server)
        .create_archive(&Revision::new(7, "client-a"))
        .await
        .unwrap();
    assert_eq!(entity.revision.version, 8);
}

#[tokio::test]
async fn test_type_endpoints_unwrap_entities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nifi-api/controller/controller-service-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "controllerServiceTypes": [
                {"type": "org.example.Database", "childTypes": [
                    {"type": "org.example.db.DbcpPool", "tags": ["jdbc"]}
                ]}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nifi-api/controller/reporting-task-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reportingTaskTypes": [
                {"type": "org.example.reporting.MonitorDiskUsage", "description": "Warns on full disks", "tags": ["disk"]}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let services = client.controller_service_types().await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].child_types[0].type_name, "org.example.db.DbcpPool");

    let tasks = client.reporting_task_types().await.unwrap();
    assert_eq!(tasks[0].description.as_deref(), Some("Warns on full disks"));
}

#[tokio::test]
async fn test_conflict_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/nifi-api/controller/config"))
        .respond_with(ResponseTemplate::new(409).set_body_string("revision 3 is not the most up-to-date"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_config(&ConfigUpdate::default())
        .await
        .unwrap_err();
    match err {
        FlowsetError::Api { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("not the most up-to-date"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_empty_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nifi-api/controller/config"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).get_config().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "API error (503): Service Unavailable (the controller is unavailable, try again later)"
    );
}

// ============================================================================
// Operations feeding the reducer
// ============================================================================

#[tokio::test]
async fn test_save_adopts_new_revision_then_show_matches() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/nifi-api/controller/config"))
        .and(body_string_contains("version=3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_response(4, "Egress")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nifi-api/controller/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_response(4, "Egress")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let state = reduce_all(
        SettingsState::with_client_id("client-a"),
        [
            SettingsAction::ConfigLoaded(
                serde_json::from_value(config_response(3, "Ingest")).unwrap(),
            ),
            SettingsAction::FormEdited(FormField::Name, "Egress".to_string()),
        ],
    );

    let saved = operations::save_config(&client, &state.form, &state.revision).await;
    let state = reduce_settings_state(state, saved);
    assert_eq!(state.revision, Revision::new(4, "client-a"));
    assert_eq!(state.header_text, "Egress Settings");
    assert_eq!(state.status_message.as_deref(), Some("Settings successfully applied."));

    let shown = reduce_settings_state(
        SettingsState::with_client_id("client-a"),
        operations::load_config(&client).await,
    );
    assert_eq!(shown.form, state.form);
}

#[tokio::test]
async fn test_failed_archive_is_routed_to_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nifi-api/controller/archive"))
        .respond_with(ResponseTemplate::new(409).set_body_string("stale revision"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let state = SettingsState::with_client_id("client-a");
    let action = operations::archive_flow(&client, &state.revision).await;
    let state = reduce_settings_state(state, action);

    let error = state.last_error.expect("archive should fail");
    assert_eq!(error.operation, Operation::ArchiveFlow);
    assert!(error.message.contains("stale revision"));
    assert!(state.status_message.is_none());
}

#[tokio::test]
async fn test_unreachable_controller_is_routed_to_last_error() {
    // Nothing listens on the mock server's address once it is dropped
    let base_url = {
        let server = MockServer::start().await;
        parse_base_url(&server.uri()).unwrap()
    };
    let client = ControllerClient::new(base_url, Duration::from_secs(2)).unwrap();

    let action = operations::load_controller_service_types(&client).await;
    match action {
        SettingsAction::RequestFailed { operation, .. } => {
            assert_eq!(operation, Operation::LoadControllerServiceTypes);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
