//! reqwest-backed implementation of [`ControllerApi`].
//!
//! Mutating calls are sent as form-encoded bodies, reads return JSON. No call
//! is retried: every failure is handed back to the caller unchanged.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FlowsetError, Result};

use super::{
    ApiError, ArchiveEntity, ConfigEntity, ConfigUpdate, ControllerApi,
    ControllerServiceTypesEntity, DocumentedType, ReportingTaskTypesEntity, Revision, endpoints,
};

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the controller REST API
#[derive(Debug, Clone)]
pub struct ControllerClient {
    client: Client,
    base_url: Url,
}

impl ControllerClient {
    /// Create a client rooted at `base_url`.
    ///
    /// The connect timeout is capped at 30s and never exceeds the total timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FlowsetError::InvalidUrl(path.to_string(), e))
    }

    /// Send a request and decode the JSON body of a successful response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<T> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| warn!("{operation} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_body(status, &body);
            warn!("{operation} rejected: {error}");
            return Err(error.into());
        }

        debug!("{operation} succeeded with {status}");
        Ok(response.json::<T>().await?)
    }
}

impl ControllerApi for ControllerClient {
    async fn get_config(&self) -> Result<ConfigEntity> {
        let url = self.endpoint(endpoints::CONTROLLER_CONFIG)?;
        debug!("GET {url}");
        self.send(self.client.get(url), "load configuration").await
    }

    async fn update_config(&self, update: &ConfigUpdate) -> Result<ConfigEntity> {
        let url = self.endpoint(endpoints::CONTROLLER_CONFIG)?;
        debug!("PUT {url} (revision {})", update.version);
        self.send(self.client.put(url).form(update), "save configuration")
            .await
    }

    async fn create_archive(&self, revision: &Revision) -> Result<ArchiveEntity> {
        let url = self.endpoint(endpoints::CONTROLLER_ARCHIVE)?;
        debug!("POST {url} (revision {})", revision.version);
        self.send(self.client.post(url).form(revision), "archive flow")
            .await
    }

    async fn controller_service_types(&self) -> Result<Vec<DocumentedType>> {
        let url = self.endpoint(endpoints::CONTROLLER_SERVICE_TYPES)?;
        debug!("GET {url}");
        let entity: ControllerServiceTypesEntity = self
            .send(self.client.get(url), "load controller service types")
            .await?;
        Ok(entity.controller_service_types)
    }

    async fn reporting_task_types(&self) -> Result<Vec<DocumentedType>> {
        let url = self.endpoint(endpoints::REPORTING_TASK_TYPES)?;
        debug!("GET {url}");
        let entity: ReportingTaskTypesEntity = self
            .send(self.client.get(url), "load reporting task types")
            .await?;
        Ok(entity.reporting_task_types)
    }
}
