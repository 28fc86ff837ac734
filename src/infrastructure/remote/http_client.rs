use crate::application::ports::remote_api::RemoteApi;
use crate::domain::entities::{Dataset, MeasurementDraft};
use crate::infrastructure::remote::dto::{
    dataset_from_dto, DatasetDto, HelloResponseDto, NewMeasurementDto,
};
use crate::infrastructure::remote::error::RemoteError;
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// HTTP adapter for the remote API. One client, one timeout, no retries;
/// the orchestrator's natural triggers are the retry policy.
pub struct HttpRemoteApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteApi {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|err| AppError::ConfigurationError(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn get_datasets(&self) -> Result<Vec<Dataset>, AppError> {
        let response = self
            .client
            .get(self.url("datasets"))
            .send()
            .await
            .map_err(RemoteError::from)?;
        let response = Self::ensure_success(response).await?;
        let dtos: Vec<DatasetDto> = response
            .json()
            .await
            .map_err(|err| RemoteError::InvalidPayload(err.to_string()))?;

        debug!("Fetched {} datasets from remote", dtos.len());
        dtos.into_iter().map(dataset_from_dto).collect()
    }

    async fn upsert_dataset(&self, dataset: &Dataset) -> Result<(), AppError> {
        let response = self
            .client
            .put(self.url("datasets"))
            .json(&DatasetDto::from(dataset))
            .send()
            .await
            .map_err(RemoteError::from)?;
        Self::ensure_success(response).await?;
        debug!("Upserted dataset '{}' remotely", dataset.slug);
        Ok(())
    }

    async fn add_measurement(&self, draft: &MeasurementDraft) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.url("measurements"))
            .json(&NewMeasurementDto::from(draft))
            .send()
            .await
            .map_err(RemoteError::from)?;
        Self::ensure_success(response).await?;
        debug!("Appended measurement to '{}' remotely", draft.dataset_slug);
        Ok(())
    }

    async fn hello(&self, name: Option<&str>) -> Result<String, AppError> {
        let mut request = self.client.get(self.url("hello"));
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        let response = request.send().await.map_err(RemoteError::from)?;
        let response = Self::ensure_success(response).await?;
        let body: HelloResponseDto = response
            .json()
            .await
            .map_err(|err| RemoteError::InvalidPayload(err.to_string()))?;
        Ok(body.greeting)
    }
}
