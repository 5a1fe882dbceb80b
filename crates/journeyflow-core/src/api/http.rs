use async_trait::async_trait;
use journeyflow_models::{
    ConnectionRequest, Journey, JourneyId, JourneySave, StepDraft, StepRecord, StepUpdate,
    Workflow,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::JourneyApi;
use crate::config::ClientConfig;
use crate::error::{Result, SyncError};

/// [`JourneyApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpJourneyApi {
    client: Client,
    base_url: Url,
}

impl HttpJourneyApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder, failure: &str) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "{}", failure);
        Err(SyncError::Status {
            status: status.as_u16(),
            message: failure.to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, failure: &str) -> Result<T> {
        let response = self.send(request, failure).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl JourneyApi for HttpJourneyApi {
    async fn list_journeys(&self) -> Result<Vec<Journey>> {
        let request = self.request(Method::GET, "api/journeys")?;
        self.fetch(request, "Failed to fetch journeys").await
    }

    async fn get_journey(&self, journey_id: i64) -> Result<Journey> {
        let request = self.request(Method::GET, &format!("api/journeys/{}", journey_id))?;
        self.fetch(request, "Failed to fetch journey data").await
    }

    async fn get_workflow(&self, journey_id: i64) -> Result<Workflow> {
        let request =
            self.request(Method::GET, &format!("api/journeys/{}/workflow", journey_id))?;
        self.fetch(request, "Failed to fetch workflow data").await
    }

    async fn create_step(&self, journey_id: i64, draft: &StepDraft) -> Result<StepRecord> {
        let request = self
            .request(Method::POST, &format!("api/journeys/{}/steps", journey_id))?
            .json(draft);
        self.fetch(request, "Failed to add step").await
    }

    async fn update_step(
        &self,
        journey_id: i64,
        step_id: i64,
        update: &StepUpdate,
    ) -> Result<StepRecord> {
        let request = self
            .request(
                Method::PUT,
                &format!("api/journeys/{}/steps/{}", journey_id, step_id),
            )?
            .json(update);
        self.fetch(request, "Failed to update step").await
    }

    async fn delete_step(&self, journey_id: i64, step_id: i64) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &format!("api/journeys/{}/steps/{}", journey_id, step_id),
        )?;
        self.send(request, "Failed to delete step").await?;
        Ok(())
    }

    async fn create_connection(
        &self,
        journey_id: i64,
        connection: ConnectionRequest,
    ) -> Result<()> {
        let request = self
            .request(
                Method::POST,
                &format!("api/journeys/{}/connections", journey_id),
            )?
            .json(&connection);
        self.send(request, "Failed to save connection").await?;
        Ok(())
    }

    async fn delete_connection(
        &self,
        journey_id: i64,
        connection: ConnectionRequest,
    ) -> Result<()> {
        let request = self
            .request(
                Method::DELETE,
                &format!("api/journeys/{}/connections", journey_id),
            )?
            .json(&connection);
        self.send(request, "Failed to delete connection").await?;
        Ok(())
    }

    async fn save_journey(&self, id: JourneyId, body: &JourneySave) -> Result<Journey> {
        let request = match id {
            JourneyId::New => self.request(Method::POST, "api/journeys")?,
            JourneyId::Persisted(id) => {
                self.request(Method::PUT, &format!("api/journeys/{}", id))?
            }
        };
        let saved: Journey = self
            .fetch(request.json(body), "Failed to save journey")
            .await?;
        info!(
            journey = saved.id,
            steps = body.steps.len(),
            connections = body.connections.len(),
            "Journey saved"
        );
        Ok(saved)
    }

    async fn delete_journey(&self, journey_id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/journeys/{}", journey_id))?;
        self.send(request, "Failed to delete journey").await?;
        Ok(())
    }
}
