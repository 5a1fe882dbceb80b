//! Remote side of the designer: one trait method per API call.

mod http;

pub use http::HttpJourneyApi;

use async_trait::async_trait;
use journeyflow_models::{
    ConnectionRequest, Journey, JourneyId, JourneySave, StepDraft, StepRecord, StepUpdate,
    Workflow,
};

use crate::error::Result;

/// CRUD surface of the journey backend.
///
/// Any non-2xx answer is a [`crate::SyncError::Status`]. Implementations do
/// not retry.
#[async_trait]
pub trait JourneyApi: Send + Sync {
    /// All journeys, in whatever order the server returns them.
    async fn list_journeys(&self) -> Result<Vec<Journey>>;
    async fn get_journey(&self, journey_id: i64) -> Result<Journey>;
    async fn get_workflow(&self, journey_id: i64) -> Result<Workflow>;

    async fn create_step(&self, journey_id: i64, draft: &StepDraft) -> Result<StepRecord>;
    async fn update_step(
        &self,
        journey_id: i64,
        step_id: i64,
        update: &StepUpdate,
    ) -> Result<StepRecord>;
    async fn delete_step(&self, journey_id: i64, step_id: i64) -> Result<()>;

    async fn create_connection(&self, journey_id: i64, connection: ConnectionRequest)
    -> Result<()>;
    async fn delete_connection(&self, journey_id: i64, connection: ConnectionRequest)
    -> Result<()>;

    /// Creates the journey when `id` is [`JourneyId::New`], replaces it otherwise.
    async fn save_journey(&self, id: JourneyId, body: &JourneySave) -> Result<Journey>;
    async fn delete_journey(&self, journey_id: i64) -> Result<()>;
}
