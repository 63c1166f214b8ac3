use tracing::info;

use crate::client::{ApiRequest, ClientError, HttpGateway};
use crate::models::ai::RecommendationsResponse;
use crate::models::{
    AiResourceRequest, MasteryPrediction, NoteSummary, Recommendation, ResourceCategorization,
    ResourceInsights,
};

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 5;

/// The AI enrichment endpoints under `/api/ai`.
pub struct AiApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> AiApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        AiApi { gateway }
    }

    pub async fn recommendations(&self, limit: u32) -> Result<Vec<Recommendation>, ClientError> {
        let request = ApiRequest::get("/api/ai/recommendations").query("limit", limit);
        let response: RecommendationsResponse = self.gateway.fetch(request).await?;
        Ok(response.recommendations)
    }

    /// Summarizes the resource's notes; with `save`, the summary and tags
    /// are stored on the resource.
    pub async fn summarize_notes(&self, resource_id: i64, save: bool) -> Result<NoteSummary, ClientError> {
        info!(
            event_name = "ai.summarize.requested",
            event_domain = "ai",
            resource_id,
            "summarizing notes"
        );
        self.gateway
            .post("/api/ai/summarize-notes", &request(resource_id, save))
            .await
    }

    pub async fn predict_mastery(
        &self,
        resource_id: i64,
        save: bool,
    ) -> Result<MasteryPrediction, ClientError> {
        info!(
            event_name = "ai.predict.requested",
            event_domain = "ai",
            resource_id,
            "predicting mastery date"
        );
        self.gateway
            .post("/api/ai/predict-mastery", &request(resource_id, save))
            .await
    }

    pub async fn categorize(
        &self,
        resource_id: i64,
        save: bool,
    ) -> Result<ResourceCategorization, ClientError> {
        info!(
            event_name = "ai.categorize.requested",
            event_domain = "ai",
            resource_id,
            "categorizing resource"
        );
        self.gateway
            .post("/api/ai/categorize", &request(resource_id, save))
            .await
    }

    pub async fn insights(&self, resource_id: i64) -> Result<ResourceInsights, ClientError> {
        self.gateway
            .get(&format!("/api/ai/insights/{}", resource_id))
            .await
    }
}

fn request(resource_id: i64, save_to_resource: bool) -> AiResourceRequest {
    AiResourceRequest {
        resource_id,
        save_to_resource,
    }
}
