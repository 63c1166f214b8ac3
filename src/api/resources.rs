use crate::client::{ClientError, HttpGateway};
use crate::models::{Resource, ResourceCreate, ResourceStats, ResourceUpdate};

const RESOURCES_PATH: &str = "/api/resources";
const STATS_PATH: &str = "/api/resources/stats/overview";

fn item_path(id: i64) -> String {
    format!("{}/{}", RESOURCES_PATH, id)
}

/// CRUD over `/api/resources` plus the stats overview.
pub struct ResourceApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> ResourceApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        ResourceApi { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Resource>, ClientError> {
        self.gateway.get(RESOURCES_PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<Resource, ClientError> {
        self.gateway.get(&item_path(id)).await
    }

    pub async fn create(&self, resource: &ResourceCreate) -> Result<Resource, ClientError> {
        self.gateway.post(RESOURCES_PATH, resource).await
    }

    pub async fn update(&self, id: i64, changes: &ResourceUpdate) -> Result<Resource, ClientError> {
        self.gateway.put(&item_path(id), changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.gateway.delete(&item_path(id)).await
    }

    pub async fn stats(&self) -> Result<ResourceStats, ClientError> {
        self.gateway.get(STATS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ProgressStatus, ResourceCreate, ResourceUpdate, TokenPair};
    use crate::state::test_state;
    use mockito::{Matcher, Server};
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_with_only_name() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/resources")
            .match_body(Matcher::Json(json!({"name": "Rust Book"})))
            .with_status(201)
            .with_body(r#"{"id": 5, "name": "Rust Book", "user_id": 1, "progress_status": "not_started", "hours_spent": 0}"#)
            .create_async()
            .await;
        let fetch = server
            .mock("GET", "/api/resources/5")
            .with_status(200)
            .with_body(r#"{"id": 5, "name": "Rust Book", "user_id": 1, "resource_type_id": null, "resource_platform_id": null}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        let created = state
            .resources()
            .create(&ResourceCreate::new("Rust Book"))
            .await
            .unwrap();
        let fetched = state.resources().get(created.id).await.unwrap();

        create.assert_async().await;
        fetch.assert_async().await;
        assert_eq!(fetched.resource_type_id, None);
        assert_eq!(fetched.resource_platform_id, None);
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/api/resources/5")
            .match_body(Matcher::Json(json!({"progress_status": "completed", "hours_spent": 12})))
            .with_status(200)
            .with_body(r#"{"id": 5, "name": "Rust Book", "progress_status": "completed", "hours_spent": 12}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        let updated = state
            .resources()
            .update(
                5,
                &ResourceUpdate {
                    progress_status: Some(ProgressStatus::Completed),
                    hours_spent: Some(12),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(updated.status(), ProgressStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/resources/5")
            .with_status(204)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        state.resources().delete(5).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_missing_resource() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/resources/404")
            .with_status(404)
            .with_body(r#"{"detail": "Resource not found or not authorized"}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        let err = state.resources().get(404).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.detail(), "Resource not found or not authorized");
    }

    #[tokio::test]
    async fn test_stats_with_integer_rate() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/resources/stats/overview")
            .with_status(200)
            .with_body(
                r#"{"total_resources": 0, "completed_resources": 0, "in_progress_resources": 0,
                    "not_started_resources": 0, "completion_rate": 0, "total_estimated_hours": 0,
                    "total_hours_spent": 0}"#,
            )
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        let stats = state.resources().stats().await.unwrap();
        assert_eq!(stats.total_resources, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }
}
