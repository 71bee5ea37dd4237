use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api::{ApiError, Backend, Paginated};
use super::config_service;
use super::dto::{
    AddLinkRequest, CreateMaterialRequest, CreateProjectRequest, IdPayload, IngestRequest,
    ItemWire, ProjectWire, RecommendationItemWire, ResourceItemWire, SummaryItemWire, SummaryWire,
    ToggleFixedWire,
};

/// HTTP client for the InfoBridge REST backend. No retry, no timeout, no
/// auth headers; non-2xx responses become transport errors carrying the
/// status.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL (scheme + host, no `/api`).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the app's configuration.
    pub fn from_config() -> Self {
        Self::new(&config_service::get_effective_base_url())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport { status, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }

    /// POST where the response body is irrelevant; only the status matters.
    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn list_projects(&self) -> Result<Paginated<ProjectWire>, ApiError> {
        self.get_json("/projects/").await
    }

    async fn create_project(&self, body: &CreateProjectRequest) -> Result<ProjectWire, ApiError> {
        self.post_json("/projects/", body).await
    }

    async fn get_project(&self, project_id: i64) -> Result<ProjectWire, ApiError> {
        self.get_json(&format!("/projects/{}/", project_id)).await
    }

    async fn create_material(&self, body: &CreateMaterialRequest) -> Result<(), ApiError> {
        self.post_unit("/materials/", body).await
    }

    async fn create_items_by_code(
        &self,
        project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/projects/{}/create_items_from_external_matches_by_code/", project_id),
            body,
        )
        .await
    }

    async fn create_items_by_keyword(
        &self,
        project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/projects/{}/create_items_from_external_matches_by_keyword/", project_id),
            body,
        )
        .await
    }

    async fn list_items(&self, project_id: i64) -> Result<Vec<ItemWire>, ApiError> {
        self.get_json(&format!("/projects/{}/items/", project_id)).await
    }

    async fn trigger_summarize(&self, project_id: i64) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/projects/{}/summarize-items/", project_id),
            &IdPayload { id: project_id },
        )
        .await
    }

    async fn list_summaries(&self, project_id: i64) -> Result<Vec<SummaryWire>, ApiError> {
        self.get_json(&format!("/projects/{}/summaries/", project_id)).await
    }

    async fn list_resources(
        &self,
        project_id: i64,
    ) -> Result<Paginated<ResourceItemWire>, ApiError> {
        self.post_json("/resources", &IdPayload { id: project_id }).await
    }

    async fn list_summary_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<SummaryItemWire>, ApiError> {
        self.post_json("/summaries", &IdPayload { id: project_id }).await
    }

    async fn list_recommendation_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<RecommendationItemWire>, ApiError> {
        self.post_json("/recommendations", &IdPayload { id: project_id }).await
    }

    async fn toggle_fixed(&self, item_id: i64) -> Result<ToggleFixedWire, ApiError> {
        self.patch_json(
            &format!("/items/{}/toggle_fixed/", item_id),
            &IdPayload { id: item_id },
        )
        .await
    }

    async fn add_link(
        &self,
        project_id: i64,
        body: &AddLinkRequest,
    ) -> Result<ResourceItemWire, ApiError> {
        self.put_json(&format!("/items/{}/", project_id), body).await
    }
}
