use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dto::{
    AddLinkRequest, CreateMaterialRequest, CreateProjectRequest, IngestRequest, ItemWire,
    ProjectWire, RecommendationItemWire, ResourceItemWire, SummaryItemWire, SummaryWire,
    ToggleFixedWire,
};

/// Failure surface of the backend API. Read hooks absorb these into their
/// error state; mutation paths return them so composite workflows can abort
/// subsequent phases. Commands flatten them to strings for the webview.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("API error ({status}): {body}")]
    Transport { status: u16, body: String },
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Envelope returned by the paginated list endpoints. The cursors are
/// surfaced to the caller but never auto-followed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Map the result rows while keeping count and cursors.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// One method per backend endpoint, so the stores and workflows can run
/// against an in-memory substitute in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_projects(&self) -> Result<Paginated<ProjectWire>, ApiError>;
    async fn create_project(&self, body: &CreateProjectRequest) -> Result<ProjectWire, ApiError>;
    async fn get_project(&self, project_id: i64) -> Result<ProjectWire, ApiError>;
    async fn create_material(&self, body: &CreateMaterialRequest) -> Result<(), ApiError>;
    async fn create_items_by_code(
        &self,
        project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError>;
    async fn create_items_by_keyword(
        &self,
        project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError>;
    async fn list_items(&self, project_id: i64) -> Result<Vec<ItemWire>, ApiError>;
    async fn trigger_summarize(&self, project_id: i64) -> Result<(), ApiError>;
    async fn list_summaries(&self, project_id: i64) -> Result<Vec<SummaryWire>, ApiError>;
    async fn list_resources(
        &self,
        project_id: i64,
    ) -> Result<Paginated<ResourceItemWire>, ApiError>;
    async fn list_summary_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<SummaryItemWire>, ApiError>;
    async fn list_recommendation_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<RecommendationItemWire>, ApiError>;
    async fn toggle_fixed(&self, item_id: i64) -> Result<ToggleFixedWire, ApiError>;
    async fn add_link(
        &self,
        project_id: i64,
        body: &AddLinkRequest,
    ) -> Result<ResourceItemWire, ApiError>;
}
