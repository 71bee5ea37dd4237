//! In-memory stand-in for the REST backend, used by the store and workflow
//! tests. Supports per-method failure switches and delays, per-item toggle
//! behavior, and call counting, and actually flips `is_fixed` on toggle so
//! refetches observe the mutation like they would against a live server.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::api::{ApiError, Backend, Paginated};
use super::dto::{
    AddLinkRequest, CreateMaterialRequest, CreateProjectRequest, IngestRequest, ItemWire,
    ProjectWire, RecommendationItemWire, ResourceItemWire, SummaryItemWire, SummaryWire,
    ToggleFixedWire,
};

#[derive(Default)]
pub struct FakeBackend {
    projects: Mutex<Vec<ProjectWire>>,
    items: Mutex<Vec<ItemWire>>,
    summaries: Mutex<Vec<SummaryWire>>,
    materials: Mutex<Vec<CreateMaterialRequest>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    fail_transport: Mutex<HashSet<&'static str>>,
    fail_network: Mutex<HashSet<&'static str>>,
    fail_material_links: Mutex<HashSet<String>>,
    fail_toggle_ids: Mutex<HashSet<i64>>,
    delays_ms: Mutex<HashMap<&'static str, u64>>,
    toggle_delays_ms: Mutex<HashMap<i64, u64>>,
    last_create_project: Mutex<Option<CreateProjectRequest>>,
    last_ingest: Mutex<Option<IngestRequest>>,
    next_project_id: AtomicI64,
    next_item_id: AtomicI64,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            next_project_id: AtomicI64::new(1),
            next_item_id: AtomicI64::new(1000),
            ..Default::default()
        }
    }

    pub fn wire_item(id: i64, is_active: bool, is_fixed: bool) -> ItemWire {
        ItemWire {
            id,
            channel_name: "github".to_string(),
            is_active,
            is_fixed,
            project_name: "Sample Project".to_string(),
            created_at: Utc::now(),
            material_type: "github".to_string(),
            link: format!("https://github.com/example/repo/pull/{}", id),
            title: Some(format!("item {}", id)),
            body: String::new(),
            origin_created_at: None,
            origin_updated_at: None,
        }
    }

    pub fn wire_summary(id: i64, content: &str) -> SummaryWire {
        SummaryWire {
            id,
            content: content.to_string(),
            status: "done".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn seed_items(&self, items: Vec<ItemWire>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn seed_summaries(&self, summaries: Vec<SummaryWire>) {
        *self.summaries.lock().unwrap() = summaries;
    }

    pub fn fail_with_transport(&self, method: &'static str) {
        self.fail_transport.lock().unwrap().insert(method);
    }

    pub fn fail_with_network(&self, method: &'static str) {
        self.fail_network.lock().unwrap().insert(method);
    }

    pub fn fail_material(&self, link: &str) {
        self.fail_material_links.lock().unwrap().insert(link.to_string());
    }

    pub fn fail_toggle(&self, item_id: i64) {
        self.fail_toggle_ids.lock().unwrap().insert(item_id);
    }

    pub fn delay(&self, method: &'static str, ms: u64) {
        self.delays_ms.lock().unwrap().insert(method, ms);
    }

    pub fn delay_toggle(&self, item_id: i64, ms: u64) {
        self.toggle_delays_ms.lock().unwrap().insert(item_id, ms);
    }

    pub fn calls(&self, method: &'static str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    pub fn item(&self, item_id: i64) -> Option<ItemWire> {
        self.items.lock().unwrap().iter().find(|i| i.id == item_id).cloned()
    }

    pub fn project_count(&self) -> usize {
        self.projects.lock().unwrap().len()
    }

    pub fn materials(&self) -> Vec<CreateMaterialRequest> {
        self.materials.lock().unwrap().clone()
    }

    pub fn last_create_project(&self) -> Option<CreateProjectRequest> {
        self.last_create_project.lock().unwrap().clone()
    }

    pub fn last_ingest(&self) -> Option<IngestRequest> {
        self.last_ingest.lock().unwrap().clone()
    }

    /// Count the call, apply any configured delay, then fail if flagged.
    async fn gate(&self, method: &'static str) -> Result<(), ApiError> {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;

        let delay = self.delays_ms.lock().unwrap().get(method).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if self.fail_transport.lock().unwrap().contains(method) {
            return Err(ApiError::Transport { status: 500, body: "internal error".to_string() });
        }
        if self.fail_network.lock().unwrap().contains(method) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_projects(&self) -> Result<Paginated<ProjectWire>, ApiError> {
        self.gate("list_projects").await?;
        let projects = self.projects.lock().unwrap().clone();
        Ok(Paginated {
            count: projects.len() as i64,
            next: None,
            previous: None,
            results: projects,
        })
    }

    async fn create_project(&self, body: &CreateProjectRequest) -> Result<ProjectWire, ApiError> {
        self.gate("create_project").await?;
        let wire = ProjectWire {
            id: self.next_project_id.fetch_add(1, Ordering::SeqCst),
            author_email: body.author_email.clone(),
            project_name: body.project_name.clone(),
            project_code: body.project_code.clone(),
            project_keyword: body.project_keyword.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.projects.lock().unwrap().push(wire.clone());
        *self.last_create_project.lock().unwrap() = Some(body.clone());
        Ok(wire)
    }

    async fn get_project(&self, project_id: i64) -> Result<ProjectWire, ApiError> {
        self.gate("get_project").await?;
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or(ApiError::Transport { status: 404, body: "not found".to_string() })
    }

    async fn create_material(&self, body: &CreateMaterialRequest) -> Result<(), ApiError> {
        self.gate("create_material").await?;
        if self.fail_material_links.lock().unwrap().contains(&body.material_link) {
            return Err(ApiError::Transport { status: 400, body: "bad material".to_string() });
        }
        self.materials.lock().unwrap().push(body.clone());
        Ok(())
    }

    async fn create_items_by_code(
        &self,
        _project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError> {
        self.gate("create_items_by_code").await?;
        *self.last_ingest.lock().unwrap() = Some(body.clone());
        Ok(())
    }

    async fn create_items_by_keyword(
        &self,
        _project_id: i64,
        body: &IngestRequest,
    ) -> Result<(), ApiError> {
        self.gate("create_items_by_keyword").await?;
        *self.last_ingest.lock().unwrap() = Some(body.clone());
        Ok(())
    }

    async fn list_items(&self, _project_id: i64) -> Result<Vec<ItemWire>, ApiError> {
        self.gate("list_items").await?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn trigger_summarize(&self, _project_id: i64) -> Result<(), ApiError> {
        self.gate("trigger_summarize").await
    }

    async fn list_summaries(&self, _project_id: i64) -> Result<Vec<SummaryWire>, ApiError> {
        self.gate("list_summaries").await?;
        Ok(self.summaries.lock().unwrap().clone())
    }

    async fn list_resources(
        &self,
        project_id: i64,
    ) -> Result<Paginated<ResourceItemWire>, ApiError> {
        self.gate("list_resources").await?;
        let items = self.items.lock().unwrap();
        let results: Vec<ResourceItemWire> = items
            .iter()
            .map(|item| ResourceItemWire {
                id: item.id,
                project_name: item.project_name.clone(),
                material_type: item.material_type.clone(),
                channel_name: item.channel_name.clone(),
                title: item.title.clone(),
                body: item.body.clone(),
                link: item.link.clone(),
                is_fixed: item.is_fixed,
                is_active: item.is_active,
                created_at: item.created_at,
                updated_at: item.created_at,
                origin_data_created_at: item.origin_created_at,
                origin_data_updated_at: item.origin_updated_at,
                project: project_id,
                project_material: item.id,
            })
            .collect();
        Ok(Paginated {
            count: results.len() as i64,
            next: None,
            previous: None,
            results,
        })
    }

    async fn list_summary_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<SummaryItemWire>, ApiError> {
        self.gate("list_summary_items").await?;
        let summaries = self.summaries.lock().unwrap();
        let results: Vec<SummaryItemWire> = summaries
            .iter()
            .map(|summary| SummaryItemWire {
                id: summary.id,
                project_name: "Sample Project".to_string(),
                content: summary.content.clone(),
                created_at: summary.created_at,
                updated_at: summary.updated_at,
                project: project_id,
                ai_request: summary.id,
            })
            .collect();
        Ok(Paginated {
            count: results.len() as i64,
            next: None,
            previous: None,
            results,
        })
    }

    async fn list_recommendation_items(
        &self,
        project_id: i64,
    ) -> Result<Paginated<RecommendationItemWire>, ApiError> {
        self.gate("list_recommendation_items").await?;
        let items = self.items.lock().unwrap();
        let results: Vec<RecommendationItemWire> = items
            .iter()
            .filter(|item| item.is_active && !item.is_fixed)
            .map(|item| RecommendationItemWire {
                id: item.id,
                project_name: item.project_name.clone(),
                item_title: item.title.clone(),
                is_active: item.is_active,
                created_at: item.created_at,
                updated_at: item.created_at,
                project: project_id,
                item: item.id,
                project_material: item.id,
            })
            .collect();
        Ok(Paginated {
            count: results.len() as i64,
            next: None,
            previous: None,
            results,
        })
    }

    async fn toggle_fixed(&self, item_id: i64) -> Result<ToggleFixedWire, ApiError> {
        *self.calls.lock().unwrap().entry("toggle_fixed").or_insert(0) += 1;

        let delay = self.toggle_delays_ms.lock().unwrap().get(&item_id).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if self.fail_toggle_ids.lock().unwrap().contains(&item_id) {
            return Err(ApiError::Transport { status: 500, body: "toggle failed".to_string() });
        }

        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(ApiError::Transport { status: 404, body: "not found".to_string() })?;
        item.is_fixed = !item.is_fixed;
        Ok(ToggleFixedWire {
            channel_name: item.channel_name.clone(),
            title: item.title.clone(),
            body: item.body.clone(),
            link: item.link.clone(),
            is_fixed: item.is_fixed,
            is_active: item.is_active,
            project: 1,
            project_material: item.id,
        })
    }

    async fn add_link(
        &self,
        project_id: i64,
        body: &AddLinkRequest,
    ) -> Result<ResourceItemWire, ApiError> {
        self.gate("add_link").await?;
        let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let wire = ItemWire {
            id,
            channel_name: body.channel_name.clone(),
            is_active: body.is_active,
            is_fixed: body.is_fixed,
            project_name: "Sample Project".to_string(),
            created_at: now,
            material_type: body.channel_name.clone(),
            link: body.link.clone(),
            title: Some(body.title.clone()),
            body: body.body.clone(),
            origin_created_at: None,
            origin_updated_at: None,
        };
        self.items.lock().unwrap().push(wire.clone());
        Ok(ResourceItemWire {
            id,
            project_name: wire.project_name,
            material_type: wire.material_type,
            channel_name: wire.channel_name,
            title: wire.title,
            body: wire.body,
            link: wire.link,
            is_fixed: wire.is_fixed,
            is_active: wire.is_active,
            created_at: now,
            updated_at: now,
            origin_data_created_at: None,
            origin_data_updated_at: None,
            project: project_id,
            project_material: id,
        })
    }
}
