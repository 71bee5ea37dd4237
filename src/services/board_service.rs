use std::sync::Arc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::models::{
    combined_content, partition_items, LinkItem, LinkItemDraft, Project, RecommendationItem,
    Summary, ToggledItem,
};
use super::api::{ApiError, Backend, Paginated};
use super::api_client::ApiClient;
use super::dto::AddLinkRequest;
use super::sync::{affected_collections, Collection, Mutation, Resource, ResourceSnapshot};

/// Per-project collection stores for the detail view. The Resources and
/// Recommendations panels are derived from `items`, never fetched separately.
#[derive(Default)]
pub struct Board {
    pub project_id: Option<i64>,
    pub items: Resource<Vec<LinkItem>>,
    pub summaries: Resource<Vec<Summary>>,
    pub recommendation_items: Resource<Paginated<RecommendationItem>>,
}

/// Tauri managed state: the backend client plus one store per collection.
/// Locks are only held to read or flip store state, never across a request.
pub struct AppState {
    backend: Mutex<Arc<dyn Backend>>,
    pub projects: Mutex<Resource<Vec<Project>>>,
    pub board: Mutex<Board>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_backend(Arc::new(ApiClient::from_config()))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        AppState {
            backend: Mutex::new(backend),
            projects: Mutex::new(Resource::new()),
            board: Mutex::new(Board::default()),
        }
    }

    pub async fn backend(&self) -> Arc<dyn Backend> {
        self.backend.lock().await.clone()
    }

    /// Swap the backend client, e.g. after the base URL changed in settings.
    pub async fn set_backend(&self, backend: Arc<dyn Backend>) {
        *self.backend.lock().await = backend;
    }
}

/// What the webview renders for the project detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub project_id: Option<i64>,
    pub resources: Vec<LinkItem>,
    pub recommendations: Vec<LinkItem>,
    pub items: ResourceSnapshot<Vec<LinkItem>>,
    pub summaries: ResourceSnapshot<Vec<Summary>>,
    pub summary_text: String,
    pub recommendation_items: ResourceSnapshot<Paginated<RecommendationItem>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteOutcome {
    pub toggled: Vec<ToggledItem>,
    pub board: BoardSnapshot,
}

pub async fn board_snapshot(state: &AppState) -> BoardSnapshot {
    let board = state.board.lock().await;
    let (resources, recommendations) = match board.items.data() {
        Some(items) => partition_items(items),
        None => (Vec::new(), Vec::new()),
    };
    let summary_text = board
        .summaries
        .data()
        .map(|s| combined_content(s))
        .unwrap_or_default();
    BoardSnapshot {
        project_id: board.project_id,
        resources,
        recommendations,
        items: board.items.snapshot(),
        summaries: board.summaries.snapshot(),
        summary_text,
        recommendation_items: board.recommendation_items.snapshot(),
    }
}

// ============================================================================
// READ SIDE
// ============================================================================

pub async fn refetch_projects(state: &AppState) -> ResourceSnapshot<Vec<Project>> {
    let backend = state.backend().await;
    let generation = state.projects.lock().await.begin();
    let result = backend
        .list_projects()
        .await
        .map(|page| page.results.into_iter().map(Project::from).collect());
    let mut projects = state.projects.lock().await;
    projects.settle(generation, result);
    projects.snapshot()
}

pub async fn refetch_items(state: &AppState) -> ResourceSnapshot<Vec<LinkItem>> {
    let backend = state.backend().await;
    let (project_id, generation) = {
        let mut board = state.board.lock().await;
        match board.project_id {
            Some(id) => (id, board.items.begin()),
            None => return board.items.snapshot(),
        }
    };
    let result = backend
        .list_items(project_id)
        .await
        .map(|items| items.into_iter().map(LinkItem::from).collect());
    let mut board = state.board.lock().await;
    board.items.settle(generation, result);
    board.items.snapshot()
}

async fn fetch_summaries(backend: &dyn Backend, project_id: i64) -> Result<Vec<Summary>, ApiError> {
    // Trigger regeneration first; the read must not start before the trigger
    // settles. The trigger's response body is never inspected, and a non-2xx
    // status does not block the read.
    match backend.trigger_summarize(project_id).await {
        Ok(()) => {}
        Err(ApiError::Transport { status, .. }) => {
            log::warn!("summarize trigger answered {}, reading summaries anyway", status);
        }
        Err(e) => return Err(e),
    }
    Ok(backend
        .list_summaries(project_id)
        .await?
        .into_iter()
        .map(Summary::from)
        .collect())
}

pub async fn refetch_summaries(state: &AppState) -> ResourceSnapshot<Vec<Summary>> {
    let backend = state.backend().await;
    let (project_id, generation) = {
        let mut board = state.board.lock().await;
        match board.project_id {
            Some(id) => (id, board.summaries.begin()),
            None => return board.summaries.snapshot(),
        }
    };
    let result = fetch_summaries(backend.as_ref(), project_id).await;
    let mut board = state.board.lock().await;
    board.summaries.settle(generation, result);
    board.summaries.snapshot()
}

pub async fn refetch_recommendation_items(
    state: &AppState,
) -> ResourceSnapshot<Paginated<RecommendationItem>> {
    let backend = state.backend().await;
    let (project_id, generation) = {
        let mut board = state.board.lock().await;
        match board.project_id {
            Some(id) => (id, board.recommendation_items.begin()),
            None => return board.recommendation_items.snapshot(),
        }
    };
    let result = backend
        .list_recommendation_items(project_id)
        .await
        .map(|page| page.map(RecommendationItem::from));
    let mut board = state.board.lock().await;
    board.recommendation_items.settle(generation, result);
    board.recommendation_items.snapshot()
}

/// Scope the board to a project and run the three mount fetches
/// concurrently, like the detail view mounting its hooks. Rescoping does not
/// reset the stores; the bumped generations discard any late responses that
/// still belong to the previous project.
pub async fn open_project(state: &AppState, project_id: i64) -> BoardSnapshot {
    {
        let mut board = state.board.lock().await;
        board.project_id = Some(project_id);
    }
    tokio::join!(
        refetch_items(state),
        refetch_summaries(state),
        refetch_recommendation_items(state),
    );
    board_snapshot(state).await
}

/// One page of the paginated resources endpoint. Rows are filtered to
/// `is_active && is_fixed` on the client; the envelope keeps the server's
/// total count.
pub async fn fetch_resources_page(
    state: &AppState,
    project_id: i64,
) -> Result<Paginated<LinkItem>, ApiError> {
    let backend = state.backend().await;
    let page = backend.list_resources(project_id).await?.map(LinkItem::from);
    Ok(Paginated {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results: page
            .results
            .into_iter()
            .filter(|item| item.is_active && item.is_fixed)
            .collect(),
    })
}

/// One page of the paginated summaries endpoint.
pub async fn fetch_summary_items_page(
    state: &AppState,
    project_id: i64,
) -> Result<Paginated<Summary>, ApiError> {
    let backend = state.backend().await;
    Ok(backend.list_summary_items(project_id).await?.map(Summary::from))
}

// ============================================================================
// WRITE SIDE
// ============================================================================

/// Issue one toggle per id, all in flight at once, and join the results in
/// input order. The first-seen rejection fails the whole batch; toggles that
/// already landed on the server are not rolled back.
pub async fn toggle_multiple_fixed(
    backend: &dyn Backend,
    item_ids: &[i64],
) -> Result<Vec<ToggledItem>, ApiError> {
    log::debug!("toggling {} items: {:?}", item_ids.len(), item_ids);
    let results =
        futures::future::try_join_all(item_ids.iter().map(|id| backend.toggle_fixed(*id))).await?;
    Ok(results.into_iter().map(ToggledItem::from).collect())
}

/// Refetch every collection the mutation made stale, per the invalidation
/// table.
pub async fn invalidate(state: &AppState, mutation: Mutation) {
    for collection in affected_collections(mutation) {
        match collection {
            Collection::Projects => {
                refetch_projects(state).await;
            }
            Collection::Items => {
                refetch_items(state).await;
            }
            Collection::Summaries => {
                refetch_summaries(state).await;
            }
            Collection::RecommendationItems => {
                refetch_recommendation_items(state).await;
            }
        }
    }
}

/// The "add selected recommendations" workflow: batch toggle, then refresh
/// the items and summaries stores so the panels recompute. On failure
/// nothing is refetched and the webview keeps its selection.
pub async fn promote_selected(
    state: &AppState,
    item_ids: &[i64],
) -> Result<PromoteOutcome, ApiError> {
    if item_ids.is_empty() {
        return Ok(PromoteOutcome {
            toggled: Vec::new(),
            board: board_snapshot(state).await,
        });
    }

    let backend = state.backend().await;
    let toggled = toggle_multiple_fixed(backend.as_ref(), item_ids).await?;
    log::info!("promoted {} recommendation items", toggled.len());

    invalidate(state, Mutation::ToggleFixed).await;
    Ok(PromoteOutcome {
        toggled,
        board: board_snapshot(state).await,
    })
}

/// Toggle a single item and refresh the affected stores.
pub async fn toggle_item_fixed(state: &AppState, item_id: i64) -> Result<ToggledItem, ApiError> {
    let backend = state.backend().await;
    let toggled = ToggledItem::from(backend.toggle_fixed(item_id).await?);
    invalidate(state, Mutation::ToggleFixed).await;
    Ok(toggled)
}

/// Create a new link under a project and refresh the affected stores.
pub async fn add_link(
    state: &AppState,
    project_id: i64,
    draft: LinkItemDraft,
) -> Result<LinkItem, ApiError> {
    let backend = state.backend().await;
    let body = AddLinkRequest::new(project_id, &draft);
    let created = LinkItem::from(backend.add_link(project_id, &body).await?);
    log::debug!("added link {} under project {}", created.link, project_id);
    invalidate(state, Mutation::AddLink).await;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake_backend::FakeBackend;
    use std::time::Duration;

    fn seeded_backend() -> Arc<FakeBackend> {
        let fake = Arc::new(FakeBackend::new());
        fake.seed_items(vec![
            FakeBackend::wire_item(1, true, false),
            FakeBackend::wire_item(2, true, false),
            FakeBackend::wire_item(3, true, true),
        ]);
        fake
    }

    #[tokio::test]
    async fn open_project_runs_the_three_mount_fetches() {
        let fake = seeded_backend();
        let state = AppState::with_backend(fake.clone());

        let snapshot = open_project(&state, 1).await;

        assert_eq!(fake.calls("list_items"), 1);
        assert_eq!(fake.calls("trigger_summarize"), 1);
        assert_eq!(fake.calls("list_summaries"), 1);
        assert_eq!(fake.calls("list_recommendation_items"), 1);
        assert_eq!(snapshot.recommendations.len(), 2);
        assert_eq!(snapshot.resources.len(), 1);
    }

    #[tokio::test]
    async fn promote_refetches_items_and_summaries_exactly_once() {
        let fake = seeded_backend();
        let state = AppState::with_backend(fake.clone());
        open_project(&state, 1).await;
        let items_before = fake.calls("list_items");
        let summaries_before = fake.calls("list_summaries");

        let outcome = promote_selected(&state, &[1, 2]).await.unwrap();

        assert_eq!(outcome.toggled.len(), 2);
        assert_eq!(fake.calls("list_items"), items_before + 1);
        assert_eq!(fake.calls("list_summaries"), summaries_before + 1);
        // The moved items flipped panels in the refreshed snapshot.
        assert_eq!(outcome.board.resources.len(), 3);
        assert!(outcome.board.recommendations.is_empty());
    }

    #[tokio::test]
    async fn promote_with_empty_selection_is_a_no_op() {
        let fake = seeded_backend();
        let state = AppState::with_backend(fake.clone());
        open_project(&state, 1).await;
        let items_before = fake.calls("list_items");

        let outcome = promote_selected(&state, &[]).await.unwrap();

        assert!(outcome.toggled.is_empty());
        assert_eq!(fake.calls("toggle_fixed"), 0);
        assert_eq!(fake.calls("list_items"), items_before);
    }

    #[tokio::test]
    async fn batch_toggle_preserves_input_order() {
        let fake = seeded_backend();
        fake.delay_toggle(3, 40);
        fake.delay_toggle(1, 20);
        fake.delay_toggle(2, 1);

        let toggled = toggle_multiple_fixed(fake.as_ref(), &[3, 1, 2]).await.unwrap();

        let titles: Vec<&str> = toggled.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["item 3", "item 1", "item 2"]);
    }

    #[tokio::test]
    async fn failed_batch_leaves_earlier_toggles_applied_and_skips_refetch() {
        let fake = seeded_backend();
        fake.fail_toggle(2);
        fake.delay_toggle(2, 30);
        let state = AppState::with_backend(fake.clone());
        open_project(&state, 1).await;
        let items_before = fake.calls("list_items");

        let result = promote_selected(&state, &[1, 2]).await;

        assert!(result.is_err());
        // Item 1 settled before item 2 failed; the server keeps its toggle.
        assert!(fake.item(1).unwrap().is_fixed);
        assert!(!fake.item(2).unwrap().is_fixed);
        assert_eq!(fake.calls("list_items"), items_before);
    }

    #[tokio::test]
    async fn loading_is_set_only_while_fetch_is_in_flight() {
        let fake = seeded_backend();
        let state = Arc::new(AppState::with_backend(fake.clone()));
        open_project(&state, 1).await;

        fake.delay("list_items", 60);
        let task_state = state.clone();
        let handle = tokio::spawn(async move { refetch_items(&task_state).await });
        tokio::time::sleep(Duration::from_millis(15)).await;
        assert!(state.board.lock().await.items.loading());

        let snapshot = handle.await.unwrap();
        assert!(!snapshot.loading);
        assert!(!state.board.lock().await.items.loading());
    }

    #[tokio::test]
    async fn failed_fetch_clears_loading_and_keeps_previous_items() {
        let fake = seeded_backend();
        let state = AppState::with_backend(fake.clone());
        open_project(&state, 1).await;

        fake.fail_with_transport("list_items");
        let snapshot = refetch_items(&state).await;

        assert!(!snapshot.loading);
        assert!(snapshot.error.unwrap().contains("500"));
        assert_eq!(snapshot.data.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn summaries_read_tolerates_trigger_http_error() {
        let fake = seeded_backend();
        fake.seed_summaries(vec![FakeBackend::wire_summary(1, "## Tickets")]);
        fake.fail_with_transport("trigger_summarize");
        let state = AppState::with_backend(fake.clone());
        open_project(&state, 1).await;

        let snapshot = refetch_summaries(&state).await;

        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn summaries_read_never_starts_after_trigger_network_failure() {
        let fake = seeded_backend();
        fake.fail_with_network("trigger_summarize");
        let state = AppState::with_backend(fake.clone());
        {
            state.board.lock().await.project_id = Some(1);
        }

        let snapshot = refetch_summaries(&state).await;

        assert!(snapshot.error.unwrap().contains("Request failed"));
        assert_eq!(fake.calls("list_summaries"), 0);
    }

    #[tokio::test]
    async fn resources_page_filters_to_active_fixed() {
        let fake = seeded_backend();
        let state = AppState::with_backend(fake.clone());

        let page = fetch_resources_page(&state, 1).await.unwrap();

        assert_eq!(page.count, 3);
        assert_eq!(page.results.len(), 1);
        assert!(page.results[0].is_fixed && page.results[0].is_active);
    }
}
