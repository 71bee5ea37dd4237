use futures::future::try_join_all;
use serde::Serialize;

use crate::models::{join_keywords, parse_keywords, MaterialType, Project, ProjectDraft};
use super::api::ApiError;
use super::board_service::{invalidate, AppState};
use super::dto::{CreateMaterialRequest, CreateProjectRequest, IngestRequest};
use super::sync::Mutation;

/// Result of the creation workflow. The project exists on the server as soon
/// as phase 1 succeeds; a later phase's failure is reported here without
/// undoing anything, so the caller can still navigate to the project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProject {
    pub project: Project,
    pub error: Option<String>,
}

pub async fn get_project(state: &AppState, project_id: i64) -> Result<Project, ApiError> {
    let backend = state.backend().await;
    Ok(Project::from(backend.get_project(project_id).await?))
}

/// Four-phase creation workflow:
/// 1. validate and POST the project itself;
/// 2. POST one material per non-empty link, concurrently;
/// 3. trigger ingestion by code and by keyword, concurrently;
/// 4. refresh the projects store.
/// Phase 1 strictly precedes the rest; a phase 2 failure skips phase 3.
pub async fn create_project(
    state: &AppState,
    draft: &ProjectDraft,
) -> Result<CreatedProject, ApiError> {
    if draft.author_email.trim().is_empty()
        || draft.project_name.trim().is_empty()
        || draft.project_code.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Email, project name and project code are required.".to_string(),
        ));
    }

    let keyword_csv = join_keywords(&parse_keywords(&draft.project_keyword));

    let backend = state.backend().await;
    let request = CreateProjectRequest {
        author_email: draft.author_email.clone(),
        project_name: draft.project_name.clone(),
        project_code: draft.project_code.clone(),
        project_keyword: keyword_csv.clone(),
    };
    let project = Project::from(backend.create_project(&request).await?);
    log::info!("created project {} ({})", project.id, project.project_code);

    // Links left empty in the form are dropped, never sent. A blank material
    // type is inferred from the URL.
    let materials: Vec<CreateMaterialRequest> = draft
        .link_items
        .iter()
        .filter_map(|link| {
            let url = link.material_link.trim();
            if url.is_empty() {
                return None;
            }
            let material_type = if link.material_type.trim().is_empty() {
                MaterialType::infer(url).as_str().to_string()
            } else {
                link.material_type.trim().to_string()
            };
            Some(CreateMaterialRequest {
                material_type,
                material_link: url.to_string(),
                project: project.id,
            })
        })
        .collect();

    let mut failure: Option<ApiError> = None;
    if !materials.is_empty() {
        if let Err(e) =
            try_join_all(materials.iter().map(|body| backend.create_material(body))).await
        {
            failure = Some(e);
        }
    }

    if failure.is_none() {
        let trigger = IngestRequest {
            author_email: draft.author_email.clone(),
            project_name: draft.project_name.clone(),
            project_code: draft.project_code.clone(),
            project_keyword: keyword_csv.unwrap_or_default(),
        };
        if let Err(e) = futures::try_join!(
            backend.create_items_by_code(project.id, &trigger),
            backend.create_items_by_keyword(project.id, &trigger),
        ) {
            failure = Some(e);
        }
    }

    // The project is on the server either way; refresh the list.
    invalidate(state, Mutation::CreateProject).await;

    Ok(CreatedProject {
        error: failure.map(|e| format!("Project creation failed: {}", e)),
        project,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkDraft;
    use crate::services::fake_backend::FakeBackend;
    use std::sync::Arc;

    fn draft() -> ProjectDraft {
        ProjectDraft {
            author_email: "dev@infobridge.example".to_string(),
            project_name: "InfoBridge server".to_string(),
            project_code: "KT-2025-01".to_string(),
            project_keyword: "webrtc, 정산, ".to_string(),
            link_items: vec![
                LinkDraft {
                    material_type: "github".to_string(),
                    material_link: "https://github.com/example/repo".to_string(),
                },
                LinkDraft {
                    material_type: String::new(),
                    material_link: "https://company.atlassian.net/jira/KT-1".to_string(),
                },
                LinkDraft {
                    material_type: "web".to_string(),
                    material_link: "   ".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn missing_required_field_fails_before_any_network_call() {
        let fake = Arc::new(FakeBackend::new());
        let state = AppState::with_backend(fake.clone());
        let mut incomplete = draft();
        incomplete.project_code = String::new();

        let result = create_project(&state, &incomplete).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(fake.calls("create_project"), 0);
        assert_eq!(fake.calls("create_material"), 0);
    }

    #[tokio::test]
    async fn full_workflow_posts_materials_and_both_triggers() {
        let fake = Arc::new(FakeBackend::new());
        let state = AppState::with_backend(fake.clone());

        let created = create_project(&state, &draft()).await.unwrap();

        assert!(created.error.is_none());
        assert_eq!(created.project.project_keyword, vec!["webrtc", "정산"]);
        // The blank link row was dropped; the jira one got its type inferred.
        let materials = fake.materials();
        assert_eq!(materials.len(), 2);
        let jira = materials.iter().find(|m| m.material_link.contains("atlassian")).unwrap();
        assert_eq!(jira.material_type, "jira");
        assert_eq!(fake.calls("create_items_by_code"), 1);
        assert_eq!(fake.calls("create_items_by_keyword"), 1);
        assert_eq!(fake.last_ingest().unwrap().project_keyword, "webrtc,정산");
        // The projects store was refreshed after creation.
        assert_eq!(fake.calls("list_projects"), 1);
    }

    #[tokio::test]
    async fn empty_keyword_is_omitted_from_the_create_request() {
        let fake = Arc::new(FakeBackend::new());
        let state = AppState::with_backend(fake.clone());
        let mut no_keywords = draft();
        no_keywords.project_keyword = " ,  ".to_string();

        create_project(&state, &no_keywords).await.unwrap();

        assert_eq!(fake.last_create_project().unwrap().project_keyword, None);
        // The ingestion triggers always carry the field, empty included.
        assert_eq!(fake.last_ingest().unwrap().project_keyword, "");
    }

    #[tokio::test]
    async fn material_failure_keeps_the_project_and_reports_one_error() {
        let fake = Arc::new(FakeBackend::new());
        fake.fail_material("https://company.atlassian.net/jira/KT-1");
        let state = AppState::with_backend(fake.clone());

        let created = create_project(&state, &draft()).await.unwrap();

        assert_eq!(fake.project_count(), 1);
        assert!(created.error.unwrap().starts_with("Project creation failed"));
        // A phase 2 failure skips the ingestion triggers.
        assert_eq!(fake.calls("create_items_by_code"), 0);
        assert_eq!(fake.calls("create_items_by_keyword"), 0);
    }

    #[tokio::test]
    async fn trigger_failure_keeps_the_project_and_reports_one_error() {
        let fake = Arc::new(FakeBackend::new());
        fake.fail_with_transport("create_items_by_code");
        let state = AppState::with_backend(fake.clone());

        let created = create_project(&state, &draft()).await.unwrap();

        assert_eq!(fake.project_count(), 1);
        assert!(created.error.is_some());
    }
}
