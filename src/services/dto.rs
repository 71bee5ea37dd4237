use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::{
    parse_keywords, LinkItem, LinkItemDraft, Project, RecommendationItem, Summary, ToggledItem,
};

// ============================================================================
// RESPONSE SHAPES (backend snake_case wire contract)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectWire {
    pub id: i64,
    pub author_email: String,
    pub project_name: String,
    pub project_code: String,
    /// Comma-separated on the wire; parsed into a keyword list.
    #[serde(default)]
    pub project_keyword: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectWire> for Project {
    fn from(wire: ProjectWire) -> Self {
        Project {
            id: wire.id,
            author_email: wire.author_email,
            project_name: wire.project_name,
            project_code: wire.project_code,
            project_keyword: parse_keywords(wire.project_keyword.as_deref().unwrap_or("")),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Item row of the flat `GET /projects/{id}/items/` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemWire {
    pub id: i64,
    pub channel_name: String,
    pub is_active: bool,
    pub is_fixed: bool,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub material_type: String,
    pub link: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub origin_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin_updated_at: Option<DateTime<Utc>>,
}

impl From<ItemWire> for LinkItem {
    fn from(wire: ItemWire) -> Self {
        LinkItem {
            id: wire.id,
            channel_name: wire.channel_name,
            material_type: wire.material_type,
            link: wire.link,
            // Some channels deliver items without a title.
            title: wire.title.unwrap_or_else(|| wire.body.clone()),
            body: wire.body,
            is_active: wire.is_active,
            is_fixed: wire.is_fixed,
            project_name: wire.project_name,
            created_at: wire.created_at,
            origin_created_at: wire.origin_created_at,
            origin_updated_at: wire.origin_updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryWire {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SummaryWire> for Summary {
    fn from(wire: SummaryWire) -> Self {
        Summary {
            id: wire.id,
            content: wire.content,
            status: wire.status,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Row of the paginated `POST /resources` endpoint; also the response shape
/// of `PUT /items/{project_id}/` (add link). Note the `origin_data_*` field
/// names differ from the flat items endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceItemWire {
    pub id: i64,
    pub project_name: String,
    pub material_type: String,
    pub channel_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    pub link: String,
    pub is_fixed: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub origin_data_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin_data_updated_at: Option<DateTime<Utc>>,
    pub project: i64,
    pub project_material: i64,
}

impl From<ResourceItemWire> for LinkItem {
    fn from(wire: ResourceItemWire) -> Self {
        LinkItem {
            id: wire.id,
            channel_name: wire.channel_name,
            material_type: wire.material_type,
            link: wire.link,
            title: wire.title.unwrap_or_else(|| wire.body.clone()),
            body: wire.body,
            is_active: wire.is_active,
            is_fixed: wire.is_fixed,
            project_name: wire.project_name,
            created_at: wire.created_at,
            origin_created_at: wire.origin_data_created_at,
            origin_updated_at: wire.origin_data_updated_at,
        }
    }
}

/// Row of the paginated `POST /summaries` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryItemWire {
    pub id: i64,
    pub project_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub project: i64,
    pub ai_request: i64,
}

impl From<SummaryItemWire> for Summary {
    fn from(wire: SummaryItemWire) -> Self {
        Summary {
            id: wire.id,
            content: wire.content,
            status: String::new(),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Row of the paginated `POST /recommendations` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationItemWire {
    pub id: i64,
    pub project_name: String,
    #[serde(default)]
    pub item_title: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub project: i64,
    pub item: i64,
    pub project_material: i64,
}

impl From<RecommendationItemWire> for RecommendationItem {
    fn from(wire: RecommendationItemWire) -> Self {
        RecommendationItem {
            id: wire.id,
            project_name: wire.project_name,
            item_title: wire.item_title.unwrap_or_default(),
            is_active: wire.is_active,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            item: wire.item,
            project_material: wire.project_material,
        }
    }
}

/// Response of `PATCH /items/{id}/toggle_fixed/`. The backend does not echo
/// the item id back, so callers correlate by input order.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleFixedWire {
    pub channel_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    pub link: String,
    pub is_fixed: bool,
    pub is_active: bool,
    pub project: i64,
    pub project_material: i64,
}

impl From<ToggleFixedWire> for ToggledItem {
    fn from(wire: ToggleFixedWire) -> Self {
        ToggledItem {
            channel_name: wire.channel_name,
            title: wire.title.unwrap_or_else(|| wire.body.clone()),
            body: wire.body,
            link: wire.link,
            is_fixed: wire.is_fixed,
            is_active: wire.is_active,
            project: wire.project,
            project_material: wire.project_material,
        }
    }
}

// ============================================================================
// REQUEST SHAPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    pub author_email: String,
    pub project_name: String,
    pub project_code: String,
    /// Normalized CSV; omitted entirely when no keywords remain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMaterialRequest {
    pub material_type: String,
    pub material_link: String,
    pub project: i64,
}

/// Payload of the two "create items from external matches" triggers. Unlike
/// project creation, the keyword field is always present, empty string
/// included.
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest {
    pub author_email: String,
    pub project_name: String,
    pub project_code: String,
    pub project_keyword: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddLinkRequest {
    pub channel_name: String,
    pub title: String,
    pub body: String,
    pub link: String,
    pub is_fixed: bool,
    pub is_active: bool,
    pub project: i64,
    pub project_material: i64,
}

impl AddLinkRequest {
    pub fn new(project_id: i64, draft: &LinkItemDraft) -> Self {
        AddLinkRequest {
            channel_name: draft.channel_name.clone(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            link: draft.link.clone(),
            is_fixed: draft.is_fixed,
            is_active: draft.is_active,
            project: project_id,
            project_material: draft.project_material,
        }
    }
}

/// Body of the `POST /resources|/summaries|/recommendations` list endpoints
/// and of the toggle PATCH.
#[derive(Debug, Clone, Serialize)]
pub struct IdPayload {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_wire_parses_keyword_csv() {
        let wire: ProjectWire = serde_json::from_value(serde_json::json!({
            "id": 1,
            "author_email": "user@example.com",
            "project_name": "인포브릿지 서버 개발",
            "project_code": "SMG-001",
            "project_keyword": "InfoBridge, 인포브릿지, bridge, ",
            "created_at": "2025-08-09T02:35:48.042252Z",
            "updated_at": "2025-08-09T06:45:47.825268Z"
        }))
        .unwrap();
        let project = Project::from(wire);
        assert_eq!(project.project_keyword, vec!["InfoBridge", "인포브릿지", "bridge"]);
    }

    #[test]
    fn project_wire_tolerates_missing_keyword() {
        let wire: ProjectWire = serde_json::from_value(serde_json::json!({
            "id": 2,
            "author_email": "user@example.com",
            "project_name": "p",
            "project_code": "c",
            "created_at": "2025-08-09T02:35:48Z",
            "updated_at": "2025-08-09T02:35:48Z"
        }))
        .unwrap();
        assert!(Project::from(wire).project_keyword.is_empty());
    }

    #[test]
    fn item_title_falls_back_to_body() {
        let wire: ItemWire = serde_json::from_value(serde_json::json!({
            "id": 7,
            "channel_name": "slack",
            "is_active": true,
            "is_fixed": false,
            "project_name": "p",
            "created_at": "2025-01-01T00:00:00Z",
            "material_type": "slack",
            "link": "https://slack.com/archives/C01",
            "title": null,
            "body": "thread about settlement",
            "origin_created_at": "2025-01-01T00:00:00Z",
            "origin_updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        let item = LinkItem::from(wire);
        assert_eq!(item.title, "thread about settlement");
    }

    #[test]
    fn resource_wire_maps_origin_data_fields() {
        let wire: ResourceItemWire = serde_json::from_value(serde_json::json!({
            "id": 11,
            "project_name": "p",
            "material_type": "github",
            "channel_name": "github",
            "title": "feat: avatar upload",
            "body": "",
            "link": "https://github.com/example/repo/pull/456",
            "is_fixed": true,
            "is_active": true,
            "created_at": "2025-01-02T00:00:00Z",
            "updated_at": "2025-01-03T00:00:00Z",
            "origin_data_created_at": "2025-01-01T00:00:00Z",
            "origin_data_updated_at": "2025-01-01T12:00:00Z",
            "project": 1,
            "project_material": 4
        }))
        .unwrap();
        let item = LinkItem::from(wire);
        assert!(item.origin_created_at.is_some());
        assert!(item.origin_updated_at.is_some());
        assert_eq!(item.title, "feat: avatar upload");
    }

    #[test]
    fn create_project_request_omits_empty_keyword() {
        let body = CreateProjectRequest {
            author_email: "user@example.com".to_string(),
            project_name: "p".to_string(),
            project_code: "c".to_string(),
            project_keyword: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("project_keyword").is_none());
    }
}
