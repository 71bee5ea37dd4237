use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A link/material attached to a project. The same entity backs both panels
/// of the detail view: `is_fixed && is_active` renders under Resources,
/// `!is_fixed && is_active` under Recommendations, inactive items in neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub id: i64,
    pub channel_name: String,
    pub material_type: String,
    pub link: String,
    pub title: String,
    pub body: String,
    pub is_active: bool,
    pub is_fixed: bool,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub origin_created_at: Option<DateTime<Utc>>,
    pub origin_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Resources,
    Recommendations,
}

impl LinkItem {
    /// Which panel this item belongs to, or `None` when it is inactive.
    pub fn panel(&self) -> Option<Panel> {
        if !self.is_active {
            None
        } else if self.is_fixed {
            Some(Panel::Resources)
        } else {
            Some(Panel::Recommendations)
        }
    }
}

/// Split items into the (resources, recommendations) panel sets.
pub fn partition_items(items: &[LinkItem]) -> (Vec<LinkItem>, Vec<LinkItem>) {
    let mut resources = Vec::new();
    let mut recommendations = Vec::new();
    for item in items {
        match item.panel() {
            Some(Panel::Resources) => resources.push(item.clone()),
            Some(Panel::Recommendations) => recommendations.push(item.clone()),
            None => {}
        }
    }
    (resources, recommendations)
}

/// Triage row from the paginated recommendations endpoint. Carries the id of
/// the underlying item so a toggle can be issued against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: i64,
    pub project_name: String,
    pub item_title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item: i64,
    pub project_material: i64,
}

/// Result of a toggle-fixed call. The backend does not echo the item id, so
/// batch results are correlated with their inputs by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggledItem {
    pub channel_name: String,
    pub title: String,
    pub body: String,
    pub link: String,
    pub is_fixed: bool,
    pub is_active: bool,
    pub project: i64,
    pub project_material: i64,
}

/// Form data of the add-link modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItemDraft {
    #[serde(default)]
    pub channel_name: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub link: String,
    #[serde(default = "default_true")]
    pub is_fixed: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub project_material: i64,
}

fn default_true() -> bool {
    true
}

/// Material type accepted by the creation form. Freeform channel names still
/// travel as plain strings on items; this enum only covers what the form can
/// submit and what can be inferred from a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Github,
    Jira,
    Slack,
    Web,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Github => "github",
            MaterialType::Jira => "jira",
            MaterialType::Slack => "slack",
            MaterialType::Web => "web",
        }
    }

    /// Classify a URL by substring match. The order of checks matters:
    /// github before jira before slack before the web fallback.
    pub fn infer(url: &str) -> MaterialType {
        let u = url.to_lowercase();
        if u.contains("github.com") {
            MaterialType::Github
        } else if u.contains("jira") {
            MaterialType::Jira
        } else if u.contains("slack.com") {
            MaterialType::Slack
        } else {
            MaterialType::Web
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: i64, is_active: bool, is_fixed: bool) -> LinkItem {
        LinkItem {
            id,
            channel_name: "github".to_string(),
            material_type: "github".to_string(),
            link: format!("https://github.com/example/repo/pull/{}", id),
            title: format!("PR #{}", id),
            body: String::new(),
            is_active,
            is_fixed,
            project_name: "Sample Project".to_string(),
            created_at: Utc::now(),
            origin_created_at: None,
            origin_updated_at: None,
        }
    }

    #[test]
    fn partition_is_disjoint_and_covers_active_items() {
        // Pseudo-random (is_active, is_fixed) assignment over a spread of ids.
        let mut seed: u64 = 0x9e3779b97f4a7c15;
        let mut items = Vec::new();
        for id in 0..64 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            items.push(item(id, seed & 1 == 0, seed & 2 == 0));
        }

        let (resources, recommendations) = partition_items(&items);

        let resource_ids: std::collections::HashSet<i64> =
            resources.iter().map(|i| i.id).collect();
        let recommendation_ids: std::collections::HashSet<i64> =
            recommendations.iter().map(|i| i.id).collect();

        assert!(resource_ids.is_disjoint(&recommendation_ids));

        let active_ids: std::collections::HashSet<i64> =
            items.iter().filter(|i| i.is_active).map(|i| i.id).collect();
        let union: std::collections::HashSet<i64> =
            resource_ids.union(&recommendation_ids).copied().collect();
        assert_eq!(union, active_ids);
    }

    #[test]
    fn inactive_items_have_no_panel() {
        assert_eq!(item(1, false, true).panel(), None);
        assert_eq!(item(2, false, false).panel(), None);
    }

    #[test]
    fn infer_material_type_by_substring() {
        assert_eq!(MaterialType::infer("https://github.com/x/y"), MaterialType::Github);
        assert_eq!(
            MaterialType::infer("https://company.atlassian.net/jira/browse/KT-1"),
            MaterialType::Jira
        );
        assert_eq!(MaterialType::infer("https://slack.com/archives/C01"), MaterialType::Slack);
        assert_eq!(MaterialType::infer("https://example.com"), MaterialType::Web);
    }

    #[test]
    fn infer_material_type_github_wins_over_jira() {
        // A github URL mentioning jira in the path still classifies as github.
        assert_eq!(
            MaterialType::infer("https://github.com/org/jira-sync"),
            MaterialType::Github
        );
    }
}
