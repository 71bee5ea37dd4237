use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub author_email: String,
    pub project_name: String,
    pub project_code: String,
    #[serde(default)]
    pub project_keyword: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form data for the create-project workflow, as entered in the webview.
/// `project_keyword` is the raw comma-separated string from the input field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub author_email: String,
    pub project_name: String,
    pub project_code: String,
    #[serde(default)]
    pub project_keyword: String,
    #[serde(default)]
    pub link_items: Vec<LinkDraft>,
}

/// One row of the "related links" section of the creation form. The material
/// type may be left blank, in which case it is inferred from the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDraft {
    #[serde(default)]
    pub material_type: String,
    #[serde(default)]
    pub material_link: String,
}

/// Split a comma-separated keyword string into trimmed tokens, dropping
/// entries that are empty after trimming.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Inverse of [`parse_keywords`] for submission: `None` when there is nothing
/// left to send, so the field can be omitted from the request body.
pub fn join_keywords(keywords: &[String]) -> Option<String> {
    if keywords.is_empty() {
        None
    } else {
        Some(keywords.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keywords_trims_and_drops_empties() {
        assert_eq!(
            parse_keywords("webrtc, 정산, ,  "),
            vec!["webrtc".to_string(), "정산".to_string()]
        );
    }

    #[test]
    fn parse_keywords_empty_input() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" ,  , ").is_empty());
    }

    #[test]
    fn join_keywords_round_trip() {
        let parsed = parse_keywords("InfoBridge, bridge");
        assert_eq!(join_keywords(&parsed), Some("InfoBridge,bridge".to_string()));
    }

    #[test]
    fn join_keywords_empty_is_omitted() {
        assert_eq!(join_keywords(&[]), None);
    }
}
