use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// One generated markdown block of a project's summary. The server
/// regenerates the whole collection on demand; the client replaces it
/// wholesale and never edits individual blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Concatenate block contents in list order for display.
pub fn combined_content(summaries: &[Summary]) -> String {
    summaries
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn block(id: i64, content: &str) -> Summary {
        Summary {
            id,
            content: content.to_string(),
            status: "done".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn combined_content_preserves_list_order() {
        let blocks = vec![block(2, "## Tickets"), block(1, "## History")];
        assert_eq!(combined_content(&blocks), "## Tickets\n\n## History");
    }

    #[test]
    fn combined_content_empty() {
        assert_eq!(combined_content(&[]), "");
    }
}
