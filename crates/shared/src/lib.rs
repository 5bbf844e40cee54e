//! Wire types for the YouGile REST API (`/api-v2`).
//!
//! Field names follow the API's camelCase JSON. Entity types keep any field
//! they don't model in `extra`, so re-serializing a response loses nothing.

use serde::{Deserialize, Serialize};

mod entities;
mod requests;

pub use entities::*;
pub use requests::*;

/// Production API host, used when the config leaves `base_url` empty.
pub const DEFAULT_BASE_URL: &str = "https://ru.yougile.com";

/// Paging block attached to every list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub next: bool,
}

/// List response envelope: `{ "paging": {...}, "content": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Query string shared by the search endpoints. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

impl SearchQuery {
    /// Pagination only; zero means "let the server decide" and is dropped.
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: (limit > 0).then_some(limit),
            offset: (offset > 0).then_some(offset),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = non_empty(title);
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = non_empty(email);
        self
    }

    pub fn project_id(mut self, id: Option<String>) -> Self {
        self.project_id = non_empty(id);
        self
    }

    pub fn board_id(mut self, id: Option<String>) -> Self {
        self.board_id = non_empty(id);
        self
    }

    pub fn column_id(mut self, id: Option<String>) -> Self {
        self.column_id = non_empty(id);
        self
    }

    pub fn parent_id(mut self, id: Option<String>) -> Self {
        self.parent_id = non_empty(id);
        self
    }

    /// `includeDeleted` is only sent when asked for.
    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include.then_some(true);
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_drops_zero_paging_and_empty_filters() {
        let q = SearchQuery::page(50, 0)
            .title(Some(String::new()))
            .project_id(Some("p-1".to_string()));
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value, serde_json::json!({ "limit": 50, "projectId": "p-1" }));
    }

    #[test]
    fn test_include_deleted_only_when_set() {
        assert_eq!(SearchQuery::default().include_deleted(false).include_deleted, None);
        assert_eq!(
            SearchQuery::default().include_deleted(true).include_deleted,
            Some(true)
        );
    }

    #[test]
    fn test_page_without_paging_block() {
        let page: Page<serde_json::Value> =
            serde_json::from_str(r#"{"content":[{"id":"a"}]}"#).unwrap();
        assert!(page.paging.is_none());
        assert_eq!(page.content.len(), 1);
    }
}
