use std::path::Path;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use yougile_shared::*;

use crate::config::Config;

const API_PREFIX: &str = "api-v2";

/// Failure of a single API call. `op` names the operation ("list users").
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{op}: request failed")]
    Transport {
        op: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{op}: HTTP {status}")]
    Status {
        op: String,
        status: StatusCode,
        /// Whether the request carried the API key.
        authenticated: bool,
    },
    #[error("{op}: empty response")]
    EmptyResponse { op: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::EmptyResponse { .. } => None,
        }
    }

    /// A 401/403 on a request that carried the API key.
    pub fn is_rejected_key(&self) -> bool {
        matches!(
            self,
            Self::Status { status, authenticated: true, .. }
                if matches!(*status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_connect() || source.is_timeout())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Sticker flavours share every endpoint shape; only the path differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerKind {
    String,
    Sprint,
}

impl StickerKind {
    fn segment(self) -> &'static str {
        match self {
            Self::String => "string-stickers",
            Self::Sprint => "sprint-stickers",
        }
    }

    /// Lower-case label used in operation names: "string sticker".
    pub fn label(self) -> &'static str {
        match self {
            Self::String => "string sticker",
            Self::Sprint => "sprint sticker",
        }
    }

    /// Capitalised label for confirmation lines: "String sticker".
    pub fn title(self) -> &'static str {
        match self {
            Self::String => "String sticker",
            Self::Sprint => "Sprint sticker",
        }
    }
}

pub struct YougileClient {
    client: Client,
    /// `<base_url>/api-v2`, parsed once.
    api_root: Url,
    api_key: Option<String>,
}

impl YougileClient {
    /// Client without credentials, for the email/password `auth` endpoints.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut api_root =
            Url::parse(base_url).with_context(|| format!("invalid base_url {base_url}"))?;
        api_root
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("invalid base_url {base_url}"))?
            .pop_if_empty()
            .push(API_PREFIX);
        Ok(Self {
            client: Client::new(),
            api_root,
            api_key: None,
        })
    }

    /// Client sending `Authorization: Bearer <api_key>` on every request.
    pub fn authenticated(config: &Config) -> Result<Self> {
        if config.api_key.is_empty() {
            anyhow::bail!("api_key not set in config; run 'yougile auth login' first");
        }
        let mut client = Self::new(&config.base_url)?;
        client.api_key = Some(config.api_key.clone());
        Ok(client)
    }

    /// Endpoint URL. Each segment is percent-encoded on its own, so an id
    /// containing `/`, `?` or `#` stays a single path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn add_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    async fn execute(
        &self,
        op: &str,
        req: RequestBuilder,
        expected: StatusCode,
    ) -> ApiResult<reqwest::Response> {
        let resp = self
            .add_auth(req)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                op: op.to_string(),
                source,
            })?;

        let status = resp.status();
        tracing::debug!(%op, url = %resp.url().path(), %status, "response");
        if status != expected {
            return Err(ApiError::Status {
                op: op.to_string(),
                status,
                authenticated: self.api_key.is_some(),
            });
        }
        Ok(resp)
    }

    /// Send and decode a JSON body. An empty or undecodable body is
    /// reported as `EmptyResponse`.
    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        req: RequestBuilder,
        expected: StatusCode,
    ) -> ApiResult<T> {
        self.send_optional(op, req, expected)
            .await?
            .ok_or_else(|| ApiError::EmptyResponse { op: op.to_string() })
    }

    /// Like `send`, but a missing or `null` body is `Ok(None)`.
    async fn send_optional<T: DeserializeOwned>(
        &self,
        op: &str,
        req: RequestBuilder,
        expected: StatusCode,
    ) -> ApiResult<Option<T>> {
        let resp = self.execute(op, req, expected).await?;
        let bytes = resp.bytes().await.map_err(|source| ApiError::Transport {
            op: op.to_string(),
            source,
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<Option<T>>(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!(%op, error = %e, "undecodable response body");
                Err(ApiError::EmptyResponse { op: op.to_string() })
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, op: &str, path: &[&str]) -> ApiResult<T> {
        self.send(op, self.client.get(self.url(path)), StatusCode::OK)
            .await
    }

    async fn search<T: DeserializeOwned>(
        &self,
        op: &str,
        path: &[&str],
        query: &SearchQuery,
    ) -> ApiResult<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.send(op, req, StatusCode::OK).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        op: &str,
        path: &[&str],
        body: &B,
        expected: StatusCode,
    ) -> ApiResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send(op, req, expected).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        op: &str,
        path: &[&str],
        body: &B,
    ) -> ApiResult<Option<T>> {
        let req = self.client.put(self.url(path)).json(body);
        self.send_optional(op, req, StatusCode::OK).await
    }

    // ── auth (email/password, no API key) ─────────────────────────────

    pub async fn get_companies(&self, body: &CompaniesRequest) -> ApiResult<Page<Company>> {
        self.post("get companies", &["auth", "companies"], body, StatusCode::OK)
            .await
    }

    pub async fn search_keys(&self, body: &KeySearchRequest) -> ApiResult<Vec<AuthKey>> {
        self.post("list keys", &["auth", "keys", "get"], body, StatusCode::OK)
            .await
    }

    /// A created key with an empty `key` field is still returned here;
    /// callers that need the key check it.
    pub async fn create_key(&self, body: &CreateKeyRequest) -> ApiResult<CreatedKey> {
        self.post("create key", &["auth", "keys"], body, StatusCode::CREATED)
            .await
    }

    pub async fn delete_key(&self, key: &str) -> ApiResult<()> {
        let req = self.client.delete(self.url(&["auth", "keys", key]));
        self.execute("delete key", req, StatusCode::OK).await?;
        Ok(())
    }

    // ── company / users ───────────────────────────────────────────────

    pub async fn get_company(&self) -> ApiResult<serde_json::Value> {
        self.get("get company", &["companies"]).await
    }

    pub async fn list_users(&self, query: &SearchQuery) -> ApiResult<Page<User>> {
        self.search("list users", &["users"], query).await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.get("get user", &["users", id]).await
    }

    // ── projects / boards / columns ───────────────────────────────────

    pub async fn list_projects(&self, query: &SearchQuery) -> ApiResult<Page<Project>> {
        self.search("list projects", &["projects"], query).await
    }

    pub async fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.get("get project", &["projects", id]).await
    }

    pub async fn list_boards(&self, query: &SearchQuery) -> ApiResult<Page<Board>> {
        self.search("list boards", &["boards"], query).await
    }

    pub async fn get_board(&self, id: &str) -> ApiResult<Board> {
        self.get("get board", &["boards", id]).await
    }

    pub async fn list_columns(&self, query: &SearchQuery) -> ApiResult<Page<Column>> {
        self.search("list columns", &["columns"], query).await
    }

    pub async fn get_column(&self, id: &str) -> ApiResult<Column> {
        self.get("get column", &["columns", id]).await
    }

    // ── tasks ─────────────────────────────────────────────────────────

    pub async fn list_tasks(&self, query: &SearchQuery) -> ApiResult<Page<Task>> {
        self.search("list tasks", &["task-list"], query).await
    }

    pub async fn get_task(&self, id: &str) -> ApiResult<Task> {
        self.get("get task", &["tasks", id]).await
    }

    pub async fn create_task(&self, body: &CreateTask) -> ApiResult<CreatedId> {
        self.post("create task", &["tasks"], body, StatusCode::CREATED)
            .await
    }

    pub async fn update_task(&self, id: &str, body: &UpdateTask) -> ApiResult<Option<CreatedId>> {
        self.put("update task", &["tasks", id], body).await
    }

    pub async fn get_chat_subscribers(&self, task_id: &str) -> ApiResult<Vec<String>> {
        self.get(
            "get chat subscribers",
            &["tasks", task_id, "chat-subscribers"],
        )
        .await
    }

    pub async fn update_chat_subscribers(
        &self,
        task_id: &str,
        body: &ChatSubscribers,
    ) -> ApiResult<()> {
        let req = self
            .client
            .put(self.url(&["tasks", task_id, "chat-subscribers"]))
            .json(body);
        self.execute("update chat subscribers", req, StatusCode::OK)
            .await?;
        Ok(())
    }

    // ── departments / webhooks / files ────────────────────────────────

    pub async fn list_departments(&self, query: &SearchQuery) -> ApiResult<Page<Department>> {
        self.search("list departments", &["departments"], query).await
    }

    pub async fn get_department(&self, id: &str) -> ApiResult<Department> {
        self.get("get department", &["departments", id])
            .await
    }

    pub async fn list_webhooks(&self, query: &SearchQuery) -> ApiResult<Vec<Webhook>> {
        self.search("list webhooks", &["webhooks"], query).await
    }

    pub async fn create_webhook(&self, body: &CreateWebhook) -> ApiResult<CreatedId> {
        self.post("create webhook", &["webhooks"], body, StatusCode::CREATED)
            .await
    }

    /// Upload `path` as the multipart `file` field.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("open file {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let part = reqwest::multipart::Part::bytes(data).file_name(name);
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self.client.post(self.url(&["upload-file"])).multipart(form);
        Ok(self.send("upload", req, StatusCode::OK).await?)
    }

    // ── chats ─────────────────────────────────────────────────────────

    pub async fn list_group_chats(&self, query: &SearchQuery) -> ApiResult<Page<GroupChat>> {
        self.search("list chats", &["group-chats"], query).await
    }

    pub async fn get_group_chat(&self, id: &str) -> ApiResult<GroupChat> {
        self.get("get chat", &["group-chats", id]).await
    }

    pub async fn list_messages(
        &self,
        chat_id: &str,
        query: &SearchQuery,
    ) -> ApiResult<Page<ChatMessage>> {
        self.search("list messages", &["chats", chat_id, "messages"], query)
            .await
    }

    pub async fn send_message(&self, chat_id: &str, body: &SendMessage) -> ApiResult<MessageId> {
        self.post(
            "send message",
            &["chats", chat_id, "messages"],
            body,
            StatusCode::CREATED,
        )
        .await
    }

    // ── stickers ──────────────────────────────────────────────────────

    pub async fn list_stickers(
        &self,
        kind: StickerKind,
        query: &SearchQuery,
    ) -> ApiResult<Page<Sticker>> {
        let op = format!("list {}s", kind.label());
        self.search(&op, &[kind.segment()], query).await
    }

    pub async fn get_sticker(&self, kind: StickerKind, id: &str) -> ApiResult<Sticker> {
        let op = format!("get {}", kind.label());
        self.get(&op, &[kind.segment(), id]).await
    }

    pub async fn create_sticker(&self, kind: StickerKind, body: &NameBody) -> ApiResult<CreatedId> {
        let op = format!("create {}", kind.label());
        self.post(&op, &[kind.segment()], body, StatusCode::CREATED).await
    }

    pub async fn update_sticker(
        &self,
        kind: StickerKind,
        id: &str,
        body: &UpdateName,
    ) -> ApiResult<Option<CreatedId>> {
        let op = format!("update {}", kind.label());
        self.put(&op, &[kind.segment(), id], body).await
    }

    pub async fn get_sticker_state(
        &self,
        kind: StickerKind,
        sticker_id: &str,
        state_id: &str,
    ) -> ApiResult<StickerState> {
        let op = format!("get {} state", kind.label());
        self.get(&op, &[kind.segment(), sticker_id, "states", state_id])
            .await
    }

    pub async fn create_sticker_state(
        &self,
        kind: StickerKind,
        sticker_id: &str,
        body: &NameBody,
    ) -> ApiResult<CreatedId> {
        let op = format!("create {} state", kind.label());
        self.post(
            &op,
            &[kind.segment(), sticker_id, "states"],
            body,
            StatusCode::CREATED,
        )
        .await
    }

    pub async fn update_sticker_state(
        &self,
        kind: StickerKind,
        sticker_id: &str,
        state_id: &str,
        body: &UpdateName,
    ) -> ApiResult<Option<CreatedId>> {
        let op = format!("update {} state", kind.label());
        self.put(
            &op,
            &[kind.segment(), sticker_id, "states", state_id],
            body,
        )
        .await
    }

    // ── crm ───────────────────────────────────────────────────────────

    pub async fn create_contact_person(&self, body: &CreateContactPerson) -> ApiResult<CreatedId> {
        self.post(
            "create contact person",
            &["crm", "contact-persons"],
            body,
            StatusCode::CREATED,
        )
        .await
    }

    /// `Ok(None)` when the server answers 200 with no contact.
    pub async fn find_contact_by_external_id(
        &self,
        provider: &str,
        chat_id: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        let req = self
            .client
            .get(self.url(&["crm", "contacts", "by-external-id"]))
            .query(&[("provider", provider), ("chatId", chat_id)]);
        self.send_optional("find contact by external id", req, StatusCode::OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_on_base_url() {
        for base in ["https://ru.yougile.com", "https://ru.yougile.com/"] {
            let client = YougileClient::new(base).unwrap();
            assert_eq!(
                client.url(&["users"]).as_str(),
                "https://ru.yougile.com/api-v2/users"
            );
        }
    }

    #[test]
    fn test_path_parameters_are_escaped() {
        let client = YougileClient::new("https://ru.yougile.com").unwrap();
        assert_eq!(
            client.url(&["auth", "keys", "k/x?y#z"]).as_str(),
            "https://ru.yougile.com/api-v2/auth/keys/k%2Fx%3Fy%23z"
        );
    }

    #[test]
    fn test_base_url_with_prefix_path() {
        let client = YougileClient::new("https://proxy.example/yougile/").unwrap();
        assert_eq!(
            client.url(&["tasks", "t-1"]).as_str(),
            "https://proxy.example/yougile/api-v2/tasks/t-1"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = YougileClient::new("not a url").err().unwrap();
        assert!(err.to_string().contains("invalid base_url"));
    }

    #[test]
    fn test_authenticated_requires_api_key() {
        let err = YougileClient::authenticated(&Config::new("https://x", ""))
            .err()
            .unwrap();
        assert!(err.to_string().contains("api_key not set"));
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            op: "list users".to_string(),
            status: StatusCode::UNAUTHORIZED,
            authenticated: true,
        };
        assert_eq!(err.to_string(), "list users: HTTP 401 Unauthorized");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.is_rejected_key());
    }

    #[test]
    fn test_unauthorized_without_key_is_not_a_rejected_key() {
        let err = ApiError::Status {
            op: "get companies".to_string(),
            status: StatusCode::UNAUTHORIZED,
            authenticated: false,
        };
        assert!(!err.is_rejected_key());
    }

    #[test]
    fn test_sticker_kind_segments() {
        assert_eq!(StickerKind::String.segment(), "string-stickers");
        assert_eq!(StickerKind::Sprint.label(), "sprint sticker");
    }
}
