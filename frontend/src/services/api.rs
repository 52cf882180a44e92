use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    AddCommentRequest, CreateMemberRequest, CreateMembershipRequest, CreatePostRequest,
    CreateScheduleRequest, JoinScheduleRequest, JoinScheduleResponse, LoginRequest, LoginResponse,
    Member, Membership, Paginated, Post, PostComment, Schedule, UpdateMemberRequest,
    UpdatePostRequest, UpdateScheduleRequest, User,
};
use thiserror::Error;

use crate::domain::calendar::YearMonth;
use crate::domain::post_form::image_mime_type;
use crate::services::config::ClientConfig;
use crate::services::traits::{MemberSource, ScheduleSource, TokenProvider};

/// Upper bound on `next` links followed by a single list call
const MAX_PAGES: usize = 50;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Server returned {status}{}", detail_suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Cannot upload image {path}: {reason}")]
    InvalidImage { path: String, reason: String },
}

fn detail_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

impl ApiError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } => message.clone(),
            ApiError::Status { status, message: None } => format!("Request failed (HTTP {status})"),
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ApiError::Timeout => "The server took too long to respond.".to_string(),
            ApiError::Network(message) if !message.is_empty() => message.clone(),
            ApiError::Decode(_) => "Received an unexpected response from the server.".to_string(),
            ApiError::InvalidImage { .. } => self.to_string(),
            _ => "An unknown error occurred.".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Pull a human readable message out of an error body.
///
/// Looks at `detail`, then `error`, then `message`, then the first
/// field-level validation error (`{"title": ["This field is required."]}`).
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    for key in ["detail", "error", "message"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    value.as_object()?.iter().find_map(|(field, errors)| {
        let first = match errors {
            Value::Array(items) => items.first()?.as_str()?,
            Value::String(text) => text.as_str(),
            _ => return None,
        };
        if field == "non_field_errors" {
            Some(first.to_string())
        } else {
            Some(format!("{field}: {first}"))
        }
    })
}

/// In-memory token holder shared between the client and the login flow
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenProvider for TokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// API client for communicating with the gym REST service
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    media_base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            media_base_url: config.media_base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Client with default settings, no token, and a custom API root
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        Self::new(&config, Arc::new(TokenStore::default()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }

    /// Absolute URL for a media path returned by the server
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        let path = path?.trim();
        if path.is_empty() {
            None
        } else if path.starts_with("http://") || path.starts_with("https://") {
            Some(path.to_string())
        } else {
            Some(format!("{}/{}", self.media_base_url, path.trim_start_matches('/')))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.tokens.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Token {token}")),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Server rejected our credentials, clearing stored token");
            self.tokens.clear();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);
        log::error!(
            "Request to {} failed with {}: {}",
            self.base_url,
            status,
            message.as_deref().unwrap_or("no detail")
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, &self.url(path)).query(query))
            .await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, &self.url(path)).json(body))
            .await
    }

    async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PATCH, &self.url(path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &self.url(path)))
            .await?;
        Ok(())
    }

    /// Fetch a list endpoint and follow `next` links to the end
    async fn get_all_pages<T>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let mut page: Paginated<T> = self.get(path, query).await?;
        let mut items = std::mem::take(&mut page.results);
        let mut pages = 1;

        while let Some(next) = page.next.take() {
            if pages >= MAX_PAGES {
                log::warn!("Stopped following pages of {} after {} pages", path, MAX_PAGES);
                break;
            }
            page = self.send_json(self.request(Method::GET, &next)).await?;
            items.append(&mut page.results);
            pages += 1;
        }

        Ok(items)
    }

    // --- auth ---

    /// Exchange credentials for a token and remember it
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("auth/token/", &request).await?;
        self.tokens.store(response.token.clone());
        log::info!("Logged in as {}", username);
        Ok(response.token)
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }

    // --- users ---

    pub async fn get_users(&self, query: &[(&str, String)]) -> Result<Paginated<User>, ApiError> {
        self.get("users/", query).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.get(&format!("users/{id}/"), &[]).await
    }

    pub async fn get_trainers(&self) -> Result<Vec<User>, ApiError> {
        self.get_all_pages("users/", &[("user_type", "trainer".to_string())])
            .await
    }

    // --- members ---

    pub async fn get_members(&self, query: &[(&str, String)]) -> Result<Paginated<Member>, ApiError> {
        self.get("members/", query).await
    }

    pub async fn get_member(&self, id: i64) -> Result<Member, ApiError> {
        self.get(&format!("members/{id}/"), &[]).await
    }

    pub async fn create_member(&self, request: &CreateMemberRequest) -> Result<Member, ApiError> {
        self.post("members/", request).await
    }

    pub async fn update_member(&self, id: i64, request: &UpdateMemberRequest) -> Result<Member, ApiError> {
        self.patch(&format!("members/{id}/"), request).await
    }

    pub async fn delete_member(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("members/{id}/")).await
    }

    pub async fn get_member_posts(&self, id: i64) -> Result<Vec<Post>, ApiError> {
        self.get(&format!("members/{id}/posts/"), &[]).await
    }

    pub async fn get_member_schedules(&self, id: i64) -> Result<Vec<Schedule>, ApiError> {
        self.get(&format!("members/{id}/schedules/"), &[]).await
    }

    // --- memberships ---

    pub async fn get_memberships(&self, query: &[(&str, String)]) -> Result<Paginated<Membership>, ApiError> {
        self.get("memberships/", query).await
    }

    pub async fn create_membership(&self, request: &CreateMembershipRequest) -> Result<Membership, ApiError> {
        self.post("memberships/", request).await
    }

    // --- schedules ---

    pub async fn get_schedules(&self, query: &[(&str, String)]) -> Result<Paginated<Schedule>, ApiError> {
        self.get("schedules/", query).await
    }

    /// Every schedule of a month; the server expects a 1-indexed month
    pub async fn get_month_schedules(&self, month: YearMonth) -> Result<Vec<Schedule>, ApiError> {
        let query = [
            ("year", month.year().to_string()),
            ("month", month.month_number().to_string()),
        ];
        self.get_all_pages("schedules/", &query).await
    }

    pub async fn get_schedule(&self, id: i64) -> Result<Schedule, ApiError> {
        self.get(&format!("schedules/{id}/"), &[]).await
    }

    pub async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<Schedule, ApiError> {
        self.post("schedules/", request).await
    }

    pub async fn update_schedule(&self, id: i64, request: &UpdateScheduleRequest) -> Result<Schedule, ApiError> {
        self.patch(&format!("schedules/{id}/"), request).await
    }

    pub async fn delete_schedule(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("schedules/{id}/")).await
    }

    pub async fn get_today_schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        self.get("schedules/today/", &[]).await
    }

    pub async fn get_upcoming_schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        self.get("schedules/upcoming/", &[]).await
    }

    pub async fn join_schedule(&self, id: i64, member_id: i64) -> Result<String, ApiError> {
        let response: JoinScheduleResponse = self
            .post(&format!("schedules/{id}/join/"), &JoinScheduleRequest { member_id })
            .await?;
        Ok(response.message)
    }

    // --- posts ---

    pub async fn get_posts(&self, query: &[(&str, String)]) -> Result<Paginated<Post>, ApiError> {
        self.get("posts/", query).await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.get(&format!("posts/{id}/"), &[]).await
    }

    /// Create a post as multipart form data, attaching the image file if given
    pub async fn create_post(&self, request: &CreatePostRequest, image: Option<&Path>) -> Result<Post, ApiError> {
        let mut form = Form::new();

        let fields = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Value::Object(fields) = fields {
            for (name, value) in fields {
                let text = match value {
                    Value::String(text) => text,
                    Value::Null => continue,
                    other => other.to_string(),
                };
                form = form.text(name, text);
            }
        }

        if let Some(path) = image {
            form = form.part("image", image_part(path).await?);
        }

        self.send_json(self.request(Method::POST, &self.url("posts/")).multipart(form))
            .await
    }

    pub async fn update_post(&self, id: i64, request: &UpdatePostRequest) -> Result<Post, ApiError> {
        self.patch(&format!("posts/{id}/"), request).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("posts/{id}/")).await
    }

    pub async fn add_comment(&self, post_id: i64, content: &str) -> Result<PostComment, ApiError> {
        let request = AddCommentRequest {
            content: content.to_string(),
        };
        self.post(&format!("posts/{post_id}/add_comment/"), &request)
            .await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("comments/{id}/")).await
    }
}

async fn image_part(path: &Path) -> Result<Part, ApiError> {
    let invalid = |reason: String| ApiError::InvalidImage {
        path: path.display().to_string(),
        reason,
    };

    let mime = image_mime_type(path).ok_or_else(|| invalid("unsupported file type".to_string()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| invalid(e.to_string()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| invalid(e.to_string()))
}

#[async_trait]
impl ScheduleSource for ApiClient {
    async fn fetch_month_schedules(&self, month: YearMonth) -> Result<Vec<Schedule>, ApiError> {
        self.get_month_schedules(month).await
    }
}

#[async_trait]
impl MemberSource for ApiClient {
    async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.get_all_pages("members/", &[]).await
    }

    async fn member_posts(&self, member_id: i64) -> Result<Vec<Post>, ApiError> {
        self.get_member_posts(member_id).await
    }

    async fn create_post(&self, request: &CreatePostRequest, image: Option<&Path>) -> Result<Post, ApiError> {
        ApiClient::create_post(self, request, image).await
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError> {
        ApiClient::delete_post(self, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, Query};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use shared::PostType;
    use std::collections::HashMap;
    use std::io::Write;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn client_with_token(base_url: &str, token: Option<&str>) -> ApiClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            media_base_url: "http://media.test".to_string(),
            ..Default::default()
        };
        ApiClient::new(&config, Arc::new(TokenStore::new(token.map(String::from)))).unwrap()
    }

    async fn schedules_handler(
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> (AxumStatus, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if auth != "Token secret" {
            return (AxumStatus::UNAUTHORIZED, Json(json!({"detail": "Invalid token."})));
        }

        let host = headers.get("host").and_then(|v| v.to_str().ok()).unwrap_or_default();
        let month = query.get("month").cloned().unwrap_or_default();
        let body = match query.get("page").map(String::as_str) {
            Some("2") => json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [{"id": 2, "title": "Yoga", "date": "2024-03-05", "start_time": "09:00"}]
            }),
            _ => json!({
                "count": 2,
                "next": format!("http://{host}/api/schedules/?year=2024&month={month}&page=2"),
                "previous": null,
                "results": [{"id": 1, "title": format!("month {month}"), "date": "2024-03-05", "start_time": "14:00"}]
            }),
        };
        (AxumStatus::OK, Json(body))
    }

    #[tokio::test]
    async fn test_month_schedules_follow_pages_with_token() {
        let base = spawn_server(Router::new().route("/api/schedules/", get(schedules_handler))).await;
        let client = client_with_token(&base, Some("secret"));

        let schedules = client
            .fetch_month_schedules(YearMonth::new(2024, 2))
            .await
            .unwrap();

        assert_eq!(schedules.len(), 2);
        // March is month 2 locally and month 3 on the wire
        assert_eq!(schedules[0].title, "month 3");
        assert_eq!(schedules[1].title, "Yoga");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token() {
        let base = spawn_server(Router::new().route("/api/schedules/", get(schedules_handler))).await;
        let client = client_with_token(&base, Some("stale"));

        let error = client
            .fetch_month_schedules(YearMonth::new(2024, 2))
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert_eq!(client.tokens().token(), None);
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let router = Router::new().route(
            "/api/schedules/:id/join/",
            post(|| async { (AxumStatus::BAD_REQUEST, Json(json!({"error": "Class is full"}))) }),
        );
        let base = spawn_server(router).await;
        let client = client_with_token(&base, None);

        let error = client.join_schedule(4, 12).await.unwrap_err();
        assert!(matches!(error, ApiError::Status { status: 400, .. }));
        assert_eq!(error.user_message(), "Class is full");
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let router = Router::new().route(
            "/api/auth/token/",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["username"], "coach");
                Json(json!({"token": "fresh-token"}))
            }),
        );
        let base = spawn_server(router).await;
        let client = client_with_token(&base, None);

        let token = client.login("coach", "pw").await.unwrap();
        assert_eq!(token, "fresh-token");
        assert_eq!(client.tokens().token().as_deref(), Some("fresh-token"));

        client.logout();
        assert_eq!(client.tokens().token(), None);
    }

    #[tokio::test]
    async fn test_create_post_sends_multipart_with_image() {
        async fn create(mut multipart: Multipart) -> Json<Value> {
            let mut fields = HashMap::new();
            while let Some(field) = multipart.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(String::from);
                let data = field.bytes().await.unwrap();
                let value = file_name.unwrap_or_else(|| String::from_utf8_lossy(&data).into_owned());
                fields.insert(name, value);
            }
            Json(json!({
                "id": 77,
                "member": fields["member"].parse::<i64>().unwrap(),
                "post_type": fields["post_type"],
                "content": fields["content"],
                "image": format!("/media/posts/{}", fields["image"]),
            }))
        }

        let base = spawn_server(Router::new().route("/api/posts/", post(create))).await;
        let client = client_with_token(&base, Some("secret"));

        let mut image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        image.write_all(b"not really a png").unwrap();
        let request = CreatePostRequest {
            member: 5,
            post_type: PostType::Progress,
            content: "New PR".to_string(),
            workout_duration: None,
            calories_burned: None,
            weight: None,
        };

        let created = ApiClient::create_post(&client, &request, Some(image.path()))
            .await
            .unwrap();
        assert_eq!(created.id, 77);
        assert_eq!(created.member, Some(5));
        assert_eq!(created.post_type, PostType::Progress);
        assert_eq!(created.content, "New PR");

        let url = client.image_url(created.image.as_deref()).unwrap();
        assert!(url.starts_with("http://media.test/media/posts/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_create_post_rejects_unsupported_image() {
        let client = client_with_token("http://127.0.0.1:9/api", None);
        let request = CreatePostRequest {
            member: 1,
            post_type: PostType::Note,
            content: "hi".to_string(),
            workout_duration: None,
            calories_burned: None,
            weight: None,
        };

        let error = ApiClient::create_post(&client, &request, Some(Path::new("video.mov")))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::InvalidImage { .. }));
    }

    #[test]
    fn test_server_message_priority() {
        assert_eq!(
            server_message(r#"{"error": "second", "detail": "first"}"#).as_deref(),
            Some("first")
        );
        assert_eq!(server_message(r#"{"error": "only error"}"#).as_deref(), Some("only error"));
        assert_eq!(
            server_message(r#"{"title": ["This field is required."]}"#).as_deref(),
            Some("title: This field is required.")
        );
        assert_eq!(
            server_message(r#"{"non_field_errors": ["Unable to log in."]}"#).as_deref(),
            Some("Unable to log in.")
        );
        assert_eq!(server_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_user_message_fallbacks() {
        let error = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(error.user_message(), "Request failed (HTTP 500)");
        assert_eq!(error.to_string(), "Server returned 500");
        assert_eq!(ApiError::Network(String::new()).user_message(), "An unknown error occurred.");
        assert_eq!(
            ApiError::Network("connection refused".to_string()).user_message(),
            "connection refused"
        );
    }

    #[test]
    fn test_context_keeps_api_error_as_source() {
        use anyhow::Context;

        let result: Result<(), ApiError> = Err(ApiError::Status {
            status: 400,
            message: Some("Phone already registered".to_string()),
        });
        let error = result.context("Failed to register member").unwrap_err();

        assert_eq!(error.to_string(), "Failed to register member");
        let source = error.downcast_ref::<ApiError>().unwrap();
        assert_eq!(source.user_message(), "Phone already registered");
        assert!(format!("{error:#}").ends_with("Server returned 400: Phone already registered"));
    }

    #[test]
    fn test_image_url() {
        let client = client_with_token("http://api.test/api/", None);
        assert_eq!(client.base_url(), "http://api.test/api");
        assert_eq!(
            client.image_url(Some("/media/a.jpg")).as_deref(),
            Some("http://media.test/media/a.jpg")
        );
        assert_eq!(
            client.image_url(Some("https://cdn.test/b.jpg")).as_deref(),
            Some("https://cdn.test/b.jpg")
        );
        assert_eq!(client.image_url(Some("  ")), None);
        assert_eq!(client.image_url(None), None);
    }
}
