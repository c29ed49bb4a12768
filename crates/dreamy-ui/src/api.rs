use gloo::net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use dreamy_core::error::ApiError;
use dreamy_core::reorder::PositionUpdate;
use dreamy_core::todo::{TodoItem, TodoListPage, TodoPayload};
use dreamy_core::user::{AuthResponse, LoginPayload, ProfileDraft, SignupPayload, User};

use crate::session::Session;

const DEFAULT_API_BASE: &str = "https://todo-app.pioneeralpha.com/api";

/// Single chokepoint for network I/O: base URL, bearer injection, JSON or
/// multipart encoding, and uniform error translation. Any HTTP 401 clears
/// the session before the error reaches the caller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: &'static str,
    session: Session,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && std::rc::Rc::ptr_eq(&self.session, &other.session)
    }
}

/// Error bodies vary by endpoint; the server sends `message`, DRF-style
/// views send `detail`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        Self {
            base_url: option_env!("DREAMY_API_BASE").unwrap_or(DEFAULT_API_BASE),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status == 401 {
            warn!("unauthorized response, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if !(200..300).contains(&status) {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message.or(body.detail));
            return Err(ApiError::from_status(status, message));
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let response = self.check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Network(format!("failed to decode response: {error}")))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        let request = self
            .request(builder)
            .json(body)
            .map_err(|error| ApiError::Network(error.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        self.parse(response).await
    }

    async fn send_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self
            .request(Request::get(&self.url(endpoint)))
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        self.parse(response).await
    }

    /// Logs in, stores the access token, then fetches and caches the full
    /// user record. The session is only touched on success.
    pub async fn login(&self, payload: &LoginPayload) -> Result<User, ApiError> {
        let auth: AuthResponse = self
            .send_json(Request::post(&self.url("/auth/login/")), payload)
            .await?;

        let Some(token) = auth.bearer() else {
            return Err(ApiError::RequestFailed {
                status: 200,
                message: "Login failed. Please try again.".to_string(),
            });
        };

        self.session.store_token(token);
        let user: User = self.send_get("/users/me/").await?;
        self.session.set_user(&user);
        debug!(user = %user.email, "login complete");
        Ok(user)
    }

    /// Creates the account and, when the response carries a token, performs
    /// the same auto-login dance as `login`.
    pub async fn signup(&self, payload: &SignupPayload) -> Result<(), ApiError> {
        let auth: AuthResponse = self
            .send_json(Request::post(&self.url("/users/signup/")), payload)
            .await?;

        if let Some(token) = auth.bearer() {
            self.session.store_token(token);
            if let Ok(user) = self.send_get::<User>("/users/me/").await {
                self.session.set_user(&user);
            }
        }
        Ok(())
    }

    /// Fetches the profile and refreshes the cached session record.
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.send_get("/users/me/").await?;
        self.session.set_user(&user);
        Ok(user)
    }

    /// Multipart PATCH of the profile; required whenever a photo file rides
    /// along, and harmless without one.
    pub async fn update_profile(
        &self,
        draft: &ProfileDraft,
        photo: Option<&web_sys::File>,
    ) -> Result<User, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::Network("failed to build form data".to_string()))?;

        for (key, value) in draft.fields() {
            let _ = form.append_with_str(key, value);
        }
        if let Some(file) = photo {
            let _ = form.append_with_blob_and_filename("profile_image", file, &file.name());
        }

        let request = self
            .request(Request::patch(&self.url("/users/me/")))
            .body(form)
            .map_err(|error| ApiError::Network(error.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let user: User = self.parse(response).await?;
        self.session.set_user(&user);
        Ok(user)
    }

    /// `GET /todos/` is paginated; only `results` is consumed.
    pub async fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
        let page: TodoListPage = self.send_get("/todos/").await?;
        debug!(count = page.count, loaded = page.results.len(), "loaded todos");
        Ok(page.results)
    }

    pub async fn create_todo(&self, payload: &TodoPayload) -> Result<TodoItem, ApiError> {
        self.send_json(Request::post(&self.url("/todos/")), payload)
            .await
    }

    pub async fn update_todo(&self, id: i64, payload: &TodoPayload) -> Result<TodoItem, ApiError> {
        self.send_json(Request::patch(&self.url(&format!("/todos/{id}/"))), payload)
            .await
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .request(Request::delete(&self.url(&format!("/todos/{id}/"))))
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        self.check(response).await?;
        Ok(())
    }

    /// Persists one reorder batch: an independent `PATCH /todos/{id}/` with
    /// `{position}` per changed item, issued back to back. The first failure
    /// aborts the batch and surfaces; batch sequencing (and revert) is the
    /// reorder queue's job.
    pub async fn persist_reorder(&self, batch: &[PositionUpdate]) -> Result<(), ApiError> {
        for update in batch {
            let body = serde_json::json!({ "position": update.position });
            let _: TodoItem = self
                .send_json(
                    Request::patch(&self.url(&format!("/todos/{}/", update.id))),
                    &body,
                )
                .await?;
        }
        debug!(updates = batch.len(), "reorder batch persisted");
        Ok(())
    }
}
