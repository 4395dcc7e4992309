//! HTTP client for the remote `todos` collection.
//!
//! Routes, relative to the configured base URL:
//! - `GET    /todos`       list, newest first
//! - `POST   /todos`       create from `{ "text" }`
//! - `PUT    /todos/{id}`  partial update `{ "completed"?, "text"? }`
//! - `DELETE /todos/{id}`  delete one

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::RemoteConfig;
use crate::error::StoreError;
use crate::model::todo::{Todo, TodoId};
use crate::remote::api::TodoApi;
use crate::remote::dto::{ErrorBody, NewTodo, TodoPatch};

const COLLECTION: &str = "todos";

#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    base_url: Url,
    client: Client,
}

impl HttpTodoApi {
    /// Builds the client for `config`. Call once at startup and hand the
    /// instance to whatever needs it.
    pub fn open(config: &RemoteConfig) -> Result<Self, StoreError> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(StoreError::InvalidConfig(format!(
                "base URL '{}' must start with http:// or https://",
                config.base_url
            )));
        }
        let base_url = Url::parse(trimmed).map_err(|e| {
            StoreError::InvalidConfig(format!("base URL '{}' is invalid: {}", config.base_url, e))
        })?;
        let client = Client::builder().build()?;
        tracing::info!(%base_url, "opened remote todo collection");
        Ok(Self { base_url, client })
    }

    /// Releases the underlying connection pool.
    pub fn close(self) {
        tracing::debug!(base_url = %self.base_url, "closing remote todo collection");
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `<base>/todos` or `<base>/todos/<id>`, with the id percent-encoded as
    /// a single path segment.
    fn endpoint(&self, id: Option<&TodoId>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::InvalidConfig(format!("base URL '{}' cannot hold a path", self.base_url))
            })?;
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, id: Option<&TodoId>) -> Result<RequestBuilder, StoreError> {
        Ok(self.client.request(method, self.endpoint(id)?))
    }

    /// Decodes a success body, or turns the failure into a `StoreError`.
    /// A 404 on a record route means the record is gone.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        id: Option<&TodoId>,
    ) -> Result<T, StoreError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(error_from(response, id).await)
        }
    }

    async fn handle_empty_response(
        &self,
        response: Response,
        id: Option<&TodoId>,
    ) -> Result<(), StoreError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response, id).await)
        }
    }
}

async fn error_from(response: Response, id: Option<&TodoId>) -> StoreError {
    let status = response.status();
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return StoreError::NotFound(id.clone());
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    StoreError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let response = self.request(Method::GET, None)?.send().await?;
        self.handle_response(response, None).await
    }

    async fn create(&self, input: &NewTodo) -> Result<Todo, StoreError> {
        let response = self.request(Method::POST, None)?.json(input).send().await?;
        self.handle_response(response, None).await
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo, StoreError> {
        let response = self
            .request(Method::PUT, Some(id))?
            .json(patch)
            .send()
            .await?;
        self.handle_response(response, Some(id)).await
    }

    async fn delete(&self, id: &TodoId) -> Result<(), StoreError> {
        let response = self.request(Method::DELETE, Some(id))?.send().await?;
        self.handle_empty_response(response, Some(id)).await
    }
}
