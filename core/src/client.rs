//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only a `base_url` and the configured list envelope,
//! and carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. A `Transport` executes the round-trip in
//! between, keeping this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::config::ListEnvelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DeletedPost, NewPost, Post, PostId, PostsEnvelope};

/// Resource path of the posts collection, relative to the base URL.
pub const POSTS_PATH: &str = "/v1/posts";

/// Synchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
    envelope: ListEnvelope,
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_envelope(base_url, ListEnvelope::default())
    }

    pub fn with_envelope(base_url: &str, envelope: ListEnvelope) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            envelope,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn envelope(&self) -> ListEnvelope {
        self.envelope
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{POSTS_PATH}", self.base_url),
            headers: accept_json(),
            body: None,
        }
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut headers = accept_json();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{POSTS_PATH}", self.base_url),
            headers,
            body: Some(body),
        })
    }

    pub fn build_delete_post(&self, id: PostId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{POSTS_PATH}/{id}", self.base_url),
            headers: accept_json(),
            body: None,
        }
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response)?;
        match self.envelope {
            ListEnvelope::Bare => decode(&response.body),
            ListEnvelope::Wrapped => decode::<PostsEnvelope>(&response.body).map(|e| e.posts),
        }
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Returns the id of the deleted post.
    ///
    /// An empty body (204) acknowledges `id` directly. A body echoing the id
    /// must name the same post.
    pub fn parse_delete_post(
        &self,
        id: PostId,
        response: HttpResponse,
    ) -> Result<PostId, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(id);
        }
        let echoed: DeletedPost = decode(&response.body)?;
        if echoed.id != id {
            return Err(ApiError::UnexpectedResponse(format!(
                "deleted {} but requested {id}",
                echoed.id
            )));
        }
        Ok(id)
    }
}

fn accept_json() -> Vec<(String, String)> {
    vec![("accept".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
