//! API client layer modeling the admin-editing and public-rendering
//! contracts.
//!
//! All calls go through an explicit [`Session`] (base URL plus optional
//! bearer token); there is no global client state. Public-rendering
//! consumers use the `*_or_default` fetches, which substitute the
//! [`fallback`] constants on any error so a page never renders empty.

pub mod draft;
pub mod fallback;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{BlogPost, ContentDomain, Service, TeamMember};

/// Errors surfaced by the client layer. Fallback substitution is always an
/// explicit `unwrap_or` at the call site, never a swallowed branch here.
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, decode)
    Http(reqwest::Error),
    /// The server answered with an error envelope
    Api { status: u16, message: String },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "http error: {}", e),
            ClientError::Api { status, message } => write!(f, "api error {}: {}", status, message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// A list page as the server returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current: i64,
    pub pages: i64,
    pub total: i64,
}

/// An authenticated (or anonymous) connection to the backend.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Session {
    /// Anonymous session for public-rendering fetches.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Session carrying a bearer token for the editing surface.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: Some(token.into()),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;
        match envelope.data {
            Some(data) if status.is_success() => Ok(data),
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            }),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::unwrap_envelope(response).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    // ---- typed fetches used by the rendering surface ----

    /// Fetch a page domain's current document body.
    pub async fn fetch_page_content(&self, domain: ContentDomain) -> Result<Value, ClientError> {
        #[derive(Deserialize)]
        struct Doc {
            body: Value,
        }
        let doc: Doc = self
            .get(&format!("/api/content/{}", domain.as_str()))
            .await?;
        Ok(doc.body)
    }

    /// Fetch a page domain's document, substituting the fallback constant
    /// on any failure. One attempt, no retry.
    pub async fn fetch_page_content_or_default(&self, domain: ContentDomain) -> Value {
        self.fetch_page_content(domain)
            .await
            .unwrap_or_else(|_| fallback::default_document(domain))
    }

    pub async fn list_published_posts(&self, page: i64) -> Result<ItemPage<BlogPost>, ClientError> {
        self.get(&format!("/api/blog?page={}&limit=10", page)).await
    }

    pub async fn fetch_post_by_slug(&self, slug: &str) -> Result<BlogPost, ClientError> {
        self.get(&format!("/api/blog/{}", slug)).await
    }

    pub async fn list_active_services(&self) -> Result<ItemPage<Service>, ClientError> {
        self.get("/api/services?limit=100").await
    }

    pub async fn list_visible_team(&self) -> Result<ItemPage<TeamMember>, ClientError> {
        self.get("/api/team?limit=100").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_carry_token_explicitly() {
        let anon = Session::anonymous("http://localhost:8080");
        assert!(anon.token.is_none());
        let auth = Session::with_token("http://localhost:8080", "tok");
        assert_eq!(auth.token.as_deref(), Some("tok"));
    }
}
