//! # User API Client
//!
//! Request construction for the `/api/users` endpoints and the transport that
//! sends them. Any status code the server answers with is a normal response;
//! only failing to get an answer at all is an error.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};

use crate::config::USERS_ENDPOINT;
use crate::form::UserInput;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A single call against the user API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    method: Method,
    segments: Vec<String>,
    body: Option<String>,
}

impl UserRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path segments below the server's base URL, unencoded
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path for display and logging (not percent-encoded)
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// JSON body, if the request carries one
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Raw answer from the server: status code and body text, unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Operations the panel can run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create(UserInput),
    List,
    Update { id: String, input: UserInput },
    Patch { id: String, input: UserInput },
    Delete { id: String },
}

impl Operation {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Create(_) => "create",
            Operation::List => "list",
            Operation::Update { .. } => "update",
            Operation::Patch { .. } => "patch",
            Operation::Delete { .. } => "delete",
        }
    }

    /// Build the HTTP request for this operation
    pub fn to_request(&self) -> Result<UserRequest> {
        let collection = collection_segments();
        let item = |id: &str| {
            let mut segments = collection_segments();
            segments.push(id.to_string());
            segments
        };

        let request = match self {
            Operation::Create(input) => UserRequest {
                method: Method::POST,
                segments: collection,
                body: Some(json_body(input)?),
            },
            Operation::List => UserRequest {
                method: Method::GET,
                segments: collection,
                body: None,
            },
            Operation::Update { id, input } => UserRequest {
                method: Method::PUT,
                segments: item(id),
                body: Some(json_body(input)?),
            },
            Operation::Patch { id, input } => UserRequest {
                method: Method::PATCH,
                segments: item(id),
                body: Some(json_body(input)?),
            },
            Operation::Delete { id } => UserRequest {
                method: Method::DELETE,
                segments: item(id),
                body: None,
            },
        };
        Ok(request)
    }
}

fn collection_segments() -> Vec<String> {
    USERS_ENDPOINT
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_body(input: &UserInput) -> Result<String> {
    serde_json::to_string(input).context("failed to encode user payload")
}

/// Sends a request and hands back whatever the server answered
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &UserRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport bound to one server
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(server: &str) -> Result<Self> {
        let base =
            Url::parse(server).with_context(|| format!("invalid server URL '{server}'"))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("server URL '{server}' cannot carry a path"));
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        tracing::debug!("HTTP transport bound to {base}");
        Ok(Self { client, base })
    }

    /// Full URL for a request, keeping any path prefix of the base
    pub fn url_for(&self, request: &UserRequest) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL '{}' cannot carry a path", self.base))?
            .pop_if_empty()
            .extend(request.segments());
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &UserRequest) -> Result<ApiResponse> {
        let url = self.url_for(request)?;
        tracing::debug!("{} {}", request.method(), url);

        let mut builder = self.client.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("Received {status} with {} bytes", body.len());

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserInput {
        UserInput::new("Alice", "alice@example.com", "secret")
    }

    #[test]
    fn create_should_post_json_to_collection() {
        let request = Operation::Create(alice()).to_request().unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path(), "/api/users");
        assert_eq!(
            request.body(),
            Some(r#"{"name":"Alice","email":"alice@example.com","password":"secret"}"#)
        );
    }

    #[test]
    fn list_should_get_collection_without_body() {
        let request = Operation::List.to_request().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/api/users");
        assert_eq!(request.body(), None);
    }

    #[test]
    fn item_operations_should_target_user_id() {
        let update = Operation::Update {
            id: "7".to_string(),
            input: alice(),
        }
        .to_request()
        .unwrap();
        assert_eq!(update.method(), &Method::PUT);
        assert_eq!(update.path(), "/api/users/7");
        assert!(update.body().is_some());

        let patch = Operation::Patch {
            id: "7".to_string(),
            input: alice(),
        }
        .to_request()
        .unwrap();
        assert_eq!(patch.method(), &Method::PATCH);

        let delete = Operation::Delete { id: "7".to_string() }
            .to_request()
            .unwrap();
        assert_eq!(delete.method(), &Method::DELETE);
        assert_eq!(delete.path(), "/api/users/7");
        assert_eq!(delete.body(), None);
    }

    #[test]
    fn url_for_should_join_onto_base() {
        let transport = HttpTransport::new("http://localhost:8080").unwrap();
        let url = transport
            .url_for(&Operation::List.to_request().unwrap())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users");
    }

    #[test]
    fn url_for_should_keep_base_prefix_and_encode_id() {
        let transport = HttpTransport::new("http://example.com/v2/").unwrap();
        let request = Operation::Delete {
            id: "a b/c".to_string(),
        }
        .to_request()
        .unwrap();

        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://example.com/v2/api/users/a%20b%2Fc");
    }

    #[test]
    fn new_should_reject_invalid_server() {
        let err = HttpTransport::new("not a url").unwrap_err();
        assert!(err.to_string().contains("invalid server URL"));

        let err = HttpTransport::new("mailto:someone@example.com").unwrap_err();
        assert!(err.to_string().contains("cannot carry a path"));
    }
}
