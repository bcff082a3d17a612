//! HTTP client for the authentication service under test
//!
//! One method per endpoint. Methods never judge the status code: they hand
//! back whatever the service answered and leave assertions to the steps.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::common::{Error, Result};

/// Status and JSON body of a service response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, or `Value::Null` when empty or not JSON
    pub body: Value,
}

impl ApiResponse {
    /// String field from the body, treating empty strings as absent
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct UpdatePasswordBody<'a> {
    email: &'a str,
    reset_token: &'a str,
    new_password: &'a str,
}

/// Client bound to one service base URL
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Build a client for `base_url`, optionally with a per-request timeout
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("auth-smoke/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Base URL with no trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /register`
    pub async fn register(&self, email: &str, password: &str) -> Result<ApiResponse> {
        let req = self
            .request(Method::POST, "/register")
            .json(&CredentialsBody { email, password });
        self.send(req, "/register").await
    }

    /// `POST /login`
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse> {
        let req = self
            .request(Method::POST, "/login")
            .json(&CredentialsBody { email, password });
        self.send(req, "/login").await
    }

    /// `GET /profile`, with a bearer credential when one is given
    pub async fn profile(&self, session_id: Option<&str>) -> Result<ApiResponse> {
        let mut req = self.request(Method::GET, "/profile");
        if let Some(session_id) = session_id {
            req = req.bearer_auth(session_id);
        }
        self.send(req, "/profile").await
    }

    /// `GET /logout`
    pub async fn logout(&self, session_id: &str) -> Result<ApiResponse> {
        let req = self.request(Method::GET, "/logout").bearer_auth(session_id);
        self.send(req, "/logout").await
    }

    /// `POST /reset_password`
    pub async fn reset_password(&self, email: &str) -> Result<ApiResponse> {
        let req = self
            .request(Method::POST, "/reset_password")
            .json(&ResetPasswordBody { email });
        self.send(req, "/reset_password").await
    }

    /// `PUT /update_password`
    pub async fn update_password(
        &self,
        email: &str,
        reset_token: &str,
        new_password: &str,
    ) -> Result<ApiResponse> {
        let req = self
            .request(Method::PUT, "/update_password")
            .json(&UpdatePasswordBody {
                email,
                reset_token,
                new_password,
            });
        self.send(req, "/update_password").await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn send(&self, req: RequestBuilder, path: &str) -> Result<ApiResponse> {
        let response = req.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        tracing::debug!(path, status, body = %body, "service responded");

        Ok(ApiResponse { status, body })
    }
}

/// Validate a base URL and strip any trailing slash
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| Error::InvalidBaseUrl(raw.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::InvalidBaseUrl(raw.to_string()));
    }

    Ok(trimmed.to_string())
}
