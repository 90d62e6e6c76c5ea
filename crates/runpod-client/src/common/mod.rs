//! Common utilities for the RunPod API client
//!
//! Provides the authenticated transport shared by every typed operation. All
//! status-code-to-error mapping happens here and nowhere else.

use crate::error::RunPodError;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters of an undecodable body kept in a [`RunPodError::Decode`] message
const BODY_SNIPPET_CHARS: usize = 500;

/// HTTP client wrapper with bearer authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Make a GET request.
    ///
    /// A 404 becomes [`RunPodError::NotFound`]; callers rely on this to detect
    /// that an identity no longer exists.
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, RunPodError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(RunPodError::NotFound(format!("{} - {}", path, body)));
        }

        decode(path, check_status(response).await?).await
    }

    /// Make a POST request
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, RunPodError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// Make a PUT request
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, RunPodError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// Make a PATCH request
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, RunPodError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Make a POST request without a body and ignore the response body
    pub async fn post_empty(&self, path: &str) -> Result<(), RunPodError> {
        let url = self.build_url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), RunPodError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, RunPodError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path);
        let payload = serde_json::to_vec(body)?;
        debug!("{} {} with body: {}", method, url, String::from_utf8_lossy(&payload));

        let response = self
            .client
            .request(method, &url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        decode(path, check_status(response).await?).await
    }
}

/// Turn any status >= 400 into [`RunPodError::Api`] carrying the body text.
async fn check_status(response: Response) -> Result<Response, RunPodError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(RunPodError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn decode<T: for<'de> Deserialize<'de>>(path: &str, response: Response) -> Result<T, RunPodError> {
    let response_text = response.text().await?;
    serde_json::from_str(&response_text).map_err(|e| {
        RunPodError::Decode(format!(
            "error decoding response body from {}: {} - Response (first {} chars): {}",
            path,
            e,
            BODY_SNIPPET_CHARS,
            response_text.chars().take(BODY_SNIPPET_CHARS).collect::<String>()
        ))
    })
}
