use colored::Colorize;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::logging::safe_truncate;
use crate::models::{BotReply, ChatRequest, HealthReport, SolveReport, SolveRequest};

/// Single error kind surfaced by the transport layer. Network-level failure
/// and non-2xx statuses are treated uniformly; callers convert it into a
/// synthetic bot turn rather than propagating a raw fault to the user.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("unreadable response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP client for the chatbot backend. One attempt per call: no retry, no
/// timeout override, no cancellation.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    verbose: bool,
}

impl ApiClient {
    pub fn new(base_url: String, verbose: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            verbose,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// One request/response exchange for a single user message.
    pub async fn exchange(&self, text: &str) -> Result<BotReply, TransportError> {
        self.post_json("chat", &ChatRequest::new(text)).await
    }

    /// Dedicated solver endpoint; the backend runs the problem solver
    /// without the conversational wrapping.
    pub async fn solve(&self, problem: &str) -> Result<SolveReport, TransportError> {
        self.post_json("solve", &SolveRequest::new(problem)).await
    }

    pub async fn health(&self) -> Result<HealthReport, TransportError> {
        let url = self.endpoint("health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;
        self.read_json(&url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let url = self.endpoint(path);

        if self.verbose {
            if let Ok(json) = serde_json::to_string(body) {
                eprintln!(
                    "{} POST {} {}",
                    "🌐".bright_black(),
                    url.bright_black(),
                    safe_truncate(&json, 200).bright_black()
                );
            }
        }

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;
        self.read_json(&url, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            if self.verbose {
                let body = response.text().await.unwrap_or_default();
                eprintln!(
                    "{} {} -> {} {}",
                    "🌐".bright_black(),
                    url.bright_black(),
                    status.to_string().red(),
                    safe_truncate(&body, 500).bright_black()
                );
            }
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| TransportError::Body {
                url: url.to_string(),
                source,
            })?;

        if self.verbose {
            eprintln!(
                "{} {} -> {} {}",
                "🌐".bright_black(),
                url.bright_black(),
                status.to_string().green(),
                safe_truncate(&text, 500).bright_black()
            );
        }

        serde_json::from_str(&text).map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:5001/".to_string(), false);
        assert_eq!(client.endpoint("chat"), "http://localhost:5001/chat");

        let client = ApiClient::new("http://localhost:5001".to_string(), false);
        assert_eq!(client.endpoint("health"), "http://localhost:5001/health");
    }

    #[test]
    fn status_error_names_url_and_code() {
        let err = TransportError::Status {
            url: "http://localhost:5001/chat".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        let text = err.to_string();
        assert!(text.contains("http://localhost:5001/chat"));
        assert!(text.contains("500"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Port 9 (discard) is a safe never-listening target.
        let client = ApiClient::new("http://127.0.0.1:9".to_string(), false);
        match client.exchange("hello").await {
            Err(TransportError::Network { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/chat");
            }
            other => panic!("expected network error, got {:?}", other.map(|_| ())),
        }
    }
}
