//! Executor access: server parsing, the `Executor` seam, wire shapes.
//!
//! parse_server -> ServerSpec (http/https base URL, endpoint joining)
//! Executor::send -> ExecutionResult (never fails; transport trouble becomes
//! `success: false` with a generic message)
//! HttpExecutor: the reqwest-backed implementation, see `http.rs`.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use url::Url;

mod error;
mod http;

pub use error::ExecutorError;
pub use http::{AuthStatus, ConnectionCheck, HttpExecutor};

/// Message used for every transport-level failure of `send`.
pub const CONNECTION_FAILED: &str = "Failed to connect to server";

/// Base URL used when nothing else is configured.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

pub const EXECUTE_PATH: &str = "api/execute";
pub const AUTH_STATUS_PATH: &str = "api/auth/status";
pub const TEST_CONNECTION_PATH: &str = "api/test/connection";

/* ---- Server ---- */

/// A validated executor base URL.
///
/// The path always ends with `/` so endpoint joins append rather than replace
/// the last segment (`http://host/prefix` + `api/execute` ->
/// `http://host/prefix/api/execute`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSpec {
    original: String,
    base: Url,
}

impl ServerSpec {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of an endpoint relative to the base.
    pub fn endpoint(&self, path: &str) -> Result<Url, ExecutorError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ExecutorError::invalid_server(&self.original, e.to_string()))
    }
}

impl fmt::Display for ServerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)
    }
}

/// Parse a user-supplied server string into a `ServerSpec`.
///
/// Only `http` and `https` are accepted. Query and fragment are dropped.
pub fn parse_server(raw: &str) -> Result<ServerSpec, ExecutorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExecutorError::invalid_server(raw, "server string is empty"));
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| ExecutorError::invalid_server(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ExecutorError::invalid_server(
                raw,
                format!("unsupported scheme '{other}' (expected http or https)"),
            ));
        }
    }
    if url.host_str().is_none() {
        return Err(ExecutorError::invalid_server(raw, "missing host"));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(ServerSpec {
        original: raw.to_string(),
        base: url,
    })
}

/* ---- Execution Result ---- */

/// Normalized shape of every executor response, whatever the intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(raw: impl Into<String>) -> Self {
        Self {
            success: true,
            raw: raw.into(),
            error: None,
        }
    }

    pub fn failed(error: Option<String>) -> Self {
        Self {
            success: false,
            raw: String::new(),
            error,
        }
    }

    pub fn connection_failure() -> Self {
        Self::failed(Some(CONNECTION_FAILED.to_string()))
    }
}

/* ---- Wire Shapes ---- */

/// Body of `POST /api/execute`.
#[derive(Debug, Serialize)]
pub(crate) struct ExecuteRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<&'a str>,
}

/// Reply of `POST /api/execute`. Extra fields (e.g. `command`) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ExecuteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ExecuteResponse> for ExecutionResult {
    fn from(resp: ExecuteResponse) -> Self {
        ExecutionResult {
            success: resp.success,
            raw: resp.response.unwrap_or_default(),
            error: resp.error,
        }
    }
}

/* ---- Executor Seam ---- */

/// Sends one instruction and reports the normalized result.
///
/// One round-trip per call, no retry, no deduplication: concurrent calls are
/// independent. Implementations must not fail; transport problems are
/// reported as `success: false`.
pub trait Executor {
    fn send(&self, instruction: &str) -> impl Future<Output = ExecutionResult> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_server_http() {
        let server = parse_server("http://localhost:5000").unwrap();
        assert_eq!(server.base().as_str(), "http://localhost:5000/");
        assert_eq!(
            server.endpoint(EXECUTE_PATH).unwrap().as_str(),
            "http://localhost:5000/api/execute"
        );
    }

    #[test]
    fn parse_server_keeps_prefix() {
        let server = parse_server(" https://drive.example.org/backend?x=1 ").unwrap();
        assert_eq!(
            server.endpoint("/api/auth/status").unwrap().as_str(),
            "https://drive.example.org/backend/api/auth/status"
        );
        assert_eq!(server.original(), " https://drive.example.org/backend?x=1 ");
    }

    #[test]
    fn parse_server_rejects_other_schemes() {
        let err = parse_server("ws://example.org").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn parse_server_rejects_empty_and_garbage() {
        assert!(parse_server("   ").unwrap_err().to_string().contains("empty"));
        assert!(parse_server("not a url").is_err());
    }

    #[test]
    fn response_without_text_becomes_empty_raw() {
        let resp: ExecuteResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(ExecutionResult::from(resp), ExecutionResult::ok(""));
    }

    #[test]
    fn response_missing_success_counts_as_failure() {
        let resp: ExecuteResponse =
            serde_json::from_str(r#"{"error":"No message provided"}"#).unwrap();
        let result = ExecutionResult::from(resp);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("No message provided"));
    }

    #[test]
    fn request_omits_absent_identity() {
        let body = serde_json::to_value(ExecuteRequest {
            message: "list /",
            whatsapp_number: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message":"list /"}));
    }
}
