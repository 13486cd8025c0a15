//! reqwest-backed executor client.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{
    AUTH_STATUS_PATH, EXECUTE_PATH, ExecuteRequest, ExecuteResponse, ExecutionResult, Executor,
    ExecutorError, ServerSpec, TEST_CONNECTION_PATH,
};

/// Drive authorization state for the configured WhatsApp identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub whatsapp_number: String,
    pub authenticated: bool,
}

/// Outcome of the executor's own connectivity self-test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionCheck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthStatusResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConnectionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for one executor server.
///
/// Holds only immutable request context; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    server: ServerSpec,
    identity: Option<String>,
    headers: HeaderMap,
    client: Client,
}

impl HttpExecutor {
    pub fn new(server: ServerSpec) -> Self {
        Self {
            server,
            identity: None,
            headers: HeaderMap::new(),
            client: Client::new(),
        }
    }

    /// Attach the WhatsApp number the executor should act for.
    pub fn with_identity(mut self, whatsapp_number: impl Into<String>) -> Self {
        let id = whatsapp_number.into();
        self.identity = (!id.trim().is_empty()).then(|| id.trim().to_string());
        self
    }

    /// Extra headers sent with every request.
    pub fn with_headers(mut self, headers: &BTreeMap<String, String>) -> Result<Self, ExecutorError> {
        for (k, v) in headers {
            let name = HeaderName::from_bytes(k.trim().as_bytes())
                .map_err(|_| ExecutorError::InvalidHeader(format!("{k}={v}")))?;
            let value = HeaderValue::from_str(v.trim())
                .map_err(|_| ExecutorError::InvalidHeader(format!("{k}={v}")))?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    pub fn server(&self) -> &ServerSpec {
        &self.server
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    async fn try_send(&self, instruction: &str) -> Result<ExecutionResult, ExecutorError> {
        let url = self.server.endpoint(EXECUTE_PATH)?;
        let body = ExecuteRequest {
            message: instruction,
            whatsapp_number: self.identity.as_deref(),
        };
        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;
        let resp: ExecuteResponse = decode(response).await?;
        Ok(resp.into())
    }

    /// Ask whether the configured identity has a connected Drive account.
    pub async fn auth_status(&self) -> Result<AuthStatus, ExecutorError> {
        let number = self.identity.clone().ok_or(ExecutorError::MissingIdentity)?;
        let url = self.server.endpoint(AUTH_STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .query(&[("whatsapp_number", number.as_str())])
            .send()
            .await?;
        let resp: AuthStatusResponse = decode(response).await?;
        if !resp.success {
            return Err(ExecutorError::Rejected(resp.error.unwrap_or_else(|| {
                "authentication status unavailable".to_string()
            })));
        }
        Ok(AuthStatus {
            whatsapp_number: number,
            authenticated: resp.authenticated,
        })
    }

    /// Run the executor's connectivity self-test.
    pub async fn test_connection(&self) -> Result<ConnectionCheck, ExecutorError> {
        let url = self.server.endpoint(TEST_CONNECTION_PATH)?;
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;
        let resp: ConnectionResponse = decode(response).await?;
        Ok(ConnectionCheck {
            ok: resp.success,
            message: resp.message,
        })
    }
}

impl Executor for HttpExecutor {
    async fn send(&self, instruction: &str) -> ExecutionResult {
        tracing::debug!(server = %self.server, instruction, "sending instruction");
        match self.try_send(instruction).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "executor call failed");
                ExecutionResult::connection_failure()
            }
        }
    }
}

/// Non-2xx -> `Status` (message from a JSON `error` field when present),
/// otherwise decode the JSON body.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ExecutorError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        return Err(ExecutorError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_str(&text)?)
}
