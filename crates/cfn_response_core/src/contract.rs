use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_REASON_PREFIX: &str = "See the details in CloudWatch Log Stream: ";

/// Lifecycle phase the stack-management service is asking the handler to perform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Custom resource request envelope handed to the provisioning callback.
///
/// Only `ResponseURL`, `StackId`, `RequestId` and `LogicalResourceId` are
/// needed to answer the request; the remaining fields are carried for the
/// handler that does the actual provisioning work. The identifiers default to
/// empty so a request missing one can still be answered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationEvent {
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
}

impl InvocationEvent {
    pub fn new(
        response_url: impl Into<String>,
        stack_id: impl Into<String>,
        request_id: impl Into<String>,
        logical_resource_id: impl Into<String>,
    ) -> Self {
        Self {
            response_url: response_url.into(),
            stack_id: stack_id.into(),
            request_id: request_id.into(),
            logical_resource_id: logical_resource_id.into(),
            request_type: None,
            resource_type: None,
            service_token: None,
            resource_properties: Map::new(),
            old_resource_properties: None,
            physical_resource_id: None,
        }
    }

    /// Decode the raw event handed over by the host runtime. `null` counts as absent.
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        if value.is_null() {
            return Err(ReportError::MissingParameter("event"));
        }
        serde_json::from_value(value).map_err(|source| ReportError::MalformedParameter {
            parameter: "event",
            source,
        })
    }

    /// Pull the answer target out of an event that failed to decode, so the
    /// request can still be answered `FAILED`. Identifiers with the wrong type are
    /// left empty.
    pub fn salvage(value: &Value) -> Option<Self> {
        let text = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();
        let response_url = text("ResponseURL");
        if response_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(
            response_url,
            text("StackId"),
            text("RequestId"),
            text("LogicalResourceId"),
        ))
    }
}

/// The subset of the invocation context the callback needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationContext {
    #[serde(rename = "logStreamName")]
    pub log_stream_name: String,
}

impl InvocationContext {
    pub fn new(log_stream_name: impl Into<String>) -> Self {
        Self {
            log_stream_name: log_stream_name.into(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        if value.is_null() {
            return Err(ReportError::MissingParameter("context"));
        }
        serde_json::from_value(value).map_err(|source| ReportError::MalformedParameter {
            parameter: "context",
            source,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body PUT to the response URL. Field names and order are fixed by the receiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StatusPayload {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The event or context was absent, or the event carries no response URL.
    #[error("missing mandatory parameter: {0}")]
    MissingParameter(&'static str),

    #[error("malformed {parameter}: {source}")]
    MalformedParameter {
        parameter: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode status payload: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn default_reason(log_stream_name: &str) -> String {
    format!("{DEFAULT_REASON_PREFIX}{log_stream_name}")
}

/// Reject an event with nowhere to send the answer.
pub fn check_parameters(event: &InvocationEvent) -> Result<(), ReportError> {
    if event.response_url.trim().is_empty() {
        return Err(ReportError::MissingParameter("event.ResponseURL"));
    }
    Ok(())
}
