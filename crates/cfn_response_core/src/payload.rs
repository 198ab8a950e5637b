use serde_json::{Map, Value};

use crate::contract::{
    default_reason, InvocationContext, InvocationEvent, ReportError, ResponseStatus,
    StatusPayload,
};

/// Optional knobs for a success answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuccessOptions {
    /// Attributes readable from the template with `Fn::GetAtt`. Must be a JSON object.
    pub data: Option<Value>,
    /// Defaults to the context's log stream name.
    pub physical_resource_id: Option<String>,
}

impl SuccessOptions {
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_physical_resource_id(mut self, physical_resource_id: impl Into<String>) -> Self {
        self.physical_resource_id = Some(physical_resource_id.into());
        self
    }
}

/// `Data` was supplied with a shape other than a plain key/value mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("data must be a JSON object, got {shape}")]
pub struct InvalidDataShape {
    pub shape: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub body: String,
    pub content_length: usize,
}

pub fn resolve_data(data: Option<Value>) -> Result<Map<String, Value>, InvalidDataShape> {
    match data {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(InvalidDataShape {
            shape: value_shape(&other),
        }),
    }
}

fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the `SUCCESS` answer. The reason is always the log stream pointer.
pub fn build_success_payload(
    event: &InvocationEvent,
    context: &InvocationContext,
    data: Map<String, Value>,
    physical_resource_id: Option<String>,
) -> StatusPayload {
    StatusPayload {
        status: ResponseStatus::Success,
        reason: default_reason(&context.log_stream_name),
        physical_resource_id: physical_resource_id
            .unwrap_or_else(|| context.log_stream_name.clone()),
        stack_id: event.stack_id.clone(),
        request_id: event.request_id.clone(),
        logical_resource_id: event.logical_resource_id.clone(),
        no_echo: false,
        data: Some(data),
    }
}

/// Build the `FAILED` answer. The physical resource id is always the log stream name.
pub fn build_failure_payload(
    event: &InvocationEvent,
    context: &InvocationContext,
    custom_reason: Option<&str>,
) -> StatusPayload {
    StatusPayload {
        status: ResponseStatus::Failed,
        reason: custom_reason
            .map(str::to_string)
            .unwrap_or_else(|| default_reason(&context.log_stream_name)),
        physical_resource_id: context.log_stream_name.clone(),
        stack_id: event.stack_id.clone(),
        request_id: event.request_id.clone(),
        logical_resource_id: event.logical_resource_id.clone(),
        no_echo: false,
        data: None,
    }
}

pub fn encode_payload(payload: &StatusPayload) -> Result<EncodedPayload, ReportError> {
    let body = serde_json::to_string(payload)?;
    Ok(EncodedPayload {
        content_length: body.len(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const LOG_STREAM: &str = "2018/06/05/[$LATEST]dff247ec8b6f4fa090c2dd59d909360d";

    fn event() -> InvocationEvent {
        InvocationEvent::new(
            "https://example.com/response",
            "arn:aws:cloudformation:eu-west-1:099687127161:stack/s2t-base/3d992e90",
            "77afbba7-4cde-4e70-98c1-63abb75fc370",
            "s2tTrackAllS3",
        )
    }

    #[test]
    fn resolve_data_defaults_to_empty_object() {
        assert_eq!(resolve_data(None), Ok(Map::new()));

        let map = resolve_data(Some(json!({"PublishToCF": "someValue"}))).expect("object");
        assert_eq!(map.get("PublishToCF"), Some(&json!("someValue")));
    }

    #[test]
    fn resolve_data_rejects_non_objects() {
        let cases = [
            (json!(["only", "objects", "are", "allowed", "here"]), "array"),
            (json!("text"), "string"),
            (json!(7), "number"),
            (json!(true), "boolean"),
            (Value::Null, "null"),
        ];
        for (value, shape) in cases {
            assert_eq!(resolve_data(Some(value)), Err(InvalidDataShape { shape }));
        }
    }

    #[test]
    fn success_payload_wire_layout() {
        let context = InvocationContext::new(LOG_STREAM);
        let payload = build_success_payload(&event(), &context, Map::new(), None);
        let encoded = encode_payload(&payload).expect("payload should encode");

        assert_eq!(
            encoded.body,
            format!(
                concat!(
                    "{{\"Status\":\"SUCCESS\",",
                    "\"Reason\":\"See the details in CloudWatch Log Stream: {stream}\",",
                    "\"PhysicalResourceId\":\"{stream}\",",
                    "\"StackId\":\"arn:aws:cloudformation:eu-west-1:099687127161:stack/s2t-base/3d992e90\",",
                    "\"RequestId\":\"77afbba7-4cde-4e70-98c1-63abb75fc370\",",
                    "\"LogicalResourceId\":\"s2tTrackAllS3\",",
                    "\"NoEcho\":false,",
                    "\"Data\":{{}}}}"
                ),
                stream = LOG_STREAM
            )
        );
        assert_eq!(encoded.content_length, encoded.body.len());
    }

    #[test]
    fn success_payload_uses_supplied_physical_resource_id() {
        let context = InvocationContext::new(LOG_STREAM);
        let payload = build_success_payload(
            &event(),
            &context,
            Map::new(),
            Some("anotherPhysicalResourceId".to_string()),
        );

        assert_eq!(payload.physical_resource_id, "anotherPhysicalResourceId");
        assert_eq!(payload.reason, default_reason(LOG_STREAM));
        assert_eq!(payload.data, Some(Map::new()));
    }

    #[test]
    fn failure_payload_omits_data() {
        let context = InvocationContext::new(LOG_STREAM);
        let payload = build_failure_payload(&event(), &context, None);
        let body: Value =
            serde_json::from_str(&encode_payload(&payload).expect("encode").body).expect("json");

        assert_eq!(body["Status"], json!("FAILED"));
        assert_eq!(body["PhysicalResourceId"], json!(LOG_STREAM));
        assert_eq!(body["NoEcho"], json!(false));
        assert!(body.get("Data").is_none());
    }

    #[test]
    fn failure_payload_keeps_custom_reason() {
        let context = InvocationContext::new(LOG_STREAM);
        let payload = build_failure_payload(&event(), &context, Some("bucket already exists"));
        assert_eq!(payload.reason, "bucket already exists");
    }

    #[test]
    fn content_length_counts_bytes_not_characters() {
        let context = InvocationContext::new("stream-ü");
        let payload = build_failure_payload(&event(), &context, Some("déjà vu"));
        let encoded = encode_payload(&payload).expect("encode");

        assert_eq!(encoded.content_length, encoded.body.len());
        assert!(encoded.content_length > encoded.body.chars().count());
    }
}
