use async_trait::async_trait;
use cfn_response_core::{
    InvocationContext, InvocationEvent, ReportError, RequestType, ResponseStatus, SuccessOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::transport::CallbackTransport;
use crate::notifier::ResponseNotifier;

/// What a successful provisioning step hands back to the stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionOutcome {
    pub data: Option<Value>,
    pub physical_resource_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ProvisionError {
    pub reason: String,
}

impl ProvisionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The actual work behind a custom resource.
#[async_trait]
pub trait CustomResourceProvisioner: Send + Sync {
    async fn provision(&self, event: &InvocationEvent) -> Result<ProvisionOutcome, ProvisionError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandlerSummary {
    pub status: ResponseStatus,
    pub logical_resource_id: String,
    pub forwarded: bool,
}

pub async fn handle_custom_resource_event<T, P>(
    payload: Value,
    context: &InvocationContext,
    provisioner: &P,
    notifier: &ResponseNotifier<T>,
) -> Result<HandlerSummary, ReportError>
where
    T: CallbackTransport,
    P: CustomResourceProvisioner + ?Sized,
{
    let event = match InvocationEvent::from_value(payload.clone()) {
        Ok(event) => event,
        Err(decode_error @ ReportError::MalformedParameter { .. }) => {
            return answer_malformed_event(&payload, decode_error, context, notifier).await;
        }
        Err(other) => return Err(other),
    };
    info!(
        component = "custom_resource_handler",
        event = "request_received",
        request_type = ?event.request_type,
        resource_type = event.resource_type.as_deref().unwrap_or_default(),
        request_id = %event.request_id,
        logical_resource_id = %event.logical_resource_id,
        "custom resource request received"
    );

    let status = match provisioner.provision(&event).await {
        Ok(outcome) => {
            let options = SuccessOptions {
                data: outcome.data,
                physical_resource_id: resolve_physical_resource_id(
                    &event,
                    outcome.physical_resource_id,
                ),
            };
            notifier.report_success(&event, context, options).await?;
            ResponseStatus::Success
        }
        Err(provision_error) => {
            error!(
                component = "custom_resource_handler",
                event = "provision_failed",
                request_id = %event.request_id,
                reason = %provision_error,
                "provisioning failed"
            );
            notifier
                .report_failure(&event, context, Some(provision_error.reason.as_str()))
                .await?;
            ResponseStatus::Failed
        }
    };

    Ok(HandlerSummary {
        status,
        logical_resource_id: event.logical_resource_id,
        forwarded: notifier.was_response_forwarded(),
    })
}

/// A request that cannot be decoded is still answered `FAILED` when its response URL
/// is readable, so the stack does not wait for a timeout.
async fn answer_malformed_event<T: CallbackTransport>(
    payload: &Value,
    decode_error: ReportError,
    context: &InvocationContext,
    notifier: &ResponseNotifier<T>,
) -> Result<HandlerSummary, ReportError> {
    let Some(target) = InvocationEvent::salvage(payload) else {
        return Err(decode_error);
    };
    error!(
        component = "custom_resource_handler",
        event = "malformed_request",
        request_id = %target.request_id,
        error = %decode_error,
        "custom resource request could not be decoded"
    );

    let reason = decode_error.to_string();
    notifier
        .report_failure(&target, context, Some(reason.as_str()))
        .await?;
    Ok(HandlerSummary {
        status: ResponseStatus::Failed,
        logical_resource_id: target.logical_resource_id,
        forwarded: notifier.was_response_forwarded(),
    })
}

/// Updates and deletes keep the id the stack already knows unless the provisioner
/// explicitly replaced the resource.
fn resolve_physical_resource_id(
    event: &InvocationEvent,
    from_outcome: Option<String>,
) -> Option<String> {
    from_outcome.or_else(|| match event.request_type {
        Some(RequestType::Update) | Some(RequestType::Delete) => {
            event.physical_resource_id.clone()
        }
        _ => None,
    })
}
