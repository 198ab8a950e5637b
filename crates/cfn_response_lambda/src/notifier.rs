use std::sync::atomic::{AtomicBool, Ordering};

use cfn_response_core::{
    build_failure_payload, build_success_payload, check_parameters, encode_payload,
    resolve_data, InvocationContext, InvocationEvent, ReportError, StatusPayload,
    SuccessOptions,
};
use tracing::{info, warn};

use crate::adapters::transport::{CallbackRequest, CallbackTransport};

/// Sends the single terminal answer for a custom resource request.
///
/// Each notifier remembers whether it has attempted a transmission, so a
/// handler can assert that exactly one answer went out.
#[derive(Debug)]
pub struct ResponseNotifier<T> {
    transport: T,
    forwarded: AtomicBool,
}

impl<T: CallbackTransport> ResponseNotifier<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            forwarded: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True once either report method has attempted to send, whatever the outcome.
    pub fn was_response_forwarded(&self) -> bool {
        self.forwarded.load(Ordering::SeqCst)
    }

    /// Answer `SUCCESS`. Malformed `data` is answered as `FAILED` with the default reason
    /// so the stack operation never waits on a missing answer.
    pub async fn report_success(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
        options: SuccessOptions,
    ) -> Result<(), ReportError> {
        check_parameters(event)?;

        let data = match resolve_data(options.data) {
            Ok(data) => data,
            Err(error) => {
                info!(
                    component = "response_notifier",
                    event = "invalid_data",
                    request_id = %event.request_id,
                    logical_resource_id = %event.logical_resource_id,
                    %error,
                    "data object was not an object, answering FAILED"
                );
                return self.report_failure(event, context, None).await;
            }
        };

        let payload =
            build_success_payload(event, context, data, options.physical_resource_id);
        self.forward(&event.response_url, &payload).await
    }

    /// Answer `FAILED` with `custom_reason`, or the log stream pointer when absent.
    pub async fn report_failure(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
        custom_reason: Option<&str>,
    ) -> Result<(), ReportError> {
        check_parameters(event)?;

        let payload = build_failure_payload(event, context, custom_reason);
        self.forward(&event.response_url, &payload).await
    }

    async fn forward(&self, url: &str, payload: &StatusPayload) -> Result<(), ReportError> {
        let request = CallbackRequest::new(encode_payload(payload)?);

        self.forwarded.store(true, Ordering::SeqCst);
        match self.transport.put(url, request).await {
            Ok(body) => info!(
                component = "response_notifier",
                event = "response_forwarded",
                status = %payload.status,
                request_id = %payload.request_id,
                response = %body,
                "callback delivered"
            ),
            Err(error) => warn!(
                component = "response_notifier",
                event = "response_failed",
                status = %payload.status,
                request_id = %payload.request_id,
                %error,
                "callback could not be delivered"
            ),
        }
        Ok(())
    }
}
