use async_trait::async_trait;
use cfn_response_core::{InvocationEvent, RequestType};
use serde_json::Value;

use crate::handlers::custom_resource::{
    CustomResourceProvisioner, ProvisionError, ProvisionOutcome,
};

const SERVICE_TOKEN_PROPERTY: &str = "ServiceToken";

/// Hands the resource properties back as `Fn::GetAtt` attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoPropertiesProvisioner;

#[async_trait]
impl CustomResourceProvisioner for EchoPropertiesProvisioner {
    async fn provision(&self, event: &InvocationEvent) -> Result<ProvisionOutcome, ProvisionError> {
        if event.request_type == Some(RequestType::Delete) {
            return Ok(ProvisionOutcome::default());
        }

        let mut properties = event.resource_properties.clone();
        properties.remove(SERVICE_TOKEN_PROPERTY);

        Ok(ProvisionOutcome {
            data: Some(Value::Object(properties)),
            physical_resource_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event_with(request_type: RequestType) -> InvocationEvent {
        let mut event = InvocationEvent::new("https://example.com/cb", "stack", "req", "Echo");
        event.request_type = Some(request_type);
        event.resource_properties = json!({
            "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:echo",
            "Stage": "prod",
            "Replicas": 3
        })
        .as_object()
        .cloned()
        .unwrap_or_default();
        event
    }

    #[tokio::test]
    async fn echoes_properties_without_service_token() {
        let outcome = EchoPropertiesProvisioner
            .provision(&event_with(RequestType::Create))
            .await
            .expect("create should succeed");

        assert_eq!(outcome.data, Some(json!({"Stage": "prod", "Replicas": 3})));
        assert!(outcome.physical_resource_id.is_none());
    }

    #[tokio::test]
    async fn delete_returns_no_data() {
        let outcome = EchoPropertiesProvisioner
            .provision(&event_with(RequestType::Delete))
            .await
            .expect("delete should succeed");

        assert_eq!(outcome, ProvisionOutcome::default());
    }
}
