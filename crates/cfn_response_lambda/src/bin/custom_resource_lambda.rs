use cfn_response_lambda::adapters::HttpCallbackTransport;
use cfn_response_lambda::config::NotifierConfig;
use cfn_response_lambda::handlers::custom_resource::handle_custom_resource_event;
use cfn_response_lambda::handlers::echo_properties::EchoPropertiesProvisioner;
use cfn_response_lambda::handlers::invocation_context;
use cfn_response_lambda::ResponseNotifier;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

async fn handle_request(
    event: LambdaEvent<Value>,
    transport: &HttpCallbackTransport,
    provisioner: &EchoPropertiesProvisioner,
) -> Result<Value, Error> {
    let context = invocation_context(&event.context);
    let notifier = ResponseNotifier::new(transport.clone());

    let summary =
        handle_custom_resource_event(event.payload, &context, provisioner, &notifier).await?;
    serde_json::to_value(summary)
        .map_err(|error| Error::from(format!("failed to serialize handler summary: {error}")))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = NotifierConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    let transport = HttpCallbackTransport::new(&config)
        .map_err(|error| Error::from(format!("failed to build callback client: {error}")))?;
    let provisioner = EchoPropertiesProvisioner;

    let transport_ref = &transport;
    let provisioner_ref = &provisioner;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, transport_ref, provisioner_ref).await
    }))
    .await
}
