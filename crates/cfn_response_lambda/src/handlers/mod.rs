pub mod custom_resource;
pub mod echo_properties;

use cfn_response_core::InvocationContext;

/// Map the Lambda runtime context onto what the callback needs.
pub fn invocation_context(context: &lambda_runtime::Context) -> InvocationContext {
    InvocationContext::new(context.env_config.log_stream.clone())
}
