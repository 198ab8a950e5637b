use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::adapters::transport::{CallbackRequest, CallbackTransport, TransportError};
use crate::config::NotifierConfig;

/// Thin reqwest client that PUTs status payloads to pre-signed response URLs.
#[derive(Debug, Clone)]
pub struct HttpCallbackTransport {
    client: Client,
}

impl HttpCallbackTransport {
    pub fn new(config: &NotifierConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl CallbackTransport for HttpCallbackTransport {
    async fn put(&self, url: &str, request: CallbackRequest) -> Result<String, TransportError> {
        let mut builder = self.client.put(url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        let response = builder.body(request.into_body()).send().await?;

        // Non-2xx answers still carry a body worth logging; only transport failures are errors.
        let status = response.status();
        debug!(
            component = "http_callback_transport",
            status = status.as_u16(),
            "callback receiver answered"
        );
        Ok(response.text().await?)
    }
}
