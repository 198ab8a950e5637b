use async_trait::async_trait;
use cfn_response_core::EncodedPayload;

/// The receiver requires an explicitly empty content type on the PUT.
pub const CALLBACK_CONTENT_TYPE: &str = "";

/// A single PUT to a pre-signed response URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRequest {
    body: String,
    content_length: usize,
}

impl CallbackRequest {
    pub fn new(payload: EncodedPayload) -> Self {
        Self {
            body: payload.body,
            content_length: payload.content_length,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            ("content-type", CALLBACK_CONTENT_TYPE.to_string()),
            ("content-length", self.content_length.to_string()),
        ]
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("callback request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Capability to deliver a status payload; resolves with the receiver's text body.
#[async_trait]
pub trait CallbackTransport: Send + Sync {
    async fn put(&self, url: &str, request: CallbackRequest) -> Result<String, TransportError>;
}
