pub mod http;
pub mod transport;

pub use http::HttpCallbackTransport;
pub use transport::{CallbackRequest, CallbackTransport, TransportError};
