//! Custom resource callback contract.
//!
//! This crate owns the request envelope delivered to a provisioning callback
//! handler and the status payload sent back through the pre-signed response
//! URL. It intentionally excludes HTTP transport and Lambda runtime concerns.

pub mod contract;
pub mod payload;

pub use contract::{
    check_parameters, default_reason, InvocationContext, InvocationEvent, ReportError,
    RequestType, ResponseStatus, StatusPayload,
};
pub use payload::{
    build_failure_payload, build_success_payload, encode_payload, resolve_data, EncodedPayload,
    InvalidDataShape, SuccessOptions,
};
