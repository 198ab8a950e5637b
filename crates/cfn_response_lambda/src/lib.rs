//! AWS-oriented adapters and handlers for answering custom resource requests.
//!
//! This crate owns runtime integration details (the Lambda handler, the HTTP
//! callback transport and environment configuration) on top of the pure
//! contract in `cfn_response_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod notifier;

pub use cfn_response_core as contract;
pub use notifier::ResponseNotifier;
