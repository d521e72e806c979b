//! Fire-and-forget invocation of deployed workflow functions.
//!
//! An [`Invoker`] turns a short function name such as `processPayment` into
//! the deployed name `{service}-{stage}-{function}`, serializes the payload
//! to JSON and hands it to an [`InvocationTransport`] with event semantics.
//! The caller learns whether the substrate accepted the request, never how
//! the invoked function fared.

pub mod error;
pub mod invoker;
pub mod naming;
pub mod transport;

pub use error::SubmissionError;
pub use invoker::Invoker;
pub use naming::{DEFAULT_STAGE, FunctionNaming, SERVICE_NAME};
pub use transport::{InMemoryTransport, InvocationRequest, InvocationTransport, LambdaTransport};
