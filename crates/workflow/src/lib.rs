//! Order workflow handlers.
//!
//! Six independently deployed handlers form a small graph:
//!
//! ```text
//! orderPlaced ──┬──► processPayment
//!               └──► updateInventory ──► prepareShipping ──► notifyCustomer ──► logCompletion
//! ```
//!
//! Each edge is a fire-and-forget invocation through an [`invoker::Invoker`].
//! Records are extended by value at every step; nothing is persisted and no
//! branch observes the other.

pub mod error;
pub mod record;
pub mod response;
pub mod step;
pub mod workflow;

pub use error::WorkflowError;
pub use record::{
    CustomerNotified, FinalStatus, InventoryStatus, InventoryUpdated, NotificationStatus,
    OrderCompleted, OrderRecord, PaymentProcessed, PaymentStatus, ShippingPrepared,
    ShippingStatus,
};
pub use response::{AcceptedBody, OrderAccepted};
pub use step::Step;
pub use workflow::{ACCEPTED_MESSAGE, OrderWorkflow, PLACEHOLDER_CUSTOMER_ID};
