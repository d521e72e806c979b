//! Workflow records.
//!
//! A record accumulates one status field per step. Each step's output type
//! wraps its input type and adds exactly one required field, so a record can
//! only grow along the chain. Fields the workflow does not know about are
//! carried through untouched.

use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorkflowError;

/// The record created when an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: OrderId,
    /// Absent, explicitly `null`, or set. A `null` is forwarded as `null`.
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_id: Option<Option<CustomerId>>,
    /// Fields added by callers outside this workflow.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderRecord {
    pub fn new(order_id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            order_id,
            customer_id: Some(Some(customer_id)),
            extra: Map::new(),
        }
    }

    /// Returns the customer, if one is set.
    pub fn customer(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref().and_then(Option::as_ref)
    }

    pub fn with_payment(self) -> Result<PaymentProcessed, WorkflowError> {
        self.ensure_absent(PaymentProcessed::FIELD)?;
        Ok(PaymentProcessed {
            order: self,
            payment_status: PaymentStatus::Success,
        })
    }

    pub fn with_inventory(self) -> Result<InventoryUpdated, WorkflowError> {
        self.ensure_absent(InventoryUpdated::FIELD)?;
        Ok(InventoryUpdated {
            order: self,
            inventory_status: InventoryStatus::Updated,
        })
    }

    fn ensure_absent(&self, field: &'static str) -> Result<(), WorkflowError> {
        if self.extra.contains_key(field) {
            return Err(WorkflowError::StatusAlreadyRecorded { field });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingStatus {
    LabelCreated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalStatus {
    Complete,
}

/// Output of the payment branch. Terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProcessed {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub payment_status: PaymentStatus,
}

impl PaymentProcessed {
    pub const FIELD: &'static str = "paymentStatus";

    pub fn order_id(&self) -> &OrderId {
        &self.order.order_id
    }
}

/// First link of the fulfillment chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdated {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub inventory_status: InventoryStatus,
}

impl InventoryUpdated {
    pub const FIELD: &'static str = "inventoryStatus";

    pub fn order_id(&self) -> &OrderId {
        &self.order.order_id
    }

    pub fn with_shipping_label(self) -> Result<ShippingPrepared, WorkflowError> {
        self.order.ensure_absent(ShippingPrepared::FIELD)?;
        Ok(ShippingPrepared {
            inventory: self,
            shipping_status: ShippingStatus::LabelCreated,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPrepared {
    #[serde(flatten)]
    pub inventory: InventoryUpdated,
    pub shipping_status: ShippingStatus,
}

impl ShippingPrepared {
    pub const FIELD: &'static str = "shippingStatus";

    pub fn order_id(&self) -> &OrderId {
        self.inventory.order_id()
    }

    pub fn with_notification(self) -> Result<CustomerNotified, WorkflowError> {
        self.inventory.order.ensure_absent(CustomerNotified::FIELD)?;
        Ok(CustomerNotified {
            shipping: self,
            notification_status: NotificationStatus::Sent,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNotified {
    #[serde(flatten)]
    pub shipping: ShippingPrepared,
    pub notification_status: NotificationStatus,
}

impl CustomerNotified {
    pub const FIELD: &'static str = "notificationStatus";

    pub fn order_id(&self) -> &OrderId {
        self.shipping.order_id()
    }

    pub fn complete(self) -> Result<OrderCompleted, WorkflowError> {
        self.shipping
            .inventory
            .order
            .ensure_absent(OrderCompleted::FIELD)?;
        Ok(OrderCompleted {
            notified: self,
            final_status: FinalStatus::Complete,
        })
    }
}

/// Final record of the fulfillment chain. Terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCompleted {
    #[serde(flatten)]
    pub notified: CustomerNotified,
    pub final_status: FinalStatus,
}

impl OrderCompleted {
    pub const FIELD: &'static str = "finalStatus";

    pub fn order_id(&self) -> &OrderId {
        self.notified.order_id()
    }
}
