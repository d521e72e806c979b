//! Order workflow handlers.

use common::{CustomerId, OrderId};
use invoker::{InvocationTransport, Invoker, SubmissionError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::WorkflowError;
use crate::record::{
    CustomerNotified, InventoryUpdated, OrderCompleted, OrderRecord, PaymentProcessed,
    ShippingPrepared,
};
use crate::response::OrderAccepted;
use crate::step::Step;

/// Customer assigned to every order placed through the entry point.
pub const PLACEHOLDER_CUSTOMER_ID: &str = "ABC-XYZ";

/// Message returned by the entry point once both branches are submitted.
pub const ACCEPTED_MESSAGE: &str = "Order workflow initiated successfully.";

/// Runs the six handlers of the order workflow.
///
/// Holds the process-wide [`Invoker`]. Each handler extends the record it
/// receives, submits the next step(s) and returns the extended record. No
/// handler waits for the steps it invokes.
pub struct OrderWorkflow<T: InvocationTransport> {
    invoker: Invoker<T>,
}

impl<T: InvocationTransport> OrderWorkflow<T> {
    pub fn new(invoker: Invoker<T>) -> Self {
        Self { invoker }
    }

    /// Entry point: places a fresh order and starts both branches.
    pub async fn order_placed(&self) -> Result<OrderAccepted, WorkflowError> {
        let record = OrderRecord::new(
            OrderId::from_clock(),
            CustomerId::new(PLACEHOLDER_CUSTOMER_ID),
        );
        self.start(record).await
    }

    /// Fans `record` out to the payment and inventory branches.
    ///
    /// Both submissions run to completion. If either is refused the handler
    /// fails, even though the other branch may already be running.
    #[tracing::instrument(skip_all, fields(order_id = %record.order_id))]
    pub async fn start(&self, record: OrderRecord) -> Result<OrderAccepted, WorkflowError> {
        tracing::info!("order received, starting parallel workflows");
        metrics::counter!("orders_placed_total").increment(1);

        let (payment, inventory) = tokio::join!(
            self.invoke_next(Step::ProcessPayment, &record),
            self.invoke_next(Step::UpdateInventory, &record),
        );

        if payment.is_ok() != inventory.is_ok() {
            tracing::warn!(
                payment_submitted = payment.is_ok(),
                inventory_submitted = inventory.is_ok(),
                "fan-out partially submitted"
            );
        }
        payment?;
        inventory?;

        Ok(OrderAccepted::ok(ACCEPTED_MESSAGE, record.order_id))
    }

    #[tracing::instrument(skip_all, fields(order_id = %record.order_id))]
    pub async fn process_payment(
        &self,
        record: OrderRecord,
    ) -> Result<PaymentProcessed, WorkflowError> {
        tracing::info!("processing payment");
        record.with_payment()
    }

    #[tracing::instrument(skip_all, fields(order_id = %record.order_id))]
    pub async fn update_inventory(
        &self,
        record: OrderRecord,
    ) -> Result<InventoryUpdated, WorkflowError> {
        tracing::info!("updating inventory");
        let updated = record.with_inventory()?;
        self.invoke_next(Step::PrepareShipping, &updated).await?;
        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(order_id = %record.order_id()))]
    pub async fn prepare_shipping(
        &self,
        record: InventoryUpdated,
    ) -> Result<ShippingPrepared, WorkflowError> {
        tracing::info!("preparing shipping label");
        let prepared = record.with_shipping_label()?;
        self.invoke_next(Step::NotifyCustomer, &prepared).await?;
        Ok(prepared)
    }

    #[tracing::instrument(skip_all, fields(order_id = %record.order_id()))]
    pub async fn notify_customer(
        &self,
        record: ShippingPrepared,
    ) -> Result<CustomerNotified, WorkflowError> {
        tracing::info!("sending notification to customer");
        let notified = record.with_notification()?;
        self.invoke_next(Step::LogCompletion, &notified).await?;
        Ok(notified)
    }

    #[tracing::instrument(skip_all, fields(order_id = %record.order_id()))]
    pub async fn log_completion(
        &self,
        record: CustomerNotified,
    ) -> Result<OrderCompleted, WorkflowError> {
        let completed = record.complete()?;
        tracing::info!("workflow complete");
        metrics::counter!("orders_completed_total").increment(1);
        Ok(completed)
    }

    /// Decodes `event` for `step`, runs its handler and encodes the result.
    pub async fn dispatch(&self, step: Step, event: Value) -> Result<Value, WorkflowError> {
        match step {
            // The trigger's shape is irrelevant.
            Step::OrderPlaced => encode(&self.order_placed().await?),
            Step::ProcessPayment => encode(&self.process_payment(decode(event)?).await?),
            Step::UpdateInventory => encode(&self.update_inventory(decode(event)?).await?),
            Step::PrepareShipping => encode(&self.prepare_shipping(decode(event)?).await?),
            Step::NotifyCustomer => encode(&self.notify_customer(decode(event)?).await?),
            Step::LogCompletion => encode(&self.log_completion(decode(event)?).await?),
        }
    }

    async fn invoke_next<P>(&self, step: Step, record: &P) -> Result<(), SubmissionError>
    where
        P: Serialize + Sync,
    {
        self.invoker.invoke(step.function_name(), record).await
    }
}

fn decode<R: DeserializeOwned>(event: Value) -> Result<R, WorkflowError> {
    Ok(serde_json::from_value(event)?)
}

fn encode<R: Serialize>(output: &R) -> Result<Value, WorkflowError> {
    Ok(serde_json::to_value(output)?)
}
