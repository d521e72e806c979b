//! Integration tests for the order workflow graph.

use invoker::{FunctionNaming, InMemoryTransport, InvocationRequest, Invoker};
use serde_json::{Value, json};
use workflow::{OrderWorkflow, Step, WorkflowError};

struct TestHarness {
    workflow: OrderWorkflow<InMemoryTransport>,
    transport: InMemoryTransport,
    naming: FunctionNaming,
}

impl TestHarness {
    fn new() -> Self {
        let naming = FunctionNaming::new("dev");
        let transport = InMemoryTransport::new();
        let workflow = OrderWorkflow::new(Invoker::new(naming.clone(), transport.clone()));

        Self {
            workflow,
            transport,
            naming,
        }
    }

    fn deployed(&self, step: Step) -> String {
        self.naming.qualify(step.function_name()).unwrap()
    }

    fn step_of(&self, request: &InvocationRequest) -> Step {
        Step::ALL
            .into_iter()
            .find(|step| self.deployed(*step) == request.function_name)
            .unwrap()
    }

    /// Delivers every submitted request to its handler, as the substrate
    /// would, until nothing is left. Returns each handler's result.
    async fn drain(&self) -> Vec<(Step, Result<Value, WorkflowError>)> {
        let mut outputs = Vec::new();
        let mut delivered = 0;
        loop {
            let pending: Vec<_> = self.transport.requests().into_iter().skip(delivered).collect();
            if pending.is_empty() {
                return outputs;
            }
            delivered += pending.len();
            for request in pending {
                let step = self.step_of(&request);
                let result = self
                    .workflow
                    .dispatch(step, request.payload_json().unwrap())
                    .await;
                outputs.push((step, result));
            }
        }
    }
}

fn result_of(
    outputs: &[(Step, Result<Value, WorkflowError>)],
    step: Step,
) -> Option<&Result<Value, WorkflowError>> {
    outputs.iter().find(|(s, _)| *s == step).map(|(_, result)| result)
}

fn output_of(outputs: &[(Step, Result<Value, WorkflowError>)], step: Step) -> &Value {
    match result_of(outputs, step) {
        Some(Ok(output)) => output,
        Some(Err(e)) => panic!("{step} failed: {e}"),
        None => panic!("{step} never ran"),
    }
}

#[tokio::test]
async fn test_full_graph_reaches_both_terminal_states() {
    let h = TestHarness::new();

    let accepted = h.workflow.order_placed().await.unwrap();
    let order_id = accepted.body.order_id.as_str().to_string();

    let outputs = h.drain().await;
    let steps: Vec<Step> = outputs.iter().map(|(s, _)| *s).collect();
    assert_eq!(steps.len(), 5);
    for step in &Step::ALL[1..] {
        assert!(steps.contains(step), "{step} never ran");
    }

    assert_eq!(
        output_of(&outputs, Step::ProcessPayment),
        &json!({
            "orderId": order_id,
            "customerId": "ABC-XYZ",
            "paymentStatus": "SUCCESS",
        })
    );
    assert_eq!(
        output_of(&outputs, Step::LogCompletion),
        &json!({
            "orderId": order_id,
            "customerId": "ABC-XYZ",
            "inventoryStatus": "UPDATED",
            "shippingStatus": "LABEL_CREATED",
            "notificationStatus": "SENT",
            "finalStatus": "COMPLETE",
        })
    );
}

#[tokio::test]
async fn test_branches_do_not_observe_each_other() {
    let h = TestHarness::new();
    h.workflow.order_placed().await.unwrap();
    let outputs = h.drain().await;

    let payment = output_of(&outputs, Step::ProcessPayment);
    let completed = output_of(&outputs, Step::LogCompletion);
    assert!(payment.get("inventoryStatus").is_none());
    assert!(completed.get("paymentStatus").is_none());
}

#[tokio::test]
async fn test_chain_accumulates_fields_without_overwriting() {
    let h = TestHarness::new();
    let mut record = json!({ "orderId": "o1", "customerId": "c1" });
    let mut seen = record.as_object().unwrap().clone();

    for step in [
        Step::UpdateInventory,
        Step::PrepareShipping,
        Step::NotifyCustomer,
        Step::LogCompletion,
    ] {
        let output = h.workflow.dispatch(step, record).await.unwrap();
        let fields = output.as_object().unwrap();

        // Every prior field survives unchanged; exactly one is added.
        for (key, value) in &seen {
            assert_eq!(fields.get(key), Some(value), "{step} changed {key}");
        }
        assert_eq!(fields.len(), seen.len() + 1);

        seen = fields.clone();
        record = output;
    }

    assert_eq!(
        record,
        json!({
            "orderId": "o1",
            "customerId": "c1",
            "inventoryStatus": "UPDATED",
            "shippingStatus": "LABEL_CREATED",
            "notificationStatus": "SENT",
            "finalStatus": "COMPLETE",
        })
    );
}

#[tokio::test]
async fn test_each_chain_step_submits_exactly_its_successor() {
    let h = TestHarness::new();
    let mut record = json!({ "orderId": "o1" });

    for step in [Step::UpdateInventory, Step::PrepareShipping, Step::NotifyCustomer] {
        h.transport.clear();
        record = h.workflow.dispatch(step, record).await.unwrap();

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(h.step_of(&requests[0]), step.successors()[0]);
        assert_eq!(requests[0].payload_json().unwrap(), record);
    }
}

/// Known defect: the fan-out is both-or-fail without compensation. A refused
/// payment submission fails the entry handler although the inventory branch
/// was already submitted and will run. Whether this should become
/// all-or-nothing or best-effort is undecided.
#[tokio::test]
async fn test_known_defect_refused_payment_fails_entry_after_inventory_submitted() {
    let h = TestHarness::new();
    h.transport.set_reject(h.deployed(Step::ProcessPayment), true);

    let result = h.workflow.order_placed().await;
    assert!(matches!(result, Err(WorkflowError::Submission(_))));

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(h.step_of(&requests[0]), Step::UpdateInventory);

    // The orphaned chain still runs to completion.
    let outputs = h.drain().await;
    assert_eq!(
        output_of(&outputs, Step::LogCompletion)["finalStatus"],
        "COMPLETE"
    );
}

#[tokio::test]
async fn test_refused_inventory_fails_entry_after_payment_submitted() {
    let h = TestHarness::new();
    h.transport.set_reject(h.deployed(Step::UpdateInventory), true);

    let result = h.workflow.order_placed().await;
    assert!(result.is_err());

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(h.step_of(&requests[0]), Step::ProcessPayment);
}

#[tokio::test]
async fn test_downstream_failure_is_invisible_upstream() {
    let h = TestHarness::new();
    h.transport.set_reject(h.deployed(Step::LogCompletion), true);

    // The entry point has already answered when the chain breaks.
    let accepted = h.workflow.order_placed().await.unwrap();
    let order_id = accepted.body.order_id.as_str().to_string();

    let outputs = h.drain().await;
    assert_eq!(output_of(&outputs, Step::ProcessPayment)["orderId"], order_id);
    assert_eq!(output_of(&outputs, Step::PrepareShipping)["orderId"], order_id);
    assert!(matches!(
        result_of(&outputs, Step::NotifyCustomer),
        Some(Err(WorkflowError::Submission(_)))
    ));
    assert!(result_of(&outputs, Step::LogCompletion).is_none());
}

#[tokio::test]
async fn test_null_customer_is_forwarded_along_both_branches() {
    let h = TestHarness::new();
    let record = json!({ "orderId": "o1", "customerId": null });

    let payment = h
        .workflow
        .dispatch(Step::ProcessPayment, record.clone())
        .await
        .unwrap();
    assert_eq!(
        payment,
        json!({ "orderId": "o1", "customerId": null, "paymentStatus": "SUCCESS" })
    );

    h.workflow.dispatch(Step::UpdateInventory, record).await.unwrap();
    let outputs = h.drain().await;
    for step in [Step::PrepareShipping, Step::NotifyCustomer, Step::LogCompletion] {
        let output = output_of(&outputs, step).as_object().unwrap();
        assert_eq!(output.get("customerId"), Some(&Value::Null), "{step} dropped customerId");
    }
}

#[tokio::test]
async fn test_independent_orders_get_distinct_ids() {
    let h = TestHarness::new();

    let first = h.workflow.order_placed().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = h.workflow.order_placed().await.unwrap();

    assert_ne!(first.body.order_id, second.body.order_id);
    assert_eq!(h.transport.request_count(), 4);
}
