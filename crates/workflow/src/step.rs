//! Workflow step graph.

use std::str::FromStr;

use crate::error::WorkflowError;

/// A deployed handler and its place in the graph.
///
/// Per-order progression:
/// ```text
/// OrderPlaced ──┬──► ProcessPayment                      (terminal)
///               └──► UpdateInventory ──► PrepareShipping
///                        ──► NotifyCustomer ──► LogCompletion (terminal)
/// ```
///
/// The two branches never join; nothing observes both terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Entry point; fans out to payment and inventory.
    OrderPlaced,

    /// Leaf of the payment branch.
    ProcessPayment,

    /// Start of the fulfillment chain.
    UpdateInventory,

    PrepareShipping,

    NotifyCustomer,

    /// End of the fulfillment chain.
    LogCompletion,
}

impl Step {
    /// Every step, entry point first.
    pub const ALL: [Step; 6] = [
        Step::OrderPlaced,
        Step::ProcessPayment,
        Step::UpdateInventory,
        Step::PrepareShipping,
        Step::NotifyCustomer,
        Step::LogCompletion,
    ];

    /// Returns the short function name the step is deployed under.
    pub fn function_name(&self) -> &'static str {
        match self {
            Step::OrderPlaced => "orderPlaced",
            Step::ProcessPayment => "processPayment",
            Step::UpdateInventory => "updateInventory",
            Step::PrepareShipping => "prepareShipping",
            Step::NotifyCustomer => "notifyCustomer",
            Step::LogCompletion => "logCompletion",
        }
    }

    /// Returns the steps this one invokes.
    pub fn successors(&self) -> &'static [Step] {
        match self {
            Step::OrderPlaced => &[Step::ProcessPayment, Step::UpdateInventory],
            Step::UpdateInventory => &[Step::PrepareShipping],
            Step::PrepareShipping => &[Step::NotifyCustomer],
            Step::NotifyCustomer => &[Step::LogCompletion],
            Step::ProcessPayment | Step::LogCompletion => &[],
        }
    }

    /// Returns true if the step invokes nothing further.
    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

impl FromStr for Step {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.function_name() == s)
            .ok_or_else(|| WorkflowError::UnknownStep(s.to_string()))
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function_name())
    }
}
