use crate::actions::multisend_utils::multisend_call_data;
use crate::types::transaction::{MetaTransaction, SafeTransaction};
use alloy::primitives::Bytes;
use serde::Serialize;
use serde_json::{Value, json};

/// Ordered transactions that create and wire up the DAO in one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentPlan {
    pub transactions: Vec<SafeTransaction>,
}

impl DeploymentPlan {
    pub fn new(transactions: Vec<SafeTransaction>) -> Self {
        Self { transactions }
    }

    pub fn meta_transactions(&self) -> Vec<MetaTransaction> {
        self.transactions.iter().map(SafeTransaction::meta).collect()
    }

    /// Calldata for the multisend contract executing the whole plan.
    pub fn batch_call_data(&self) -> Bytes {
        multisend_call_data(&self.meta_transactions())
    }

    pub fn describe(&self) -> Value {
        json!({
            "action": "DeploymentPlan",
            "transactions": self.transactions,
        })
    }
}
