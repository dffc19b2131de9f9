use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Safe `Enum.Operation`, serialized as its wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Operation {
    #[default]
    Call,
    DelegateCall,
}

impl From<Operation> for u8 {
    fn from(op: Operation) -> u8 {
        match op {
            Operation::Call => 0,
            Operation::DelegateCall => 1,
        }
    }
}

impl TryFrom<u8> for Operation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operation::Call),
            1 => Ok(Operation::DelegateCall),
            other => Err(format!("unknown operation {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
    pub safe_tx_gas: U256,
    pub base_gas: U256,
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
}

impl SafeTransaction {
    pub fn meta(&self) -> MetaTransaction {
        MetaTransaction {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            operation: self.operation,
        }
    }
}

impl From<SafeTransaction> for MetaTransaction {
    fn from(tx: SafeTransaction) -> Self {
        Self {
            to: tx.to,
            value: tx.value,
            data: tx.data,
            operation: tx.operation,
        }
    }
}

/// Partially specified transaction; everything but `to` and `nonce` defaults to zero.
#[derive(Debug, Clone, Default)]
pub struct SafeTransactionTemplate {
    pub to: Address,
    pub value: Option<U256>,
    pub data: Option<Bytes>,
    pub operation: Option<Operation>,
    pub safe_tx_gas: Option<U256>,
    pub base_gas: Option<U256>,
    pub gas_price: Option<U256>,
    pub gas_token: Option<Address>,
    pub refund_receiver: Option<Address>,
    pub nonce: U256,
}

pub fn build_safe_transaction(template: SafeTransactionTemplate) -> SafeTransaction {
    SafeTransaction {
        to: template.to,
        value: template.value.unwrap_or(U256::ZERO),
        data: template.data.unwrap_or_default(),
        operation: template.operation.unwrap_or_default(),
        safe_tx_gas: template.safe_tx_gas.unwrap_or(U256::ZERO),
        base_gas: template.base_gas.unwrap_or(U256::ZERO),
        gas_price: template.gas_price.unwrap_or(U256::ZERO),
        gas_token: template.gas_token.unwrap_or(Address::ZERO),
        refund_receiver: template.refund_receiver.unwrap_or(Address::ZERO),
        nonce: template.nonce,
    }
}
