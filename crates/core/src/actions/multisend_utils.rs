use crate::bindings::multisend::MultiSendCallOnly;
use crate::types::error::DaoError;
use crate::types::transaction::{
    MetaTransaction, Operation, SafeTransaction, SafeTransactionTemplate,
    build_safe_transaction,
};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

// operation + to + value + data length
const HEADER_LEN: usize = 1 + 20 + 32 + 32;

/// Packs transactions the way `MultiSend` unpacks them:
/// `operation(1) ++ to(20) ++ value(32) ++ len(32) ++ data` per transaction.
pub fn pack_encode(txs: &[MetaTransaction]) -> Bytes {
    let mut encoded_transactions = Vec::new();
    for tx in txs {
        // operation - 1 byte
        encoded_transactions.push(u8::from(tx.operation));

        // to address - 20 bytes
        encoded_transactions.extend_from_slice(tx.to.as_slice());

        // value - 32 bytes
        encoded_transactions.extend_from_slice(&tx.value.to_be_bytes::<32>());

        // data length - 32 bytes
        let data_len = U256::from(tx.data.len());
        encoded_transactions.extend_from_slice(&data_len.to_be_bytes::<32>());

        // data - dynamic length
        encoded_transactions.extend_from_slice(&tx.data);
    }

    Bytes::from(encoded_transactions)
}

pub fn decode_multisend(packed: &[u8]) -> Result<Vec<MetaTransaction>, DaoError> {
    let mut txs = Vec::new();
    let mut offset = 0;

    while offset < packed.len() {
        if packed.len() - offset < HEADER_LEN {
            return Err(DaoError::MalformedBatch(format!(
                "truncated header at byte {}",
                offset
            )));
        }
        let header = &packed[offset..offset + HEADER_LEN];

        let operation = Operation::try_from(header[0]).map_err(DaoError::MalformedBatch)?;
        let to = Address::from_slice(&header[1..21]);
        let value = U256::from_be_slice(&header[21..53]);
        let data_len = usize::try_from(U256::from_be_slice(&header[53..85]))
            .map_err(|_| DaoError::MalformedBatch("data length overflows".to_string()))?;

        let start = offset + HEADER_LEN;
        let end = start
            .checked_add(data_len)
            .filter(|end| *end <= packed.len())
            .ok_or_else(|| {
                DaoError::MalformedBatch(format!(
                    "data of transaction {} runs past the end of the batch",
                    txs.len()
                ))
            })?;

        txs.push(MetaTransaction {
            to,
            value,
            data: Bytes::copy_from_slice(&packed[start..end]),
            operation,
        });
        offset = end;
    }

    Ok(txs)
}

/// `multiSend(bytes)` calldata for `txs`.
pub fn multisend_call_data(txs: &[MetaTransaction]) -> Bytes {
    let multisend_data = MultiSendCallOnly::multiSendCall::new((pack_encode(txs),)).abi_encode();

    Bytes::from(multisend_data)
}

/// Safe transaction delegate calling into the multisend contract.
pub fn multisend_safe_tx(
    multisend: Address,
    txs: &[MetaTransaction],
    nonce: U256,
) -> SafeTransaction {
    build_safe_transaction(SafeTransactionTemplate {
        to: multisend,
        data: Some(multisend_call_data(txs)),
        operation: Some(Operation::DelegateCall),
        nonce,
        ..Default::default()
    })
}
