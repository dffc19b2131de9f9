use crate::bindings::multisig::GnosisSafe;
use crate::types::transaction::{SafeTransaction, SafeTransactionTemplate, build_safe_transaction};
use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;

/// Pre-validated signature of `signer`: `r = signer`, `s = 0`, `v = 1`. The Safe
/// accepts it when `signer` is the account executing the transaction, which is the
/// case for the multisend contract during the bootstrap batch.
pub fn bootstrap_signature(signer: Address) -> Bytes {
    let mut sig = Vec::with_capacity(65);
    // r
    sig.extend_from_slice(signer.into_word().as_slice());
    // s
    sig.extend_from_slice(&[0u8; 32]);
    // v
    sig.push(1);
    Bytes::from(sig)
}

/// Wraps `inner` into a call of `safe.execTransaction`.
pub fn build_exec_transaction(
    safe: Address,
    inner: &SafeTransaction,
    signatures: Bytes,
) -> SafeTransaction {
    let data = GnosisSafe::execTransactionCall::new((
        inner.to,
        inner.value,
        inner.data.clone(),
        u8::from(inner.operation),
        inner.safe_tx_gas,
        inner.base_gas,
        inner.gas_price,
        inner.gas_token,
        inner.refund_receiver,
        signatures,
    ))
    .abi_encode();

    build_safe_transaction(SafeTransactionTemplate {
        to: safe,
        data: Some(Bytes::from(data)),
        nonce: inner.nonce,
        ..Default::default()
    })
}
