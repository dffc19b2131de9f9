use super::contract_interface::ContractInterface;
use crate::types::error::DaoError;
use crate::types::transaction::{
    Operation, SafeTransaction, SafeTransactionTemplate, build_safe_transaction,
};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};

/// Encodes `method(args)` on `target` into a Safe transaction. `nonce` is only
/// recorded on the result.
pub fn encode_call(
    target: Address,
    interface: &ContractInterface,
    method: &str,
    args: &[DynSolValue],
    nonce: U256,
    delegate: bool,
) -> Result<SafeTransaction, DaoError> {
    let data = interface.encode(method, args)?;
    let operation = if delegate {
        Operation::DelegateCall
    } else {
        Operation::Call
    };

    Ok(build_safe_transaction(SafeTransactionTemplate {
        to: target,
        data: Some(data),
        operation: Some(operation),
        nonce,
        ..Default::default()
    }))
}
