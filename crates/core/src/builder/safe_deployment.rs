use super::external_contracts::ExternalContracts;
use crate::actions::call_encoder::encode_call;
use crate::actions::contract_interface::ContractInterface;
use crate::bindings::multisig::GnosisSafe;
use crate::bindings::safe_proxy_factory::SAFE_PROXY_FACTORY_ABI;
use crate::types::error::DaoError;
use crate::types::transaction::SafeTransaction;
use crate::utils::create2::predict_safe_address;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

/// The DAO's Safe before it exists: its predicted address and the factory call
/// that will create it there.
#[derive(Debug, Clone)]
pub struct SafeDeployment {
    pub address: Address,
    pub initializer: Bytes,
    pub salt_nonce: U256,
    pub create_tx: SafeTransaction,
}

/// `setup` calldata for a Safe with the given owners and no modules, fallback
/// handler or payment.
pub fn safe_initializer(owners: Vec<Address>, threshold: U256) -> Bytes {
    GnosisSafe::setupCall::new((
        owners,
        threshold,
        Address::ZERO,
        Bytes::new(),
        Address::ZERO,
        Address::ZERO,
        U256::ZERO,
        Address::ZERO,
    ))
    .abi_encode()
    .into()
}

/// Plans the Safe that bootstraps the DAO. The multisend contract is its only
/// owner so that the batch can execute transactions on it.
pub fn plan_safe_deployment(
    contracts: &ExternalContracts,
    proxy_creation_code: &[u8],
    salt_nonce: U256,
) -> Result<SafeDeployment, DaoError> {
    let initializer = safe_initializer(vec![contracts.multisend], U256::from(1));
    let address = predict_safe_address(
        contracts.safe_proxy_factory,
        proxy_creation_code,
        contracts.safe_singleton,
        &initializer,
        salt_nonce,
    );

    let factory = ContractInterface::parse(SAFE_PROXY_FACTORY_ABI)?;
    let create_tx = encode_call(
        contracts.safe_proxy_factory,
        &factory,
        "createProxyWithNonce",
        &[
            DynSolValue::Address(contracts.safe_singleton),
            DynSolValue::Bytes(initializer.to_vec()),
            DynSolValue::Uint(salt_nonce, 256),
        ],
        U256::ZERO,
        false,
    )?;

    Ok(SafeDeployment {
        address,
        initializer,
        salt_nonce,
        create_tx,
    })
}
