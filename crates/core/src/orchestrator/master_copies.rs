use crate::bindings::safe_proxy_factory::GnosisSafeProxyFactory;
use crate::builder::external_contracts::ExternalContracts;
use crate::utils::chain_client::ChainClient;
use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use eyre::{Result, WrapErr, eyre};
use log::{debug, info};

/// Fails unless every external contract has code on the connected network.
pub async fn ensure_deployed(client: &dyn ChainClient, contracts: &ExternalContracts) -> Result<()> {
    let named: [(&str, Address); 8] = [
        ("multisend", contracts.multisend),
        ("module_proxy_factory", contracts.module_proxy_factory),
        ("azorius_master_copy", contracts.azorius_master_copy),
        ("linear_voting_master_copy", contracts.linear_voting_master_copy),
        ("fractal_registry", contracts.fractal_registry),
        ("key_value_pairs", contracts.key_value_pairs),
        ("safe_proxy_factory", contracts.safe_proxy_factory),
        ("safe_singleton", contracts.safe_singleton),
    ];

    for (name, address) in named {
        let code = client.code_at(address).await?;
        if code.is_empty() {
            return Err(eyre!("{} has no code at {}", name, address));
        }
        debug!("{} found at {}", name, address);
    }
    info!("Master copies fetched");
    Ok(())
}

/// Creation code the Safe proxy factory deploys, needed to predict the Safe address.
pub async fn fetch_proxy_creation_code(
    client: &dyn ChainClient,
    safe_proxy_factory: Address,
) -> Result<Bytes> {
    let calldata = Bytes::from(GnosisSafeProxyFactory::proxyCreationCodeCall::new(()).abi_encode());
    let result = client
        .call(safe_proxy_factory, calldata)
        .await
        .wrap_err("Failed to read proxyCreationCode")?;
    let code = GnosisSafeProxyFactory::proxyCreationCodeCall::abi_decode_returns(&result, true)?.code;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::external_contracts::tests::sample_contracts;
    use crate::utils::chain_client::mock::MockChainClient;
    use alloy::primitives::bytes;
    use alloy::sol_types::SolValue;

    #[tokio::test]
    async fn test_fetch_proxy_creation_code() {
        let creation_code = bytes!("0x608060405234801561001057600080fd5b50");
        let client = MockChainClient::new(Address::ZERO).respond(
            GnosisSafeProxyFactory::proxyCreationCodeCall::SELECTOR,
            (creation_code.clone(),).abi_encode_params(),
        );

        let code = fetch_proxy_creation_code(&client, sample_contracts().safe_proxy_factory)
            .await
            .unwrap();
        assert_eq!(code, creation_code);
    }

    #[tokio::test]
    async fn test_missing_master_copy() {
        let contracts = sample_contracts();
        let client = MockChainClient::new(Address::ZERO).without_code_at(contracts.key_value_pairs);

        let err = ensure_deployed(&client, &contracts).await.unwrap_err();
        assert!(err.to_string().starts_with("key_value_pairs has no code"));
        assert!(ensure_deployed(&MockChainClient::new(Address::ZERO), &contracts)
            .await
            .is_ok());
    }
}
