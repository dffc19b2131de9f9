pub mod actions;
pub mod bindings;
pub mod builder;
pub mod orchestrator;
pub mod types;
pub mod utils;

use actions::multisend_utils::multisend_call_data;
use alloy::primitives::Bytes;
use alloy::signers::local::PrivateKeySigner;
use builder::external_contracts::ExternalContracts;
use dotenv::dotenv;
use eyre::{Result, eyre};
use log::info;
use orchestrator::dao_orchestrator::{DaoDeployment, DaoOrchestrator};
use std::{env, fs};
use types::config_wrapper::ConfigWrapper;
use types::transaction::MetaTransaction;
use utils::artifacts::ArtifactStore;
use utils::chain_client::connect;

/// Deploys the token, lock release and DAO described by the `[dao]` section of
/// the config, signing with `DEPLOYER_PRIVATE_KEY`.
pub async fn create_dao(config_path: Option<&str>, network_id: u32) -> Result<DaoDeployment> {
    dotenv().ok(); // Load environment variables from .env file

    let cw = ConfigWrapper::from_file(config_path)?;
    let config = cw.get_dao_config()?;
    let contracts = ExternalContracts::from_config(&cw, network_id)?;
    let artifacts = ArtifactStore::new(cw.get_artifacts_dir());

    let signer: PrivateKeySigner = env::var("DEPLOYER_PRIVATE_KEY")
        .map_err(|_| eyre!("Environment variable DEPLOYER_PRIVATE_KEY not set"))?
        .parse()?;
    let client = connect(cw.get_rpc_url(network_id)?, signer).await?;
    info!("Creating DAO `{}` on network {}", config.name, network_id);

    let deployment = DaoOrchestrator::new(&client, &artifacts, &config, &contracts)
        .create_dao()
        .await?;

    if let Ok(explorer) = cw.get_block_explorer_url(network_id) {
        info!("View the DAO at {}/address/{}", explorer, deployment.safe);
    }
    Ok(deployment)
}

/// `multiSend(bytes)` calldata for the transactions listed in a JSON file.
pub fn pack_transactions_file(path: &str) -> Result<Bytes> {
    let file_content = fs::read_to_string(path)?;
    let txs: Vec<MetaTransaction> = serde_json::from_str(&file_content)?;
    Ok(multisend_call_data(&txs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::multisend_utils::decode_multisend;
    use crate::bindings::multisend::MultiSendCallOnly;
    use crate::types::transaction::Operation;
    use alloy::primitives::{U256, address, bytes};
    use alloy::sol_types::SolCall;

    #[test]
    fn test_pack_transactions_file() {
        let path = env::temp_dir().join(format!("dao-pack-{}.json", rand::random::<u64>()));
        fs::write(
            &path,
            r#"[
                {"to": "0x1111111111111111111111111111111111111111", "value": "0x0", "data": "0x2fa1d1d5", "operation": 0},
                {"to": "0x2222222222222222222222222222222222222222", "value": "0x5", "data": "0x", "operation": 1}
            ]"#,
        )
        .unwrap();

        let calldata = pack_transactions_file(path.to_str().unwrap()).unwrap();
        let packed = MultiSendCallOnly::multiSendCall::abi_decode(&calldata, true)
            .unwrap()
            .transactions;
        let txs = decode_multisend(&packed).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].to, address!("0x1111111111111111111111111111111111111111"));
        assert_eq!(txs[0].data, bytes!("0x2fa1d1d5"));
        assert_eq!(txs[1].value, U256::from(5));
        assert_eq!(txs[1].operation, Operation::DelegateCall);
    }
}
