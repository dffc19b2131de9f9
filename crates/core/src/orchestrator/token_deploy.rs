use crate::bindings::dcnt_token::DCNTToken;
use crate::types::beneficiary::{
    Beneficiary, BeneficiaryType, merge_beneficiaries, total_locked, total_locked_for,
};
use crate::types::dao_config::DaoConfig;
use crate::utils::artifacts::ArtifactStore;
use crate::utils::chain_client::ChainClient;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use eyre::{Result, WrapErr};
use log::info;
use serde::Serialize;

pub const TOKEN_ARTIFACT: &str = "DCNTToken";
pub const LOCK_RELEASE_ARTIFACT: &str = "LockRelease";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDeployment {
    pub token: Address,
    pub lock_release: Address,
    pub mint_authorization: Address,
    /// One entry per address, as handed to the lock release.
    pub beneficiaries: Vec<Beneficiary>,
    pub total_locked: U256,
    pub locked_for_investors: U256,
    pub locked_for_purchasers: U256,
}

/// Deploys the mint plug-in, the token (minted to the deployer) and the lock
/// release, then moves the locked amount into the lock release.
pub async fn deploy_token_and_lock_release(
    client: &dyn ChainClient,
    artifacts: &ArtifactStore,
    config: &DaoConfig,
) -> Result<TokenDeployment> {
    let deployer = client.sender();
    let supply = config.initial_supply_wei()?;

    let plugin = config.mint_authorization.constructor_artifact();
    let mint_authorization = client
        .deploy(artifacts.init_code(plugin, vec![])?)
        .await
        .wrap_err_with(|| format!("Failed to deploy {}", plugin))?;
    info!("{} deployed {} to {}", deployer, plugin, mint_authorization);

    let token = client
        .deploy(artifacts.init_code(
            TOKEN_ARTIFACT,
            vec![
                DynSolValue::Uint(supply, 256),
                DynSolValue::Address(deployer),
                DynSolValue::Address(mint_authorization),
                DynSolValue::String(config.token_name.clone()),
                DynSolValue::String(config.token_symbol.clone()),
            ],
        )?)
        .await
        .wrap_err("Failed to deploy token")?;
    info!("{} deployed {} to {}", deployer, config.token_symbol, token);

    // The lock release takes one schedule per address.
    let beneficiaries = merge_beneficiaries(&config.beneficiaries);
    let total_locked = total_locked(&beneficiaries);

    let lock_release = client
        .deploy(artifacts.init_code(
            LOCK_RELEASE_ARTIFACT,
            vec![
                DynSolValue::Address(token),
                DynSolValue::Array(
                    beneficiaries
                        .iter()
                        .map(|b| DynSolValue::Address(b.address))
                        .collect(),
                ),
                DynSolValue::Array(
                    beneficiaries
                        .iter()
                        .map(|b| DynSolValue::Uint(b.locked_amount, 256))
                        .collect(),
                ),
                DynSolValue::Uint(U256::from(config.unlock_start()), 64),
                DynSolValue::Uint(U256::from(config.unlock_duration_seconds), 64),
            ],
        )?)
        .await
        .wrap_err("Failed to deploy lock release")?;
    info!("{} deployed LockRelease to {}", deployer, lock_release);

    if !total_locked.is_zero() {
        let calldata = Bytes::from(DCNTToken::transferCall::new((lock_release, total_locked)).abi_encode());
        let hash = client
            .send(token, calldata)
            .await
            .wrap_err("Failed to fund lock release")?;
        info!("Locked {} wei in {} at {}", total_locked, lock_release, hash);
    }

    Ok(TokenDeployment {
        token,
        lock_release,
        mint_authorization,
        total_locked,
        locked_for_investors: total_locked_for(&config.beneficiaries, BeneficiaryType::Investor),
        locked_for_purchasers: total_locked_for(&config.beneficiaries, BeneficiaryType::Purchaser),
        beneficiaries,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::builder::azorius_tx_builder::tests::sample_config;
    use crate::utils::chain_client::mock::{MockChainClient, Recorded};
    use alloy::dyn_abi::DynSolType;
    use alloy::primitives::address;
    use std::fs;

    pub(crate) const DEPLOYER: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    pub(crate) const ALICE: Address = address!("0x629750317d320B8bB4d48D345A6d699Cc855c4a6");
    pub(crate) const BOB: Address = address!("0x065FEDAaD9486C7647EBe78cD5be05A5DF29Fe76");

    pub(crate) fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    /// Artifact directory where every contract's creation code is its name's
    /// first letter, so deployments are easy to tell apart.
    pub(crate) fn test_artifacts() -> ArtifactStore {
        let dir = std::env::temp_dir().join(format!("dao-orchestrator-{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        for (name, code) in [
            ("NoMint", "0x4e"),
            ("UnlimitedMint", "0x55"),
            ("AnnualCappedInflation", "0x41"),
            ("DCNTToken", "0x44"),
            ("LockRelease", "0x4c"),
        ] {
            fs::write(
                dir.join(format!("{}.json", name)),
                format!(r#"{{"bytecode":"{}"}}"#, code),
            )
            .unwrap();
        }
        ArtifactStore::new(dir)
    }

    pub(crate) fn two_beneficiary_config() -> DaoConfig {
        let mut config = sample_config();
        config.beneficiaries = vec![
            Beneficiary::new(BeneficiaryType::Purchaser, ALICE, ether(10)),
            Beneficiary::new(BeneficiaryType::Investor, BOB, ether(20)),
            Beneficiary::new(BeneficiaryType::Investor, ALICE, ether(5)),
        ];
        config
    }

    #[tokio::test]
    async fn test_deploy_order_and_constructor_args() {
        let client = MockChainClient::new(DEPLOYER);
        let config = two_beneficiary_config();

        let deployment = deploy_token_and_lock_release(&client, &test_artifacts(), &config)
            .await
            .unwrap();

        assert_eq!(deployment.mint_authorization, MockChainClient::deployed_address(0));
        assert_eq!(deployment.token, MockChainClient::deployed_address(1));
        assert_eq!(deployment.lock_release, MockChainClient::deployed_address(2));
        assert_eq!(deployment.total_locked, ether(35));
        assert_eq!(deployment.locked_for_investors, ether(25));
        assert_eq!(deployment.locked_for_purchasers, ether(10));
        assert_eq!(deployment.beneficiaries.len(), 2);

        let records = client.records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], Recorded::Deploy(Bytes::from_static(&[0x4e])));

        let Recorded::Deploy(token_code) = &records[1] else {
            panic!("expected token deployment");
        };
        assert_eq!(token_code[0], 0x44);
        let args = DynSolType::parse("(uint256,address,address,string,string)")
            .unwrap()
            .abi_decode_params(&token_code[1..])
            .unwrap();
        let args = args.as_tuple().unwrap();
        assert_eq!(args[0].as_uint(), Some((ether(100), 256)));
        assert_eq!(args[1].as_address(), Some(DEPLOYER));
        assert_eq!(args[2].as_address(), Some(deployment.mint_authorization));
        assert_eq!(args[4].as_str(), Some("DCNT"));

        let Recorded::Deploy(lock_code) = &records[2] else {
            panic!("expected lock release deployment");
        };
        let args = DynSolType::parse("(address,address[],uint256[],uint64,uint64)")
            .unwrap()
            .abi_decode_params(&lock_code[1..])
            .unwrap();
        let args = args.as_tuple().unwrap();
        assert_eq!(args[0].as_address(), Some(deployment.token));
        let addresses: Vec<Address> = args[1]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_address())
            .collect();
        assert_eq!(addresses, vec![ALICE, BOB]);
        assert_eq!(args[2].as_array().unwrap()[0].as_uint(), Some((ether(15), 256)));
        assert_eq!(args[3].as_uint(), Some((U256::from(1_700_000_000u64), 64)));

        assert_eq!(
            records[3],
            Recorded::Send {
                to: deployment.token,
                data: Bytes::from(
                    DCNTToken::transferCall::new((deployment.lock_release, ether(35))).abi_encode()
                ),
            }
        );
    }

    #[tokio::test]
    async fn test_no_beneficiaries_skips_funding() {
        let client = MockChainClient::new(DEPLOYER);
        let deployment = deploy_token_and_lock_release(&client, &test_artifacts(), &sample_config())
            .await
            .unwrap();

        assert_eq!(deployment.total_locked, U256::ZERO);
        assert_eq!(client.records().len(), 3);
    }
}
