use super::token_deploy::TokenDeployment;
use crate::bindings::dcnt_token::{
    DCNTToken, DEFAULT_ADMIN_ROLE, mint_role, update_mint_authorization_role,
};
use crate::types::dao_config::{DaoConfig, MintAuthorization};
use crate::utils::artifacts::ArtifactStore;
use crate::utils::chain_client::ChainClient;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;
use eyre::{Result, WrapErr, eyre};
use log::info;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ANNUAL_CAPPED_INFLATION_ARTIFACT: &str = "AnnualCappedInflation";

#[derive(Debug, Clone, Serialize)]
pub struct FinalizationReport {
    pub transferred_to_dao: U256,
    /// Set when the token was pointed at a new mint plug-in owned by the DAO.
    pub mint_authorization: Option<Address>,
    pub transactions: Vec<(String, B256)>,
}

struct Finalizer<'a> {
    client: &'a dyn ChainClient,
    token: Address,
    safe: Address,
    transactions: Vec<(String, B256)>,
}

impl Finalizer<'_> {
    async fn send(&mut self, step: String, data: Vec<u8>) -> Result<()> {
        let hash = self
            .client
            .send(self.token, Bytes::from(data))
            .await
            .wrap_err_with(|| {
                format!(
                    "Finalization step `{}` failed; the DAO Safe is deployed at {} and the remaining steps can be run against it",
                    step, self.safe
                )
            })?;
        info!("{} at {}", step, hash);
        self.transactions.push((step, hash));
        Ok(())
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Hands the token over to the DAO: the unlocked supply, an inflation plug-in
/// when configured, and every role. The deployer's admin role goes last.
pub async fn finalize(
    client: &dyn ChainClient,
    artifacts: &ArtifactStore,
    config: &DaoConfig,
    token: &TokenDeployment,
    safe: Address,
) -> Result<FinalizationReport> {
    let deployer = client.sender();
    let mut finalizer = Finalizer {
        client,
        token: token.token,
        safe,
        transactions: Vec::new(),
    };

    let initial_supply = config.initial_supply_wei()?;
    let transferred_to_dao = initial_supply
        .checked_sub(token.total_locked)
        .ok_or_else(|| {
            eyre!(
                "{} wei locked in {} exceeds the initial supply of {} wei",
                token.total_locked,
                token.lock_release,
                initial_supply
            )
        })?;
    info!("Transferring {} wei of {} to the DAO", transferred_to_dao, config.token_symbol);
    finalizer
        .send(
            "transfer remaining supply".to_string(),
            DCNTToken::transferCall::new((safe, transferred_to_dao)).abi_encode(),
        )
        .await?;

    let mut mint_authorization = None;
    if let MintAuthorization::AnnualCappedInflation {
        first_mint_delay_seconds,
    } = config.mint_authorization
    {
        let next_mint = now() + first_mint_delay_seconds;
        let inflation = client
            .deploy(artifacts.init_code(
                ANNUAL_CAPPED_INFLATION_ARTIFACT,
                vec![
                    DynSolValue::Address(token.token),
                    DynSolValue::Uint(U256::from(next_mint), 256),
                    DynSolValue::Address(safe),
                ],
            )?)
            .await
            .wrap_err_with(|| {
                format!(
                    "Finalization step `deploy AnnualCappedInflation` failed; the DAO Safe is deployed at {}",
                    safe
                )
            })?;
        info!("Deployed AnnualCappedInflation to {}", inflation);

        finalizer
            .send(
                "update mint authorization".to_string(),
                DCNTToken::updateMintAuthorizationCall::new((inflation,)).abi_encode(),
            )
            .await?;
        mint_authorization = Some(inflation);
    }

    let roles = [
        ("DEFAULT_ADMIN_ROLE", DEFAULT_ADMIN_ROLE),
        ("UPDATE_MINT_AUTHORIZATION_ROLE", update_mint_authorization_role()),
        ("MINT_ROLE", mint_role()),
    ];
    for (name, role) in roles {
        finalizer
            .send(
                format!("grant {} to DAO", name),
                DCNTToken::grantRoleCall::new((role, safe)).abi_encode(),
            )
            .await?;
    }
    // Admin role last; it is needed to revoke the others.
    for (name, role) in roles.iter().rev() {
        finalizer
            .send(
                format!("revoke {} from deployer", name),
                DCNTToken::revokeRoleCall::new((*role, deployer)).abi_encode(),
            )
            .await?;
    }

    Ok(FinalizationReport {
        transferred_to_dao,
        mint_authorization,
        transactions: finalizer.transactions,
    })
}
