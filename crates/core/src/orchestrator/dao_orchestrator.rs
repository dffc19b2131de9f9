use super::finalize::{FinalizationReport, finalize};
use super::master_copies::{ensure_deployed, fetch_proxy_creation_code};
use super::token_deploy::{TokenDeployment, deploy_token_and_lock_release};
use crate::bindings::multisig::GnosisSafe;
use crate::builder::azorius_tx_builder::TransactionBuilder;
use crate::builder::external_contracts::ExternalContracts;
use crate::builder::safe_deployment::plan_safe_deployment;
use crate::types::dao_config::DaoConfig;
use crate::utils::artifacts::ArtifactStore;
use crate::utils::chain_client::ChainClient;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;
use eyre::{Result, WrapErr, eyre};
use log::{debug, info, warn};
use serde::Serialize;

/// What the Safe reports about itself once the batch went through.
/// `error` is set when the Safe could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeVerification {
    pub owners: Vec<Address>,
    pub azorius_enabled: bool,
    pub error: Option<String>,
}

impl SafeVerification {
    /// Azorius is the only owner and an enabled module.
    pub fn is_consistent(&self, azorius: Address) -> bool {
        self.error.is_none() && self.owners == [azorius] && self.azorius_enabled
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DaoDeployment {
    pub safe: Address,
    pub azorius: Address,
    pub strategy: Address,
    pub token: TokenDeployment,
    pub batch_tx: B256,
    pub verification: SafeVerification,
    pub finalization: FinalizationReport,
}

pub struct DaoOrchestrator<'a> {
    client: &'a dyn ChainClient,
    artifacts: &'a ArtifactStore,
    config: &'a DaoConfig,
    contracts: &'a ExternalContracts,
}

impl<'a> DaoOrchestrator<'a> {
    pub fn new(
        client: &'a dyn ChainClient,
        artifacts: &'a ArtifactStore,
        config: &'a DaoConfig,
        contracts: &'a ExternalContracts,
    ) -> Self {
        Self {
            client,
            artifacts,
            config,
            contracts,
        }
    }

    pub async fn create_dao(&self) -> Result<DaoDeployment> {
        self.config.validate()?;
        ensure_deployed(self.client, self.contracts).await?;
        let proxy_creation_code =
            fetch_proxy_creation_code(self.client, self.contracts.safe_proxy_factory).await?;

        let token = deploy_token_and_lock_release(self.client, self.artifacts, self.config).await?;
        info!(
            "Token {} and lock release {} deployed, {} wei locked",
            token.token, token.lock_release, token.total_locked
        );

        let safe_nonce = U256::from_be_bytes(rand::random::<[u8; 32]>());
        let safe = plan_safe_deployment(self.contracts, &proxy_creation_code, safe_nonce)?;
        info!("Predicted DAO Safe address {}", safe.address);

        let mut builder =
            TransactionBuilder::new(self.config, self.contracts, safe.address, token.lock_release)?;
        builder.setup()?;
        let strategy = builder.state().strategy()?.address;
        let azorius = builder.state().azorius()?.address;
        info!("Predicted strategy {} and Azorius {}", strategy, azorius);

        let plan = builder.build_deployment_plan(safe.create_tx.clone())?;
        debug!("Deployment plan: {}", plan.describe());

        let batch_tx = self
            .client
            .send(self.contracts.multisend, plan.batch_call_data())
            .await
            .wrap_err("DAO creation batch failed")?;
        info!("DAO creation batch executed at {}", batch_tx);

        let code = self.client.code_at(safe.address).await?;
        if code.is_empty() {
            return Err(eyre!(
                "No contract at predicted Safe address {} after batch {}",
                safe.address,
                batch_tx
            ));
        }
        info!("DAO created at {}", safe.address);

        let verification = self.verify_safe(safe.address, azorius, batch_tx).await;

        let finalization =
            finalize(self.client, self.artifacts, self.config, &token, safe.address).await?;
        info!("Token handed over to the DAO");

        Ok(DaoDeployment {
            safe: safe.address,
            azorius,
            strategy,
            token,
            batch_tx,
            verification,
            finalization,
        })
    }

    /// Reads the Safe back. A failed read is logged and recorded, not returned.
    async fn verify_safe(
        &self,
        safe: Address,
        azorius: Address,
        batch_tx: B256,
    ) -> SafeVerification {
        let verification = match self.read_safe(safe, azorius).await {
            Ok((owners, azorius_enabled)) => SafeVerification {
                owners,
                azorius_enabled,
                error: None,
            },
            Err(e) => {
                warn!("Could not read back Safe {} created by {}: {:#}", safe, batch_tx, e);
                SafeVerification {
                    owners: Vec::new(),
                    azorius_enabled: false,
                    error: Some(format!("{:#}", e)),
                }
            }
        };
        if verification.error.is_none() && !verification.is_consistent(azorius) {
            warn!(
                "Safe {} does not look as planned: owners {:?}, Azorius enabled: {}",
                safe, verification.owners, verification.azorius_enabled
            );
        }
        verification
    }

    async fn read_safe(&self, safe: Address, azorius: Address) -> Result<(Vec<Address>, bool)> {
        let result = self
            .client
            .call(safe, Bytes::from(GnosisSafe::getOwnersCall::new(()).abi_encode()))
            .await?;
        let owners = GnosisSafe::getOwnersCall::abi_decode_returns(&result, true)?.owners;

        let result = self
            .client
            .call(
                safe,
                Bytes::from(GnosisSafe::isModuleEnabledCall::new((azorius,)).abi_encode()),
            )
            .await?;
        let azorius_enabled =
            GnosisSafe::isModuleEnabledCall::abi_decode_returns(&result, true)?.enabled;

        Ok((owners, azorius_enabled))
    }
}
