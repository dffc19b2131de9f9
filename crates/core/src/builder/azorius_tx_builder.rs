use super::external_contracts::ExternalContracts;
use super::deployment_plan::DeploymentPlan;
use super::state::{BoundContract, BoundContracts, BuilderState, PredictedModule};
use crate::actions::call_encoder::encode_call;
use crate::actions::contract_interface::ContractInterface;
use crate::actions::exec_transaction::{bootstrap_signature, build_exec_transaction};
use crate::actions::multisend_utils::multisend_safe_tx;
use crate::bindings::azorius::{AZORIUS_ABI, LINEAR_ERC20_VOTING_ABI};
use crate::bindings::module_proxy_factory::MODULE_PROXY_FACTORY_ABI;
use crate::bindings::multisig::GNOSIS_SAFE_ABI;
use crate::bindings::registry::{FRACTAL_REGISTRY_ABI, KEY_VALUE_PAIRS_ABI};
use crate::types::dao_config::DaoConfig;
use crate::types::error::DaoError;
use crate::types::transaction::{MetaTransaction, SafeTransaction};
use crate::utils::create2::predict_module_address;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256, address};
use log::debug;

// Placeholder Azorius address in the strategy's setup; replaced by setAzorius.
const AZORIUS_PLACEHOLDER: Address = address!("0x0000000000000000000000000000000000000001");

struct Interfaces {
    safe: ContractInterface,
    module_factory: ContractInterface,
    azorius: ContractInterface,
    strategy: ContractInterface,
    registry: ContractInterface,
    key_value_pairs: ContractInterface,
}

impl Interfaces {
    fn parse() -> Result<Self, DaoError> {
        Ok(Self {
            safe: ContractInterface::parse(GNOSIS_SAFE_ABI)?,
            module_factory: ContractInterface::parse(MODULE_PROXY_FACTORY_ABI)?,
            azorius: ContractInterface::parse(AZORIUS_ABI)?,
            strategy: ContractInterface::parse(LINEAR_ERC20_VOTING_ABI)?,
            registry: ContractInterface::parse(FRACTAL_REGISTRY_ABI)?,
            key_value_pairs: ContractInterface::parse(KEY_VALUE_PAIRS_ABI)?,
        })
    }
}

/// Builds the transactions that turn a freshly created Safe into an Azorius
/// governed DAO. Module addresses are predicted up front so every transaction
/// can reference contracts deployed earlier in the same batch.
pub struct TransactionBuilder<'a> {
    config: &'a DaoConfig,
    contracts: &'a ExternalContracts,
    safe: Address,
    lock_release: Address,
    strategy_nonce: U256,
    azorius_nonce: U256,
    interfaces: Interfaces,
    state: BuilderState,
}

fn random_nonce() -> U256 {
    U256::from_be_bytes(rand::random::<[u8; 32]>())
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(
        config: &'a DaoConfig,
        contracts: &'a ExternalContracts,
        safe: Address,
        lock_release: Address,
    ) -> Result<Self, DaoError> {
        Self::with_nonces(
            config,
            contracts,
            safe,
            lock_release,
            random_nonce(),
            random_nonce(),
        )
    }

    pub fn with_nonces(
        config: &'a DaoConfig,
        contracts: &'a ExternalContracts,
        safe: Address,
        lock_release: Address,
        strategy_nonce: U256,
        azorius_nonce: U256,
    ) -> Result<Self, DaoError> {
        Ok(Self {
            config,
            contracts,
            safe,
            lock_release,
            strategy_nonce,
            azorius_nonce,
            interfaces: Interfaces::parse()?,
            state: BuilderState::Uninitialized,
        })
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn safe(&self) -> Address {
        self.safe
    }

    /// Runs every transition, leaving the builder ready to build transactions.
    pub fn setup(&mut self) -> Result<(), DaoError> {
        self.predict_strategy_address()?;
        self.predict_azorius_address()?;
        self.bind_contracts()
    }

    fn invalid_transition(&self, to: &'static str) -> DaoError {
        DaoError::InvalidTransition {
            from: self.state.name(),
            to,
        }
    }

    pub fn predict_strategy_address(&mut self) -> Result<Address, DaoError> {
        if !matches!(self.state, BuilderState::Uninitialized) {
            return Err(self.invalid_transition("StrategyAddressPredicted"));
        }

        let init_params = DynSolValue::Tuple(vec![
            DynSolValue::Address(self.safe),
            DynSolValue::Address(self.lock_release),
            DynSolValue::Address(AZORIUS_PLACEHOLDER),
            DynSolValue::Uint(U256::from(self.config.voting_period_blocks), 32),
            DynSolValue::Uint(U256::from(self.config.proposal_required_weight), 256),
            DynSolValue::Uint(U256::from(self.config.quorum_basis_numerator), 256),
            DynSolValue::Uint(U256::from(self.config.voting_basis_numerator), 256),
        ])
        .abi_encode_params();
        let initializer = self
            .interfaces
            .strategy
            .encode("setUp", &[DynSolValue::Bytes(init_params)])?;

        let strategy = self.predict_module(
            self.contracts.linear_voting_master_copy,
            initializer,
            self.strategy_nonce,
        )?;
        debug!("Predicted strategy address {}", strategy.address);

        let address = strategy.address;
        self.state = BuilderState::StrategyAddressPredicted { strategy };
        Ok(address)
    }

    pub fn predict_azorius_address(&mut self) -> Result<Address, DaoError> {
        let strategy = match &self.state {
            BuilderState::Uninitialized => return Err(DaoError::AddressNotSet("Strategy")),
            BuilderState::StrategyAddressPredicted { strategy } => strategy.clone(),
            _ => return Err(self.invalid_transition("CoreModuleAddressPredicted")),
        };

        let init_params = DynSolValue::Tuple(vec![
            DynSolValue::Address(self.safe),
            DynSolValue::Address(self.safe),
            DynSolValue::Address(self.safe),
            DynSolValue::Array(vec![DynSolValue::Address(strategy.address)]),
            DynSolValue::Uint(U256::from(self.config.time_lock_period_blocks), 32),
            DynSolValue::Uint(U256::from(self.config.execution_period_blocks), 32),
        ])
        .abi_encode_params();
        let initializer = self
            .interfaces
            .azorius
            .encode("setUp", &[DynSolValue::Bytes(init_params)])?;

        let azorius = self.predict_module(
            self.contracts.azorius_master_copy,
            initializer,
            self.azorius_nonce,
        )?;
        debug!("Predicted Azorius address {}", azorius.address);

        let address = azorius.address;
        self.state = BuilderState::CoreModuleAddressPredicted { strategy, azorius };
        Ok(address)
    }

    pub fn bind_contracts(&mut self) -> Result<(), DaoError> {
        let (strategy, azorius) = match &self.state {
            BuilderState::CoreModuleAddressPredicted { strategy, azorius } => {
                (strategy.clone(), azorius.clone())
            }
            BuilderState::ContractsBound { .. } => {
                return Err(self.invalid_transition("ContractsBound"));
            }
            other => {
                other.azorius()?;
                return Err(self.invalid_transition("ContractsBound"));
            }
        };

        let bound = BoundContracts {
            strategy: BoundContract {
                address: strategy.address,
                interface: self.interfaces.strategy.clone(),
            },
            azorius: azorius.address,
        };
        self.state = BuilderState::ContractsBound {
            strategy,
            azorius,
            bound,
        };
        Ok(())
    }

    fn predict_module(
        &self,
        master_copy: Address,
        initializer: Bytes,
        salt_nonce: U256,
    ) -> Result<PredictedModule, DaoError> {
        let address = predict_module_address(
            self.contracts.module_proxy_factory,
            master_copy,
            &initializer,
            salt_nonce,
        )?;
        Ok(PredictedModule {
            master_copy,
            initializer,
            salt_nonce,
            address,
        })
    }

    fn azorius_address(&self) -> Result<Address, DaoError> {
        Ok(self.state.bound()?.azorius)
    }

    pub fn build_update_dao_name_tx(&self) -> Result<SafeTransaction, DaoError> {
        self.state.bound()?;
        encode_call(
            self.contracts.fractal_registry,
            &self.interfaces.registry,
            "updateDAOName",
            &[DynSolValue::String(self.config.name.clone())],
            U256::ZERO,
            false,
        )
    }

    pub fn build_update_dao_snapshot_url_tx(&self) -> Result<SafeTransaction, DaoError> {
        self.state.bound()?;
        encode_call(
            self.contracts.key_value_pairs,
            &self.interfaces.key_value_pairs,
            "updateValues",
            &[
                DynSolValue::Array(vec![DynSolValue::String("snapshotURL".to_string())]),
                DynSolValue::Array(vec![DynSolValue::String(self.config.snapshot_ens.clone())]),
            ],
            U256::ZERO,
            false,
        )
    }

    pub fn build_linear_voting_contract_setup_tx(&self) -> Result<SafeTransaction, DaoError> {
        let bound = self.state.bound()?;
        encode_call(
            bound.strategy.address,
            &bound.strategy.interface,
            "setAzorius",
            &[DynSolValue::Address(bound.azorius)],
            U256::ZERO,
            false,
        )
    }

    pub fn build_enable_azorius_module_tx(&self) -> Result<SafeTransaction, DaoError> {
        let azorius = self.azorius_address()?;
        encode_call(
            self.safe,
            &self.interfaces.safe,
            "enableModule",
            &[DynSolValue::Address(azorius)],
            U256::ZERO,
            false,
        )
    }

    pub fn build_add_azorius_contract_as_owner_tx(&self) -> Result<SafeTransaction, DaoError> {
        let azorius = self.azorius_address()?;
        encode_call(
            self.safe,
            &self.interfaces.safe,
            "addOwnerWithThreshold",
            &[
                DynSolValue::Address(azorius),
                DynSolValue::Uint(U256::from(1), 256),
            ],
            U256::ZERO,
            false,
        )
    }

    /// Azorius was added last, so it precedes the multisend in the owner list.
    pub fn build_remove_multisend_owner_tx(&self) -> Result<SafeTransaction, DaoError> {
        let azorius = self.azorius_address()?;
        encode_call(
            self.safe,
            &self.interfaces.safe,
            "removeOwner",
            &[
                DynSolValue::Address(azorius),
                DynSolValue::Address(self.contracts.multisend),
                DynSolValue::Uint(U256::from(1), 256),
            ],
            U256::ZERO,
            false,
        )
    }

    fn build_deploy_module_tx(&self, module: &PredictedModule) -> Result<SafeTransaction, DaoError> {
        encode_call(
            self.contracts.module_proxy_factory,
            &self.interfaces.module_factory,
            "deployModule",
            &[
                DynSolValue::Address(module.master_copy),
                DynSolValue::Bytes(module.initializer.to_vec()),
                DynSolValue::Uint(module.salt_nonce, 256),
            ],
            U256::ZERO,
            false,
        )
    }

    pub fn build_deploy_strategy_tx(&self) -> Result<SafeTransaction, DaoError> {
        self.state.bound()?;
        self.build_deploy_module_tx(self.state.strategy()?)
    }

    pub fn build_deploy_azorius_tx(&self) -> Result<SafeTransaction, DaoError> {
        self.state.bound()?;
        self.build_deploy_module_tx(self.state.azorius()?)
    }

    /// Signature of the multisend contract, the Safe's only owner while the batch runs.
    pub fn signatures(&self) -> Bytes {
        bootstrap_signature(self.contracts.multisend)
    }

    pub fn build_internal_txs(&self) -> Result<Vec<MetaTransaction>, DaoError> {
        Ok(vec![
            self.build_update_dao_name_tx()?.into(),
            self.build_update_dao_snapshot_url_tx()?.into(),
            self.build_linear_voting_contract_setup_tx()?.into(),
            self.build_enable_azorius_module_tx()?.into(),
            self.build_add_azorius_contract_as_owner_tx()?.into(),
            self.build_remove_multisend_owner_tx()?.into(),
        ])
    }

    /// `execTransaction` on the Safe, delegate calling the multisend contract
    /// with `internal_txs`.
    pub fn build_exec_internal_safe_tx(
        &self,
        signatures: Bytes,
        internal_txs: &[MetaTransaction],
    ) -> Result<SafeTransaction, DaoError> {
        self.state.bound()?;
        let inner = multisend_safe_tx(self.contracts.multisend, internal_txs, U256::ZERO);
        Ok(build_exec_transaction(self.safe, &inner, signatures))
    }

    /// Safe creation, strategy and Azorius deployment, then the Safe's own
    /// configuration, in the order they must execute.
    pub fn build_deployment_plan(
        &self,
        create_safe_tx: SafeTransaction,
    ) -> Result<DeploymentPlan, DaoError> {
        let internal_txs = self.build_internal_txs()?;
        Ok(DeploymentPlan::new(vec![
            create_safe_tx,
            self.build_deploy_strategy_tx()?,
            self.build_deploy_azorius_tx()?,
            self.build_exec_internal_safe_tx(self.signatures(), &internal_txs)?,
        ]))
    }
}
