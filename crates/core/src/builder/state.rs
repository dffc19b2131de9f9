use crate::actions::contract_interface::ContractInterface;
use crate::types::error::DaoError;
use alloy::primitives::{Address, Bytes, U256};

/// A Zodiac module whose proxy address is known before it is deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedModule {
    pub master_copy: Address,
    /// `setUp(bytes)` calldata handed to the proxy factory.
    pub initializer: Bytes,
    pub salt_nonce: U256,
    pub address: Address,
}

/// A predicted address paired with the interface used to call it.
#[derive(Debug, Clone)]
pub struct BoundContract {
    pub address: Address,
    pub interface: ContractInterface,
}

/// Azorius is only passed as an argument once bound.
#[derive(Debug, Clone)]
pub struct BoundContracts {
    pub strategy: BoundContract,
    pub azorius: Address,
}

/// Progress of a transaction builder. Each state carries everything the
/// previous ones computed, so nothing can be read before it exists.
#[derive(Debug, Clone, Default)]
pub enum BuilderState {
    #[default]
    Uninitialized,
    StrategyAddressPredicted {
        strategy: PredictedModule,
    },
    CoreModuleAddressPredicted {
        strategy: PredictedModule,
        azorius: PredictedModule,
    },
    ContractsBound {
        strategy: PredictedModule,
        azorius: PredictedModule,
        bound: BoundContracts,
    },
}

impl BuilderState {
    pub fn name(&self) -> &'static str {
        match self {
            BuilderState::Uninitialized => "Uninitialized",
            BuilderState::StrategyAddressPredicted { .. } => "StrategyAddressPredicted",
            BuilderState::CoreModuleAddressPredicted { .. } => "CoreModuleAddressPredicted",
            BuilderState::ContractsBound { .. } => "ContractsBound",
        }
    }

    pub fn strategy(&self) -> Result<&PredictedModule, DaoError> {
        match self {
            BuilderState::Uninitialized => Err(DaoError::AddressNotSet("Strategy")),
            BuilderState::StrategyAddressPredicted { strategy }
            | BuilderState::CoreModuleAddressPredicted { strategy, .. }
            | BuilderState::ContractsBound { strategy, .. } => Ok(strategy),
        }
    }

    pub fn azorius(&self) -> Result<&PredictedModule, DaoError> {
        match self {
            BuilderState::Uninitialized => Err(DaoError::AddressNotSet("Strategy")),
            BuilderState::StrategyAddressPredicted { .. } => Err(DaoError::AddressNotSet("Azorius")),
            BuilderState::CoreModuleAddressPredicted { azorius, .. }
            | BuilderState::ContractsBound { azorius, .. } => Ok(azorius),
        }
    }

    pub fn bound(&self) -> Result<&BoundContracts, DaoError> {
        match self {
            BuilderState::ContractsBound { bound, .. } => Ok(bound),
            BuilderState::CoreModuleAddressPredicted { .. } => {
                Err(DaoError::AddressNotSet("Azorius contract"))
            }
            other => other.azorius().and(Err(DaoError::AddressNotSet("Azorius contract"))),
        }
    }
}
