use crate::types::config_wrapper::ConfigWrapper;
use alloy::primitives::Address;
use eyre::Result;
use log::debug;
use serde::Serialize;

/// Contracts the DAO is built from. They already exist on the target network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalContracts {
    pub multisend: Address,
    pub module_proxy_factory: Address,
    pub azorius_master_copy: Address,
    pub linear_voting_master_copy: Address,
    pub fractal_registry: Address,
    pub key_value_pairs: Address,
    pub safe_proxy_factory: Address,
    pub safe_singleton: Address,
}

impl ExternalContracts {
    pub fn from_config(cw: &ConfigWrapper, network_id: u32) -> Result<Self> {
        let contracts = Self {
            multisend: cw.get_contract_address(network_id, "multisend")?,
            module_proxy_factory: cw.get_contract_address(network_id, "module_proxy_factory")?,
            azorius_master_copy: cw.get_contract_address(network_id, "azorius_master_copy")?,
            linear_voting_master_copy: cw
                .get_contract_address(network_id, "linear_voting_master_copy")?,
            fractal_registry: cw.get_contract_address(network_id, "fractal_registry")?,
            key_value_pairs: cw.get_contract_address(network_id, "key_value_pairs")?,
            safe_proxy_factory: cw.get_contract_address(network_id, "safe_proxy_factory")?,
            safe_singleton: cw.get_contract_address(network_id, "safe_singleton")?,
        };
        debug!("Resolved external contracts for network {}: {:?}", network_id, contracts);
        Ok(contracts)
    }
}
