use super::dao_config::DaoConfig;
use super::error::DaoError;
use alloy::primitives::Address;
use eyre::{Result, eyre};
use std::{env, fs};
use toml::Value;

pub struct ConfigWrapper {
    raw_config: Value,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    pub fn from_file(path: Option<&str>) -> Result<Self> {
        let config_content = if let Some(p) = path {
            fs::read_to_string(p)?
        } else {
            fs::read_to_string("config.toml")?
        };
        Self::from_str(&config_content)
    }

    pub fn from_str(config_content: &str) -> Result<Self> {
        let raw_config: toml::Value = config_content.parse::<Value>()?;
        Ok(Self { raw_config })
    }

    // Values of the form `env:NAME` are read from the environment.
    fn resolve_env(value: &str) -> Result<String> {
        if let Some(env_var) = value.strip_prefix("env:") {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        } else {
            Ok(value.to_string())
        }
    }

    pub fn get_rpc_url(&self, network_id: u32) -> Result<String> {
        let url_str = self
            .raw_config
            .get("rpc_endpoints")
            .and_then(|r| r.get(&network_id.to_string()))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("URL not found for network_id: {}", network_id))?;

        Self::resolve_env(url_str)
    }

    pub fn get_block_explorer_url(&self, network_id: u32) -> Result<String> {
        let url_str = self
            .raw_config
            .get("block_explorers")
            .and_then(|b| b.get(&network_id.to_string()))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                eyre!(
                    "Block explorer URL not found for network_id: {}",
                    network_id
                )
            })?;

        Ok(url_str.trim_end_matches('/').to_string())
    }

    /// Address of an already deployed contract (master copy, factory, singleton).
    /// Network specific entries win over `[contracts.default]`.
    pub fn get_contract_address(&self, network_id: u32, name: &str) -> Result<Address> {
        let network_value = self
            .raw_config
            .get("contracts")
            .and_then(|c| c.get(&network_id.to_string()))
            .and_then(|c| c.get(name))
            .and_then(|v| v.as_str());

        let default_value = self
            .raw_config
            .get("contracts")
            .and_then(|c| c.get("default"))
            .and_then(|c| c.get(name))
            .and_then(|v| v.as_str());

        let address_str =
            network_value
                .or(default_value)
                .ok_or_else(|| DaoError::MissingDeployment {
                    name: name.to_string(),
                    network_id,
                })?;

        let address: Address = Self::resolve_env(address_str)?.parse()?;
        Ok(address)
    }

    pub fn get_artifacts_dir(&self) -> String {
        self.raw_config
            .get("artifacts")
            .and_then(|a| a.get("dir"))
            .and_then(|v| v.as_str())
            .unwrap_or("artifacts")
            .to_string()
    }

    pub fn get_dao_config(&self) -> Result<DaoConfig> {
        let dao = self
            .raw_config
            .get("dao")
            .cloned()
            .ok_or_else(|| eyre!("[dao] section not found in config"))?;
        let config: DaoConfig = dao.try_into()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const CONFIG: &str = r#"
        [rpc_endpoints]
        11155111 = "https://rpc.sepolia.org"
        1 = "env:DAO_CORE_TEST_UNSET_RPC"

        [block_explorers]
        11155111 = "https://sepolia.etherscan.io/"

        [contracts.default]
        multisend = "0x40A2aCCbd92BCA938b02010E17A5b8929b49130D"
        safe_singleton = "0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552"

        [contracts.11155111]
        safe_singleton = "0x3E5c63644E683549055b9Be8653de26E0B4CD36E"

        [dao]
        name = "Decent DAO"
        token_name = "Decent"
        token_symbol = "DCNT"
        initial_supply = "100"
        unlock_duration_seconds = 60
        snapshot_ens = "decent-dao.eth"
        voting_period_blocks = 5
        quorum_basis_numerator = 4
        voting_basis_numerator = 500000
        time_lock_period_blocks = 0
        execution_period_blocks = 86400
    "#;

    #[test]
    fn test_contract_address_prefers_network_entry() {
        let cw = ConfigWrapper::from_str(CONFIG).unwrap();
        assert_eq!(
            cw.get_contract_address(11155111, "safe_singleton").unwrap(),
            address!("0x3E5c63644E683549055b9Be8653de26E0B4CD36E")
        );
        assert_eq!(
            cw.get_contract_address(5, "safe_singleton").unwrap(),
            address!("0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552")
        );
        assert_eq!(
            cw.get_contract_address(11155111, "multisend").unwrap(),
            address!("0x40A2aCCbd92BCA938b02010E17A5b8929b49130D")
        );
    }

    #[test]
    fn test_missing_contract_is_typed_error() {
        let cw = ConfigWrapper::from_str(CONFIG).unwrap();
        let err = cw.get_contract_address(5, "azorius").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DaoError>(),
            Some(&DaoError::MissingDeployment {
                name: "azorius".to_string(),
                network_id: 5
            })
        );
    }

    #[test]
    fn test_rpc_and_explorer_urls() {
        let cw = ConfigWrapper::from_str(CONFIG).unwrap();
        assert_eq!(cw.get_rpc_url(11155111).unwrap(), "https://rpc.sepolia.org");
        assert!(cw.get_rpc_url(1).is_err());
        assert!(cw.get_rpc_url(10).is_err());
        assert_eq!(
            cw.get_block_explorer_url(11155111).unwrap(),
            "https://sepolia.etherscan.io"
        );
        assert_eq!(cw.get_artifacts_dir(), "artifacts");
    }

    #[test]
    fn test_dao_section() {
        let cw = ConfigWrapper::from_str(CONFIG).unwrap();
        let dao = cw.get_dao_config().unwrap();
        assert_eq!(dao.name, "Decent DAO");
        assert!(dao.beneficiaries.is_empty());
    }
}
