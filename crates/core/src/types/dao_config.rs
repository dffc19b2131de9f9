use super::beneficiary::Beneficiary;
use super::error::DaoError;
use alloy::primitives::{U256, utils::parse_ether};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Mint authorization plug-in handed to the token constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MintAuthorization {
    #[default]
    NoMint,
    UnlimitedMint,
    /// Capped yearly inflation; the plug-in is owned by the DAO so it can only be
    /// installed once the Safe exists.
    AnnualCappedInflation { first_mint_delay_seconds: u64 },
}

impl MintAuthorization {
    /// Artifact of the plug-in the token is constructed with.
    pub fn constructor_artifact(&self) -> &'static str {
        match self {
            MintAuthorization::NoMint => "NoMint",
            MintAuthorization::UnlimitedMint => "UnlimitedMint",
            // Installed during finalization; minting stays closed until then.
            MintAuthorization::AnnualCappedInflation { .. } => "NoMint",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaoConfig {
    pub name: String,
    pub token_name: String,
    pub token_symbol: String,
    /// Whole tokens, 18 decimals.
    pub initial_supply: String,
    /// Defaults to the moment the lock release is deployed.
    #[serde(default)]
    pub unlock_start_timestamp: Option<u64>,
    pub unlock_duration_seconds: u64,
    pub snapshot_ens: String,
    pub voting_period_blocks: u32,
    /// Denominator is 1,000,000.
    pub quorum_basis_numerator: u64,
    /// Denominator is 1,000,000.
    pub voting_basis_numerator: u64,
    #[serde(default)]
    pub proposal_required_weight: u64,
    pub time_lock_period_blocks: u32,
    pub execution_period_blocks: u32,
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
    #[serde(default)]
    pub mint_authorization: MintAuthorization,
}

impl DaoConfig {
    pub fn initial_supply_wei(&self) -> Result<U256, DaoError> {
        parse_ether(&self.initial_supply).map_err(|e| {
            DaoError::InvalidConfig(format!(
                "initial_supply `{}`: {}",
                self.initial_supply, e
            ))
        })
    }

    pub fn unlock_start(&self) -> u64 {
        self.unlock_start_timestamp.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        })
    }

    pub fn validate(&self) -> Result<(), DaoError> {
        if self.name.is_empty() {
            return Err(DaoError::InvalidConfig("name is empty".to_string()));
        }
        if self.quorum_basis_numerator > 1_000_000 || self.voting_basis_numerator > 1_000_000 {
            return Err(DaoError::InvalidConfig(
                "basis numerators are out of 1,000,000".to_string(),
            ));
        }
        let supply = self.initial_supply_wei()?;
        let locked = super::beneficiary::total_locked(&self.beneficiaries);
        if locked > supply {
            return Err(DaoError::InvalidConfig(format!(
                "beneficiaries lock {} wei but initial supply is {} wei",
                locked, supply
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DaoConfig {
        toml::from_str(
            r#"
            name = "Decent DAO"
            token_name = "Decent"
            token_symbol = "DCNT"
            initial_supply = "100"
            unlock_duration_seconds = 31536000
            snapshot_ens = "decent-dao.eth"
            voting_period_blocks = 5
            quorum_basis_numerator = 4
            voting_basis_numerator = 500000
            time_lock_period_blocks = 0
            execution_period_blocks = 86400

            [mint_authorization]
            kind = "annual_capped_inflation"
            first_mint_delay_seconds = 100

            [[beneficiaries]]
            address = "0x629750317d320B8bB4d48D345A6d699Cc855c4a6"
            locked_amount = "5"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_from_toml() {
        let config = sample();
        assert_eq!(config.proposal_required_weight, 0);
        assert_eq!(config.beneficiaries.len(), 1);
        assert_eq!(
            config.mint_authorization,
            MintAuthorization::AnnualCappedInflation {
                first_mint_delay_seconds: 100
            }
        );
        assert_eq!(config.mint_authorization.constructor_artifact(), "NoMint");
        assert_eq!(
            config.initial_supply_wei().unwrap(),
            U256::from(100u64) * U256::from(10u64).pow(U256::from(18))
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_overlocked_supply() {
        let mut config = sample();
        config.initial_supply = "1".to_string();
        assert!(matches!(
            config.validate(),
            Err(DaoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_explicit_unlock_start_wins() {
        let mut config = sample();
        config.unlock_start_timestamp = Some(1_700_000_000);
        assert_eq!(config.unlock_start(), 1_700_000_000);
    }
}
