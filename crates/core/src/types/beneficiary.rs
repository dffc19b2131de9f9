use alloy::primitives::{Address, U256, utils::parse_ether};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeneficiaryType {
    #[default]
    Purchaser,
    Investor,
}

/// One entry of the lock release schedule. `locked_amount` is in wei; the config
/// file states it in whole tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(rename = "type", default)]
    pub kind: BeneficiaryType,
    pub address: Address,
    #[serde(deserialize_with = "deserialize_token_amount")]
    pub locked_amount: U256,
}

impl Beneficiary {
    pub fn new(kind: BeneficiaryType, address: Address, locked_amount: U256) -> Self {
        Self {
            kind,
            address,
            locked_amount,
        }
    }
}

fn deserialize_token_amount<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_ether(&raw).map_err(serde::de::Error::custom)
}

/// Collapses entries sharing an address into one, summing the locked amounts.
/// First-seen order is preserved and the first entry's type wins.
pub fn merge_beneficiaries(beneficiaries: &[Beneficiary]) -> Vec<Beneficiary> {
    let mut merged: Vec<Beneficiary> = Vec::with_capacity(beneficiaries.len());
    for beneficiary in beneficiaries {
        match merged.iter_mut().find(|b| b.address == beneficiary.address) {
            Some(existing) => existing.locked_amount += beneficiary.locked_amount,
            None => merged.push(beneficiary.clone()),
        }
    }
    merged
}

pub fn total_locked(beneficiaries: &[Beneficiary]) -> U256 {
    beneficiaries
        .iter()
        .fold(U256::ZERO, |acc, b| acc + b.locked_amount)
}

pub fn total_locked_for(beneficiaries: &[Beneficiary], kind: BeneficiaryType) -> U256 {
    beneficiaries
        .iter()
        .filter(|b| b.kind == kind)
        .fold(U256::ZERO, |acc, b| acc + b.locked_amount)
}
