use crate::types::error::DaoError;
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;

/// A contract ABI built from human readable signatures such as
/// `"function updateDAOName(string _name)"`.
#[derive(Debug, Clone)]
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    pub fn parse(signatures: &[&str]) -> Result<Self, DaoError> {
        let abi = JsonAbi::parse(signatures.iter().copied())
            .map_err(|e| DaoError::InvalidInterface(e.to_string()))?;
        Ok(Self { abi })
    }

    /// Overload of `method` taking `arity` arguments.
    fn function(&self, method: &str, arity: usize) -> Result<&Function, DaoError> {
        let overloads = self
            .abi
            .function(method)
            .ok_or_else(|| DaoError::UnknownMethod {
                method: method.to_string(),
            })?;

        overloads
            .iter()
            .find(|f| f.inputs.len() == arity)
            .ok_or_else(|| DaoError::ArgumentEncoding {
                method: method.to_string(),
                reason: format!(
                    "expected {} arguments, got {}",
                    overloads[0].inputs.len(),
                    arity
                ),
            })
    }

    /// Selector followed by the ABI encoded, type checked arguments.
    pub fn encode(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, DaoError> {
        let function = self.function(method, args.len())?;
        let data = function
            .abi_encode_input(args)
            .map_err(|e| DaoError::ArgumentEncoding {
                method: method.to_string(),
                reason: e.to_string(),
            })?;
        Ok(data.into())
    }
}
