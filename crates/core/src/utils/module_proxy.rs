use crate::types::error::DaoError;
use alloy::primitives::{Bytes, hex};

// Zodiac ModuleProxyFactory creation code around the master copy address.
const PROXY_PREFIX: [u8; 19] = hex!("602d8060093d393df3363d3d373d3d3d363d73");
const PROXY_SUFFIX: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

pub const MODULE_PROXY_BYTECODE_LEN: usize = PROXY_PREFIX.len() + 20 + PROXY_SUFFIX.len();

/// Minimal proxy init code deployed by the module proxy factory for `master_copy`.
pub fn module_proxy_bytecode(master_copy: &[u8]) -> Result<Bytes, DaoError> {
    if master_copy.len() != 20 {
        return Err(DaoError::InvalidAddress(master_copy.len()));
    }

    let mut bytecode = Vec::with_capacity(MODULE_PROXY_BYTECODE_LEN);
    bytecode.extend_from_slice(&PROXY_PREFIX);
    bytecode.extend_from_slice(master_copy);
    bytecode.extend_from_slice(&PROXY_SUFFIX);
    Ok(Bytes::from(bytecode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};

    #[test]
    fn test_bytecode_layout() {
        let master_copy = address!("0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552");
        let bytecode = module_proxy_bytecode(master_copy.as_slice()).unwrap();

        // 9 bytes of init code followed by the 45 byte runtime stub.
        assert_eq!(bytecode.len(), MODULE_PROXY_BYTECODE_LEN);
        assert_eq!(bytecode.len(), 54);
        assert_eq!(
            bytecode,
            bytes!(
                "0x602d8060093d393df3363d3d373d3d3d363d73d9db270c1b5e3bd161e8c8503c55ceabee7095525af43d82803e903d91602b57fd5bf3"
            )
        );
        assert_eq!(&bytecode[19..39], master_copy.as_slice());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            module_proxy_bytecode(&[0u8; 19]),
            Err(DaoError::InvalidAddress(19))
        );
        assert_eq!(
            module_proxy_bytecode(&[0u8; 32]),
            Err(DaoError::InvalidAddress(32))
        );
    }
}
