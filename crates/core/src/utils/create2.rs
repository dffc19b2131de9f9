//! CREATE2 address derivation, reproduced byte for byte so that addresses of
//! contracts deployed later in the same batch can be referenced up front.

use super::module_proxy::module_proxy_bytecode;
use crate::types::error::DaoError;
use alloy::primitives::{Address, B256, U256, keccak256};

/// `keccak256(0xff ++ factory ++ salt ++ code_hash)[12:]`
pub fn predict(factory: Address, salt: B256, code_hash: B256) -> Address {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(factory.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..85].copy_from_slice(code_hash.as_slice());
    Address::from_slice(&keccak256(preimage)[12..])
}

/// Salt used by both the module proxy factory and the Safe proxy factory:
/// `keccak256(keccak256(initializer) ++ uint256(nonce))`.
pub fn generate_salt(initializer: &[u8], nonce: U256) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(keccak256(initializer).as_slice());
    preimage[32..].copy_from_slice(&nonce.to_be_bytes::<32>());
    keccak256(preimage)
}

/// Init code hash of a Safe proxy: the factory appends the singleton, padded to a
/// full word, to `proxyCreationCode`.
pub fn safe_proxy_code_hash(proxy_creation_code: &[u8], singleton: Address) -> B256 {
    let mut init_code = Vec::with_capacity(proxy_creation_code.len() + 32);
    init_code.extend_from_slice(proxy_creation_code);
    init_code.extend_from_slice(singleton.into_word().as_slice());
    keccak256(init_code)
}

pub fn module_code_hash(master_copy: Address) -> Result<B256, DaoError> {
    Ok(keccak256(module_proxy_bytecode(master_copy.as_slice())?))
}

/// Address `ModuleProxyFactory.deployModule(master_copy, initializer, nonce)` deploys to.
pub fn predict_module_address(
    factory: Address,
    master_copy: Address,
    initializer: &[u8],
    nonce: U256,
) -> Result<Address, DaoError> {
    Ok(predict(
        factory,
        generate_salt(initializer, nonce),
        module_code_hash(master_copy)?,
    ))
}

/// Address `GnosisSafeProxyFactory.createProxyWithNonce(singleton, initializer, nonce)`
/// deploys to.
pub fn predict_safe_address(
    factory: Address,
    proxy_creation_code: &[u8],
    singleton: Address,
    initializer: &[u8],
    nonce: U256,
) -> Address {
    predict(
        factory,
        generate_salt(initializer, nonce),
        safe_proxy_code_hash(proxy_creation_code, singleton),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256, bytes, hex};

    // EIP-1014 example vectors.
    #[test]
    fn test_eip1014_vectors() {
        assert_eq!(
            predict(Address::ZERO, B256::ZERO, keccak256(hex!("00"))),
            address!("0x4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38")
        );
        assert_eq!(
            predict(
                address!("0xdeadbeef00000000000000000000000000000000"),
                B256::ZERO,
                keccak256(hex!("00"))
            ),
            address!("0xB928f69Bb1D91Cd65274e3c79d8986362984fDA3")
        );
        assert_eq!(
            predict(
                address!("0x00000000000000000000000000000000deadbeef"),
                b256!("0x00000000000000000000000000000000000000000000000000000000cafebabe"),
                keccak256(hex!("deadbeef"))
            ),
            address!("0x60f3f640a8508fC6a86d45DF051962668E1e8AC7")
        );
    }

    #[test]
    fn test_predict_is_deterministic_and_matches_alloy() {
        let factory = address!("0x000000000000aDdB49795b0f9bA5BC298cDda236");
        let salt = b256!("0x856d90216588f9ffc124d1480a440e1c012c7a816952bc968d737bae5d4e139c");
        let code_hash = keccak256(b"code");

        let first = predict(factory, salt, code_hash);
        let other = predict(factory, B256::ZERO, code_hash);
        let second = predict(factory, salt, code_hash);

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(first, factory.create2(salt, code_hash));
    }

    #[test]
    fn test_generate_salt_nests_hashes() {
        let initializer = bytes!("0x2fa1d1d5");
        let nonce = U256::from(42);

        let mut expected = keccak256(&initializer).to_vec();
        expected.extend_from_slice(&nonce.to_be_bytes::<32>());
        assert_eq!(generate_salt(&initializer, nonce), keccak256(&expected));

        // Same setup data, different nonce, different address.
        let factory = address!("0x000000000000aDdB49795b0f9bA5BC298cDda236");
        let master_copy = address!("0x1111111111111111111111111111111111111111");
        assert_ne!(
            predict_module_address(factory, master_copy, &initializer, U256::from(1)).unwrap(),
            predict_module_address(factory, master_copy, &initializer, U256::from(2)).unwrap()
        );
    }

    #[test]
    fn test_module_prediction_matches_manual_composition() {
        let factory = address!("0x000000000000aDdB49795b0f9bA5BC298cDda236");
        let master_copy = address!("0xe6fdf2a8da3d10b2d5a5c2a6c1a0ee7b6a5fa6e0");
        let initializer = bytes!("0xa4f9edbf0000000000000000000000000000000000000000000000000000000000000020");
        let nonce = U256::from_be_bytes(
            b256!("0x0000000000000000000000000000000000000000000000000000000000000007").0,
        );

        let proxy = hex::decode(format!(
            "602d8060093d393df3363d3d373d3d3d363d73{}5af43d82803e903d91602b57fd5bf3",
            hex::encode(master_copy)
        ))
        .unwrap();
        let mut salt_preimage = keccak256(&initializer).to_vec();
        salt_preimage.extend_from_slice(&nonce.to_be_bytes::<32>());

        let mut preimage = vec![0xffu8];
        preimage.extend_from_slice(factory.as_slice());
        preimage.extend_from_slice(keccak256(&salt_preimage).as_slice());
        preimage.extend_from_slice(keccak256(&proxy).as_slice());
        let manual = Address::from_slice(&keccak256(&preimage)[12..]);

        assert_eq!(
            predict_module_address(factory, master_copy, &initializer, nonce).unwrap(),
            manual
        );
    }

    #[test]
    fn test_safe_code_hash_pads_singleton_to_word() {
        let creation_code = bytes!("0x608060405234801561001057600080fd5b50");
        let singleton = address!("0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552");

        let mut packed = creation_code.to_vec();
        packed.extend_from_slice(&[0u8; 12]);
        packed.extend_from_slice(singleton.as_slice());

        assert_eq!(
            safe_proxy_code_hash(&creation_code, singleton),
            keccak256(&packed)
        );
        assert_ne!(
            safe_proxy_code_hash(&creation_code, singleton),
            keccak256(&creation_code)
        );
    }
}
