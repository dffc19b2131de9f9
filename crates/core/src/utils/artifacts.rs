use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Bytes;
use eyre::{Result, WrapErr, eyre};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Compiled contracts, one `<Name>.json` per contract. Both the hardhat layout
/// (`"bytecode": "0x.."`) and the foundry layout (`"bytecode": {"object": "0x.."}`)
/// are understood.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn bytecode(&self, name: &str) -> Result<Bytes> {
        let path = self.dir.join(format!("{}.json", name));
        debug!("Loading artifact {}", path.display());
        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read artifact {}", path.display()))?;
        let artifact: Value = serde_json::from_str(&content)?;

        let bytecode = match artifact.get("bytecode") {
            Some(Value::String(code)) => code.as_str(),
            Some(Value::Object(obj)) => obj
                .get("object")
                .and_then(|v| v.as_str())
                .ok_or_else(|| eyre!("Artifact {} has no bytecode object", name))?,
            _ => return Err(eyre!("Artifact {} has no bytecode", name)),
        };

        let bytecode: Bytes = bytecode.parse()?;
        if bytecode.is_empty() {
            return Err(eyre!("Artifact {} is not deployable (empty bytecode)", name));
        }
        Ok(bytecode)
    }

    /// Creation code of `name` followed by its ABI encoded constructor arguments.
    pub fn init_code(&self, name: &str, constructor_args: Vec<DynSolValue>) -> Result<Bytes> {
        let mut code = self.bytecode(name)?.to_vec();
        if !constructor_args.is_empty() {
            code.extend_from_slice(&DynSolValue::Tuple(constructor_args).abi_encode_params());
        }
        Ok(code.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{U256, address};

    fn store_with(files: &[(&str, &str)]) -> ArtifactStore {
        let dir = std::env::temp_dir().join(format!("dao-artifacts-{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(format!("{}.json", name)), content).unwrap();
        }
        ArtifactStore::new(dir)
    }

    #[test]
    fn test_reads_both_layouts() {
        let store = store_with(&[
            ("NoMint", r#"{"contractName":"NoMint","bytecode":"0x6080"}"#),
            ("UnlimitedMint", r#"{"bytecode":{"object":"0x6001"}}"#),
        ]);
        assert_eq!(store.bytecode("NoMint").unwrap().to_vec(), vec![0x60, 0x80]);
        assert_eq!(store.bytecode("UnlimitedMint").unwrap().to_vec(), vec![0x60, 0x01]);
        assert!(store.bytecode("Missing").is_err());
    }

    #[test]
    fn test_rejects_interfaces() {
        let store = store_with(&[("IVotes", r#"{"bytecode":"0x"}"#)]);
        assert!(store.bytecode("IVotes").is_err());
    }

    #[test]
    fn test_init_code_appends_constructor_args() {
        let store = store_with(&[("LockRelease", r#"{"bytecode":"0x6080"}"#)]);
        let token = address!("0x1111111111111111111111111111111111111111");
        let code = store
            .init_code(
                "LockRelease",
                vec![
                    DynSolValue::Address(token),
                    DynSolValue::Uint(U256::from(7), 64),
                ],
            )
            .unwrap();

        assert_eq!(code.len(), 2 + 64);
        assert_eq!(&code[..2], &[0x60, 0x80]);
        assert_eq!(&code[14..34], token.as_slice());
        assert_eq!(code[65], 7);
    }
}
