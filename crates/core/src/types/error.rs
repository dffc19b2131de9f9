use thiserror::Error;

/// Errors raised by the pure parts of the deployment pipeline (prediction, encoding,
/// plan building). Orchestration wraps these into `eyre::Report`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DaoError {
    #[error("invalid address: expected 20 bytes, got {0}")]
    InvalidAddress(usize),

    #[error("unknown method `{method}`")]
    UnknownMethod { method: String },

    #[error("failed to encode arguments for `{method}`: {reason}")]
    ArgumentEncoding { method: String, reason: String },

    #[error("invalid interface description: {0}")]
    InvalidInterface(String),

    #[error("{0} address not set")]
    AddressNotSet(&'static str),

    #[error("builder cannot move from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("{name} contract not found for network {network_id}")]
    MissingDeployment { name: String, network_id: u32 },

    #[error("malformed multisend payload: {0}")]
    MalformedBatch(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
