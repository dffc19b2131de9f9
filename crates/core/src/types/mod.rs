pub mod beneficiary;
pub mod config_wrapper;
pub mod dao_config;
pub mod error;
pub mod transaction;
