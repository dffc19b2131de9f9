pub mod artifacts;
pub mod chain_client;
pub mod create2;
pub mod module_proxy;
