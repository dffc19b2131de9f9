pub mod azorius;
pub mod dcnt_token;
pub mod module_proxy_factory;
pub mod multisend;
pub mod multisig;
pub mod registry;
pub mod safe_proxy_factory;
