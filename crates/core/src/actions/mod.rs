pub mod call_encoder;
pub mod contract_interface;
pub mod exec_transaction;
pub mod multisend_utils;
