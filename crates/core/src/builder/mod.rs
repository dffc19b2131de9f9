pub mod azorius_tx_builder;
pub mod deployment_plan;
pub mod external_contracts;
pub mod safe_deployment;
pub mod state;
