pub mod dao_orchestrator;
pub mod finalize;
pub mod master_copies;
pub mod token_deploy;
