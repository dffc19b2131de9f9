use alloy::primitives::{Address, Bytes, U256};
use clap::{Parser, Subcommand};
use dao_core::{
    create_dao, pack_transactions_file,
    utils::create2::{predict_module_address, predict_safe_address},
};
use eyre::Result;
use log::info;
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the token, lock release and DAO described in the config
    Create {
        /// Path to the config file, defaults to config.toml
        #[arg(long = "config", short = 'c')]
        config_path: Option<String>,

        /// Network ID
        #[arg(long = "network", short = 'n')]
        network_id: u32,
    },
    /// Predict the address of a module deployed through the module proxy factory
    PredictModule {
        /// Module proxy factory address
        #[arg(long = "factory", short = 'f')]
        factory: String,

        /// Master copy address
        #[arg(long = "master-copy", short = 'm')]
        master_copy: String,

        /// setUp calldata (hex)
        #[arg(long = "initializer", short = 'i')]
        initializer: String,

        /// Salt nonce
        #[arg(long = "nonce")]
        nonce: String,
    },
    /// Predict the address of a Safe created with createProxyWithNonce
    PredictSafe {
        /// Safe proxy factory address
        #[arg(long = "factory", short = 'f')]
        factory: String,

        /// Safe singleton address
        #[arg(long = "singleton", short = 's')]
        singleton: String,

        /// proxyCreationCode of the factory (hex)
        #[arg(long = "creation-code")]
        creation_code: String,

        /// setup calldata (hex)
        #[arg(long = "initializer", short = 'i')]
        initializer: String,

        /// Salt nonce
        #[arg(long = "nonce")]
        nonce: String,
    },
    /// Encode a JSON list of transactions into multiSend calldata
    Pack {
        /// Path to the transactions JSON file
        #[arg(long = "tx", short = 't')]
        tx_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Create {
            config_path,
            network_id,
        } => {
            info!("Creating DAO on network {}", network_id);
            let deployment = create_dao(config_path.as_deref(), *network_id).await?;

            fs::create_dir_all("output")?;
            let json = serde_json::to_string_pretty(&deployment)?;
            fs::write("output/dao_deployment.json", json)?;

            println!("DAO Safe: {}", deployment.safe);
            println!("Azorius: {}", deployment.azorius);
            println!("Strategy: {}", deployment.strategy);
            println!("Token: {}", deployment.token.token);
            println!("Lock release: {}", deployment.token.lock_release);
            println!("Batch transaction: {}", deployment.batch_tx);
            if let Some(error) = &deployment.verification.error {
                println!("Warning: could not read the Safe back: {}", error);
            } else if !deployment.verification.is_consistent(deployment.azorius) {
                println!("Warning: Safe owners or modules differ from the plan");
            }
            println!("Deployment written to output/dao_deployment.json");
        }
        Commands::PredictModule {
            factory,
            master_copy,
            initializer,
            nonce,
        } => {
            let factory: Address = factory.parse()?;
            let master_copy: Address = master_copy.parse()?;
            let initializer: Bytes = initializer.parse()?;
            let nonce: U256 = nonce.parse()?;

            let address = predict_module_address(factory, master_copy, &initializer, nonce)?;
            println!("{}", address);
        }
        Commands::PredictSafe {
            factory,
            singleton,
            creation_code,
            initializer,
            nonce,
        } => {
            let factory: Address = factory.parse()?;
            let singleton: Address = singleton.parse()?;
            let creation_code: Bytes = creation_code.parse()?;
            let initializer: Bytes = initializer.parse()?;
            let nonce: U256 = nonce.parse()?;

            let address =
                predict_safe_address(factory, &creation_code, singleton, &initializer, nonce);
            println!("{}", address);
        }
        Commands::Pack { tx_path } => {
            let calldata = pack_transactions_file(tx_path)?;
            println!("{}", calldata);
        }
    }

    Ok(())
}
