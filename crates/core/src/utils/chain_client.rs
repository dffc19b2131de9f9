use alloy::contract::RawCallBuilder;
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder as _};
use alloy::primitives::{Address, B256, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::{Result, eyre};
use log::{debug, info};
use std::future::Future;
use std::time::Duration;

/// Everything the deployment flow needs from a node. Writes wait for the
/// receipt before returning.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Account that signs and pays for every write.
    fn sender(&self) -> Address;

    async fn deploy(&self, init_code: Bytes) -> Result<Address>;

    async fn send(&self, to: Address, data: Bytes) -> Result<B256>;

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    async fn code_at(&self, address: Address) -> Result<Bytes>;
}

pub const MAX_RETRIES: u32 = 10;
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

fn is_rate_limited(message: &str) -> bool {
    message.contains("429") || message.contains("quota")
}

/// Runs `request` until it succeeds, fails with something other than a rate
/// limit error, or `max_retries` attempts were made.
pub async fn retry_rate_limited<T, E, F, Fut>(
    max_retries: u32,
    delay: Duration,
    mut request: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut attempts = 0;

    while attempts < max_retries {
        match request().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !is_rate_limited(&e.to_string()) {
                    return Err(e.into());
                }

                info!("Rate limit error: {}", e);
                attempts += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(eyre!("Failed to make RPC call after {} attempts", max_retries))
}

pub struct RpcChainClient<P> {
    provider: P,
    sender: Address,
}

impl<P> RpcChainClient<P>
where
    P: Provider + Send + Sync,
{
    pub fn new(provider: P, sender: Address) -> Self {
        Self { provider, sender }
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<(B256, Option<Address>)> {
        let pending = self.provider.send_transaction(tx).await?;
        debug!("Submitted transaction {}", pending.tx_hash());
        let receipt = pending.get_receipt().await?;

        if !receipt.status() {
            return Err(eyre!("Transaction {} reverted", receipt.transaction_hash));
        }
        info!(
            "Transaction {} confirmed in block {:?}",
            receipt.transaction_hash, receipt.block_number
        );
        Ok((receipt.transaction_hash, receipt.contract_address))
    }
}

/// Connects to `rpc_url` with a provider that signs locally with `signer`.
pub async fn connect(
    rpc_url: String,
    signer: PrivateKeySigner,
) -> Result<RpcChainClient<impl Provider + Send + Sync + 'static>> {
    let sender = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_builtin(&rpc_url)
        .await?;
    debug!("Connected to {} as {}", rpc_url, sender);
    Ok(RpcChainClient::new(provider, sender))
}

#[async_trait]
impl<P> ChainClient for RpcChainClient<P>
where
    P: Provider + Send + Sync,
{
    fn sender(&self) -> Address {
        self.sender
    }

    async fn deploy(&self, init_code: Bytes) -> Result<Address> {
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_deploy_code(init_code);
        let (hash, contract_address) = self.submit(tx).await?;
        contract_address.ok_or_else(|| eyre!("No contract address in receipt of {}", hash))
    }

    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_to(to)
            .with_input(data);
        let (hash, _) = self.submit(tx).await?;
        Ok(hash)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let provider = &self.provider;
        let data = &data;
        retry_rate_limited(MAX_RETRIES, RETRY_DELAY, move || async move {
            RawCallBuilder::<(), _, Ethereum>::new_raw(provider, data.clone())
                .to(to)
                .call()
                .await
        })
        .await
    }

    async fn code_at(&self, address: Address) -> Result<Bytes> {
        let provider = &self.provider;
        retry_rate_limited(MAX_RETRIES, RETRY_DELAY, move || async move {
            provider.get_code_at(address).await
        })
        .await
    }
}
