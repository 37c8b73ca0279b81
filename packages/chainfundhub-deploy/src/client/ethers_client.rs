use alloy_primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use ethers::prelude::{Http, LocalWallet, Middleware, Provider, Signer, SignerMiddleware};
use ethers::types::{
    transaction::eip2718::TypedTransaction, TransactionReceipt, TransactionRequest, H160, H256,
    U64,
};
use std::sync::Arc;
use std::time::Duration;

use super::artifacts::ArtifactStore;
use crate::config::DeployConfig;
use crate::types::{
    errors::{DeployError, Result},
    interfaces::ChainClient,
    DeployedContract,
};

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// JSON-RPC client signing with a local key.
pub struct EthersClient {
    inner: Arc<SignerClient>,
    artifacts: ArtifactStore,
    confirmations: usize,
    timeout: Duration,
}

impl EthersClient {
    pub async fn connect(config: &DeployConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| DeployError::Config(format!("RPC_URL {}: {}", config.rpc_url, e)))?
            .interval(config.poll_interval);

        let wallet: LocalWallet = config
            .private_key
            .parse()
            .map_err(|e| DeployError::Config(format!("PRIVATE_KEY: {}", e)))?;

        let chain_id = match config.chain_id {
            Some(id) => id,
            None => provider
                .get_chainid()
                .await
                .map_err(|e| DeployError::Rpc(format!("eth_chainId: {}", e)))?
                .as_u64(),
        };

        let inner = SignerMiddleware::new(provider, wallet.with_chain_id(chain_id));
        tracing::info!(
            rpc = %config.rpc_url,
            chain_id,
            deployer = %to_alloy_address(inner.address()),
            "connected"
        );

        Ok(Self {
            inner: Arc::new(inner),
            artifacts: ArtifactStore::new(config.artifacts_dir.clone()),
            confirmations: config.confirmations,
            timeout: config.confirmation_timeout,
        })
    }

    pub fn deployer(&self) -> Address {
        to_alloy_address(self.inner.address())
    }

    pub fn chain_id(&self) -> u64 {
        self.inner.signer().chain_id()
    }

    async fn submit(&self, tx: TypedTransaction, what: &str) -> Result<TransactionReceipt> {
        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .map_err(|e| classify(what, e.to_string()))?;
        let tx_hash: H256 = *pending;
        tracing::debug!(what, tx = ?tx_hash, "transaction sent");

        let receipt = tokio::time::timeout(self.timeout, pending.confirmations(self.confirmations))
            .await
            .map_err(|_| {
                DeployError::Timeout(format!("{} ({:?}) after {:?}", what, tx_hash, self.timeout))
            })?
            .map_err(|e| DeployError::Rpc(format!("{} ({:?}): {}", what, tx_hash, e)))?
            .ok_or_else(|| {
                DeployError::Rpc(format!("{} ({:?}) dropped from mempool", what, tx_hash))
            })?;

        if receipt.status == Some(U64::zero()) {
            return Err(DeployError::Reverted(format!("{} ({:?})", what, tx_hash)));
        }
        tracing::debug!(
            what,
            tx = ?tx_hash,
            block = ?receipt.block_number,
            gas_used = ?receipt.gas_used,
            "transaction confirmed"
        );
        Ok(receipt)
    }
}

#[async_trait]
impl ChainClient for EthersClient {
    async fn deploy(&self, artifact: &str) -> Result<DeployedContract> {
        let code = self.artifacts.load(artifact)?.creation_code()?;
        let tx: TypedTransaction = TransactionRequest::new()
            .from(self.inner.address())
            .data(code.to_vec())
            .into();

        let receipt = self.submit(tx, artifact).await?;
        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::MissingContractAddress(format!(
                "{} ({:?})",
                artifact, receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract {
            address: to_alloy_address(address),
            tx_hash: to_alloy_hash(receipt.transaction_hash),
        })
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new()
            .to(to_ethers_address(to))
            .data(calldata.to_vec())
            .into();
        let output = self
            .inner
            .call(&tx, None)
            .await
            .map_err(|e| classify(&format!("eth_call to {}", to), e.to_string()))?;
        Ok(Bytes::from(output.to_vec()))
    }

    async fn send(&self, to: Address, calldata: Bytes) -> Result<TxHash> {
        let tx: TypedTransaction = TransactionRequest::new()
            .from(self.inner.address())
            .to(to_ethers_address(to))
            .data(calldata.to_vec())
            .into();
        let receipt = self.submit(tx, &format!("transaction to {}", to)).await?;
        Ok(to_alloy_hash(receipt.transaction_hash))
    }
}

/// Nodes report reverts found during gas estimation or `eth_call` as
/// plain RPC errors; surface them as reverts.
fn classify(what: &str, message: String) -> DeployError {
    if message.contains("revert") {
        DeployError::Reverted(format!("{}: {}", what, message))
    } else {
        DeployError::Rpc(format!("{}: {}", what, message))
    }
}

pub fn to_alloy_address(address: H160) -> Address {
    Address::from_slice(address.as_bytes())
}

pub fn to_ethers_address(address: Address) -> H160 {
    H160::from_slice(address.as_slice())
}

fn to_alloy_hash(hash: H256) -> TxHash {
    TxHash::from_slice(hash.as_bytes())
}
