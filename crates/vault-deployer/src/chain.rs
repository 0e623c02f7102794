//! Boundary between the deployment steps and the blockchain, so the steps
//! can be tested without a node.

use {
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, Bytes, TxHash},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
    anyhow::{Context, Result, ensure},
    contracts::alloy::ReaperVaultv1_4,
    ethrpc::AlloyProvider,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VaultChain: Send + Sync {
    /// Returns the chain ID of the connected node.
    async fn chain_id(&self) -> Result<u64>;

    /// Sends a contract creation transaction with `code` as its input and
    /// waits until it got mined.
    ///
    /// Returns the address of the created contract.
    async fn deploy(&self, code: Bytes) -> Result<Address>;

    /// Whether the one-time initialization of `vault` already happened.
    async fn is_initialized(&self, vault: Address) -> Result<bool>;

    /// Links `strategy` to `vault` and waits until the transaction got mined.
    async fn initialize(&self, vault: Address, strategy: Address) -> Result<TxHash>;

    /// Returns the strategy `vault` is currently linked to.
    async fn strategy(&self, vault: Address) -> Result<Address>;
}

/// [`VaultChain`] backed by a node.
pub struct Onchain {
    provider: AlloyProvider,
}

impl Onchain {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }

    fn vault(&self, address: Address) -> ReaperVaultv1_4::Instance {
        ReaperVaultv1_4::Instance::new(address, self.provider.clone())
    }
}

#[async_trait::async_trait]
impl VaultChain for Onchain {
    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("could not fetch current chain id")
    }

    async fn deploy(&self, code: Bytes) -> Result<Address> {
        let tx = TransactionRequest::default().with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("failed to submit contract creation")?;
        tracing::debug!(tx = ?pending.tx_hash(), "submitted contract creation");

        let receipt = pending
            .get_receipt()
            .await
            .context("failed to await contract creation")?;
        created_contract(&receipt)
    }

    async fn is_initialized(&self, vault: Address) -> Result<bool> {
        self.vault(vault)
            .initialized()
            .call()
            .await
            .with_context(|| format!("failed to read initialization state of vault {vault}"))
    }

    async fn initialize(&self, vault: Address, strategy: Address) -> Result<TxHash> {
        let pending = self
            .vault(vault)
            .initialize(strategy)
            .send()
            .await
            .context("failed to submit initialization")?;
        tracing::debug!(tx = ?pending.tx_hash(), "submitted initialization");

        let receipt = pending
            .get_receipt()
            .await
            .context("failed to await initialization")?;
        ensure_success(&receipt, "initialization")?;
        Ok(receipt.transaction_hash)
    }

    async fn strategy(&self, vault: Address) -> Result<Address> {
        self.vault(vault)
            .strategy()
            .call()
            .await
            .with_context(|| format!("failed to read strategy of vault {vault}"))
    }
}

fn ensure_success(receipt: &TransactionReceipt, what: &str) -> Result<()> {
    ensure!(
        receipt.status(),
        "{what} {:?} reverted",
        receipt.transaction_hash
    );
    Ok(())
}

/// Address of the contract created by the transaction of `receipt`.
fn created_contract(receipt: &TransactionReceipt) -> Result<Address> {
    ensure_success(receipt, "contract creation")?;
    receipt.contract_address.with_context(|| {
        format!(
            "receipt of {:?} lacks contract address",
            receipt.transaction_hash
        )
    })
}
