use alloy_primitives::{Address, Bytes, TxHash};
use alloy_sol_types::sol;
use async_trait::async_trait;

use super::{errors::Result, DeployedContract};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IChainFundHubCore {
        function setFinanceManager(address financeManager) external;
        function setCampaignManager(address campaignManager) external;
        function setUserManager(address userManager) external;
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IChainFundHubManager {
        function CORE_ROLE() external view returns (bytes32);
        function grantRole(bytes32 role, address account) external;
    }
}

/// Access to a chain: contract creation, read-only calls and signed
/// transactions. Every method returns only once the operation is final.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Deploy the named artifact and wait for its creation receipt.
    async fn deploy(&self, artifact: &str) -> Result<DeployedContract>;

    /// Read-only call against `to`.
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes>;

    /// Send a transaction to `to` and wait for it to be confirmed.
    async fn send(&self, to: Address, calldata: Bytes) -> Result<TxHash>;
}
