use alloy_primitives::{Address, FixedBytes, TxHash};
use serde::Serialize;
use std::fmt;

pub mod events;
pub mod errors;
pub mod interfaces;

/// Access-control role identifier, as returned by `CORE_ROLE()`.
pub type RoleId = FixedBytes<32>;

/// The four contracts of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContractKind {
    Campaign,
    Finance,
    User,
    Core,
}

impl ContractKind {
    /// Order in which the contracts are deployed.
    pub const DEPLOY_ORDER: [ContractKind; 4] = [
        ContractKind::Campaign,
        ContractKind::Finance,
        ContractKind::User,
        ContractKind::Core,
    ];

    /// Managers that receive `CORE_ROLE`, in grant order.
    pub const MANAGERS: [ContractKind; 3] = [
        ContractKind::Campaign,
        ContractKind::Finance,
        ContractKind::User,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContractKind::Campaign => "Campaign",
            ContractKind::Finance => "Finance",
            ContractKind::User => "User",
            ContractKind::Core => "Core",
        }
    }

    /// Name of the compiled artifact the contract is deployed from.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            ContractKind::Campaign => "ChainFundHubCampaign",
            ContractKind::Finance => "ChainFundHubFinance",
            ContractKind::User => "ChainFundHubUser",
            ContractKind::Core => "ChainFundHubCore",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A manager reference held by the Core contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ManagerSlot {
    Finance,
    Campaign,
    User,
}

impl ManagerSlot {
    /// Order in which Core is configured.
    pub const CONFIGURE_ORDER: [ManagerSlot; 3] = [
        ManagerSlot::Finance,
        ManagerSlot::Campaign,
        ManagerSlot::User,
    ];

    pub fn manager(&self) -> ContractKind {
        match self {
            ManagerSlot::Finance => ContractKind::Finance,
            ManagerSlot::Campaign => ContractKind::Campaign,
            ManagerSlot::User => ContractKind::User,
        }
    }

    /// Name of the Core setter for this slot.
    pub fn setter(&self) -> &'static str {
        match self {
            ManagerSlot::Finance => "setFinanceManager",
            ManagerSlot::Campaign => "setCampaignManager",
            ManagerSlot::User => "setUserManager",
        }
    }
}

/// Result of a confirmed creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Addresses of the full suite. Only built once all four deployments
/// have been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub campaign: Address,
    pub finance: Address,
    pub user: Address,
    pub core: Address,
}

impl Deployment {
    pub fn address_of(&self, kind: ContractKind) -> Address {
        match kind {
            ContractKind::Campaign => self.campaign,
            ContractKind::Finance => self.finance,
            ContractKind::User => self.user,
            ContractKind::Core => self.core,
        }
    }
}
