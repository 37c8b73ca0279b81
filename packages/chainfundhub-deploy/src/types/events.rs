use alloy_primitives::{Address, TxHash};
use serde::Serialize;
use std::fmt;

use super::{ContractKind, ManagerSlot, RoleId};

/// A confirmed step of a deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    Deployed {
        contract: ContractKind,
        address: Address,
        tx_hash: TxHash,
    },
    ManagerConfigured {
        slot: ManagerSlot,
        core: Address,
        manager: Address,
        tx_hash: TxHash,
    },
    RoleGranted {
        contract: ContractKind,
        target: Address,
        role: RoleId,
        grantee: Address,
        tx_hash: TxHash,
    },
}

impl StepEvent {
    pub fn tx_hash(&self) -> TxHash {
        match self {
            StepEvent::Deployed { tx_hash, .. }
            | StepEvent::ManagerConfigured { tx_hash, .. }
            | StepEvent::RoleGranted { tx_hash, .. } => *tx_hash,
        }
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Deployed { contract, address, .. } => {
                write!(f, "{} deployed to: {}", contract, address)
            }
            StepEvent::ManagerConfigured { slot, core, manager, .. } => {
                write!(f, "Core {} {}({})", core, slot.setter(), manager)
            }
            StepEvent::RoleGranted { contract, role, grantee, .. } => {
                write!(f, "{} granted role {} to {}", contract, role, grantee)
            }
        }
    }
}
