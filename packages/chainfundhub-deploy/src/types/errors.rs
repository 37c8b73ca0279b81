use std::fmt;

use super::{ContractKind, ManagerSlot};

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("no contract address in receipt: {0}")]
    MissingContractAddress(String),

    #[error("confirmation timed out: {0}")]
    Timeout(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("output error: {0}")]
    Output(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, DeployError>;

impl From<alloy_sol_types::Error> for DeployError {
    fn from(err: alloy_sol_types::Error) -> Self {
        DeployError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(err: serde_json::Error) -> Self {
        DeployError::Output(err.to_string())
    }
}

pub fn require_valid_artifact(condition: bool, message: &str) -> Result<()> {
    if !condition {
        Err(DeployError::InvalidArtifact(message.to_string()))
    } else {
        Ok(())
    }
}

pub fn require_valid_config(condition: bool, message: &str) -> Result<()> {
    if !condition {
        Err(DeployError::Config(message.to_string()))
    } else {
        Ok(())
    }
}

/// One stage of the deployment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Deploy(ContractKind),
    Configure(ManagerSlot),
    FetchRole(ContractKind),
    GrantRole(ContractKind),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Deploy(kind) => write!(f, "deploy {} ({})", kind, kind.artifact_name()),
            Step::Configure(slot) => write!(f, "Core.{}", slot.setter()),
            Step::FetchRole(kind) => write!(f, "{}.CORE_ROLE", kind),
            Step::GrantRole(kind) => write!(f, "{}.grantRole", kind),
        }
    }
}

/// The pipeline stopped at `step`; nothing after it was attempted.
#[derive(Debug, thiserror::Error)]
#[error("{step} did not complete: {source}")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub source: DeployError,
}

impl StepFailure {
    pub fn new(step: Step, source: DeployError) -> Self {
        Self { step, source }
    }
}
