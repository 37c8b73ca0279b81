pub mod types;
pub mod config;
pub mod client;
pub mod deploy;

// Re-export the main entry points
pub use client::{ArtifactStore, EthersClient};
pub use config::DeployConfig;
pub use deploy::{deploy_suite, DeploymentManifest, DeploymentReport, Orchestrator};
pub use types::{
    errors::{DeployError, Step, StepFailure},
    interfaces::ChainClient,
    ContractKind, DeployedContract, Deployment, ManagerSlot, RoleId,
};
