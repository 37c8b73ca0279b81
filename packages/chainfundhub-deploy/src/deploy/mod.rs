pub mod manifest;
pub mod orchestrator;

pub use manifest::DeploymentManifest;
pub use orchestrator::{deploy_suite, DeploymentReport, Orchestrator};
