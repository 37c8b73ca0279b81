pub mod artifacts;
pub mod ethers_client;

pub use artifacts::{Artifact, ArtifactStore};
pub use ethers_client::EthersClient;
