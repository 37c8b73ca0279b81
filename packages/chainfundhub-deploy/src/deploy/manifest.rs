use alloy_primitives::Address;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::orchestrator::DeploymentReport;
use crate::types::{errors::Result, events::StepEvent, ContractKind};

/// JSON record of a finished deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentManifest {
    pub chain_id: u64,
    pub deployer: Address,
    pub contracts: BTreeMap<String, Address>,
    pub steps: Vec<StepEvent>,
}

impl DeploymentManifest {
    pub fn new(chain_id: u64, deployer: Address, report: &DeploymentReport) -> Self {
        let contracts = ContractKind::DEPLOY_ORDER
            .iter()
            .map(|kind| {
                (
                    kind.artifact_name().to_string(),
                    report.deployment.address_of(*kind),
                )
            })
            .collect();

        Self {
            chain_id,
            deployer,
            contracts,
            steps: report.events.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the manifest, creating missing parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()? + "\n")?;
        tracing::info!(path = %path.display(), "deployment manifest written");
        Ok(())
    }
}
