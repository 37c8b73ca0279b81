use alloy_primitives::Bytes;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::types::errors::{require_valid_artifact, DeployError, Result};

/// Hardhat compiler output for a single contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub bytecode: String,
}

impl Artifact {
    /// Creation bytecode, ready to be sent as a deployment payload.
    pub fn creation_code(&self) -> Result<Bytes> {
        let hex_code = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        require_valid_artifact(
            !hex_code.is_empty(),
            &format!("{} has no bytecode (abstract contract or interface?)", self.contract_name),
        )?;
        require_valid_artifact(
            !hex_code.contains("__$"),
            &format!("{} has unlinked library references", self.contract_name),
        )?;

        let code = hex::decode(hex_code).map_err(|e| {
            DeployError::InvalidArtifact(format!("{}: bad bytecode hex: {}", self.contract_name, e))
        })?;
        Ok(Bytes::from(code))
    }
}

/// Resolves contract names to artifacts below a Hardhat `artifacts/` root.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, name: &str) -> Result<Artifact> {
        let path = self.locate(name)?;
        tracing::debug!(contract = name, path = %path.display(), "loading artifact");

        let raw = fs::read_to_string(&path)
            .map_err(|e| DeployError::InvalidArtifact(format!("{}: {}", path.display(), e)))?;
        let artifact: Artifact = serde_json::from_str(&raw)
            .map_err(|e| DeployError::InvalidArtifact(format!("{}: {}", path.display(), e)))?;

        require_valid_artifact(
            artifact.contract_name == name,
            &format!("{} declares contract {}", path.display(), artifact.contract_name),
        )?;
        Ok(artifact)
    }

    /// Path of the single `<name>.json` below the root. A name matching
    /// more than one artifact is rejected rather than guessed.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        if !self.root.is_dir() {
            return Err(DeployError::ArtifactNotFound(format!(
                "{} (artifacts directory {} does not exist)",
                name,
                self.root.display()
            )));
        }

        let file_name = format!("{}.json", name);
        let mut candidates = Vec::new();
        // build-info holds full compiler inputs, never artifacts
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == "build-info"));
        for entry in walker {
            let entry =
                entry.map_err(|e| DeployError::ArtifactNotFound(format!("{}: {}", name, e)))?;
            if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
                candidates.push(entry.into_path());
            }
        }

        match candidates.len() {
            0 => Err(DeployError::ArtifactNotFound(format!(
                "{} under {}",
                name,
                self.root.display()
            ))),
            1 => Ok(candidates.remove(0)),
            _ => {
                let paths: Vec<String> =
                    candidates.iter().map(|p| p.display().to_string()).collect();
                Err(DeployError::InvalidArtifact(format!(
                    "{} matches multiple artifacts: {}",
                    name,
                    paths.join(", ")
                )))
            }
        }
    }
}
