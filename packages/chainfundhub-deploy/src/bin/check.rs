use chainfundhub_deploy::{ArtifactStore, ContractKind};
use std::path::PathBuf;

fn main() {
    dotenvy::dotenv().ok();
    let root = std::env::var("ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(chainfundhub_deploy::config::DEFAULT_ARTIFACTS_DIR));

    println!("Checking ChainFundHub artifacts in {}...", root.display());

    let store = ArtifactStore::new(root);
    let mut failures = 0;
    for kind in ContractKind::DEPLOY_ORDER {
        let checked = store
            .load(kind.artifact_name())
            .and_then(|artifact| artifact.creation_code());
        match checked {
            Ok(code) => println!("✅ {} ({}): {} bytes", kind, kind.artifact_name(), code.len()),
            Err(e) => {
                println!("❌ {} ({}): {}", kind, kind.artifact_name(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        println!(
            "\n{} of {} contracts cannot be deployed. Run `npx hardhat compile` first.",
            failures,
            ContractKind::DEPLOY_ORDER.len()
        );
        std::process::exit(1);
    }
    println!("\n🎉 All contracts are ready for deployment!");
}
