use chainfundhub_deploy::{deploy_suite, DeployConfig, DeploymentManifest, EthersClient};
use eyre::WrapErr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chainfundhub_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(error) = run().await {
        eprintln!("{:?}", error);
        std::process::exit(1);
    }
}

async fn run() -> eyre::Result<()> {
    let config = DeployConfig::from_env().wrap_err("loading configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let client = EthersClient::connect(&config)
        .await
        .wrap_err_with(|| format!("connecting to {}", config.rpc_url))?;

    let report = deploy_suite(&client, std::io::stdout()).await?;

    if let Some(path) = &config.manifest_path {
        DeploymentManifest::new(client.chain_id(), client.deployer(), &report)
            .write(path)
            .wrap_err("writing deployment manifest")?;
    }
    Ok(())
}
