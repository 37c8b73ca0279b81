use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use std::io::Write;

use crate::types::{
    errors::{DeployError, Step, StepFailure},
    events::StepEvent,
    interfaces::{ChainClient, IChainFundHubCore, IChainFundHubManager},
    ContractKind, Deployment, ManagerSlot, RoleId,
};

/// Everything a successful run produced, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub deployment: Deployment,
    pub events: Vec<StepEvent>,
}

/// Deploys the suite, points Core at its managers and grants Core the
/// managers' `CORE_ROLE`. Runs forward only: the first failing step ends
/// the run and nothing already deployed is undone.
pub struct Orchestrator<'a, C: ChainClient, W: Write> {
    client: &'a C,
    out: W,
    events: Vec<StepEvent>,
}

impl<'a, C: ChainClient, W: Write> Orchestrator<'a, C, W> {
    pub fn new(client: &'a C, out: W) -> Self {
        Self {
            client,
            out,
            events: Vec::new(),
        }
    }

    pub async fn run(mut self) -> Result<DeploymentReport, StepFailure> {
        let deployment = self.deploy_all().await?;

        for slot in ManagerSlot::CONFIGURE_ORDER {
            self.configure(&deployment, slot).await?;
        }

        for kind in ContractKind::MANAGERS {
            self.grant_core_role(&deployment, kind).await?;
        }

        tracing::info!(core = %deployment.core, "deployment complete");
        Ok(DeploymentReport {
            deployment,
            events: self.events,
        })
    }

    async fn deploy_all(&mut self) -> Result<Deployment, StepFailure> {
        let mut addresses = [Address::ZERO; 4];
        for (slot, kind) in ContractKind::DEPLOY_ORDER.into_iter().enumerate() {
            addresses[slot] = self.deploy(kind).await?;
        }
        let [campaign, finance, user, core] = addresses;
        Ok(Deployment {
            campaign,
            finance,
            user,
            core,
        })
    }

    async fn deploy(&mut self, kind: ContractKind) -> Result<Address, StepFailure> {
        let step = Step::Deploy(kind);
        tracing::debug!(%step, "deploying");

        let deployed = self
            .client
            .deploy(kind.artifact_name())
            .await
            .map_err(|e| StepFailure::new(step, e))?;

        let event = StepEvent::Deployed {
            contract: kind,
            address: deployed.address,
            tx_hash: deployed.tx_hash,
        };
        writeln!(self.out, "{}", event)
            .and_then(|_| self.out.flush())
            .map_err(|e| StepFailure::new(step, DeployError::from(e)))?;
        tracing::info!(contract = %kind, address = %deployed.address, tx = %deployed.tx_hash, "deployed");

        self.events.push(event);
        Ok(deployed.address)
    }

    async fn configure(&mut self, deployment: &Deployment, slot: ManagerSlot) -> Result<(), StepFailure> {
        let step = Step::Configure(slot);
        let manager = deployment.address_of(slot.manager());
        let calldata = match slot {
            ManagerSlot::Finance => IChainFundHubCore::setFinanceManagerCall {
                financeManager: manager,
            }
            .abi_encode(),
            ManagerSlot::Campaign => IChainFundHubCore::setCampaignManagerCall {
                campaignManager: manager,
            }
            .abi_encode(),
            ManagerSlot::User => IChainFundHubCore::setUserManagerCall {
                userManager: manager,
            }
            .abi_encode(),
        };

        let tx_hash = self
            .client
            .send(deployment.core, Bytes::from(calldata))
            .await
            .map_err(|e| StepFailure::new(step, e))?;
        let event = StepEvent::ManagerConfigured {
            slot,
            core: deployment.core,
            manager,
            tx_hash,
        };
        tracing::info!(tx = %tx_hash, "{}", event);

        self.events.push(event);
        Ok(())
    }

    async fn grant_core_role(&mut self, deployment: &Deployment, kind: ContractKind) -> Result<(), StepFailure> {
        let target = deployment.address_of(kind);
        let role = self.fetch_core_role(target, kind).await?;

        let step = Step::GrantRole(kind);
        let calldata = IChainFundHubManager::grantRoleCall {
            role,
            account: deployment.core,
        }
        .abi_encode();
        let tx_hash = self
            .client
            .send(target, Bytes::from(calldata))
            .await
            .map_err(|e| StepFailure::new(step, e))?;
        let event = StepEvent::RoleGranted {
            contract: kind,
            target,
            role,
            grantee: deployment.core,
            tx_hash,
        };
        tracing::info!(tx = %tx_hash, "{}", event);

        self.events.push(event);
        Ok(())
    }

    async fn fetch_core_role(&self, target: Address, kind: ContractKind) -> Result<RoleId, StepFailure> {
        let step = Step::FetchRole(kind);
        let output = self
            .client
            .call(target, Bytes::from(IChainFundHubManager::CORE_ROLECall {}.abi_encode()))
            .await
            .map_err(|e| StepFailure::new(step, e))?;

        let decoded = IChainFundHubManager::CORE_ROLECall::abi_decode_returns(&output, true)
            .map_err(|e| StepFailure::new(step, DeployError::from(e)))?;
        tracing::debug!(contract = %kind, role = %decoded._0, "fetched CORE_ROLE");
        Ok(decoded._0)
    }
}

/// Runs the full pipeline against `client`, writing the deployment lines
/// to `out`.
pub async fn deploy_suite<C: ChainClient, W: Write>(
    client: &C,
    out: W,
) -> Result<DeploymentReport, StepFailure> {
    Orchestrator::new(client, out).run().await
}
