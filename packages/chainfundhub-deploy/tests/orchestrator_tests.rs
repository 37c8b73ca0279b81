
use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use chainfundhub_deploy::types::interfaces::{
    IChainFundHubCore::IChainFundHubCoreCalls,
    IChainFundHubManager::{self, IChainFundHubManagerCalls},
};
use chainfundhub_deploy::{
    deploy_suite, ContractKind, DeployError, ManagerSlot, Orchestrator, Step, StepFailure,
};
use chainfundhub_deploy::types::events::StepEvent;
use std::collections::HashSet;
use test_utils::*;

#[cfg(test)]
mod orchestrator_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_run_prints_addresses_in_order() {
        let chain = MockChain::new();
        let mut out = Vec::new();

        let report = deploy_suite(&chain, &mut out).await.expect("deployment failed");

        assert_eq!(
            output_lines(&out),
            vec![
                format!("Campaign deployed to: {}", campaign_address()),
                format!("Finance deployed to: {}", finance_address()),
                format!("User deployed to: {}", user_address()),
                format!("Core deployed to: {}", core_address()),
            ]
        );
        assert_eq!(
            chain.deploys(),
            vec![
                "ChainFundHubCampaign",
                "ChainFundHubFinance",
                "ChainFundHubUser",
                "ChainFundHubCore",
            ]
        );
        assert_eq!(report.deployment.campaign, campaign_address());
        assert_eq!(report.deployment.core, core_address());
    }

    #[tokio::test]
    async fn test_full_call_sequence() {
        let chain = MockChain::new();
        deploy_suite(&chain, Vec::new()).await.expect("deployment failed");

        let calls = chain.calls();
        assert_eq!(calls.len(), 4 + 3 + 3 * 2);

        // every deployment precedes every other call
        for call in &calls[..4] {
            assert!(matches!(call, ChainCall::Deploy(_)));
        }

        // Core is configured with finance, campaign, user
        let expected_setters = [
            (ManagerSlot::Finance, finance_address()),
            (ManagerSlot::Campaign, campaign_address()),
            (ManagerSlot::User, user_address()),
        ];
        for (call, (slot, manager)) in calls[4..7].iter().zip(expected_setters) {
            let (to, calldata) = match call {
                ChainCall::Send { to, calldata } => (*to, calldata),
                other => panic!("expected a transaction, got {:?}", other),
            };
            assert_eq!(to, core_address());
            let configured = match (slot, decode_core_call(calldata)) {
                (ManagerSlot::Finance, IChainFundHubCoreCalls::setFinanceManager(c)) => c.financeManager,
                (ManagerSlot::Campaign, IChainFundHubCoreCalls::setCampaignManager(c)) => c.campaignManager,
                (ManagerSlot::User, IChainFundHubCoreCalls::setUserManager(c)) => c.userManager,
                (slot, _) => panic!("wrong setter for {:?}", slot),
            };
            assert_eq!(configured, manager);
        }

        // each manager: CORE_ROLE lookup, then grantRole(role, core)
        let managers = [campaign_address(), finance_address(), user_address()];
        for (pair, target) in calls[7..].chunks(2).zip(managers) {
            match &pair[0] {
                ChainCall::Call { to, calldata } => {
                    assert_eq!(*to, target);
                    assert!(matches!(
                        decode_manager_call(calldata),
                        IChainFundHubManagerCalls::CORE_ROLE(_)
                    ));
                }
                other => panic!("expected a role lookup, got {:?}", other),
            }
            match &pair[1] {
                ChainCall::Send { to, calldata } => {
                    assert_eq!(*to, target);
                    match decode_manager_call(calldata) {
                        IChainFundHubManagerCalls::grantRole(grant) => {
                            assert_eq!(grant.role, core_role());
                            assert_eq!(grant.account, core_address());
                        }
                        _ => panic!("expected grantRole on {}", target),
                    }
                }
                other => panic!("expected a grant, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_report_records_every_step() {
        let chain = MockChain::new();
        let report = Orchestrator::new(&chain, Vec::new())
            .run()
            .await
            .expect("deployment failed");

        assert_eq!(report.events.len(), 10);
        assert!(matches!(
            report.events[0],
            StepEvent::Deployed { contract: ContractKind::Campaign, .. }
        ));
        assert!(matches!(
            report.events[4],
            StepEvent::ManagerConfigured { slot: ManagerSlot::Finance, .. }
        ));
        match &report.events[9] {
            StepEvent::RoleGranted { contract, target, role, grantee, .. } => {
                assert_eq!(*contract, ContractKind::User);
                assert_eq!(*target, user_address());
                assert_eq!(*role, core_role());
                assert_eq!(*grantee, core_address());
            }
            other => panic!("unexpected last event {:?}", other),
        }

        // one distinct transaction per step
        let hashes: HashSet<_> = report.events.iter().map(|e| e.tx_hash()).collect();
        assert_eq!(hashes.len(), 10);
    }

    #[tokio::test]
    async fn test_deploy_failure_stops_before_wiring() {
        let chain = MockChain::new().failing_deploy("ChainFundHubUser");
        let mut out = Vec::new();

        let failure = deploy_suite(&chain, &mut out).await.unwrap_err();

        assert_eq!(failure.step, Step::Deploy(ContractKind::User));
        assert!(matches!(failure.source, DeployError::Reverted(_)));
        assert_eq!(
            chain.deploys(),
            vec!["ChainFundHubCampaign", "ChainFundHubFinance", "ChainFundHubUser"]
        );
        assert!(chain.sends().is_empty());
        assert!(chain.reads().is_empty());
        assert_eq!(output_lines(&out).len(), 2);
    }

    #[tokio::test]
    async fn test_core_deploy_failure_issues_no_configuration() {
        let chain = MockChain::new().failing_deploy("ChainFundHubCore");

        let failure = deploy_suite(&chain, Vec::new()).await.unwrap_err();

        assert_eq!(failure.step, Step::Deploy(ContractKind::Core));
        assert_eq!(chain.deploys().len(), 4);
        assert!(chain.sends().is_empty());
        assert!(chain.reads().is_empty());
    }

    #[tokio::test]
    async fn test_configure_failure_stops_remaining_steps() {
        // second configuration transaction: setCampaignManager
        let chain = MockChain::new().failing_send(1);

        let failure = deploy_suite(&chain, Vec::new()).await.unwrap_err();

        assert_eq!(failure.step, Step::Configure(ManagerSlot::Campaign));
        let sends = chain.sends();
        assert_eq!(sends.len(), 2);
        assert!(sends.iter().all(|(to, _)| *to == core_address()));
        assert!(chain.reads().is_empty());
    }

    #[tokio::test]
    async fn test_grant_failure_stops_remaining_grants() {
        // three configuration transactions, then the campaign grant, then finance
        let chain = MockChain::new().failing_send(4);

        let failure = deploy_suite(&chain, Vec::new()).await.unwrap_err();

        assert_eq!(failure.step, Step::GrantRole(ContractKind::Finance));
        assert_eq!(chain.sends().len(), 5);
        let read_targets: Vec<_> = chain.reads().into_iter().map(|(to, _)| to).collect();
        assert_eq!(read_targets, vec![campaign_address(), finance_address()]);
    }

    #[tokio::test]
    async fn test_malformed_role_is_a_failure() {
        let chain = MockChain::new().returning_role_output(Bytes::from(vec![0x01, 0x02]));

        let failure = deploy_suite(&chain, Vec::new()).await.unwrap_err();

        assert_eq!(failure.step, Step::FetchRole(ContractKind::Campaign));
        assert!(matches!(failure.source, DeployError::Decode(_)));
        // only the three configuration transactions went out
        assert_eq!(chain.sends().len(), 3);
    }

    #[tokio::test]
    async fn test_output_failure_aborts_run() {
        let chain = MockChain::new();

        let failure = deploy_suite(&chain, BrokenPipe).await.unwrap_err();

        assert_eq!(failure.step, Step::Deploy(ContractKind::Campaign));
        assert!(matches!(failure.source, DeployError::Output(_)));
        assert_eq!(chain.deploys().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_message_names_step() {
        let chain = MockChain::new().failing_send(0);

        let failure: StepFailure = deploy_suite(&chain, Vec::new()).await.unwrap_err();

        assert!(failure
            .to_string()
            .starts_with("Core.setFinanceManager did not complete: transaction reverted"));
    }

    #[test]
    fn test_role_lookup_calldata_is_bare_selector() {
        let calldata = IChainFundHubManager::CORE_ROLECall {}.abi_encode();
        assert_eq!(calldata, IChainFundHubManager::CORE_ROLECall::SELECTOR.to_vec());
    }
}
