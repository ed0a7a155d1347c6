use ethers::types::Address;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::blockchain::{
    models::{BalanceResult, BalanceSummary, NetworkError},
    network::NetworkRegistry,
};
use crate::config::NetworkFailurePolicy;

/// True iff `input` is `0x` followed by exactly 40 hex digits of either case.
pub fn is_valid_address(input: &str) -> bool {
    match input.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Resolves inputs to addresses and reports which networks hold a balance.
pub struct BalanceChecker {
    registry: NetworkRegistry,
    failure_policy: NetworkFailurePolicy,
}

impl BalanceChecker {
    pub fn new(registry: NetworkRegistry, failure_policy: NetworkFailurePolicy) -> Self {
        Self {
            registry,
            failure_policy,
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Returns `input` unchanged when it is already an address, otherwise
    /// resolves it as a name on the primary network. Resolution errors are
    /// treated the same as an unknown name.
    pub async fn resolve_address(&self, input: &str) -> Option<String> {
        if is_valid_address(input) {
            return Some(input.to_string());
        }

        let primary = self.registry.primary();
        match primary.client.resolve_name(input).await {
            Ok(address) => {
                debug!("Resolved {} to {:?} on {}", input, address, primary.name);
                Some(format!("{:?}", address))
            }
            Err(e) => {
                warn!("Failed to resolve {} on {}: {}", input, primary.name, e);
                None
            }
        }
    }

    /// Resolves `input` and checks its native balance on every network.
    pub async fn check_balances(&self, input: &str) -> BalanceResult {
        let resolved = match self.resolve_address(input).await {
            Some(resolved) => resolved,
            None => return BalanceResult::unresolved(),
        };

        let address: Address = match resolved.parse() {
            Ok(address) => address,
            Err(e) => {
                warn!("Resolved value {} is not a valid address: {}", resolved, e);
                return BalanceResult::unresolved();
            }
        };

        match self.networks_with_balance(address).await {
            Ok(networks) => {
                info!("{} holds a balance on {:?}", resolved, networks);
                BalanceSummary::from_networks(networks).into()
            }
            Err(e) => {
                warn!("Balance check for {} aborted: {}", resolved, e);
                BalanceResult::query_failed(e.network())
            }
        }
    }

    /// Queries all networks concurrently and returns, in registry order, the
    /// names of those reporting a balance greater than zero.
    async fn networks_with_balance(&self, address: Address) -> Result<Vec<String>, NetworkError> {
        let queries = self.registry.iter().map(|endpoint| async move {
            let balance = endpoint.client.get_balance(address).await;
            (endpoint, balance)
        });

        let mut networks = Vec::new();
        for (endpoint, balance) in join_all(queries).await {
            match balance {
                Ok(balance) => {
                    debug!("{} balance of {:?}: {}", endpoint.name, address, balance);
                    if !balance.is_zero() {
                        networks.push(endpoint.name.clone());
                    }
                }
                Err(e) => match self.failure_policy {
                    NetworkFailurePolicy::Fail => return Err(e),
                    NetworkFailurePolicy::Skip => {
                        warn!("Skipping {}: {}", endpoint.name, e);
                    }
                },
            }
        }

        Ok(networks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{client::NetworkClient, network::NetworkEndpoint};
    use async_trait::async_trait;
    use ethers::types::U256;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const VITALIK: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

    #[derive(Default)]
    struct FakeClient {
        network: String,
        balance: u64,
        fails: bool,
        delay_ms: u64,
        names: HashMap<String, Address>,
        balance_calls: AtomicUsize,
        resolve_calls: AtomicUsize,
    }

    impl FakeClient {
        fn new(network: &str, balance: u64) -> Self {
            Self {
                network: network.to_string(),
                balance,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl NetworkClient for FakeClient {
        async fn get_balance(&self, _address: Address) -> Result<U256, NetworkError> {
            self.balance_calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fails {
                return Err(NetworkError::NotConfigured {
                    network: self.network.clone(),
                });
            }
            Ok(U256::from(self.balance))
        }

        async fn resolve_name(&self, name: &str) -> Result<Address, NetworkError> {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            self.names.get(name).copied().ok_or_else(|| NetworkError::NotConfigured {
                network: self.network.clone(),
            })
        }
    }

    fn checker(clients: &[Arc<FakeClient>], policy: NetworkFailurePolicy) -> BalanceChecker {
        let endpoints = clients
            .iter()
            .map(|c| NetworkEndpoint::new(c.network.clone(), c.clone() as Arc<dyn NetworkClient>))
            .collect();
        BalanceChecker::new(NetworkRegistry::new(endpoints).unwrap(), policy)
    }

    fn four_networks(balances: [u64; 4]) -> Vec<Arc<FakeClient>> {
        ["mainnet", "arbitrum", "optimism", "polygon"]
            .iter()
            .zip(balances)
            .map(|(name, balance)| Arc::new(FakeClient::new(name, balance)))
            .collect()
    }

    fn summary(networks: &[&str]) -> BalanceResult {
        BalanceSummary::from_networks(networks.iter().map(|n| n.to_string()).collect()).into()
    }

    #[test]
    fn address_pattern() {
        assert!(is_valid_address("0x0000000000000000000000000000000000000000"));
        assert!(is_valid_address("0xABCDEF00000000000000000000000000000000AB"));
        assert!(is_valid_address(VITALIK));

        assert!(!is_valid_address("vitalik.eth"));
        assert!(!is_valid_address("0x"));
        // 39 digits
        assert!(!is_valid_address("0xABCDEF0000000000000000000000000000000AB"));
        // 41 digits
        assert!(!is_valid_address("0x00000000000000000000000000000000000000000"));
        assert!(!is_valid_address("0X0000000000000000000000000000000000000000"));
        assert!(!is_valid_address("0x000000000000000000000000000000000000000g"));
        assert!(!is_valid_address(" 0x0000000000000000000000000000000000000000"));
        assert!(!is_valid_address("d8da6bf26964af9d7eed9e03e53415d37aa9604500"));
    }

    #[tokio::test]
    async fn valid_address_is_returned_unchanged_without_resolution() {
        let clients = four_networks([0; 4]);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        let upper = "0xABCDEF00000000000000000000000000000000AB";
        assert_eq!(checker.resolve_address(upper).await.as_deref(), Some(upper));
        assert!(clients.iter().all(|c| c.resolve_calls.load(Ordering::SeqCst) == 0));
    }

    #[tokio::test]
    async fn names_resolve_once_on_primary_only() {
        let mut mainnet = FakeClient::new("mainnet", 0);
        mainnet.names.insert("vitalik.eth".into(), VITALIK.parse().unwrap());
        let mut clients = four_networks([0; 4]);
        clients[0] = Arc::new(mainnet);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        assert_eq!(checker.resolve_address("vitalik.eth").await.as_deref(), Some(VITALIK));
        assert_eq!(clients[0].resolve_calls.load(Ordering::SeqCst), 1);
        assert!(clients[1..].iter().all(|c| c.resolve_calls.load(Ordering::SeqCst) == 0));
    }

    #[tokio::test]
    async fn zero_address_with_no_balances() {
        let clients = four_networks([0; 4]);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        let result = checker
            .check_balances("0x0000000000000000000000000000000000000000")
            .await;

        assert_eq!(result, summary(&[]));
        assert!(clients.iter().all(|c| c.balance_calls.load(Ordering::SeqCst) == 1));
    }

    #[tokio::test]
    async fn resolved_name_with_mainnet_balance() {
        let mut mainnet = FakeClient::new("mainnet", 1_000_000_000_000_000_000);
        mainnet.names.insert("vitalik.eth".into(), VITALIK.parse().unwrap());
        let mut clients = four_networks([0; 4]);
        clients[0] = Arc::new(mainnet);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        assert_eq!(checker.check_balances("vitalik.eth").await, summary(&["mainnet"]));
    }

    #[tokio::test]
    async fn unresolvable_name_short_circuits() {
        let clients = four_networks([1; 4]);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        assert_eq!(
            checker.check_balances("not-a-real-name").await,
            BalanceResult::unresolved()
        );
        assert_eq!(clients[0].resolve_calls.load(Ordering::SeqCst), 1);
        assert!(clients.iter().all(|c| c.balance_calls.load(Ordering::SeqCst) == 0));
    }

    #[tokio::test]
    async fn result_keeps_registry_order_despite_completion_order() {
        let mut clients = Vec::new();
        for (name, balance, delay_ms) in [
            ("mainnet", 0, 5),
            ("arbitrum", 7, 40),
            ("optimism", 0, 1),
            ("polygon", 3, 0),
        ] {
            let mut client = FakeClient::new(name, balance);
            client.delay_ms = delay_ms;
            clients.push(Arc::new(client));
        }
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        let result = checker.check_balances(VITALIK).await;

        assert_eq!(result, summary(&["arbitrum", "polygon"]));
    }

    #[tokio::test]
    async fn fail_policy_reports_failing_network() {
        let mut clients = four_networks([5; 4]);
        let mut optimism = FakeClient::new("optimism", 5);
        optimism.fails = true;
        clients[2] = Arc::new(optimism);
        let checker = checker(&clients, NetworkFailurePolicy::Fail);

        assert_eq!(
            checker.check_balances(VITALIK).await,
            BalanceResult::query_failed("optimism")
        );
    }

    #[tokio::test]
    async fn skip_policy_treats_failure_as_no_balance() {
        let mut clients = four_networks([5; 4]);
        let mut optimism = FakeClient::new("optimism", 5);
        optimism.fails = true;
        clients[2] = Arc::new(optimism);
        let checker = checker(&clients, NetworkFailurePolicy::Skip);

        assert_eq!(
            checker.check_balances(VITALIK).await,
            summary(&["mainnet", "arbitrum", "polygon"])
        );
    }
}
