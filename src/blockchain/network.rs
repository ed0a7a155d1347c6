// src/blockchain/network.rs

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::blockchain::client::{EvmRpcClient, NetworkClient};
use crate::config::Config;

/// A named network and the client used to reach it.
#[derive(Clone)]
pub struct NetworkEndpoint {
    pub name: String,
    pub client: Arc<dyn NetworkClient>,
}

impl NetworkEndpoint {
    pub fn new(name: impl Into<String>, client: Arc<dyn NetworkClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }
}

/// Read-only, ordered list of endpoints built once at startup.
/// The first endpoint is the primary network used for name resolution.
#[derive(Clone)]
pub struct NetworkRegistry {
    endpoints: Vec<NetworkEndpoint>,
}

impl NetworkRegistry {
    pub fn new(endpoints: Vec<NetworkEndpoint>) -> Result<Self> {
        if endpoints.is_empty() {
            bail!("at least one network endpoint is required");
        }
        Ok(Self { endpoints })
    }

    /// Builds JSON-RPC clients for every configured network, in config order
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoints = config
            .networks
            .iter()
            .map(|network| {
                let client = EvmRpcClient::new(&network.name, network.rpc_url.as_deref());
                NetworkEndpoint::new(network.name.clone(), Arc::new(client))
            })
            .collect();
        Self::new(endpoints)
    }

    pub fn primary(&self) -> &NetworkEndpoint {
        // Non-empty is enforced by the constructor
        &self.endpoints[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkEndpoint> {
        self.endpoints.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.endpoints.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_follows_config_order() {
        let registry = NetworkRegistry::from_config(&Config::default()).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.primary().name, "mainnet");
        assert_eq!(registry.names(), vec!["mainnet", "arbitrum", "optimism", "polygon"]);
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(NetworkRegistry::new(Vec::new()).is_err());

        let mut config = Config::default();
        config.networks.clear();
        assert!(NetworkRegistry::from_config(&config).is_err());
    }
}
