//! Network client module for EVM-compatible networks.
//!
//! `NetworkClient` is the seam between the balance checker and the outside
//! world. The production implementation talks JSON-RPC through an ethers
//! `Provider<Http>`; tests substitute in-memory clients.

use anyhow::Result;
use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, U256},
};
use tracing::{debug, warn};
use url::Url;

use crate::blockchain::models::NetworkError;

/// Operations the balance checker needs from a single network.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Native balance of `address` at the latest block
    async fn get_balance(&self, address: Address) -> Result<U256, NetworkError>;

    /// Resolves a human-readable name (ENS) to an address
    async fn resolve_name(&self, name: &str) -> Result<Address, NetworkError>;
}

/// JSON-RPC client for one EVM network.
///
/// A client built without a usable URL is kept in the registry but fails
/// every call with `NetworkError::NotConfigured`.
#[derive(Clone)]
pub struct EvmRpcClient {
    network: String,
    provider: Option<Provider<Http>>,
}

impl EvmRpcClient {
    /// Create a client for `network`, logging when the URL is missing or invalid
    pub fn new(network: &str, rpc_url: Option<&str>) -> Self {
        let provider = match rpc_url {
            Some(url) => match create_provider(url) {
                Ok(provider) => {
                    debug!("Configured {} RPC at {}", network, redact_url(url));
                    Some(provider)
                }
                Err(e) => {
                    warn!("Failed to create provider for {} at {}: {}", network, redact_url(url), e);
                    None
                }
            },
            None => {
                warn!("No RPC URL configured for {}; balance queries will fail", network);
                None
            }
        };

        Self {
            network: network.to_string(),
            provider,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&Provider<Http>, NetworkError> {
        self.provider.as_ref().ok_or_else(|| NetworkError::NotConfigured {
            network: self.network.clone(),
        })
    }
}

#[async_trait]
impl NetworkClient for EvmRpcClient {
    async fn get_balance(&self, address: Address) -> Result<U256, NetworkError> {
        self.provider()?
            .get_balance(address, None)
            .await
            .map_err(|source| NetworkError::Provider {
                network: self.network.clone(),
                source,
            })
    }

    async fn resolve_name(&self, name: &str) -> Result<Address, NetworkError> {
        self.provider()?
            .resolve_name(name)
            .await
            .map_err(|source| NetworkError::Provider {
                network: self.network.clone(),
                source,
            })
    }
}

/// Create a provider for the given RPC URL
pub fn create_provider(rpc_url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url)
        .map_err(|e| anyhow::anyhow!("Failed to create provider: {}", e))
}

/// Reduces an RPC URL to scheme, host and port for logging. Provider URLs
/// usually carry an API key in the path or userinfo.
pub fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}://{}:{}", url.scheme(), host, port),
            (Some(host), None) => format!("{}://{}", url.scheme(), host),
            (None, _) => format!("{}://", url.scheme()),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}
