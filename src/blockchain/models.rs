// src/blockchain/models.rs
use ethers::providers::ProviderError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when an input is neither an address nor a resolvable name.
pub const UNRESOLVED_ADDRESS_MESSAGE: &str = "Couldn't resolve address";

// --- Error types for network operations ---

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("no RPC URL configured for network {network}")]
    NotConfigured { network: String },
    #[error("RPC call to {network} failed: {source}")]
    Provider {
        network: String,
        #[source]
        source: ProviderError,
    },
}

impl NetworkError {
    /// Name of the network the failed call was addressed to
    pub fn network(&self) -> &str {
        match self {
            NetworkError::NotConfigured { network } => network,
            NetworkError::Provider { network, .. } => network,
        }
    }
}

// --- Response Models ---

/// Aggregated view of which networks hold a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub has_balance: bool,
    pub networks_with_balance: Vec<String>,
}

impl BalanceSummary {
    /// Builds a summary whose flag always agrees with the network list.
    pub fn from_networks(networks_with_balance: Vec<String>) -> Self {
        Self {
            has_balance: !networks_with_balance.is_empty(),
            networks_with_balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of every `has-balance` response. Serialized without a tag, so clients
/// see either the summary fields or a single `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceResult {
    Summary(BalanceSummary),
    Error(ErrorBody),
}

impl BalanceResult {
    pub fn error(message: impl Into<String>) -> Self {
        BalanceResult::Error(ErrorBody {
            error: message.into(),
        })
    }

    pub fn unresolved() -> Self {
        Self::error(UNRESOLVED_ADDRESS_MESSAGE)
    }

    pub fn query_failed(network: &str) -> Self {
        Self::error(format!("Failed to query balance on {}", network))
    }
}

impl From<BalanceSummary> for BalanceResult {
    fn from(summary: BalanceSummary) -> Self {
        BalanceResult::Summary(summary)
    }
}
