// src/lib.rs

use std::sync::Arc;

// Re-export commonly used types
pub use ethers::types::{Address, U256};

// Re-export modules
pub mod api;
pub mod blockchain;
pub mod config;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Resolves names and aggregates balances over the network registry
    pub checker: Arc<blockchain::services::balance::BalanceChecker>,
}

impl AppState {
    pub fn new(config: config::Config, checker: blockchain::services::balance::BalanceChecker) -> Self {
        Self {
            config,
            checker: Arc::new(checker),
        }
    }
}
