// src/blockchain/mod.rs

// Re-export the client module with the JSON-RPC client
pub mod client;
pub use client::{EvmRpcClient, NetworkClient};

// Re-export other modules
pub mod models;
pub mod network;
pub mod services;

pub use network::{NetworkEndpoint, NetworkRegistry};

// Re-export commonly used types
pub use ethers::types::{Address, U256};
