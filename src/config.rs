// src/config.rs

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Networks queried for every request, in reporting order.
/// The first entry is the primary network used for name resolution.
pub const NETWORKS: &[(&str, &str)] = &[
    ("mainnet", "MAINNET_API"),
    ("arbitrum", "ARBITRUM_API"),
    ("optimism", "OPTIMISM_API"),
    ("polygon", "POLYGON_API"),
];

/// What to do when a single network's balance query fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetworkFailurePolicy {
    /// Abort the request and report the failing network in the response body
    #[default]
    Fail,
    /// Log the failure and treat the network as holding no balance
    Skip,
}

impl FromStr for NetworkFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            other => Err(anyhow!("unknown network failure policy '{}', expected 'fail' or 'skip'", other)),
        }
    }
}

impl fmt::Display for NetworkFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// RPC settings for one named network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    /// `None` when the environment variable is unset or empty
    pub rpc_url: Option<String>,
}

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub host: IpAddr,
    pub port: u16,

    /// Networks in query order, primary first
    pub networks: Vec<NetworkConfig>,
    pub failure_policy: NetworkFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            networks: NETWORKS
                .iter()
                .map(|(name, _)| NetworkConfig {
                    name: name.to_string(),
                    rpc_url: None,
                })
                .collect(),
            failure_policy: NetworkFailurePolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.trim().parse().context("HOST must be a valid IP address")?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };

        let failure_policy = match lookup("NETWORK_FAILURE_POLICY") {
            Some(raw) => raw.parse().context("Invalid NETWORK_FAILURE_POLICY")?,
            None => defaults.failure_policy,
        };

        let networks = NETWORKS
            .iter()
            .map(|(name, var)| NetworkConfig {
                name: name.to_string(),
                rpc_url: lookup(var)
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty()),
            })
            .collect();

        Ok(Config {
            host,
            port,
            networks,
            failure_policy,
        })
    }
}
