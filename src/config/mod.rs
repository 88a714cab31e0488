//! Config layer: JSON schema + validated in-memory configuration.
//!
//! This module owns:
//! - BuildConfiguration (networks + compilers)
//! - NetworkEndpoint / NetworkId
//! - compiler pin parsing
//! - loading from disk

pub mod compiler;
pub mod host;
pub mod load;
pub mod network;

pub use compiler::{Compilers, VersionPin};
pub use load::load_file;
pub use network::{NetworkEndpoint, NetworkId};

use crate::Result;
use crate::diagnostics;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NETWORK: &str = "development";
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Ganache UI.
pub const GANACHE_UI_PORT: u16 = 7545;
/// Ganache CLI.
pub const GANACHE_CLI_PORT: u16 = 8545;

/// The whole configuration document. Produced once by loading; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    #[serde(default, deserialize_with = "load::deserialize_unique_map")]
    pub networks: BTreeMap<String, NetworkEndpoint>,

    pub compilers: Compilers,

    /// Top-level keys this crate does not interpret (build directories,
    /// test runner options, plugins); passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for BuildConfiguration {
    fn default() -> Self {
        Self::development(GANACHE_UI_PORT)
    }
}

impl BuildConfiguration {
    /// Local development setup: one wildcard network on 127.0.0.1 and solc 0.8.0.
    pub fn development(port: u16) -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            DEFAULT_NETWORK.to_string(),
            NetworkEndpoint::new(DEFAULT_HOST, port, NetworkId::Any),
        );
        Self {
            networks,
            compilers: Compilers::default(),
            extra: BTreeMap::new(),
        }
    }

    /// Check every network entry and the compiler pin.
    pub fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            diagnostics::warn("no networks configured");
        }
        for (name, endpoint) in &self.networks {
            if name.trim().is_empty() {
                bail!("{}", diagnostics::error_message("network name cannot be empty"));
            }
            endpoint.validate(name)?;
        }
        self.compilers.solc.validate()?;

        log_pass_through("top level", &self.extra);
        log_pass_through("compilers", &self.compilers.extra);
        log_pass_through("compilers.solc", &self.compilers.solc.extra);
        if let Some(settings) = &self.compilers.solc.settings {
            log_pass_through("compilers.solc.settings", &settings.extra);
        }
        Ok(())
    }

    pub fn network(&self, name: &str) -> Result<&NetworkEndpoint> {
        match self.networks.get(name) {
            Some(ep) => Ok(ep),
            None => {
                let known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "unknown network '{}' (configured: {})",
                        name,
                        if known.is_empty() {
                            "none".to_string()
                        } else {
                            known.join(", ")
                        }
                    ))
                );
            }
        }
    }

    /// Find the network that accepts chain id `id`.
    ///
    /// Exact `network_id` matches win over wildcards; ties go to the
    /// alphabetically first name.
    pub fn resolve_network(&self, id: u64) -> Option<(&str, &NetworkEndpoint)> {
        let exact = self
            .networks
            .iter()
            .find(|(_, ep)| ep.network_id == NetworkId::Exact(id));
        let chosen = exact.or_else(|| {
            self.networks
                .iter()
                .find(|(_, ep)| ep.network_id.accepts(id))
        });
        chosen.map(|(name, ep)| (name.as_str(), ep))
    }
}

pub(crate) fn log_pass_through(section: &str, extra: &BTreeMap<String, serde_json::Value>) {
    if !extra.is_empty() {
        let keys: Vec<&str> = extra.keys().map(String::as_str).collect();
        log::debug!(
            "{} passes through uninterpreted keys: {}",
            section,
            keys.join(", ")
        );
    }
}
