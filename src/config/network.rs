//! Network endpoints: where the build tool connects and which chain it accepts.
//!
//! JSON shape:
//! {
//!   "host": "127.0.0.1",
//!   "port": 7545,
//!   "network_id": "*",        // "*" or a chain id (number or decimal string)
//!   "websockets": false       // optional
//! }
//!
//! Any other keys are kept verbatim in `extra` and written back on export.

use crate::Result;
use crate::config::host;
use crate::diagnostics;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    pub host: String,

    pub port: u16,

    pub network_id: NetworkId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websockets: Option<bool>,

    /// Keys this crate does not interpret; passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NetworkEndpoint {
    pub fn new(host: impl Into<String>, port: u16, network_id: NetworkId) -> Self {
        Self {
            host: host.into(),
            port,
            network_id,
            websockets: None,
            extra: BTreeMap::new(),
        }
    }

    /// HTTP JSON-RPC endpoint, e.g. `http://127.0.0.1:7545`.
    pub fn rpc_url(&self) -> String {
        format!("http://{}", self.authority())
    }

    /// Websocket endpoint on the same host and port.
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.authority())
    }

    fn authority(&self) -> String {
        if host::is_ipv6_literal(&self.host) {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Check host and port; `name` is only used for error context.
    pub fn validate(&self, name: &str) -> Result<()> {
        host::validate_host(&self.host)
            .with_context(|| diagnostics::error_message(format!("network '{}'", name)))?;

        if self.port == 0 {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "network '{}' has port 0 (expected 1..=65535)",
                    name
                ))
            );
        }

        super::log_pass_through(&format!("network '{}'", name), &self.extra);

        Ok(())
    }
}

/// Which chain ids a network entry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNetworkId", into = "String")]
pub enum NetworkId {
    /// `"*"`: match whatever chain the endpoint reports.
    Any,
    Exact(u64),
}

impl NetworkId {
    pub fn accepts(&self, id: u64) -> bool {
        match self {
            NetworkId::Any => true,
            NetworkId::Exact(n) => *n == id,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => f.write_str("*"),
            NetworkId::Exact(n) => write!(f, "{}", n),
        }
    }
}

impl From<NetworkId> for String {
    fn from(id: NetworkId) -> Self {
        id.to_string()
    }
}

impl std::str::FromStr for NetworkId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(NetworkId::Any);
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            bail!("{}", invalid_network_id(&format!("{:?}", s)));
        }
        let n = s.parse::<u64>().with_context(|| {
            diagnostics::error_message(format!("network_id {:?} is out of range", s))
        })?;
        Ok(NetworkId::Exact(n))
    }
}

fn invalid_network_id(shown: &str) -> String {
    diagnostics::error_message(format!(
        "network_id {} must be \"*\" or a non-negative integer",
        shown
    ))
}

/// network_id as it may appear in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNetworkId {
    Number(u64),
    Text(String),
    /// Negative numbers, floats, objects: only kept to report them by name.
    Other(serde_json::Value),
}

impl TryFrom<RawNetworkId> for NetworkId {
    type Error = String;

    fn try_from(raw: RawNetworkId) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawNetworkId::Number(n) => Ok(NetworkId::Exact(n)),
            RawNetworkId::Text(s) => s.parse().map_err(|e: anyhow::Error| e.to_string()),
            RawNetworkId::Other(v) => Err(invalid_network_id(&v.to_string())),
        }
    }
}
