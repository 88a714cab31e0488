//! Compiler section: which toolchain the build tool fetches and how it runs it.
//!
//! JSON shape:
//! {
//!   "solc": {
//!     "version": "0.8.0",
//!     "settings": {                       // optional
//!       "optimizer": { "enabled": true, "runs": 200 },
//!       "evmVersion": "istanbul"
//!     }
//!   }
//! }
//!
//! The version string is kept as written; `VersionPin` is its parsed view.

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, bail};
use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_SOLC_VERSION: &str = "0.8.0";
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// EVM targets solc understands, oldest first.
const EVM_VERSIONS: &[&str] = &[
    "homestead",
    "tangerineWhistle",
    "spuriousDragon",
    "byzantium",
    "constantinople",
    "petersburg",
    "istanbul",
    "berlin",
    "london",
    "paris",
    "shanghai",
    "cancun",
    "prague",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compilers {
    pub solc: SolcConfig,

    /// Other toolchains (e.g. vyper) are passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolcConfig {
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SolcSettings>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for SolcConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_SOLC_VERSION.to_string(),
            settings: None,
            extra: BTreeMap::new(),
        }
    }
}

impl SolcConfig {
    pub fn pin(&self) -> Result<VersionPin> {
        VersionPin::parse(&self.version)
    }

    pub fn validate(&self) -> Result<()> {
        let pin = self
            .pin()
            .with_context(|| diagnostics::error_message("compilers.solc.version"))?;
        if !pin.is_exact() {
            log::info!(
                "solc version {:?} is not an exact release; the resolved compiler may change",
                self.version
            );
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolcSettings {
    #[serde(default)]
    pub optimizer: Optimizer,

    #[serde(
        rename = "evmVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub evm_version: Option<String>,

    /// Other solc settings (viaIR, remappings, ...), passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SolcSettings {
    fn validate(&self) -> Result<()> {
        if self.optimizer.enabled && self.optimizer.runs == 0 {
            bail!(
                "{}",
                diagnostics::error_message(
                    "compilers.solc.settings.optimizer.runs must be at least 1 when enabled"
                )
            );
        }
        if let Some(evm) = &self.evm_version {
            if !EVM_VERSIONS.contains(&evm.as_str()) {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "unknown evmVersion {:?} (expected one of: {})",
                        evm,
                        EVM_VERSIONS.join(", ")
                    ))
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimizer {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_runs")]
    pub runs: u32,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}

fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

/// Parsed compiler version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionPin {
    /// A single release, fetched as-is.
    Exact(Version),
    /// A semver range, resolved to the newest matching release.
    Range(String),
    Tag(CompilerTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerTag {
    /// Use the solc binary installed on the machine.
    Native,
    /// Pick the version from each source file's `pragma solidity`.
    Pragma,
    Latest,
    Nightly,
}

impl CompilerTag {
    fn from_name(s: &str) -> Option<Self> {
        match s {
            "native" => Some(CompilerTag::Native),
            "pragma" => Some(CompilerTag::Pragma),
            "latest" => Some(CompilerTag::Latest),
            "nightly" => Some(CompilerTag::Nightly),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompilerTag::Native => "native",
            CompilerTag::Pragma => "pragma",
            CompilerTag::Latest => "latest",
            CompilerTag::Nightly => "nightly",
        }
    }
}

impl fmt::Display for VersionPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPin::Exact(v) => write!(f, "{}", v),
            VersionPin::Range(r) => f.write_str(r),
            VersionPin::Tag(t) => f.write_str(t.name()),
        }
    }
}

impl VersionPin {
    pub fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();
        if s.is_empty() {
            bail!("{}", diagnostics::error_message("compiler version cannot be empty"));
        }

        if let Some(tag) = CompilerTag::from_name(s) {
            return Ok(VersionPin::Tag(tag));
        }

        // solc-bin publishes plain semver, sometimes written with a leading "v".
        if let Ok(version) = Version::parse(s.strip_prefix('v').unwrap_or(s)) {
            return Ok(VersionPin::Exact(version));
        }

        // Ranges: whitespace-separated comparators, alternatives joined by "||".
        const COMPARATOR_RE: &str = r"^(?:\^|~|>=|<=|>|<|=)?\d+(?:\.(?:\d+|x|\*)){0,2}$";
        let comparator = Regex::new(COMPARATOR_RE)?;
        for alternative in s.split("||") {
            let parts: Vec<&str> = alternative.split_whitespace().collect();
            if parts.is_empty() {
                bail!(
                    "{}",
                    diagnostics::error_message(format!("version range {:?} has an empty alternative", s))
                );
            }
            for part in parts {
                if !comparator.is_match(part) {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!(
                            "cannot parse compiler version {:?}: {:?} is not a version, range or one of native/pragma/latest/nightly",
                            s, part
                        ))
                    );
                }
            }
        }

        Ok(VersionPin::Range(s.to_string()))
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, VersionPin::Exact(_))
    }
}
