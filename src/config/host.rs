//! Host validation for network endpoints.
//!
//! Accepted forms:
//! - IPv4 literal: 127.0.0.1
//! - IPv6 literal: ::1 (stored without brackets)
//! - RFC 1123 hostname: localhost, ganache.internal, node-1.example.org

use crate::Result;
use crate::diagnostics;

use anyhow::bail;
use regex::Regex;
use std::net::IpAddr;

const MAX_HOSTNAME_LEN: usize = 253;

/// Validate a host string; the error names what is wrong with it.
pub fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        bail!("{}", diagnostics::error_message("host cannot be empty"));
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    if host.starts_with('[') || host.ends_with(']') {
        bail!(
            "{}",
            diagnostics::error_message(format!(
                "host {:?} must be written without brackets",
                host
            ))
        );
    }

    if host.len() > MAX_HOSTNAME_LEN {
        bail!(
            "{}",
            diagnostics::error_message(format!(
                "host is {} characters long (max {})",
                host.len(),
                MAX_HOSTNAME_LEN
            ))
        );
    }

    // One label: 1..=63 alphanumerics or '-', not starting or ending with '-'.
    let label = Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")?;
    for part in host.strip_suffix('.').unwrap_or(host).split('.') {
        if !label.is_match(part) {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "host {:?} is neither an IP literal nor a valid hostname (bad label {:?})",
                    host, part
                ))
            );
        }
    }

    Ok(())
}

/// True for IPv6 literals, which need brackets inside URLs.
pub fn is_ipv6_literal(host: &str) -> bool {
    matches!(host.parse::<IpAddr>(), Ok(IpAddr::V6(_)))
}
