use crate::config::{BuildConfiguration, VersionPin};

/// Human-readable overview for `chainconf show`.
///
/// Example:
/// networks (1):
///   development  http://127.0.0.1:7545  network_id=*
/// compilers:
///   solc 0.8.0 (exact)
pub fn render_summary(cfg: &BuildConfiguration) -> String {
    let mut out = String::new();

    out.push_str(&format!("networks ({}):\n", cfg.networks.len()));
    let width = cfg.networks.keys().map(|k| k.len()).max().unwrap_or(0);
    for (name, ep) in &cfg.networks {
        let url = if ep.websockets == Some(true) {
            ep.ws_url()
        } else {
            ep.rpc_url()
        };
        out.push_str(&format!(
            "  {:<width$}  {}  network_id={}\n",
            name,
            url,
            ep.network_id,
            width = width
        ));
    }

    out.push_str("compilers:\n");
    let solc = &cfg.compilers.solc;
    let kind = match solc.pin() {
        Ok(VersionPin::Exact(_)) => "exact",
        Ok(VersionPin::Range(_)) => "range",
        Ok(VersionPin::Tag(_)) => "tag",
        Err(_) => "unparsed",
    };
    out.push_str(&format!("  solc {} ({})\n", solc.version, kind));
    if let Some(settings) = &solc.settings {
        if settings.optimizer.enabled {
            out.push_str(&format!("    optimizer: on, {} runs\n", settings.optimizer.runs));
        } else {
            out.push_str("    optimizer: off\n");
        }
        if let Some(evm) = &settings.evm_version {
            out.push_str(&format!("    evmVersion: {}\n", evm));
        }
    }
    for name in cfg.compilers.extra.keys() {
        out.push_str(&format!("  {} (passed through)\n", name));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NetworkEndpoint, NetworkId};
    use pretty_assertions::assert_eq;

    #[test]
    fn summarises_the_default_config() {
        let text = render_summary(&BuildConfiguration::default());
        assert_eq!(
            text,
            "networks (1):\n  development  http://127.0.0.1:7545  network_id=*\ncompilers:\n  solc 0.8.0 (exact)\n"
        );
    }

    #[test]
    fn aligns_names_and_shows_ws() {
        let mut cfg = BuildConfiguration::default();
        let mut ep = NetworkEndpoint::new("localhost", 8546, NetworkId::Exact(1337));
        ep.websockets = Some(true);
        cfg.networks.insert("ws".to_string(), ep);
        cfg.compilers.solc.version = "^0.8.0".to_string();

        let text = render_summary(&cfg);
        assert!(text.contains("  ws           ws://localhost:8546  network_id=1337\n"), "{}", text);
        assert!(text.contains("solc ^0.8.0 (range)"), "{}", text);
    }
}
