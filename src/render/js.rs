use crate::Result;
use crate::config::BuildConfiguration;

use regex::Regex;
use serde_json::Value;

const INDENT: &str = "  ";

/// Render the configuration as a CommonJS module, the form the build tool
/// loads (`module.exports = { networks: {...}, compilers: {...} };`).
///
/// We go through `serde_json::Value` so pass-through keys are emitted too.
pub fn render_js_module(cfg: &BuildConfiguration) -> Result<String> {
    let value = serde_json::to_value(cfg)?;
    let ident = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")?;

    let mut body = String::new();
    write_value(&mut body, &value, 0, &ident)?;

    const TEMPLATE: &str = "// Generated by chainconf; edit the JSON source instead.\nmodule.exports = __CONFIG__;\n";
    Ok(TEMPLATE.replace("__CONFIG__", &body))
}

fn write_value(out: &mut String, value: &Value, depth: usize, ident: &Regex) -> Result<()> {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, v) in map {
                push_indent(out, depth + 1);
                if ident.is_match(key) {
                    out.push_str(key);
                } else {
                    out.push_str(&serde_json::to_string(key)?);
                }
                out.push_str(": ");
                write_value(out, v, depth + 1, ident)?;
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for v in items {
                push_indent(out, depth + 1);
                write_value(out, v, depth + 1, ident)?;
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(']');
        }
        // Scalars are already valid JS literals in their JSON form.
        other => out.push_str(&serde_json::to_string(other)?),
    }
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NetworkEndpoint, NetworkId};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_the_default_module() {
        let js = render_js_module(&BuildConfiguration::default()).unwrap();
        let expected = r#"// Generated by chainconf; edit the JSON source instead.
module.exports = {
  networks: {
    development: {
      host: "127.0.0.1",
      port: 7545,
      network_id: "*",
    },
  },
  compilers: {
    solc: {
      version: "0.8.0",
    },
  },
};
"#;
        assert_eq!(js, expected);
    }

    #[test]
    fn quotes_keys_that_are_not_identifiers() {
        let mut cfg = BuildConfiguration::default();
        let mut ep = NetworkEndpoint::new("localhost", 8545, NetworkId::Exact(1337));
        ep.extra.insert("gas-limit".to_string(), serde_json::json!([1, 2]));
        cfg.networks.insert("local-cli".to_string(), ep);

        let js = render_js_module(&cfg).unwrap();
        assert!(js.contains("\"local-cli\": {"), "{}", js);
        assert!(js.contains("\"gas-limit\": [\n        1,\n        2,\n      ],"), "{}", js);
        assert!(js.contains("network_id: \"1337\","), "{}", js);
    }
}
