//! Reading a configuration document from disk or from a string.

use crate::Result;
use crate::config::BuildConfiguration;
use crate::diagnostics;

use anyhow::Context;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

/// Read, parse and validate a configuration file.
pub fn load_file(path: impl AsRef<Path>) -> Result<BuildConfiguration> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| {
        diagnostics::error_message(format!("read config file {}", path.display()))
    })?;

    let cfg = BuildConfiguration::from_json_str(&text)
        .with_context(|| diagnostics::error_message(format!("load {}", path.display())))?;

    log::info!(
        "loaded {} ({} network(s), solc {})",
        path.display(),
        cfg.networks.len(),
        cfg.compilers.solc.version
    );
    Ok(cfg)
}

impl BuildConfiguration {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: BuildConfiguration = serde_json::from_str(text)
            .with_context(|| diagnostics::error_message("parse configuration JSON"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Deserialize a JSON object into a map, rejecting repeated keys instead of
/// silently keeping the last one.
pub(crate) fn deserialize_unique_map<'de, D, V>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueMapVisitor<V>(PhantomData<V>);

    impl<'de, V> Visitor<'de> for UniqueMapVisitor<V>
    where
        V: Deserialize<'de>,
    {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object with unique keys")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = BTreeMap::new();
            while let Some(key) = access.next_key::<String>()? {
                if out.contains_key(&key) {
                    return Err(serde::de::Error::custom(diagnostics::error_message(format!(
                        "duplicate network name '{}'",
                        key
                    ))));
                }
                let value = access.next_value::<V>()?;
                out.insert(key, value);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
}
