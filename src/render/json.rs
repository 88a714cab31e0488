use crate::Result;
use crate::config::BuildConfiguration;

/// Pretty JSON; loading it back yields an equal configuration.
pub fn render_json(cfg: &BuildConfiguration) -> Result<String> {
    let mut text = serde_json::to_string_pretty(cfg)?;
    text.push('\n');
    Ok(text)
}
