//! Uniform wording for errors and warnings.

/// Prefix every user-facing error with the config context so failures
/// from nested `with_context` chains stay recognisable.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("config error: {}", msg.as_ref())
}

/// Emit a non-fatal problem through the logger.
pub fn warn(msg: impl AsRef<str>) {
    log::warn!("config warning: {}", msg.as_ref());
}
