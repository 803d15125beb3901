//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before configuration is finalized.

use tracing::warn;

/// Warn about every variable in `names` that is unset or blank.
///
/// Returns the names that were missing so callers can decide whether the
/// configuration file is expected to cover them.
pub fn warn_missing<'a>(names: &[&'a str]) -> Vec<&'a str> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| {
            std::env::var(name)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .collect();
    for name in &missing {
        warn!(%name, "environment variable not set; falling back to config file");
    }
    missing
}
