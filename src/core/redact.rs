//! Redaction of sensitive variables.
//!
//! Values of listed variables are replaced with a placeholder before an env
//! leaves the machine (store or blob), and filled back in from a local file
//! on restore.

use tracing::debug;

use crate::core::constants::REDACTED_PLACEHOLDER;
use crate::core::domain::{Entry, Env};

/// Result of applying redaction to an env.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    /// The env with redacted values replaced by the placeholder.
    pub redacted: Env,
    /// Names of redacted variables, in file order.
    pub redacted_keys: Vec<String>,
}

/// Replace the values of `names` in `env` with the redaction placeholder.
///
/// Matching is exact and case-sensitive. Comments and blank lines pass
/// through untouched.
pub fn apply(env: &Env, names: &[String]) -> Redaction {
    let mut redacted_keys = Vec::new();

    let entries = env
        .entries()
        .iter()
        .map(|entry| match entry {
            Entry::Pair { key, .. } if names.iter().any(|n| n == key) => {
                redacted_keys.push(key.clone());
                Entry::pair(key.clone(), REDACTED_PLACEHOLDER)
            }
            other => other.clone(),
        })
        .collect();

    if !redacted_keys.is_empty() {
        debug!(count = redacted_keys.len(), "redacted variables");
    }

    Redaction {
        redacted: Env::from_entries(entries),
        redacted_keys,
    }
}

/// Fill redaction placeholders in `stored` with real values from `existing`.
///
/// `stored` dictates the key set and order. A placeholder with no
/// counterpart in `existing` is left in place.
pub fn merge(stored: &Env, existing: &Env) -> Env {
    let entries = stored
        .entries()
        .iter()
        .map(|entry| match entry {
            Entry::Pair { key, value } if value == REDACTED_PLACEHOLDER => {
                match existing.get(key) {
                    Some(real) => Entry::pair(key.clone(), real),
                    None => entry.clone(),
                }
            }
            other => other.clone(),
        })
        .collect();

    Env::from_entries(entries)
}

/// Keys of `env` that still hold the redaction placeholder.
pub fn placeholders(env: &Env) -> Vec<&str> {
    env.pairs()
        .filter(|(_, value)| *value == REDACTED_PLACEHOLDER)
        .map(|(key, _)| key)
        .collect()
}
