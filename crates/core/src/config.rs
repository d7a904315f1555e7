//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the core. Nothing in
//! the core reads environment variables while validating or submitting entries.

use crate::constants::SUBMISSION_ERROR_PREFIX;
use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// What the entry builder does when only one half of an optional pair is supplied
/// (sick-leave start/end, discharge date/criteria).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartialPairPolicy {
    /// Report the missing half as a validation error.
    #[default]
    Reject,
    /// Drop the sub-object from the entry without reporting an error.
    Omit,
}

impl PartialPairPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartialPairPolicy::Reject => "reject",
            PartialPairPolicy::Omit => "omit",
        }
    }
}

impl fmt::Display for PartialPairPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartialPairPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(PartialPairPolicy::Reject),
            "omit" => Ok(PartialPairPolicy::Omit),
            other => Err(CoreError::InvalidInput(format!(
                "partial pair policy must be 'reject' or 'omit', got '{other}'"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    partial_pair_policy: PartialPairPolicy,
    submission_error_prefix: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// An empty `submission_error_prefix` disables prefix stripping.
    pub fn new(
        partial_pair_policy: PartialPairPolicy,
        submission_error_prefix: impl Into<String>,
    ) -> Self {
        Self {
            partial_pair_policy,
            submission_error_prefix: submission_error_prefix.into(),
        }
    }

    pub fn partial_pair_policy(&self) -> PartialPairPolicy {
        self.partial_pair_policy
    }

    pub fn submission_error_prefix(&self) -> &str {
        &self.submission_error_prefix
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(PartialPairPolicy::default(), SUBMISSION_ERROR_PREFIX)
    }
}

/// Parse the partial-pair policy from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default ([`PartialPairPolicy::Reject`]).
pub fn partial_pair_policy_from_env_value(value: Option<String>) -> CoreResult<PartialPairPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<PartialPairPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_rejects_partial_pairs_and_strips_store_prefix() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.partial_pair_policy(), PartialPairPolicy::Reject);
        assert_eq!(cfg.submission_error_prefix(), "Something went wrong. Error: ");
    }

    #[test]
    fn env_value_defaults_when_unset_or_blank() {
        assert_eq!(
            partial_pair_policy_from_env_value(None).expect("default"),
            PartialPairPolicy::Reject
        );
        assert_eq!(
            partial_pair_policy_from_env_value(Some("  ".into())).expect("default"),
            PartialPairPolicy::Reject
        );
    }

    #[test]
    fn env_value_is_case_insensitive() {
        assert_eq!(
            partial_pair_policy_from_env_value(Some("Omit".into())).expect("omit"),
            PartialPairPolicy::Omit
        );
    }

    #[test]
    fn env_value_rejects_unknown_policy() {
        let err = partial_pair_policy_from_env_value(Some("swap".into())).expect_err("invalid");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("swap")));
    }
}
