use serde::{Deserialize, Serialize};

use crate::errors::{AllocationError, Result};

/// reference printed on the refund line when a payee has no active case
pub const NO_ACTIVE_CASES: &str = "No Active Cases";

/// what happens to a case when a payment lands exactly on its owed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExactPayoffPolicy {
    /// record the transaction, case stays active with nothing owed
    #[default]
    RemainActive,
    /// record the transaction and flip the case to paid
    MarkPaid,
}

/// allocation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub exact_payoff: ExactPayoffPolicy,
    pub no_active_cases_reference: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl AllocationConfig {
    /// only a strictly negative owed amount settles a case
    pub fn strict() -> Self {
        Self {
            exact_payoff: ExactPayoffPolicy::RemainActive,
            no_active_cases_reference: NO_ACTIVE_CASES.to_string(),
        }
    }

    /// an exact payoff also marks the case paid
    pub fn settle_on_exact_payoff() -> Self {
        Self {
            exact_payoff: ExactPayoffPolicy::MarkPaid,
            ..Self::strict()
        }
    }

    /// load from json, missing fields fall back to the strict defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| AllocationError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.no_active_cases_reference.trim().is_empty() {
            return Err(AllocationError::InvalidConfiguration {
                message: "no_active_cases_reference must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let config = AllocationConfig::default();
        assert_eq!(config.exact_payoff, ExactPayoffPolicy::RemainActive);
        assert_eq!(config.no_active_cases_reference, "No Active Cases");
    }

    #[test]
    fn test_from_json_partial() {
        let config = AllocationConfig::from_json(r#"{"exact_payoff": "mark_paid"}"#).unwrap();
        assert_eq!(config, AllocationConfig::settle_on_exact_payoff());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            AllocationConfig::from_json(r#"{"exact_payoff": "sometimes"}"#),
            Err(AllocationError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            AllocationConfig::from_json(r#"{"no_active_cases_reference": "  "}"#),
            Err(AllocationError::InvalidConfiguration { .. })
        ));
    }
}
