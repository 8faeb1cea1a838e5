// Federation point-quota delegation seam.

use serde::{Deserialize, Serialize};

use crate::roster::Player;

/// Verdict returned by the external point-quota collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaVerdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuotaVerdict {
    pub fn ok() -> Self {
        QuotaVerdict {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        QuotaVerdict {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Division-aware federation point-quota validation over a simulated
/// roster. The real implementation lives with the federation data feed;
/// the engine only depends on this seam (standard championship only).
pub trait PointQuotaValidator {
    fn validate(&self, roster: &[&Player], division: &str, female_team: bool) -> QuotaVerdict;
}

/// Permissive default used when no division table is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncappedQuota;

impl PointQuotaValidator for UncappedQuota {
    fn validate(&self, _roster: &[&Player], _division: &str, _female_team: bool) -> QuotaVerdict {
        QuotaVerdict::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Gender, NationalityClass, Player};

    fn player(points: u32) -> Player {
        Player {
            id: "p1".into(),
            name: "Test".into(),
            gender: Gender::Male,
            nationality: NationalityClass::Domestic,
            points,
            history: Default::default(),
        }
    }

    #[test]
    fn uncapped_quota_accepts_everything() {
        let p = player(4000);
        let verdict = UncappedQuota.validate(&[&p], "D1", false);
        assert!(verdict.valid);
        assert!(verdict.reason.is_none());
    }

    #[test]
    fn verdict_serde_skips_absent_reason() {
        let json = serde_json::to_string(&QuotaVerdict::ok()).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
        let back: QuotaVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QuotaVerdict::ok());
    }
}
