use core::str::FromStr;

use serde::{Deserialize, Serialize};

use ims_core::DomainError;

/// How to treat references to records that do not exist.
///
/// Applies to quantity updates against an unknown product and to orders whose
/// product is missing when a snapshot is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Skip the reference silently (quantity update is a no-op, dangling
    /// order is dropped).
    #[default]
    Lenient,
    /// Report the missing reference as an error.
    Strict,
}

impl ReferencePolicy {
    pub fn is_strict(self) -> bool {
        self == ReferencePolicy::Strict
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferencePolicy::Lenient => "lenient",
            ReferencePolicy::Strict => "strict",
        }
    }
}

impl FromStr for ReferencePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ReferencePolicy::Lenient),
            "strict" => Ok(ReferencePolicy::Strict),
            other => Err(DomainError::validation(format!(
                "unknown reference policy {other:?} (expected \"lenient\" or \"strict\")"
            ))),
        }
    }
}
