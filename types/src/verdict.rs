use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timestamp;

/// A submitted verdict. Opaque to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictPayload {
    pub culprit: String,
    pub motive: String,
    pub method: String,
    pub evidence: String,
    pub submitted_at: Timestamp,
    #[serde(with = "duration_millis")]
    pub elapsed_at_submission: Duration,
}

/// The four free-text fields a team fills in before submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictDraft {
    pub culprit: String,
    pub motive: String,
    pub method: String,
    pub evidence: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("incomplete dossier: missing {}", .missing.join(", "))]
pub struct IncompleteVerdict {
    pub missing: Vec<&'static str>,
}

impl VerdictDraft {
    /// Names of the fields that are empty after trimming.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("culprit", &self.culprit),
            ("motive", &self.motive),
            ("method", &self.method),
            ("evidence", &self.evidence),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Turn a complete draft into a payload stamped with submission time.
    pub fn seal(
        self,
        submitted_at: Timestamp,
        elapsed_at_submission: Duration,
    ) -> Result<VerdictPayload, IncompleteVerdict> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(IncompleteVerdict { missing });
        }
        Ok(VerdictPayload {
            culprit: self.culprit,
            motive: self.motive,
            method: self.method,
            evidence: self.evidence,
            submitted_at,
            elapsed_at_submission,
        })
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
