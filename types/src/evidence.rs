//! Evidence codes and the reference catalog they are checked against.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An evidence code in canonical form: trimmed and upper-cased.
///
/// Two codes that differ only in casing or surrounding whitespace normalize
/// to the same value, so equality on `EvidenceCode` is the case-insensitive
/// comparison the dossier relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvidenceCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("evidence code must not be empty")]
pub struct EvidenceCodeError;

impl EvidenceCode {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EvidenceCodeError> {
        let canonical = raw.as_ref().trim().to_uppercase();
        if canonical.is_empty() {
            Err(EvidenceCodeError)
        } else {
            Ok(Self(canonical))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for EvidenceCode {
    type Error = EvidenceCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EvidenceCode {
    type Error = EvidenceCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EvidenceCode> for String {
    fn from(value: EvidenceCode) -> Self {
        value.0
    }
}

impl AsRef<str> for EvidenceCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EvidenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A code printed on a physical evidence marker, with the text shown once it
/// has been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

/// Title shown for a verified code that the catalog does not know about.
pub const UNCLASSIFIED_TITLE: &str = "Unclassified Item";

pub const EVIDENCE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        code: "PHY-09",
        title: "Physical Evidence",
        message: "Valid Physical Evidence",
    },
    CatalogEntry {
        code: "DIG-14",
        title: "Digital Evidence",
        message: "Digital Record Confirmed",
    },
    CatalogEntry {
        code: "CCTV-21",
        title: "CCTV Footage",
        message: "Footage Log Accepted",
    },
    CatalogEntry {
        code: "FOR-33",
        title: "Forensic Report",
        message: "Forensic Match Verified",
    },
    CatalogEntry {
        code: "WIT-07",
        title: "Witness Testimony",
        message: "Witness Account Logged",
    },
    CatalogEntry {
        code: "SUS-56",
        title: "Suspect ID List",
        message: "Suspect Identity Confirmed",
    },
];

#[must_use]
pub fn lookup_evidence(code: &EvidenceCode) -> Option<&'static CatalogEntry> {
    EVIDENCE_CATALOG
        .iter()
        .find(|entry| entry.code == code.as_str())
}

/// Catalog title for a code, falling back to [`UNCLASSIFIED_TITLE`].
#[must_use]
pub fn catalog_title(code: &EvidenceCode) -> &'static str {
    lookup_evidence(code).map_or(UNCLASSIFIED_TITLE, |entry| entry.title)
}
