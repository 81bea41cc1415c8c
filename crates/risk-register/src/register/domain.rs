use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::Classification;
use super::UNTITLED_PLACEHOLDER;

/// Server-assigned identifier for a risk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub u64);

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Exact, case-sensitive lookup by wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == label)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "IN_PROGRESS", alias = "IN-PROGRESS")]
    InProgress,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "MITIGATED")]
    Mitigated,
}

impl RiskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
            Self::Mitigated => "Mitigated",
        }
    }
}

/// Read-only copy of a record owned by the remote register.
///
/// The level is only ever populated by deserialization or derived through the
/// classifier in [`RiskRecord::new`]; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRecord {
    pub id: RiskId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    probability: u8,
    impact: u8,
    risk_level: RiskLevel,
    #[serde(default)]
    pub status: Option<RiskStatus>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub mitigation_plan: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

impl RiskRecord {
    pub fn new(id: RiskId, title: Option<String>, probability: u8, impact: u8) -> Self {
        let level = Classification::for_record(probability, impact).level;
        Self {
            id,
            title,
            description: None,
            probability,
            impact,
            risk_level: level,
            status: Some(RiskStatus::Open),
            owner: None,
            mitigation_plan: None,
            category_id: None,
            recommendations: None,
        }
    }

    /// Rebuilds a record around a level delivered by an external source.
    pub(crate) fn with_reported_level(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }

    pub fn probability(&self) -> u8 {
        self.probability
    }

    pub fn impact(&self) -> u8 {
        self.impact
    }

    /// The level as delivered by the register.
    pub fn level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED_PLACEHOLDER,
        }
    }

    /// Recomputes the classification from the record's inputs.
    pub fn classification(&self) -> Classification {
        Classification::for_record(self.probability, self.impact)
    }

    pub fn is_consistent(&self) -> bool {
        self.classification().level == self.risk_level
    }
}

/// Payload for creating a new risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSubmission {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub probability: u8,
    pub impact: u8,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_plan: Option<String>,
    pub category_id: u64,
}

impl RiskSubmission {
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.title.trim().is_empty() {
            return Err(SubmissionError::MissingTitle);
        }
        if !(1..=5).contains(&self.probability) {
            return Err(SubmissionError::OutOfRange {
                field: "probability",
                value: self.probability,
            });
        }
        if !(1..=5).contains(&self.impact) {
            return Err(SubmissionError::OutOfRange {
                field: "impact",
                value: self.impact,
            });
        }
        Ok(())
    }

    pub fn classification(&self) -> Classification {
        Classification::for_record(self.probability, self.impact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("a risk needs a title")]
    MissingTitle,
    #[error("{field} must be between 1 and 5 (got {value})")]
    OutOfRange { field: &'static str, value: u8 },
}
