mod config;
pub(crate) mod rules;

pub use config::ValidationConfig;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AchievementRecord, AchievementStatus, ActorId};
use super::intake::AdmittedCandidate;
use super::organizers::{OrganizerRegistry, StaticOrganizerRegistry};

const STARTING_SCORE: i16 = 100;

/// Stateless validator that scores a candidate against prior records.
#[derive(Clone)]
pub struct ValidationEngine {
    registry: Arc<dyn OrganizerRegistry>,
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(registry: Arc<dyn OrganizerRegistry>, config: ValidationConfig) -> Self {
        Self { registry, config }
    }

    /// Scores `candidate` for `submitter`. `today` is the only clock input.
    pub fn validate(
        &self,
        candidate: &AdmittedCandidate,
        history: &[AchievementRecord],
        submitter: &ActorId,
        today: NaiveDate,
    ) -> ValidationResult {
        let findings = rules::run_checks(
            candidate,
            history,
            submitter,
            today,
            self.registry.as_ref(),
            &self.config,
        );

        let penalty: i16 = findings
            .iter()
            .map(|finding| i16::from(finding.penalty))
            .sum();
        let score = (STARTING_SCORE - penalty).clamp(0, STARTING_SCORE) as u8;
        let issues: Vec<String> = findings.iter().map(|finding| finding.issue.clone()).collect();
        let status = if issues.is_empty() {
            AchievementStatus::Approved
        } else {
            AchievementStatus::Flagged
        };

        ValidationResult {
            issues,
            score,
            status,
            findings,
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(StaticOrganizerRegistry::standard()),
            ValidationConfig::default(),
        )
    }
}

/// Automated checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    FutureDate,
    Duplicate,
    MissingCertificate,
    UnverifiedCertificate,
    UnknownOrganizer,
    LevelMismatch,
}

/// One check that fired, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFinding {
    pub check: ValidationCheck,
    pub penalty: u8,
    pub issue: String,
}

/// Outcome of a single submission attempt; folded into the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<String>,
    pub score: u8,
    /// Either `Approved` or `Flagged`; validation never recommends `Pending`.
    pub status: AchievementStatus,
    pub findings: Vec<CheckFinding>,
}

impl ValidationResult {
    pub fn fired(&self, check: ValidationCheck) -> bool {
        self.findings.iter().any(|finding| finding.check == check)
    }
}
