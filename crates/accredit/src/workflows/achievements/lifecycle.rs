use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{
    AchievementRecord, AchievementStatus, Actor, ActorId, RecordId, ReviewOutcome,
    TRUSTED_ACADEMIC_YEAR, TRUSTED_ROLL_NUMBER,
};
use super::intake::AdmittedCandidate;
use super::validation::ValidationEngine;
use super::visibility::can_review;

const TRUSTED_SCORE: u8 = 100;

impl AchievementStatus {
    /// Edges of the lifecycle state machine. `Pending` edges exist for deferred
    /// re-validation but nothing drives them yet.
    pub const fn can_transition_to(self, next: AchievementStatus) -> bool {
        matches!(
            (self, next),
            (AchievementStatus::Pending, AchievementStatus::Approved)
                | (AchievementStatus::Pending, AchievementStatus::Flagged)
                | (AchievementStatus::Flagged, AchievementStatus::Approved)
                | (AchievementStatus::Flagged, AchievementStatus::Rejected)
        )
    }
}

/// Emitted whenever a record is created or changes status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub record: AchievementRecord,
    /// `None` when the record was just created.
    pub previous: Option<AchievementStatus>,
    pub current: AchievementStatus,
}

impl TransitionEvent {
    pub fn is_creation(&self) -> bool {
        self.previous.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransitionRejection {
    /// No edge exists from the current status to the requested one.
    IllegalEdge,
    Unauthorized { actor: ActorId },
}

impl fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionRejection::IllegalEdge => {
                write!(f, "only flagged records can be decided")
            }
            TransitionRejection::Unauthorized { actor } => {
                write!(f, "actor {actor} may not review this record")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("cannot move record {record_id} from {current} to {attempted}: {reason}")]
pub struct InvalidTransition {
    pub record_id: RecordId,
    pub attempted: AchievementStatus,
    pub current: AchievementStatus,
    pub reason: TransitionRejection,
}

/// Turns admitted candidates and reviewer decisions into record states.
#[derive(Clone, Default)]
pub struct LifecycleController {
    engine: ValidationEngine,
}

impl LifecycleController {
    pub fn new(engine: ValidationEngine) -> Self {
        Self { engine }
    }

    /// Builds the initial record. Students are scored against `history`; trusted roles
    /// are approved outright with a perfect score.
    pub fn create(
        &self,
        id: RecordId,
        candidate: AdmittedCandidate,
        submitter: &Actor,
        history: &[AchievementRecord],
        today: NaiveDate,
        submitted_at: DateTime<Utc>,
    ) -> TransitionEvent {
        let (status, trust_score, issues) = if submitter.role.is_trusted() {
            (AchievementStatus::Approved, TRUSTED_SCORE, Vec::new())
        } else {
            let result = self
                .engine
                .validate(&candidate, history, &submitter.id, today);
            (result.status, result.score, result.issues)
        };

        let (roll_number, academic_year) = if submitter.role.is_trusted() {
            (
                TRUSTED_ROLL_NUMBER.to_string(),
                TRUSTED_ACADEMIC_YEAR.to_string(),
            )
        } else {
            (
                submitter
                    .roll_number
                    .clone()
                    .unwrap_or_else(|| TRUSTED_ROLL_NUMBER.to_string()),
                submitter.academic_year.clone().unwrap_or_default(),
            )
        };

        let record = AchievementRecord {
            id,
            owner_id: submitter.id.clone(),
            owner_name: submitter.display_name.clone(),
            roll_number,
            department: candidate.department,
            academic_year,
            category: candidate.category,
            title: candidate.title,
            organizer: candidate.organizer,
            event_date: candidate.date,
            position: candidate.position,
            level: candidate.level,
            has_certificate: candidate.has_certificate,
            certificate_verified: candidate.certificate_verified,
            status,
            trust_score,
            issues,
            created_by: submitter.role,
            submitted_at,
            reviewer_note: None,
            mentees: candidate.mentees,
            evidence_url: candidate.evidence_url,
            notes: candidate.notes,
        };

        TransitionEvent {
            current: record.status,
            previous: None,
            record,
        }
    }

    /// Applies a reviewer decision to a flagged record. The caller persists the
    /// returned record with a compare-and-swap against `event.previous`.
    pub fn decide(
        &self,
        record: &AchievementRecord,
        reviewer: &Actor,
        outcome: ReviewOutcome,
        note: Option<String>,
    ) -> Result<TransitionEvent, InvalidTransition> {
        let attempted = outcome.status();

        if !can_review(reviewer, record) {
            return Err(InvalidTransition {
                record_id: record.id.clone(),
                attempted,
                current: record.status,
                reason: TransitionRejection::Unauthorized {
                    actor: reviewer.id.clone(),
                },
            });
        }

        if record.status != AchievementStatus::Flagged
            || !record.status.can_transition_to(attempted)
        {
            return Err(InvalidTransition {
                record_id: record.id.clone(),
                attempted,
                current: record.status,
                reason: TransitionRejection::IllegalEdge,
            });
        }

        let mut updated = record.clone();
        updated.status = attempted;
        updated.reviewer_note = note
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(TransitionEvent {
            previous: Some(record.status),
            current: attempted,
            record: updated,
        })
    }
}
