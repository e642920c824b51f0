use chrono::NaiveDate;

use super::super::domain::{AchievementLevel, AchievementRecord, ActorId};
use super::super::intake::AdmittedCandidate;
use super::super::organizers::OrganizerRegistry;
use super::config::ValidationConfig;
use super::{CheckFinding, ValidationCheck};

pub(crate) const FUTURE_DATE_ISSUE: &str =
    "date is in the future — likely a typo or incorrect entry";
pub(crate) const DUPLICATE_ISSUE: &str =
    "possible duplicate — same title and date already submitted";
pub(crate) const MISSING_CERTIFICATE_ISSUE: &str =
    "no certificate attached — participation cannot be verified";
pub(crate) const UNVERIFIED_CERTIFICATE_ISSUE: &str =
    "certificate QR/code not scanned — authenticity unverified";
pub(crate) const LEVEL_MISMATCH_ISSUE: &str =
    "level marked 'International' but organizer does not appear to be an international body";

pub(crate) fn unknown_organizer_issue(organizer: &str) -> String {
    format!(
        "organizer \"{organizer}\" is not in the verified organizer registry — requires manual verification"
    )
}

/// Runs every check in display order and returns the findings that fired.
pub(crate) fn run_checks(
    candidate: &AdmittedCandidate,
    history: &[AchievementRecord],
    submitter: &ActorId,
    today: NaiveDate,
    registry: &dyn OrganizerRegistry,
    config: &ValidationConfig,
) -> Vec<CheckFinding> {
    let mut findings = Vec::new();

    if candidate.date > today {
        findings.push(CheckFinding {
            check: ValidationCheck::FutureDate,
            penalty: config.future_date_penalty,
            issue: FUTURE_DATE_ISSUE.to_string(),
        });
    }

    if is_duplicate(candidate, history, submitter) {
        findings.push(CheckFinding {
            check: ValidationCheck::Duplicate,
            penalty: config.duplicate_penalty,
            issue: DUPLICATE_ISSUE.to_string(),
        });
    }

    if !candidate.has_certificate {
        findings.push(CheckFinding {
            check: ValidationCheck::MissingCertificate,
            penalty: config.missing_certificate_penalty,
            issue: MISSING_CERTIFICATE_ISSUE.to_string(),
        });
    } else if !candidate.certificate_verified {
        findings.push(CheckFinding {
            check: ValidationCheck::UnverifiedCertificate,
            penalty: config.unverified_certificate_penalty,
            issue: UNVERIFIED_CERTIFICATE_ISSUE.to_string(),
        });
    }

    let organizer = candidate.organizer.to_lowercase();
    if organizer.chars().count() > 2 && !registry.is_known(&organizer) {
        findings.push(CheckFinding {
            check: ValidationCheck::UnknownOrganizer,
            penalty: config.unknown_organizer_penalty,
            issue: unknown_organizer_issue(&candidate.organizer),
        });
    }

    if candidate.level == AchievementLevel::International
        && !registry.signals_international(&organizer)
    {
        findings.push(CheckFinding {
            check: ValidationCheck::LevelMismatch,
            penalty: config.level_mismatch_penalty,
            issue: LEVEL_MISMATCH_ISSUE.to_string(),
        });
    }

    findings
}

fn is_duplicate(
    candidate: &AdmittedCandidate,
    history: &[AchievementRecord],
    submitter: &ActorId,
) -> bool {
    let title = candidate.title.to_lowercase();
    history.iter().any(|record| {
        &record.owner_id == submitter
            && record.event_date == candidate.date
            && record.title.to_lowercase() == title
    })
}
