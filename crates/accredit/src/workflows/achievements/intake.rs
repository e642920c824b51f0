use chrono::NaiveDate;

use super::domain::{
    AchievementCandidate, AchievementLevel, Actor, Category, Role, ALL_DEPARTMENTS,
};

/// Malformed candidates, rejected before any scoring runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationInputError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("administrator entries must name a department")]
    MissingDepartment,
    #[error("mentees can only be listed on research mentorship entries")]
    MenteesOutsideMentorship,
    #[error("{category} entries can only be filed by faculty or administrators")]
    RestrictedCategory { category: &'static str },
}

/// Candidate that passed intake: required fields present, strings trimmed and the
/// owning department resolved from the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedCandidate {
    pub category: Category,
    pub title: String,
    pub organizer: String,
    pub date: NaiveDate,
    pub position: String,
    pub level: AchievementLevel,
    pub has_certificate: bool,
    pub certificate_verified: bool,
    pub department: String,
    pub mentees: Option<Vec<String>>,
    pub evidence_url: Option<String>,
    pub notes: Option<String>,
}

/// Guard responsible for producing `AdmittedCandidate` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn admit(
        &self,
        candidate: AchievementCandidate,
        submitter: &Actor,
    ) -> Result<AdmittedCandidate, ValidationInputError> {
        let title = required(&candidate.title, "title")?;
        let organizer = required(&candidate.organizer, "organizer")?;
        let date = candidate
            .date
            .ok_or(ValidationInputError::MissingField("date"))?;

        if candidate.category == Category::ResearchMentorship && !submitter.role.is_trusted() {
            return Err(ValidationInputError::RestrictedCategory {
                category: Category::ResearchMentorship.label(),
            });
        }

        let mentees: Vec<String> = candidate
            .mentees
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mentees = match (candidate.category, mentees.is_empty()) {
            (_, true) => None,
            (Category::ResearchMentorship, false) => Some(mentees),
            (_, false) => return Err(ValidationInputError::MenteesOutsideMentorship),
        };

        let department = resolve_department(submitter, candidate.department.as_deref())?;

        Ok(AdmittedCandidate {
            category: candidate.category,
            title,
            organizer,
            date,
            position: candidate.position.trim().to_string(),
            level: candidate.level,
            has_certificate: candidate.has_certificate,
            certificate_verified: candidate.certificate_verified,
            department,
            mentees,
            evidence_url: candidate
                .evidence_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            notes: candidate
                .notes
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationInputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationInputError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn resolve_department(
    submitter: &Actor,
    requested: Option<&str>,
) -> Result<String, ValidationInputError> {
    match submitter.role {
        Role::Student | Role::Faculty => Ok(submitter.department.clone()),
        Role::Administrator => requested
            .map(str::trim)
            .filter(|department| !department.is_empty() && *department != ALL_DEPARTMENTS)
            .map(str::to_string)
            .ok_or(ValidationInputError::MissingDepartment),
    }
}
