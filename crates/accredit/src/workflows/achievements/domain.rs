use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Department sentinel carried by administrators.
pub const ALL_DEPARTMENTS: &str = "ALL";

/// Roll number and academic year stamped on entries filed by trusted roles.
pub const TRUSTED_ROLL_NUMBER: &str = "—";
pub const TRUSTED_ACADEMIC_YEAR: &str = "Faculty";

/// Identifier wrapper for stored achievement records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for students, faculty and administrators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Administrator,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Administrator => "administrator",
        }
    }

    /// Trusted roles assert ground truth directly and skip automated scoring.
    pub const fn is_trusted(self) -> bool {
        matches!(self, Role::Faculty | Role::Administrator)
    }
}

/// A person acting on the engine. The role never changes for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    pub department: String,
    pub display_name: String,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
}

impl Actor {
    pub fn student(id: &str, name: &str, department: &str) -> Self {
        Self {
            id: ActorId(id.to_string()),
            role: Role::Student,
            department: department.to_string(),
            display_name: name.to_string(),
            roll_number: None,
            academic_year: None,
        }
    }

    pub fn faculty(id: &str, name: &str, department: &str) -> Self {
        Self {
            id: ActorId(id.to_string()),
            role: Role::Faculty,
            department: department.to_string(),
            display_name: name.to_string(),
            roll_number: None,
            academic_year: None,
        }
    }

    pub fn administrator(id: &str, name: &str) -> Self {
        Self {
            id: ActorId(id.to_string()),
            role: Role::Administrator,
            department: ALL_DEPARTMENTS.to_string(),
            display_name: name.to_string(),
            roll_number: None,
            academic_year: None,
        }
    }

    pub fn with_enrollment(mut self, roll_number: &str, academic_year: &str) -> Self {
        self.roll_number = Some(roll_number.to_string());
        self.academic_year = Some(academic_year.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hackathon,
    Workshop,
    Certification,
    Internship,
    Conference,
    Competition,
    ResearchMentorship,
    Project,
}

impl Category {
    pub const fn ordered() -> [Category; 8] {
        [
            Category::Hackathon,
            Category::Workshop,
            Category::Certification,
            Category::Internship,
            Category::Conference,
            Category::Competition,
            Category::ResearchMentorship,
            Category::Project,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Hackathon => "Hackathon",
            Category::Workshop => "Workshop",
            Category::Certification => "Certification",
            Category::Internship => "Internship",
            Category::Conference => "Conference",
            Category::Competition => "Competition",
            Category::ResearchMentorship => "Research Mentorship",
            Category::Project => "Project",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementLevel {
    International,
    National,
    State,
    Industry,
    Institutional,
}

impl AchievementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            AchievementLevel::International => "International",
            AchievementLevel::National => "National",
            AchievementLevel::State => "State",
            AchievementLevel::Industry => "Industry",
            AchievementLevel::Institutional => "Institutional",
        }
    }
}

/// Lifecycle status of a record. `Pending` is legal but nothing produces it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementStatus {
    Pending,
    Approved,
    Flagged,
    Rejected,
}

impl AchievementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AchievementStatus::Pending => "pending",
            AchievementStatus::Approved => "approved",
            AchievementStatus::Flagged => "flagged",
            AchievementStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            AchievementStatus::Approved | AchievementStatus::Rejected
        )
    }
}

impl fmt::Display for AchievementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal outcomes a reviewer may assign to a flagged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Approved,
    Rejected,
}

impl ReviewOutcome {
    pub const fn status(self) -> AchievementStatus {
        match self {
            ReviewOutcome::Approved => AchievementStatus::Approved,
            ReviewOutcome::Rejected => AchievementStatus::Rejected,
        }
    }
}

/// Claimed accomplishment as entered by the submitter, before intake checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementCandidate {
    pub category: Category,
    pub title: String,
    pub organizer: String,
    /// Blank strings, as sent by an empty date input, read as missing.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub position: String,
    pub level: AchievementLevel,
    #[serde(default)]
    pub has_certificate: bool,
    #[serde(default)]
    pub certificate_verified: bool,
    /// Only honoured for administrators filing on behalf of a department.
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub mentees: Vec<String>,
    #[serde(default)]
    pub evidence_url: Option<String>,
    /// Free-text context: participants, outcomes, publications.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored achievement record, owned by the workflow engine once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: RecordId,
    pub owner_id: ActorId,
    pub owner_name: String,
    pub roll_number: String,
    pub department: String,
    pub academic_year: String,
    pub category: Category,
    pub title: String,
    pub organizer: String,
    pub event_date: NaiveDate,
    pub position: String,
    pub level: AchievementLevel,
    pub has_certificate: bool,
    pub certificate_verified: bool,
    pub status: AchievementStatus,
    pub trust_score: u8,
    pub issues: Vec<String>,
    pub created_by: Role,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// In-app message produced for reviewers when a submission needs attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: ActorId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
