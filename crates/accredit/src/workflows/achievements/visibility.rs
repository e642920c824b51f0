//! Role-scoped read policy. Every screen or endpoint that lists records goes through
//! these functions; nothing here mutates a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    AchievementLevel, AchievementRecord, AchievementStatus, Actor, ActorId, Category, Role,
};

/// Administrators see everything, faculty their department, students their own records.
pub fn can_view(actor: &Actor, record: &AchievementRecord) -> bool {
    match actor.role {
        Role::Administrator => true,
        Role::Faculty => record.department == actor.department,
        Role::Student => record.owner_id == actor.id,
    }
}

/// Reviewers are administrators or faculty of the record's department.
pub fn can_review(actor: &Actor, record: &AchievementRecord) -> bool {
    match actor.role {
        Role::Administrator => true,
        Role::Faculty => record.department == actor.department,
        Role::Student => false,
    }
}

/// Records the actor may view, in input order.
pub fn visible_to(actor: &Actor, records: &[AchievementRecord]) -> Vec<AchievementRecord> {
    records
        .iter()
        .filter(|record| can_view(actor, record))
        .cloned()
        .collect()
}

/// Flagged records awaiting this actor's decision. Students never review.
pub fn review_queue(actor: &Actor, records: &[AchievementRecord]) -> Vec<AchievementRecord> {
    if actor.role == Role::Student {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| record.status == AchievementStatus::Flagged)
        .filter(|record| can_review(actor, record))
        .cloned()
        .collect()
}

/// Optional narrowing applied on top of the visibility rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<AchievementStatus>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub level: Option<AchievementLevel>,
    /// Case-insensitive match on owner name, roll number, title or organizer.
    #[serde(default)]
    pub search: Option<String>,
}

impl RecordQuery {
    pub fn is_empty(&self) -> bool {
        self == &RecordQuery::default()
    }

    pub fn matches(&self, record: &AchievementRecord) -> bool {
        if self.category.is_some_and(|category| record.category != category) {
            return false;
        }
        if self.status.is_some_and(|status| record.status != status) {
            return false;
        }
        if self.level.is_some_and(|level| record.level != level) {
            return false;
        }
        if let Some(department) = &self.department {
            if &record.department != department {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::trim) {
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                let haystacks = [
                    &record.owner_name,
                    &record.roll_number,
                    &record.title,
                    &record.organizer,
                ];
                if !haystacks
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
                {
                    return false;
                }
            }
        }
        true
    }

    pub fn apply(&self, records: Vec<AchievementRecord>) -> Vec<AchievementRecord> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

/// Headline counts for an actor's landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub approved: usize,
    pub flagged: usize,
    pub pending: usize,
    pub international: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl DashboardSummary {
    pub fn from_records(records: &[AchievementRecord]) -> Self {
        records
            .iter()
            .fold(DashboardSummary::default(), |mut summary, record| {
                summary.total += 1;
                match record.status {
                    AchievementStatus::Approved => summary.approved += 1,
                    AchievementStatus::Flagged => summary.flagged += 1,
                    AchievementStatus::Pending => summary.pending += 1,
                    AchievementStatus::Rejected => {}
                }
                if record.level == AchievementLevel::International {
                    summary.international += 1;
                }
                *summary.by_category.entry(record.category).or_default() += 1;
                summary
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerGroup {
    pub owner_id: ActorId,
    pub owner_name: String,
    pub roll_number: String,
    pub department: String,
    pub records: Vec<AchievementRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventGroup {
    pub title: String,
    pub category: Category,
    pub level: AchievementLevel,
    pub records: Vec<AchievementRecord>,
}

/// Groups records by owner, preserving first-seen order.
pub fn group_by_owner(records: &[AchievementRecord]) -> Vec<OwnerGroup> {
    let mut groups: Vec<OwnerGroup> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|group| group.owner_id == record.owner_id)
        {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(OwnerGroup {
                owner_id: record.owner_id.clone(),
                owner_name: record.owner_name.clone(),
                roll_number: record.roll_number.clone(),
                department: record.department.clone(),
                records: vec![record.clone()],
            }),
        }
    }
    groups
}

/// Groups records sharing an exact title, preserving first-seen order.
pub fn group_by_event(records: &[AchievementRecord]) -> Vec<EventGroup> {
    let mut groups: Vec<EventGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|group| group.title == record.title) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(EventGroup {
                title: record.title.clone(),
                category: record.category,
                level: record.level,
                records: vec![record.clone()],
            }),
        }
    }
    groups
}
