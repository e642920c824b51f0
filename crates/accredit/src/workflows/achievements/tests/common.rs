use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::achievements::clock::FixedClock;
use crate::workflows::achievements::domain::{
    AchievementCandidate, AchievementLevel, AchievementRecord, AchievementStatus, Actor, ActorId,
    Category, Notification, RecordId,
};
use crate::workflows::achievements::intake::{AdmittedCandidate, IntakeGuard};
use crate::workflows::achievements::lifecycle::LifecycleController;
use crate::workflows::achievements::repository::{
    ActorDirectory, DeliveryError, NotificationStore, RecordRepository, RepositoryError,
};
use crate::workflows::achievements::validation::ValidationEngine;
use crate::workflows::achievements::{achievement_router, AchievementService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

pub(super) fn past_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 20).expect("valid date")
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(today()))
}

pub(super) fn arjun() -> Actor {
    Actor::student("s1", "Arjun Sharma", "CSE").with_enrollment("21CS001", "3rd Year")
}

pub(super) fn priya() -> Actor {
    Actor::student("s2", "Priya Nair", "CSE").with_enrollment("21CS002", "3rd Year")
}

pub(super) fn kavya() -> Actor {
    Actor::student("s3", "Kavya Menon", "ECE").with_enrollment("21EC014", "2nd Year")
}

pub(super) fn meera() -> Actor {
    Actor::faculty("f1", "Dr. Meera Rao", "CSE")
}

pub(super) fn suresh() -> Actor {
    Actor::faculty("f2", "Prof. Suresh K", "ECE")
}

pub(super) fn ramesh() -> Actor {
    Actor::administrator("d1", "Dr. Ramesh Iyer")
}

pub(super) fn directory() -> Vec<Actor> {
    vec![arjun(), priya(), kavya(), meera(), suresh(), ramesh()]
}

/// Candidate that passes every automated check.
pub(super) fn clean_candidate() -> AchievementCandidate {
    AchievementCandidate {
        category: Category::Hackathon,
        title: "Smart India Hackathon 2024".to_string(),
        organizer: "MHRD".to_string(),
        date: Some(past_date()),
        position: "Winner".to_string(),
        level: AchievementLevel::National,
        has_certificate: true,
        certificate_verified: true,
        department: None,
        mentees: Vec::new(),
        evidence_url: None,
        notes: None,
    }
}

pub(super) fn aws_candidate() -> AchievementCandidate {
    AchievementCandidate {
        category: Category::Certification,
        title: "AWS Cloud Practitioner".to_string(),
        organizer: "Amazon Web Services".to_string(),
        date: Some(past_date()),
        position: "Certified".to_string(),
        level: AchievementLevel::International,
        has_certificate: true,
        certificate_verified: false,
        department: None,
        mentees: Vec::new(),
        evidence_url: None,
        notes: None,
    }
}

pub(super) fn future_uncertified_candidate() -> AchievementCandidate {
    AchievementCandidate {
        category: Category::Workshop,
        title: "ML & AI Bootcamp".to_string(),
        organizer: "IIT Bombay".to_string(),
        date: Some(NaiveDate::from_ymd_opt(2027, 1, 15).expect("valid date")),
        position: "Participated".to_string(),
        level: AchievementLevel::National,
        has_certificate: false,
        certificate_verified: false,
        department: None,
        mentees: Vec::new(),
        evidence_url: None,
        notes: None,
    }
}

pub(super) fn admit(candidate: AchievementCandidate, submitter: &Actor) -> AdmittedCandidate {
    IntakeGuard
        .admit(candidate, submitter)
        .expect("candidate is well formed")
}

pub(super) fn engine() -> ValidationEngine {
    ValidationEngine::default()
}

pub(super) fn lifecycle() -> LifecycleController {
    LifecycleController::new(engine())
}

pub(super) fn stored_record(
    id: &str,
    owner: &Actor,
    status: AchievementStatus,
    category: Category,
    level: AchievementLevel,
) -> AchievementRecord {
    AchievementRecord {
        id: RecordId(id.to_string()),
        owner_id: owner.id.clone(),
        owner_name: owner.display_name.clone(),
        roll_number: owner.roll_number.clone().unwrap_or_else(|| "—".to_string()),
        department: owner.department.clone(),
        academic_year: owner.academic_year.clone().unwrap_or_default(),
        category,
        title: format!("{} entry {id}", category.label()),
        organizer: "IEEE".to_string(),
        event_date: past_date(),
        position: "Participant".to_string(),
        level,
        has_certificate: true,
        certificate_verified: true,
        status,
        trust_score: if status == AchievementStatus::Flagged { 60 } else { 100 },
        issues: if status == AchievementStatus::Flagged {
            vec!["possible duplicate — same title and date already submitted".to_string()]
        } else {
            Vec::new()
        },
        created_by: owner.role,
        submitted_at: Utc.with_ymd_and_hms(2024, 7, 21, 9, 0, 0).unwrap(),
        reviewer_note: None,
        mentees: None,
        evidence_url: None,
        notes: None,
    }
}

pub(super) fn approved(id: &str, category: Category, level: AchievementLevel) -> AchievementRecord {
    stored_record(id, &arjun(), AchievementStatus::Approved, category, level)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecords {
    pub(super) records: Arc<Mutex<Vec<AchievementRecord>>>,
}

impl MemoryRecords {
    pub(super) fn seeded(records: Vec<AchievementRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(super) fn all_records(&self) -> Vec<AchievementRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl RecordRepository for MemoryRecords {
    fn insert(&self, record: AchievementRecord) -> Result<AchievementRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<AchievementRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<AchievementRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }

    fn compare_and_swap(
        &self,
        expected: AchievementStatus,
        record: AchievementRecord,
    ) -> Result<AchievementRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        if slot.status != expected {
            return Err(RepositoryError::StatusChanged {
                current: slot.status,
            });
        }
        *slot = record.clone();
        Ok(record)
    }
}

pub(super) struct UnavailableRecords;

impl RecordRepository for UnavailableRecords {
    fn insert(&self, _record: AchievementRecord) -> Result<AchievementRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<AchievementRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<AchievementRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn compare_and_swap(
        &self,
        _expected: AchievementStatus,
        _record: AchievementRecord,
    ) -> Result<AchievementRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Clone)]
pub(super) struct MemoryActors {
    actors: Vec<Actor>,
}

impl Default for MemoryActors {
    fn default() -> Self {
        Self {
            actors: directory(),
        }
    }
}

impl ActorDirectory for MemoryActors {
    fn fetch(&self, id: &ActorId) -> Result<Option<Actor>, RepositoryError> {
        Ok(self.actors.iter().find(|actor| &actor.id == id).cloned())
    }

    fn members(&self) -> Result<Vec<Actor>, RepositoryError> {
        Ok(self.actors.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationStore for MemoryNotifications {
    fn append(&self, notifications: Vec<Notification>) -> Result<(), DeliveryError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .extend(notifications);
        Ok(())
    }

    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, DeliveryError> {
        Ok(self
            .events()
            .into_iter()
            .filter(|notification| &notification.recipient == recipient)
            .collect())
    }

    fn mark_all_read(&self, recipient: &ActorId) -> Result<usize, DeliveryError> {
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        let mut updated = 0;
        for notification in guard
            .iter_mut()
            .filter(|notification| &notification.recipient == recipient && !notification.read)
        {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

pub(super) struct OfflineNotifications;

impl NotificationStore for OfflineNotifications {
    fn append(&self, _notifications: Vec<Notification>) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("smtp relay offline".to_string()))
    }

    fn for_recipient(&self, _recipient: &ActorId) -> Result<Vec<Notification>, DeliveryError> {
        Err(DeliveryError::Transport("smtp relay offline".to_string()))
    }

    fn mark_all_read(&self, _recipient: &ActorId) -> Result<usize, DeliveryError> {
        Err(DeliveryError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) type TestService = AchievementService<MemoryRecords, MemoryActors, MemoryNotifications>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRecords>, Arc<MemoryNotifications>) {
    build_service_with(Vec::new())
}

pub(super) fn build_service_with(
    records: Vec<AchievementRecord>,
) -> (TestService, Arc<MemoryRecords>, Arc<MemoryNotifications>) {
    let repository = Arc::new(MemoryRecords::seeded(records));
    let notifications = Arc::new(MemoryNotifications::default());
    let service = AchievementService::new(
        repository.clone(),
        Arc::new(MemoryActors::default()),
        notifications.clone(),
        lifecycle(),
    )
    .with_clock(clock());
    (service, repository, notifications)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    achievement_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
