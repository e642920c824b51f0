use accredit::workflows::achievements::{
    AchievementCandidate, AchievementLevel, AchievementRecord, AchievementService,
    AchievementServiceError, AchievementStatus, Actor, ActorDirectory, ActorId, Category, Clock,
    DeliveryError, LifecycleController, Notification, NotificationStore, RecordId,
    RecordRepository, RepositoryError, StaticOrganizerRegistry, ValidationConfig,
    ValidationEngine,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryService = AchievementService<
    InMemoryRecordRepository,
    InMemoryActorDirectory,
    InMemoryNotificationStore,
>;

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex.lock().map_err(|_| format!("{what} mutex poisoned"))
}

/// Records kept in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordRepository {
    records: Arc<Mutex<Vec<AchievementRecord>>>,
}

impl RecordRepository for InMemoryRecordRepository {
    fn insert(&self, record: AchievementRecord) -> Result<AchievementRecord, RepositoryError> {
        let mut guard = lock(&self.records, "repository").map_err(RepositoryError::Unavailable)?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<AchievementRecord>, RepositoryError> {
        let guard = lock(&self.records, "repository").map_err(RepositoryError::Unavailable)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<AchievementRecord>, RepositoryError> {
        let guard = lock(&self.records, "repository").map_err(RepositoryError::Unavailable)?;
        Ok(guard.clone())
    }

    fn compare_and_swap(
        &self,
        expected: AchievementStatus,
        record: AchievementRecord,
    ) -> Result<AchievementRecord, RepositoryError> {
        let mut guard = lock(&self.records, "repository").map_err(RepositoryError::Unavailable)?;
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

#[derive(Clone)]
pub(crate) struct InMemoryActorDirectory {
    actors: Arc<Vec<Actor>>,
}

impl InMemoryActorDirectory {
    /// Two students, one faculty member per department and the head of department.
    pub(crate) fn demo() -> Self {
        Self {
            actors: Arc::new(vec![
                Actor::student("s1", "Arjun Sharma", "CSE").with_enrollment("21CS001", "3rd Year"),
                Actor::student("s2", "Priya Nair", "CSE").with_enrollment("21CS002", "3rd Year"),
                Actor::faculty("f1", "Dr. Meera Rao", "CSE"),
                Actor::faculty("f2", "Prof. Suresh K", "ECE"),
                Actor::administrator("d1", "Dr. Ramesh Iyer"),
            ]),
        }
    }
}

impl ActorDirectory for InMemoryActorDirectory {
    fn fetch(&self, id: &ActorId) -> Result<Option<Actor>, RepositoryError> {
        Ok(self.actors.iter().find(|actor| &actor.id == id).cloned())
    }

    fn members(&self) -> Result<Vec<Actor>, RepositoryError> {
        Ok(self.actors.as_ref().clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationStore {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationStore for InMemoryNotificationStore {
    fn append(&self, notifications: Vec<Notification>) -> Result<(), DeliveryError> {
        let mut guard = lock(&self.events, "notification").map_err(DeliveryError::Transport)?;
        guard.extend(notifications);
        Ok(())
    }

    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, DeliveryError> {
        let guard = lock(&self.events, "notification").map_err(DeliveryError::Transport)?;
        Ok(guard
            .iter()
            .filter(|notification| &notification.recipient == recipient)
            .cloned()
            .collect())
    }

    fn mark_all_read(&self, recipient: &ActorId) -> Result<usize, DeliveryError> {
        let mut guard = lock(&self.events, "notification").map_err(DeliveryError::Transport)?;
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

/// Wires the in-memory adapters to a service whose registry carries `extra_organizers`.
pub(crate) fn build_service(extra_organizers: &[String], clock: Arc<dyn Clock>) -> InMemoryService {
    let registry = StaticOrganizerRegistry::standard().extended_with(extra_organizers.iter().cloned());
    let engine = ValidationEngine::new(Arc::new(registry), ValidationConfig::default());

    AchievementService::new(
        Arc::new(InMemoryRecordRepository::default()),
        Arc::new(InMemoryActorDirectory::demo()),
        Arc::new(InMemoryNotificationStore::default()),
        LifecycleController::new(engine),
    )
    .with_clock(clock)
}

struct DemoEntry {
    submitter: &'static str,
    category: Category,
    title: &'static str,
    organizer: &'static str,
    date: (i32, u32, u32),
    position: &'static str,
    level: AchievementLevel,
    has_certificate: bool,
    certificate_verified: bool,
    mentees: &'static [&'static str],
    evidence_url: Option<&'static str>,
    notes: Option<&'static str>,
}

const DEMO_ENTRIES: &[DemoEntry] = &[
    DemoEntry {
        submitter: "s1",
        category: Category::Hackathon,
        title: "Smart India Hackathon 2024",
        organizer: "MHRD",
        date: (2024, 8, 15),
        position: "Winner",
        level: AchievementLevel::National,
        has_certificate: true,
        certificate_verified: true,
        mentees: &[],
        evidence_url: None,
        notes: None,
    },
    DemoEntry {
        submitter: "s2",
        category: Category::Certification,
        title: "AWS Cloud Practitioner",
        organizer: "Amazon Web Services",
        date: (2024, 7, 20),
        position: "Certified",
        level: AchievementLevel::International,
        has_certificate: true,
        certificate_verified: false,
        mentees: &[],
        evidence_url: None,
        notes: None,
    },
    DemoEntry {
        submitter: "s1",
        category: Category::Workshop,
        title: "ML & AI Bootcamp",
        organizer: "IIT Bombay",
        date: (2028, 9, 10),
        position: "Participated",
        level: AchievementLevel::National,
        has_certificate: false,
        certificate_verified: false,
        mentees: &[],
        evidence_url: None,
        notes: None,
    },
    DemoEntry {
        submitter: "s2",
        category: Category::Conference,
        title: "International Conf on AI",
        organizer: "Springer",
        date: (2024, 12, 1),
        position: "Paper Accepted",
        level: AchievementLevel::International,
        has_certificate: true,
        certificate_verified: true,
        mentees: &[],
        evidence_url: None,
        notes: None,
    },
    DemoEntry {
        submitter: "f1",
        category: Category::ResearchMentorship,
        title: "Deep Learning Research Group",
        organizer: "CSE Dept",
        date: (2024, 6, 1),
        position: "Mentor",
        level: AchievementLevel::Institutional,
        has_certificate: false,
        certificate_verified: false,
        mentees: &["Arjun Sharma", "Priya Nair", "Rahul Verma"],
        evidence_url: Some("https://github.com/lab/dl-research-2024"),
        notes: Some("Mentored 6 students on vision transformers; two workshop papers submitted"),
    },
];

impl DemoEntry {
    fn candidate(&self) -> AchievementCandidate {
        let (year, month, day) = self.date;
        AchievementCandidate {
            category: self.category,
            title: self.title.to_string(),
            organizer: self.organizer.to_string(),
            date: NaiveDate::from_ymd_opt(year, month, day),
            position: self.position.to_string(),
            level: self.level,
            has_certificate: self.has_certificate,
            certificate_verified: self.certificate_verified,
            department: None,
            mentees: self.mentees.iter().map(|name| name.to_string()).collect(),
            evidence_url: self.evidence_url.map(str::to_string),
            notes: self.notes.map(str::to_string),
        }
    }
}

/// Submits the sample achievements through the normal intake path.
pub(crate) fn seed_demo_entries(
    service: &InMemoryService,
) -> Result<Vec<AchievementRecord>, AchievementServiceError> {
    DEMO_ENTRIES
        .iter()
        .map(|entry| service.submit(entry.candidate(), &ActorId(entry.submitter.to_string())))
        .collect()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
