use super::domain::{
    AchievementRecord, AchievementStatus, Actor, ActorId, Notification, RecordId,
};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RecordRepository: Send + Sync {
    fn insert(&self, record: AchievementRecord) -> Result<AchievementRecord, RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<AchievementRecord>, RepositoryError>;
    /// Every stored record in submission order.
    fn all(&self) -> Result<Vec<AchievementRecord>, RepositoryError>;
    /// Replaces the stored record only if its status still equals `expected`. The
    /// check and the write must happen as one atomic step.
    fn compare_and_swap(
        &self,
        expected: AchievementStatus,
        record: AchievementRecord,
    ) -> Result<AchievementRecord, RepositoryError>;
}

/// Lookup for the actors known to the deployment.
pub trait ActorDirectory: Send + Sync {
    fn fetch(&self, id: &ActorId) -> Result<Option<Actor>, RepositoryError>;
    fn members(&self) -> Result<Vec<Actor>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record status changed concurrently (now {current})")]
    StatusChanged { current: AchievementStatus },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Append-only outbox for reviewer notifications (in-app inbox, e-mail adapters, ...).
pub trait NotificationStore: Send + Sync {
    fn append(&self, notifications: Vec<Notification>) -> Result<(), DeliveryError>;
    /// Notifications addressed to `recipient`, oldest first.
    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, DeliveryError>;
    /// Marks every notification for `recipient` as read, returning how many changed.
    fn mark_all_read(&self, recipient: &ActorId) -> Result<usize, DeliveryError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
