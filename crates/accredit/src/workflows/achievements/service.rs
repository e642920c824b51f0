use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::domain::{
    AchievementCandidate, AchievementRecord, AchievementStatus, Actor, ActorId, Notification,
    RecordId, ReviewOutcome,
};
use super::intake::{IntakeGuard, ValidationInputError};
use super::lifecycle::{InvalidTransition, LifecycleController, TransitionEvent, TransitionRejection};
use super::notifications::NotificationDispatcher;
use super::report::{aggregate, ComplianceReport};
use super::repository::{
    ActorDirectory, DeliveryError, NotificationStore, RecordRepository, RepositoryError,
};
use super::visibility::{
    group_by_event, group_by_owner, review_queue, visible_to, DashboardSummary, EventGroup,
    OwnerGroup, RecordQuery,
};

/// Service composing intake, the lifecycle controller, storage and notifications.
pub struct AchievementService<R, D, N> {
    guard: IntakeGuard,
    lifecycle: LifecycleController,
    dispatcher: NotificationDispatcher,
    records: Arc<R>,
    actors: Arc<D>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
    // Serializes history snapshot + insert so duplicate detection sees earlier submissions.
    submissions: Mutex<()>,
    sequence: AtomicU64,
}

impl<R, D, N> AchievementService<R, D, N>
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    pub fn new(
        records: Arc<R>,
        actors: Arc<D>,
        notifications: Arc<N>,
        lifecycle: LifecycleController,
    ) -> Self {
        Self {
            guard: IntakeGuard,
            lifecycle,
            dispatcher: NotificationDispatcher::new(),
            records,
            actors,
            notifications,
            clock: Arc::new(SystemClock),
            submissions: Mutex::new(()),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Admit, score and store a new record, then notify reviewers if it was flagged.
    pub fn submit(
        &self,
        candidate: AchievementCandidate,
        submitter_id: &ActorId,
    ) -> Result<AchievementRecord, AchievementServiceError> {
        let submitter = self.actor(submitter_id)?;
        let admitted = self.guard.admit(candidate, &submitter)?;

        let event = {
            let _serial = self
                .submissions
                .lock()
                .map_err(|_| RepositoryError::Unavailable("submission lock poisoned".into()))?;
            let history = self.records.all()?;
            let event = self.lifecycle.create(
                self.next_record_id(),
                admitted,
                &submitter,
                &history,
                self.clock.today(),
                self.clock.now(),
            );
            self.records.insert(event.record.clone())?;
            event
        };

        info!(
            record_id = %event.record.id,
            submitter = %submitter.id,
            status = event.current.label(),
            trust_score = event.record.trust_score,
            "achievement submitted"
        );

        self.dispatch(&event);
        Ok(event.record)
    }

    /// Approve or reject a flagged record on behalf of a reviewer.
    pub fn decide(
        &self,
        record_id: &RecordId,
        reviewer_id: &ActorId,
        outcome: ReviewOutcome,
        note: Option<String>,
    ) -> Result<AchievementRecord, AchievementServiceError> {
        let reviewer = self.actor(reviewer_id)?;
        let record = self
            .records
            .fetch(record_id)?
            .ok_or_else(|| AchievementServiceError::RecordNotFound(record_id.clone()))?;

        let event = self.lifecycle.decide(&record, &reviewer, outcome, note)?;
        let expected = event.previous.unwrap_or(AchievementStatus::Flagged);

        let stored = match self.records.compare_and_swap(expected, event.record.clone()) {
            Ok(stored) => stored,
            Err(RepositoryError::StatusChanged { current }) => {
                return Err(InvalidTransition {
                    record_id: record_id.clone(),
                    attempted: outcome.status(),
                    current,
                    reason: TransitionRejection::IllegalEdge,
                }
                .into());
            }
            Err(RepositoryError::NotFound) => {
                return Err(AchievementServiceError::RecordNotFound(record_id.clone()));
            }
            Err(other) => return Err(other.into()),
        };

        info!(
            record_id = %stored.id,
            reviewer = %reviewer.id,
            status = stored.status.label(),
            "review decision recorded"
        );

        self.dispatch(&event);
        Ok(stored)
    }

    pub fn list_visible(
        &self,
        actor_id: &ActorId,
    ) -> Result<Vec<AchievementRecord>, AchievementServiceError> {
        let actor = self.actor(actor_id)?;
        Ok(visible_to(&actor, &self.records.all()?))
    }

    /// Visible records narrowed by `query`.
    pub fn search(
        &self,
        actor_id: &ActorId,
        query: &RecordQuery,
    ) -> Result<Vec<AchievementRecord>, AchievementServiceError> {
        Ok(query.apply(self.list_visible(actor_id)?))
    }

    /// Visible records matching `query`, one group per owner.
    pub fn owner_groups(
        &self,
        actor_id: &ActorId,
        query: &RecordQuery,
    ) -> Result<Vec<OwnerGroup>, AchievementServiceError> {
        Ok(group_by_owner(&self.search(actor_id, query)?))
    }

    /// Visible records matching `query`, one group per event title.
    pub fn event_groups(
        &self,
        actor_id: &ActorId,
        query: &RecordQuery,
    ) -> Result<Vec<EventGroup>, AchievementServiceError> {
        Ok(group_by_event(&self.search(actor_id, query)?))
    }

    pub fn list_review_queue(
        &self,
        actor_id: &ActorId,
    ) -> Result<Vec<AchievementRecord>, AchievementServiceError> {
        let actor = self.actor(actor_id)?;
        Ok(review_queue(&actor, &self.records.all()?))
    }

    pub fn dashboard(
        &self,
        actor_id: &ActorId,
    ) -> Result<DashboardSummary, AchievementServiceError> {
        Ok(DashboardSummary::from_records(&self.list_visible(actor_id)?))
    }

    /// Compliance report over the approved records this actor can see.
    pub fn generate_report(
        &self,
        actor_id: &ActorId,
    ) -> Result<ComplianceReport, AchievementServiceError> {
        Ok(aggregate(&self.list_visible(actor_id)?))
    }

    pub fn list_notifications(
        &self,
        actor_id: &ActorId,
    ) -> Result<Vec<Notification>, AchievementServiceError> {
        let actor = self.actor(actor_id)?;
        Ok(self.notifications.for_recipient(&actor.id)?)
    }

    pub fn mark_all_read(&self, actor_id: &ActorId) -> Result<(), AchievementServiceError> {
        let actor = self.actor(actor_id)?;
        let updated = self.notifications.mark_all_read(&actor.id)?;
        debug!(actor = %actor.id, updated, "notifications marked read");
        Ok(())
    }

    fn actor(&self, id: &ActorId) -> Result<Actor, AchievementServiceError> {
        self.actors
            .fetch(id)?
            .ok_or_else(|| AchievementServiceError::ActorNotFound(id.clone()))
    }

    fn next_record_id(&self) -> RecordId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("ach-{id:06}"))
    }

    // Best effort: the record is already committed, so failures are only logged.
    fn dispatch(&self, event: &TransitionEvent) {
        let directory = match self.actors.members() {
            Ok(members) => members,
            Err(error) => {
                warn!(record_id = %event.record.id, %error, "could not resolve notification recipients");
                return;
            }
        };

        let notifications = self
            .dispatcher
            .on_transition(event, &directory, self.clock.now());
        if notifications.is_empty() {
            return;
        }

        let count = notifications.len();
        match self.notifications.append(notifications) {
            Ok(()) => debug!(record_id = %event.record.id, count, "reviewer notifications queued"),
            Err(error) => {
                warn!(record_id = %event.record.id, %error, "notification delivery failed")
            }
        }
    }
}

/// Error raised by the achievement service.
#[derive(Debug, thiserror::Error)]
pub enum AchievementServiceError {
    #[error(transparent)]
    Input(#[from] ValidationInputError),
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error("record {0} not found")]
    RecordNotFound(RecordId),
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl AchievementServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AchievementServiceError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AchievementServiceError::Transition(_) => StatusCode::CONFLICT,
            AchievementServiceError::RecordNotFound(_)
            | AchievementServiceError::ActorNotFound(_)
            | AchievementServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            AchievementServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            AchievementServiceError::Repository(_) | AchievementServiceError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
