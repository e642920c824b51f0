//! Achievement intake, automated verification, reviewer workflow and accreditation
//! reporting.
//!
//! A candidate passes the intake guard, is scored by the validation engine (students
//! only), lands in a lifecycle state, may fan out reviewer notifications, and is then
//! read back through the visibility filter and the compliance aggregator.

pub mod clock;
pub mod domain;
pub mod intake;
pub mod lifecycle;
pub mod notifications;
pub mod organizers;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    AchievementCandidate, AchievementLevel, AchievementRecord, AchievementStatus, Actor, ActorId,
    Category, Notification, NotificationId, RecordId, ReviewOutcome, Role, ALL_DEPARTMENTS,
};
pub use intake::{AdmittedCandidate, IntakeGuard, ValidationInputError};
pub use lifecycle::{InvalidTransition, LifecycleController, TransitionEvent, TransitionRejection};
pub use notifications::NotificationDispatcher;
pub use organizers::{OrganizerRegistry, StaticOrganizerRegistry};
pub use report::{aggregate, ComplianceBucket, ComplianceReport};
pub use repository::{
    ActorDirectory, DeliveryError, NotificationStore, RecordRepository, RepositoryError,
};
pub use router::achievement_router;
pub use service::{AchievementService, AchievementServiceError};
pub use validation::{
    CheckFinding, ValidationCheck, ValidationConfig, ValidationEngine, ValidationResult,
};
pub use visibility::{
    can_review, can_view, group_by_event, group_by_owner, review_queue, visible_to,
    DashboardSummary, EventGroup, OwnerGroup, RecordQuery,
};
