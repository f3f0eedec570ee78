//! Guided tax intake: questionnaire sessions, document checklists, complexity
//! scoring, staff routing, and reminder composition.

pub mod checklist;
pub mod domain;
pub mod reminders;
pub mod repository;
pub mod router;
pub mod routing;
pub mod scheduling;
pub mod script;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentType, Client, ClientId,
    ComplexityLevel, DeductionType, Dependent, DocumentCategory, DocumentChecklist, DocumentItem,
    FilingStatus, IncomeType, IntakeResponse, IntakeSession, IntakeStep, Reminder,
    ReminderChannel, ReminderId, ReminderType, SessionId, SessionStatus, SituationFlag,
    Specialization, StaffId, TaxPro,
};
pub use repository::{
    ChecklistProgress, ClientStatusView, DeliveryError, ProfileStore, ReminderDispatcher,
    RepositoryError,
};
pub use router::intake_router;
pub use routing::{
    complexity_level, complexity_score, match_tax_pro, required_specializations, CandidateView,
    RoutingOutcome, RoutingPolicy,
};
pub use scheduling::AppointmentEstimate;
pub use script::{AttributeDelta, KeywordClassifier, ResponseClassifier};
pub use service::{IntakeService, IntakeServiceError, IntakeStarted, ResponseOutcome};
