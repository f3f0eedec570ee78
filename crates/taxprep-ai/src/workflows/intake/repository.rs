use serde::Serialize;

use super::domain::{
    Appointment, AppointmentId, Client, ClientId, DocumentChecklist, IntakeSession, Reminder,
    ReminderId, SessionId, StaffId, TaxPro,
};

/// Keyed storage abstraction over every record type the intake workflow
/// touches. The service only needs get/insert/update per entity, so a
/// persistent backend can replace the in-memory one without touching the
/// scoring or routing logic.
pub trait ProfileStore: Send + Sync {
    fn insert_client(&self, client: Client) -> Result<Client, RepositoryError>;
    fn update_client(&self, client: Client) -> Result<(), RepositoryError>;
    fn fetch_client(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;

    fn insert_session(&self, session: IntakeSession) -> Result<IntakeSession, RepositoryError>;
    fn update_session(&self, session: IntakeSession) -> Result<(), RepositoryError>;
    fn fetch_session(&self, id: &SessionId) -> Result<Option<IntakeSession>, RepositoryError>;
    /// The in-progress session for a client, if one exists.
    fn open_session_for(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<IntakeSession>, RepositoryError>;

    /// Full overwrite keyed by client; there is at most one checklist per client.
    fn put_checklist(&self, checklist: DocumentChecklist) -> Result<(), RepositoryError>;
    fn fetch_checklist(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<DocumentChecklist>, RepositoryError>;

    fn insert_staff(&self, pro: TaxPro) -> Result<TaxPro, RepositoryError>;
    fn update_staff(&self, pro: TaxPro) -> Result<(), RepositoryError>;
    fn fetch_staff(&self, id: &StaffId) -> Result<Option<TaxPro>, RepositoryError>;
    /// Roster in seeding order; candidate scoring depends on this order being
    /// stable for deterministic tie-breaks.
    fn list_staff(&self) -> Result<Vec<TaxPro>, RepositoryError>;

    fn insert_appointment(&self, appointment: Appointment)
        -> Result<Appointment, RepositoryError>;
    fn fetch_appointment(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, RepositoryError>;

    fn insert_reminder(&self, reminder: Reminder) -> Result<Reminder, RepositoryError>;
    fn update_reminder(&self, reminder: Reminder) -> Result<(), RepositoryError>;
    fn fetch_reminder(&self, id: &ReminderId) -> Result<Option<Reminder>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound delivery hook standing in for a real email/SMS collaborator.
pub trait ReminderDispatcher: Send + Sync {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("reminder transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized client status for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ClientStatusView {
    pub client_id: ClientId,
    pub full_name: Option<String>,
    pub filing_status: &'static str,
    pub complexity_score: u8,
    pub complexity_level: &'static str,
    pub intake_completed: bool,
    pub assigned_pro: Option<StaffId>,
    pub pending_required_documents: usize,
}

/// Checklist completion over required items only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistProgress {
    pub required_total: usize,
    pub required_collected: usize,
    pub percent_complete: u8,
}

impl ChecklistProgress {
    pub fn for_checklist(checklist: &DocumentChecklist) -> Self {
        let required: Vec<_> = checklist.items.iter().filter(|item| item.required).collect();
        let collected = required.iter().filter(|item| item.collected).count();
        let percent = if required.is_empty() {
            100
        } else {
            ((collected * 100) / required.len()) as u8
        };

        Self {
            required_total: required.len(),
            required_collected: collected,
            percent_complete: percent,
        }
    }
}
