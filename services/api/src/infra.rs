use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use taxprep_ai::workflows::intake::{
    Appointment, AppointmentId, Client, ClientId, ComplexityLevel, DeliveryError,
    DocumentChecklist, IntakeSession, ProfileStore, Reminder, ReminderDispatcher, ReminderId,
    RepositoryError, SessionId, SessionStatus, Specialization, StaffId, TaxPro,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoreInner {
    clients: HashMap<ClientId, Client>,
    sessions: HashMap<SessionId, IntakeSession>,
    checklists: HashMap<ClientId, DocumentChecklist>,
    staff: Vec<TaxPro>,
    appointments: HashMap<AppointmentId, Appointment>,
    reminders: HashMap<ReminderId, Reminder>,
}

/// Process-lifetime keyed store. One mutex serializes every mutation, which
/// is what keeps the routing load increment and checklist overwrite atomic
/// when the server handles concurrent requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl ProfileStore for InMemoryProfileStore {
    fn insert_client(&self, client: Client) -> Result<Client, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if guard.clients.contains_key(&client.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    fn update_client(&self, client: Client) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.clients.contains_key(&client.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.clients.insert(client.id.clone(), client);
        Ok(())
    }

    fn fetch_client(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.clients.get(id).cloned())
    }

    fn insert_session(&self, session: IntakeSession) -> Result<IntakeSession, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if guard.sessions.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update_session(&self, session: IntakeSession) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.sessions.contains_key(&session.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch_session(&self, id: &SessionId) -> Result<Option<IntakeSession>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.sessions.get(id).cloned())
    }

    fn open_session_for(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<IntakeSession>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard
            .sessions
            .values()
            .find(|session| {
                session.client_id == *client_id && session.status == SessionStatus::InProgress
            })
            .cloned())
    }

    fn put_checklist(&self, checklist: DocumentChecklist) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        guard
            .checklists
            .insert(checklist.client_id.clone(), checklist);
        Ok(())
    }

    fn fetch_checklist(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<DocumentChecklist>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.checklists.get(client_id).cloned())
    }

    fn insert_staff(&self, pro: TaxPro) -> Result<TaxPro, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if guard.staff.iter().any(|existing| existing.id == pro.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.staff.push(pro.clone());
        Ok(pro)
    }

    fn update_staff(&self, pro: TaxPro) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        match guard.staff.iter_mut().find(|existing| existing.id == pro.id) {
            Some(existing) => {
                *existing = pro;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_staff(&self, id: &StaffId) -> Result<Option<TaxPro>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.staff.iter().find(|pro| pro.id == *id).cloned())
    }

    fn list_staff(&self) -> Result<Vec<TaxPro>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.staff.clone())
    }

    fn insert_appointment(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if guard.appointments.contains_key(&appointment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .appointments
            .insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }

    fn fetch_appointment(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.appointments.get(id).cloned())
    }

    fn insert_reminder(&self, reminder: Reminder) -> Result<Reminder, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        guard
            .reminders
            .insert(reminder.id.clone(), reminder.clone());
        Ok(reminder)
    }

    fn update_reminder(&self, reminder: Reminder) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.reminders.contains_key(&reminder.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.reminders.insert(reminder.id.clone(), reminder);
        Ok(())
    }

    fn fetch_reminder(&self, id: &ReminderId) -> Result<Option<Reminder>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.reminders.get(id).cloned())
    }
}

/// Stand-in delivery adapter: logs the reminder and succeeds. Real email/SMS
/// transports plug in behind the same trait.
#[derive(Default, Clone)]
pub(crate) struct LoggingReminderDispatcher;

impl ReminderDispatcher for LoggingReminderDispatcher {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError> {
        info!(
            reminder = %reminder.id.0,
            client = %reminder.client_id.0,
            channel = reminder.channel.label(),
            scheduled_for = %reminder.scheduled_for,
            "reminder dispatched: {}",
            reminder.message
        );
        Ok(())
    }
}

/// The office's standing staff directory, used when no roster CSV is given.
pub(crate) fn default_roster() -> Vec<TaxPro> {
    vec![
        TaxPro {
            id: StaffId("pro-001".to_string()),
            name: "Sarah Chen".to_string(),
            specializations: vec![
                Specialization::Individual,
                Specialization::Investments,
                Specialization::Crypto,
            ],
            max_complexity: ComplexityLevel::Expert,
            current_load: 0,
            max_daily_appointments: 4,
            available: true,
            rating: 4.9,
        },
        TaxPro {
            id: StaffId("pro-002".to_string()),
            name: "Marcus Webb".to_string(),
            specializations: vec![
                Specialization::Individual,
                Specialization::SelfEmployment,
                Specialization::SmallBusiness,
            ],
            max_complexity: ComplexityLevel::Complex,
            current_load: 0,
            max_daily_appointments: 5,
            available: true,
            rating: 4.7,
        },
        TaxPro {
            id: StaffId("pro-003".to_string()),
            name: "Priya Patel".to_string(),
            specializations: vec![
                Specialization::Individual,
                Specialization::RealEstate,
                Specialization::Investments,
            ],
            max_complexity: ComplexityLevel::Complex,
            current_load: 0,
            max_daily_appointments: 5,
            available: true,
            rating: 4.8,
        },
        TaxPro {
            id: StaffId("pro-004".to_string()),
            name: "Tom Okafor".to_string(),
            specializations: vec![Specialization::Individual],
            max_complexity: ComplexityLevel::Moderate,
            current_load: 0,
            max_daily_appointments: 6,
            available: true,
            rating: 4.5,
        },
        TaxPro {
            id: StaffId("pro-005".to_string()),
            name: "Linda Reyes".to_string(),
            specializations: vec![
                Specialization::Individual,
                Specialization::ForeignIncome,
                Specialization::SmallBusiness,
            ],
            max_complexity: ComplexityLevel::Expert,
            current_load: 0,
            max_daily_appointments: 3,
            available: true,
            rating: 4.6,
        },
    ]
}

pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
