use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::intake::domain::{
    Appointment, AppointmentId, Client, ClientId, ComplexityLevel, DeductionType, Dependent,
    DocumentChecklist, IncomeType, IntakeSession, Reminder, ReminderId, SessionId, SessionStatus,
    Specialization, StaffId, TaxPro,
};
use crate::workflows::intake::repository::{
    DeliveryError, ProfileStore, ReminderDispatcher, RepositoryError,
};
use crate::workflows::intake::routing::RoutingPolicy;
use crate::workflows::intake::service::IntakeService;

#[derive(Default)]
struct StoreInner {
    clients: HashMap<ClientId, Client>,
    sessions: HashMap<SessionId, IntakeSession>,
    checklists: HashMap<ClientId, DocumentChecklist>,
    staff: Vec<TaxPro>,
    appointments: HashMap<AppointmentId, Appointment>,
    reminders: HashMap<ReminderId, Reminder>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl ProfileStore for MemoryStore {
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
        guard.reminders.insert(reminder.id.clone(), reminder);
        Ok(())
    }

    fn fetch_reminder(&self, id: &ReminderId) -> Result<Option<Reminder>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.reminders.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDispatcher {
    delivered: Arc<Mutex<Vec<Reminder>>>,
}

impl MemoryDispatcher {
    pub(super) fn delivered(&self) -> Vec<Reminder> {
        self.delivered.lock().expect("dispatch mutex poisoned").clone()
    }
}

impl ReminderDispatcher for MemoryDispatcher {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .expect("dispatch mutex poisoned")
            .push(reminder.clone());
        Ok(())
    }
}

pub(super) fn build_service() -> (
    IntakeService<MemoryStore, MemoryDispatcher>,
    Arc<MemoryStore>,
    Arc<MemoryDispatcher>,
) {
    let store = Arc::new(MemoryStore::default());
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let service = IntakeService::new(store.clone(), dispatcher.clone(), RoutingPolicy::default());
    (service, store, dispatcher)
}

pub(super) fn fixed_instant() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 10, 15, 0, 0).single().expect("valid instant")
}

/// The crypto filer from the routing examples: single, W-2 wages plus crypto
/// income, crypto flag set, no dependents. Scores 55.
pub(super) fn crypto_client(suffix: &str) -> Client {
    let mut client = Client::new(ClientId(format!("client-{suffix}")), fixed_instant());
    client.full_name = Some("Jordan Alvarez".to_string());
    client.income_types.insert(IncomeType::WagesW2);
    client.income_types.insert(IncomeType::CryptoIncome);
    client.has_crypto = true;
    client
}

pub(super) fn simple_client(suffix: &str) -> Client {
    let mut client = Client::new(ClientId(format!("client-{suffix}")), fixed_instant());
    client.income_types.insert(IncomeType::WagesW2);
    client
}

pub(super) fn saturated_client(suffix: &str) -> Client {
    let mut client = Client::new(ClientId(format!("client-{suffix}")), fixed_instant());
    client.income_types.extend([
        IncomeType::WagesW2,
        IncomeType::SelfEmployment,
        IncomeType::Freelance,
        IncomeType::GigEconomy,
        IncomeType::Investments,
        IncomeType::Dividends,
        IncomeType::CapitalGains,
        IncomeType::RentalIncome,
        IncomeType::CryptoIncome,
        IncomeType::ForeignIncome,
        IncomeType::Retirement,
        IncomeType::Unemployment,
    ]);
    client.deductions.extend([
        DeductionType::MortgageInterest,
        DeductionType::CharitableGiving,
        DeductionType::MedicalExpenses,
        DeductionType::Education,
        DeductionType::Childcare,
        DeductionType::HomeOffice,
        DeductionType::RetirementContributions,
        DeductionType::StateLocalTaxes,
    ]);
    client.has_crypto = true;
    client.has_foreign_accounts = true;
    client.has_rental_property = true;
    client.has_business_income = true;
    client.dependents = (1..=10).map(Dependent::unnamed).collect();
    client
}

pub(super) fn pro(
    id: &str,
    name: &str,
    specializations: &[Specialization],
    max_complexity: ComplexityLevel,
    current_load: u32,
    max_daily: u32,
    rating: f32,
) -> TaxPro {
    TaxPro {
        id: StaffId(id.to_string()),
        name: name.to_string(),
        specializations: specializations.to_vec(),
        max_complexity,
        current_load,
        max_daily_appointments: max_daily,
        available: true,
        rating,
    }
}

pub(super) fn office_roster() -> Vec<TaxPro> {
    vec![
        pro(
            "pro-001",
            "Sarah Chen",
            &[
                Specialization::Individual,
                Specialization::Investments,
                Specialization::Crypto,
            ],
            ComplexityLevel::Expert,
            1,
            4,
            4.9,
        ),
        pro(
            "pro-002",
            "Marcus Webb",
            &[
                Specialization::Individual,
                Specialization::SelfEmployment,
                Specialization::SmallBusiness,
            ],
            ComplexityLevel::Complex,
            2,
            5,
            4.7,
        ),
        pro(
            "pro-003",
            "Priya Patel",
            &[
                Specialization::Individual,
                Specialization::RealEstate,
                Specialization::Investments,
            ],
            ComplexityLevel::Complex,
            0,
            5,
            4.8,
        ),
        pro(
            "pro-004",
            "Tom Okafor",
            &[Specialization::Individual],
            ComplexityLevel::Moderate,
            1,
            6,
            4.5,
        ),
        pro(
            "pro-005",
            "Linda Reyes",
            &[
                Specialization::Individual,
                Specialization::ForeignIncome,
                Specialization::SmallBusiness,
            ],
            ComplexityLevel::Expert,
            2,
            3,
            4.6,
        ),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
