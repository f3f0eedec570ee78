use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::checklist;
use super::domain::{
    Appointment, AppointmentId, AppointmentType, Client, ClientId, DocumentChecklist,
    IntakeResponse, IntakeSession, IntakeStep, Reminder, ReminderChannel, ReminderId,
    ReminderType, SessionId, SessionStatus, StaffId, TaxPro,
};
use super::reminders;
use super::repository::{
    ChecklistProgress, ClientStatusView, DeliveryError, ProfileStore, ReminderDispatcher,
    RepositoryError,
};
use super::routing::{
    complexity_level, complexity_score, match_tax_pro, RoutingOutcome, RoutingPolicy,
};
use super::scheduling::{build_appointment, AppointmentEstimate};
use super::script::{
    questions_for, short_circuits, AttributeDelta, KeywordClassifier, ResponseClassifier,
};

static CLIENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPOINTMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static REMINDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = CLIENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ClientId(format!("client-{id:06}"))
}

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

fn next_appointment_id() -> AppointmentId {
    let id = APPOINTMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AppointmentId(format!("appt-{id:06}"))
}

fn next_reminder_id() -> ReminderId {
    let id = REMINDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReminderId(format!("rem-{id:06}"))
}

/// Service composing the profile store, answer classifier, routing policy,
/// and reminder dispatcher.
pub struct IntakeService<R, D> {
    store: Arc<R>,
    dispatcher: Arc<D>,
    classifier: Arc<dyn ResponseClassifier>,
    policy: RoutingPolicy,
}

impl<R, D> IntakeService<R, D>
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    pub fn new(store: Arc<R>, dispatcher: Arc<D>, policy: RoutingPolicy) -> Self {
        Self::with_classifier(store, dispatcher, policy, Arc::new(KeywordClassifier))
    }

    pub fn with_classifier(
        store: Arc<R>,
        dispatcher: Arc<D>,
        policy: RoutingPolicy,
        classifier: Arc<dyn ResponseClassifier>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            classifier,
            policy,
        }
    }

    /// Load the staff directory. Meant to run once at startup; re-seeding an
    /// existing id is a conflict.
    pub fn seed_roster(&self, roster: Vec<TaxPro>) -> Result<(), IntakeServiceError> {
        for pro in roster {
            self.store.insert_staff(pro)?;
        }
        Ok(())
    }

    /// Resume the client's in-progress session, or create a fresh client and
    /// session when no client id is given (or no session is open).
    pub fn start_intake(
        &self,
        client_id: Option<ClientId>,
    ) -> Result<IntakeStarted, IntakeServiceError> {
        let now = Utc::now();

        let client = match client_id {
            Some(id) => self
                .store
                .fetch_client(&id)?
                .ok_or(RepositoryError::NotFound)?,
            None => self.store.insert_client(Client::new(next_client_id(), now))?,
        };

        let session = match self.store.open_session_for(&client.id)? {
            Some(existing) => existing,
            None => self
                .store
                .insert_session(IntakeSession::new(next_session_id(), client.id.clone(), now))?,
        };

        let prompt = next_prompt(&session);

        Ok(IntakeStarted {
            session_id: session.id.clone(),
            client_id: client.id.clone(),
            step: session.current_step,
            prompt,
        })
    }

    /// Record one answer: log the exchange, apply keyword inferences to the
    /// client, and advance the step machine when the step is exhausted or an
    /// early exit fires.
    pub fn record_response(
        &self,
        session_id: &SessionId,
        answer: &str,
    ) -> Result<ResponseOutcome, IntakeServiceError> {
        let now = Utc::now();

        let mut session = self
            .store
            .fetch_session(session_id)?
            .ok_or(RepositoryError::NotFound)?;

        if session.status != SessionStatus::InProgress {
            return Err(IntakeServiceError::InvalidState(format!(
                "intake session is already {}",
                session.status.label()
            )));
        }

        let mut client = self
            .store
            .fetch_client(&session.client_id)?
            .ok_or(RepositoryError::NotFound)?;

        let step = session.current_step;
        let questions = questions_for(step);
        let answered = session.answered_on_current_step();
        let question = questions.get(answered).copied().unwrap_or("");

        session.responses.push(IntakeResponse {
            step,
            question: question.to_string(),
            answer: answer.to_string(),
            recorded_at: now,
        });

        for delta in self.classifier.classify(step, answer) {
            apply_delta(&mut client, delta);
        }

        let step_done = answered + 1 >= questions.len() || short_circuits(step, answer);
        if step_done {
            session.completed_steps.push(step);
            if let Some(next) = step.next() {
                session.current_step = next;
                if next == IntakeStep::Complete {
                    session.status = SessionStatus::Completed;
                    client.intake_completed = true;
                    client.intake_completed_at = Some(now);
                    info!(client = %client.id.0, "intake completed");
                }
            }
        }

        self.store.update_client(client)?;
        self.store.update_session(session.clone())?;

        let next_question = if session.status == SessionStatus::InProgress {
            next_prompt(&session)
        } else {
            None
        };

        Ok(ResponseOutcome {
            session_id: session.id,
            recorded_step: step,
            current_step: session.current_step,
            next_question,
            intake_completed: session.status == SessionStatus::Completed,
        })
    }

    /// Regenerate the client's checklist from current attributes. Overwrites
    /// any stored checklist and refreshes the client's pending-required list.
    pub fn generate_checklist(
        &self,
        client_id: &ClientId,
    ) -> Result<DocumentChecklist, IntakeServiceError> {
        let mut client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;

        let generated = checklist::generate(&client, Utc::now());
        client.documents_pending = checklist::pending_required_ids(&generated);

        self.store.update_client(client)?;
        self.store.put_checklist(generated.clone())?;

        Ok(generated)
    }

    pub fn checklist(&self, client_id: &ClientId) -> Result<DocumentChecklist, IntakeServiceError> {
        self.store
            .fetch_checklist(client_id)?
            .ok_or_else(|| RepositoryError::NotFound.into())
    }

    /// Mark a checklist item as handed over. Unknown item ids fail without
    /// mutating anything.
    pub fn mark_document_collected(
        &self,
        client_id: &ClientId,
        document_id: &str,
    ) -> Result<DocumentChecklist, IntakeServiceError> {
        let mut client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;

        let mut stored = self.store.fetch_checklist(client_id)?.ok_or_else(|| {
            IntakeServiceError::InvalidState(
                "no checklist has been generated for this client".to_string(),
            )
        })?;

        let item = stored
            .items
            .iter_mut()
            .find(|item| item.id == document_id)
            .ok_or_else(|| {
                IntakeServiceError::InvalidState("Document not found in checklist".to_string())
            })?;

        item.collected = true;
        let key = item.key.clone();
        stored.updated_at = Utc::now();

        client.documents_collected.insert(key);
        client.documents_pending = checklist::pending_required_ids(&stored);

        self.store.update_client(client)?;
        self.store.put_checklist(stored.clone())?;

        Ok(stored)
    }

    pub fn checklist_progress(
        &self,
        client_id: &ClientId,
    ) -> Result<ChecklistProgress, IntakeServiceError> {
        let stored = self
            .store
            .fetch_checklist(client_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(ChecklistProgress::for_checklist(&stored))
    }

    /// Score the client and find the best available preparer without
    /// committing an assignment. The freshly computed score is persisted onto
    /// the client record even on this read-style path; callers that need a
    /// side-effect-free score should use `routing::complexity_score` directly.
    pub fn recommend_tax_pro(
        &self,
        client_id: &ClientId,
    ) -> Result<RoutingOutcome, IntakeServiceError> {
        let mut client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;

        client.complexity_score = complexity_score(&client);
        self.store.update_client(client.clone())?;

        let roster = self.store.list_staff()?;
        Ok(match_tax_pro(&client, &roster, &self.policy))
    }

    /// Commit the best match: persist the assignment and take exactly one
    /// slot of the chosen preparer's daily capacity.
    pub fn route_client(&self, client_id: &ClientId) -> Result<RoutingOutcome, IntakeServiceError> {
        let outcome = self.recommend_tax_pro(client_id)?;

        if let Some(selected) = &outcome.selected {
            let mut client = self
                .store
                .fetch_client(client_id)?
                .ok_or(RepositoryError::NotFound)?;
            client.assigned_pro = Some(selected.staff_id.clone());
            self.store.update_client(client)?;

            let mut pro = self
                .store
                .fetch_staff(&selected.staff_id)?
                .ok_or(RepositoryError::NotFound)?;
            pro.current_load += 1;
            self.store.update_staff(pro)?;

            info!(
                client = %client_id.0,
                staff = %selected.staff_id.0,
                score = selected.match_score,
                "client routed"
            );
        }

        Ok(outcome)
    }

    pub fn create_appointment(
        &self,
        client_id: &ClientId,
        staff_id: &StaffId,
        scheduled_at: DateTime<Utc>,
        kind: AppointmentType,
    ) -> Result<Appointment, IntakeServiceError> {
        let client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;
        let pro = self
            .store
            .fetch_staff(staff_id)?
            .ok_or(RepositoryError::NotFound)?;

        let appointment = build_appointment(
            next_appointment_id(),
            &client,
            pro.id,
            scheduled_at,
            kind,
            Utc::now(),
        );

        Ok(self.store.insert_appointment(appointment)?)
    }

    pub fn appointment_estimate(
        &self,
        client_id: &ClientId,
    ) -> Result<AppointmentEstimate, IntakeServiceError> {
        let client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(AppointmentEstimate::for_client(&client))
    }

    /// One reminder per pending required document, scheduled 24 hours out.
    pub fn compose_document_reminders(
        &self,
        client_id: &ClientId,
        channel: ReminderChannel,
    ) -> Result<Vec<Reminder>, IntakeServiceError> {
        let client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;

        let stored = self.store.fetch_checklist(client_id)?.ok_or_else(|| {
            IntakeServiceError::InvalidState(
                "no checklist has been generated for this client".to_string(),
            )
        })?;

        let now = Utc::now();
        let mut composed = Vec::new();
        for item in stored.items.iter().filter(|item| item.required && !item.collected) {
            let reminder = Reminder {
                id: next_reminder_id(),
                client_id: client.id.clone(),
                appointment_id: None,
                kind: ReminderType::DocumentRequest,
                message: reminders::document_message(item),
                scheduled_for: reminders::document_reminder_time(now),
                sent: false,
                sent_at: None,
                channel,
                document_item_ids: vec![item.id.clone()],
            };
            composed.push(self.store.insert_reminder(reminder)?);
        }

        Ok(composed)
    }

    /// One combined reminder 48 hours before the appointment listing every
    /// outstanding document.
    pub fn compose_appointment_reminder(
        &self,
        appointment_id: &AppointmentId,
        channel: ReminderChannel,
    ) -> Result<Reminder, IntakeServiceError> {
        let appointment = self
            .store
            .fetch_appointment(appointment_id)?
            .ok_or(RepositoryError::NotFound)?;
        let client = self
            .store
            .fetch_client(&appointment.client_id)?
            .ok_or(RepositoryError::NotFound)?;

        let stored = self.store.fetch_checklist(&client.id)?;
        let pending: Vec<&super::domain::DocumentItem> = stored
            .as_ref()
            .map(|checklist| {
                checklist
                    .items
                    .iter()
                    .filter(|item| item.required && !item.collected)
                    .collect()
            })
            .unwrap_or_default();

        let reminder = Reminder {
            id: next_reminder_id(),
            client_id: client.id.clone(),
            appointment_id: Some(appointment.id.clone()),
            kind: ReminderType::AppointmentPrep,
            message: reminders::appointment_prep_message(
                client.full_name.as_deref(),
                &appointment,
                &pending,
            ),
            scheduled_for: reminders::appointment_reminder_time(&appointment),
            sent: false,
            sent_at: None,
            channel,
            document_item_ids: pending.iter().map(|item| item.id.clone()).collect(),
        };

        Ok(self.store.insert_reminder(reminder)?)
    }

    /// Hand the reminder to the dispatcher and mark it sent. Re-sending is
    /// rejected.
    pub fn send_reminder(&self, reminder_id: &ReminderId) -> Result<Reminder, IntakeServiceError> {
        let mut reminder = self
            .store
            .fetch_reminder(reminder_id)?
            .ok_or(RepositoryError::NotFound)?;

        if reminder.sent {
            return Err(IntakeServiceError::InvalidState(
                "reminder has already been sent".to_string(),
            ));
        }

        self.dispatcher.deliver(&reminder)?;

        reminder.sent = true;
        reminder.sent_at = Some(Utc::now());
        self.store.update_reminder(reminder.clone())?;

        Ok(reminder)
    }

    pub fn client_status(
        &self,
        client_id: &ClientId,
    ) -> Result<ClientStatusView, IntakeServiceError> {
        let client = self
            .store
            .fetch_client(client_id)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(ClientStatusView {
            client_id: client.id.clone(),
            full_name: client.full_name.clone(),
            filing_status: client.filing_status.label(),
            complexity_score: client.complexity_score,
            complexity_level: complexity_level(client.complexity_score).label(),
            intake_completed: client.intake_completed,
            assigned_pro: client.assigned_pro.clone(),
            pending_required_documents: client.documents_pending.len(),
        })
    }
}

fn next_prompt(session: &IntakeSession) -> Option<String> {
    questions_for(session.current_step)
        .get(session.answered_on_current_step())
        .map(|question| (*question).to_string())
}

fn apply_delta(client: &mut Client, delta: AttributeDelta) {
    match delta {
        AttributeDelta::FullName(name) => client.full_name = Some(name),
        AttributeDelta::Email(email) => client.email = Some(email),
        AttributeDelta::Phone(phone) => client.phone = Some(phone),
        AttributeDelta::Filing(status) => client.filing_status = status,
        AttributeDelta::DependentCount(count) => {
            if count < client.dependents.len() {
                client.dependents.truncate(count);
            } else {
                for position in client.dependents.len()..count {
                    client
                        .dependents
                        .push(super::domain::Dependent::unnamed(position + 1));
                }
            }
        }
        AttributeDelta::Income(income) => {
            client.income_types.insert(income);
        }
        AttributeDelta::Deduction(deduction) => {
            client.deductions.insert(deduction);
        }
        AttributeDelta::Situation(flag) => client.set_situation(flag),
        AttributeDelta::DocumentCollected(key) => {
            client.documents_collected.insert(key.to_string());
        }
    }
}

/// Confirmation returned when an intake starts or resumes.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeStarted {
    pub session_id: SessionId,
    pub client_id: ClientId,
    pub step: IntakeStep,
    pub prompt: Option<String>,
}

/// What happened to the session after one recorded answer.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseOutcome {
    pub session_id: SessionId,
    pub recorded_step: IntakeStep,
    pub current_step: IntakeStep,
    pub next_question: Option<String>,
    pub intake_completed: bool,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{0}")]
    InvalidState(String),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
