use super::common::*;

use chrono::{Duration, TimeZone, Utc};

use crate::workflows::intake::domain::{
    AppointmentType, ComplexityLevel, IncomeType, ReminderChannel,
};
use crate::workflows::intake::repository::ProfileStore;
use crate::workflows::intake::service::IntakeServiceError;

#[test]
fn collecting_an_unknown_document_fails_without_mutation() {
    let (service, store, _) = build_service();
    let client = crypto_client("collect-miss");
    store.insert_client(client.clone()).expect("client stored");
    let before = service.generate_checklist(&client.id).expect("checklist generates");

    let error = service
        .mark_document_collected(&client.id, "doc-does-not-exist")
        .expect_err("unknown ids are rejected");

    match error {
        IntakeServiceError::InvalidState(message) => {
            assert_eq!(message, "Document not found in checklist");
        }
        other => panic!("expected invalid state, got {other:?}"),
    }

    let after = store
        .fetch_checklist(&client.id)
        .expect("fetch works")
        .expect("checklist exists");
    assert_eq!(before, after);

    let stored_client = store
        .fetch_client(&client.id)
        .expect("fetch works")
        .expect("client exists");
    assert!(stored_client.documents_collected.is_empty());
}

#[test]
fn collecting_a_document_updates_item_client_and_pending_list() {
    let (service, store, _) = build_service();
    let client = crypto_client("collect-hit");
    store.insert_client(client.clone()).expect("client stored");
    let checklist = service.generate_checklist(&client.id).expect("checklist generates");

    let w2 = checklist
        .items
        .iter()
        .find(|item| item.key == "form_w2")
        .expect("w2 present");

    let updated = service
        .mark_document_collected(&client.id, &w2.id)
        .expect("collection succeeds");

    assert!(updated
        .items
        .iter()
        .find(|item| item.id == w2.id)
        .expect("item persists")
        .collected);

    let stored_client = store
        .fetch_client(&client.id)
        .expect("fetch works")
        .expect("client exists");
    assert!(stored_client.documents_collected.contains("form_w2"));
    assert!(!stored_client.documents_pending.contains(&w2.id));
}

#[test]
fn collecting_without_a_checklist_is_invalid_state() {
    let (service, store, _) = build_service();
    let client = crypto_client("no-checklist");
    store.insert_client(client.clone()).expect("client stored");

    let error = service
        .mark_document_collected(&client.id, "doc-000001")
        .expect_err("no checklist to mutate");
    assert!(matches!(error, IntakeServiceError::InvalidState(_)));
}

#[test]
fn recommendation_persists_the_score_onto_the_client() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let client = crypto_client("persist-score");
    store.insert_client(client.clone()).expect("client stored");

    let outcome = service.recommend_tax_pro(&client.id).expect("recommendation runs");
    assert_eq!(outcome.complexity_score, 55);

    let stored = store
        .fetch_client(&client.id)
        .expect("fetch works")
        .expect("client exists");
    assert_eq!(stored.complexity_score, 55);
    // A recommendation alone never commits an assignment.
    assert!(stored.assigned_pro.is_none());
}

#[test]
fn routing_assigns_and_increments_load_exactly_once() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let client = crypto_client("commit");
    store.insert_client(client.clone()).expect("client stored");

    let outcome = service.route_client(&client.id).expect("routing runs");
    let selected = outcome.selected.expect("match found");

    let stored_client = store
        .fetch_client(&client.id)
        .expect("fetch works")
        .expect("client exists");
    assert_eq!(stored_client.assigned_pro.as_ref(), Some(&selected.staff_id));

    let pro = store
        .fetch_staff(&selected.staff_id)
        .expect("fetch works")
        .expect("pro exists");
    assert_eq!(pro.current_load, 2);
}

#[test]
fn appointment_snapshots_survive_later_client_changes() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let client = crypto_client("snapshot");
    store.insert_client(client.clone()).expect("client stored");

    let scheduled_at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).single().expect("valid");
    let appointment = service
        .create_appointment(
            &client.id,
            &office_roster()[0].id,
            scheduled_at,
            AppointmentType::Virtual,
        )
        .expect("appointment books");

    // Intake incomplete -> standard duration for a complex return.
    assert_eq!(appointment.complexity_snapshot, ComplexityLevel::Complex);
    assert_eq!(appointment.duration_minutes, 60);
    assert_eq!(appointment.intake_score_snapshot, 0);

    let mut mutated = store
        .fetch_client(&client.id)
        .expect("fetch works")
        .expect("client exists");
    mutated.income_types.insert(IncomeType::ForeignIncome);
    mutated.has_foreign_accounts = true;
    store.update_client(mutated).expect("client mutates");

    let stored = store
        .fetch_appointment(&appointment.id)
        .expect("fetch works")
        .expect("appointment exists");
    assert_eq!(stored.complexity_snapshot, ComplexityLevel::Complex);
    assert_eq!(stored.duration_minutes, 60);
}

#[test]
fn completed_intake_books_the_optimized_duration() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let mut client = crypto_client("optimized");
    client.intake_completed = true;
    client.intake_completed_at = Some(fixed_instant());
    store.insert_client(client.clone()).expect("client stored");

    let scheduled_at = fixed_instant() + Duration::days(5);
    let appointment = service
        .create_appointment(
            &client.id,
            &office_roster()[0].id,
            scheduled_at,
            AppointmentType::InPerson,
        )
        .expect("appointment books");

    assert_eq!(appointment.duration_minutes, 30);
    assert_eq!(appointment.intake_score_snapshot, 100);
}

#[test]
fn estimate_reports_the_delta_without_an_appointment() {
    let (service, store, _) = build_service();
    let client = crypto_client("estimate");
    store.insert_client(client.clone()).expect("client stored");

    let estimate = service.appointment_estimate(&client.id).expect("estimate runs");

    assert_eq!(estimate.complexity_level, ComplexityLevel::Complex);
    assert_eq!(estimate.standard_minutes, 60);
    assert_eq!(estimate.optimized_minutes, 30);
    assert_eq!(estimate.minutes_saved, 30);
    assert!(!estimate.intake_completed);
}

#[test]
fn document_reminders_cover_every_pending_required_item() {
    let (service, store, _) = build_service();
    let mut client = crypto_client("doc-reminders");
    client.documents_collected.insert("form_w2".to_string());
    store.insert_client(client.clone()).expect("client stored");
    let checklist = service.generate_checklist(&client.id).expect("checklist generates");

    let pending = checklist
        .items
        .iter()
        .filter(|item| item.required && !item.collected)
        .count();

    let reminders = service
        .compose_document_reminders(&client.id, ReminderChannel::Email)
        .expect("reminders compose");

    assert_eq!(reminders.len(), pending);
    for reminder in &reminders {
        assert!(!reminder.sent);
        assert_eq!(reminder.document_item_ids.len(), 1);
        let offset = reminder.scheduled_for - Utc::now();
        assert!(offset <= Duration::hours(24));
        assert!(offset > Duration::hours(23));
    }
}

#[test]
fn appointment_reminder_lists_outstanding_documents() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let client = crypto_client("appt-reminder");
    store.insert_client(client.clone()).expect("client stored");
    service.generate_checklist(&client.id).expect("checklist generates");

    let scheduled_at = Utc::now() + Duration::days(7);
    let appointment = service
        .create_appointment(
            &client.id,
            &office_roster()[0].id,
            scheduled_at,
            AppointmentType::Virtual,
        )
        .expect("appointment books");

    let reminder = service
        .compose_appointment_reminder(&appointment.id, ReminderChannel::Sms)
        .expect("reminder composes");

    assert_eq!(reminder.scheduled_for, scheduled_at - Duration::hours(48));
    assert!(reminder.message.contains("Crypto transaction history"));
    assert!(!reminder.document_item_ids.is_empty());
}

#[test]
fn sending_twice_is_rejected_and_delivery_happens_once() {
    let (service, store, dispatcher) = build_service();
    let client = crypto_client("send");
    store.insert_client(client.clone()).expect("client stored");
    service.generate_checklist(&client.id).expect("checklist generates");

    let reminders = service
        .compose_document_reminders(&client.id, ReminderChannel::Email)
        .expect("reminders compose");
    let first = reminders.first().expect("at least one reminder");

    let sent = service.send_reminder(&first.id).expect("first send succeeds");
    assert!(sent.sent);
    assert!(sent.sent_at.is_some());

    let error = service
        .send_reminder(&first.id)
        .expect_err("second send is rejected");
    assert!(matches!(error, IntakeServiceError::InvalidState(_)));

    assert_eq!(dispatcher.delivered().len(), 1);
}

#[test]
fn client_status_reflects_persisted_state() {
    let (service, store, _) = build_service();
    service.seed_roster(office_roster()).expect("roster seeds");
    let client = crypto_client("status");
    store.insert_client(client.clone()).expect("client stored");
    service.generate_checklist(&client.id).expect("checklist generates");
    service.route_client(&client.id).expect("routing runs");

    let status = service.client_status(&client.id).expect("status builds");
    assert_eq!(status.complexity_score, 55);
    assert_eq!(status.complexity_level, "complex");
    assert!(status.assigned_pro.is_some());
    assert!(status.pending_required_documents > 0);
}
