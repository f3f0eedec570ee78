use chrono::{DateTime, Duration, Utc};

use super::domain::{Appointment, DocumentItem};

/// Follow-up nudges go out a day after they are composed.
pub const DOCUMENT_REMINDER_OFFSET_HOURS: i64 = 24;
/// The combined pre-appointment reminder lands two days before the meeting.
pub const APPOINTMENT_REMINDER_OFFSET_HOURS: i64 = 48;

/// Canned copy keyed by fragments of the document's name or source hint, with
/// a generic fallback. Matching is deliberately loose; a wrong-but-plausible
/// nudge is fine, a crash is not.
pub fn document_message(item: &DocumentItem) -> String {
    let haystack = format!(
        "{} {}",
        item.name.to_lowercase(),
        item.source_hint.as_deref().unwrap_or("").to_lowercase()
    );

    for (fragments, message) in CANNED_MESSAGES {
        if fragments.iter().any(|fragment| haystack.contains(fragment)) {
            return (*message).to_string();
        }
    }

    format!(
        "Please bring your {} to your appointment so we can complete your return.",
        item.name
    )
}

const CANNED_MESSAGES: &[(&[&str], &str)] = &[
    (
        &["uber", "lyft", "doordash", "rideshare", "driver"],
        "Don't forget your 1099-NEC from Uber or Lyft - you can download it from the driver dashboard under Tax Information.",
    ),
    (
        &["w-2"],
        "Your employer's W-2 should have arrived by early February - check your mail or the payroll portal.",
    ),
    (
        &["crypto", "exchange", "coinbase"],
        "Export your full-year transaction history from every crypto exchange and wallet you used - partial exports slow your return down.",
    ),
    (
        &["1098", "mortgage"],
        "Your mortgage servicer posts Form 1098 to its online portal in late January - grab the PDF when you can.",
    ),
    (
        &["donation", "charit"],
        "Round up receipts or acknowledgment letters for your donations - anything $250 or over needs a letter from the charity.",
    ),
];

pub fn document_reminder_time(composed_at: DateTime<Utc>) -> DateTime<Utc> {
    composed_at + Duration::hours(DOCUMENT_REMINDER_OFFSET_HOURS)
}

pub fn appointment_reminder_time(appointment: &Appointment) -> DateTime<Utc> {
    appointment.scheduled_at - Duration::hours(APPOINTMENT_REMINDER_OFFSET_HOURS)
}

/// Combined message listing everything still outstanding before a meeting.
pub fn appointment_prep_message(
    client_name: Option<&str>,
    appointment: &Appointment,
    pending: &[&DocumentItem],
) -> String {
    let greeting = match client_name {
        Some(name) => format!("Hi {name}, your"),
        None => "Your".to_string(),
    };

    if pending.is_empty() {
        return format!(
            "{greeting} tax appointment is on {} - your checklist is complete, see you then!",
            appointment.scheduled_at.format("%B %-d at %-I:%M %p UTC")
        );
    }

    let listing = pending
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{greeting} tax appointment is on {}. We still need: {}. Bringing everything keeps your visit short.",
        appointment.scheduled_at.format("%B %-d at %-I:%M %p UTC"),
        listing
    )
}
