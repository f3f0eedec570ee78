use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use clap::Args;

use taxprep_ai::error::AppError;
use taxprep_ai::workflows::intake::{
    complexity_level, AppointmentType, IntakeService, ReminderChannel, RoutingPolicy, TaxPro,
};
use taxprep_ai::workflows::intake::scheduling::{
    optimized_duration_minutes, standard_duration_minutes,
};
use taxprep_ai::workflows::roster::RosterImporter;

use crate::infra::{default_roster, InMemoryProfileStore, LoggingReminderDispatcher};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Staff roster CSV to seed instead of the built-in directory
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Appointment time for the demo booking (RFC 3339). Defaults to ten days out.
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) appointment_at: Option<DateTime<Utc>>,
    /// Skip the reminder portion of the demo output.
    #[arg(long)]
    pub(crate) skip_reminders: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Complexity score to look up (0-100)
    #[arg(long)]
    pub(crate) score: u8,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let score = args.score.min(100);
    let level = complexity_level(score);

    println!("Appointment estimate for complexity score {score}");
    println!("Tier: {}", level.label());
    println!(
        "Standard visit (intake incomplete): {} minutes",
        standard_duration_minutes(level)
    );
    println!(
        "Optimized visit (intake complete):  {} minutes",
        optimized_duration_minutes(level)
    );
    println!(
        "Finishing intake ahead of time saves {} minutes",
        standard_duration_minutes(level) - optimized_duration_minutes(level)
    );

    Ok(())
}

/// The scripted conversation the demo walks through: a single W-2 filer who
/// dabbled in crypto and pays a mortgage.
const DEMO_TRANSCRIPT: &[&str] = &[
    "Jordan Alvarez",
    "jordan@example.com",
    "515-555-0123",
    "single",
    "none",
    "W-2 employee, one employer all year",
    "I traded some bitcoin on coinbase",
    "mortgage interest mostly",
    "also some donations to charity",
    "No, none of those",
    "I already have my W-2",
    "yes, looks right",
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster,
        appointment_at,
        skip_reminders,
    } = args;

    let roster: Vec<TaxPro> = match roster {
        Some(path) => RosterImporter::from_path(path)?,
        None => default_roster(),
    };

    let store = Arc::new(InMemoryProfileStore::default());
    let service = Arc::new(IntakeService::new(
        store,
        Arc::new(LoggingReminderDispatcher),
        RoutingPolicy::default(),
    ));
    service.seed_roster(roster).map_err(|err| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))
    })?;

    println!("Tax intake demo");

    let started = match service.start_intake(None) {
        Ok(started) => started,
        Err(err) => {
            println!("  Intake unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "- Started session {} for {}",
        started.session_id.0, started.client_id.0
    );

    println!("\nGuided questionnaire");
    let mut prompt = started.prompt;
    for answer in DEMO_TRANSCRIPT {
        if let Some(question) = &prompt {
            println!("  Q: {question}");
        }
        println!("  A: {answer}");

        match service.record_response(&started.session_id, answer) {
            Ok(outcome) => {
                if outcome.intake_completed {
                    println!("  -> intake complete");
                }
                prompt = outcome.next_question;
            }
            Err(err) => {
                println!("  Response rejected: {err}");
                return Ok(());
            }
        }
    }

    println!("\nDocument checklist");
    let checklist = match service.generate_checklist(&started.client_id) {
        Ok(checklist) => checklist,
        Err(err) => {
            println!("  Checklist unavailable: {err}");
            return Ok(());
        }
    };
    for item in &checklist.items {
        let marker = if item.collected {
            "collected"
        } else if item.required {
            "needed"
        } else {
            "optional"
        };
        println!("- [{marker}] {} ({})", item.name, item.category.label());
    }

    println!("\nRouting");
    let outcome = match service.route_client(&started.client_id) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Routing unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "- Complexity score {} ({})",
        outcome.complexity_score,
        outcome.complexity_level.label()
    );
    println!("- {}", outcome.reason);
    let selected = match &outcome.selected {
        Some(selected) => {
            println!(
                "- Assigned to {} (match score {:.1})",
                selected.name, selected.match_score
            );
            selected.clone()
        }
        None => {
            println!("- No assignment made");
            return Ok(());
        }
    };
    for alternate in &outcome.alternates {
        println!(
            "  alternate: {} (match score {:.1})",
            alternate.name, alternate.match_score
        );
    }

    let scheduled_at = appointment_at.unwrap_or_else(|| Utc::now() + Duration::days(10));
    let appointment = match service.create_appointment(
        &started.client_id,
        &selected.staff_id,
        scheduled_at,
        AppointmentType::Virtual,
    ) {
        Ok(appointment) => appointment,
        Err(err) => {
            println!("  Booking unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "\nBooked {} minute virtual appointment on {} (tier {} at booking)",
        appointment.duration_minutes,
        appointment.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
        appointment.complexity_snapshot.label()
    );

    if skip_reminders {
        return Ok(());
    }

    println!("\nReminders");
    match service.compose_appointment_reminder(&appointment.id, ReminderChannel::Email) {
        Ok(reminder) => {
            println!(
                "- Prep reminder scheduled for {}: {}",
                reminder.scheduled_for.format("%Y-%m-%d %H:%M UTC"),
                reminder.message
            );
            match service.send_reminder(&reminder.id) {
                Ok(_) => println!("  sent (logged by the stand-in dispatcher)"),
                Err(err) => println!("  send failed: {err}"),
            }
        }
        Err(err) => println!("  Prep reminder unavailable: {err}"),
    }

    match service.compose_document_reminders(&started.client_id, ReminderChannel::Sms) {
        Ok(reminders) => {
            for reminder in reminders {
                println!(
                    "- Document nudge ({}): {}",
                    reminder.scheduled_for.format("%Y-%m-%d %H:%M UTC"),
                    reminder.message
                );
            }
        }
        Err(err) => println!("  Document reminders unavailable: {err}"),
    }

    Ok(())
}
