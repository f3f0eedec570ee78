use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentType, Client, ComplexityLevel,
    StaffId,
};
use super::routing::{complexity_level, complexity_score};

/// Meeting length when intake finished ahead of time and the preparer can
/// work from a complete file.
pub const fn optimized_duration_minutes(level: ComplexityLevel) -> u32 {
    match level {
        ComplexityLevel::Simple => 15,
        ComplexityLevel::Moderate => 20,
        ComplexityLevel::Complex => 30,
        ComplexityLevel::Expert => 45,
    }
}

/// Meeting length when intake is incomplete and discovery happens live.
pub const fn standard_duration_minutes(level: ComplexityLevel) -> u32 {
    match level {
        ComplexityLevel::Simple => 30,
        ComplexityLevel::Moderate => 45,
        ComplexityLevel::Complex => 60,
        ComplexityLevel::Expert => 90,
    }
}

pub fn appointment_duration(level: ComplexityLevel, intake_completed: bool) -> u32 {
    if intake_completed {
        optimized_duration_minutes(level)
    } else {
        standard_duration_minutes(level)
    }
}

/// Build an appointment for a client, snapshotting the intake score and
/// complexity tier as they stand right now. Later changes to the client never
/// rewrite an existing appointment.
pub fn build_appointment(
    id: AppointmentId,
    client: &Client,
    staff_id: StaffId,
    scheduled_at: DateTime<Utc>,
    kind: AppointmentType,
    created_at: DateTime<Utc>,
) -> Appointment {
    let level = complexity_level(complexity_score(client));
    let intake_score = if client.intake_completed { 100 } else { 0 };

    Appointment {
        id,
        client_id: client.id.clone(),
        staff_id,
        scheduled_at,
        duration_minutes: appointment_duration(level, client.intake_completed),
        status: AppointmentStatus::Scheduled,
        kind,
        intake_score_snapshot: intake_score,
        complexity_snapshot: level,
        created_at,
    }
}

/// Standard-versus-optimized duration comparison for a client's current tier.
/// Requires no appointment to exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentEstimate {
    pub complexity_level: ComplexityLevel,
    pub standard_minutes: u32,
    pub optimized_minutes: u32,
    pub minutes_saved: u32,
    pub intake_completed: bool,
}

impl AppointmentEstimate {
    pub fn for_client(client: &Client) -> Self {
        let level = complexity_level(complexity_score(client));
        let standard = standard_duration_minutes(level);
        let optimized = optimized_duration_minutes(level);

        Self {
            complexity_level: level,
            standard_minutes: standard,
            optimized_minutes: optimized,
            minutes_saved: standard - optimized,
            intake_completed: client.intake_completed,
        }
    }
}
