use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::intake::domain::{ComplexityLevel, Specialization};

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) name: String,
    pub(crate) specializations: Vec<Specialization>,
    pub(crate) max_complexity: ComplexityLevel,
    pub(crate) max_daily_appointments: u32,
    pub(crate) rating: f32,
    pub(crate) available: bool,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        records.push(RosterRecord {
            name: row.name,
            specializations: parse_specializations(&row.specializations),
            max_complexity: ComplexityLevel::from_label(&row.max_complexity)
                .unwrap_or(ComplexityLevel::Moderate),
            max_daily_appointments: row.max_daily_appointments,
            rating: row.rating.clamp(0.0, 5.0),
            available: row.available,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Specializations", default)]
    specializations: String,
    #[serde(rename = "Max Complexity", default)]
    max_complexity: String,
    #[serde(rename = "Max Daily Appointments", default)]
    max_daily_appointments: u32,
    #[serde(rename = "Rating", default)]
    rating: f32,
    #[serde(rename = "Available", default, deserialize_with = "flexible_bool")]
    available: bool,
}

/// Unknown specialization tokens are dropped; a row with none still gets the
/// individual tag so the matcher has something to work with.
fn parse_specializations(raw: &str) -> Vec<Specialization> {
    let mut parsed: Vec<Specialization> = raw
        .split(['|', ';', ','])
        .filter_map(Specialization::from_label)
        .collect();
    parsed.dedup();

    if parsed.is_empty() {
        parsed.push(Specialization::Individual);
    }

    parsed
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "y" | "1"
    ))
}
