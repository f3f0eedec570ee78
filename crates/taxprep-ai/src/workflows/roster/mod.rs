//! Staff directory ingestion from office-manager CSV exports.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::workflows::intake::domain::{StaffId, TaxPro};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TaxPro>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Build the staff directory from a CSV export. Duplicate names keep the
    /// first row; ids are assigned in row order so seeding is deterministic.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TaxPro>, RosterImportError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut roster = Vec::new();

        for record in parser::parse_records(reader)? {
            let normalized = record.name.to_ascii_lowercase();
            if normalized.is_empty() || !seen.insert(normalized) {
                continue;
            }

            roster.push(TaxPro {
                id: StaffId(format!("pro-{:03}", roster.len() + 1)),
                name: record.name,
                specializations: record.specializations,
                max_complexity: record.max_complexity,
                current_load: 0,
                max_daily_appointments: record.max_daily_appointments,
                available: record.available,
                rating: record.rating,
            });
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::domain::{ComplexityLevel, Specialization};
    use std::io::Cursor;

    const HEADER: &str =
        "Name,Specializations,Max Complexity,Max Daily Appointments,Rating,Available\n";

    #[test]
    fn importer_parses_well_formed_rows() {
        let csv = format!(
            "{HEADER}Sarah Chen,individual|investments|crypto,expert,4,4.9,yes\n\
             Marcus Webb,individual|self_employment,complex,5,4.7,yes\n"
        );
        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id.0, "pro-001");
        assert_eq!(roster[0].max_complexity, ComplexityLevel::Expert);
        assert!(roster[0].specializations.contains(&Specialization::Crypto));
        assert_eq!(roster[1].max_daily_appointments, 5);
        assert!(roster[1].available);
        assert_eq!(roster[1].current_load, 0);
    }

    #[test]
    fn importer_keeps_first_row_for_duplicate_names() {
        let csv = format!(
            "{HEADER}Sarah Chen,individual,expert,4,4.9,yes\n\
             sarah chen,individual,simple,1,1.0,no\n"
        );
        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].max_complexity, ComplexityLevel::Expert);
    }

    #[test]
    fn importer_defaults_unknown_labels_instead_of_failing() {
        let csv = format!("{HEADER}Pat Doe,underwater_basketweaving,galactic,3,9.9,true\n");
        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(roster[0].specializations, vec![Specialization::Individual]);
        assert_eq!(roster[0].max_complexity, ComplexityLevel::Moderate);
        assert_eq!(roster[0].rating, 5.0);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error =
            RosterImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
