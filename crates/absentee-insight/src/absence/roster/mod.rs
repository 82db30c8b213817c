mod parser;

use super::cohort::nearest_cluster;
use super::domain::{AbsenceError, ClusterDefinition, Employee, EmployeeAttributes, Gender};
use super::scoring::ScoringEngine;
use parser::RosterRecord;
use rand::Rng;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Absence(AbsenceError),
    NoClusters,
    DuplicateEmployee(u32),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read employee roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid employee roster CSV: {}", err),
            RosterImportError::Absence(err) => {
                write!(f, "roster row could not be scored: {}", err)
            }
            RosterImportError::NoClusters => {
                write!(f, "no cluster definitions available for assignment")
            }
            RosterImportError::DuplicateEmployee(id) => {
                write!(f, "employee number {} appears more than once", id)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Absence(err) => Some(err),
            RosterImportError::NoClusters => None,
            RosterImportError::DuplicateEmployee(_) => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<AbsenceError> for RosterImportError {
    fn from(err: AbsenceError) -> Self {
        Self::Absence(err)
    }
}

/// Loads an HR roster export, scoring and clustering every row.
pub struct RosterImporter<'a> {
    engine: &'a ScoringEngine,
    clusters: &'a [ClusterDefinition],
}

impl<'a> RosterImporter<'a> {
    pub fn new(engine: &'a ScoringEngine, clusters: &'a [ClusterDefinition]) -> Self {
        Self { engine, clusters }
    }

    pub fn from_path<P: AsRef<Path>, R: Rng + ?Sized>(
        &self,
        path: P,
        rng: &mut R,
    ) -> Result<Vec<Employee>, RosterImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        let employees = self.from_reader(file, rng)?;
        info!(
            path = %path.as_ref().display(),
            employees = employees.len(),
            "employee roster imported"
        );
        Ok(employees)
    }

    pub fn from_reader<S: Read, R: Rng + ?Sized>(
        &self,
        reader: S,
        rng: &mut R,
    ) -> Result<Vec<Employee>, RosterImportError> {
        if self.clusters.is_empty() {
            return Err(RosterImportError::NoClusters);
        }

        let mut seen = HashSet::new();
        parser::parse_records(reader)?
            .into_iter()
            .map(|record| {
                if !seen.insert(record.employee_number) {
                    return Err(RosterImportError::DuplicateEmployee(record.employee_number));
                }
                self.employee_from_record(record, &mut *rng)
            })
            .collect()
    }

    fn employee_from_record<R: Rng + ?Sized>(
        &self,
        record: RosterRecord,
        rng: &mut R,
    ) -> Result<Employee, RosterImportError> {
        let age = whole_years("Age", record.age)?;
        if age == 0 {
            return Err(AbsenceError::invalid_input("Age", &record.age.to_string()).into());
        }

        let attributes = EmployeeAttributes {
            gender: record.gender.parse::<Gender>()?,
            city: record.city,
            job_title: record.job_title,
            department: record.department,
            store: record.store,
            business_unit: record.business_unit,
            division: record.division,
            age,
            service_length: whole_years("LengthService", record.service_length)?,
        };

        let prediction = self.engine.predict(&attributes, rng);
        let cluster = nearest_cluster(
            self.clusters,
            attributes.age,
            attributes.service_length,
            prediction.hours,
        )
        .map(|cluster| cluster.cluster_id)
        .ok_or(RosterImportError::NoClusters)?;

        Ok(Employee::new(
            record.employee_number,
            record.name,
            attributes,
            prediction.hours,
            record.absent_hours,
            cluster,
        ))
    }
}

/// The source export stores ages and tenure as fractional years; whole years are kept.
fn whole_years(field: &'static str, value: f64) -> Result<u32, AbsenceError> {
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Ok(value.floor() as u32)
    } else {
        Err(AbsenceError::invalid_input(field, &value.to_string()))
    }
}
