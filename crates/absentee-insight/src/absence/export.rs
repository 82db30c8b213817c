use super::cohort::cluster_name;
use super::domain::{ClusterDefinition, Employee};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const EXPORT_FILE_NAME: &str = "employee_predictions.csv";
pub const EXPORT_HEADER: [&str; 8] = [
    "Name",
    "Job Title",
    "Department",
    "Age",
    "Service Length",
    "Predicted Absent",
    "Actual Absent",
    "Cluster",
];

/// Field quoting policy for exported tables.
///
/// `Legacy` writes every field verbatim, so a comma inside a name shifts the
/// columns of that row. `Standard` quotes fields that need it (RFC 4180).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvQuoting {
    Legacy,
    #[default]
    Standard,
}

impl FromStr for CsvQuoting {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "raw" | "never" => Ok(Self::Legacy),
            "standard" | "rfc4180" | "quoted" => Ok(Self::Standard),
            other => Err(format!("unknown csv quoting '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer could not be flushed: {0}")]
    Buffer(String),
}

/// Render rows, in order, as the downloadable prediction table.
pub fn export_csv(
    rows: &[Employee],
    clusters: &[ClusterDefinition],
    quoting: CsvQuoting,
) -> Result<String, ExportError> {
    let quote_style = match quoting {
        CsvQuoting::Legacy => csv::QuoteStyle::Never,
        CsvQuoting::Standard => csv::QuoteStyle::Necessary,
    };

    let mut writer = csv::WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for employee in rows {
        let age = employee.age.to_string();
        let service_length = employee.service_length.to_string();
        let predicted = format!("{:.1}", employee.predicted_absent);
        let actual = employee
            .actual_absent
            .map(|hours| format!("{hours:.1}"))
            .unwrap_or_else(|| "N/A".to_string());

        writer.write_record([
            employee.name.as_str(),
            employee.job_title.as_str(),
            employee.department.as_str(),
            age.as_str(),
            service_length.as_str(),
            predicted.as_str(),
            actual.as_str(),
            cluster_name(clusters, employee.cluster),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Buffer(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::reference;

    #[test]
    fn empty_rows_produce_header_only() {
        let csv = export_csv(&[], &reference::clusters(), CsvQuoting::Standard).expect("export");
        assert_eq!(
            csv,
            "Name,Job Title,Department,Age,Service Length,Predicted Absent,Actual Absent,Cluster\n"
        );
    }

    #[test]
    fn formats_hours_and_missing_actuals() {
        let mut employees = reference::employees();
        employees.truncate(2);
        employees[1].actual_absent = None;

        let csv = export_csv(&employees, &reference::clusters(), CsvQuoting::Standard)
            .expect("export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "Sarah Johnson,Data Analyst,Analytics,28,3,24.5,26.0,Young Professionals"
        );
        assert_eq!(
            lines[2],
            "Michael Chen,Senior Developer,Engineering,34,7,18.2,N/A,Mid-Career Professionals"
        );
    }

    #[test]
    fn quoting_policy_controls_embedded_delimiters() {
        let mut employees = reference::employees();
        employees.truncate(1);
        employees[0].name = "Johnson, Sarah".to_string();
        let clusters = reference::clusters();

        let standard = export_csv(&employees, &clusters, CsvQuoting::Standard).expect("export");
        assert!(standard.contains("\"Johnson, Sarah\",Data Analyst"));

        let legacy = export_csv(&employees, &clusters, CsvQuoting::Legacy).expect("export");
        let row = legacy.lines().nth(1).expect("data row");
        assert_eq!(row.split(',').count(), 9);
    }

    #[test]
    fn unknown_cluster_ids_render_as_unknown() {
        let mut employees = reference::employees();
        employees.truncate(1);
        employees[0].cluster = 42;
        let csv = export_csv(&employees, &reference::clusters(), CsvQuoting::Legacy)
            .expect("export");
        assert!(csv.trim_end().ends_with(",Unknown"));
    }

    #[test]
    fn parses_quoting_names() {
        assert_eq!("legacy".parse::<CsvQuoting>(), Ok(CsvQuoting::Legacy));
        assert_eq!("Standard".parse::<CsvQuoting>(), Ok(CsvQuoting::Standard));
        assert!("fancy".parse::<CsvQuoting>().is_err());
    }
}
