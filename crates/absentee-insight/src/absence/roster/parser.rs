use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) employee_number: u32,
    pub(crate) name: String,
    pub(crate) gender: String,
    pub(crate) city: String,
    pub(crate) job_title: String,
    pub(crate) department: String,
    pub(crate) store: String,
    pub(crate) division: String,
    pub(crate) business_unit: String,
    pub(crate) age: f64,
    pub(crate) service_length: f64,
    pub(crate) absent_hours: Option<f64>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        records.push(RosterRecord {
            employee_number: row.employee_number,
            name: row.display_name(),
            gender: row.gender,
            city: row.city,
            job_title: row.job_title,
            department: row.department,
            store: row.store,
            division: row.division,
            business_unit: row.business_unit,
            age: row.age,
            service_length: row.service_length,
            absent_hours: row.absent_hours,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "EmployeeNumber")]
    employee_number: u32,
    #[serde(rename = "Surname")]
    surname: String,
    #[serde(rename = "GivenName")]
    given_name: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "JobTitle")]
    job_title: String,
    #[serde(rename = "DepartmentName")]
    department: String,
    #[serde(rename = "StoreLocation")]
    store: String,
    #[serde(rename = "Division")]
    division: String,
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "LengthService")]
    service_length: f64,
    #[serde(
        rename = "AbsentHours",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    absent_hours: Option<f64>,
    #[serde(rename = "BusinessUnit")]
    business_unit: String,
}

impl RosterRow {
    fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.surname.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.surname),
            (false, true) => self.given_name.clone(),
            _ => self.surname.clone(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
