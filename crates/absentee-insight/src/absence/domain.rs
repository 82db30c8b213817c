use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = AbsenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(AbsenceError::invalid_input("gender", value)),
        }
    }
}

/// Four-tier classification derived purely from predicted monthly hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub fn from_hours(hours: f64) -> Self {
        if hours < 15.0 {
            Self::Low
        } else if hours < 25.0 {
            Self::Medium
        } else if hours < 35.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attributes the scoring engine reads; built fresh for every prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAttributes {
    pub gender: Gender,
    pub city: String,
    pub job_title: String,
    pub department: String,
    pub store: String,
    pub business_unit: String,
    pub division: String,
    pub age: u32,
    pub service_length: u32,
}

/// Raw prediction request as typed into a form or posted as JSON.
///
/// Accepts camelCase keys, the legacy `DepartmentName`/`LengthService` style
/// keys, and numbers or numeric strings for the two numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionForm {
    #[serde(default, alias = "Gender")]
    pub gender: String,
    #[serde(default, alias = "City")]
    pub city: String,
    #[serde(default, alias = "JobTitle", alias = "job_title")]
    pub job_title: String,
    #[serde(default, alias = "DepartmentName", alias = "Department")]
    pub department: String,
    #[serde(default, alias = "StoreLocation", alias = "Store")]
    pub store: String,
    #[serde(default, alias = "BusinessUnit", alias = "business_unit")]
    pub business_unit: String,
    #[serde(default, alias = "Division")]
    pub division: String,
    #[serde(default, alias = "Age", deserialize_with = "number_or_string")]
    pub age: String,
    #[serde(
        default,
        alias = "LengthService",
        alias = "service_length",
        deserialize_with = "number_or_string"
    )]
    pub service_length: String,
}

impl PredictionForm {
    pub fn is_complete(&self) -> bool {
        [
            &self.gender,
            &self.city,
            &self.job_title,
            &self.department,
            &self.store,
            &self.business_unit,
            &self.division,
            &self.age,
            &self.service_length,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }
}

impl TryFrom<&PredictionForm> for EmployeeAttributes {
    type Error = AbsenceError;

    fn try_from(form: &PredictionForm) -> Result<Self, Self::Error> {
        let gender = form.gender.parse::<Gender>()?;
        let age = parse_whole_number("age", &form.age)?;
        if age == 0 {
            return Err(AbsenceError::invalid_input("age", &form.age));
        }
        let service_length = parse_whole_number("serviceLength", &form.service_length)?;

        Ok(Self {
            gender,
            city: form.city.trim().to_string(),
            job_title: form.job_title.trim().to_string(),
            department: form.department.trim().to_string(),
            store: form.store.trim().to_string(),
            business_unit: form.business_unit.trim().to_string(),
            division: form.division.trim().to_string(),
            age,
            service_length,
        })
    }
}

fn parse_whole_number(field: &'static str, raw: &str) -> Result<u32, AbsenceError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(value);
    }

    // JSON clients sometimes send `34.0`; accept whole floats only.
    match trimmed.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 => {
            Ok(value as u32)
        }
        _ => Err(AbsenceError::invalid_input(field, raw)),
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Missing,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(value) => value,
        Raw::Number(value) => value.to_string(),
        Raw::Missing => String::new(),
    })
}

/// Row of the employee table together with its prediction and cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub gender: Gender,
    pub city: String,
    pub job_title: String,
    pub department: String,
    pub store: String,
    pub business_unit: String,
    pub division: String,
    pub age: u32,
    pub service_length: u32,
    pub predicted_absent: f64,
    pub actual_absent: Option<f64>,
    pub cluster: u8,
    pub service_per_age: f64,
    pub age_squared: u64,
    pub service_squared: u64,
}

impl Employee {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        attributes: EmployeeAttributes,
        predicted_absent: f64,
        actual_absent: Option<f64>,
        cluster: u8,
    ) -> Self {
        let EmployeeAttributes {
            gender,
            city,
            job_title,
            department,
            store,
            business_unit,
            division,
            age,
            service_length,
        } = attributes;

        Self {
            id,
            name: name.into(),
            gender,
            city,
            job_title,
            department,
            store,
            business_unit,
            division,
            age,
            service_length,
            predicted_absent,
            actual_absent,
            cluster,
            service_per_age: service_per_age(age, service_length),
            age_squared: u64::from(age).pow(2),
            service_squared: u64::from(service_length).pow(2),
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_hours(self.predicted_absent)
    }
}

/// Service years per year of age, rounded to three decimals. Zero age yields 0.
pub fn service_per_age(age: u32, service_length: u32) -> f64 {
    if age == 0 {
        return 0.0;
    }
    let ratio = f64::from(service_length) / f64::from(age);
    (ratio * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDefinition {
    pub cluster_id: u8,
    pub name: String,
    pub description: String,
    pub avg_age: f64,
    pub avg_service: f64,
    pub avg_absent: f64,
    pub employee_count: u32,
    pub characteristics: Vec<String>,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbsenceError {
    #[error("invalid value '{value}' for {field}")]
    InvalidInput { field: &'static str, value: String },
    #[error("unknown field '{0}'")]
    InvalidField(String),
}

impl AbsenceError {
    pub(crate) fn invalid_input(field: &'static str, value: &str) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PredictionForm {
        PredictionForm {
            gender: "Female".to_string(),
            city: "Chicago".to_string(),
            job_title: "HR Manager".to_string(),
            department: "Human Resources".to_string(),
            store: "Chicago Central".to_string(),
            business_unit: "Operations".to_string(),
            division: "People".to_string(),
            age: "42".to_string(),
            service_length: "12".to_string(),
        }
    }

    #[test]
    fn risk_level_boundaries() {
        assert_eq!(RiskLevel::from_hours(14.99), RiskLevel::Low);
        assert_eq!(RiskLevel::from_hours(15.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_hours(24.99), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_hours(25.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_hours(34.99), RiskLevel::High);
        assert_eq!(RiskLevel::from_hours(35.0), RiskLevel::Critical);
    }

    #[test]
    fn form_converts_into_attributes() {
        let attributes = EmployeeAttributes::try_from(&form()).expect("valid form");
        assert_eq!(attributes.gender, Gender::Female);
        assert_eq!(attributes.age, 42);
        assert_eq!(attributes.service_length, 12);
    }

    #[test]
    fn form_rejects_unparseable_numbers_and_zero_age() {
        let mut bad_age = form();
        bad_age.age = "forty".to_string();
        assert_eq!(
            EmployeeAttributes::try_from(&bad_age),
            Err(AbsenceError::InvalidInput {
                field: "age",
                value: "forty".to_string()
            })
        );

        let mut zero_age = form();
        zero_age.age = "0".to_string();
        assert!(EmployeeAttributes::try_from(&zero_age).is_err());

        let mut negative_service = form();
        negative_service.service_length = "-1".to_string();
        assert!(matches!(
            EmployeeAttributes::try_from(&negative_service),
            Err(AbsenceError::InvalidInput {
                field: "serviceLength",
                ..
            })
        ));
    }

    #[test]
    fn form_deserializes_numbers_strings_and_legacy_keys() {
        let modern: PredictionForm = serde_json::from_value(serde_json::json!({
            "gender": "Male",
            "city": "Seattle",
            "jobTitle": "Product Manager",
            "department": "Product",
            "store": "Seattle North",
            "businessUnit": "Product",
            "division": "Innovation",
            "age": 31,
            "serviceLength": "5"
        }))
        .expect("camelCase payload");
        assert_eq!(modern.age, "31");
        assert_eq!(modern.service_length, "5");
        assert!(modern.is_complete());

        let legacy: PredictionForm = serde_json::from_value(serde_json::json!({
            "Gender": "F",
            "City": "Boston",
            "JobTitle": "Cashier",
            "DepartmentName": "Customer Service",
            "StoreLocation": "Boston Downtown",
            "BusinessUnit": "Stores",
            "Division": "Stores",
            "Age": "26",
            "LengthService": 2
        }))
        .expect("legacy payload");
        assert_eq!(legacy.department, "Customer Service");
        let attributes = EmployeeAttributes::try_from(&legacy).expect("legacy converts");
        assert_eq!(attributes.gender, Gender::Female);
        assert_eq!(attributes.service_length, 2);
    }

    #[test]
    fn null_fields_deserialize_as_blank() {
        let form: PredictionForm = serde_json::from_value(serde_json::json!({
            "gender": "Male",
            "age": null,
            "serviceLength": 3
        }))
        .expect("null payload");
        assert_eq!(form.age, "");
        assert_eq!(form.service_length, "3");
        assert!(!form.is_complete());
    }

    #[test]
    fn incomplete_form_is_detected() {
        let mut partial = form();
        partial.division = "  ".to_string();
        assert!(!partial.is_complete());
    }

    #[test]
    fn employee_computes_derived_features() {
        let attributes = EmployeeAttributes::try_from(&form()).expect("valid form");
        let employee = Employee::new(3, "Emma Rodriguez", attributes, 32.1, Some(30.0), 2);
        assert_eq!(employee.service_per_age, 0.286);
        assert_eq!(employee.age_squared, 1764);
        assert_eq!(employee.service_squared, 144);
        assert_eq!(employee.risk_level(), RiskLevel::High);
        assert_eq!(service_per_age(0, 4), 0.0);
    }
}
