use super::super::domain::{AbsenceError, Employee};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Employee attribute the table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Gender,
    City,
    JobTitle,
    Department,
    Store,
    BusinessUnit,
    Division,
    Age,
    ServiceLength,
    PredictedAbsent,
    ActualAbsent,
    Cluster,
    ServicePerAge,
    AgeSquared,
    ServiceSquared,
}

impl SortField {
    pub const fn ordered() -> [Self; 17] {
        [
            Self::Id,
            Self::Name,
            Self::Gender,
            Self::City,
            Self::JobTitle,
            Self::Department,
            Self::Store,
            Self::BusinessUnit,
            Self::Division,
            Self::Age,
            Self::ServiceLength,
            Self::PredictedAbsent,
            Self::ActualAbsent,
            Self::Cluster,
            Self::ServicePerAge,
            Self::AgeSquared,
            Self::ServiceSquared,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Gender => "gender",
            Self::City => "city",
            Self::JobTitle => "jobTitle",
            Self::Department => "department",
            Self::Store => "store",
            Self::BusinessUnit => "businessUnit",
            Self::Division => "division",
            Self::Age => "age",
            Self::ServiceLength => "serviceLength",
            Self::PredictedAbsent => "predictedAbsent",
            Self::ActualAbsent => "actualAbsent",
            Self::Cluster => "cluster",
            Self::ServicePerAge => "servicePerAge",
            Self::AgeSquared => "ageSquared",
            Self::ServiceSquared => "serviceSquared",
        }
    }

    fn sort_key(self, employee: &Employee) -> SortKey<'_> {
        match self {
            Self::Id => SortKey::Number(f64::from(employee.id)),
            Self::Name => SortKey::Text(&employee.name),
            Self::Gender => SortKey::Text(employee.gender.label()),
            Self::City => SortKey::Text(&employee.city),
            Self::JobTitle => SortKey::Text(&employee.job_title),
            Self::Department => SortKey::Text(&employee.department),
            Self::Store => SortKey::Text(&employee.store),
            Self::BusinessUnit => SortKey::Text(&employee.business_unit),
            Self::Division => SortKey::Text(&employee.division),
            Self::Age => SortKey::Number(f64::from(employee.age)),
            Self::ServiceLength => SortKey::Number(f64::from(employee.service_length)),
            Self::PredictedAbsent => SortKey::Number(employee.predicted_absent),
            Self::ActualAbsent => employee
                .actual_absent
                .map(SortKey::Number)
                .unwrap_or(SortKey::Missing),
            Self::Cluster => SortKey::Number(f64::from(employee.cluster)),
            Self::ServicePerAge => SortKey::Number(employee.service_per_age),
            Self::AgeSquared => SortKey::Number(employee.age_squared as f64),
            Self::ServiceSquared => SortKey::Number(employee.service_squared as f64),
        }
    }
}

impl FromStr for SortField {
    type Err = AbsenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ordered()
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| AbsenceError::InvalidField(value.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AbsenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(AbsenceError::InvalidField(value.to_string())),
        }
    }
}

enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Missing, _) => Ordering::Less,
            (_, Self::Missing) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

/// Stable sort; employees with equal keys keep their input order in both directions.
pub(crate) fn sort_employees(rows: &mut [Employee], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = field.sort_key(a).compare(&field.sort_key(b));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_and_snake_case_field_names() {
        assert_eq!("predictedAbsent".parse::<SortField>(), Ok(SortField::PredictedAbsent));
        assert_eq!("predicted_absent".parse::<SortField>(), Ok(SortField::PredictedAbsent));
        assert_eq!("JobTitle".parse::<SortField>(), Ok(SortField::JobTitle));
        assert_eq!(
            "salary".parse::<SortField>(),
            Err(AbsenceError::InvalidField("salary".to_string()))
        );
    }

    #[test]
    fn parses_directions() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
    }

    #[test]
    fn text_keys_ignore_case_before_raw_order() {
        let lower = SortKey::Text("apple");
        let upper = SortKey::Text("Banana");
        assert_eq!(lower.compare(&upper), Ordering::Less);
        assert_eq!(
            SortKey::Text("a").compare(&SortKey::Text("A")),
            Ordering::Greater
        );
    }

    #[test]
    fn missing_values_sort_first_ascending() {
        assert_eq!(
            SortKey::Missing.compare(&SortKey::Number(0.0)),
            Ordering::Less
        );
        assert_eq!(SortKey::Missing.compare(&SortKey::Missing), Ordering::Equal);
    }
}
