mod sort;

pub use sort::{SortDirection, SortField};

use super::domain::{AbsenceError, Employee};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel accepted by the department and cluster filters.
pub const ALL: &str = "all";

/// Typed filter and sort parameters for the employee table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    pub search: String,
    pub department: String,
    pub cluster: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            department: ALL.to_string(),
            cluster: ALL.to_string(),
            sort_field: SortField::PredictedAbsent,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl EmployeeQuery {
    pub fn matches(&self, employee: &Employee) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || employee.name.to_lowercase().contains(&needle)
            || employee.job_title.to_lowercase().contains(&needle)
            || employee.department.to_lowercase().contains(&needle);
        let matches_department = self.department == ALL || employee.department == self.department;
        let matches_cluster = self.cluster == ALL || employee.cluster.to_string() == self.cluster;

        matches_search && matches_department && matches_cluster
    }

    /// Filter then stably sort, returning a fresh sequence.
    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        let mut rows: Vec<Employee> = employees
            .iter()
            .filter(|employee| self.matches(employee))
            .cloned()
            .collect();
        sort::sort_employees(&mut rows, self.sort_field, self.sort_direction);

        debug!(
            search = %self.search,
            department = %self.department,
            cluster = %self.cluster,
            sort = self.sort_field.key(),
            direction = self.sort_direction.key(),
            matched = rows.len(),
            total = employees.len(),
            "employee query evaluated"
        );

        rows
    }
}

/// Untyped parameters as they arrive from a query string or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default, alias = "sortField")]
    pub sort: Option<String>,
    #[serde(default, alias = "sortDirection")]
    pub direction: Option<String>,
}

impl TryFrom<&QueryParams> for EmployeeQuery {
    type Error = AbsenceError;

    fn try_from(params: &QueryParams) -> Result<Self, Self::Error> {
        let defaults = EmployeeQuery::default();
        let sort_field = match params.sort.as_deref() {
            Some(raw) => raw.parse()?,
            None => defaults.sort_field,
        };
        let sort_direction = match params.direction.as_deref() {
            Some(raw) => raw.parse()?,
            None => defaults.sort_direction,
        };

        Ok(Self {
            search: params.search.clone().unwrap_or_default(),
            department: params.department.clone().unwrap_or(defaults.department),
            cluster: params.cluster.clone().unwrap_or(defaults.cluster),
            sort_field,
            sort_direction,
        })
    }
}

pub fn query(employees: &[Employee], params: &QueryParams) -> Result<Vec<Employee>, AbsenceError> {
    let query = EmployeeQuery::try_from(params)?;
    Ok(query.apply(employees))
}
