//! Immutable UI state snapshots and the pure transitions between them.
//!
//! A front end owns the current snapshot and replaces it with whatever the
//! transition returns; scoring and querying never see these types.

use super::domain::{ClusterDefinition, Employee, PredictionForm};
use super::query::{EmployeeQuery, SortDirection, SortField, ALL};
use serde::{Deserialize, Serialize};

/// Filter and sort controls of the employee table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub search: String,
    pub department: String,
    pub cluster: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for TableState {
    fn default() -> Self {
        let query = EmployeeQuery::default();
        Self {
            search: query.search,
            department: query.department,
            cluster: query.cluster,
            sort_field: query.sort_field,
            sort_direction: query.sort_direction,
        }
    }
}

impl TableState {
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_department(&self, department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            ..self.clone()
        }
    }

    pub fn with_cluster(&self, cluster: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            ..self.clone()
        }
    }

    /// Clicking the active column flips direction; a new column starts descending.
    pub fn toggle_sort(&self, field: SortField) -> Self {
        let (sort_field, sort_direction) = if self.sort_field == field {
            (field, self.sort_direction.flipped())
        } else {
            (field, SortDirection::Desc)
        };

        Self {
            sort_field,
            sort_direction,
            ..self.clone()
        }
    }

    pub fn to_query(&self) -> EmployeeQuery {
        EmployeeQuery {
            search: self.search.clone(),
            department: self.department.clone(),
            cluster: self.cluster.clone(),
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
        }
    }
}

/// `"all"` followed by each distinct department in first-seen order.
pub fn department_options(employees: &[Employee]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for employee in employees {
        if !options.iter().skip(1).any(|d| *d == employee.department) {
            options.push(employee.department.clone());
        }
    }
    options
}

pub fn cluster_options(clusters: &[ClusterDefinition]) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(clusters.iter().map(|c| c.cluster_id.to_string()))
        .collect()
}

/// Editable prediction form alongside the last displayed result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub form: PredictionForm,
    pub prediction: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Gender,
    City,
    JobTitle,
    Department,
    Store,
    BusinessUnit,
    Division,
    Age,
    ServiceLength,
}

impl FormState {
    /// Any edit invalidates the prediction currently on screen.
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut form = self.form.clone();
        let value = value.into();
        match field {
            FormField::Gender => form.gender = value,
            FormField::City => form.city = value,
            FormField::JobTitle => form.job_title = value,
            FormField::Department => form.department = value,
            FormField::Store => form.store = value,
            FormField::BusinessUnit => form.business_unit = value,
            FormField::Division => form.division = value,
            FormField::Age => form.age = value,
            FormField::ServiceLength => form.service_length = value,
        }

        Self {
            form,
            prediction: None,
        }
    }

    pub fn with_prediction(&self, hours: f64) -> Self {
        Self {
            form: self.form.clone(),
            prediction: Some(hours),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_complete()
    }
}

/// Identifies one in-flight prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PredictionTicket(pub u64);

/// Tracks the latest request so late answers to superseded ones are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionSession {
    issued: u64,
    latest: Option<PredictionTicket>,
    applied: Option<f64>,
}

impl PredictionSession {
    pub fn begin(&self) -> (Self, PredictionTicket) {
        let ticket = PredictionTicket(self.issued + 1);
        let next = Self {
            issued: ticket.0,
            latest: Some(ticket),
            applied: None,
        };
        (next, ticket)
    }

    /// Abandon the pending request without issuing a new one.
    pub fn cancel(&self) -> Self {
        Self {
            latest: None,
            ..self.clone()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some() && self.applied.is_none()
    }

    /// Apply `hours` only when `ticket` is still the most recent request.
    pub fn resolve(&self, ticket: PredictionTicket, hours: f64) -> Option<Self> {
        if self.latest != Some(ticket) || self.applied.is_some() {
            return None;
        }
        Some(Self {
            applied: Some(hours),
            ..self.clone()
        })
    }

    pub fn result(&self) -> Option<f64> {
        self.applied
    }
}
