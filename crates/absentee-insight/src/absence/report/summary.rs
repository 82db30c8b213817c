use super::super::domain::{Employee, ModelMetrics, RiskLevel};
use super::views::{DepartmentCount, RiskDistributionEntry};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline figures for the dashboard landing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub total_employees: usize,
    pub average_predicted_absent: f64,
    pub top_department: String,
    pub departments: Vec<DepartmentCount>,
    pub risk_distribution: Vec<RiskDistributionEntry>,
    pub model_metrics: ModelMetrics,
}

impl DashboardSummary {
    pub fn from_employees(employees: &[Employee], metrics: ModelMetrics, as_of: NaiveDate) -> Self {
        let total_employees = employees.len();
        let average_predicted_absent = if total_employees == 0 {
            0.0
        } else {
            employees.iter().map(|e| e.predicted_absent).sum::<f64>() / total_employees as f64
        };

        let mut departments: Vec<DepartmentCount> = Vec::new();
        for employee in employees {
            match departments
                .iter_mut()
                .find(|entry| entry.department == employee.department)
            {
                Some(entry) => entry.count += 1,
                None => departments.push(DepartmentCount {
                    department: employee.department.clone(),
                    count: 1,
                }),
            }
        }
        // Stable: departments with equal head counts stay in first-seen order.
        departments.sort_by(|a, b| b.count.cmp(&a.count));

        let top_department = departments
            .first()
            .map(|entry| entry.department.clone())
            .unwrap_or_else(|| "N/A".to_string());

        let risk_distribution = RiskLevel::ordered()
            .into_iter()
            .map(|risk_level| RiskDistributionEntry {
                risk_level,
                risk_label: risk_level.label(),
                count: employees
                    .iter()
                    .filter(|e| e.risk_level() == risk_level)
                    .count(),
            })
            .collect();

        Self {
            as_of,
            total_employees,
            average_predicted_absent,
            top_department,
            departments,
            risk_distribution,
            model_metrics: metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::reference;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn summarizes_reference_roster() {
        let summary = DashboardSummary::from_employees(
            &reference::employees(),
            reference::model_metrics(),
            as_of(),
        );

        assert_eq!(summary.total_employees, 8);
        assert!((summary.average_predicted_absent - 24.7).abs() < 1e-9);
        assert_eq!(summary.departments.len(), 8);
        assert_eq!(summary.top_department, "Analytics");

        let counts: Vec<usize> = summary.risk_distribution.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![0, 5, 2, 1]);
    }

    #[test]
    fn busiest_department_leads() {
        let mut employees = reference::employees();
        employees[7].department = "Sales".to_string();
        let summary =
            DashboardSummary::from_employees(&employees, reference::model_metrics(), as_of());
        assert_eq!(summary.top_department, "Sales");
        assert_eq!(summary.departments[0].count, 2);
    }

    #[test]
    fn empty_roster_has_neutral_summary() {
        let summary = DashboardSummary::from_employees(&[], reference::model_metrics(), as_of());
        assert_eq!(summary.total_employees, 0);
        assert_eq!(summary.average_predicted_absent, 0.0);
        assert_eq!(summary.top_department, "N/A");
    }
}
