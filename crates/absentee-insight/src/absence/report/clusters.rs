use super::super::domain::{ClusterDefinition, Employee};
use super::views::{ClusterMember, ClusterPoint, ClusterProfileView};

/// Age against predicted absence, one point per employee, for the cohort scatter.
pub fn scatter_points(employees: &[Employee]) -> Vec<ClusterPoint> {
    employees
        .iter()
        .map(|employee| ClusterPoint {
            name: employee.name.clone(),
            age: employee.age,
            service: employee.service_length,
            absent: employee.predicted_absent,
            cluster: employee.cluster,
        })
        .collect()
}

pub fn cluster_profiles(
    clusters: &[ClusterDefinition],
    employees: &[Employee],
) -> Vec<ClusterProfileView> {
    clusters
        .iter()
        .map(|definition| ClusterProfileView {
            definition: definition.clone(),
            risk_label: definition.risk_level.label(),
            members: employees
                .iter()
                .filter(|employee| employee.cluster == definition.cluster_id)
                .map(|employee| ClusterMember {
                    id: employee.id,
                    name: employee.name.clone(),
                    job_title: employee.job_title.clone(),
                    predicted_absent: employee.predicted_absent,
                })
                .collect(),
        })
        .collect()
}
