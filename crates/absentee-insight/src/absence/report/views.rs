use super::super::domain::{ClusterDefinition, RiskLevel};
use super::features::FeatureCategory;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDistributionEntry {
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPoint {
    pub name: String,
    pub age: u32,
    pub service: u32,
    pub absent: f64,
    pub cluster: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMember {
    pub id: u32,
    pub name: String,
    pub job_title: String,
    pub predicted_absent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfileView {
    #[serde(flatten)]
    pub definition: ClusterDefinition,
    pub risk_label: &'static str,
    pub members: Vec<ClusterMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportanceView {
    pub name: String,
    pub full_name: String,
    pub importance_pct: f64,
    pub share_of_total_pct: f64,
    pub category: FeatureCategory,
    pub category_label: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: FeatureCategory,
    pub category_label: &'static str,
    pub feature_count: usize,
    pub importance_pct: f64,
}
