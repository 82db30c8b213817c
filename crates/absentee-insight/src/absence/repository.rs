use std::sync::Arc;

use super::domain::{ClusterDefinition, Employee, FeatureImportance, ModelMetrics};
use super::reference;

/// Read access to the employee roster and the model artefacts shown beside it.
pub trait EmployeeRepository: Send + Sync {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError>;
    fn clusters(&self) -> Result<Vec<ClusterDefinition>, RepositoryError>;
    fn feature_importances(&self) -> Result<Vec<FeatureImportance>, RepositoryError>;
    fn model_metrics(&self) -> Result<ModelMetrics, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Immutable roster held in memory and shared across request handlers.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    employees: Arc<Vec<Employee>>,
    clusters: Arc<Vec<ClusterDefinition>>,
    features: Arc<Vec<FeatureImportance>>,
    metrics: ModelMetrics,
}

impl InMemoryRepository {
    pub fn new(
        employees: Vec<Employee>,
        clusters: Vec<ClusterDefinition>,
        features: Vec<FeatureImportance>,
        metrics: ModelMetrics,
    ) -> Self {
        Self {
            employees: Arc::new(employees),
            clusters: Arc::new(clusters),
            features: Arc::new(features),
            metrics,
        }
    }

    /// The compiled-in fixture roster.
    pub fn reference() -> Self {
        Self::new(
            reference::employees(),
            reference::clusters(),
            reference::feature_importances(),
            reference::model_metrics(),
        )
    }

    /// Replace the roster, keeping clusters, features and metrics.
    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(employees),
            ..self
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::reference()
    }
}

impl EmployeeRepository for InMemoryRepository {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.employees.as_ref().clone())
    }

    fn clusters(&self) -> Result<Vec<ClusterDefinition>, RepositoryError> {
        Ok(self.clusters.as_ref().clone())
    }

    fn feature_importances(&self) -> Result<Vec<FeatureImportance>, RepositoryError> {
        Ok(self.features.as_ref().clone())
    }

    fn model_metrics(&self) -> Result<ModelMetrics, RepositoryError> {
        Ok(self.metrics)
    }
}
