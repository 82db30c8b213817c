use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::cohort::nearest_cluster;
use super::domain::{AbsenceError, Employee, EmployeeAttributes, PredictionForm, RiskLevel};
use super::export::{export_csv, CsvQuoting, ExportError};
use super::query::{query, QueryParams};
use super::report::views::{
    CategoryTotal, ClusterPoint, ClusterProfileView, FeatureImportanceView,
};
use super::report::{
    category_totals, cluster_profiles, feature_views, scatter_points, top_features,
    DashboardSummary,
};
use super::repository::{EmployeeRepository, RepositoryError};
use super::scoring::{ScoreComponent, ScoringEngine};
use crate::config::AppConfig;

/// Runtime knobs of the prediction service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionSettings {
    pub seed: Option<u64>,
    pub simulated_latency: Duration,
    pub csv_quoting: CsvQuoting,
}

impl PredictionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            seed: config.scoring.seed,
            simulated_latency: Duration::from_millis(config.scoring.simulated_latency_ms),
            csv_quoting: config.export.csv_quoting,
        }
    }
}

/// Answer to a single prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub predicted_hours: f64,
    pub risk_level: RiskLevel,
    pub cluster_id: Option<u8>,
    pub cluster_name: String,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterOverview {
    pub profiles: Vec<ClusterProfileView>,
    pub points: Vec<ClusterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureOverview {
    pub features: Vec<FeatureImportanceView>,
    pub categories: Vec<CategoryTotal>,
}

/// Service composing the scoring engine, the roster repository and the report views.
pub struct PredictionService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
    rng: Mutex<StdRng>,
    settings: PredictionSettings,
}

impl<R> PredictionService<R>
where
    R: EmployeeRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ScoringEngine, settings: PredictionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            repository,
            engine,
            rng: Mutex::new(rng),
            settings,
        }
    }

    pub fn settings(&self) -> &PredictionSettings {
        &self.settings
    }

    /// Score a submitted form and place the result in its nearest cohort.
    pub fn predict(
        &self,
        form: &PredictionForm,
    ) -> Result<PredictionOutcome, PredictionServiceError> {
        let attributes = EmployeeAttributes::try_from(form)?;
        let prediction = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.engine.predict(&attributes, &mut *rng)
        };

        let clusters = self.repository.clusters()?;
        let cluster = nearest_cluster(
            &clusters,
            attributes.age,
            attributes.service_length,
            prediction.hours,
        );

        Ok(PredictionOutcome {
            predicted_hours: prediction.hours,
            risk_level: prediction.risk_level,
            cluster_id: cluster.map(|c| c.cluster_id),
            cluster_name: cluster
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            components: prediction.components,
        })
    }

    pub fn employees(&self, params: &QueryParams) -> Result<Vec<Employee>, PredictionServiceError> {
        let employees = self.repository.employees()?;
        let rows = query(&employees, params)?;
        debug!(total = employees.len(), returned = rows.len(), "employee query served");
        Ok(rows)
    }

    /// The filtered and sorted table rendered as CSV text.
    pub fn export(&self, params: &QueryParams) -> Result<String, PredictionServiceError> {
        let rows = self.employees(params)?;
        let clusters = self.repository.clusters()?;
        Ok(export_csv(&rows, &clusters, self.settings.csv_quoting)?)
    }

    pub fn clusters(&self) -> Result<ClusterOverview, PredictionServiceError> {
        let employees = self.repository.employees()?;
        let clusters = self.repository.clusters()?;
        Ok(ClusterOverview {
            profiles: cluster_profiles(&clusters, &employees),
            points: scatter_points(&employees),
        })
    }

    pub fn features(&self, top: Option<usize>) -> Result<FeatureOverview, PredictionServiceError> {
        let importances = self.repository.feature_importances()?;
        let features = match top {
            Some(limit) => top_features(&importances, limit),
            None => feature_views(&importances),
        };
        Ok(FeatureOverview {
            features,
            categories: category_totals(&importances),
        })
    }

    pub fn dashboard(&self, as_of: NaiveDate) -> Result<DashboardSummary, PredictionServiceError> {
        let employees = self.repository.employees()?;
        let metrics = self.repository.model_metrics()?;
        Ok(DashboardSummary::from_employees(&employees, metrics, as_of))
    }
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Absence(#[from] AbsenceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
