//! Absence prediction, employee table queries and the reports built on them.
//!
//! Scoring and querying are pure functions over owned snapshots; the service
//! and router layers add the shared roster, the random source and HTTP.

pub mod cohort;
pub mod domain;
pub mod export;
pub mod query;
pub mod reference;
pub mod report;
pub mod repository;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

pub use cohort::{cluster_name, nearest_cluster};
pub use domain::{
    service_per_age, AbsenceError, ClusterDefinition, Employee, EmployeeAttributes,
    FeatureImportance, Gender, ModelMetrics, PredictionForm, RiskLevel,
};
pub use export::{export_csv, CsvQuoting, ExportError, EXPORT_FILE_NAME};
pub use query::{query, EmployeeQuery, QueryParams, SortDirection, SortField};
pub use repository::{EmployeeRepository, InMemoryRepository, RepositoryError};
pub use roster::{RosterImportError, RosterImporter};
pub use router::prediction_router;
pub use scoring::{Prediction, ScoreComponent, ScoreFactor, ScoringConfig, ScoringEngine};
pub use service::{PredictionOutcome, PredictionService, PredictionServiceError, PredictionSettings};
pub use session::{FormState, PredictionSession, PredictionTicket, TableState};
