use absentee_insight::absence::{
    InMemoryRepository, PredictionService, PredictionSettings, RosterImporter, ScoringEngine,
};
use absentee_insight::config::AppConfig;
use absentee_insight::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Random source for batch scoring: seeded when a seed is configured.
pub(crate) fn scoring_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Reference roster, or the roster CSV at `roster` scored with `engine`.
pub(crate) fn load_repository(
    roster: Option<&Path>,
    engine: &ScoringEngine,
    seed: Option<u64>,
) -> Result<InMemoryRepository, AppError> {
    let repository = InMemoryRepository::reference();
    let Some(path) = roster else {
        return Ok(repository);
    };

    let clusters = absentee_insight::absence::reference::clusters();
    let mut rng = scoring_rng(seed);
    let employees = RosterImporter::new(engine, &clusters).from_path(path, &mut rng)?;
    Ok(repository.with_employees(employees))
}

pub(crate) fn prediction_service(
    config: &AppConfig,
) -> Result<PredictionService<InMemoryRepository>, AppError> {
    let engine = ScoringEngine::default();
    let settings = PredictionSettings::from_config(config);
    let repository = load_repository(config.roster_path.as_deref(), &engine, settings.seed)?;
    Ok(PredictionService::new(
        Arc::new(repository),
        engine,
        settings,
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
