use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::PredictionForm;
use super::export::EXPORT_FILE_NAME;
use super::query::QueryParams;
use super::repository::EmployeeRepository;
use super::service::{PredictionService, PredictionServiceError};

/// Router builder exposing prediction, table and report endpoints.
pub fn prediction_router<R>(service: Arc<PredictionService<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<R>))
        .route("/api/v1/predict", post(predict_handler::<R>))
        .route("/api/v1/employees", get(employees_handler::<R>))
        .route("/api/v1/employees/export", get(export_handler::<R>))
        .route("/api/v1/clusters", get(clusters_handler::<R>))
        .route("/api/v1/features", get(features_handler::<R>))
        .route("/api/v1/dashboard", get(dashboard_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureParams {
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardParams {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn predict_handler<R>(
    State(service): State<Arc<PredictionService<R>>>,
    Json(form): Json<PredictionForm>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let latency = service.settings().simulated_latency;
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    match service.predict(&form) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn employees_handler<R>(
    State(service): State<Arc<PredictionService<R>>>,
    Query(params): Query<QueryParams>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.employees(&params) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<PredictionService<R>>>,
    Query(params): Query<QueryParams>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.export(&params) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    mime::TEXT_CSV_UTF_8.as_ref().to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clusters_handler<R>(State(service): State<Arc<PredictionService<R>>>) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.clusters() {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn features_handler<R>(
    State(service): State<Arc<PredictionService<R>>>,
    Query(params): Query<FeatureParams>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.features(params.top) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<PredictionService<R>>>,
    Query(params): Query<DashboardParams>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let as_of = params.as_of.unwrap_or_else(|| Local::now().date_naive());
    match service.dashboard(as_of) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PredictionServiceError) -> Response {
    let status = match err {
        PredictionServiceError::Absence(_) => {
            warn!(error = %err, "rejected request");
            StatusCode::BAD_REQUEST
        }
        PredictionServiceError::Repository(_) | PredictionServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::domain::{ClusterDefinition, Employee, FeatureImportance, ModelMetrics};
    use crate::absence::repository::{InMemoryRepository, RepositoryError};
    use crate::absence::scoring::ScoringEngine;
    use crate::absence::service::PredictionSettings;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let service = PredictionService::new(
            Arc::new(InMemoryRepository::reference()),
            ScoringEngine::default(),
            PredictionSettings {
                seed: Some(5),
                ..PredictionSettings::default()
            },
        );
        prediction_router(Arc::new(service))
    }

    async fn read_body(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body")
            .to_vec()
    }

    async fn read_json_body(response: Response) -> Value {
        serde_json::from_slice(&read_body(response).await).expect("json payload")
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    #[tokio::test]
    async fn predict_accepts_legacy_field_names() {
        let payload = json!({
            "Gender": "Female",
            "City": "Chicago",
            "JobTitle": "HR Manager",
            "DepartmentName": "Human Resources",
            "StoreLocation": "Chicago Central",
            "BusinessUnit": "Operations",
            "Division": "People",
            "Age": 42,
            "LengthService": 12
        });

        let response = router()
            .oneshot(post_json("/predict", payload))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        let hours = body["predicted_hours"].as_f64().expect("hours");
        assert!((5.0..=50.0).contains(&hours));
        assert!(body["cluster_name"].is_string());
        assert!(body["risk_level"].is_string());
    }

    #[tokio::test]
    async fn predict_rejects_non_numeric_age() {
        let payload = json!({
            "gender": "Male",
            "city": "Austin",
            "jobTitle": "Sales Associate",
            "department": "Sales",
            "store": "Austin North",
            "businessUnit": "Retail",
            "division": "Stores",
            "age": "abc",
            "serviceLength": "2"
        });

        let response = router()
            .oneshot(post_json("/api/v1/predict", payload))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert!(body["error"].as_str().expect("message").contains("age"));
    }

    #[tokio::test]
    async fn employees_filter_and_sort_from_query_string() {
        let response = router()
            .oneshot(get("/api/v1/employees?cluster=0&sort=predicted_absent&direction=desc"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        let names: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .map(|row| row["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, vec!["Sarah Johnson", "Robert Taylor", "James Wilson"]);
    }

    #[tokio::test]
    async fn employees_reject_unknown_sort_fields() {
        let response = router()
            .oneshot(get("/api/v1/employees?sort=salary"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_downloads_csv_attachment() {
        let response = router()
            .oneshot(get("/api/v1/employees/export?department=Engineering"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).expect("content type"),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).expect("disposition"),
            "attachment; filename=\"employee_predictions.csv\""
        );

        let body = String::from_utf8(read_body(response).await).expect("utf8");
        assert_eq!(body.lines().count(), 2);
        assert!(body.starts_with("Name,Job Title,Department"));
    }

    #[tokio::test]
    async fn dashboard_accepts_as_of_date() {
        let response = router()
            .oneshot(get("/api/v1/dashboard?as_of=2025-06-30"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["as_of"], "2025-06-30");
        assert_eq!(body["total_employees"], 8);
    }

    #[tokio::test]
    async fn features_and_clusters_render() {
        let features = router()
            .oneshot(get("/api/v1/features?top=2"))
            .await
            .expect("route executes");
        assert_eq!(features.status(), StatusCode::OK);
        let body = read_json_body(features).await;
        assert_eq!(body["features"].as_array().expect("features").len(), 2);

        let clusters = router()
            .oneshot(get("/api/v1/clusters"))
            .await
            .expect("route executes");
        assert_eq!(clusters.status(), StatusCode::OK);
        let body = read_json_body(clusters).await;
        assert_eq!(body["profiles"].as_array().expect("profiles").len(), 4);
        assert_eq!(body["points"].as_array().expect("points").len(), 8);
    }

    struct UnavailableRepository;

    impl EmployeeRepository for UnavailableRepository {
        fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
            Err(RepositoryError::Unavailable("roster offline".to_string()))
        }

        fn clusters(&self) -> Result<Vec<ClusterDefinition>, RepositoryError> {
            Err(RepositoryError::Unavailable("roster offline".to_string()))
        }

        fn feature_importances(&self) -> Result<Vec<FeatureImportance>, RepositoryError> {
            Err(RepositoryError::Unavailable("roster offline".to_string()))
        }

        fn model_metrics(&self) -> Result<ModelMetrics, RepositoryError> {
            Err(RepositoryError::Unavailable("roster offline".to_string()))
        }
    }

    #[tokio::test]
    async fn repository_failures_are_internal_errors() {
        let service = Arc::new(PredictionService::new(
            Arc::new(UnavailableRepository),
            ScoringEngine::default(),
            PredictionSettings::default(),
        ));

        let response = employees_handler::<UnavailableRepository>(
            State(service),
            Query(QueryParams::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "repository unavailable: roster offline");
    }
}
