use crate::infra::{load_repository, parse_date, scoring_rng};
use absentee_insight::absence::report::views::ClusterProfileView;
use absentee_insight::absence::report::{
    category_totals, cluster_profiles, feature_views, top_features, DashboardSummary,
};
use absentee_insight::absence::{
    cluster_name, export_csv, nearest_cluster, query, ClusterDefinition, CsvQuoting, Employee,
    EmployeeAttributes, EmployeeRepository, PredictionForm, QueryParams, ScoringEngine,
};
use absentee_insight::config::AppConfig;
use absentee_insight::error::AppError;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Male or Female (M/F accepted)
    #[arg(long)]
    pub(crate) gender: String,
    #[arg(long)]
    pub(crate) city: String,
    #[arg(long)]
    pub(crate) job_title: String,
    #[arg(long)]
    pub(crate) department: String,
    /// Store or office location
    #[arg(long)]
    pub(crate) store: String,
    #[arg(long)]
    pub(crate) business_unit: String,
    #[arg(long)]
    pub(crate) division: String,
    /// Age in whole years
    #[arg(long)]
    pub(crate) age: String,
    /// Length of service in whole years
    #[arg(long)]
    pub(crate) service_length: String,
    /// Seed for the uncertainty term (overrides APP_SCORING_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the prediction as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmployeesArgs {
    /// Case-insensitive search over name, job title and department
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact department name, or "all"
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Cluster id, or "all"
    #[arg(long)]
    pub(crate) cluster: Option<String>,
    /// Sort column (camelCase or snake_case field name)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Employee roster CSV to score instead of the reference roster
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Write the filtered table as CSV to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Quoting policy for --export (standard or legacy)
    #[arg(long)]
    pub(crate) quoting: Option<CsvQuoting>,
}

#[derive(Args, Debug)]
pub(crate) struct FeaturesArgs {
    /// Only show the N most important features
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Reporting date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Employee roster CSV to score instead of the reference roster
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let form = PredictionForm {
        gender: args.gender,
        city: args.city,
        job_title: args.job_title,
        department: args.department,
        store: args.store,
        business_unit: args.business_unit,
        division: args.division,
        age: args.age,
        service_length: args.service_length,
    };
    let attributes = EmployeeAttributes::try_from(&form)?;

    let engine = ScoringEngine::default();
    let mut rng = scoring_rng(args.seed.or(config.scoring.seed));
    let prediction = engine.predict(&attributes, &mut rng);

    let clusters = absentee_insight::absence::reference::clusters();
    let cluster = nearest_cluster(
        &clusters,
        attributes.age,
        attributes.service_length,
        prediction.hours,
    );

    if args.json {
        let payload = serde_json::json!({
            "predicted_hours": prediction.hours,
            "risk_level": prediction.risk_level,
            "cluster_id": cluster.map(|c| c.cluster_id),
            "cluster_name": cluster.map(|c| c.name.as_str()).unwrap_or("Unknown"),
            "components": prediction.components,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Prediction payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Absence prediction");
    println!(
        "- {:.1} hours per month ({} risk)",
        prediction.hours,
        prediction.risk_level.label()
    );
    if let Some(cluster) = cluster {
        println!("- Cluster {}: {}", cluster.cluster_id, cluster.name);
    }
    println!("\nScore components");
    for component in &prediction.components {
        println!(
            "- {:?}: {:+.2} ({})",
            component.factor, component.adjustment, component.notes
        );
    }
    if (prediction.raw_hours - prediction.hours).abs() > f64::EPSILON {
        println!(
            "Raw score {:.2} was clamped to the model range",
            prediction.raw_hours
        );
    }

    Ok(())
}

pub(crate) fn run_employees(args: EmployeesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let roster = args.roster.or(config.roster_path);
    let repository = load_repository(
        roster.as_deref(),
        &ScoringEngine::default(),
        config.scoring.seed,
    )?;
    let employees = repository.employees().map_err(service_error)?;
    let clusters = repository.clusters().map_err(service_error)?;

    let params = QueryParams {
        search: args.search,
        department: args.department,
        cluster: args.cluster,
        sort: args.sort,
        direction: args.direction,
    };
    let rows = query(&employees, &params)?;

    render_employee_table(&rows, &clusters);
    println!("\n{} of {} employees shown", rows.len(), employees.len());

    if let Some(path) = args.export {
        let quoting = args.quoting.unwrap_or(config.export.csv_quoting);
        let csv = export_csv(&rows, &clusters, quoting)?;
        std::fs::write(&path, csv)?;
        println!("Exported {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

pub(crate) fn run_clusters() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = load_repository(
        config.roster_path.as_deref(),
        &ScoringEngine::default(),
        config.scoring.seed,
    )?;
    let employees = repository.employees().map_err(service_error)?;
    let clusters = repository.clusters().map_err(service_error)?;

    println!("Employee clusters");
    for profile in cluster_profiles(&clusters, &employees) {
        render_cluster_profile(&profile);
    }

    Ok(())
}

pub(crate) fn run_features(args: FeaturesArgs) -> Result<(), AppError> {
    let importances = absentee_insight::absence::reference::feature_importances();
    let views = match args.top {
        Some(limit) => top_features(&importances, limit),
        None => feature_views(&importances),
    };

    println!("Feature importance");
    for view in &views {
        println!(
            "- {}: {:.1}% ({}) {}",
            view.name, view.importance_pct, view.category_label, view.description
        );
    }

    println!("\nBy category");
    for total in category_totals(&importances) {
        println!(
            "- {}: {} feature(s), {:.1}%",
            total.category_label, total.feature_count, total.importance_pct
        );
    }

    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let roster = args.roster.or(config.roster_path);
    let repository = load_repository(
        roster.as_deref(),
        &ScoringEngine::default(),
        config.scoring.seed,
    )?;
    let employees = repository.employees().map_err(service_error)?;
    let metrics = repository.model_metrics().map_err(service_error)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    render_dashboard(&DashboardSummary::from_employees(&employees, metrics, as_of));
    Ok(())
}

fn service_error(err: absentee_insight::absence::RepositoryError) -> AppError {
    AppError::Service(err.into())
}

fn render_employee_table(rows: &[Employee], clusters: &[ClusterDefinition]) {
    println!(
        "{:<20} {:<22} {:<18} {:>4} {:>8} {:>10} {:>8}  Cluster",
        "Name", "Job Title", "Department", "Age", "Service", "Predicted", "Actual"
    );
    for employee in rows {
        let actual = employee
            .actual_absent
            .map(|hours| format!("{hours:.1}"))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<20} {:<22} {:<18} {:>4} {:>8} {:>10.1} {:>8}  {}",
            employee.name,
            employee.job_title,
            employee.department,
            employee.age,
            employee.service_length,
            employee.predicted_absent,
            actual,
            cluster_name(clusters, employee.cluster)
        );
    }
}

fn render_cluster_profile(profile: &ClusterProfileView) {
    let definition = &profile.definition;
    println!(
        "\n[{}] {} ({} risk, {} employees)",
        definition.cluster_id, definition.name, profile.risk_label, definition.employee_count
    );
    println!("  {}", definition.description);
    println!(
        "  Avg age {:.1} | avg service {:.1} | avg absence {:.1} h",
        definition.avg_age, definition.avg_service, definition.avg_absent
    );
    for trait_note in &definition.characteristics {
        println!("  - {trait_note}");
    }
    if profile.members.is_empty() {
        println!("  Members: none");
    } else {
        println!("  Members");
        for member in &profile.members {
            println!(
                "  - {} ({}): {:.1} h",
                member.name, member.job_title, member.predicted_absent
            );
        }
    }
}

fn render_dashboard(summary: &DashboardSummary) {
    println!("Absence dashboard ({})", summary.as_of);
    println!(
        "- {} employees | {:.1} h average predicted absence | top department {}",
        summary.total_employees, summary.average_predicted_absent, summary.top_department
    );

    let metrics = &summary.model_metrics;
    println!(
        "- Model: R2 {:.3} | RMSE {:.2} | MAE {:.2} | accuracy {:.1}%",
        metrics.r2_score, metrics.rmse, metrics.mae, metrics.accuracy
    );

    println!("\nRisk distribution");
    for entry in &summary.risk_distribution {
        println!("- {}: {}", entry.risk_label, entry.count);
    }

    println!("\nDepartments");
    for entry in &summary.departments {
        println!("- {}: {}", entry.department, entry.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absentee_insight::absence::reference;

    #[test]
    fn dashboard_dates_parse_from_flags() {
        let as_of = parse_date("2025-06-30").expect("valid");
        let summary = DashboardSummary::from_employees(
            &reference::employees(),
            reference::model_metrics(),
            as_of,
        );
        assert_eq!(summary.as_of, as_of);
        render_dashboard(&summary);
    }

    #[test]
    fn profiles_render_for_every_cluster() {
        let profiles = cluster_profiles(&reference::clusters(), &reference::employees());
        assert_eq!(profiles.len(), 4);
        for profile in &profiles {
            render_cluster_profile(profile);
        }
    }
}
