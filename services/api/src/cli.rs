use crate::commands::{
    run_clusters, run_dashboard, run_employees, run_features, run_predict, DashboardArgs,
    EmployeesArgs, FeaturesArgs, PredictArgs,
};
use crate::server;
use absentee_insight::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Absentee Insight",
    about = "Predict employee absence and explore the employee table from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Predict monthly absence hours for a single employee profile
    Predict(PredictArgs),
    /// List, filter, sort and optionally export the employee table
    Employees(EmployeesArgs),
    /// Show cluster profiles and their members
    Clusters,
    /// Show model feature importances grouped by category
    Features(FeaturesArgs),
    /// Print the dashboard summary
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Employees(args) => run_employees(args),
        Command::Clusters => run_clusters(),
        Command::Features(args) => run_features(args),
        Command::Dashboard(args) => run_dashboard(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["absentee-insight-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn employees_accepts_table_controls() {
        let cli = Cli::try_parse_from([
            "absentee-insight-api",
            "employees",
            "--department",
            "Engineering",
            "--sort",
            "age",
            "--direction",
            "asc",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Employees(args)) => {
                assert_eq!(args.department.as_deref(), Some("Engineering"));
                assert_eq!(args.sort.as_deref(), Some("age"));
                assert!(args.export.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn predict_requires_profile_fields() {
        let result = Cli::try_parse_from(["absentee-insight-api", "predict", "--age", "30"]);
        assert!(result.is_err());
    }
}
