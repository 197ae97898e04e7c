mod seed;
mod telemetry;

use std::process::ExitCode;

use jobpulse_storage::Database;
use jobpulse_util::{load_env_file, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(stage = "app", error = %err, "seeding failed");
            eprintln!("seeding failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;

    info!(stage = "app", env = %config.environment.as_str(), "connecting to database");
    let database = Database::connect(&config.database_url).await?;
    if let Err(err) = database.run_migrations().await {
        database.close().await;
        return Err(err.into());
    }

    let plan = seed::SeedPlan::from(&config.seed);
    let rng = seed::seeded_rng(config.seed.rng_seed);
    let dataset = match seed::run_and_close(&database, plan, rng).await {
        Ok(dataset) => dataset,
        Err(err) => {
            error!(stage = "seed", phase = %err.phase(), "seed run aborted");
            return Err(err.into());
        }
    };

    let report = dataset.report();
    info!(
        stage = "app",
        users = report.users,
        companies = report.companies,
        jobs = report.jobs,
        applications = report.applications,
        reviews = report.reviews,
        "database seeding completed"
    );
    Ok(())
}
