//! Subcommand handlers.

use std::sync::Arc;

use anyhow::Context;
use pv_config::PvConfig;
use pv_core::features::FeatureVector;
use pv_core::responses::PredictResponse;
use pv_db::service::PvService;
use pv_risk::RiskScorer;
use pv_server::AppState;

use crate::cli::ScoreArgs;

pub async fn serve(config: PvConfig) -> anyhow::Result<()> {
    let state = AppState::init(config)
        .await
        .context("failed to initialize application state")?;
    pv_server::serve(Arc::new(state)).await
}

pub async fn init_db(config: &PvConfig) -> anyhow::Result<()> {
    let service = PvService::open(&config.database)
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.url))?;

    let seeded = if config.bootstrap.seed_demo_mentors {
        service.seed_demo_mentors().await?
    } else {
        0
    };
    let mentors = service.count_mentors().await?;

    println!(
        "{}",
        serde_json::json!({
            "database": config.database.url,
            "mentors": mentors,
            "seeded": seeded,
        })
    );
    Ok(())
}

pub fn score(config: &PvConfig, args: &ScoreArgs) -> anyhow::Result<()> {
    let path = config
        .model
        .artifact_path()
        .context("no risk model configured; set RISK_MODEL_PATH or model.path")?;
    let scorer = RiskScorer::try_load(&path)
        .with_context(|| format!("failed to load risk model from {}", path.display()))?;

    let features = FeatureVector::new(args.attendance, args.marks, args.backlog, &args.gender);
    let probability = scorer.probability(&features)?;
    let dropout_risk = scorer.score(&features)?;
    tracing::debug!(probability, "scored from command line");

    println!(
        "{}",
        serde_json::to_string_pretty(&PredictResponse::from_risk(dropout_risk))?
    );
    Ok(())
}
