//! Process-wide state shared by every handler.

use anyhow::Context;
use pv_config::PvConfig;
use pv_db::service::PvService;
use pv_risk::RiskScorer;

/// Built once at startup and never reinitialized.
pub struct AppState {
    pub service: PvService,
    pub scorer: RiskScorer,
    pub config: PvConfig,
}

impl AppState {
    #[must_use]
    pub const fn new(service: PvService, scorer: RiskScorer, config: PvConfig) -> Self {
        Self {
            service,
            scorer,
            config,
        }
    }

    /// Startup sequence: load the risk model, open and migrate the store,
    /// then seed demo mentors if enabled.
    ///
    /// A missing or broken model only disables prediction; store failures abort.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or seeded.
    pub async fn init(config: PvConfig) -> anyhow::Result<Self> {
        let scorer = RiskScorer::load(config.model.artifact_path().as_deref());

        let service = PvService::open(&config.database)
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.url))?;

        if config.bootstrap.seed_demo_mentors {
            service
                .seed_demo_mentors()
                .await
                .context("failed to seed demo mentors")?;
        }

        Ok(Self::new(service, scorer, config))
    }
}
