use std::path::PathBuf;

use randpop::app::{context::AppContext, pipeline::Pipeline};
use randpop::domain::model::AppMode;
use randpop::infra::{
    config::ConfigLoader,
    logging::{init_logging, BootError},
    postgres_repo::{self, PostgresRepo},
    reqwest_http::RandomUserClient,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), BootError> {
    let cfg_path = pick_config_path(std::env::args().nth(1));
    let cfg = ConfigLoader::load(&cfg_path)
        .await
        .map_err(|e| BootError::Fatal(e.to_string()))?;
    init_logging(&cfg.log_level);

    info!(
        api = %cfg.api.url,
        batch_size = cfg.api.batch_size,
        db = %cfg.postgres.database,
        host = %cfg.postgres.host,
        mode = ?cfg.mode,
        timezone = %cfg.timezone,
        "Loaded config"
    );

    if matches!(cfg.mode, AppMode::Dev) {
        warn!(db = %cfg.postgres.database, "Dev mode enabled, wiping database");
        postgres_repo::wipe_database(&cfg.postgres, &cfg.timezone)
            .await
            .map_err(BootError::Fatal)?;
    }

    let repo = PostgresRepo::new(&cfg.postgres, &cfg.timezone)
        .await
        .map_err(BootError::Fatal)?;
    let http =
        RandomUserClient::new(&cfg.api).map_err(|e| BootError::Fatal(e.to_string()))?;

    let ctx = AppContext { cfg, repo, http };

    if let Err(e) = Pipeline::run(&ctx).await {
        error!(error = %e, "Fatal error");
        return Err(BootError::Fatal(e));
    }

    Ok(())
}

fn pick_config_path(arg1: Option<String>) -> PathBuf {
    if let Some(p) = arg1 {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("CONFIG_PATH") {
        if !p.trim().is_empty() {
            return PathBuf::from(p);
        }
    }

    PathBuf::from("res/config.toml")
}
