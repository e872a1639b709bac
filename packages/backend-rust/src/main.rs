use lesson_backend::config::Config;
use lesson_backend::db::Database;
use lesson_backend::logging::init_tracing;
use lesson_backend::seed;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config);

    let db = match Database::from_env().await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, "database not initialized");
            std::process::exit(1);
        }
    };

    if let Err(err) = db.migrate().await {
        tracing::error!(error = %err, "migration failed");
        db.close().await;
        std::process::exit(1);
    }

    if config.seed_content {
        match seed::seed_sample_content(&db).await {
            Ok(count) => tracing::info!(exercises = count, "sample content ready"),
            Err(err) => tracing::warn!(error = %err, "failed to seed sample content"),
        }
    }

    db.close().await;
    tracing::info!("lesson store ready");
}
