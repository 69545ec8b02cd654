use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use chiron::app_state::AppState;
use chiron::classifier::ModelRegistry;
use chiron::reminders::{self, LogSink};
use chiron::{api, config, db};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Chiron starting v{}", config::APP_VERSION);

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir).expect("Cannot create application data directory");

    let db_path = config::db_path();
    // Open once up front so migrations run before anything is served.
    db::open_database(&db_path).expect("Cannot open database");

    let models = ModelRegistry::from_models_dir(&config::models_dir());
    let state = Arc::new(AppState::new(db_path, models));

    match state.rebuild_reminders() {
        Ok(count) => tracing::info!(pending = count, "Reminder schedule ready"),
        Err(e) => tracing::warn!("Could not build reminder schedule: {e}"),
    }

    // Reminder dispatch loop: every 30s, deliver reminders that came due
    // since the previous tick. Delivery failures are logged only.
    let dispatch_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(30));
        let mut last_tick = Local::now().naive_local();
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            let now = Local::now().naive_local();
            match dispatch_state.schedule() {
                Ok(schedule) => {
                    reminders::dispatch_due(&schedule, &LogSink, last_tick, now);
                }
                Err(e) => tracing::warn!("Reminder dispatch skipped: {e}"),
            }
            last_tick = now;
        }
    });

    let router = api::router::api_router(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], config::api_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Cannot bind API port");
    tracing::info!("API listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .expect("error while running Chiron");
}
