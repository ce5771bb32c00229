use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use shabbat_match::config::{Settings, StoreBackend};
use shabbat_match::routes::{self, handle_json_payload_error, handle_query_payload_error, matches::AppState};
use shabbat_match::services::{
    ContactStore, InMemoryStore, MatchNotifier, MatchStore, PostgresClient, ReminderSweep,
    RequestStore, WhatsAppClient,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

type Stores = (Arc<dyn RequestStore>, Arc<dyn MatchStore>, Arc<dyn ContactStore>);

async fn build_stores(settings: &Settings) -> std::io::Result<Stores> {
    match settings.store.backend {
        StoreBackend::Postgres => {
            let db = &settings.database;
            let postgres = Arc::new(
                PostgresClient::from_settings(
                    &db.url,
                    db.max_connections,
                    db.min_connections,
                    db.acquire_timeout_secs,
                    db.idle_timeout_secs,
                )
                .await
                .map_err(|e| {
                    error!("Failed to connect to PostgreSQL: {}", e);
                    std::io::Error::new(std::io::ErrorKind::Other, e)
                })?,
            );
            info!("PostgreSQL store initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            let requests: Arc<dyn RequestStore> = postgres.clone();
            let matches: Arc<dyn MatchStore> = postgres.clone();
            let contacts: Arc<dyn ContactStore> = postgres;
            Ok((requests, matches, contacts))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            let memory = Arc::new(InMemoryStore::new());
            let requests: Arc<dyn RequestStore> = memory.clone();
            let matches: Arc<dyn MatchStore> = memory.clone();
            let contacts: Arc<dyn ContactStore> = memory;
            Ok((requests, matches, contacts))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Shabbat match service...");

    let (requests, matches, contacts) = build_stores(&settings).await?;

    let notifier = if settings.notifications.enabled {
        let client = WhatsAppClient::new(
            settings.notifications.api_url.clone(),
            settings.notifications.access_token.clone(),
            Duration::from_secs(settings.notifications.timeout_secs),
        )
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        info!("WhatsApp notifications enabled");
        Some(MatchNotifier::new(Arc::new(client), contacts.clone(), requests.clone()))
    } else {
        info!("WhatsApp notifications disabled");
        None
    };

    if settings.reminders.enabled {
        match &notifier {
            Some(notifier) => {
                let sweep = ReminderSweep::new(
                    matches.clone(),
                    notifier.clone(),
                    chrono::Duration::hours(settings.reminders.confirm_within_hours),
                    chrono::Duration::seconds(settings.reminders.interval_secs as i64),
                );
                info!(
                    "Confirmation reminders every {}s for matches older than {}h",
                    settings.reminders.interval_secs,
                    settings.reminders.confirm_within_hours
                );
                tokio::spawn(sweep.run());
            }
            None => warn!("Reminders enabled but notifications are disabled; skipping reminder sweep"),
        }
    }

    let app_state = AppState::new(requests, matches, contacts, notifier);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
