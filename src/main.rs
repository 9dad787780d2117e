use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billdesk::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api_routes},
  domain::audit::AuditService,
  domain::auth::AuthService,
  domain::invoice::{InvoiceService, InvoiceServiceDependencies},
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresAuditLogRepository, PostgresInvoiceHistoryRepository, PostgresInvoiceItemRepository,
      PostgresInvoiceRepository, PostgresInvoiceShipmentRepository, PostgresInvoiceUnitOfWork,
      PostgresShipmentRepository, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billdesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting billdesk");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid configuration: {}", e),
    )
  })?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!(
    max_connections = config.database.max_connections,
    "Connecting to database"
  );

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  // Repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let shipment_repo = Arc::new(PostgresShipmentRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let item_repo = Arc::new(PostgresInvoiceItemRepository::new(db_pool.clone()));
  let invoice_shipment_repo = Arc::new(PostgresInvoiceShipmentRepository::new(db_pool.clone()));
  let audit_log_repo = Arc::new(PostgresAuditLogRepository::new(db_pool.clone()));
  let history_repo = Arc::new(PostgresInvoiceHistoryRepository::new(db_pool.clone()));
  let invoice_unit_of_work = Arc::new(PostgresInvoiceUnitOfWork::new(db_pool.clone()));

  // Security
  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to create password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?);
  let token_service = Arc::new(JwtTokenService::from_base64_secret(
    &config.jwt.secret,
    config.jwt.expiration_seconds,
  ));

  // Domain services
  let auth_service = Arc::new(AuthService::new(user_repo, password_hasher, token_service));
  let audit_service = Arc::new(AuditService::new(audit_log_repo, history_repo));
  let invoice_service = Arc::new(InvoiceService::new(InvoiceServiceDependencies {
    invoice_repo,
    item_repo,
    invoice_shipment_repo,
    shipment_repo,
    unit_of_work: invoice_unit_of_work,
  }));

  let api_deps = ApiDependencies::new(auth_service, invoice_service, audit_service);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let api_deps = api_deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::new(r#"%a "%r" %s %b %{x-request-id}o %T"#))
      .service(web::scope("/api").configure(|cfg| configure_api_routes(cfg, api_deps)))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
