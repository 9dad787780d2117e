use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::ImageExt;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
use uuid::Uuid;

use crate::domain::auth::User;

/// Starts a throwaway Postgres with the schema applied
pub async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
  let container = Postgres::default()
    .with_tag("16-alpine")
    .start()
    .await
    .expect("Failed to start postgres container");

  let host = container.get_host().await.expect("Failed to get host");
  let port = container
    .get_host_port_ipv4(5432)
    .await
    .expect("Failed to get port");
  let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

  let pool = PgPoolOptions::new()
    .max_connections(5)
    .connect(&database_url)
    .await
    .expect("Failed to connect to test database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  (pool, container)
}

/// Inserts a user row so invoices have a valid `created_by`
pub async fn insert_user(pool: &PgPool, username: &str) -> Uuid {
  let user = User::new(
    username.to_string(),
    format!("{}@example.com", username),
    "Test User".to_string(),
    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
  );

  sqlx::query(
    "INSERT INTO users (id, username, email, full_name, password_hash) VALUES ($1, $2, $3, $4, $5)",
  )
  .bind(user.id)
  .bind(&user.username)
  .bind(&user.email)
  .bind(&user.full_name)
  .bind(&user.password_hash)
  .execute(pool)
  .await
  .expect("Failed to insert user");

  user.id
}

pub async fn insert_shipment(pool: &PgPool, tracking_number: &str) -> Uuid {
  let id = Uuid::new_v4();
  sqlx::query("INSERT INTO shipments (id, tracking_number) VALUES ($1, $2)")
    .bind(id)
    .bind(tracking_number)
    .execute(pool)
    .await
    .expect("Failed to insert shipment");
  id
}
