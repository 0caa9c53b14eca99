//! Helpers for tests that run against a live `PostgreSQL` database.

#![allow(missing_docs)]

use crate::migrations::Migrator;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Tables emptied by [`TestDatabase::cleanup`], children first.
const TABLES: [&str; 5] = ["feedback", "review", "scorecard", "place", "user"];

/// Connection settings for the test database, read from `TEST_DB_*`.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            host: env_or("TEST_DB_HOST", "localhost"),
            port: std::env::var("TEST_DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5433),
            username: env_or("TEST_DB_USER", "places_test"),
            password: env_or("TEST_DB_PASSWORD", "places_test"),
            database: env_or("TEST_DB_NAME", "places_test"),
        }
    }
}

impl TestDbConfig {
    /// Connection URL for the places test database.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// A migrated connection to the places test database.
pub struct TestDatabase {
    conn: DatabaseConnection,
}

impl TestDatabase {
    /// Connect using `TEST_DB_*` settings and migrate to the latest schema.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Connect with explicit settings and migrate to the latest schema.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        let conn = Database::connect(&config.database_url()).await?;
        Migrator::up(&conn, None).await?;

        info!(database = %config.database, "Connected to places test database");
        Ok(Self { conn })
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Remove every user, place, review, feedback and scorecard row.
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        for table in TABLES {
            self.conn
                .execute_unprepared(&format!("DELETE FROM \"{table}\""))
                .await?;
        }
        Ok(())
    }
}
