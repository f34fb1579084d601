use db_migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub use sea_orm::DbErr;

pub mod entities;
pub mod models;

#[derive(Clone)]
pub struct DBService {
    pub conn: DatabaseConnection,
}

impl DBService {
    /// Connects to the database and applies pending migrations.
    ///
    /// Accepts any URL sea-orm understands; production deployments use the
    /// cloud-hosted MySQL instance, local runs default to an on-disk sqlite
    /// file (see the server binary).
    pub async fn new(database_url: &str) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(database_url);
        options
            .max_connections(5)
            .sqlx_logging(false)
            .connect_timeout(std::time::Duration::from_secs(30));

        let conn = Database::connect(options).await?;
        Migrator::up(&conn, None).await?;
        tracing::debug!("database connected, migrations applied");

        Ok(DBService { conn })
    }
}
