use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

const PRAGMAS: [&str; 3] =
    ["PRAGMA foreign_keys=ON", "PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

/// Opens the database and applies any pending migrations.
pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> AppResult<DatabaseConnection> {
    let db = connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Opens the database, drops every table and recreates the schema.
pub async fn connect_and_reset(options: impl Into<ConnectOptions>) -> AppResult<DatabaseConnection> {
    let db = connect(options).await?;
    Migrator::fresh(&db).await?;
    Ok(db)
}

async fn connect(options: impl Into<ConnectOptions>) -> AppResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    Ok(db)
}
