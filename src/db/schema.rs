use sqlx::sqlite::SqlitePool;

use super::execute;
use crate::models::{Choice, Outcome};

const CREATE_SPORT: &str = r#"
    CREATE TABLE IF NOT EXISTS sport (
        id INTEGER PRIMARY KEY,
        name VARCHAR(45) NOT NULL,
        slug VARCHAR(45) UNIQUE NOT NULL,
        active TINYINT DEFAULT 1
    )"#;

// sport_id stays nullable and the foreign key is never enforced (see connect)
const CREATE_EVENT: &str = r#"
    CREATE TABLE IF NOT EXISTS event (
        id INTEGER PRIMARY KEY,
        name VARCHAR(45) NOT NULL,
        active TINYINT DEFAULT 1,
        slug VARCHAR(45) UNIQUE NOT NULL,
        type VARCHAR(45) NOT NULL,
        status VARCHAR(45) NOT NULL,
        start_time DATETIME NULL,
        actual_start_time DATETIME NULL,
        sport_id INTEGER NULL,
        logos VARCHAR(255) NULL,
        CONSTRAINT sport_id
            FOREIGN KEY (sport_id)
            REFERENCES sport (id)
            ON DELETE NO ACTION
            ON UPDATE NO ACTION
    )"#;

fn create_selection() -> String {
    let outcomes = Outcome::allowed();

    format!(
        r#"
    CREATE TABLE IF NOT EXISTS selection (
        id INTEGER PRIMARY KEY,
        name VARCHAR(45) NOT NULL,
        price INTEGER NOT NULL,
        active TINYINT DEFAULT 1,
        outcome VARCHAR(45) NOT NULL CHECK (outcome IN ({outcomes})),
        event_id INTEGER NOT NULL,
        CONSTRAINT event_id
            FOREIGN KEY (event_id)
            REFERENCES event (id)
            ON DELETE NO ACTION
            ON UPDATE NO ACTION
    )"#
    )
}

/// Create the sport, event and selection tables if they do not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    execute(pool, CREATE_SPORT, &[]).await?;
    execute(pool, CREATE_EVENT, &[]).await?;
    execute(pool, &create_selection(), &[]).await?;

    tracing::info!("Database schema ready.");
    Ok(())
}
