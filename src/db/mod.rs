//! SQLite access.
//!
//! Every helper checks a connection out of the pool, runs exactly one
//! statement and hands the connection back when the guard drops, whichever
//! way the call returns. Rows come back as ordered column → value maps.

use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions,
    SqliteQueryResult, SqliteRow,
};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use std::str::FromStr;

use crate::models::{EventRecord, SportCreate};

mod schema;

pub use schema::ensure_schema;

/// One result row keyed by column name, in result-column order
pub type RowMap = Map<String, Value>;

/// Open a pool on the given SQLite URL, creating the file when missing.
/// Foreign keys are left unenforced so an event may reference any sport id.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(false);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<String>),
            Value::Bool(b) => query.bind(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => query.bind(i),
                None => query.bind(n.as_f64()),
            },
            Value::String(s) => query.bind(s.as_str()),
            other => query.bind(other.to_string()),
        };
    }
    query
}

fn row_to_map(row: &SqliteRow) -> Result<RowMap, sqlx::Error> {
    let mut map = RowMap::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
                "REAL" | "NUMERIC" => Value::from(row.try_get_unchecked::<f64, _>(idx)?),
                "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
                _ => Value::from(row.try_get_unchecked::<String, _>(idx)?),
            }
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}

/// Run a single write (or DDL) statement
pub async fn execute(pool: &SqlitePool, query: &str, params: &[Value]) -> Result<SqliteQueryResult, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    bind_params(sqlx::query(query), params)
        .execute(&mut *conn)
        .await
}

pub async fn fetch_all(pool: &SqlitePool, query: &str, params: &[Value]) -> Result<Vec<RowMap>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let rows = bind_params(sqlx::query(query), params)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(row_to_map).collect()
}

/// First matching row, or an empty map when nothing matches
pub async fn fetch_one(pool: &SqlitePool, query: &str, params: &[Value]) -> Result<RowMap, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let row = bind_params(sqlx::query(query), params)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => row_to_map(&row),
        None => Ok(RowMap::new()),
    }
}

// Sport queries
pub async fn list_sports(pool: &SqlitePool) -> Result<Vec<RowMap>, sqlx::Error> {
    fetch_all(pool, "SELECT * FROM sport", &[]).await
}

pub async fn get_sport(pool: &SqlitePool, sport_id: i64) -> Result<RowMap, sqlx::Error> {
    fetch_one(pool, "SELECT * FROM sport WHERE id = ?", &[Value::from(sport_id)]).await
}

pub async fn insert_sport(pool: &SqlitePool, sport: &SportCreate) -> Result<i64, sqlx::Error> {
    let result = execute(
        pool,
        "INSERT INTO sport (name, slug, active) VALUES (?, ?, ?)",
        &[
            Value::from(sport.name.as_str()),
            Value::from(sport.resolved_slug()),
            Value::from(sport.active),
        ],
    )
    .await?;

    Ok(result.last_insert_rowid())
}

/// Write only the given columns. Column names come from a fixed whitelist
/// in `SportUpdate::assignments`, never from the request.
pub async fn update_sport_fields(
    pool: &SqlitePool,
    sport_id: i64,
    assignments: Vec<(&'static str, Value)>,
) -> Result<u64, sqlx::Error> {
    if assignments.is_empty() {
        return Ok(0);
    }

    let set_clause = assignments
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("UPDATE sport SET {} WHERE id = ?", set_clause);

    let mut params: Vec<Value> = assignments.into_iter().map(|(_, value)| value).collect();
    params.push(Value::from(sport_id));

    let result = execute(pool, &query, &params).await?;
    Ok(result.rows_affected())
}

pub async fn delete_sport(pool: &SqlitePool, sport_id: i64) -> Result<(), sqlx::Error> {
    execute(pool, "DELETE FROM sport WHERE id = ?", &[Value::from(sport_id)]).await?;
    Ok(())
}

// Event queries
pub async fn list_events(pool: &SqlitePool) -> Result<Vec<RowMap>, sqlx::Error> {
    fetch_all(pool, "SELECT * FROM event", &[]).await
}

pub async fn get_event(pool: &SqlitePool, event_id: i64) -> Result<RowMap, sqlx::Error> {
    fetch_one(pool, "SELECT * FROM event WHERE id = ?", &[Value::from(event_id)]).await
}

/// Insert an event and return the stored row
pub async fn insert_event(
    pool: &SqlitePool,
    event: &EventRecord,
    logos: Option<String>,
) -> Result<RowMap, sqlx::Error> {
    let mut params = event.params();
    params.push(Value::from(logos));

    let result = execute(
        pool,
        r#"INSERT INTO event (name, active, slug, type, status, start_time, actual_start_time, sport_id, logos)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        &params,
    )
    .await?;

    get_event(pool, result.last_insert_rowid()).await
}

/// Overwrite every request column of an event and return the stored row
/// (empty when the id does not exist). `logos` is left as it was.
pub async fn replace_event(pool: &SqlitePool, event_id: i64, event: &EventRecord) -> Result<RowMap, sqlx::Error> {
    let mut params = event.params();
    params.push(Value::from(event_id));

    execute(
        pool,
        r#"UPDATE event
           SET name = ?, active = ?, slug = ?, type = ?, status = ?,
               start_time = ?, actual_start_time = ?, sport_id = ?
           WHERE id = ?"#,
        &params,
    )
    .await?;

    get_event(pool, event_id).await
}

pub async fn delete_event(pool: &SqlitePool, event_id: i64) -> Result<(), sqlx::Error> {
    execute(pool, "DELETE FROM event WHERE id = ?", &[Value::from(event_id)]).await?;
    Ok(())
}
