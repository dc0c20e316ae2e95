// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod validation;

pub use catalog::{BUNDLED_CATALOG, bundled_catalog, load_catalog, load_catalog_file};
pub use validation::{DataIssue, RecordIssue, validate_catalog};

use anyhow::{Context, Result, anyhow, bail};
use hyperscaler_app::KeyValueStore;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const APP_NAME: &str = "hyperscaler";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[("settings", &["key", "value", "updated_at"])];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSetting {
    pub key: String,
    pub value: String,
    pub updated_at: OffsetDateTime,
}

/// SQLite-backed preference store.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
        }
        Ok(())
    }

    pub fn list_settings(&self) -> Result<Vec<StoredSetting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value, updated_at FROM settings ORDER BY key")
            .context("prepare settings query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .context("query settings")?;

        let mut settings = Vec::new();
        for row in rows {
            let (key, value, updated_at) = row.context("read settings row")?;
            let updated_at = OffsetDateTime::parse(&updated_at, &Rfc3339)
                .with_context(|| format!("setting `{key}` has invalid timestamp {updated_at:?}"))?;
            settings.push(StoredSetting {
                key,
                value,
                updated_at,
            });
        }
        Ok(settings)
    }

    fn get_setting_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read setting {key}"))
    }

    fn put_setting_raw(&self, key: &str, value: &str) -> Result<()> {
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO settings (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = excluded.updated_at
                ",
                params![key, value, now],
            )
            .with_context(|| format!("upsert setting {key}"))?;
        Ok(())
    }

    fn delete_setting_raw(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?", params![key])
            .with_context(|| format!("delete setting {key}"))?;
        Ok(())
    }
}

impl KeyValueStore for Store {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_setting_raw(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.put_setting_raw(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.delete_setting_raw(key)
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("HYPERSCALER_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!(
            "cannot resolve data directory; set HYPERSCALER_DB_PATH to a writable database path"
        )
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("hyperscaler.db"))
}

/// Rejects empty paths and SQLite URI forms; `:memory:` is allowed.
pub fn validate_db_path(path: &str) -> Result<()> {
    match path {
        "" => bail!("preference database path must not be empty"),
        ":memory:" => return Ok(()),
        _ => {}
    }

    if let Some((scheme, _)) = path.split_once("://")
        && !scheme.is_empty()
        && scheme.chars().all(char::is_alphabetic)
    {
        bail!(
            "preference database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
        );
    }

    if path.starts_with("file:") || path.contains('?') {
        bail!(
            "preference database path {path:?} uses SQLite URI syntax; pass a plain file path without `file:` or query parameters"
        );
    }

    Ok(())
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%')",
        [],
        |row| row.get::<_, bool>(0),
    )
    .context("inspect preference database tables")
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        let columns = table_columns(conn, table)?;
        if columns.is_empty() {
            bail!(
                "database is missing required table `{table}`, so it is not a hyperscaler preference database; point [storage] db_path at one or at a new file"
            );
        }

        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();
        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; remove the preference database and it will be recreated with defaults",
                missing.join(", ")
            );
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("prepare table info for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query table info for {table}"))?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(5))
        .context("set preference database busy timeout")?;
    conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
        .context("configure preference database journal")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}
