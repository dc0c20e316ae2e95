// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use hyperscaler_app::{
    KeyValueStore, Language, PaginationState, SettingKey, ThemeMode, load_preferences,
    persist_pagination, restore_pagination, save_preference,
};
use hyperscaler_db::{Store, validate_db_path};
use hyperscaler_testkit::temp_db_path;

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/hyperscaler.db").is_ok());
}

#[test]
fn path_and_schema_errors_name_the_preference_database() -> Result<()> {
    let err = validate_db_path("file:prefs.db").expect_err("file: URI should fail");
    assert!(err.to_string().contains("preference database path"));

    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY);")?;
    let err = store.bootstrap().expect_err("foreign database should fail");
    assert!(err.to_string().contains("not a hyperscaler preference database"));
    Ok(())
}

#[test]
fn bootstrap_is_idempotent() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.put("theme", "dark")?;
    store.bootstrap()?;
    assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")?;

    let err = store
        .bootstrap()
        .expect_err("database without settings table should fail");
    assert!(
        err.to_string()
            .contains("database is missing required table `settings`")
    );
    Ok(())
}

#[test]
fn bootstrap_rejects_settings_missing_column() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE settings (key TEXT PRIMARY KEY, value TEXT NOT NULL);")?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `settings` is missing required columns"));
    assert!(message.contains("updated_at"));
    Ok(())
}

#[test]
fn put_get_remove_round_trip() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    assert_eq!(store.get("ui.language")?, None);
    store.put("ui.language", "en")?;
    store.put("ui.language", "es")?;
    assert_eq!(store.get("ui.language")?.as_deref(), Some("es"));

    store.remove("ui.language")?;
    assert_eq!(store.get("ui.language")?, None);
    store.remove("ui.language")?;
    Ok(())
}

#[test]
fn list_settings_reports_timestamps() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.put("theme", "light")?;
    store.put("hyperscaler-pagination", "{}")?;

    let settings = store.list_settings()?;
    let keys: Vec<&str> = settings.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["hyperscaler-pagination", "theme"]);
    assert!(settings.iter().all(|s| s.updated_at.year() >= 2024));
    Ok(())
}

#[test]
fn pagination_survives_reopen() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    let mut state = PaginationState::default();
    state.set_total_items(47);
    state.set_current_page(3);

    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        assert!(persist_pagination(&store, &state));
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    let restored = restore_pagination(&store);
    assert_eq!(restored.current_page(), 3);
    assert_eq!(restored.total_items(), 47);
    assert_eq!(restored.items_per_page(), 20);
    Ok(())
}

#[test]
fn corrupt_pagination_is_discarded_from_disk() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    let store = Store::open(&path)?;
    store.bootstrap()?;
    store.put(SettingKey::Pagination.as_str(), "not json")?;

    assert_eq!(restore_pagination(&store), PaginationState::default());
    assert_eq!(store.get(SettingKey::Pagination.as_str())?, None);
    Ok(())
}

#[test]
fn preferences_persist_through_store() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    assert!(save_preference(&store, SettingKey::Language, Language::Es.as_str()));
    assert!(save_preference(&store, SettingKey::Theme, ThemeMode::Light.as_str()));

    let prefs = load_preferences(&store);
    assert_eq!(prefs.language, Some(Language::Es));
    assert_eq!(prefs.theme, Some(ThemeMode::Light));
    assert_eq!(prefs.wrap_text, None);
    Ok(())
}

#[test]
fn unbootstrapped_store_degrades_to_defaults() -> Result<()> {
    let store = Store::open_memory()?;
    assert!(store.get("theme").is_err());
    assert_eq!(restore_pagination(&store), PaginationState::default());
    assert!(!persist_pagination(&store, &PaginationState::default()));
    Ok(())
}
