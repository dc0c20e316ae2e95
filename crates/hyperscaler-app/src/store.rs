// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Language, LayoutMode, PaginationState, ThemeMode};
use anyhow::{Result, bail};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Durable string key-value storage for per-user preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Language,
    Theme,
    WrapText,
    Layout,
    Pagination,
}

impl SettingKey {
    pub const ALL: [Self; 5] = [
        Self::Language,
        Self::Theme,
        Self::WrapText,
        Self::Layout,
        Self::Pagination,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "ui.language",
            Self::Theme => "theme",
            Self::WrapText => "ui.wrap_text",
            Self::Layout => "ui.layout",
            Self::Pagination => "hyperscaler-pagination",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// Process-local store used when no durable store is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, like storage disabled by the
    /// platform.
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.unavailable.set(true);
        store
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.get() {
            bail!("preference storage is unavailable");
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads the persisted pagination snapshot. Absent, corrupt or unreadable
/// entries yield the default state; corrupt entries are removed.
pub fn restore_pagination<S: KeyValueStore + ?Sized>(store: &S) -> PaginationState {
    let key = SettingKey::Pagination.as_str();
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PaginationState::default(),
        Err(error) => {
            warn!("read pagination state failed, using defaults: {error:#}");
            return PaginationState::default();
        }
    };

    match PaginationState::from_json(&raw) {
        Some(state) => {
            debug!("restored pagination state {:?}", state.snapshot());
            state
        }
        None => {
            warn!("discarding invalid pagination state {raw:?}");
            if let Err(error) = store.remove(key) {
                warn!("remove invalid pagination state failed: {error:#}");
            }
            PaginationState::default()
        }
    }
}

/// Writes the snapshot. Failures are logged; the in-memory state stays
/// authoritative.
pub fn persist_pagination<S: KeyValueStore + ?Sized>(store: &S, state: &PaginationState) -> bool {
    match store.put(SettingKey::Pagination.as_str(), &state.to_json()) {
        Ok(()) => true,
        Err(error) => {
            warn!("save pagination state failed: {error:#}");
            false
        }
    }
}

/// Stored display preferences. `None` means unset or unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Option<Language>,
    pub theme: Option<ThemeMode>,
    pub wrap_text: Option<bool>,
    pub layout: Option<LayoutMode>,
}

pub fn load_preferences<S: KeyValueStore + ?Sized>(store: &S) -> Preferences {
    Preferences {
        language: read_setting(store, SettingKey::Language, Language::parse),
        theme: read_setting(store, SettingKey::Theme, ThemeMode::parse),
        wrap_text: read_setting(store, SettingKey::WrapText, parse_bool),
        layout: read_setting(store, SettingKey::Layout, LayoutMode::parse),
    }
}

pub fn save_preference<S: KeyValueStore + ?Sized>(store: &S, key: SettingKey, value: &str) -> bool {
    match store.put(key.as_str(), value) {
        Ok(()) => true,
        Err(error) => {
            warn!("save setting {} failed: {error:#}", key.as_str());
            false
        }
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

pub const fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn read_setting<S, T>(store: &S, key: SettingKey, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key.as_str()) {
        Ok(Some(raw)) => {
            let parsed = parse(&raw);
            if parsed.is_none() {
                warn!("ignoring invalid setting {} = {raw:?}", key.as_str());
            }
            parsed
        }
        Ok(None) => None,
        Err(error) => {
            warn!("read setting {} failed: {error:#}", key.as_str());
            None
        }
    }
}
