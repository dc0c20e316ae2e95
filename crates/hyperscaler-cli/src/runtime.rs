// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use hyperscaler_app::{KeyValueStore, PaginationState, SettingKey};

pub struct StoreRuntime<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }
}

impl hyperscaler_tui::AppRuntime for StoreRuntime<'_> {
    fn save_pagination(&mut self, pagination: &PaginationState) -> Result<()> {
        self.store
            .put(SettingKey::Pagination.as_str(), &pagination.to_json())
            .context("save pagination state")
    }

    fn save_preference(&mut self, key: SettingKey, value: &str) -> Result<()> {
        self.store
            .put(key.as_str(), value)
            .with_context(|| format!("save setting {}", key.as_str()))
    }
}
