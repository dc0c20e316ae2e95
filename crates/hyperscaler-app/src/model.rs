// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }
}

/// Text keyed by language. Either entry may be absent in malformed data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: Some(en.into()),
            es: Some(es.into()),
        }
    }

    pub fn entry(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::Es => self.es.as_deref(),
        }
    }

    /// Falls back to English, then to the empty string.
    pub fn get(&self, language: Language) -> &str {
        self.entry(language)
            .or(self.en.as_deref())
            .unwrap_or_default()
    }

    pub fn missing_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.entry(*language).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    Oracle,
    Cloudflare,
}

impl Provider {
    pub const ALL: [Self; 5] = [
        Self::Aws,
        Self::Azure,
        Self::Gcp,
        Self::Oracle,
        Self::Cloudflare,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "GCP",
            Self::Oracle => "Oracle",
            Self::Cloudflare => "Cloudflare",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Aws => 0,
            Self::Azure => 1,
            Self::Gcp => 2,
            Self::Oracle => 3,
            Self::Cloudflare => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderService {
    pub name: String,
    pub url: Option<String>,
}

impl ProviderService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ServiceRecordWire", into = "ServiceRecordWire")]
pub struct ServiceRecord {
    pub category: String,
    pub category_name: LocalizedText,
    pub providers: [ProviderService; 5],
    pub description: LocalizedText,
}

impl ServiceRecord {
    pub fn provider(&self, provider: Provider) -> &ProviderService {
        &self.providers[provider.index()]
    }

    pub fn category_label(&self, language: Language) -> &str {
        self.category_name.get(language)
    }

    pub fn description_text(&self, language: Language) -> &str {
        self.description.get(language)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRecordWire {
    #[serde(default)]
    category: String,
    #[serde(default)]
    category_name: LocalizedText,
    #[serde(default)]
    aws: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aws_url: Option<String>,
    #[serde(default)]
    azure: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    azure_url: Option<String>,
    #[serde(default)]
    gcp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gcp_url: Option<String>,
    #[serde(default)]
    oracle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oracle_url: Option<String>,
    #[serde(default)]
    cloudflare: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloudflare_url: Option<String>,
    #[serde(default)]
    description: LocalizedText,
}

impl From<ServiceRecordWire> for ServiceRecord {
    fn from(wire: ServiceRecordWire) -> Self {
        let service = |name: String, url: Option<String>| ProviderService {
            name,
            url: url.filter(|value| !value.trim().is_empty()),
        };
        Self {
            category: wire.category,
            category_name: wire.category_name,
            providers: [
                service(wire.aws, wire.aws_url),
                service(wire.azure, wire.azure_url),
                service(wire.gcp, wire.gcp_url),
                service(wire.oracle, wire.oracle_url),
                service(wire.cloudflare, wire.cloudflare_url),
            ],
            description: wire.description,
        }
    }
}

impl From<ServiceRecord> for ServiceRecordWire {
    fn from(record: ServiceRecord) -> Self {
        let [aws, azure, gcp, oracle, cloudflare] = record.providers;
        Self {
            category: record.category,
            category_name: record.category_name,
            aws: aws.name,
            aws_url: aws.url,
            azure: azure.name,
            azure_url: azure.url,
            gcp: gcp.name,
            gcp_url: gcp.url,
            oracle: oracle.name,
            oracle_url: oracle.url,
            cloudflare: cloudflare.name,
            cloudflare_url: cloudflare.url,
            description: record.description,
        }
    }
}

/// The full, immutable record list for one process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Arc<[ServiceRecord]>,
}

impl Catalog {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<ServiceRecord> =
            serde_json::from_str(raw).context("decode service catalog JSON")?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub const fn cycled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    pub const fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => system_prefers_dark,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Auto,
    Table,
    Cards,
}

impl LayoutMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "table" => Some(Self::Table),
            "cards" => Some(Self::Cards),
            _ => None,
        }
    }

    pub const fn cycled(self) -> Self {
        match self {
            Self::Auto => Self::Table,
            Self::Table => Self::Cards,
            Self::Cards => Self::Auto,
        }
    }

    pub const fn uses_cards(self, width: u16, card_min_width: u16) -> bool {
        match self {
            Self::Auto => width < card_min_width,
            Self::Table => false,
            Self::Cards => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    #[default]
    Nav,
    Search,
}
