// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use hyperscaler_app::{Catalog, Provider, ServiceRecord};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIssue {
    EmptyCategoryId,
    MissingTranslation,
    MissingProviderName,
    MalformedUrl,
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategoryId => f.write_str("empty category id"),
            Self::MissingTranslation => f.write_str("missing translation"),
            Self::MissingProviderName => f.write_str("missing provider service name"),
            Self::MalformedUrl => f.write_str("malformed service URL"),
        }
    }
}

impl std::error::Error for DataIssue {}

/// One data-quality finding, located by record index and field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    pub index: usize,
    pub issue: DataIssue,
    pub field: String,
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {} ({})", self.index, self.issue, self.field)
    }
}

pub fn validate_catalog(catalog: &Catalog) -> Vec<RecordIssue> {
    let mut issues = Vec::new();
    for (index, record) in catalog.records().iter().enumerate() {
        validate_record(index, record, &mut issues);
    }
    issues
}

/// Accepts absolute http(s) URLs with a host.
pub fn check_url(raw: &str) -> Result<(), DataIssue> {
    let url = Url::parse(raw.trim()).map_err(|_| DataIssue::MalformedUrl)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        _ => Err(DataIssue::MalformedUrl),
    }
}

fn validate_record(index: usize, record: &ServiceRecord, issues: &mut Vec<RecordIssue>) {
    let mut push = |issue: DataIssue, field: String| {
        issues.push(RecordIssue {
            index,
            issue,
            field,
        });
    };

    if record.category.trim().is_empty() {
        push(DataIssue::EmptyCategoryId, "category".to_owned());
    }
    for language in record.category_name.missing_languages() {
        push(
            DataIssue::MissingTranslation,
            format!("categoryName.{}", language.as_str()),
        );
    }
    for language in record.description.missing_languages() {
        push(
            DataIssue::MissingTranslation,
            format!("description.{}", language.as_str()),
        );
    }

    for provider in Provider::ALL {
        let service = record.provider(provider);
        let key = provider_key(provider);
        if service.name.trim().is_empty() {
            push(DataIssue::MissingProviderName, key.to_owned());
        }
        if let Some(url) = &service.url
            && let Err(issue) = check_url(url)
        {
            push(issue, format!("{key}Url"));
        }
    }
}

const fn provider_key(provider: Provider) -> &'static str {
    match provider {
        Provider::Aws => "aws",
        Provider::Azure => "azure",
        Provider::Gcp => "gcp",
        Provider::Oracle => "oracle",
        Provider::Cloudflare => "cloudflare",
    }
}
