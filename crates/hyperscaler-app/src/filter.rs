// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::normalize::normalize;
use crate::{Language, Provider, ServiceRecord};
use std::collections::BTreeMap;

/// Free-text query plus an optional category label. Empty strings mean
/// "no restriction" for their clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: String,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.category.trim().is_empty()
    }
}

/// Boolean membership test: text clause AND category clause.
pub fn matches(record: &ServiceRecord, query: &str, category: &str, language: Language) -> bool {
    let query = normalize(query.trim());
    let category = normalize(category.trim());
    matches_normalized(record, &query, &category, language)
}

fn matches_normalized(
    record: &ServiceRecord,
    query: &str,
    category: &str,
    language: Language,
) -> bool {
    let category_label = normalize(record.category_label(language));
    if !category.is_empty() && category_label != category {
        return false;
    }
    if query.is_empty() {
        return true;
    }

    category_label.contains(query)
        || Provider::ALL
            .iter()
            .any(|provider| normalize(&record.provider(*provider).name).contains(query))
        || normalize(record.description_text(language)).contains(query)
}

/// Indices of matching records, in dataset order.
pub fn filter_indices(
    records: &[ServiceRecord],
    query: &str,
    category: &str,
    language: Language,
) -> Vec<usize> {
    let query = normalize(query.trim());
    let category = normalize(category.trim());
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_normalized(record, &query, &category, language))
        .map(|(index, _)| index)
        .collect()
}

/// Distinct category labels in the active language, ordered by their
/// normalized form.
pub fn category_options(records: &[ServiceRecord], language: Language) -> Vec<String> {
    let mut options = BTreeMap::new();
    for record in records {
        let label = record.category_label(language).trim();
        if label.is_empty() {
            continue;
        }
        options
            .entry(normalize(label))
            .or_insert_with(|| label.to_owned());
    }
    options.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::{FilterCriteria, category_options, filter_indices, matches};
    use crate::{Language, LocalizedText, ProviderService, ServiceRecord};

    fn record(category_en: &str, category_es: &str, names: [&str; 5], en: &str) -> ServiceRecord {
        ServiceRecord {
            category: category_en.to_ascii_lowercase(),
            category_name: LocalizedText::new(category_en, category_es),
            providers: names.map(ProviderService::new),
            description: LocalizedText::new(en, format!("{en} (es)")),
        }
    }

    fn storage() -> ServiceRecord {
        record(
            "Storage",
            "Almacenamiento",
            ["S3", "Blob Storage", "Cloud Storage", "Object Storage", "R2"],
            "Object storage for unstructured data",
        )
    }

    fn compute() -> ServiceRecord {
        record(
            "Compute",
            "Cómputo",
            ["EC2", "Virtual Machines", "Compute Engine", "Compute", "Workers"],
            "Virtual servers served from the café",
        )
    }

    #[test]
    fn empty_query_and_category_match_everything() {
        assert!(matches(&storage(), "", "", Language::En));
        assert!(matches(&compute(), "   ", "", Language::Es));
    }

    #[test]
    fn accent_insensitive_description_match() {
        assert!(matches(&compute(), "cafe", "", Language::En));
        assert!(matches(&compute(), "CAFÉ", "", Language::En));
    }

    #[test]
    fn query_checks_every_provider_name() {
        assert!(matches(&storage(), "r2", "", Language::En));
        assert!(matches(&storage(), "blob", "", Language::En));
        assert!(matches(&compute(), "workers", "", Language::En));
        assert!(!matches(&compute(), "lambda", "", Language::En));
    }

    #[test]
    fn category_label_uses_active_language() {
        assert!(matches(&compute(), "computo", "", Language::Es));
        assert!(matches(&storage(), "almacen", "", Language::Es));
        assert!(!matches(&storage(), "almacen", "", Language::En));
    }

    #[test]
    fn category_clause_requires_exact_normalized_label() {
        assert!(matches(&compute(), "", "Cómputo", Language::Es));
        assert!(matches(&compute(), "", "computo", Language::Es));
        assert!(!matches(&compute(), "", "Comp", Language::Es));
        assert!(!matches(&compute(), "", "Storage", Language::En));
    }

    #[test]
    fn both_clauses_must_pass() {
        assert!(matches(&storage(), "s3", "Storage", Language::En));
        assert!(!matches(&storage(), "ec2", "Storage", Language::En));
    }

    #[test]
    fn filter_indices_preserve_dataset_order() {
        let records = vec![storage(), compute(), storage()];
        assert_eq!(filter_indices(&records, "storage", "", Language::En), vec![0, 2]);
        assert_eq!(filter_indices(&records, "", "", Language::En), vec![0, 1, 2]);
        assert!(filter_indices(&records, "zzz", "", Language::En).is_empty());
    }

    #[test]
    fn category_options_are_distinct_and_sorted() {
        let records = vec![storage(), compute(), storage()];
        assert_eq!(
            category_options(&records, Language::Es),
            vec!["Almacenamiento".to_owned(), "Cómputo".to_owned()]
        );
        assert_eq!(
            category_options(&records, Language::En),
            vec!["Compute".to_owned(), "Storage".to_owned()]
        );
    }

    #[test]
    fn criteria_activity_ignores_whitespace() {
        assert!(!FilterCriteria::new("  ", "").is_active());
        assert!(FilterCriteria::new("", "Storage").is_active());
    }
}
