// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::validation::validate_catalog;
use anyhow::{Context, Result};
use hyperscaler_app::Catalog;
use log::{info, warn};
use std::fs;
use std::path::Path;

pub const BUNDLED_CATALOG: &str = include_str!("data/services.json");

pub fn bundled_catalog() -> Result<Catalog> {
    Catalog::from_json(BUNDLED_CATALOG).context("decode bundled service catalog")
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "read service catalog {}; fix [data] path or pass --dataset with a readable JSON file",
            path.display()
        )
    })?;
    Catalog::from_json(&raw)
        .with_context(|| format!("service catalog {} is not a valid JSON array", path.display()))
}

/// Loads the catalog from `path` when given, otherwise the bundled copy.
/// Data-quality findings are logged as warnings and never fail the load.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => load_catalog_file(path)?,
        None => bundled_catalog()?,
    };

    let source = path.map_or_else(|| "bundled".to_owned(), |path| path.display().to_string());
    info!("loaded {} services from {source} catalog", catalog.len());
    for issue in validate_catalog(&catalog) {
        warn!("{source} catalog: {issue}");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::{bundled_catalog, load_catalog, load_catalog_file};
    use crate::validate_catalog;
    use anyhow::Result;
    use hyperscaler_app::{Language, Provider, category_options};
    use hyperscaler_testkit::{CatalogFaker, write_dataset};
    use std::fs;

    #[test]
    fn bundled_catalog_is_clean_and_bilingual() -> Result<()> {
        let catalog = bundled_catalog()?;
        assert!(catalog.len() >= 50);
        assert!(validate_catalog(&catalog).is_empty());

        let s3 = catalog
            .records()
            .iter()
            .find(|record| record.provider(Provider::Aws).name == "S3")
            .ok_or_else(|| anyhow::anyhow!("S3 missing from bundled catalog"))?;
        assert_eq!(s3.category_label(Language::Es), "Almacenamiento");
        assert_eq!(s3.provider(Provider::Cloudflare).name, "R2");

        let en = category_options(catalog.records(), Language::En);
        let es = category_options(catalog.records(), Language::Es);
        assert_eq!(en.len(), es.len());
        Ok(())
    }

    #[test]
    fn file_catalog_overrides_bundled() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("services.json");
        fs::write(
            &path,
            r#"[{"category":"compute","categoryName":{"en":"Compute"},"aws":"EC2","azure":"VMs","gcp":"GCE","oracle":"OCI","cloudflare":"Workers","description":{"en":"Servers"}}]"#,
        )?;

        let catalog = load_catalog(Some(&path))?;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].category_label(Language::Es), "Compute");
        Ok(())
    }

    #[test]
    fn generated_dataset_loads_unchanged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let catalog = CatalogFaker::new(21).catalog(30);
        let path = write_dataset(dir.path(), &catalog)?;

        let loaded = load_catalog(Some(&path))?;
        assert_eq!(loaded, catalog);
        assert!(validate_catalog(&loaded).is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_or_invalid_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing.json");
        let err = load_catalog_file(&missing).expect_err("missing file should fail");
        assert!(err.to_string().contains("--dataset"));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"not": "an array"}"#)?;
        let err = load_catalog_file(&invalid).expect_err("object should fail");
        assert!(err.to_string().contains("not a valid JSON array"));
        Ok(())
    }
}
