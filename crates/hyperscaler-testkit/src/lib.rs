// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use hyperscaler_app::{Catalog, LocalizedText, ProviderService, ServiceRecord};
use std::fs;
use std::path::{Path, PathBuf};

const CATEGORIES: [(&str, &str, &str); 8] = [
    ("compute", "Compute", "Cómputo"),
    ("storage", "Storage", "Almacenamiento"),
    ("database", "Database", "Bases de datos"),
    ("networking", "Networking", "Redes"),
    ("security", "Security", "Seguridad"),
    ("analytics", "Analytics", "Analítica"),
    ("messaging", "Messaging", "Mensajería"),
    ("monitoring", "Monitoring", "Monitoreo"),
];

const PROVIDER_PREFIXES: [&str; 5] = ["Elastic", "Azure", "Cloud", "OCI", "Edge"];

const NOUNS: [&str; 14] = [
    "Engine", "Vault", "Stream", "Queue", "Gateway", "Fabric", "Lens", "Relay", "Harbor",
    "Beacon", "Forge", "Ledger", "Mesh", "Pulse",
];

const VERBS: [(&str, &str); 8] = [
    ("Manage", "Administra"),
    ("Scale", "Escala"),
    ("Protect", "Protege"),
    ("Observe", "Observa"),
    ("Route", "Enruta"),
    ("Store", "Guarda"),
    ("Analyze", "Analiza"),
    ("Deliver", "Entrega"),
];

const OBJECTS: [(&str, &str); 8] = [
    ("workloads", "cargas de trabajo"),
    ("events", "eventos"),
    ("backups", "copias de seguridad"),
    ("containers", "contenedores"),
    ("secrets", "secretos"),
    ("metrics", "métricas"),
    ("requests", "solicitudes"),
    ("datasets", "conjuntos de datos"),
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible bilingual service records.
#[derive(Debug, Clone)]
pub struct CatalogFaker {
    rng: DeterministicRng,
    seed: u64,
    serial: usize,
}

impl CatalogFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            serial: 0,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn record(&mut self) -> ServiceRecord {
        let index = self.rng.int_n(CATEGORIES.len());
        self.record_in(index)
    }

    /// A record in `CATEGORIES[index % len]`.
    pub fn record_in(&mut self, index: usize) -> ServiceRecord {
        let (id, en, es) = CATEGORIES[index % CATEGORIES.len()];
        self.serial += 1;
        let serial = self.serial;

        let providers = PROVIDER_PREFIXES.map(|prefix| {
            let name = format!("{prefix} {} {serial}", self.pick(&NOUNS));
            if self.rng.bool() {
                let slug = name.to_ascii_lowercase().replace(' ', "-");
                ProviderService::with_url(name, format!("https://example.com/{slug}"))
            } else {
                ProviderService::new(name)
            }
        });

        let (verb_en, verb_es) = VERBS[self.rng.int_n(VERBS.len())];
        let (object_en, object_es) = OBJECTS[self.rng.int_n(OBJECTS.len())];
        ServiceRecord {
            category: id.to_owned(),
            category_name: LocalizedText::new(en, es),
            providers,
            description: LocalizedText::new(
                format!("{verb_en} {object_en}"),
                format!("{verb_es} {object_es}"),
            ),
        }
    }

    pub fn records(&mut self, count: usize) -> Vec<ServiceRecord> {
        (0..count).map(|_| self.record()).collect()
    }

    pub fn catalog(&mut self, count: usize) -> Catalog {
        Catalog::new(self.records(count))
    }

    /// `total` records where exactly the first `storage` are storage
    /// services and the rest are compute.
    pub fn catalog_with_storage(&mut self, total: usize, storage: usize) -> Catalog {
        Catalog::new(
            (0..total)
                .map(|index| self.record_in(if index < storage { 1 } else { 0 }))
                .collect(),
        )
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("hyperscaler.db");
    Ok((dir, db_path))
}

/// Serializes `catalog` as a dataset file under `dir`.
pub fn write_dataset(dir: &Path, catalog: &Catalog) -> Result<PathBuf> {
    let path = dir.join("services.json");
    let raw = serde_json::to_string_pretty(catalog.records()).context("encode dataset")?;
    fs::write(&path, raw).with_context(|| format!("write dataset {}", path.display()))?;
    Ok(path)
}

pub fn category_labels() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATEGORIES.iter().map(|(_, en, es)| (*en, *es))
}
