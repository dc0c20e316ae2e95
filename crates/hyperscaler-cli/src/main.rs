// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use env_logger::{Builder, Env, Target};
use hyperscaler_app::i18n::{showing_range, translations};
use hyperscaler_app::{
    AppCommand, AppState, Catalog, KeyValueStore, LINK_BASE, Language, MemoryStore,
    Preferences, Provider, ViewLink, load_preferences, persist_pagination, restore_pagination,
};
use hyperscaler_db::{Store, validate_catalog};
use hyperscaler_tui::UiOptions;
use log::{info, warn};
use runtime::StoreRuntime;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `hyperscaler --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    init_logging(&config);

    let db_path = if options.ephemeral {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    let dataset_path = options
        .dataset_path
        .clone()
        .or_else(|| config.dataset_path());
    let catalog = hyperscaler_db::load_catalog(dataset_path.as_deref())?;

    if options.check_only {
        return check(&catalog, &db_path, options.ephemeral);
    }

    let store = open_store(&db_path, options.ephemeral);
    let mut state = start_state(catalog, &config, store.as_ref(), &options)?;

    if options.list {
        print!("{}", list_text(&state));
        return Ok(());
    }

    if options.print_link {
        println!("{}", state.view_link().to_url(LINK_BASE)?);
        return Ok(());
    }

    let mut runtime = StoreRuntime::new(store.as_ref());
    hyperscaler_tui::run_app(
        &mut state,
        &mut runtime,
        UiOptions {
            card_min_width: config.card_min_width(),
            system_prefers_dark: hyperscaler_tui::system_prefers_dark(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    dataset_path: Option<PathBuf>,
    link: Option<String>,
    query: Option<String>,
    category: Option<String>,
    language: Option<Language>,
    page: Option<i64>,
    ephemeral: bool,
    list: bool,
    print_link: bool,
    print_config_path: bool,
    print_db_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

impl CliOptions {
    fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            dataset_path: None,
            link: None,
            query: None,
            category: None,
            language: None,
            page: None,
            ephemeral: false,
            list: false,
            print_link: false,
            print_config_path: false,
            print_db_path: false,
            print_example: false,
            check_only: false,
            show_help: false,
        }
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions::new(default_config_path);

    let mut iter = args.into_iter().map(|arg| arg.as_ref().to_owned());
    while let Some(arg) = iter.next() {
        let mut value_for =
            |flag: &str, what: &str| iter.next().ok_or_else(|| anyhow!("{flag} requires {what}"));
        match arg.as_str() {
            "--config" => {
                options.config_path = PathBuf::from(value_for("--config", "a file path")?);
            }
            "--dataset" => {
                options.dataset_path = Some(PathBuf::from(value_for("--dataset", "a file path")?));
            }
            "--link" => {
                options.link = Some(value_for("--link", "a view link")?);
            }
            "--query" => {
                options.query = Some(value_for("--query", "a search term")?);
            }
            "--category" => {
                options.category = Some(value_for("--category", "a category label")?);
            }
            "--lang" => {
                let value = value_for("--lang", "a language (en or es)")?;
                let language = Language::parse(&value)
                    .ok_or_else(|| anyhow!("--lang must be \"en\" or \"es\", got {value:?}"))?;
                options.language = Some(language);
            }
            "--page" => {
                let value = value_for("--page", "a page number")?;
                let page = value
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("--page must be a whole number, got {value:?}"))?;
                options.page = Some(page);
            }
            "--ephemeral" => {
                options.ephemeral = true;
            }
            "--list" => {
                options.list = true;
            }
            "--print-link" => {
                options.print_link = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("hyperscaler");
    println!();
    println!("Compare equivalent services across AWS, Azure, Google Cloud, Oracle Cloud, and Cloudflare.");
    println!();
    println!("Usage:");
    println!("  hyperscaler [options]");
    println!();
    println!("Options:");
    println!("  --config <path>         Use a specific config file");
    println!("  --dataset <path>        Load services from a JSON file instead of the bundled catalog");
    println!("  --link <url>            Open the view described by a shared link");
    println!("  --query <text>          Start with a search term");
    println!("  --category <label>      Start filtered to one category");
    println!("  --lang <en|es>          Start in the given language");
    println!("  --page <n>              Start on page n (clamped to the valid range)");
    println!("  --ephemeral             Keep preferences in memory only");
    println!("  --list                  Print the current page as plain text and exit");
    println!("  --print-link            Print the link for the starting view and exit");
    println!("  --print-config-path     Print resolved config path and exit");
    println!("  --print-path            Print resolved database path and exit");
    println!("  --print-example-config  Print an example config file and exit");
    println!("  --check                 Validate config, dataset, and database, then exit");
    println!("  -h, --help              Show this help");
}

/// Logs go to a file since the terminal belongs to the UI. A log file that
/// cannot be opened leaves logging disabled.
fn init_logging(config: &Config) {
    let Ok(path) = config.log_path() else {
        return;
    };
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| OpenOptions::new().create(true).append(true).open(&path));
    let Ok(file) = file else {
        return;
    };

    Builder::from_env(Env::default().default_filter_or(config.log_level()))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .init();
}

/// Opens the preference database, degrading to a process-local store when
/// it cannot be opened or bootstrapped.
fn open_store(db_path: &Path, ephemeral: bool) -> Box<dyn KeyValueStore> {
    if ephemeral {
        info!("using in-memory preference store");
        return Box::new(MemoryStore::new());
    }

    match open_durable_store(db_path) {
        Ok(store) => Box::new(store),
        Err(error) => {
            warn!(
                "preferences will not persist; open database {} failed: {error:#}",
                db_path.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}

fn open_durable_store(db_path: &Path) -> Result<Store> {
    let store = Store::open(db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or HYPERSCALER_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    Ok(store)
}

fn check(catalog: &Catalog, db_path: &Path, ephemeral: bool) -> Result<()> {
    let store = if ephemeral {
        None
    } else {
        Some(open_durable_store(db_path)?)
    };
    print!("{}", check_report(catalog, db_path, store.as_ref())?);
    Ok(())
}

fn check_report(catalog: &Catalog, db_path: &Path, store: Option<&Store>) -> Result<String> {
    let issues = validate_catalog(catalog);
    let mut out = format!(
        "ok: {} services, {} data issues, database {}\n",
        catalog.len(),
        issues.len(),
        db_path.display()
    );
    for issue in issues {
        out.push_str(&format!("  {issue}\n"));
    }

    if let Some(store) = store {
        let settings = store.list_settings()?;
        out.push_str(&format!("stored settings: {}\n", settings.len()));
        for setting in settings {
            out.push_str(&format!(
                "  {} = {} (updated {})\n",
                setting.key, setting.value, setting.updated_at
            ));
        }
    }
    Ok(out)
}

/// Builds the starting view and writes the pagination it settled on, since
/// restoring and overrides may have clamped the stored page.
fn start_state(
    catalog: Catalog,
    config: &Config,
    store: &dyn KeyValueStore,
    options: &CliOptions,
) -> Result<AppState> {
    let mut state = build_state(catalog, config, store);
    apply_overrides(&mut state, options)?;
    persist_pagination(store, state.pagination());
    Ok(state)
}

/// Config supplies display defaults and the page size, stored preferences
/// override the display defaults, and the stored page is restored last so
/// it clamps against the filtered set.
fn build_state(catalog: Catalog, config: &Config, store: &dyn KeyValueStore) -> AppState {
    let defaults = config.ui_defaults();
    let stored = load_preferences(store);
    let preferences = Preferences {
        language: stored.language.or(defaults.language),
        theme: stored.theme.or(defaults.theme),
        wrap_text: stored.wrap_text.or(defaults.wrap_text),
        layout: stored.layout.or(defaults.layout),
    };

    let mut pagination = restore_pagination(store);
    pagination.set_items_per_page(config.page_size());

    AppState::new(catalog)
        .with_preferences(preferences)
        .with_pagination(pagination)
}

fn apply_overrides(state: &mut AppState, options: &CliOptions) -> Result<()> {
    if let Some(raw) = &options.link {
        let link = ViewLink::parse(raw)?;
        state.dispatch(AppCommand::ApplyLink(link));
    }
    if let Some(language) = options.language {
        state.dispatch(AppCommand::SetLanguage(language));
    }
    if let Some(query) = &options.query {
        state.dispatch(AppCommand::SetQuery(query.clone()));
    }
    if let Some(category) = &options.category {
        state.dispatch(AppCommand::SetCategory(category.clone()));
    }
    if let Some(page) = options.page {
        state.dispatch(AppCommand::GoToPage(page));
    }
    Ok(())
}

/// Tab-separated rendering of the visible page, headed by the range line.
fn list_text(state: &AppState) -> String {
    let language = state.language();
    let t = translations(language);
    let pagination = state.pagination();

    let mut out = format!(
        "{} ({}/{})\n",
        showing_range(
            language,
            state.page_window().display_range(),
            state.filtered_count()
        ),
        pagination.current_page(),
        pagination.total_pages()
    );
    if state.filtered_count() == 0 {
        return out;
    }

    let mut header = vec![t.category_column];
    header.extend(Provider::ALL.map(Provider::label));
    header.push(t.description_column);
    out.push_str(&header.join("\t"));
    out.push('\n');

    for record in state.visible_records() {
        let mut cells = vec![record.category_label(language)];
        cells.extend(
            Provider::ALL
                .iter()
                .map(|provider| record.provider(*provider).name.as_str()),
        );
        cells.push(record.description_text(language));
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        CliOptions, apply_overrides, build_state, check_report, list_text, open_store,
        parse_cli_args, start_state,
    };
    use crate::config::Config;
    use anyhow::Result;
    use hyperscaler_app::{
        KeyValueStore, Language, MemoryStore, PaginationState, SettingKey, ThemeMode,
        persist_pagination, restore_pagination, save_preference,
    };
    use hyperscaler_db::Store;
    use hyperscaler_testkit::CatalogFaker;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/hyperscaler-test-config.toml")
    }

    fn options(args: &[&str]) -> Result<CliOptions> {
        parse_cli_args(args.iter().copied(), default_options_path())
    }

    #[test]
    fn parse_cli_args_defaults() -> Result<()> {
        assert_eq!(options(&[])?, CliOptions::new(default_options_path()));
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_view_flags() -> Result<()> {
        let parsed = options(&[
            "--config",
            "/custom/config.toml",
            "--dataset",
            "/data/services.json",
            "--query",
            "object storage",
            "--category",
            "Storage",
            "--lang",
            "ES",
            "--page",
            "3",
            "--link",
            "?lang=en",
        ])?;
        assert_eq!(parsed.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(
            parsed.dataset_path,
            Some(PathBuf::from("/data/services.json"))
        );
        assert_eq!(parsed.query.as_deref(), Some("object storage"));
        assert_eq!(parsed.category.as_deref(), Some("Storage"));
        assert_eq!(parsed.language, Some(Language::Es));
        assert_eq!(parsed.page, Some(3));
        assert_eq!(parsed.link.as_deref(), Some("?lang=en"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_print_and_mode_flags() -> Result<()> {
        let parsed = options(&[
            "--ephemeral",
            "--list",
            "--print-link",
            "--print-path",
            "--print-example-config",
            "--check",
        ])?;
        assert!(parsed.ephemeral);
        assert!(parsed.list);
        assert!(parsed.print_link);
        assert!(parsed.print_db_path);
        assert!(parsed.print_example);
        assert!(parsed.check_only);
        assert!(!parsed.print_config_path);
        assert!(!parsed.show_help);

        assert!(options(&["-h"])?.show_help);
        assert!(options(&["--help"])?.show_help);
        assert!(options(&["--print-config-path"])?.print_config_path);
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_or_bad_values() {
        let error = options(&["--config"]).expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = options(&["--lang", "fr"]).expect_err("unknown language should fail");
        assert!(error.to_string().contains("--lang"));

        let error = options(&["--page", "two"]).expect_err("non-numeric page should fail");
        assert!(error.to_string().contains("--page must be a whole number"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = options(&["--wat"]).expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn stored_preferences_override_config_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "version = 1\n[ui]\nlanguage = \"es\"\ntheme = \"dark\"\npage_size = 5\nwrap_text = true\n",
        )?;
        let config = Config::load(&path)?;

        let store = MemoryStore::new();
        save_preference(&store, SettingKey::Theme, ThemeMode::Light.as_str());

        let state = build_state(CatalogFaker::new(4).catalog(12), &config, &store);
        assert_eq!(state.language(), Language::Es);
        assert_eq!(state.theme, ThemeMode::Light);
        assert!(state.wrap_text);
        assert_eq!(state.pagination().items_per_page(), 5);
        assert_eq!(state.pagination().total_pages(), 3);
        Ok(())
    }

    #[test]
    fn restored_page_clamps_against_catalog() {
        let store = MemoryStore::new();
        let mut saved = PaginationState::new(10);
        saved.set_total_items(90);
        saved.set_current_page(9);
        assert!(persist_pagination(&store, &saved));

        let state = build_state(CatalogFaker::new(5).catalog(25), &Config::default(), &store);
        assert_eq!(state.pagination().items_per_page(), 20);
        assert_eq!(state.pagination().total_items(), 25);
        assert_eq!(state.pagination().current_page(), 2);
    }

    #[test]
    fn config_page_size_applies_over_stored_snapshot() -> Result<()> {
        let store = MemoryStore::new();
        let mut saved = PaginationState::default();
        saved.set_total_items(47);
        saved.set_current_page(2);
        assert!(persist_pagination(&store, &saved));

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "version = 1\n[ui]\npage_size = 5\n")?;
        let config = Config::load(&path)?;

        let state = build_state(CatalogFaker::new(5).catalog(47), &config, &store);
        assert_eq!(state.pagination().items_per_page(), 5);
        assert_eq!(state.pagination().total_pages(), 10);
        assert_eq!(state.pagination().current_page(), 2);
        Ok(())
    }

    #[test]
    fn startup_persists_the_settled_page() -> Result<()> {
        let store = MemoryStore::new();
        let mut saved = PaginationState::default();
        saved.set_total_items(90);
        saved.set_current_page(5);
        assert!(persist_pagination(&store, &saved));

        let mut cli = CliOptions::new(default_options_path());
        cli.query = Some("storage".to_owned());
        let state = start_state(
            CatalogFaker::new(7).catalog_with_storage(45, 25),
            &Config::default(),
            &store,
            &cli,
        )?;
        assert_eq!(state.pagination().current_page(), 2);

        let stored = restore_pagination(&store);
        assert_eq!(stored.current_page(), 2);
        assert_eq!(stored.total_items(), state.filtered_count());
        Ok(())
    }

    #[test]
    fn check_report_lists_issues_and_stored_settings() -> Result<()> {
        let catalog = CatalogFaker::new(2).catalog(3);
        let db_path = PathBuf::from("/data/hyperscaler.db");

        let bare = check_report(&catalog, &db_path, None)?;
        assert_eq!(
            bare,
            "ok: 3 services, 0 data issues, database /data/hyperscaler.db\n"
        );

        let store = Store::open_memory()?;
        store.bootstrap()?;
        store.put(SettingKey::Theme.as_str(), "dark")?;
        let report = check_report(&catalog, &db_path, Some(&store))?;
        assert!(report.contains("stored settings: 1\n"));
        assert!(report.contains("  theme = dark (updated "));
        Ok(())
    }

    #[test]
    fn flags_override_link_and_page_applies_last() -> Result<()> {
        let store = MemoryStore::new();
        let mut state = build_state(
            CatalogFaker::new(6).catalog_with_storage(45, 25),
            &Config::default(),
            &store,
        );
        let mut cli = CliOptions::new(default_options_path());
        cli.link = Some("?lang=es&q=zzz&page=3".to_owned());
        cli.query = Some(String::new());
        cli.category = Some("almacenamiento".to_owned());
        cli.page = Some(99);
        apply_overrides(&mut state, &cli)?;

        assert_eq!(state.language(), Language::Es);
        assert_eq!(state.query(), "");
        assert_eq!(state.category(), "Almacenamiento");
        assert_eq!(state.filtered_count(), 25);
        assert_eq!(state.pagination().current_page(), 2);
        Ok(())
    }

    #[test]
    fn list_text_prints_visible_page() -> Result<()> {
        let store = MemoryStore::new();
        let mut state = build_state(
            CatalogFaker::new(8).catalog_with_storage(25, 5),
            &Config::default(),
            &store,
        );
        let mut cli = CliOptions::new(default_options_path());
        cli.page = Some(2);
        apply_overrides(&mut state, &cli)?;

        let text = list_text(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Showing 21-25 of 25 services (2/2)");
        assert_eq!(
            lines[1],
            "Category\tAWS\tAzure\tGCP\tOracle\tCloudflare\tDescription"
        );
        assert_eq!(lines.len(), 7);
        assert!(lines[2].starts_with("Compute\t"));

        cli.page = None;
        cli.query = Some("no such service anywhere".to_owned());
        apply_overrides(&mut state, &cli)?;
        assert_eq!(list_text(&state), "No services found (1/1)\n");
        Ok(())
    }

    #[test]
    fn unopenable_database_falls_back_to_memory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = open_store(dir.path(), false);
        store.put("theme", "dark")?;
        assert_eq!(store.get("theme")?.as_deref(), Some("dark"));

        let ephemeral = open_store(&dir.path().join("unused.db"), true);
        assert_eq!(ephemeral.get("theme")?, None);
        assert!(!dir.path().join("unused.db").exists());
        Ok(())
    }
}
