// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::filter::{FilterCriteria, category_options, filter_indices};
use crate::normalize::normalize;
use crate::{
    AppMode, Catalog, Language, LayoutMode, PageWindow, PaginationSnapshot, PaginationState,
    Preferences, ServiceRecord, ThemeMode, ViewLink,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub theme: ThemeMode,
    pub wrap_text: bool,
    pub layout: LayoutMode,
    pub status_line: Option<String>,
    catalog: Catalog,
    language: Language,
    criteria: FilterCriteria,
    pagination: PaginationState,
    matches: Vec<usize>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    EnterSearch,
    ExitToNav,
    SetQuery(String),
    PushQueryChar(char),
    PopQueryChar,
    ClearQuery,
    SetCategory(String),
    ClearFilters,
    SetLanguage(Language),
    ToggleLanguage,
    SetTheme(ThemeMode),
    CycleTheme,
    SetWrapText(bool),
    ToggleWrapText,
    SetLayout(LayoutMode),
    CycleLayout,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(i64),
    SetItemsPerPage(usize),
    ResetPagination,
    ApplyLink(ViewLink),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    QueryChanged(String),
    CategoryChanged(String),
    LanguageChanged(Language),
    ThemeChanged(ThemeMode),
    WrapTextChanged(bool),
    LayoutChanged(LayoutMode),
    ResultsChanged { total_items: usize },
    PaginationChanged(PaginationSnapshot),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let mut state = Self {
            mode: AppMode::Nav,
            theme: ThemeMode::default(),
            wrap_text: false,
            layout: LayoutMode::default(),
            status_line: None,
            catalog,
            language: Language::default(),
            criteria: FilterCriteria::default(),
            pagination: PaginationState::default(),
            matches: Vec::new(),
        };
        state.refilter();
        state
    }

    /// Adopts a restored pagination state, clamped against the current
    /// filtered count.
    pub fn with_pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = pagination;
        self.pagination.set_total_items(self.matches.len());
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        if let Some(theme) = preferences.theme {
            self.theme = theme;
        }
        if let Some(wrap_text) = preferences.wrap_text {
            self.wrap_text = wrap_text;
        }
        if let Some(layout) = preferences.layout {
            self.layout = layout;
        }
        if let Some(language) = preferences.language {
            self.language = language;
            self.refilter();
        }
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn query(&self) -> &str {
        &self.criteria.query
    }

    pub fn category(&self) -> &str {
        &self.criteria.category
    }

    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filtered_count(&self) -> usize {
        self.matches.len()
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &ServiceRecord> {
        let records = self.catalog.records();
        self.matches.iter().filter_map(|index| records.get(*index))
    }

    pub fn page_window(&self) -> PageWindow {
        self.pagination.window()
    }

    /// Records on the current page, in dataset order.
    pub fn visible_records(&self) -> Vec<&ServiceRecord> {
        let records = self.catalog.records();
        self.page_window()
            .slice(&self.matches)
            .iter()
            .filter_map(|index| records.get(*index))
            .collect()
    }

    pub fn category_options(&self) -> Vec<String> {
        category_options(self.catalog.records(), self.language)
    }

    pub fn view_link(&self) -> ViewLink {
        ViewLink::from_state(self)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        let before = self.pagination.snapshot();
        let before_count = self.matches.len();

        let mut events = match command {
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetQuery(query) => self.set_query(query),
            AppCommand::PushQueryChar(ch) => {
                let mut query = self.criteria.query.clone();
                query.push(ch);
                self.set_query(query)
            }
            AppCommand::PopQueryChar => {
                let mut query = self.criteria.query.clone();
                query.pop();
                self.set_query(query)
            }
            AppCommand::ClearQuery => self.set_query(String::new()),
            AppCommand::SetCategory(category) => self.set_category(category),
            AppCommand::ClearFilters => {
                let mut events = self.set_query(String::new());
                events.extend(self.set_category(String::new()));
                events
            }
            AppCommand::SetLanguage(language) => self.set_language(language),
            AppCommand::ToggleLanguage => self.set_language(self.language.toggled()),
            AppCommand::SetTheme(theme) => self.set_theme(theme),
            AppCommand::CycleTheme => self.set_theme(self.theme.cycled()),
            AppCommand::SetWrapText(wrap_text) => self.set_wrap_text(wrap_text),
            AppCommand::ToggleWrapText => self.set_wrap_text(!self.wrap_text),
            AppCommand::SetLayout(layout) => self.set_layout(layout),
            AppCommand::CycleLayout => self.set_layout(self.layout.cycled()),
            AppCommand::NextPage => {
                self.pagination.next_page();
                Vec::new()
            }
            AppCommand::PrevPage => {
                self.pagination.previous_page();
                Vec::new()
            }
            AppCommand::FirstPage => {
                self.pagination.first_page();
                Vec::new()
            }
            AppCommand::LastPage => {
                self.pagination.last_page();
                Vec::new()
            }
            AppCommand::GoToPage(page) => {
                self.pagination.go_to_page(page);
                Vec::new()
            }
            AppCommand::SetItemsPerPage(items_per_page) => {
                self.pagination.set_items_per_page(items_per_page);
                Vec::new()
            }
            AppCommand::ResetPagination => {
                let items_per_page = self.pagination.items_per_page();
                self.pagination.reset();
                self.pagination.set_items_per_page(items_per_page);
                self.pagination.set_total_items(self.matches.len());
                Vec::new()
            }
            AppCommand::ApplyLink(link) => self.apply_link(link),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        };

        if self.matches.len() != before_count {
            events.push(AppEvent::ResultsChanged {
                total_items: self.matches.len(),
            });
        }
        let after = self.pagination.snapshot();
        if after != before {
            events.push(AppEvent::PaginationChanged(after));
        }
        events
    }

    fn apply_link(&mut self, link: ViewLink) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if let Some(language) = link.language {
            events.extend(self.set_language(language));
        }
        if let Some(query) = link.query {
            events.extend(self.set_query(query));
        }
        if let Some(category) = link.category {
            events.extend(self.set_category(category));
        }
        if let Some(wrap_text) = link.wrap_text {
            events.extend(self.set_wrap_text(wrap_text));
        }
        // Filters settle the total before the page is clamped against it.
        if let Some(page) = link.page {
            self.pagination.go_to_page(page);
        }
        events
    }

    fn set_query(&mut self, query: String) -> Vec<AppEvent> {
        if query == self.criteria.query {
            return Vec::new();
        }
        self.criteria.query = query;
        self.refilter();
        vec![AppEvent::QueryChanged(self.criteria.query.clone())]
    }

    fn set_category(&mut self, category: String) -> Vec<AppEvent> {
        let category = self.canonical_category(category.trim());
        if category == self.criteria.category {
            return Vec::new();
        }
        self.criteria.category = category;
        self.refilter();
        vec![AppEvent::CategoryChanged(self.criteria.category.clone())]
    }

    fn set_language(&mut self, language: Language) -> Vec<AppEvent> {
        if language == self.language {
            return Vec::new();
        }
        let previous = self.language;
        self.language = language;
        let mut events = vec![AppEvent::LanguageChanged(language)];

        if !self.criteria.category.is_empty() {
            let translated = self.translate_category(previous).unwrap_or_default();
            if translated != self.criteria.category {
                self.criteria.category = translated;
                events.push(AppEvent::CategoryChanged(self.criteria.category.clone()));
            }
        }
        self.refilter();
        events
    }

    fn set_theme(&mut self, theme: ThemeMode) -> Vec<AppEvent> {
        if theme == self.theme {
            return Vec::new();
        }
        self.theme = theme;
        vec![AppEvent::ThemeChanged(theme)]
    }

    fn set_wrap_text(&mut self, wrap_text: bool) -> Vec<AppEvent> {
        if wrap_text == self.wrap_text {
            return Vec::new();
        }
        self.wrap_text = wrap_text;
        vec![AppEvent::WrapTextChanged(wrap_text)]
    }

    fn set_layout(&mut self, layout: LayoutMode) -> Vec<AppEvent> {
        if layout == self.layout {
            return Vec::new();
        }
        self.layout = layout;
        vec![AppEvent::LayoutChanged(layout)]
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }

    /// Maps a typed category onto the dataset's spelling in the active
    /// language. Unknown labels are kept verbatim and simply match nothing.
    fn canonical_category(&self, category: &str) -> String {
        if category.is_empty() {
            return String::new();
        }
        let wanted = normalize(category);
        self.catalog
            .records()
            .iter()
            .map(|record| record.category_label(self.language))
            .find(|label| normalize(label) == wanted)
            .unwrap_or(category)
            .to_owned()
    }

    /// The selected category's label in the active language, looked up via
    /// its label in `previous`.
    fn translate_category(&self, previous: Language) -> Option<String> {
        let wanted = normalize(&self.criteria.category);
        self.catalog
            .records()
            .iter()
            .find(|record| normalize(record.category_label(previous)) == wanted)
            .map(|record| record.category_label(self.language).to_owned())
    }

    fn refilter(&mut self) {
        self.matches = filter_indices(
            self.catalog.records(),
            &self.criteria.query,
            &self.criteria.category,
            self.language,
        );
        self.pagination.set_total_items(self.matches.len());
    }
}
