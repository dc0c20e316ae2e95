// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Language, LayoutMode, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search_placeholder: &'static str,
    pub category_column: &'static str,
    pub description_column: &'static str,
    pub all_categories: &'static str,
    pub categories_label: &'static str,
    pub clear_filters: &'static str,
    pub no_results: &'static str,
    pub showing: &'static str,
    pub of: &'static str,
    pub services: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub theme: &'static str,
    pub language: &'static str,
    pub wrap_text: &'static str,
    pub layout: &'static str,
    pub links: &'static str,
    pub share_link: &'static str,
    pub enabled: &'static str,
    pub disabled: &'static str,
}

const EN: Translations = Translations {
    title: "Hyperscaler Services",
    subtitle: "Compare equivalent services between AWS, Azure, Google Cloud, Oracle Cloud, and Cloudflare",
    search_placeholder: "Search services...",
    category_column: "Category",
    description_column: "Description",
    all_categories: "All categories",
    categories_label: "Categories",
    clear_filters: "Clear filters",
    no_results: "No services found",
    showing: "Showing",
    of: "of",
    services: "services",
    previous: "Previous",
    next: "Next",
    theme: "Theme",
    language: "Language",
    wrap_text: "Wrap table text",
    layout: "Layout",
    links: "Links",
    share_link: "Link",
    enabled: "On",
    disabled: "Off",
};

const ES: Translations = Translations {
    title: "Servicios de Hyperscalers",
    subtitle: "Compara servicios equivalentes entre AWS, Azure, Google Cloud, Oracle Cloud y Cloudflare",
    search_placeholder: "Buscar servicios...",
    category_column: "Categoría",
    description_column: "Descripción",
    all_categories: "Todas las categorías",
    categories_label: "Categorías",
    clear_filters: "Limpiar filtros",
    no_results: "No se encontraron servicios",
    showing: "Mostrando",
    of: "de",
    services: "servicios",
    previous: "Anterior",
    next: "Siguiente",
    theme: "Tema",
    language: "Idioma",
    wrap_text: "Ajustar texto en tabla",
    layout: "Vista",
    links: "Enlaces",
    share_link: "Enlace",
    enabled: "Activado",
    disabled: "Desactivado",
};

pub const fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Es => &ES,
    }
}

pub const fn language_label(language: Language) -> &'static str {
    match language {
        Language::En => "English",
        Language::Es => "Español",
    }
}

pub const fn theme_label(theme: ThemeMode, language: Language) -> &'static str {
    match (language, theme) {
        (Language::En, ThemeMode::Light) => "Light",
        (Language::En, ThemeMode::Dark) => "Dark",
        (Language::En, ThemeMode::System) => "System",
        (Language::Es, ThemeMode::Light) => "Claro",
        (Language::Es, ThemeMode::Dark) => "Oscuro",
        (Language::Es, ThemeMode::System) => "Sistema",
    }
}

pub const fn layout_label(layout: LayoutMode, language: Language) -> &'static str {
    match (language, layout) {
        (Language::En, LayoutMode::Auto) => "Auto",
        (Language::En, LayoutMode::Table) => "Table",
        (Language::En, LayoutMode::Cards) => "Cards",
        (Language::Es, LayoutMode::Auto) => "Automática",
        (Language::Es, LayoutMode::Table) => "Tabla",
        (Language::Es, LayoutMode::Cards) => "Tarjetas",
    }
}

/// "Showing 21-40 of 47 services", or the localized empty message.
pub fn showing_range(language: Language, range: Option<(usize, usize)>, total: usize) -> String {
    let t = translations(language);
    match range {
        Some((start, end)) => format!(
            "{} {start}-{end} {} {total} {}",
            t.showing, t.of, t.services
        ),
        None => t.no_results.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{showing_range, theme_label, translations};
    use crate::{Language, ThemeMode};

    #[test]
    fn showing_range_is_localized() {
        assert_eq!(
            showing_range(Language::En, Some((41, 47)), 47),
            "Showing 41-47 of 47 services"
        );
        assert_eq!(
            showing_range(Language::Es, Some((1, 20)), 47),
            "Mostrando 1-20 de 47 servicios"
        );
        assert_eq!(
            showing_range(Language::Es, None, 0),
            "No se encontraron servicios"
        );
    }

    #[test]
    fn tables_cover_both_languages() {
        assert_eq!(translations(Language::En).previous, "Previous");
        assert_eq!(translations(Language::Es).next, "Siguiente");
        assert_eq!(theme_label(ThemeMode::System, Language::Es), "Sistema");
    }
}
