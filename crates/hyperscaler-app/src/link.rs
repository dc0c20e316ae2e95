// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::pagination::parse_page;
use crate::store::parse_bool;
use crate::{AppState, Language};
use anyhow::{Context, Result};
use url::{ParseError, Url};

pub const LINK_BASE: &str = "hyperscaler://catalog";

/// Shareable encoding of the view: language, filters, page and wrap flag.
/// Fields left `None` keep whatever the receiving view already has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLink {
    pub language: Option<Language>,
    pub query: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub wrap_text: Option<bool>,
}

impl ViewLink {
    pub fn from_state(state: &AppState) -> Self {
        let non_empty = |value: &str| (!value.trim().is_empty()).then(|| value.to_owned());
        let page = state.pagination().current_page();
        Self {
            language: Some(state.language()),
            query: non_empty(state.query()),
            category: non_empty(state.category()),
            page: (page > 1).then(|| i64::try_from(page).unwrap_or(i64::MAX)),
            wrap_text: state.wrap_text.then_some(true),
        }
    }

    /// Accepts a full URL or a bare query string such as `?lang=es&page=2`.
    /// Unknown parameters are ignored and malformed values degrade instead
    /// of failing.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => Url::parse(LINK_BASE)
                .and_then(|base| base.join(raw))
                .with_context(|| format!("parse view link {raw:?}"))?,
            Err(error) => {
                return Err(error).with_context(|| format!("parse view link {raw:?}"));
            }
        };

        let mut link = Self::default();
        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                "lang" => link.language = Some(Language::parse(&value).unwrap_or_default()),
                "q" | "query" => link.query = Some(value.into_owned()),
                "category" => link.category = Some(value.into_owned()),
                "page" => link.page = Some(parse_page(&value)),
                "wrapText" => {
                    if let Some(wrap) = parse_bool(&value) {
                        link.wrap_text = Some(wrap);
                    }
                }
                _ => {}
            }
        }
        Ok(link)
    }

    pub fn to_url(&self, base: &str) -> Result<String> {
        let mut url = Url::parse(base).with_context(|| format!("parse link base {base:?}"))?;
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(language) = self.language {
                pairs.append_pair("lang", language.as_str());
            }
            if let Some(query) = self.query.as_deref().filter(|value| !value.is_empty()) {
                pairs.append_pair("q", query);
            }
            if let Some(category) = self.category.as_deref().filter(|value| !value.is_empty()) {
                pairs.append_pair("category", category);
            }
            if let Some(page) = self.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(wrap) = self.wrap_text {
                pairs.append_pair("wrapText", if wrap { "true" } else { "false" });
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{LINK_BASE, ViewLink};
    use crate::Language;
    use anyhow::Result;

    #[test]
    fn full_link_round_trips() -> Result<()> {
        let link = ViewLink {
            language: Some(Language::Es),
            query: Some("almacén de objetos".to_owned()),
            category: Some("Almacenamiento".to_owned()),
            page: Some(3),
            wrap_text: Some(true),
        };
        let encoded = link.to_url(LINK_BASE)?;
        assert!(encoded.starts_with("hyperscaler://catalog?lang=es&q="));
        assert_eq!(ViewLink::parse(&encoded)?, link);
        Ok(())
    }

    #[test]
    fn bare_query_string_is_accepted() -> Result<()> {
        let link = ViewLink::parse("?lang=es&page=2")?;
        assert_eq!(link.language, Some(Language::Es));
        assert_eq!(link.page, Some(2));
        assert_eq!(link.query, None);
        Ok(())
    }

    #[test]
    fn malformed_values_degrade() -> Result<()> {
        let link = ViewLink::parse("hyperscaler://catalog?lang=fr&page=-7&wrapText=maybe&x=1")?;
        assert_eq!(link.language, Some(Language::En));
        assert_eq!(link.page, Some(1));
        assert_eq!(link.wrap_text, None);

        let link = ViewLink::parse("https://example.com/?page=abc")?;
        assert_eq!(link.page, Some(1));
        Ok(())
    }

    #[test]
    fn empty_link_has_no_query() -> Result<()> {
        assert_eq!(ViewLink::default().to_url(LINK_BASE)?, LINK_BASE);
        Ok(())
    }
}
