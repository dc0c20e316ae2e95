// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Pagination state core.
//!
//! `PaginationState` stores only `current_page`, `total_items` and
//! `items_per_page`. The page count is always derived, and every mutator
//! re-clamps the current page into `1..=total_pages()`. Shrinking the item
//! count clamps the page downward instead of resetting it to 1.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 100;
pub const SHORT_PAGER_LIMIT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    total_items: usize,
    items_per_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_items: 0,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PaginationState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.clamp(1, MAX_ITEMS_PER_PAGE),
            ..Self::default()
        }
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub const fn total_pages(&self) -> usize {
        total_pages_for(self.total_items, self.items_per_page)
    }

    pub const fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub const fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp_current_page();
    }

    /// Non-positive pages fall back to 1; larger pages clamp to the last one.
    pub fn set_current_page(&mut self, page: i64) {
        self.current_page = if page <= 0 {
            1
        } else {
            usize::try_from(page).unwrap_or(usize::MAX)
        };
        self.clamp_current_page();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.clamp(1, MAX_ITEMS_PER_PAGE);
        self.clamp_current_page();
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.set_current_page(page);
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn last_page(&mut self) {
        self.current_page = self.total_pages();
    }

    /// Back to `(1, 0, 20)`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::for_page(self.current_page, self.items_per_page, self.total_items)
    }

    pub fn pager_items(&self) -> Vec<PagerItem> {
        pager_items(self.current_page, self.total_pages())
    }

    pub const fn snapshot(&self) -> PaginationSnapshot {
        PaginationSnapshot {
            current_page: self.current_page,
            total_items: self.total_items,
            items_per_page: self.items_per_page,
        }
    }

    pub fn to_json(&self) -> String {
        // Three integer fields: serialization cannot fail.
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }

    /// Decodes a persisted blob. Each present field must be a finite number
    /// within its bounds; missing fields take their default. Returns `None`
    /// for anything else so the caller can discard the entry.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let object = value.as_object()?;

        let defaults = Self::default();
        let current_page = read_field(object.get("currentPage"), 1, usize::MAX)?
            .unwrap_or(defaults.current_page);
        let total_items = read_field(object.get("totalItems"), 0, usize::MAX)?
            .unwrap_or(defaults.total_items);
        let items_per_page = read_field(object.get("itemsPerPage"), 1, MAX_ITEMS_PER_PAGE)?
            .unwrap_or(defaults.items_per_page);

        let mut state = Self {
            current_page,
            total_items,
            items_per_page,
        };
        state.clamp_current_page();
        Some(state)
    }

    fn clamp_current_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }
}

/// `Some(None)` when absent, `None` when present but invalid.
fn read_field(value: Option<&Value>, min: usize, max: usize) -> Option<Option<usize>> {
    let Some(value) = value else {
        return Some(None);
    };
    let number = value.as_f64().filter(|number| number.is_finite())?;
    if number < min as f64 || number > max as f64 {
        return None;
    }
    Some(Some(number.trunc() as usize))
}

pub const fn total_pages_for(total_items: usize, items_per_page: usize) -> usize {
    let per_page = if items_per_page == 0 { 1 } else { items_per_page };
    let pages = total_items.div_ceil(per_page);
    if pages == 0 { 1 } else { pages }
}

/// Coerces a raw item count: non-finite or negative input becomes 0.
pub fn coerce_count(raw: f64) -> usize {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.trunc() as usize
}

/// Coerces a raw page request: non-finite input becomes 1. The result still
/// needs clamping against the page count.
pub fn coerce_page(raw: f64) -> i64 {
    if !raw.is_finite() {
        return 1;
    }
    let page = raw.trunc();
    if page < 1.0 { 1 } else { page as i64 }
}

/// Parses a page number from user text (links, CLI). Unparseable text
/// becomes 1.
pub fn parse_page(raw: &str) -> i64 {
    raw.trim().parse::<f64>().map(coerce_page).unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSnapshot {
    pub current_page: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

/// Half-open index range `[start, end)` of the visible slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn for_page(page: usize, items_per_page: usize, len: usize) -> Self {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(items_per_page).min(len);
        let end = page.saturating_mul(items_per_page).min(len);
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    /// 1-based inclusive bounds for "showing a-b of n".
    pub const fn display_range(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.start + 1, self.end))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    Page(usize),
    Ellipsis,
}

/// Numbered pager buttons: every page up to seven pages, otherwise first,
/// a window around the current page, and last, with ellipses between.
pub fn pager_items(current_page: usize, total_pages: usize) -> Vec<PagerItem> {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    if total <= SHORT_PAGER_LIMIT {
        return (1..=total).map(PagerItem::Page).collect();
    }

    let mut items = vec![PagerItem::Page(1)];
    if current > 4 {
        items.push(PagerItem::Ellipsis);
    }
    let window_start = current.saturating_sub(1).max(2);
    let window_end = (current + 1).min(total - 1);
    items.extend((window_start..=window_end).map(PagerItem::Page));
    if current + 3 < total {
        items.push(PagerItem::Ellipsis);
    }
    items.push(PagerItem::Page(total));
    items
}

#[cfg(test)]
mod tests {
    use super::{
        PageWindow, PagerItem, PaginationState, coerce_count, coerce_page, pager_items,
        parse_page, total_pages_for,
    };

    fn state_with(total_items: usize, page: i64) -> PaginationState {
        let mut state = PaginationState::default();
        state.set_total_items(total_items);
        state.set_current_page(page);
        state
    }

    #[test]
    fn defaults_are_one_zero_twenty() {
        let state = PaginationState::default();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.items_per_page(), 20);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn shrinking_total_clamps_page_for_every_prior_page() {
        for prior in 1..=12_i64 {
            for total in 0..=250_usize {
                let mut state = state_with(240, prior);
                state.set_total_items(total);
                let pages = total_pages_for(total, 20);
                assert_eq!(state.total_pages(), pages);
                assert!(state.current_page() >= 1);
                assert!(
                    state.current_page() <= pages,
                    "prior {prior} total {total} page {}",
                    state.current_page()
                );
            }
        }
    }

    #[test]
    fn shrinking_total_clamps_downward_instead_of_resetting() {
        let mut state = state_with(200, 8);
        state.set_total_items(130);
        assert_eq!(state.current_page(), 7);

        state.set_total_items(500);
        assert_eq!(state.current_page(), 7);
    }

    #[test]
    fn boundary_moves_are_no_ops() {
        let mut state = state_with(47, 1);
        state.previous_page();
        assert_eq!(state, state_with(47, 1));

        state.set_current_page(3);
        let before = state;
        state.next_page();
        assert_eq!(state, before);
    }

    #[test]
    fn next_and_previous_move_one_page() {
        let mut state = state_with(100, 2);
        state.next_page();
        assert_eq!(state.current_page(), 3);
        state.previous_page();
        state.previous_page();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn invalid_page_requests_fall_back_or_clamp() {
        let mut state = state_with(47, 2);
        state.set_current_page(0);
        assert_eq!(state.current_page(), 1);
        state.set_current_page(-9);
        assert_eq!(state.current_page(), 1);
        state.go_to_page(99);
        assert_eq!(state.current_page(), 3);
        state.go_to_page(i64::MAX);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn coercion_helpers_degrade_gracefully() {
        assert_eq!(coerce_count(f64::NAN), 0);
        assert_eq!(coerce_count(-4.0), 0);
        assert_eq!(coerce_count(f64::INFINITY), 0);
        assert_eq!(coerce_count(12.9), 12);

        assert_eq!(coerce_page(f64::NAN), 1);
        assert_eq!(coerce_page(-3.0), 1);
        assert_eq!(coerce_page(0.4), 1);
        assert_eq!(coerce_page(4.8), 4);

        assert_eq!(parse_page("3"), 3);
        assert_eq!(parse_page(" 2.5 "), 2);
        assert_eq!(parse_page("abc"), 1);
        assert_eq!(parse_page("-5"), 1);
        assert_eq!(parse_page("NaN"), 1);
    }

    #[test]
    fn items_per_page_is_bounded_and_reclamps() {
        let mut state = state_with(100, 5);
        state.set_items_per_page(500);
        assert_eq!(state.items_per_page(), 100);
        assert_eq!(state.current_page(), 1);

        state.set_items_per_page(0);
        assert_eq!(state.items_per_page(), 1);
        assert_eq!(PaginationState::new(0).items_per_page(), 1);
    }

    #[test]
    fn first_and_last_page_jump_to_bounds() {
        let mut state = state_with(95, 2);
        state.last_page();
        assert_eq!(state.current_page(), 5);
        assert!(state.is_last_page());
        state.first_page();
        assert!(state.is_first_page());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = PaginationState::new(50);
        state.set_total_items(400);
        state.set_current_page(4);
        state.reset();
        assert_eq!(state, PaginationState::default());
    }

    #[test]
    fn page_window_clips_last_page() {
        let first = state_with(47, 1).window();
        assert_eq!((first.start, first.end), (0, 20));

        let last = state_with(47, 3).window();
        assert_eq!((last.start, last.end), (40, 47));
        assert_eq!(last.len(), 7);
        assert_eq!(last.display_range(), Some((41, 47)));
    }

    #[test]
    fn page_window_never_reads_out_of_bounds() {
        let items: Vec<usize> = (0..5).collect();
        let window = PageWindow::for_page(9, 20, 5);
        assert!(window.is_empty());
        assert!(window.slice(&items).is_empty());

        let stale = PageWindow { start: 3, end: 40 };
        assert_eq!(stale.slice(&items), &[3, 4]);

        let empty = state_with(0, 1).window();
        assert_eq!(empty.display_range(), None);
        assert!(empty.slice(&items[..0]).is_empty());
    }

    #[test]
    fn pager_long_form_shows_ellipsis_on_both_sides() {
        use PagerItem::{Ellipsis, Page};
        assert_eq!(
            pager_items(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn pager_short_form_lists_every_page() {
        use PagerItem::Page;
        assert_eq!(
            pager_items(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(pager_items(1, 1), vec![Page(1)]);
    }

    #[test]
    fn pager_edges_keep_current_page_visible() {
        use PagerItem::{Ellipsis, Page};
        assert_eq!(
            pager_items(1, 10),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
        assert_eq!(
            pager_items(10, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
        assert_eq!(
            pager_items(4, 10),
            vec![Page(1), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            pager_items(7, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(10)]
        );

        for total in 1..=40 {
            for current in 1..=total {
                assert!(pager_items(current, total).contains(&Page(current)));
            }
        }
    }

    #[test]
    fn snapshot_json_round_trips() {
        let state = state_with(47, 3);
        let restored = PaginationState::from_json(&state.to_json());
        assert_eq!(restored, Some(state));
        assert!(state.to_json().contains("\"currentPage\":3"));
    }

    #[test]
    fn tampered_snapshot_is_rejected() {
        assert_eq!(
            PaginationState::from_json(r#"{"currentPage": -5, "itemsPerPage": 500}"#),
            None
        );
        assert_eq!(PaginationState::from_json(r#"{"currentPage": "2"}"#), None);
        assert_eq!(PaginationState::from_json(r#"{"totalItems": -1}"#), None);
        assert_eq!(PaginationState::from_json(r#"{"itemsPerPage": 0}"#), None);
        assert_eq!(PaginationState::from_json("[1, 2, 3]"), None);
        assert_eq!(PaginationState::from_json("null"), None);
        assert_eq!(PaginationState::from_json("{not json"), None);
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let restored = PaginationState::from_json(r#"{"totalItems": 90}"#);
        let mut expected = PaginationState::default();
        expected.set_total_items(90);
        assert_eq!(restored, Some(expected));

        assert_eq!(
            PaginationState::from_json("{}"),
            Some(PaginationState::default())
        );
    }

    #[test]
    fn restored_page_is_clamped_to_restored_total() {
        let restored = PaginationState::from_json(
            r#"{"currentPage": 9, "totalItems": 47, "itemsPerPage": 20}"#,
        )
        .map(|state| state.current_page());
        assert_eq!(restored, Some(3));
    }
}
