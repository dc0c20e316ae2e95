// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use hyperscaler_app::i18n::{
    language_label, layout_label, showing_range, theme_label, translations,
};
use hyperscaler_app::store::format_bool;
use hyperscaler_app::{
    AppCommand, AppEvent, AppMode, AppState, LINK_BASE, PaginationState, PagerItem, Provider,
    ServiceRecord, SettingKey,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use std::env;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const DEFAULT_CARD_MIN_WIDTH: u16 = 120;
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const CARD_HEIGHT: u16 = 9;
const ELLIPSIS: &str = "…";
const COLUMN_PERCENTAGES: [u16; 7] = [12, 11, 11, 11, 11, 11, 33];

/// Persistence hooks the UI calls after state changes.
pub trait AppRuntime {
    fn save_pagination(&mut self, pagination: &PaginationState) -> Result<()>;
    fn save_preference(&mut self, key: SettingKey, value: &str) -> Result<()>;
    fn link_base(&self) -> &str {
        LINK_BASE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub card_min_width: u16,
    pub system_prefers_dark: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            card_min_width: DEFAULT_CARD_MIN_WIDTH,
            system_prefers_dark: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CategoryPickerState {
    options: Vec<String>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    options: UiOptions,
    selected_row: usize,
    help_visible: bool,
    detail_visible: bool,
    link_text: Option<String>,
    category_picker: Option<CategoryPickerState>,
    status_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NavAction {
    Dispatch(AppCommand),
    MoveRow(isize),
    OpenCategoryPicker,
    OpenDetail,
    ShowLink,
    ToggleHelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
    highlight_fg: Color,
    highlight_bg: Color,
    status: Color,
}

const DARK_PALETTE: Palette = Palette {
    background: Color::Black,
    text: Color::White,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    highlight_fg: Color::Black,
    highlight_bg: Color::Cyan,
    status: Color::Yellow,
};

const LIGHT_PALETTE: Palette = Palette {
    background: Color::White,
    text: Color::Black,
    muted: Color::Gray,
    accent: Color::Blue,
    highlight_fg: Color::White,
    highlight_bg: Color::Blue,
    status: Color::Magenta,
};

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        options,
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();
    info!(
        "ui started with {} of {} services visible",
        state.filtered_count(),
        state.catalog().len()
    );

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Reads `COLORFGBG` ("fg;bg") to guess whether the terminal is dark.
pub fn system_prefers_dark() -> bool {
    colorfgbg_is_dark(env::var("COLORFGBG").ok().as_deref())
}

fn colorfgbg_is_dark(raw: Option<&str>) -> bool {
    let Some(background) = raw
        .and_then(|raw| raw.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
    else {
        return true;
    };
    !(background == 7 || background >= 9)
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.link_text.is_some() {
        view_data.link_text = None;
        return false;
    }

    if view_data.detail_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            view_data.detail_visible = false;
        }
        return false;
    }

    if view_data.category_picker.is_some() {
        handle_category_picker_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    let Some(action) = nav_action_for_key(key) else {
        return false;
    };
    match action {
        NavAction::Dispatch(command) => {
            dispatch_and_persist(state, runtime, view_data, internal_tx, command);
        }
        NavAction::MoveRow(delta) => move_selected_row(state, view_data, delta),
        NavAction::OpenCategoryPicker => open_category_picker(state, view_data),
        NavAction::OpenDetail => {
            if selected_record(state, view_data).is_some() {
                view_data.detail_visible = true;
            }
        }
        NavAction::ShowLink => match state.view_link().to_url(runtime.link_base()) {
            Ok(link) => {
                info!("view link {link}");
                view_data.link_text = Some(link);
            }
            Err(error) => {
                warn!("build view link failed: {error:#}");
                emit_status(state, view_data, internal_tx, format!("link failed: {error}"));
            }
        },
        NavAction::ToggleHelp => view_data.help_visible = true,
    }
    false
}

fn nav_action_for_key(key: KeyEvent) -> Option<NavAction> {
    let dispatch = |command| Some(NavAction::Dispatch(command));
    match (key.code, key.modifiers) {
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            dispatch(AppCommand::PrevPage)
        }
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            dispatch(AppCommand::NextPage)
        }
        (KeyCode::Home, _) => dispatch(AppCommand::FirstPage),
        (KeyCode::End, _) => dispatch(AppCommand::LastPage),
        (KeyCode::Char(digit @ '1'..='9'), _) => {
            dispatch(AppCommand::GoToPage(i64::from(digit as u8 - b'0')))
        }
        (KeyCode::Char('/'), _) => dispatch(AppCommand::EnterSearch),
        (KeyCode::Char('x'), KeyModifiers::NONE) => dispatch(AppCommand::ClearFilters),
        (KeyCode::Char('L'), _) => dispatch(AppCommand::ToggleLanguage),
        (KeyCode::Char('t'), KeyModifiers::NONE) => dispatch(AppCommand::CycleTheme),
        (KeyCode::Char('w'), KeyModifiers::NONE) => dispatch(AppCommand::ToggleWrapText),
        (KeyCode::Char('v'), KeyModifiers::NONE) => dispatch(AppCommand::CycleLayout),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(NavAction::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(NavAction::MoveRow(-1)),
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(NavAction::OpenCategoryPicker),
        (KeyCode::Enter, _) => Some(NavAction::OpenDetail),
        (KeyCode::Char('y'), KeyModifiers::NONE) => Some(NavAction::ShowLink),
        (KeyCode::Char('?'), _) => Some(NavAction::ToggleHelp),
        _ => None,
    }
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => AppCommand::ExitToNav,
        (KeyCode::Backspace, _) => AppCommand::PopQueryChar,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearQuery
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::PushQueryChar(ch)
        }
        _ => return,
    };
    dispatch_and_persist(state, runtime, view_data, internal_tx, command);
}

fn handle_category_picker_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(picker) = view_data.category_picker.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => view_data.category_picker = None,
        KeyCode::Char('j') | KeyCode::Down => {
            picker.cursor = (picker.cursor + 1).min(picker.options.len().saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => picker.cursor = picker.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => picker.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => picker.cursor = picker.options.len().saturating_sub(1),
        KeyCode::Enter => {
            // Row 0 is the "all categories" entry.
            let category = if picker.cursor == 0 {
                String::new()
            } else {
                picker.options.get(picker.cursor).cloned().unwrap_or_default()
            };
            view_data.category_picker = None;
            dispatch_and_persist(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::SetCategory(category),
            );
        }
        _ => {}
    }
}

fn open_category_picker(state: &AppState, view_data: &mut ViewData) {
    let t = translations(state.language());
    let mut options = vec![t.all_categories.to_owned()];
    options.extend(state.category_options());
    let cursor = options
        .iter()
        .skip(1)
        .position(|option| option == state.category())
        .map_or(0, |index| index + 1);
    view_data.category_picker = Some(CategoryPickerState { options, cursor });
}

fn dispatch_and_persist<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    debug!("dispatch {command:?}");
    let events = state.dispatch(command);

    if events.iter().any(|event| {
        matches!(
            event,
            AppEvent::PaginationChanged(_) | AppEvent::ResultsChanged { .. }
        )
    }) {
        view_data.selected_row = 0;
    }
    clamp_selected_row(state, view_data);

    let failure = persist_events(state, runtime, &events);
    if let Some(error) = failure {
        emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
    } else if let Some(message) = status_for_events(state, &events) {
        emit_status(state, view_data, internal_tx, message);
    }
    events
}

/// Writes changed preferences and pagination through the runtime. Returns
/// the last failure; the in-memory state stays authoritative either way.
fn persist_events<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    events: &[AppEvent],
) -> Option<String> {
    let mut failure = None;
    for event in events {
        let result = match event {
            AppEvent::PaginationChanged(_) => runtime.save_pagination(state.pagination()),
            AppEvent::LanguageChanged(language) => {
                runtime.save_preference(SettingKey::Language, language.as_str())
            }
            AppEvent::ThemeChanged(theme) => {
                runtime.save_preference(SettingKey::Theme, theme.as_str())
            }
            AppEvent::WrapTextChanged(wrap_text) => {
                runtime.save_preference(SettingKey::WrapText, format_bool(*wrap_text))
            }
            AppEvent::LayoutChanged(layout) => {
                runtime.save_preference(SettingKey::Layout, layout.as_str())
            }
            _ => Ok(()),
        };
        if let Err(error) = result {
            warn!("persist {event:?} failed: {error:#}");
            failure = Some(error.to_string());
        }
    }
    failure
}

fn status_for_events(state: &AppState, events: &[AppEvent]) -> Option<String> {
    let language = state.language();
    let t = translations(language);
    events.iter().rev().find_map(|event| match event {
        AppEvent::LanguageChanged(language) => {
            Some(format!("{}: {}", t.language, language_label(*language)))
        }
        AppEvent::ThemeChanged(theme) => {
            Some(format!("{}: {}", t.theme, theme_label(*theme, language)))
        }
        AppEvent::WrapTextChanged(wrap_text) => Some(format!(
            "{}: {}",
            t.wrap_text,
            if *wrap_text { t.enabled } else { t.disabled }
        )),
        AppEvent::LayoutChanged(layout) => {
            Some(format!("{}: {}", t.layout, layout_label(*layout, language)))
        }
        AppEvent::CategoryChanged(category) if category.is_empty() => {
            Some(format!("{}: {}", t.categories_label, t.all_categories))
        }
        AppEvent::CategoryChanged(category) => {
            Some(format!("{}: {category}", t.categories_label))
        }
        _ => None,
    })
}

fn move_selected_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let len = state.visible_records().len();
    if len == 0 {
        view_data.selected_row = 0;
        return;
    }
    view_data.selected_row = view_data
        .selected_row
        .saturating_add_signed(delta)
        .min(len - 1);
}

fn clamp_selected_row(state: &AppState, view_data: &mut ViewData) {
    let len = state.visible_records().len();
    view_data.selected_row = view_data.selected_row.min(len.saturating_sub(1));
}

fn selected_record<'a>(state: &'a AppState, view_data: &ViewData) -> Option<&'a ServiceRecord> {
    state.visible_records().get(view_data.selected_row).copied()
}

fn palette(state: &AppState, view_data: &ViewData) -> Palette {
    if state.theme.is_dark(view_data.options.system_prefers_dark) {
        DARK_PALETTE
    } else {
        LIGHT_PALETTE
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let colors = palette(state, view_data);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );

    let pager = pager_line(state, colors);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(if pager.is_some() { 1 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_text(state, colors)), layout[0]);
    frame.render_widget(
        Paragraph::new(filter_line(state, colors)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if state.mode == AppMode::Search {
                    colors.accent
                } else {
                    colors.muted
                })),
        ),
        layout[1],
    );

    let body = layout[2];
    if state.filtered_count() == 0 {
        let empty = Paragraph::new(translations(state.language()).no_results)
            .style(Style::default().fg(colors.muted))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, body);
    } else if state
        .layout
        .uses_cards(area.width, view_data.options.card_min_width)
    {
        render_cards(frame, body, state, view_data, colors);
    } else {
        render_table(frame, body, state, view_data, colors);
    }

    if let Some(pager) = pager {
        frame.render_widget(Paragraph::new(pager), layout[3]);
    }
    frame.render_widget(
        Paragraph::new(status_text(state)).style(Style::default().fg(colors.status)),
        layout[4],
    );

    if let Some(picker) = &view_data.category_picker {
        let area = centered_rect(50, 60, area);
        frame.render_widget(Clear, area);
        let lines: Vec<Line<'_>> = picker
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let style = if index == picker.cursor {
                    Style::default()
                        .fg(colors.highlight_fg)
                        .bg(colors.highlight_bg)
                } else {
                    Style::default().fg(colors.text)
                };
                Line::styled(option.clone(), style)
            })
            .collect();
        let scroll = picker
            .cursor
            .saturating_sub(usize::from(area.height.saturating_sub(3)));
        let widget = Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .style(Style::default().bg(colors.background))
            .block(
                Block::default()
                    .title(translations(state.language()).categories_label)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.accent)),
            );
        frame.render_widget(widget, area);
    }

    if view_data.detail_visible
        && let Some(record) = selected_record(state, view_data)
    {
        let area = centered_rect(70, 60, area);
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(detail_text(record, state))
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(colors.background).fg(colors.text))
            .block(
                Block::default()
                    .title(record.category_label(state.language()).to_owned())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.accent)),
            );
        frame.render_widget(widget, area);
    }

    if let Some(link) = &view_data.link_text {
        let area = centered_rect(80, 20, area);
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(link.as_str())
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(colors.background).fg(colors.text))
            .block(
                Block::default()
                    .title(translations(state.language()).share_link)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.accent)),
            );
        frame.render_widget(widget, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, area);
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .style(Style::default().bg(colors.background).fg(colors.text))
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(state: &AppState, colors: Palette) -> Text<'static> {
    let language = state.language();
    let t = translations(language);
    let on_off = |value: bool| if value { t.enabled } else { t.disabled };
    Text::from(vec![
        Line::styled(
            t.title,
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(t.subtitle, Style::default().fg(colors.muted)),
        Line::styled(
            format!(
                "{}: {} | {}: {} | {}: {} | {}: {}",
                t.language,
                language_label(language),
                t.theme,
                theme_label(state.theme, language),
                t.wrap_text,
                on_off(state.wrap_text),
                t.layout,
                layout_label(state.layout, language),
            ),
            Style::default().fg(colors.muted),
        ),
    ])
}

fn filter_line(state: &AppState, colors: Palette) -> Line<'static> {
    let language = state.language();
    let t = translations(language);
    let mut spans = Vec::new();

    if state.query().is_empty() && state.mode != AppMode::Search {
        spans.push(Span::styled(
            t.search_placeholder,
            Style::default().fg(colors.muted),
        ));
    } else {
        spans.push(Span::styled(
            format!("/ {}", state.query()),
            Style::default().fg(colors.text),
        ));
    }
    if state.mode == AppMode::Search {
        spans.push(Span::styled("▏", Style::default().fg(colors.accent)));
    }

    let category = if state.category().is_empty() {
        t.all_categories.to_owned()
    } else {
        state.category().to_owned()
    };
    spans.push(Span::styled(
        format!("  | {}: {category}", t.categories_label),
        Style::default().fg(colors.text),
    ));
    if state.criteria().is_active() {
        spans.push(Span::styled(
            format!("  | x {}", t.clear_filters),
            Style::default().fg(colors.accent),
        ));
    }
    spans.push(Span::styled(
        format!(
            "  | {}",
            showing_range(
                language,
                state.page_window().display_range(),
                state.filtered_count()
            )
        ),
        Style::default().fg(colors.muted),
    ));
    Line::from(spans)
}

fn pager_line(state: &AppState, colors: Palette) -> Option<Line<'static>> {
    let pagination = state.pagination();
    if pagination.total_pages() <= 1 {
        return None;
    }
    let t = translations(state.language());
    let enabled = Style::default().fg(colors.text);
    let disabled = Style::default().fg(colors.muted);

    let mut spans = vec![Span::styled(
        format!("‹ {}", t.previous),
        if pagination.is_first_page() {
            disabled
        } else {
            enabled
        },
    )];
    for item in pagination.pager_items() {
        spans.push(Span::raw(" "));
        spans.push(match item {
            PagerItem::Page(page) if page == pagination.current_page() => Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(colors.highlight_fg)
                    .bg(colors.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            PagerItem::Page(page) => Span::styled(page.to_string(), enabled),
            PagerItem::Ellipsis => Span::styled(ELLIPSIS, disabled),
        });
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("{} ›", t.next),
        if pagination.is_last_page() {
            disabled
        } else {
            enabled
        },
    ));
    Some(Line::from(spans))
}

fn pager_text(state: &AppState) -> Option<String> {
    pager_line(state, DARK_PALETTE).map(|line| {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    })
}

fn status_text(state: &AppState) -> String {
    let (mode, hints) = match state.mode {
        AppMode::Nav => (
            "NAV",
            "←/→ page | 1-9 jump | / search | c category | x clear | L lang | t theme | w wrap | v layout | enter detail | y link | ? help | ctrl+q",
        ),
        AppMode::Search => ("SEARCH", "type to filter | enter/esc done | ctrl+u clear"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    colors: Palette,
) {
    let language = state.language();
    let t = translations(language);
    let inner_width = area.width.saturating_sub(2);
    let widths = COLUMN_PERCENTAGES.map(Constraint::Percentage);
    let column_widths = COLUMN_PERCENTAGES.map(|pct| {
        let width = u32::from(inner_width) * u32::from(pct) / 100;
        usize::try_from(width.saturating_sub(1)).unwrap_or(1).max(1)
    });

    let mut labels = vec![t.category_column];
    labels.extend(Provider::ALL.map(Provider::label));
    labels.push(t.description_column);
    let header = Row::new(labels.into_iter().map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = state.visible_records().into_iter().map(|record| {
        let mut values = vec![record.category_label(language).to_owned()];
        values.extend(
            Provider::ALL.map(|provider| record.provider(provider).name.clone()),
        );
        values.push(record.description_text(language).to_owned());

        let mut height = 1;
        let cells: Vec<Cell<'_>> = values
            .iter()
            .zip(column_widths)
            .map(|(value, width)| {
                if state.wrap_text {
                    let lines = wrap_cell(value, width);
                    height = height.max(lines.len());
                    Cell::from(lines.join("\n"))
                } else {
                    Cell::from(truncate_cell(value, width))
                }
            })
            .collect();
        Row::new(cells).height(u16::try_from(height).unwrap_or(u16::MAX))
    });

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .fg(colors.highlight_fg)
                .bg(colors.highlight_bg),
        );
    let mut table_state = TableState::default().with_selected(Some(view_data.selected_row));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_cards(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    colors: Palette,
) {
    let records = state.visible_records();
    let fits = usize::from((area.height.saturating_sub(2) / CARD_HEIGHT).max(1));
    let first = view_data.selected_row.saturating_sub(fits - 1);

    let mut lines = Vec::new();
    for (index, record) in records.iter().enumerate().skip(first).take(fits) {
        let selected = index == view_data.selected_row;
        lines.extend(card_lines(record, state, colors, selected));
    }

    let mut widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    if state.wrap_text {
        widget = widget.wrap(Wrap { trim: false });
    }
    frame.render_widget(widget, area);
}

fn card_lines(
    record: &ServiceRecord,
    state: &AppState,
    colors: Palette,
    selected: bool,
) -> Vec<Line<'static>> {
    let language = state.language();
    let title_style = if selected {
        Style::default()
            .fg(colors.highlight_fg)
            .bg(colors.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::styled(
        format!("■ {}", record.category_label(language)),
        title_style,
    )];
    for provider in Provider::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<13}", provider.label()),
                Style::default().fg(colors.muted),
            ),
            Span::styled(
                record.provider(provider).name.clone(),
                Style::default().fg(colors.text),
            ),
        ]));
    }
    lines.push(Line::styled(
        format!("  {}", record.description_text(language)),
        Style::default().fg(colors.text),
    ));
    lines.push(Line::raw(""));
    lines
}

fn detail_text(record: &ServiceRecord, state: &AppState) -> String {
    let language = state.language();
    let t = translations(language);
    let mut lines = vec![record.description_text(language).to_owned(), String::new()];
    for provider in Provider::ALL {
        let service = record.provider(provider);
        lines.push(format!("{:<13} {}", provider.label(), service.name));
    }
    let links: Vec<String> = Provider::ALL
        .iter()
        .filter_map(|provider| {
            record
                .provider(*provider)
                .url
                .as_ref()
                .map(|url| format!("{:<13} {url}", provider.label()))
        })
        .collect();
    if !links.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}:", t.links));
        lines.extend(links);
    }
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
pages: ←/→ or h/l prev/next | home/end first/last | 1-9 jump to page\n\
filter: / search (enter/esc done, ctrl+u clear) | c category | x clear filters\n\
rows: j/k move | enter detail with links | y share link\n\
view: L language | t theme | w wrap text | v table/cards/auto\n\
overlays: esc close"
}

/// Greedy word wrap by character count. Words longer than `width` are split.
fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate_cell(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}{ELLIPSIS}")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
