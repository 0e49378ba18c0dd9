// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Owns the single-threaded event loop (ratatui + crossterm): filter editing,
//! list navigation and marking, the save flow, and the message-queue bridge
//! that hands catalog fetch results back onto the UI thread. The template list
//! is only ever touched from this loop; network work happens on the async
//! runtime and comes back as [`CatalogEvent`]s.

use std::error::Error;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::catalog::{CatalogClient, CatalogError};
use crate::list::TemplateList;
use crate::store::{OutputFile, SaveChoice, WriteMode};

const FILTER_COLOR: Color = Color::Yellow;
const MARKED_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const MARKED_PREFIX: &str = "[x] ";
const UNMARKED_PREFIX: &str = "[ ] ";
const PAGE_JUMP: usize = 10;
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Work the UI asks the catalog worker to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    Names,
    Body { names: Vec<String>, mode: WriteMode },
}

/// Fetch completions handed back onto the UI thread.
#[derive(Debug)]
pub enum CatalogEvent {
    Names(Result<Vec<String>, CatalogError>),
    Body { mode: WriteMode, result: Result<String, CatalogError> },
}

/// Services catalog requests on the async runtime. Results travel back over a
/// plain channel the UI thread drains between draws; the worker never touches
/// UI state directly.
pub async fn serve_catalog_requests(
    client: CatalogClient,
    mut requests: UnboundedReceiver<CatalogRequest>,
    events: mpsc::Sender<CatalogEvent>,
) {
    while let Some(request) = requests.recv().await {
        let event = match request {
            CatalogRequest::Names => CatalogEvent::Names(client.fetch_names().await),
            CatalogRequest::Body { names, mode } => {
                CatalogEvent::Body { mode, result: client.fetch_body(&names).await }
            }
        };
        if events.send(event).is_err() {
            break;
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Where the save flow currently stands. `Fetching` covers the window between
/// dispatching the body request and its completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavePhase {
    Idle,
    Fetching(WriteMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Dialog {
    Help,
    About,
    /// Single-button acknowledgment (nothing selected, fetch/write failures).
    Notice { title: String, message: String },
    /// Tri-state prompt shown when the output file already exists.
    ConfirmReplace { choice: SaveChoice },
}

pub struct App {
    list: TemplateList,
    list_state: ListState,
    output: OutputFile,
    api_url: String,
    loading: bool,
    save: SavePhase,
    dialog: Option<Dialog>,
    toast: Option<Toast>,
    requests: UnboundedSender<CatalogRequest>,
    events: mpsc::Receiver<CatalogEvent>,
    should_quit: bool,
}

impl App {
    /// Creates the app and immediately queues the catalog listing fetch; the
    /// list stays empty (and the UI in its loading state) until the worker
    /// answers.
    pub fn new(
        output: OutputFile,
        api_url: impl Into<String>,
        requests: UnboundedSender<CatalogRequest>,
        events: mpsc::Receiver<CatalogEvent>,
    ) -> Self {
        let mut app = Self {
            list: TemplateList::new(),
            list_state: ListState::default(),
            output,
            api_url: api_url.into(),
            loading: true,
            save: SavePhase::Idle,
            dialog: None,
            toast: None,
            requests,
            events,
            should_quit: false,
        };
        app.request(CatalogRequest::Names);
        app
    }

    fn request(&mut self, request: CatalogRequest) {
        let _ = self.requests.send(request);
    }

    fn drain_catalog_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.on_catalog_event(event);
        }
    }

    fn on_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Names(Ok(names)) => {
                self.loading = false;
                self.list.load(names);
                self.snap_selection_home();
                self.set_toast(format!("Loaded {} templates", self.list.len()));
            }
            CatalogEvent::Names(Err(err)) => {
                self.loading = false;
                self.set_notice("Catalog fetch failed", err.to_string());
            }
            CatalogEvent::Body { mode, result } => self.on_body_event(mode, result),
        }
    }

    fn on_body_event(&mut self, mode: WriteMode, result: Result<String, CatalogError>) {
        if self.save == SavePhase::Idle {
            // Stale completion; the save it belonged to was already abandoned.
            return;
        }
        self.save = SavePhase::Idle;
        match result {
            Ok(body) => match self.output.write(&body, mode) {
                Ok(()) => {
                    // Written is terminal: quit with the file on disk.
                    self.should_quit = true;
                }
                Err(err) => self.set_notice("Write failed", err.to_string()),
            },
            Err(err) => self.set_notice("Template fetch failed", err.to_string()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.dialog.clone() {
            Some(Dialog::ConfirmReplace { choice }) => self.handle_confirm_key(key, choice),
            Some(Dialog::Help) | Some(Dialog::About) | Some(Dialog::Notice { .. }) => {
                self.handle_ack_key(key);
            }
            None => self.handle_main_key(key),
        }
    }

    fn handle_ack_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(_)) {
            self.dialog = None;
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, choice: SaveChoice) {
        match key.code {
            KeyCode::Esc => self.dialog = None,
            KeyCode::Left | KeyCode::BackTab => {
                self.dialog =
                    Some(Dialog::ConfirmReplace { choice: previous_save_choice(choice) });
            }
            KeyCode::Right | KeyCode::Tab => {
                self.dialog = Some(Dialog::ConfirmReplace { choice: next_save_choice(choice) });
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.apply_save_choice(SaveChoice::Overwrite);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => self.apply_save_choice(SaveChoice::Append),
            KeyCode::Char('c') | KeyCode::Char('C') => self.apply_save_choice(SaveChoice::Cancel),
            KeyCode::Enter => self.apply_save_choice(choice),
            _ => {}
        }
    }

    fn apply_save_choice(&mut self, choice: SaveChoice) {
        self.dialog = None;
        match choice.write_mode() {
            Some(mode) => self.dispatch_save(mode),
            // Cancelled: the file stays untouched and no fetch happens.
            None => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('s') => self.begin_save(),
                KeyCode::Char('a') => self.dialog = Some(Dialog::About),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => self.dialog = Some(Dialog::Help),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(PAGE_JUMP as isize)),
            KeyCode::PageDown => self.move_selection(PAGE_JUMP as isize),
            KeyCode::Home => self.snap_selection_home(),
            KeyCode::End => self.select_last(),
            KeyCode::Char(' ') => self.toggle_selected_mark(),
            KeyCode::Backspace => self.pop_filter_char(),
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Char(ch) if !ch.is_control() => self.push_filter_char(ch),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.list.visible_count();
        if count == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    fn snap_selection_home(&mut self) {
        self.list_state.select(if self.list.visible_count() == 0 { None } else { Some(0) });
    }

    fn select_last(&mut self) {
        self.list_state.select(self.list.visible_count().checked_sub(1));
    }

    fn toggle_selected_mark(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        if let Ok(marked) = self.list.is_marked(index) {
            let _ = self.list.set_marked(index, !marked);
        }
    }

    fn push_filter_char(&mut self, ch: char) {
        let mut filter = self.list.filter().to_owned();
        filter.push(ch);
        self.apply_filter(filter);
    }

    fn pop_filter_char(&mut self) {
        let filter = self.list.filter();
        if filter.is_empty() {
            return;
        }
        let mut filter = filter.to_owned();
        filter.pop();
        self.apply_filter(filter);
    }

    fn clear_filter(&mut self) {
        if self.list.filter().is_empty() {
            return;
        }
        self.apply_filter(String::new());
    }

    /// The highlighted row may have just been hidden, so selection snaps back
    /// to the first visible row after every filter edit.
    fn apply_filter(&mut self, filter: String) {
        self.list.set_filter(filter);
        self.snap_selection_home();
    }

    fn begin_save(&mut self) {
        if self.save != SavePhase::Idle {
            return;
        }
        if self.list.marked_names().is_empty() {
            self.set_notice("Nothing Selected", "Select one or more templates and try again.");
            return;
        }
        if self.output.exists() {
            self.dialog = Some(Dialog::ConfirmReplace { choice: SaveChoice::Overwrite });
        } else {
            self.dispatch_save(WriteMode::Truncate);
        }
    }

    fn dispatch_save(&mut self, mode: WriteMode) {
        let names = self.list.marked_names();
        self.save = SavePhase::Fetching(mode);
        self.set_toast(format!("Fetching {} marked templates", names.len()));
        self.request(CatalogRequest::Body { names, mode });
    }

    fn set_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.dialog = Some(Dialog::Notice { title: title.into(), message: message.into() });
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

/// Runs the interactive terminal UI until the user quits or a save completes.
pub fn run(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.drain_catalog_events();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let filter_area = layout[0];
    let list_area = layout[1];
    let target_area = layout[2];
    let status_area = layout[3];

    frame.render_widget(filter_line(app), filter_area);
    draw_template_list(frame, app, list_area);
    frame.render_widget(target_line(app), target_area);
    frame.render_widget(Paragraph::new(status_line(app)), status_area);

    match app.dialog.clone() {
        Some(Dialog::Help) => draw_help(frame, area),
        Some(Dialog::About) => draw_about(frame, area),
        Some(Dialog::Notice { title, message }) => draw_notice(frame, area, &title, &message),
        Some(Dialog::ConfirmReplace { choice }) => draw_confirm_replace(frame, app, area, choice),
        None => {}
    }
}

fn filter_line(app: &App) -> Paragraph<'static> {
    let filter = app.list.filter();
    if filter.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "  type to filter".to_owned(),
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {filter} "),
                Style::default().fg(Color::Black).bg(FILTER_COLOR),
            ),
        ]))
    }
}

fn draw_template_list(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = if app.loading {
        " Templates ".to_owned()
    } else {
        format!(" Templates ({}/{}) ", app.list.visible_count(), app.list.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.loading {
        let paragraph = Paragraph::new(format!("Loading template catalog from {} …", app.api_url))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if app.list.visible_count() == 0 {
        let message = if app.list.is_empty() {
            "No templates loaded".to_owned()
        } else {
            format!("No templates match {:?}", app.list.filter())
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = app.list.visible_width().unwrap_or(0);
    let items: Vec<ListItem<'static>> = (0..app.list.visible_count())
        .map(|index| {
            let marked = app.list.is_marked(index).unwrap_or(false);
            let name = app.list.render(index, name_width).unwrap_or_default();
            let (prefix, style) = if marked {
                (MARKED_PREFIX, Style::default().fg(MARKED_COLOR))
            } else {
                (UNMARKED_PREFIX, Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix.to_owned(), style),
                Span::styled(name, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn target_line(app: &App) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            app.output.path().display().to_string(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ),
    ]))
}

fn status_line(app: &mut App) -> Line<'static> {
    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_message = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => message,
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "Help", "F1");
    push_footer_entry(&mut spans, "About", "^A");
    push_footer_entry(&mut spans, "Save", "^S");
    push_footer_entry(&mut spans, "Quit", "^Q");
    if app.save != SavePhase::Idle {
        push_footer_entry(&mut spans, "Status", "saving…");
    }
    if !toast_message.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast_message));
    }

    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(format!("{label}:"), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn next_save_choice(choice: SaveChoice) -> SaveChoice {
    match choice {
        SaveChoice::Overwrite => SaveChoice::Append,
        SaveChoice::Append => SaveChoice::Cancel,
        SaveChoice::Cancel => SaveChoice::Overwrite,
    }
}

fn previous_save_choice(choice: SaveChoice) -> SaveChoice {
    match choice {
        SaveChoice::Overwrite => SaveChoice::Cancel,
        SaveChoice::Append => SaveChoice::Overwrite,
        SaveChoice::Cancel => SaveChoice::Append,
    }
}

fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn dialog_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FILTER_COLOR))
        .title(format!(" {title} "))
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let dialog_area = centered_fixed_rect(54, 8, area);
    frame.render_widget(Clear, dialog_area);

    let mut lines = vec![Line::raw(""), Line::raw(message.to_owned()), Line::raw("")];
    lines.push(Line::from(Span::styled(
        "Press Enter to continue".to_owned(),
        Style::default().fg(Color::DarkGray),
    )));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(dialog_block(title));
    frame.render_widget(paragraph, dialog_area);
}

fn draw_confirm_replace(frame: &mut Frame<'_>, app: &App, area: Rect, choice: SaveChoice) {
    let dialog_area = centered_fixed_rect(58, 9, area);
    frame.render_widget(Clear, dialog_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("{} exists.", app.output.path().display())),
        Line::raw(""),
        Line::raw("Do you want to overwrite it or append to it?"),
        Line::raw(""),
    ];

    let mut buttons = Vec::<Span<'static>>::new();
    for option in [SaveChoice::Overwrite, SaveChoice::Append, SaveChoice::Cancel] {
        if !buttons.is_empty() {
            buttons.push(Span::raw("   "));
        }
        let style = if option == choice {
            Style::default().fg(Color::Black).bg(FOOTER_KEY_COLOR)
        } else {
            Style::default().fg(FOOTER_KEY_COLOR)
        };
        buttons.push(Span::styled(format!("[ {} ]", option.label()), style));
    }
    lines.push(Line::from(buttons));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(dialog_block("Save"));
    frame.render_widget(paragraph, dialog_area);
}

fn help_kv(key: &str, desc: &str, key_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key:>width$}", width = key_width),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn draw_help(frame: &mut Frame<'_>, area: Rect) {
    let dialog_area = centered_fixed_rect(62, 16, area);
    frame.render_widget(Clear, dialog_area);

    let header_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let key_col_width = "PgUp/PgDn/Home/End".len();

    let lines = vec![
        Line::from(Span::styled("--- Picking templates ---", header_style)),
        help_kv("↑/↓", "Move the highlight", key_col_width),
        help_kv("PgUp/PgDn/Home/End", "Jump through the list", key_col_width),
        help_kv("Space", "Mark/unmark the highlighted template", key_col_width),
        help_kv("type text", "Filter the list (case-sensitive)", key_col_width),
        help_kv("Backspace", "Delete the last filter character", key_col_width),
        help_kv("Esc", "Clear the filter", key_col_width),
        Line::raw(""),
        Line::from(Span::styled("--- Session ---", header_style)),
        help_kv("Ctrl+S", "Write the marked templates and exit", key_col_width),
        help_kv("Ctrl+A", "About", key_col_width),
        help_kv("Ctrl+Q", "Quit without writing", key_col_width),
        Line::raw(""),
        Line::from(Span::styled(
            "Marks survive filter changes; saving writes every marked template.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(dialog_block("Help"));
    frame.render_widget(paragraph, dialog_area);
}

fn draw_about(frame: &mut Frame<'_>, area: Rect) {
    let dialog_area = centered_fixed_rect(64, 9, area);
    frame.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("mkignore {}", env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(env!("CARGO_PKG_DESCRIPTION").to_owned()),
        Line::raw(""),
        Line::raw("API and templates provided by"),
        Line::raw("https://www.toptal.com/developers/gitignore/"),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(dialog_block("About"));
    frame.render_widget(paragraph, dialog_area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
