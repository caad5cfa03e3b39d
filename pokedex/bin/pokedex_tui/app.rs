/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::io;
use std::sync::Arc;

use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use futures::StreamExt;
use pokedex::CatalogClient;
use pokedex::CatalogConfig;
use pokedex::CatalogEnvelope;
use pokedex::CatalogError;
use pokedex::CatalogView;
use pokedex::Resolution;
use pokedex::ViewRequest;
use pokedex::view::execute;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::KeyResult;
use crate::TableCursor;
use crate::Theme;
use crate::ThemeName;
use crate::render::ui;

/// Whether keystrokes go to the filter input or to navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Browse,
    EditFilter,
}

/// Work finished off the event loop.
#[derive(Debug)]
pub(crate) enum AppEvent {
    /// A view request completed.
    Resolved(Resolution),
    /// The first page was reloaded for a reset.
    Reloaded(Result<CatalogEnvelope, CatalogError>),
}

/// Runtime state for the catalog TUI.
///
/// `App` owns the catalog view (pagination, filter and overlay state
/// plus their caches), the row cursor, and the shared client that
/// spawned fetches run against.
pub(crate) struct App {
    /// Shared client for all catalog requests.
    pub(crate) client: Arc<dyn CatalogClient>,
    /// List endpoint, shown in the header.
    pub(crate) endpoint: String,
    pub(crate) view: CatalogView,
    /// Selection and scroll window over `view.rows()`.
    pub(crate) cursor: TableCursor,
    pub(crate) input_mode: InputMode,
    /// A reset is waiting for the first page.
    pub(crate) reloading: bool,
    /// Session-level error (initial load or reset failed).
    pub(crate) error: Option<String>,
    /// Set when the user requests exit (`q` / `Ctrl-C`).
    pub(crate) should_quit: bool,

    pub(crate) theme: Theme,
    pub(crate) theme_name: ThemeName,
}

impl App {
    pub(crate) fn new(
        client: Arc<dyn CatalogClient>,
        config: CatalogConfig,
        initial: CatalogEnvelope,
        theme_name: ThemeName,
    ) -> Self {
        let endpoint = config.list_url.clone();
        let view = CatalogView::new(initial, config);
        let cursor = TableCursor::new(view.rows().len());
        Self {
            client,
            endpoint,
            view,
            cursor,
            input_mode: InputMode::Browse,
            reloading: false,
            error: None,
            should_quit: false,
            theme: Theme::new(theme_name),
            theme_name,
        }
    }

    fn rows_replaced(&mut self) {
        self.cursor.replace_rows(self.view.rows().len());
    }

    /// True while anything shown in the table or header is pending.
    pub(crate) fn loading(&self) -> bool {
        self.reloading || self.view.table_loading()
    }

    /// Handle a key press.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> KeyResult {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return KeyResult::None;
        }
        if self.input_mode == InputMode::EditFilter {
            return self.on_filter_key(key);
        }
        if self.view.overlay_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.view.close_overlay();
            }
            return KeyResult::None;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                KeyResult::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor.move_up();
                KeyResult::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.move_down();
                KeyResult::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor.home();
                KeyResult::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor.end();
                KeyResult::None
            }
            KeyCode::Right | KeyCode::Char('n') if self.view.show_pagination() => {
                let request = self.view.next_page();
                self.rows_replaced();
                Self::fetch(request)
            }
            KeyCode::Left | KeyCode::Char('p') if self.view.show_pagination() => {
                let request = self.view.previous_page();
                self.rows_replaced();
                Self::fetch(request)
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::EditFilter;
                KeyResult::None
            }
            KeyCode::Char('x') => {
                self.view.clear_filter();
                self.rows_replaced();
                KeyResult::None
            }
            KeyCode::Enter => Self::fetch(self.view.select_row(self.cursor.pos())),
            KeyCode::Char('R') if !self.reloading => {
                self.reloading = true;
                KeyResult::Reset
            }
            _ => KeyResult::None,
        }
    }

    fn on_filter_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Browse;
                KeyResult::None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Browse;
                let request = self.view.submit_filter();
                self.rows_replaced();
                Self::fetch(request)
            }
            KeyCode::Backspace => {
                self.view.pop_filter_char();
                self.rows_replaced();
                KeyResult::None
            }
            KeyCode::Char(c) => {
                self.view.push_filter_char(c);
                self.rows_replaced();
                KeyResult::None
            }
            _ => KeyResult::None,
        }
    }

    fn fetch(request: Option<ViewRequest>) -> KeyResult {
        match request {
            Some(request) => KeyResult::Fetch(request),
            None => KeyResult::None,
        }
    }

    /// Run `request` on its own task; the outcome arrives on `tx`.
    pub(crate) fn spawn(&self, request: ViewRequest, tx: &mpsc::UnboundedSender<AppEvent>) {
        let client = Arc::clone(&self.client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let resolution = execute(client.as_ref(), request).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(AppEvent::Resolved(resolution));
        });
    }

    /// Reload the first page on its own task for a reset.
    pub(crate) fn spawn_reload(&self, tx: &mpsc::UnboundedSender<AppEvent>) {
        let client = Arc::clone(&self.client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.initial_page().await;
            let _ = tx.send(AppEvent::Reloaded(result));
        });
    }

    pub(crate) fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Resolved(resolution) => self.apply(resolution),
            AppEvent::Reloaded(result) => self.finish_reset(result),
        }
    }

    /// Apply a finished request.
    pub(crate) fn apply(&mut self, resolution: Resolution) {
        let page_changed = matches!(resolution, Resolution::Page(..) | Resolution::Filter(..));
        if self.view.resolve(resolution) && page_changed {
            self.rows_replaced();
        }
    }

    /// Start over from a freshly loaded first page, or keep the
    /// session and report why not.
    pub(crate) fn finish_reset(&mut self, result: Result<CatalogEnvelope, CatalogError>) {
        self.reloading = false;
        match result {
            Ok(initial) => {
                tracing::info!(count = initial.count, "session reset");
                self.view.reset(initial);
                self.input_mode = InputMode::Browse;
                self.error = None;
                self.rows_replaced();
            }
            Err(err) => {
                tracing::warn!(error = %err, "reset failed");
                self.error = Some(format!("Failed to reload: {}", err));
            }
        }
    }
}

/// Main event loop.
///
/// Redraws, then waits for either a terminal event or finished
/// background work. Fetches and reloads never block the loop; stale
/// results are dropped by the view's request tokens.
pub(crate) async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut events = EventStream::new();

    loop {
        // Body height is the terminal minus header (3), filter (3),
        // pagination (1), footer (2) and the table borders (2).
        let terminal_size = terminal.size()?;
        app.cursor.set_viewport(terminal_size.height.saturating_sub(11) as usize);

        terminal.draw(|frame| ui(frame, &app))?;

        tokio::select! {
            Some(event) = rx.recv() => {
                app.handle(event);
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => match app.on_key(key) {
                        KeyResult::Fetch(request) => app.spawn(request, &tx),
                        KeyResult::Reset => app.spawn_reload(&tx),
                        KeyResult::None => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => break,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
