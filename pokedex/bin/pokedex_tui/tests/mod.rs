/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Integration tests that drive `App` through key events against an
//! in-memory catalog (App + view + cursor + render). Per-module unit
//! tests live in each module's own `#[cfg(test)] mod tests` block.

use std::sync::Arc;

use clap::Parser;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use pokedex::CatalogConfig;
use pokedex::OverlayView;
use pokedex::test_utils::Call;
use pokedex::test_utils::FAKE_BASE_URL;
use pokedex::test_utils::FakeCatalog;
use pokedex::test_utils::generated_names;
use pokedex::test_utils::item;
use pokedex::test_utils::listing_page;
use pokedex::view::execute;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::render::ui;

fn config() -> CatalogConfig {
    CatalogConfig {
        list_url: FAKE_BASE_URL.to_string(),
        detail_url: FAKE_BASE_URL.to_string(),
        ..CatalogConfig::default()
    }
}

fn names() -> Vec<String> {
    let mut names = vec!["bulbasaur".to_string(), "pikachu".to_string()];
    names.extend(generated_names(58));
    names
}

/// An app over 60 entries (3 pages of 20) plus the fake behind it.
fn setup() -> (Arc<FakeCatalog>, App) {
    let names = names();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let catalog = Arc::new(FakeCatalog::with_listing(&names, 20));
    let app = App::new(
        catalog.clone(),
        config(),
        listing_page(&names, 0, 20),
        ThemeName::Nord,
    );
    (catalog, app)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed `code` to the app and run any requested fetch to completion.
async fn press(app: &mut App, code: KeyCode) {
    match app.on_key(key(code)) {
        KeyResult::Fetch(request) => {
            let resolution = execute(app.client.as_ref(), request).await;
            app.apply(resolution);
        }
        KeyResult::Reset => {
            let result = app.client.initial_page().await;
            app.finish_reset(result);
        }
        KeyResult::None => {}
    }
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn initial_screen_shows_first_page_and_pagination() {
    let (_, app) = setup();
    assert_eq!(app.cursor.len(), 20);
    let text = screen(&app);
    assert!(text.contains("Page 1 of 3"));
    assert!(text.contains("bulbasaur"));
    assert!(text.contains("Next"));
}

#[tokio::test]
async fn paging_forward_and_back_fetches_once() {
    let (catalog, mut app) = setup();
    press(&mut app, KeyCode::Char('n')).await;
    assert_eq!(app.view.page_label(), "Page 2 of 3");
    assert_eq!(app.view.rows()[0].name, "mon-0018");

    press(&mut app, KeyCode::Char('p')).await;
    press(&mut app, KeyCode::Right).await;
    assert_eq!(app.view.page_label(), "Page 2 of 3");
    assert_eq!(catalog.call_count(), 1);
}

#[tokio::test]
async fn paging_resets_cursor() {
    let (_, mut app) = setup();
    press(&mut app, KeyCode::Char('G')).await;
    assert_eq!(app.cursor.pos(), 19);
    press(&mut app, KeyCode::Char('n')).await;
    assert_eq!(app.cursor.pos(), 0);
}

#[tokio::test]
async fn filter_replaces_table_and_hides_pagination() {
    let (_, mut app) = setup();
    press(&mut app, KeyCode::Char('/')).await;
    assert_eq!(app.input_mode, InputMode::EditFilter);
    // Navigation keys are text while editing.
    type_text(&mut app, "pikachu").await;
    assert_eq!(app.view.filter_input(), "pikachu");
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.input_mode, InputMode::Browse);
    assert_eq!(app.view.rows(), &[item("pikachu")]);
    assert_eq!(app.cursor.len(), 1);
    let text = screen(&app);
    assert!(!text.contains("Page 1 of 3"));

    // Paging keys do nothing while the filter is active.
    assert!(matches!(app.on_key(key(KeyCode::Char('n'))), KeyResult::None));

    press(&mut app, KeyCode::Char('x')).await;
    assert_eq!(app.view.rows().len(), 20);
    assert!(screen(&app).contains("Page 1 of 3"));
}

#[tokio::test]
async fn unknown_name_reports_error_in_header() {
    let (_, mut app) = setup();
    press(&mut app, KeyCode::Char('/')).await;
    type_text(&mut app, "missingno").await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.view.rows().len(), 20);
    let text = screen(&app);
    assert!(text.contains("ERROR: Pokémon not found"));
    assert!(text.contains("Page 1 of 3"));
}

#[tokio::test]
async fn detail_overlay_opens_and_reopens_from_cache() {
    let (catalog, mut app) = setup();
    let request = match app.on_key(key(KeyCode::Enter)) {
        KeyResult::Fetch(request) => request,
        _ => panic!("expected a detail fetch"),
    };
    assert_eq!(app.view.overlay(), OverlayView::Loading { name: "bulbasaur" });
    assert!(screen(&app).contains("Loading Details"));

    let resolution = execute(app.client.as_ref(), request).await;
    app.apply(resolution);
    let text = screen(&app);
    assert!(text.contains("bulbasaur-ability-1"));
    assert!(text.contains("speed"));

    // Keys other than close are swallowed by the overlay.
    press(&mut app, KeyCode::Char('j')).await;
    assert_eq!(app.cursor.pos(), 0);

    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.view.overlay(), OverlayView::Closed);
    assert!(!app.should_quit);

    press(&mut app, KeyCode::Enter).await;
    assert!(matches!(app.view.overlay(), OverlayView::Ready(_)));
    assert_eq!(catalog.calls(), vec![Call::Detail("bulbasaur".into())]);
}

#[tokio::test]
async fn stale_page_resolution_does_not_move_cursor() {
    let (_, mut app) = setup();
    let first = match app.on_key(key(KeyCode::Char('n'))) {
        KeyResult::Fetch(request) => request,
        _ => panic!("expected a page fetch"),
    };
    // A repeated press supersedes the first request.
    press(&mut app, KeyCode::Char('n')).await;
    press(&mut app, KeyCode::Char('j')).await;
    assert_eq!(app.view.page_label(), "Page 2 of 3");

    let resolution = execute(app.client.as_ref(), first).await;
    app.apply(resolution);
    assert_eq!(app.view.page_label(), "Page 2 of 3");
    assert_eq!(app.cursor.pos(), 1);
}

#[tokio::test]
async fn reset_reloads_first_page() {
    let (catalog, mut app) = setup();
    press(&mut app, KeyCode::Char('n')).await;
    press(&mut app, KeyCode::Char('R')).await;
    assert_eq!(app.view.page_label(), "Page 1 of 3");
    assert_eq!(app.view.pagination().cache().len(), 1);
    assert!(app.error.is_none());
    assert_eq!(catalog.call_count(), 2);
}

#[tokio::test]
async fn reload_runs_off_the_event_loop() {
    let (_, mut app) = setup();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    press(&mut app, KeyCode::Char('n')).await;
    assert!(matches!(app.on_key(key(KeyCode::Char('R'))), KeyResult::Reset));
    app.spawn_reload(&tx);

    // Input is still handled while the reload is pending.
    assert!(app.loading());
    assert!(screen(&app).contains("Loading…"));
    assert!(matches!(app.on_key(key(KeyCode::Char('R'))), KeyResult::None));
    press(&mut app, KeyCode::Char('j')).await;
    assert_eq!(app.cursor.pos(), 1);

    let event = rx.recv().await.unwrap();
    assert!(matches!(event, AppEvent::Reloaded(Ok(_))));
    app.handle(event);
    assert!(!app.reloading);
    assert_eq!(app.cursor.pos(), 0);
    assert_eq!(app.view.page_label(), "Page 1 of 3");
}

#[tokio::test]
async fn spawned_requests_report_through_channel() {
    let (_, mut app) = setup();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let KeyResult::Fetch(request) = app.on_key(key(KeyCode::Char('n'))) else {
        panic!("expected a page fetch");
    };
    app.spawn(request, &tx);
    let event = rx.recv().await.unwrap();
    app.handle(event);
    assert_eq!(app.view.page_label(), "Page 2 of 3");
}

#[tokio::test]
async fn failed_reset_keeps_session() {
    let (catalog, mut app) = setup();
    catalog.fail(&pokedex::test_utils::first_page_request_url(20));
    press(&mut app, KeyCode::Char('n')).await;
    press(&mut app, KeyCode::Char('R')).await;
    assert_eq!(app.view.page_label(), "Page 2 of 3");
    assert_eq!(app.error.as_deref(), Some("Failed to reload: HTTP 500"));
}

#[test]
fn quit_keys() {
    let (_, mut app) = setup();
    app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);

    let (_, mut app) = setup();
    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn light_theme_is_named_in_header() {
    let names = names();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let app = App::new(
        Arc::new(FakeCatalog::with_listing(&names, 20)),
        config(),
        listing_page(&names, 0, 20),
        ThemeName::Light,
    );
    assert!(screen(&app).contains("theme:light"));
}

#[test]
fn page_size_flag_overrides_default() {
    let args = Args::parse_from(["pokedex_tui", "--page-size", "30", "--theme", "light"]);
    let config = args.config_from(CatalogConfig::default());
    assert_eq!(config.page_size, 30);
    assert_eq!(args.theme, ThemeName::Light);

    let args = Args::parse_from(["pokedex_tui", "--page-size", "0"]);
    assert_eq!(
        args.config_from(CatalogConfig::default()).page_size,
        pokedex::config::PAGE_SIZE
    );
}

#[test]
fn malformed_env_page_size_does_not_reject_args() {
    let env = |key: &str| match key {
        "POKEDEX_PAGE_SIZE" => Some("twenty".to_string()),
        "POKEDEX_LIST_URL" => Some("http://env.test/pokemon".to_string()),
        _ => None,
    };
    let args = Args::try_parse_from(["pokedex_tui"]).unwrap();
    let config = args.config_from(CatalogConfig::from_vars(env));
    assert_eq!(config.page_size, pokedex::config::PAGE_SIZE);
    assert_eq!(config.list_url, "http://env.test/pokemon");

    let args = Args::try_parse_from(["pokedex_tui", "--list-url", "http://flag.test"]).unwrap();
    let config = args.config_from(CatalogConfig::from_vars(env));
    assert_eq!(config.list_url, "http://flag.test");
}
