/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

pub mod detail_overlay;
pub mod status_bar;
pub mod table_pane;

use pokedex::OverlayView;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;

use self::detail_overlay::render_detail_overlay;
use self::status_bar::render_filter_bar;
use self::status_bar::render_footer;
use self::status_bar::render_header;
use self::status_bar::render_pagination;
use self::table_pane::render_table;
use crate::App;

/// Render a full frame of the TUI.
///
/// Header, filter input, table, pagination bar and footer from top to
/// bottom. The pagination bar collapses to zero height while a filter
/// result replaces the table. The detail overlay, when open, is drawn
/// last on top of everything else.
pub(crate) fn ui(frame: &mut ratatui::Frame<'_>, app: &App) {
    let pagination_height = if app.view.show_pagination() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(pagination_height),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_filter_bar(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    if app.view.show_pagination() {
        render_pagination(frame, chunks[3], app);
    }
    render_footer(frame, chunks[4], app);

    let overlay = app.view.overlay();
    if overlay != OverlayView::Closed {
        render_detail_overlay(frame, frame.area(), overlay, &app.theme);
    }
}
