/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;

use crate::App;

/// Render the catalog table: the current page, or the filter result
/// while one is active.
pub(crate) fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let scheme = &app.theme.scheme;
    let labels = &app.theme.labels;
    let rows = app.view.rows();

    let title = if app.view.filter_active() {
        format!("{} ({})", labels.pane_table, app.view.filter_input())
    } else {
        labels.pane_table.to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(scheme.border);

    if rows.is_empty() {
        let text = if app.loading() {
            Span::styled(labels.loading, scheme.loading)
        } else {
            Span::styled(labels.no_rows, scheme.info)
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let selected = idx == app.cursor.pos();
            let (marker, style) = if selected {
                (labels.selection_caret, scheme.row_selected)
            } else {
                ("  ", scheme.row)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}", marker, item.name), style),
                Span::styled(format!("  {}", item.url), scheme.stat_url),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default());
    let mut list_state = ListState::default()
        .with_selected(Some(app.cursor.pos()))
        .with_offset(app.cursor.offset());
    frame.render_stateful_widget(list, area, &mut list_state);
}
