/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use pokedex::DetailRecord;
use pokedex::OverlayView;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

use crate::theme::ColorScheme;
use crate::theme::Theme;

/// A `percent_x` by `percent_y` rectangle centered in `area`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Build a key-value detail line with a muted label and bold value.
pub(crate) fn detail_line<'a>(
    label: &'a str,
    value: impl Into<String>,
    scheme: &ColorScheme,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, scheme.detail_label),
        Span::styled(value.into(), scheme.detail_value),
    ])
}

fn record_lines<'a>(record: &'a DetailRecord, theme: &'a Theme) -> Vec<Line<'a>> {
    let l = &theme.labels;
    let scheme = &theme.scheme;
    let mut lines = vec![Line::from(Span::styled(l.abilities, scheme.info))];
    lines.extend(
        record
            .ability_names()
            .map(|name| detail_line("  • ", name, scheme)),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(l.stats, scheme.info)));
    lines.extend(
        record
            .stat_names()
            .map(|name| detail_line("  • ", name, scheme)),
    );
    lines
}

/// Render the detail overlay centered over `area`.
pub(crate) fn render_detail_overlay(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    overlay: OverlayView<'_>,
    theme: &Theme,
) {
    let l = &theme.labels;
    let scheme = &theme.scheme;
    let (title, lines, border) = match overlay {
        OverlayView::Closed => return,
        OverlayView::Loading { name } => (
            name.to_string(),
            vec![Line::from(Span::styled(l.loading_details, scheme.loading))],
            scheme.border_focused,
        ),
        OverlayView::Ready(record) => (
            record.name.clone(),
            record_lines(record, theme),
            scheme.border_focused,
        ),
        OverlayView::Failed { name, message } => (
            format!("{} - {}", name, l.pane_error),
            vec![Line::from(Span::styled(message, scheme.error))],
            scheme.error,
        ),
    };

    let overlay_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, overlay_area);
    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(body, overlay_area);
}
