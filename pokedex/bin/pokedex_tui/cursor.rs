/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Row selection over the catalog table, together with the table's
/// scroll window.
///
/// Invariants: `pos < len` (or `pos == 0` when `len == 0`), and the
/// selected row is inside `offset..offset + height`.
#[derive(Debug, Clone)]
pub(crate) struct TableCursor {
    pos: usize,
    len: usize,
    /// First visible row.
    offset: usize,
    /// Visible rows, as last measured by the event loop.
    height: usize,
}

impl TableCursor {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            pos: 0,
            len,
            offset: 0,
            height: 20,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[allow(dead_code)] // used by tests
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Record the table height and scroll so the selection stays in
    /// view.
    pub(crate) fn set_viewport(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_into_view();
    }

    /// A different row set is displayed (page adopted, filter applied
    /// or cleared, session reset): select its first row.
    pub(crate) fn replace_rows(&mut self, len: usize) {
        self.len = len;
        self.pos = 0;
        self.offset = 0;
    }

    pub(crate) fn move_up(&mut self) -> bool {
        self.select(self.pos.saturating_sub(1))
    }

    pub(crate) fn move_down(&mut self) -> bool {
        self.select(self.pos + 1)
    }

    pub(crate) fn home(&mut self) -> bool {
        self.select(0)
    }

    pub(crate) fn end(&mut self) -> bool {
        self.select(self.len.saturating_sub(1))
    }

    /// Select row `pos`, clamped to the table. Returns true if the
    /// selection moved.
    fn select(&mut self, pos: usize) -> bool {
        let pos = pos.min(self.len.saturating_sub(1));
        if pos == self.pos {
            return false;
        }
        self.pos = pos;
        self.scroll_into_view();
        true
    }

    fn scroll_into_view(&mut self) {
        if self.pos < self.offset {
            self.offset = self.pos;
        } else if self.pos >= self.offset + self.height {
            self.offset = self.pos + 1 - self.height;
        }
    }
}
