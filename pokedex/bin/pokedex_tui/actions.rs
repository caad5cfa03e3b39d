/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use pokedex::ViewRequest;

/// Result of handling a key event.
pub(crate) enum KeyResult {
    /// Nothing to do beyond redrawing.
    None,
    /// Run this request off the event loop.
    Fetch(ViewRequest),
    /// Reload the first page and start the session over.
    Reset,
}
