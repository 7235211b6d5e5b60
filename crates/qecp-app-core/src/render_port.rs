// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for asking the host surface to draw another frame.
//!
//! The engine never renders on its own after a rebuild or a material swap;
//! it asks for a redraw and the host's frame callback does the drawing.

use std::cell::Cell;

/// Minimal redraw port; implementations forward to a window's
/// `request_redraw` or similar.
pub trait RenderPort {
    /// Request a redraw of the main surface.
    fn request_redraw(&self);
}

/// Redraw port that only records that a frame is due (for hosts that poll,
/// and for tests).
#[derive(Debug, Default)]
pub struct RedrawFlag {
    pending: Cell<bool>,
    requests: Cell<usize>,
}

impl RedrawFlag {
    /// New flag with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a redraw was requested since the last call, clearing it.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total requests so far.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl RenderPort for RedrawFlag {
    fn request_redraw(&self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}
