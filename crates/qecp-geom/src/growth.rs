// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Fractional breakpoints along an edge's unit parameter `[0, 1]`.
///
/// `[0, left_end]` is grown from the left vertex, `[left_end, right_end]` is
/// ungrown, `[right_end, 1]` is grown from the right vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthBreakpoints {
    /// End of the left grown part.
    pub left_end: f32,
    /// Start of the right grown part.
    pub right_end: f32,
}

impl GrowthBreakpoints {
    /// Breakpoints of an edge that is grown from both sides up to the middle.
    pub const FULLY_GROWN: Self = Self {
        left_end: 0.5,
        right_end: 0.5,
    };
}

/// Computes growth breakpoints for an edge of `weight` grown by `left_grown`
/// and `right_grown` from its two endpoints.
///
/// A zero-weight edge always renders as fully grown. Inputs violating
/// `left_grown + right_grown <= weight` are not corrected here; the layout
/// hides any sub-segment whose start passes its end.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn growth_breakpoints(weight: f64, left_grown: f64, right_grown: f64) -> GrowthBreakpoints {
    if weight == 0.0 {
        return GrowthBreakpoints::FULLY_GROWN;
    }
    GrowthBreakpoints {
        left_end: (left_grown / weight) as f32,
        right_end: ((weight - right_grown) / weight) as f32,
    }
}
