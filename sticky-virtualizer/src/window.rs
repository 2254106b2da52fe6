use core::cmp;

use crate::{HeightCache, WindowState};

/// Extra rows rendered past the viewport to hide measurement lag and fractional scroll.
pub const OVERSCAN: usize = 2;

/// Number of rows the viewport can hold at `min_row_height`.
pub fn rows_per_viewport(viewport_height: f64, min_row_height: f64) -> usize {
    if !(viewport_height > 0.0) || !(min_row_height > 0.0) {
        return 0;
    }
    // Truncation is floor for positive values; `as` saturates on overflow.
    (viewport_height / min_row_height) as usize
}

/// Upper bound on the normal slice length for a viewport.
pub fn max_window_len(viewport_height: f64, min_row_height: f64) -> usize {
    rows_per_viewport(viewport_height, min_row_height)
        .saturating_add(OVERSCAN + 1)
}

/// Computes the render window for a scroll position.
///
/// `min_row_height` must be positive (options validation guarantees it). A negative or NaN
/// `scroll_offset` is treated as zero.
///
/// Items are consumed from the top while the remaining scroll is at least their resolved
/// height, so a boundary item that exactly fits is scrolled past. The last item is never
/// consumed, which keeps `start_index <= end_index` even when the offset overshoots the
/// content.
pub fn compute_window(
    scroll_offset: f64,
    viewport_height: f64,
    min_row_height: f64,
    heights: &HeightCache,
    count: usize,
) -> WindowState {
    if count == 0 {
        return WindowState::default();
    }

    let content_height: f64 = (0..count).map(|i| heights.resolve(i)).sum();

    let scroll_offset = if scroll_offset > 0.0 { scroll_offset } else { 0.0 };
    let mut start_index = 0usize;
    let mut padding_top = 0.0;

    if scroll_offset >= min_row_height {
        let mut remaining = scroll_offset;
        while start_index + 1 < count {
            let height = heights.resolve(start_index);
            if remaining < height {
                break;
            }
            remaining -= height;
            padding_top += height;
            start_index += 1;
        }
    }

    let end_index = cmp::min(
        start_index
            .saturating_add(rows_per_viewport(viewport_height, min_row_height))
            .saturating_add(OVERSCAN),
        count - 1,
    );

    vtrace!(
        scroll_offset,
        start_index,
        end_index,
        padding_top,
        content_height,
        "compute_window"
    );

    WindowState {
        start_index,
        end_index,
        padding_top,
        content_height,
        count,
    }
}
