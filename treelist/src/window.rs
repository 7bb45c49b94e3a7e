use crate::{ScrollMetrics, WindowRange};

/// Default row height, in scroll-axis units.
pub const DEFAULT_ROW_HEIGHT: u32 = 36;
/// Default number of extra rows materialized on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 40;

/// Computes the range of rows to materialize for a fixed-row-height list.
///
/// - `start = max(0, floor(scroll_offset / row_height) - overscan)`
/// - `end = min(total_rows, ceil((scroll_offset + viewport_height) / row_height) + overscan)`
///
/// `start` is clamped to `end`, so an offset past the end of the list yields an empty range.
/// A zero `row_height` cannot be windowed and yields the full range.
pub fn compute_window(
    scroll_offset: u64,
    viewport_height: u32,
    row_height: u32,
    total_rows: usize,
    overscan: usize,
) -> WindowRange {
    if row_height == 0 {
        return WindowRange::new(0, total_rows);
    }
    let rh = row_height as u64;
    let first = to_index(scroll_offset / rh);
    let last = to_index(
        scroll_offset
            .saturating_add(viewport_height as u64)
            .div_ceil(rh),
    );

    let start = first.saturating_sub(overscan);
    let end = last.saturating_add(overscan).min(total_rows);
    WindowRange::new(start, end)
}

/// The rows intersecting the viewport, without overscan.
pub fn visible_rows_range(
    scroll_offset: u64,
    viewport_height: u32,
    row_height: u32,
    total_rows: usize,
) -> WindowRange {
    compute_window(scroll_offset, viewport_height, row_height, total_rows, 0)
}

/// Largest scroll offset at which the viewport is still filled with rows.
pub fn max_scroll_offset(total_rows: usize, row_height: u32, viewport_height: u32) -> u64 {
    (total_rows as u64)
        .saturating_mul(row_height as u64)
        .saturating_sub(viewport_height as u64)
}

/// Clamps `offset` into `0..=max_scroll_offset(..)`.
pub fn clamp_scroll_offset(
    offset: u64,
    total_rows: usize,
    row_height: u32,
    viewport_height: u32,
) -> u64 {
    offset.min(max_scroll_offset(total_rows, row_height, viewport_height))
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

/// Windowing configuration.
///
/// With `windowing = false` every row is materialized. This still goes through
/// [`compute_window`], with an unbounded overscan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    pub row_height: u32,
    pub overscan: usize,
    pub windowing: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT)
    }
}

impl WindowConfig {
    pub fn new(row_height: u32) -> Self {
        Self {
            row_height,
            overscan: DEFAULT_OVERSCAN,
            windowing: true,
        }
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_windowing(mut self, windowing: bool) -> Self {
        self.windowing = windowing;
        self
    }

    fn effective_overscan(&self) -> usize {
        if self.windowing {
            self.overscan
        } else {
            usize::MAX
        }
    }

    pub fn window(&self, metrics: ScrollMetrics, total_rows: usize) -> WindowRange {
        let range = compute_window(
            metrics.offset,
            metrics.viewport_height,
            self.row_height,
            total_rows,
            self.effective_overscan(),
        );
        vtrace!(
            offset = metrics.offset,
            viewport_height = metrics.viewport_height,
            total_rows,
            start = range.start,
            end = range.end,
            "WindowConfig::window"
        );
        range
    }

    /// Offset of the top edge of row `index`.
    pub fn row_offset(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.row_height as u64)
    }

    pub fn max_scroll_offset(&self, total_rows: usize, viewport_height: u32) -> u64 {
        max_scroll_offset(total_rows, self.row_height, viewport_height)
    }

    pub fn clamp_scroll_offset(&self, offset: u64, total_rows: usize, viewport_height: u32) -> u64 {
        clamp_scroll_offset(offset, total_rows, self.row_height, viewport_height)
    }
}
