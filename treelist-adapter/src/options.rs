use treelist::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, WindowConfig};

/// Configuration for [`crate::Navigator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorOptions {
    /// Fixed height of every row, in scroll-axis units.
    pub row_height: u32,
    /// Extra rows materialized above and below the viewport.
    pub overscan: usize,
    /// When `false`, every row is materialized regardless of scroll position.
    pub windowing: bool,
    /// Drop expansion flags of ids that disappeared from the node collection on tree change.
    pub prune_stale_expansion: bool,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            windowing: true,
            prune_stale_expansion: true,
        }
    }
}

impl NavigatorOptions {
    pub fn new(row_height: u32) -> Self {
        Self {
            row_height,
            ..Self::default()
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

    pub fn with_prune_stale_expansion(mut self, prune: bool) -> Self {
        self.prune_stale_expansion = prune;
        self
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.row_height)
            .with_overscan(self.overscan)
            .with_windowing(self.windowing)
    }
}
