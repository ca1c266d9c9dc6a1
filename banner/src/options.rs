use crate::{AutoplayMode, Orientation};

/// Default autoplay interval for [`AutoplayMode::Paged`], in milliseconds.
pub const DEFAULT_PAGED_GAP_INTERVAL_MS: u64 = 1000;
/// Default autoplay interval for [`AutoplayMode::Stepped`], in milliseconds.
pub const DEFAULT_STEPPED_GAP_INTERVAL_MS: u64 = 3000;
/// Default duration of one stepped page transition, in milliseconds.
pub const DEFAULT_SCROLL_DURATION_MS: u64 = 500;
/// Cadence of the incremental scroll steps in [`AutoplayMode::Stepped`], in milliseconds.
pub const STEP_INTERVAL_MS: u64 = 10;

/// Configuration for [`crate::BannerView`].
///
/// Only `gap_interval_ms`, `scroll_duration_ms` and `orientation` can change after
/// construction, through the view's setters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BannerOptions {
    pub mode: AutoplayMode,
    /// Pause between two autoplay moves.
    pub gap_interval_ms: u64,
    /// Duration of one stepped page transition. Ignored by [`AutoplayMode::Paged`].
    pub scroll_duration_ms: u64,
    pub orientation: Orientation,
    /// Starts autoplay as soon as the view is created.
    pub auto_start: bool,
}

impl BannerOptions {
    /// Creates options with the defaults of `mode`.
    pub fn new(mode: AutoplayMode) -> Self {
        let gap_interval_ms = match mode {
            AutoplayMode::Paged => DEFAULT_PAGED_GAP_INTERVAL_MS,
            AutoplayMode::Stepped => DEFAULT_STEPPED_GAP_INTERVAL_MS,
        };
        Self {
            mode,
            gap_interval_ms,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            orientation: Orientation::Horizontal,
            auto_start: true,
        }
    }

    pub fn paged() -> Self {
        Self::new(AutoplayMode::Paged)
    }

    pub fn stepped() -> Self {
        Self::new(AutoplayMode::Stepped)
    }

    pub fn with_gap_interval_ms(mut self, gap_interval_ms: u64) -> Self {
        self.gap_interval_ms = gap_interval_ms;
        self
    }

    pub fn with_scroll_duration_ms(mut self, scroll_duration_ms: u64) -> Self {
        self.scroll_duration_ms = scroll_duration_ms;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Interval actually used for scheduling; never zero.
    pub(crate) fn effective_gap_ms(&self) -> u64 {
        self.gap_interval_ms.max(1)
    }
}

impl Default for BannerOptions {
    fn default() -> Self {
        Self::new(AutoplayMode::default())
    }
}
