use core::ops::Range;
use std::collections::VecDeque;

use banner::{AdapterChange, Orientation, ScrollError, ScrollState, ScrollSurface, Size};

use crate::Tween;

/// Default duration of an animated page move, in milliseconds.
pub const DEFAULT_SMOOTH_SCROLL_MS: u64 = 250;

/// A simulated scroll surface laying out one page per viewport.
///
/// This type does not hold any UI objects. It keeps a pixel offset along the active axis and
/// is driven by:
/// - `begin_drag` / `drag_by` / `release` for user input
/// - `poll(now_ms)` (usually through `BannerView::tick`) to advance animated moves
///
/// Only transitions caused by the user, and the end of an animated move, are reported by
/// `poll`. Transitions caused by the carousel's own calls are not echoed back.
#[derive(Clone, Debug)]
pub struct PagedTrack {
    viewport: Size,
    orientation: Orientation,
    offset: u64,
    item_count: usize,
    tween: Option<Tween>,
    state: ScrollState,
    transitions: VecDeque<ScrollState>,
    smooth_scroll_ms: u64,
    now_ms: u64,
}

impl PagedTrack {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            orientation: Orientation::Horizontal,
            offset: 0,
            item_count: 0,
            tween: None,
            state: ScrollState::Idle,
            transitions: VecDeque::new(),
            smooth_scroll_ms: DEFAULT_SMOOTH_SCROLL_MS,
            now_ms: 0,
        }
    }

    pub fn with_smooth_scroll_ms(mut self, smooth_scroll_ms: u64) -> Self {
        self.smooth_scroll_ms = smooth_scroll_ms;
        self
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        let page = self.page_at_offset();
        self.viewport = viewport;
        self.tween = None;
        self.offset = self.clamp_offset(page.saturating_mul(self.extent()));
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether the offset sits exactly on a page boundary.
    pub fn is_aligned(&self) -> bool {
        let extent = self.extent();
        extent > 0 && self.offset % extent == 0
    }

    /// User touches the content.
    pub fn begin_drag(&mut self) {
        self.tween = None;
        self.report(ScrollState::Dragging);
    }

    /// User moves the content by `delta` pixels along the active axis.
    pub fn drag_by(&mut self, delta: i64) {
        let next = i128::from(self.offset) + i128::from(delta);
        let next = u64::try_from(next.max(0)).unwrap_or(u64::MAX);
        self.offset = self.clamp_offset(next);
    }

    /// User lifts the finger.
    ///
    /// An unaligned release snaps to the nearest page; the carousel may override the target
    /// while the surface is settling.
    pub fn release(&mut self) {
        if self.state != ScrollState::Dragging {
            return;
        }
        if self.is_aligned() || self.item_count == 0 {
            self.report(ScrollState::Idle);
            return;
        }
        let extent = self.extent();
        let nearest = (self.offset + extent / 2) / extent;
        let target = self.clamp_offset(nearest.saturating_mul(extent));
        self.tween = Some(Tween::new(
            self.offset,
            target,
            self.now_ms,
            self.smooth_scroll_ms,
        ));
        self.report(ScrollState::Settling);
    }

    fn extent(&self) -> u64 {
        u64::from(self.viewport.extent(self.orientation))
    }

    fn page_at_offset(&self) -> u64 {
        match self.extent() {
            0 => 0,
            extent => self.offset / extent,
        }
    }

    fn max_offset(&self) -> u64 {
        let pages = u64::try_from(self.item_count.saturating_sub(1)).unwrap_or(u64::MAX);
        pages.saturating_mul(self.extent())
    }

    fn clamp_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_offset())
    }

    fn position_offset(&self, position: usize) -> u64 {
        let position = u64::try_from(position).unwrap_or(u64::MAX);
        self.clamp_offset(position.saturating_mul(self.extent()))
    }

    fn report(&mut self, state: ScrollState) {
        if self.state != state {
            self.state = state;
            self.transitions.push_back(state);
        }
    }

    fn finish_tween(&mut self) {
        if let Some(tween) = self.tween.take() {
            self.offset = self.clamp_offset(tween.to);
            if self.state == ScrollState::Settling {
                self.state = ScrollState::Idle;
            }
        }
    }

    fn to_position(offset: u64) -> usize {
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

impl ScrollSurface for PagedTrack {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation == orientation {
            return;
        }
        let page = self.page_at_offset();
        self.orientation = orientation;
        self.tween = None;
        self.offset = self.clamp_offset(page.saturating_mul(self.extent()));
    }

    fn scroll_to_position(&mut self, position: usize) {
        self.tween = None;
        self.offset = self.position_offset(position);
        if self.state == ScrollState::Settling {
            self.state = ScrollState::Idle;
        }
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.finish_tween();
        let delta = match self.orientation {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        };
        let next = i64::try_from(self.offset)
            .unwrap_or(i64::MAX)
            .saturating_add(i64::from(delta))
            .max(0);
        self.offset = self.clamp_offset(u64::try_from(next).unwrap_or(0));
    }

    fn smooth_scroll_to_position(&mut self, position: usize) {
        let target = self.position_offset(position);
        let (now_ms, duration_ms) = (self.now_ms, self.smooth_scroll_ms);
        if let Some(tween) = &mut self.tween {
            tween.retarget(now_ms, target, duration_ms);
        } else if target == self.offset {
            return;
        } else {
            self.tween = Some(Tween::new(self.offset, target, now_ms, duration_ms));
        }
        self.state = ScrollState::Settling;
    }

    fn set_current_item(&mut self, position: usize) -> Result<(), ScrollError> {
        if self.state == ScrollState::Dragging {
            return Err(ScrollError::Busy);
        }
        if position >= self.item_count {
            return Err(ScrollError::OutOfRange {
                position,
                count: self.item_count,
            });
        }
        self.smooth_scroll_to_position(position);
        Ok(())
    }

    fn stop_scroll(&mut self) {
        if let Some(tween) = self.tween.take() {
            self.offset = self.clamp_offset(tween.sample(self.now_ms));
        }
        if self.state == ScrollState::Settling {
            self.state = ScrollState::Idle;
        }
    }

    fn first_visible_position(&self) -> Option<usize> {
        if self.item_count == 0 || self.extent() == 0 {
            return None;
        }
        Some(Self::to_position(self.page_at_offset()))
    }

    fn first_completely_visible_position(&self) -> Option<usize> {
        if self.item_count == 0 || !self.is_aligned() {
            return None;
        }
        Some(Self::to_position(self.page_at_offset()))
    }

    fn last_completely_visible_position(&self) -> Option<usize> {
        // One page per viewport: the first and last completely visible items coincide.
        self.first_completely_visible_position()
    }

    fn item_end(&self, position: usize) -> Option<i64> {
        if position >= self.item_count || self.extent() == 0 {
            return None;
        }
        let end = i128::from(u64::try_from(position).ok()?.saturating_add(1))
            * i128::from(self.extent());
        i64::try_from(end - i128::from(self.offset)).ok()
    }

    fn visible_positions(&self) -> Range<usize> {
        let extent = self.extent();
        if self.item_count == 0 || extent == 0 {
            return 0..0;
        }
        let first = Self::to_position(self.offset / extent);
        let end = Self::to_position(self.offset.saturating_add(extent).div_ceil(extent));
        first..end.min(self.item_count)
    }

    fn on_adapter_changed(&mut self, _change: &AdapterChange, item_count: usize) {
        self.item_count = item_count;
        self.offset = self.clamp_offset(self.offset);
        let max = self.max_offset();
        if let Some(tween) = &mut self.tween {
            tween.to = tween.to.min(max);
        }
    }

    fn poll(&mut self, now_ms: u64) -> Option<ScrollState> {
        self.now_ms = now_ms;
        if let Some(tween) = self.tween {
            self.offset = self.clamp_offset(tween.sample(now_ms));
            if tween.is_done(now_ms) {
                self.tween = None;
                self.report(ScrollState::Idle);
            }
        }
        self.transitions.pop_front()
    }
}
