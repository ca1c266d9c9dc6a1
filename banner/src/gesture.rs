use crate::{
    AutoplayMode, AutoplayState, BannerView, ItemView, PageEvent, ScrollState, ScrollSurface,
};

/// Share of the viewport, in percent, below which a dragged page counts as left behind.
pub const SETTLE_THRESHOLD_PERCENT: i64 = 45;

/// Decides where a drag settles.
///
/// `item_end` is the end edge of the first visible item, relative to the viewport start. When
/// less than [`SETTLE_THRESHOLD_PERCENT`] of the viewport still shows that item, the carousel
/// moves on to the next one. Exactly at the threshold it stays.
pub fn settles_forward(item_end: i64, extent: u32) -> bool {
    item_end.saturating_mul(100) < i64::from(extent).saturating_mul(SETTLE_THRESHOLD_PERCENT)
}

impl<H: ItemView, S: ScrollSurface> BannerView<H, S> {
    /// Handles a scroll-state transition of the surface.
    ///
    /// Hosts whose surface reports transitions through [`ScrollSurface::poll`] do not need to
    /// call this; [`BannerView::tick`] does. Transitions arriving while the scroll listener is
    /// detached (during a settle, or after `destroy`) are ignored.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState, now_ms: u64) {
        if !self.listeners.scroll {
            return;
        }
        btrace!(?state, now_ms, "BannerView::on_scroll_state_changed");
        self.emit(PageEvent::ScrollStateChanged(state));

        // User input always preempts autoplay.
        if state == ScrollState::Dragging {
            self.autoplay.suspend();
            return;
        }

        match (self.options.mode, state) {
            (AutoplayMode::Stepped, ScrollState::Settling) => self.settle(now_ms),
            (AutoplayMode::Stepped, _) => self.realign(now_ms),
            (AutoplayMode::Paged, ScrollState::Idle) => self.page_idle(now_ms),
            (AutoplayMode::Paged, _) => {}
        }
    }

    /// Snaps a released drag to a whole page.
    fn settle(&mut self, now_ms: u64) {
        self.listeners.scroll = false;
        self.surface.stop_scroll();
        self.autoplay.suspend();

        if self.surface.first_completely_visible_position().is_none() {
            match self.surface.first_visible_position() {
                Some(position) => {
                    let extent = self.surface.viewport().extent(self.options.orientation);
                    let forward = self
                        .surface
                        .item_end(position)
                        .is_some_and(|end| settles_forward(end, extent));
                    let last = self.wrapper.item_count().saturating_sub(1);
                    let target = if forward {
                        position.saturating_add(1).min(last)
                    } else {
                        position
                    };
                    bdebug!(position, target, "settle");
                    self.current_index = target;
                    self.surface.smooth_scroll_to_position(target);
                    self.autoplay.resume(now_ms, self.options.effective_gap_ms());
                    self.emit_selected();
                }
                None => self.autoplay.resume(now_ms, self.options.effective_gap_ms()),
            }
        }

        self.listeners.scroll = true;
    }

    /// Re-reads the current page once scrolling stopped and resumes autoplay.
    fn realign(&mut self, now_ms: u64) {
        // The surface going idle between our own steps.
        if matches!(self.autoplay.state(), AutoplayState::Animating { .. }) {
            return;
        }
        let position = self
            .surface
            .last_completely_visible_position()
            .unwrap_or(self.current_index);
        let changed = position != self.current_index;
        self.current_index = position;
        self.surface.smooth_scroll_to_position(position);
        self.autoplay.resume(now_ms, self.options.effective_gap_ms());
        if changed {
            self.emit_selected();
        }
    }

    fn page_idle(&mut self, now_ms: u64) {
        if let Some(position) = self.surface.first_completely_visible_position() {
            if position != self.current_index {
                self.current_index = position;
                self.emit_selected();
            }
        }
        if matches!(self.autoplay.state(), AutoplayState::Paused { .. }) {
            self.autoplay.resume(now_ms, self.options.effective_gap_ms());
        }
    }
}
