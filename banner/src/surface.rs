use core::ops::Range;

use crate::{AdapterChange, Orientation, ScrollError, ScrollState, Size};

/// The scrollable child the carousel drives.
///
/// Positions are virtual (see [`crate::AdapterWrapper`]). A surface lays items out one page
/// per viewport along its orientation.
///
/// The carousel never holds a reference back into the host: transitions the user causes on the
/// surface are reported through [`ScrollSurface::poll`] (or forwarded by the host with
/// [`crate::BannerView::on_scroll_state_changed`]).
pub trait ScrollSurface {
    fn viewport(&self) -> Size;

    fn set_orientation(&mut self, orientation: Orientation);

    /// Moves to `position` immediately.
    fn scroll_to_position(&mut self, position: usize);

    /// Moves the content by a pixel delta, without changing the scroll state.
    fn scroll_by(&mut self, dx: i32, dy: i32);

    /// Starts an animated move to `position`.
    fn smooth_scroll_to_position(&mut self, position: usize);

    /// Paging jump to `position`, animated by the surface.
    fn set_current_item(&mut self, position: usize) -> Result<(), ScrollError>;

    /// Cancels any animated move in progress.
    fn stop_scroll(&mut self);

    fn first_visible_position(&self) -> Option<usize>;

    fn first_completely_visible_position(&self) -> Option<usize>;

    fn last_completely_visible_position(&self) -> Option<usize>;

    /// End edge of the item at `position` along the scroll axis, relative to the viewport
    /// start. `None` when the item is not laid out.
    fn item_end(&self, position: usize) -> Option<i64>;

    /// Positions intersecting the viewport.
    fn visible_positions(&self) -> Range<usize>;

    /// Called with every change forwarded by the adapter wrapper. `item_count` is the count the
    /// wrapper exposes after the change.
    fn on_adapter_changed(&mut self, _change: &AdapterChange, _item_count: usize) {}

    /// Advances surface-driven animations to `now_ms` and returns the next pending scroll-state
    /// transition, if any.
    fn poll(&mut self, _now_ms: u64) -> Option<ScrollState> {
        None
    }
}
