use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::autoplay::Autoplay;
use crate::{
    AdapterChange, AdapterObserver, AdapterWrapper, AutoplayState, BannerError, BannerOptions,
    CarouselSnapshot, ItemView, ObserverId, Orientation, PageCallbackId, PageEvent,
    ScrollSurface, SharedAdapter,
};

/// Changes received from the adapter wrapper, applied to the surface on the next flush.
#[derive(Default)]
struct ChangeQueue {
    pending: RefCell<VecDeque<AdapterChange>>,
}

impl ChangeQueue {
    fn drain(&self) -> Vec<AdapterChange> {
        self.pending.borrow_mut().drain(..).collect()
    }

    fn clear(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl AdapterObserver for ChangeQueue {
    fn on_changed(&self, change: &AdapterChange) {
        self.pending.borrow_mut().push_back(change.clone());
    }
}

/// Registrations made in `init` and removed in `destroy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Listeners {
    pub scroll: bool,
    pub child_attach: bool,
    pub adapter: Option<ObserverId>,
}

/// A holder bound to a virtual position and currently laid out on the surface.
#[derive(Debug)]
pub struct AttachedItem<H> {
    position: usize,
    view_type: u32,
    holder: H,
}

impl<H> AttachedItem<H> {
    /// Virtual position.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn view_type(&self) -> u32 {
        self.view_type
    }

    pub fn holder(&self) -> &H {
        &self.holder
    }

    pub fn holder_mut(&mut self) -> &mut H {
        &mut self.holder
    }
}

type PageCallback = Rc<dyn Fn(&PageEvent)>;

/// An auto-rotating, infinitely wrapping banner carousel.
///
/// This type is headless: it owns a [`ScrollSurface`] and an [`AdapterWrapper`] and is driven
/// by the host:
/// - `tick(now_ms)` from a frame loop or timer (autoplay, surface transitions, adapter changes)
/// - `layout()` before rendering, to bind holders for the visible positions
/// - `on_scroll_state_changed` when the host observes scroll-state transitions itself
///
/// After [`BannerView::destroy`] every operation is a no-op.
pub struct BannerView<H, S> {
    pub(crate) options: BannerOptions,
    pub(crate) surface: S,
    pub(crate) wrapper: AdapterWrapper<H>,
    pub(crate) autoplay: Autoplay,
    /// Current virtual position.
    pub(crate) current_index: usize,
    pub(crate) listeners: Listeners,
    changes: Rc<ChangeQueue>,
    attached: Vec<AttachedItem<H>>,
    recycled: Vec<(u32, H)>,
    page_callbacks: Vec<(PageCallbackId, PageCallback)>,
    next_callback_id: u64,
    destroyed: bool,
}

impl<H: ItemView, S: ScrollSurface> BannerView<H, S> {
    /// Creates the view and registers its listeners.
    ///
    /// When `options.auto_start` is set, autoplay is scheduled relative to `now_ms`.
    pub fn new(options: BannerOptions, surface: S, now_ms: u64) -> Self {
        let mut view = Self {
            options,
            surface,
            wrapper: AdapterWrapper::new(),
            autoplay: Autoplay::default(),
            current_index: 0,
            listeners: Listeners::default(),
            changes: Rc::new(ChangeQueue::default()),
            attached: Vec::new(),
            recycled: Vec::new(),
            page_callbacks: Vec::new(),
            next_callback_id: 0,
            destroyed: false,
        };
        view.init(now_ms);
        view
    }

    fn init(&mut self, now_ms: u64) {
        bdebug!(
            mode = ?self.options.mode,
            gap_interval_ms = self.options.gap_interval_ms,
            scroll_duration_ms = self.options.scroll_duration_ms,
            orientation = ?self.options.orientation,
            auto_start = self.options.auto_start,
            "BannerView::new"
        );
        self.surface.set_orientation(self.options.orientation);
        self.listeners.scroll = true;
        self.listeners.child_attach = true;
        let observer: Rc<dyn AdapterObserver> = self.changes.clone();
        self.listeners.adapter = Some(self.wrapper.register_observer(observer));

        if self.options.auto_start {
            self.start(now_ms);
        }
    }

    pub fn options(&self) -> &BannerOptions {
        &self.options
    }

    /// Replaces the item adapter. `None` clears the carousel.
    ///
    /// The current position goes back to 0 and holders of the previous adapter are dropped. A
    /// stepped transition in flight ends; the next one starts a gap later.
    pub fn set_adapter(&mut self, adapter: Option<SharedAdapter<H>>) {
        if self.destroyed {
            return;
        }
        self.attached.clear();
        self.recycled.clear();
        self.wrapper.set_adapter(adapter);
        self.flush_changes();
        self.surface.scroll_to_position(0);
        self.current_index = 0;
        self.autoplay.abort_transition(self.options.effective_gap_ms());
    }

    pub fn adapter_wrapper(&self) -> &AdapterWrapper<H> {
        &self.wrapper
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    /// Ends a stepped transition in flight and puts the surface back on the current page.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.destroyed {
            return;
        }
        self.options.orientation = orientation;
        self.surface.set_orientation(orientation);
        if self.autoplay.abort_transition(self.options.effective_gap_ms()) {
            self.surface.scroll_to_position(self.current_index);
        }
    }

    pub fn gap_interval_ms(&self) -> u64 {
        self.options.gap_interval_ms
    }

    /// Takes effect from the next scheduled move.
    pub fn set_gap_interval_ms(&mut self, gap_interval_ms: u64) {
        self.options.gap_interval_ms = gap_interval_ms;
    }

    pub fn scroll_duration_ms(&self) -> u64 {
        self.options.scroll_duration_ms
    }

    pub fn set_scroll_duration_ms(&mut self, scroll_duration_ms: u64) {
        self.options.scroll_duration_ms = scroll_duration_ms;
    }

    /// Starts autoplay; the first move happens one gap interval after `now_ms`.
    ///
    /// Calling this while running does nothing.
    pub fn start(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        if self.autoplay.start(now_ms, self.options.effective_gap_ms()) {
            bdebug!(now_ms, "BannerView::start");
        }
    }

    /// Stops autoplay and cancels the pending move.
    pub fn stop(&mut self) {
        if self.autoplay.stop() {
            bdebug!("BannerView::stop");
        }
    }

    pub fn is_running(&self) -> bool {
        self.autoplay.state().is_running()
    }

    pub fn is_animating(&self) -> bool {
        self.autoplay.state().is_animating()
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Current virtual position.
    pub fn current_position(&self) -> usize {
        self.current_index
    }

    /// Index of the current item in the backing list.
    pub fn current_item(&self) -> usize {
        self.wrapper.real_position(self.current_index)
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        let state = self.autoplay.state();
        CarouselSnapshot {
            current_index: self.current_index,
            is_running: state.is_running(),
            is_animating: state.is_animating(),
            scrolled_distance: state.scrolled_distance(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Advances the carousel to `now_ms`.
    ///
    /// Order: pending adapter changes, surface scroll-state transitions, then every autoplay
    /// callback that came due. A drag observed in this tick therefore always cancels autoplay
    /// before it could move.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.flush_changes();
        while let Some(state) = self.surface.poll(now_ms) {
            self.on_scroll_state_changed(state, now_ms);
        }
        self.run_autoplay(now_ms);
    }

    /// Binds holders for the positions the surface currently shows.
    ///
    /// Holders that scrolled out are recycled and reused for the same view type. Every newly
    /// attached holder must fill the viewport on both axes; otherwise this fails with
    /// [`BannerError::ItemDoesNotFillViewport`].
    pub fn layout(&mut self) -> Result<(), BannerError> {
        if self.destroyed {
            return Ok(());
        }
        self.flush_changes();

        let count = self.wrapper.item_count();
        let visible = self.surface.visible_positions();
        let (keep, gone): (Vec<_>, Vec<_>) = mem::take(&mut self.attached)
            .into_iter()
            .partition(|item| item.position < count && visible.contains(&item.position));
        self.attached = keep;
        self.recycled
            .extend(gone.into_iter().map(|item| (item.view_type, item.holder)));

        for position in visible {
            if position >= count {
                break;
            }
            if self.attached.iter().any(|item| item.position == position) {
                continue;
            }
            let Some(view_type) = self.wrapper.item_view_type(position) else {
                break;
            };
            let recycled = self.take_recycled(view_type);
            let Some(mut holder) = recycled.or_else(|| self.wrapper.create_holder(view_type))
            else {
                break;
            };
            self.wrapper.bind_holder(&mut holder, position);
            self.on_child_attached(position, &holder)?;
            self.attached.push(AttachedItem {
                position,
                view_type,
                holder,
            });
        }
        self.attached.sort_by_key(|item| item.position);
        Ok(())
    }

    fn take_recycled(&mut self, view_type: u32) -> Option<H> {
        let index = self.recycled.iter().position(|(ty, _)| *ty == view_type)?;
        Some(self.recycled.swap_remove(index).1)
    }

    fn on_child_attached(&self, position: usize, holder: &H) -> Result<(), BannerError> {
        if !self.listeners.child_attach {
            return Ok(());
        }
        let params = holder.layout_params();
        if params.fills_parent() {
            return Ok(());
        }
        bwarn!(position, ?params, "item does not fill the banner");
        Err(BannerError::ItemDoesNotFillViewport { position, params })
    }

    /// Attached holders, ordered by position.
    pub fn attached(&self) -> &[AttachedItem<H>] {
        &self.attached
    }

    pub fn holder_at(&self, position: usize) -> Option<&H> {
        self.attached
            .iter()
            .find(|item| item.position == position)
            .map(|item| &item.holder)
    }

    pub fn holder_at_mut(&mut self, position: usize) -> Option<&mut H> {
        self.attached
            .iter_mut()
            .find(|item| item.position == position)
            .map(|item| &mut item.holder)
    }

    fn flush_changes(&mut self) {
        let changes = self.changes.drain();
        if changes.is_empty() {
            return;
        }
        let count = self.wrapper.item_count();
        for change in &changes {
            self.surface.on_adapter_changed(change, count);
        }

        // Bound data may be stale; rebind on the next layout.
        self.recycled.extend(
            self.attached
                .drain(..)
                .map(|item| (item.view_type, item.holder)),
        );

        // With at most one item left a stepped transition can never finish.
        let stranded =
            count <= 1 && matches!(self.autoplay.state(), AutoplayState::Animating { .. });
        let clamped = self.current_index.min(count.saturating_sub(1));
        if clamped != self.current_index || stranded {
            self.current_index = clamped;
            self.surface.scroll_to_position(clamped);
            if self.autoplay.abort_transition(self.options.effective_gap_ms()) {
                btrace!(position = clamped, "transition ended by adapter change");
            }
        }
    }

    pub fn register_page_change_callback(
        &mut self,
        callback: impl Fn(&PageEvent) + 'static,
    ) -> PageCallbackId {
        let id = PageCallbackId(self.next_callback_id);
        self.next_callback_id = self.next_callback_id.wrapping_add(1);
        if !self.destroyed {
            self.page_callbacks.push((id, Rc::new(callback)));
        }
        id
    }

    pub fn unregister_page_change_callback(&mut self, id: PageCallbackId) -> bool {
        let before = self.page_callbacks.len();
        self.page_callbacks.retain(|(other, _)| *other != id);
        self.page_callbacks.len() != before
    }

    pub(crate) fn emit(&self, event: PageEvent) {
        let callbacks: Vec<PageCallback> = self
            .page_callbacks
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(&event);
        }
    }

    pub(crate) fn emit_selected(&self) {
        self.emit(PageEvent::Selected {
            position: self.current_index,
            item: self.current_item(),
        });
    }

    /// Stops autoplay and removes every registration made in `new`.
    ///
    /// This also unsubscribes from the item adapter, so the caller's adapter no longer
    /// references the view.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.autoplay.stop();
        self.listeners.scroll = false;
        self.listeners.child_attach = false;
        if let Some(id) = self.listeners.adapter.take() {
            self.wrapper.unregister_observer(id);
        }
        self.wrapper.release();
        self.changes.clear();
        self.page_callbacks.clear();
        self.attached.clear();
        self.recycled.clear();
        self.destroyed = true;
        bdebug!("BannerView::destroy");
    }
}

impl<H, S: fmt::Debug> fmt::Debug for BannerView<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BannerView")
            .field("options", &self.options)
            .field("surface", &self.surface)
            .field("wrapper", &self.wrapper)
            .field("autoplay", &self.autoplay)
            .field("current_index", &self.current_index)
            .field("listeners", &self.listeners)
            .field("attached", &self.attached.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
