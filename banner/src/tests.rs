use crate::*;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

#[derive(Debug)]
struct TestHolder {
    view_type: u32,
    bound: Option<(usize, &'static str)>,
    params: LayoutParams,
}

impl ItemView for TestHolder {
    fn layout_params(&self) -> LayoutParams {
        self.params
    }
}

struct TestAdapter {
    items: RefCell<Vec<&'static str>>,
    observers: ObserverSet,
    binds: RefCell<Vec<usize>>,
    params: Cell<LayoutParams>,
}

impl TestAdapter {
    fn new(items: &[&'static str]) -> Rc<Self> {
        Rc::new(Self {
            items: RefCell::new(items.to_vec()),
            observers: ObserverSet::new(),
            binds: RefCell::new(Vec::new()),
            params: Cell::new(LayoutParams::MATCH_PARENT),
        })
    }

    fn set_items(&self, items: &[&'static str]) {
        *self.items.borrow_mut() = items.to_vec();
        self.observers.notify(&AdapterChange::Reset);
    }

    fn emit(&self, change: AdapterChange) {
        self.observers.notify(&change);
    }
}

impl ItemAdapter for TestAdapter {
    type Holder = TestHolder;

    fn item_count(&self) -> usize {
        self.items.borrow().len()
    }

    fn create_holder(&self, view_type: u32) -> TestHolder {
        TestHolder {
            view_type,
            bound: None,
            params: self.params.get(),
        }
    }

    fn bind_holder(&self, holder: &mut TestHolder, index: usize) {
        self.binds.borrow_mut().push(index);
        holder.bound = Some((index, self.items.borrow()[index]));
    }

    fn register_observer(&self, observer: Rc<dyn AdapterObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    fn unregister_observer(&self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Orientation(Orientation),
    ScrollTo(usize),
    ScrollBy(i32, i32),
    Smooth(usize),
    Jump(usize),
    Stop,
}

#[derive(Debug)]
struct MockSurface {
    viewport: Size,
    calls: Vec<Call>,
    changes: Vec<(AdapterChange, usize)>,
    states: VecDeque<ScrollState>,
    failing_jumps: usize,
    first_visible: Option<usize>,
    first_complete: Option<usize>,
    last_complete: Option<usize>,
    item_end: Option<i64>,
    visible: Range<usize>,
}

impl MockSurface {
    fn new() -> Self {
        Self {
            viewport: Size::new(1000, 400),
            calls: Vec::new(),
            changes: Vec::new(),
            states: VecDeque::new(),
            failing_jumps: 0,
            first_visible: Some(0),
            first_complete: Some(0),
            last_complete: Some(0),
            item_end: None,
            visible: 0..1,
        }
    }

    fn jumps(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Jump(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn scrolled(&self) -> (i64, i64) {
        self.calls.iter().fold((0, 0), |(x, y), c| match c {
            Call::ScrollBy(dx, dy) => (x + i64::from(*dx), y + i64::from(*dy)),
            _ => (x, y),
        })
    }

    fn count_smooth(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Smooth(_)))
            .count()
    }
}

impl ScrollSurface for MockSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.calls.push(Call::Orientation(orientation));
    }

    fn scroll_to_position(&mut self, position: usize) {
        self.calls.push(Call::ScrollTo(position));
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.calls.push(Call::ScrollBy(dx, dy));
    }

    fn smooth_scroll_to_position(&mut self, position: usize) {
        self.calls.push(Call::Smooth(position));
    }

    fn set_current_item(&mut self, position: usize) -> Result<(), ScrollError> {
        self.calls.push(Call::Jump(position));
        if self.failing_jumps > 0 {
            self.failing_jumps -= 1;
            return Err(ScrollError::Busy);
        }
        Ok(())
    }

    fn stop_scroll(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn first_visible_position(&self) -> Option<usize> {
        self.first_visible
    }

    fn first_completely_visible_position(&self) -> Option<usize> {
        self.first_complete
    }

    fn last_completely_visible_position(&self) -> Option<usize> {
        self.last_complete
    }

    fn item_end(&self, _position: usize) -> Option<i64> {
        self.item_end
    }

    fn visible_positions(&self) -> Range<usize> {
        self.visible.clone()
    }

    fn on_adapter_changed(&mut self, change: &AdapterChange, item_count: usize) {
        self.changes.push((change.clone(), item_count));
    }

    fn poll(&mut self, _now_ms: u64) -> Option<ScrollState> {
        self.states.pop_front()
    }
}

type TestView = BannerView<TestHolder, MockSurface>;

fn view_with(options: BannerOptions, items: &[&'static str]) -> (TestView, Rc<TestAdapter>) {
    let adapter = TestAdapter::new(items);
    let mut view = BannerView::new(options, MockSurface::new(), 0);
    view.set_adapter(Some(adapter.clone()));
    view.surface_mut().calls.clear();
    (view, adapter)
}

fn paged(items: &[&'static str]) -> (TestView, Rc<TestAdapter>) {
    view_with(
        BannerOptions::paged()
            .with_gap_interval_ms(1000)
            .with_auto_start(false),
        items,
    )
}

fn stepped(items: &[&'static str]) -> (TestView, Rc<TestAdapter>) {
    view_with(
        BannerOptions::stepped()
            .with_gap_interval_ms(1000)
            .with_scroll_duration_ms(500)
            .with_auto_start(false),
        items,
    )
}

fn recorder() -> (Rc<RefCell<Vec<AdapterChange>>>, Rc<dyn AdapterObserver>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observer: Rc<dyn AdapterObserver> = Rc::new({
        let seen = Rc::clone(&seen);
        move |change: &AdapterChange| seen.borrow_mut().push(change.clone())
    });
    (seen, observer)
}

#[test]
fn real_position_is_modulo_for_multi_item_lists() {
    for size in 2..7usize {
        for v in 0..50usize {
            let real = real_position(v, size);
            assert_eq!(real, v % size);
            assert_eq!(real_position(v, size), real);
            assert!(real < size);
        }
    }
    assert_eq!(
        real_position(UNBOUNDED_ITEM_COUNT - 1, 3),
        (UNBOUNDED_ITEM_COUNT - 1) % 3
    );
}

#[test]
fn real_position_handles_single_and_empty_lists() {
    for v in [0usize, 1, 17, 1_000_000] {
        assert_eq!(real_position(v, 1), 0);
        assert_eq!(real_position(v, 0), v);
    }
}

#[test]
fn wrapper_item_count_depends_on_backing_size() {
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    assert_eq!(wrapper.item_count(), 0);

    wrapper.set_adapter(Some(TestAdapter::new(&[])));
    assert_eq!(wrapper.item_count(), 0);

    wrapper.set_adapter(Some(TestAdapter::new(&["A"])));
    assert_eq!(wrapper.item_count(), 1);

    wrapper.set_adapter(Some(TestAdapter::new(&["A", "B", "C"])));
    assert_eq!(wrapper.item_count(), UNBOUNDED_ITEM_COUNT);
    assert_eq!(wrapper.backing_count(), 3);
}

#[test]
fn wrapper_never_binds_an_empty_list() {
    let adapter = TestAdapter::new(&[]);
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    wrapper.set_adapter(Some(adapter.clone()));

    assert_eq!(wrapper.item_view_type(0), None);
    let mut holder = adapter.create_holder(0);
    assert!(!wrapper.bind_holder(&mut holder, 0));
    assert!(!wrapper.bind_holder(&mut holder, 5));
    assert!(adapter.binds.borrow().is_empty());
}

#[test]
fn wrapper_binds_through_real_position() {
    let adapter = TestAdapter::new(&["A", "B", "C"]);
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    wrapper.set_adapter(Some(adapter.clone()));

    let mut holder = wrapper.create_holder(0).unwrap();
    assert!(wrapper.bind_holder(&mut holder, 7));
    assert_eq!(holder.bound, Some((1, "B")));
    assert!(wrapper.bind_holder(&mut holder, 3));
    assert_eq!(holder.bound, Some((0, "A")));
    assert_eq!(*adapter.binds.borrow(), vec![1, 0]);
}

#[test]
fn wrapper_forwards_changes_verbatim() {
    let adapter = TestAdapter::new(&["A", "B", "C"]);
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    let (seen, observer) = recorder();
    wrapper.register_observer(observer);
    wrapper.set_adapter(Some(adapter.clone()));

    let payload = Payload::new("title");
    let changes = vec![
        AdapterChange::Reset,
        AdapterChange::RangeChanged {
            start: 1,
            count: 2,
            payload: None,
        },
        AdapterChange::RangeChanged {
            start: 0,
            count: 1,
            payload: Some(payload.clone()),
        },
        AdapterChange::RangeInserted { start: 3, count: 4 },
        AdapterChange::RangeRemoved { start: 2, count: 1 },
        AdapterChange::RangeMoved {
            from: 0,
            to: 2,
            count: 1,
        },
    ];
    for change in &changes {
        adapter.emit(change.clone());
    }

    let seen = seen.borrow();
    // The first reset comes from set_adapter itself.
    assert_eq!(seen[0], AdapterChange::Reset);
    assert_eq!(&seen[1..], &changes[..]);
    match &seen[3] {
        AdapterChange::RangeChanged {
            payload: Some(p), ..
        } => {
            assert!(p.ptr_eq(&payload));
            assert_eq!(p.downcast_ref::<&str>(), Some(&"title"));
        }
        other => panic!("unexpected change {other:?}"),
    }
}

#[test]
fn set_adapter_replaces_the_subscription() {
    let first = TestAdapter::new(&["A", "B"]);
    let second = TestAdapter::new(&["X", "Y", "Z"]);
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    let (seen, observer) = recorder();
    wrapper.register_observer(observer);

    wrapper.set_adapter(Some(first.clone()));
    assert_eq!(first.observers.len(), 1);
    wrapper.set_adapter(Some(second.clone()));
    assert_eq!(first.observers.len(), 0);
    assert_eq!(second.observers.len(), 1);

    seen.borrow_mut().clear();
    first.emit(AdapterChange::RangeInserted { start: 0, count: 1 });
    assert!(seen.borrow().is_empty());

    second.emit(AdapterChange::RangeRemoved { start: 0, count: 1 });
    assert_eq!(
        *seen.borrow(),
        vec![AdapterChange::RangeRemoved { start: 0, count: 1 }]
    );

    // Setting the same adapter again must not stack subscriptions either.
    wrapper.set_adapter(Some(second.clone()));
    assert_eq!(second.observers.len(), 1);
}

#[test]
fn set_adapter_none_clears_content() {
    let adapter = TestAdapter::new(&["A", "B"]);
    let mut wrapper = AdapterWrapper::<TestHolder>::new();
    wrapper.set_adapter(Some(adapter.clone()));
    wrapper.set_adapter(None);

    assert_eq!(wrapper.item_count(), 0);
    assert!(!wrapper.is_subscribed());
    assert!(wrapper.create_holder(0).is_none());
    assert_eq!(adapter.observers.len(), 0);
}

#[test]
fn start_then_stop_cancels_the_pending_move() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    view.stop();
    assert!(!view.is_running());

    for now in [500, 1000, 5_000, 100_000] {
        view.tick(now);
    }
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().jumps().is_empty());
}

#[test]
fn start_is_idempotent() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    view.start(500);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 1000 }
    );

    view.tick(1000);
    assert_eq!(view.current_position(), 1);
    view.tick(1500);
    assert_eq!(view.current_position(), 1);
}

#[test]
fn auto_start_schedules_on_creation() {
    let view: TestView = BannerView::new(BannerOptions::paged(), MockSurface::new(), 250);
    assert!(view.is_running());
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled {
            due_ms: 250 + DEFAULT_PAGED_GAP_INTERVAL_MS
        }
    );
    assert_eq!(
        view.surface().calls.first(),
        Some(&Call::Orientation(Orientation::Horizontal))
    );
}

#[test]
fn drag_cancels_pending_autoplay() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    view.tick(400);

    view.surface_mut().states.push_back(ScrollState::Dragging);
    view.tick(1000);

    assert_eq!(view.current_position(), 0);
    assert!(view.surface().jumps().is_empty());
    assert!(view.is_running());
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Paused {
            resume_animation: false
        }
    );

    view.tick(10_000);
    assert!(view.surface().jumps().is_empty());
}

#[test]
fn single_item_tick_does_not_move() {
    let (mut view, _adapter) = paged(&["A"]);
    assert_eq!(view.adapter_wrapper().item_count(), 1);
    view.start(0);

    view.tick(1000);
    view.tick(2000);
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().jumps().is_empty());
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 3000 }
    );
}

#[test]
fn three_items_advance_once_per_interval() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.start(0);

    view.tick(999);
    assert_eq!(view.current_position(), 0);
    view.tick(1000);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.current_item(), 1);

    view.tick(2000);
    view.tick(3000);
    assert_eq!(view.current_position(), 3);
    assert_eq!(view.current_item(), 0);
    assert_eq!(view.surface().jumps(), vec![1, 2, 3]);
}

#[test]
fn late_tick_moves_a_single_page() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    let selected = Rc::new(Cell::new(0));
    view.register_page_change_callback({
        let selected = Rc::clone(&selected);
        move |e: &PageEvent| {
            if matches!(e, PageEvent::Selected { .. }) {
                selected.set(selected.get() + 1);
            }
        }
    });
    view.start(0);
    view.tick(16);

    // The host stalled for a minute.
    view.tick(60_016);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.surface().jumps(), vec![1]);
    assert_eq!(selected.get(), 1);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 61_016 }
    );
}

#[test]
fn late_tick_catches_up_animation_steps_only() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);

    view.tick(10_000);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.surface().scrolled(), (1000, 0));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 11_000 }
    );
}

#[test]
fn failed_jumps_are_swallowed_and_retried() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.surface_mut().failing_jumps = 1;
    view.start(0);

    view.tick(1000);
    assert_eq!(view.current_position(), 0);
    assert!(view.is_running());

    view.tick(2000);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.surface().jumps(), vec![1, 1]);
}

#[test]
fn zero_gap_still_terminates() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.set_gap_interval_ms(0);
    view.start(0);
    view.tick(5);
    assert_eq!(view.current_position(), 1);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 6 }
    );

    view.tick(6);
    view.tick(7);
    assert_eq!(view.current_position(), 3);
    assert_eq!(view.current_item(), 0);
}

#[test]
fn stepped_animation_covers_exactly_one_page() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);

    view.tick(1000);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Animating {
            due_ms: 1010,
            scrolled: 20
        }
    );
    assert!(view.is_animating());
    assert_eq!(view.current_position(), 0);

    // 1000 px / (500 ms / 10 ms) = 20 px per step, 50 steps.
    view.tick(1480);
    assert_eq!(view.current_position(), 0);
    assert_eq!(view.snapshot().scrolled_distance, 980);

    view.tick(1490);
    assert_eq!(view.current_position(), 1);
    assert!(!view.is_animating());
    assert_eq!(view.surface().scrolled(), (1000, 0));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 2490 }
    );
}

#[test]
fn stepped_last_step_is_clamped_to_the_page() {
    let (mut view, _adapter) = stepped(&["A", "B"]);
    view.surface_mut().viewport = Size::new(1080, 1920);
    view.start(0);

    // 1080 px / 50 steps = 21 px; 51 full steps leave 9 px for the last one.
    view.tick(1600);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.surface().scrolled(), (1080, 0));
    let last = view.surface().calls.last().cloned();
    assert_eq!(last, Some(Call::ScrollBy(9, 0)));
}

#[test]
fn stepped_vertical_scrolls_on_the_y_axis() {
    let (mut view, _adapter) = stepped(&["A", "B"]);
    view.set_orientation(Orientation::Vertical);
    assert_eq!(view.orientation(), Orientation::Vertical);
    view.start(0);

    view.tick(2000);
    assert_eq!(view.surface().scrolled(), (0, 400));
    assert_eq!(view.current_position(), 1);
}

#[test]
fn stepped_with_one_item_waits() {
    let (mut view, _adapter) = stepped(&["A"]);
    view.start(0);
    view.tick(1000);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 2000 }
    );
    assert_eq!(view.surface().scrolled(), (0, 0));
}

#[test]
fn settle_threshold_rule() {
    assert!(settles_forward(400, 1000));
    assert!(settles_forward(449, 1000));
    assert!(!settles_forward(450, 1000));
    assert!(!settles_forward(500, 1000));
    assert!(!settles_forward(0, 0));
}

fn drag_and_release(view: &mut TestView, first_visible: usize, item_end: i64, now: u64) {
    let surface = view.surface_mut();
    surface.first_complete = None;
    surface.last_complete = None;
    surface.first_visible = Some(first_visible);
    surface.item_end = Some(item_end);
    surface.states.push_back(ScrollState::Dragging);
    surface.states.push_back(ScrollState::Settling);
    view.tick(now);
}

#[test]
fn settle_advances_when_less_than_threshold_remains() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    drag_and_release(&mut view, 4, 400, 300);

    assert_eq!(view.current_position(), 5);
    assert!(view.surface().calls.contains(&Call::Stop));
    assert!(view.surface().calls.contains(&Call::Smooth(5)));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 1300 }
    );
}

#[test]
fn settle_goes_back_when_more_than_threshold_remains() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    drag_and_release(&mut view, 4, 500, 300);

    assert_eq!(view.current_position(), 4);
    assert!(view.surface().calls.contains(&Call::Smooth(4)));
}

#[test]
fn settle_exactly_at_threshold_stays() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    drag_and_release(&mut view, 2, 450, 300);
    assert_eq!(view.current_position(), 2);
    assert!(!view.is_running());
}

#[test]
fn settle_on_aligned_page_does_nothing_and_keeps_listening() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    {
        let surface = view.surface_mut();
        surface.first_complete = Some(2);
        surface.last_complete = Some(2);
        surface.states.push_back(ScrollState::Dragging);
        surface.states.push_back(ScrollState::Settling);
    }
    view.tick(300);
    assert_eq!(view.surface().count_smooth(), 0);
    assert_eq!(view.current_position(), 0);

    // The idle transition that follows is still observed.
    view.surface_mut().states.push_back(ScrollState::Idle);
    view.tick(400);
    assert_eq!(view.current_position(), 2);
    assert!(view.surface().calls.contains(&Call::Smooth(2)));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 1400 }
    );
}

#[test]
fn settle_mid_animation_resumes_immediately() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    view.tick(1100);
    assert!(view.is_animating());

    view.surface_mut().states.push_back(ScrollState::Dragging);
    view.tick(1105);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Paused {
            resume_animation: true
        }
    );

    {
        let surface = view.surface_mut();
        surface.first_complete = None;
        surface.first_visible = Some(0);
        surface.item_end = Some(300);
        surface.states.push_back(ScrollState::Settling);
    }
    view.surface_mut().calls.clear();
    view.tick(1200);

    assert_eq!(view.current_position(), 1);
    // The fresh transition starts in the same tick.
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Animating {
            due_ms: 1210,
            scrolled: 20
        }
    );
}

#[test]
fn idle_realigns_to_last_completely_visible() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    {
        let surface = view.surface_mut();
        surface.last_complete = Some(7);
        surface.states.push_back(ScrollState::Idle);
    }
    view.tick(200);
    assert_eq!(view.current_position(), 7);
    assert_eq!(view.current_item(), 1);
    assert!(view.surface().calls.contains(&Call::Smooth(7)));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 1200 }
    );
}

#[test]
fn idle_falls_back_to_current_position() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.surface_mut().last_complete = None;
    view.on_scroll_state_changed(ScrollState::Idle, 10);
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().calls.contains(&Call::Smooth(0)));
    assert!(!view.is_running());
}

#[test]
fn idle_during_animation_is_ignored() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    view.tick(1000);
    view.surface_mut().last_complete = None;
    view.on_scroll_state_changed(ScrollState::Idle, 1005);

    assert_eq!(view.surface().count_smooth(), 0);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Animating {
            due_ms: 1010,
            scrolled: 20
        }
    );
}

#[test]
fn paged_idle_after_drag_resumes_autoplay() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    view.on_scroll_state_changed(ScrollState::Dragging, 300);
    view.on_scroll_state_changed(ScrollState::Settling, 400);
    assert_eq!(view.surface().count_smooth(), 0);

    view.surface_mut().first_complete = Some(1);
    view.on_scroll_state_changed(ScrollState::Idle, 600);
    assert_eq!(view.current_position(), 1);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 1600 }
    );

    view.tick(1600);
    assert_eq!(view.surface().jumps(), vec![2]);
}

#[test]
fn page_callbacks_receive_events_until_unregistered() {
    let (mut view, _adapter) = paged(&["A", "B", "C"]);
    let events = Rc::new(RefCell::new(Vec::new()));
    let id = view.register_page_change_callback({
        let events = Rc::clone(&events);
        move |e: &PageEvent| events.borrow_mut().push(*e)
    });
    view.start(0);
    view.tick(1000);
    view.on_scroll_state_changed(ScrollState::Dragging, 1100);

    assert_eq!(
        *events.borrow(),
        vec![
            PageEvent::Selected {
                position: 1,
                item: 1
            },
            PageEvent::ScrollStateChanged(ScrollState::Dragging),
        ]
    );

    assert!(view.unregister_page_change_callback(id));
    assert!(!view.unregister_page_change_callback(id));
    view.on_scroll_state_changed(ScrollState::Idle, 1200);
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn layout_binds_visible_positions() {
    let (mut view, adapter) = paged(&["A", "B", "C"]);
    view.surface_mut().visible = 2..4;
    view.layout().unwrap();

    let positions: Vec<usize> = view.attached().iter().map(|a| a.position()).collect();
    assert_eq!(positions, vec![2, 3]);
    assert_eq!(view.holder_at(2).unwrap().bound, Some((2, "C")));
    assert_eq!(view.holder_at(3).unwrap().bound, Some((0, "A")));

    // Already attached positions are not rebound; recycled holders are reused.
    view.surface_mut().visible = 3..5;
    view.layout().unwrap();
    assert_eq!(*adapter.binds.borrow(), vec![2, 0, 1]);
    assert_eq!(view.holder_at(4).unwrap().bound, Some((1, "B")));
    assert_eq!(view.holder_at(4).unwrap().view_type, 0);
    assert!(view.holder_at(2).is_none());
}

#[test]
fn layout_with_empty_adapter_binds_nothing() {
    let (mut view, adapter) = paged(&[]);
    view.surface_mut().visible = 0..2;
    view.layout().unwrap();
    assert!(view.attached().is_empty());
    assert!(adapter.binds.borrow().is_empty());
}

#[test]
fn layout_fails_fast_for_items_not_filling_the_viewport() {
    let (mut view, adapter) = paged(&["A", "B"]);
    let params = LayoutParams::new(Dimension::MatchParent, Dimension::WrapContent);
    adapter.params.set(params);

    let err = view.layout().unwrap_err();
    assert_eq!(
        err,
        BannerError::ItemDoesNotFillViewport {
            position: 0,
            params
        }
    );
    assert!(err.to_string().contains("must fill the whole banner"));
}

#[test]
fn adapter_changes_reach_the_surface_on_tick() {
    let (mut view, adapter) = paged(&["A", "B", "C"]);
    view.layout().unwrap();
    assert_eq!(view.attached().len(), 1);

    adapter.emit(AdapterChange::RangeInserted { start: 3, count: 1 });
    view.tick(10);

    let changes = &view.surface().changes;
    assert_eq!(
        changes.last(),
        Some(&(
            AdapterChange::RangeInserted { start: 3, count: 1 },
            UNBOUNDED_ITEM_COUNT
        ))
    );
    // Holders are rebound after a change.
    assert!(view.attached().is_empty());
    view.layout().unwrap();
    assert_eq!(adapter.binds.borrow().len(), 2);
}

#[test]
fn shrinking_the_list_clamps_the_current_position() {
    let (mut view, adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    for now in (1000..=5000).step_by(1000) {
        view.tick(now);
    }
    assert_eq!(view.current_position(), 5);

    adapter.set_items(&["A"]);
    view.tick(5001);
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().calls.contains(&Call::ScrollTo(0)));
}

#[test]
fn set_adapter_resets_position() {
    let (mut view, adapter) = paged(&["A", "B", "C"]);
    view.start(0);
    view.tick(1000);
    view.tick(2000);
    assert_eq!(view.current_position(), 2);

    let other = TestAdapter::new(&["X", "Y"]);
    view.set_adapter(Some(other.clone()));
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().calls.contains(&Call::ScrollTo(0)));
    assert_eq!(adapter.observers.len(), 0);
    assert_eq!(other.observers.len(), 1);

    view.set_adapter(None);
    assert_eq!(view.adapter_wrapper().item_count(), 0);
    assert_eq!(other.observers.len(), 0);
}

#[test]
fn set_adapter_ends_a_transition_in_flight() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    view.tick(1100);
    assert!(view.is_animating());

    let other = TestAdapter::new(&["X", "Y", "Z"]);
    view.set_adapter(Some(other));
    assert!(!view.is_animating());
    assert_eq!(view.snapshot().scrolled_distance, 0);
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 2110 }
    );
    assert_eq!(view.surface().calls.last(), Some(&Call::ScrollTo(0)));

    // The next transition covers a whole page again.
    view.surface_mut().calls.clear();
    view.tick(2600);
    assert_eq!(view.current_position(), 1);
    assert_eq!(view.surface().scrolled(), (1000, 0));
}

#[test]
fn orientation_change_ends_a_transition_in_flight() {
    let (mut view, _adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    view.tick(1100);

    view.set_orientation(Orientation::Vertical);
    assert_eq!(view.surface().calls.last(), Some(&Call::ScrollTo(0)));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 2110 }
    );
}

#[test]
fn shrinking_to_one_item_ends_a_transition_in_flight() {
    let (mut view, adapter) = stepped(&["A", "B", "C"]);
    view.start(0);
    view.tick(1100);
    assert_eq!(view.current_position(), 0);

    adapter.set_items(&["A"]);
    view.tick(1105);
    assert_eq!(view.current_position(), 0);
    assert!(view.surface().calls.contains(&Call::ScrollTo(0)));
    assert_eq!(
        view.autoplay_state(),
        AutoplayState::Scheduled { due_ms: 2110 }
    );
}

#[test]
fn destroy_releases_registrations() {
    let (mut view, adapter) = paged(&["A", "B", "C"]);
    let calls = Rc::new(Cell::new(0));
    view.register_page_change_callback({
        let calls = Rc::clone(&calls);
        move |_e: &PageEvent| calls.set(calls.get() + 1)
    });
    view.start(0);
    view.destroy();

    assert!(view.is_destroyed());
    assert!(!view.is_running());
    assert_eq!(adapter.observers.len(), 0);
    assert!(!view.adapter_wrapper().is_subscribed());

    view.start(0);
    view.tick(10_000);
    view.on_scroll_state_changed(ScrollState::Dragging, 10_001);
    assert!(!view.is_running());
    assert!(view.surface().jumps().is_empty());
    assert_eq!(calls.get(), 0);
    assert_eq!(view.layout(), Ok(()));

    // Changes on the caller's adapter no longer reach the view.
    let before = view.surface().changes.len();
    adapter.emit(AdapterChange::Reset);
    view.tick(10_002);
    assert_eq!(view.surface().changes.len(), before);
}

#[test]
fn snapshot_reflects_state() {
    let (mut view, _adapter) = stepped(&["A", "B"]);
    assert_eq!(view.snapshot(), CarouselSnapshot::default());
    view.start(0);
    view.tick(1020);
    assert_eq!(
        view.snapshot(),
        CarouselSnapshot {
            current_index: 0,
            is_running: true,
            is_animating: true,
            scrolled_distance: 60,
        }
    );
}

#[test]
fn options_defaults_depend_on_mode() {
    let paged = BannerOptions::paged();
    assert_eq!(paged.gap_interval_ms, DEFAULT_PAGED_GAP_INTERVAL_MS);
    let stepped = BannerOptions::default();
    assert_eq!(stepped.mode, AutoplayMode::Stepped);
    assert_eq!(stepped.gap_interval_ms, DEFAULT_STEPPED_GAP_INTERVAL_MS);
    assert_eq!(stepped.scroll_duration_ms, DEFAULT_SCROLL_DURATION_MS);
    assert!(stepped.auto_start);
    assert_eq!(stepped.orientation, Orientation::Horizontal);
}
