use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::position::{exposed_count, real_position};

/// An opaque partial-update payload attached to [`AdapterChange::RangeChanged`].
///
/// Payloads are compared by identity, never by value.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    pub fn new(value: impl Any) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

/// A structural change signal emitted by an item adapter.
#[derive(Clone, Debug, PartialEq)]
pub enum AdapterChange {
    /// Everything may have changed.
    Reset,
    RangeChanged {
        start: usize,
        count: usize,
        payload: Option<Payload>,
    },
    RangeInserted {
        start: usize,
        count: usize,
    },
    RangeRemoved {
        start: usize,
        count: usize,
    },
    RangeMoved {
        from: usize,
        to: usize,
        count: usize,
    },
}

/// Receives change notifications from an adapter.
pub trait AdapterObserver {
    fn on_changed(&self, change: &AdapterChange);
}

impl<F: Fn(&AdapterChange)> AdapterObserver for F {
    fn on_changed(&self, change: &AdapterChange) {
        self(change)
    }
}

/// Handle returned by observer registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// A registry of change observers.
///
/// Adapters embed one of these to implement [`ItemAdapter::register_observer`] and
/// [`ItemAdapter::unregister_observer`]. Notification walks a snapshot of the registry, so an
/// observer may register, unregister or mutate the adapter while being notified.
#[derive(Default)]
pub struct ObserverSet {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(ObserverId, Rc<dyn AdapterObserver>)>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: Rc<dyn AdapterObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.observers.borrow_mut().push((id, observer));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }

    pub fn notify(&self, change: &AdapterChange) {
        let snapshot: Vec<Rc<dyn AdapterObserver>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer.on_changed(change);
        }
    }
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("len", &self.len())
            .finish()
    }
}

/// A finite, caller-owned item adapter.
///
/// The caller keeps its own `Rc` to the adapter to mutate the data and emits change
/// notifications through the registered observers. Methods take `&self`; implementations use
/// interior mutability.
pub trait ItemAdapter {
    type Holder;

    fn item_count(&self) -> usize;

    fn item_view_type(&self, _index: usize) -> u32 {
        0
    }

    fn create_holder(&self, view_type: u32) -> Self::Holder;

    fn bind_holder(&self, holder: &mut Self::Holder, index: usize);

    fn register_observer(&self, observer: Rc<dyn AdapterObserver>) -> ObserverId;

    fn unregister_observer(&self, id: ObserverId) -> bool;
}

/// Shared handle to a type-erased adapter.
pub type SharedAdapter<H> = Rc<dyn ItemAdapter<Holder = H>>;

/// Re-emits every change of the wrapped adapter to the wrapper's own observers.
struct Forwarder {
    downstream: Rc<ObserverSet>,
}

impl AdapterObserver for Forwarder {
    fn on_changed(&self, change: &AdapterChange) {
        btrace!(?change, "AdapterWrapper: forwarding change");
        self.downstream.notify(change);
    }
}

/// Decorates a finite adapter so it looks boundless.
///
/// Positions passed in are virtual; they are mapped to real indexes with
/// [`crate::real_position`] before reaching the wrapped adapter. Change notifications are
/// forwarded verbatim.
pub struct AdapterWrapper<H> {
    adapter: Option<SharedAdapter<H>>,
    subscription: Option<ObserverId>,
    forwarder: Rc<dyn AdapterObserver>,
    observers: Rc<ObserverSet>,
}

impl<H> AdapterWrapper<H> {
    pub fn new() -> Self {
        let observers = Rc::new(ObserverSet::new());
        let forwarder: Rc<dyn AdapterObserver> = Rc::new(Forwarder {
            downstream: Rc::clone(&observers),
        });
        Self {
            adapter: None,
            subscription: None,
            forwarder,
            observers,
        }
    }

    /// Replaces the wrapped adapter and notifies a full reset.
    ///
    /// The subscription to the previous adapter is removed before the new one is made, so at
    /// most one subscription is ever active. `None` clears the content.
    pub fn set_adapter(&mut self, adapter: Option<SharedAdapter<H>>) {
        self.unsubscribe();
        if let Some(adapter) = &adapter {
            self.subscription = Some(adapter.register_observer(Rc::clone(&self.forwarder)));
        }
        bdebug!(
            has_adapter = adapter.is_some(),
            "AdapterWrapper::set_adapter"
        );
        self.adapter = adapter;
        self.observers.notify(&AdapterChange::Reset);
    }

    pub fn adapter(&self) -> Option<&SharedAdapter<H>> {
        self.adapter.as_ref()
    }

    /// Drops the wrapped adapter and its subscription without notifying.
    pub fn release(&mut self) {
        self.unsubscribe();
        self.adapter = None;
    }

    fn unsubscribe(&mut self) {
        if let (Some(adapter), Some(id)) = (&self.adapter, self.subscription.take()) {
            adapter.unregister_observer(id);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Number of items in the wrapped adapter.
    pub fn backing_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, |a| a.item_count())
    }

    /// Item count exposed to the surface: `0`, `1`, or effectively unbounded.
    pub fn item_count(&self) -> usize {
        exposed_count(self.backing_count())
    }

    pub fn real_position(&self, position: usize) -> usize {
        real_position(position, self.backing_count())
    }

    /// Returns `None` when there is nothing to show at `position`.
    pub fn item_view_type(&self, position: usize) -> Option<u32> {
        let adapter = self.adapter.as_ref()?;
        let count = adapter.item_count();
        if count == 0 {
            return None;
        }
        Some(adapter.item_view_type(real_position(position, count)))
    }

    pub fn create_holder(&self, view_type: u32) -> Option<H> {
        self.adapter
            .as_ref()
            .map(|adapter| adapter.create_holder(view_type))
    }

    /// Binds `holder` to the item at virtual `position`.
    ///
    /// Returns `false` without calling the adapter when there is no adapter or it is empty.
    pub fn bind_holder(&self, holder: &mut H, position: usize) -> bool {
        let Some(adapter) = &self.adapter else {
            return false;
        };
        let count = adapter.item_count();
        if count == 0 {
            return false;
        }
        adapter.bind_holder(holder, real_position(position, count));
        true
    }

    pub fn register_observer(&self, observer: Rc<dyn AdapterObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }
}

impl<H> Default for AdapterWrapper<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for AdapterWrapper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterWrapper")
            .field("has_adapter", &self.adapter.is_some())
            .field("subscribed", &self.subscription.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}
