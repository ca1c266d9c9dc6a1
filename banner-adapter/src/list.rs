use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use banner::{
    AdapterChange, AdapterObserver, ItemAdapter, ItemView, LayoutParams, ObserverId, ObserverSet,
    Payload,
};

/// A view created by [`ListAdapter`], remembering the index it was last bound to.
#[derive(Clone, Debug)]
pub struct ListHolder<V> {
    view: V,
    index: Option<usize>,
}

impl<V> ListHolder<V> {
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Index in the backing list, once bound.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl<V: ItemView> ItemView for ListHolder<V> {
    fn layout_params(&self) -> LayoutParams {
        self.view.layout_params()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClickCallbackId(u64);

/// Invoked with the originating view, the bound item and its index.
pub type ClickCallback<T, V> = Rc<dyn Fn(&V, &T, usize)>;

type CreateFn<V> = Box<dyn Fn(u32) -> V>;
type BindFn<T, V> = Box<dyn Fn(&mut V, &T, usize)>;
type ViewTypeFn<T> = Box<dyn Fn(&T, usize) -> u32>;

/// A `Vec`-backed [`ItemAdapter`].
///
/// Every mutation notifies registered observers with the matching [`AdapterChange`], after the
/// data has been updated. Share it as `Rc<ListAdapter<..>>`: one clone goes to
/// `BannerView::set_adapter`, the caller keeps another to edit the list.
///
/// The bind function runs while the list is borrowed and must not mutate the adapter. Click
/// callbacks may.
pub struct ListAdapter<T, V> {
    items: RefCell<Vec<T>>,
    observers: ObserverSet,
    create: CreateFn<V>,
    bind: BindFn<T, V>,
    view_type: Option<ViewTypeFn<T>>,
    clicks: RefCell<Vec<(ClickCallbackId, ClickCallback<T, V>)>>,
    next_click_id: Cell<u64>,
}

impl<T, V> ListAdapter<T, V> {
    pub fn new(
        create: impl Fn(u32) -> V + 'static,
        bind: impl Fn(&mut V, &T, usize) + 'static,
    ) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            observers: ObserverSet::new(),
            create: Box::new(create),
            bind: Box::new(bind),
            view_type: None,
            clicks: RefCell::new(Vec::new()),
            next_click_id: Cell::new(0),
        }
    }

    /// Assigns view types per item; holders are only reused for the same view type.
    pub fn with_view_type(mut self, view_type: impl Fn(&T, usize) -> u32 + 'static) -> Self {
        self.view_type = Some(Box::new(view_type));
        self
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.items.borrow().get(index).cloned()
    }

    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }

    /// Replaces the whole list.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.notify(AdapterChange::Reset);
    }

    pub fn push(&self, item: T) {
        let start = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.notify(AdapterChange::RangeInserted { start, count: 1 });
    }

    pub fn extend(&self, new_items: impl IntoIterator<Item = T>) {
        let (start, count) = {
            let mut items = self.items.borrow_mut();
            let start = items.len();
            items.extend(new_items);
            (start, items.len() - start)
        };
        if count > 0 {
            self.notify(AdapterChange::RangeInserted { start, count });
        }
    }

    /// Returns `false` if `index > len`.
    pub fn insert(&self, index: usize, item: T) -> bool {
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return false;
            }
            items.insert(index, item);
        }
        self.notify(AdapterChange::RangeInserted {
            start: index,
            count: 1,
        });
        true
    }

    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.borrow_mut();
            (index < items.len()).then(|| items.remove(index))
        }?;
        self.notify(AdapterChange::RangeRemoved {
            start: index,
            count: 1,
        });
        Some(removed)
    }

    /// Moves one item from `from` to `to`. Returns `false` if either index is out of range.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        {
            let mut items = self.items.borrow_mut();
            if from >= items.len() || to >= items.len() {
                return false;
            }
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.notify(AdapterChange::RangeMoved { from, to, count: 1 });
        true
    }

    /// Replaces one item, returning the previous value.
    pub fn replace(&self, index: usize, item: T, payload: Option<Payload>) -> Option<T> {
        let previous = {
            let mut items = self.items.borrow_mut();
            let slot = items.get_mut(index)?;
            std::mem::replace(slot, item)
        };
        self.notify(AdapterChange::RangeChanged {
            start: index,
            count: 1,
            payload,
        });
        Some(previous)
    }

    pub fn clear(&self) {
        let count = {
            let mut items = self.items.borrow_mut();
            let count = items.len();
            items.clear();
            count
        };
        if count > 0 {
            self.notify(AdapterChange::RangeRemoved { start: 0, count });
        }
    }

    /// Tells observers that anything may have changed.
    pub fn notify_reset(&self) {
        self.notify(AdapterChange::Reset);
    }

    fn notify(&self, change: AdapterChange) {
        self.observers.notify(&change);
    }

    pub fn add_click_callback(
        &self,
        callback: impl Fn(&V, &T, usize) + 'static,
    ) -> ClickCallbackId {
        let id = ClickCallbackId(self.next_click_id.get());
        self.next_click_id.set(id.0.wrapping_add(1));
        self.clicks.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn remove_click_callback(&self, id: ClickCallbackId) -> bool {
        let mut clicks = self.clicks.borrow_mut();
        let before = clicks.len();
        clicks.retain(|(other, _)| *other != id);
        clicks.len() != before
    }

    /// Delivers a click on `holder` to the click callbacks.
    ///
    /// Returns `false` when the holder is not bound to an existing item.
    pub fn perform_click(&self, holder: &ListHolder<V>) -> bool
    where
        T: Clone,
    {
        let Some(index) = holder.index else {
            return false;
        };
        let Some(item) = self.get(index) else {
            return false;
        };
        let callbacks: Vec<ClickCallback<T, V>> = self
            .clicks
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(&holder.view, &item, index);
        }
        true
    }
}

impl<T, V> ItemAdapter for ListAdapter<T, V> {
    type Holder = ListHolder<V>;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_view_type(&self, index: usize) -> u32 {
        let items = self.items.borrow();
        match (&self.view_type, items.get(index)) {
            (Some(view_type), Some(item)) => view_type(item, index),
            _ => 0,
        }
    }

    fn create_holder(&self, view_type: u32) -> ListHolder<V> {
        ListHolder {
            view: (self.create)(view_type),
            index: None,
        }
    }

    fn bind_holder(&self, holder: &mut ListHolder<V>, index: usize) {
        let items = self.items.borrow();
        if let Some(item) = items.get(index) {
            (self.bind)(&mut holder.view, item, index);
            holder.index = Some(index);
        }
    }

    fn register_observer(&self, observer: Rc<dyn AdapterObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    fn unregister_observer(&self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }
}

impl<T: fmt::Debug, V> fmt::Debug for ListAdapter<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListAdapter")
            .field("items", &self.items.borrow())
            .field("observers", &self.observers)
            .field("clicks", &self.clicks.borrow().len())
            .finish()
    }
}
