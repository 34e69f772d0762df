//! Reactive state container.
//!
//! [`Store<T>`] holds exactly one value and pushes every change to its
//! observers, synchronously and in registration order. A new observer is
//! called once with the current value as soon as it subscribes.
//!
//! # Invariants
//!
//! 1. The store always holds one complete value. Transformations run to
//!    completion before anything is written.
//! 2. Every `set`/`update` bumps the version by exactly one and notifies every
//!    observer, even when the new value equals the old one.
//! 3. Observers are notified in registration order.
//! 4. An unsubscribed observer is never called again, including later in a
//!    notification cycle that is already running.
//! 5. Writes made by an observer are queued and delivered after the current
//!    cycle, so every observer sees every write in write order.
//!
//! # Failure Modes
//!
//! - **Transformation panics or returns `Err`**: nothing is written and no
//!   observer runs.
//! - **Store dropped while subscriptions live**: the handles become inert and
//!   unsubscribing them is a no-op.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, instrument, trace};

type Observer<T> = Rc<dyn Fn(&T)>;

/// Shared interior for [`Store<T>`].
struct StoreInner<T> {
    value: T,
    /// Bumped once per write.
    version: u64,
    next_id: u64,
    /// Registration order is notification order.
    observers: Vec<(u64, Observer<T>)>,
    /// Written values still waiting to be delivered, oldest first.
    pending: VecDeque<T>,
    /// Set while a notification cycle is draining `pending`.
    notifying: bool,
}

impl<T> StoreInner<T> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.observers.iter().any(|(oid, _)| *oid == id)
    }
}

/// A single value with synchronous change notification.
///
/// Cloning a `Store` creates a new handle to the **same** value and observer
/// list. The store is single-threaded (`!Send`, `!Sync`).
///
/// No borrow of the interior is held while an observer runs, so observers may
/// read the store, write to it, or (un)subscribe from inside a notification.
pub struct Store<T> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl<T: Clone + Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Creates a store holding `initial`.
    #[instrument(skip(initial))]
    pub fn new(initial: T) -> Self {
        debug!("Creating store");
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                value: initial,
                version: 0,
                next_id: 0,
                observers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Reads the current value without cloning it.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this store or subscribes to it, since the
    /// value stays borrowed while `f` runs. Use [`get`](Self::get) when the
    /// closure needs to mutate.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of writes since creation.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live observers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Replaces the value and notifies every observer.
    ///
    /// Called from inside an observer, the value is stored at once but
    /// delivered only after the running cycle finishes.
    #[instrument(skip(self, value))]
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push_back(value.clone());
            inner.value = value;
            inner.version += 1;
            debug!(version = inner.version, "Store value replaced");
            if inner.notifying {
                trace!(queued = inner.pending.len(), "Notification queued");
                return;
            }
            inner.notifying = true;
        }
        self.notify();
    }

    /// Stores `f(current)` and notifies every observer.
    ///
    /// `f` receives a copy of the current value. If it panics the store keeps
    /// its previous value.
    #[instrument(skip(self, f))]
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Like [`update`](Self::update), for transformations that can fail.
    ///
    /// # Errors
    ///
    /// Returns the error from `f` unchanged. The value is left as it was and
    /// no observer is called.
    #[instrument(skip(self, f))]
    pub fn try_update<E>(&self, f: impl FnOnce(T) -> Result<T, E>) -> Result<(), E> {
        match f(self.get()) {
            Ok(next) => {
                self.set(next);
                Ok(())
            }
            Err(err) => {
                debug!("Transformation failed, store left unchanged");
                Err(err)
            }
        }
    }

    /// Registers `observer` and calls it once with the current value.
    ///
    /// The observer stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    #[instrument(skip(self, observer))]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let observer: Observer<T> = Rc::new(observer);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, Rc::clone(&observer)));
            debug!(id, observers = inner.observers.len(), "Observer subscribed");
            (id, inner.value.clone())
        };

        let weak: Weak<RefCell<StoreInner<T>>> = Rc::downgrade(&self.inner);
        let subscription = Subscription::new(
            id,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.observers.retain(|(oid, _)| *oid != id);
                    debug!(id, observers = inner.observers.len(), "Observer unsubscribed");
                }
            }),
        );

        // A panic here drops the handle, which removes the observer again.
        observer(&current);
        subscription
    }

    /// Drains `pending`, delivering each value to the observers registered
    /// when its turn comes.
    fn notify(&self) {
        let _cycle = NotifyCycle { inner: &self.inner };

        loop {
            let (value, observers) = {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(value) => (value, inner.observers.clone()),
                    None => break,
                }
            };
            trace!(observers = observers.len(), "Notifying observers");

            for (id, observer) in observers {
                if !self.inner.borrow().is_subscribed(id) {
                    trace!(id, "Skipping observer removed mid-cycle");
                    continue;
                }
                observer(&value);
            }
        }
    }
}

/// Ends a notification cycle, also when an observer panics.
struct NotifyCycle<'a, T> {
    inner: &'a RefCell<StoreInner<T>>,
}

impl<T> Drop for NotifyCycle<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}

/// Handle for one registered observer.
///
/// Call [`unsubscribe`](Self::unsubscribe) or drop the handle to stop
/// notifications. Unsubscribing twice is a no-op.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    fn new(id: u64, release: Box<dyn FnOnce()>) -> Self {
        Self {
            id,
            release: RefCell::new(Some(release)),
        }
    }

    /// Identifier of the observer within its store.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True until [`unsubscribe`](Self::unsubscribe) has been called.
    pub fn is_active(&self) -> bool {
        self.release.borrow().is_some()
    }

    /// Removes the observer from its store.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn unsubscribe(&self) {
        let release = self.release.borrow_mut().take();
        match release {
            Some(release) => release(),
            None => trace!("Already unsubscribed"),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
