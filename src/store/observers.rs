// src/store/observers.rs
use crate::domain::Property;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Where a change delivered to observers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A save made through this store.
    Local,
    /// A write by another context sharing the same storage medium.
    External,
}

type Callback = Rc<dyn Fn(&[Property], ChangeOrigin)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// Observers of one store. Callbacks run synchronously, in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ObserverRegistry {
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Property], ChangeOrigin) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Rc::new(callback)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn notify(&self, properties: &[Property], origin: ChangeOrigin) {
        // Snapshot first so callbacks may subscribe, unsubscribe or mutate the
        // store without hitting an outstanding borrow.
        let callbacks: Vec<Callback> = self
            .inner
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        tracing::debug!(
            observers = callbacks.len(),
            count = properties.len(),
            ?origin,
            "notifying property observers"
        );

        for cb in callbacks {
            cb(properties, origin);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.callbacks.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn callbacks_fire_until_unsubscribed() {
        let registry = ObserverRegistry::default();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let sub = registry.subscribe(move |_, _| h.set(h.get() + 1));

        registry.notify(&[], ChangeOrigin::Local);
        sub.unsubscribe();
        registry.notify(&[], ChangeOrigin::Local);

        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribing_one_keeps_the_others() {
        let registry = ObserverRegistry::default();
        let a = registry.subscribe(|_, _| {});
        let _b = registry.subscribe(|_, _| {});

        drop(a);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn callback_may_subscribe_during_notify() {
        let registry = Rc::new(ObserverRegistry::default());
        let held = Rc::new(RefCell::new(Vec::new()));

        let (r, h) = (Rc::clone(&registry), Rc::clone(&held));
        let _sub = registry.subscribe(move |_, _| {
            h.borrow_mut().push(r.subscribe(|_, _| {}));
        });

        registry.notify(&[], ChangeOrigin::External);
        assert_eq!(registry.len(), 2);
    }
}
