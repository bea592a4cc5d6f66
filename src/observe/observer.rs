use std::{
    ops::{AddAssign, SubAssign},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Observer
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
type Teardown = Box<dyn Fn() + Send + Sync>;

/// Disposal handle for one subscription.
///
/// Holds the subscription's validity flag plus teardown closures that detach
/// its slots from every source the chain registered with. Teardown captures
/// only weak references, so an observer never keeps a source alive and
/// invalidating after the source is gone is a silent no-op.
#[derive(Clone)]
pub struct Observer {
    valid: Arc<AtomicBool>,
    teardown: Arc<Vec<Teardown>>,
}

impl Observer {
    pub(crate) fn new(valid: Arc<AtomicBool>, teardown: Vec<Teardown>) -> Self {
        Observer {
            valid,
            teardown: Arc::new(teardown),
        }
    }

    /// Idempotent: the first call clears the validity flag and detaches the
    /// slots; later calls do nothing. No handler of this subscription fires
    /// once this returns.
    pub fn invalidate(&self) {
        if self.valid.swap(false, Ordering::SeqCst) {
            #[cfg(feature = "tracing")]
            tracing::debug!("observer invalidated");

            for teardown in self.teardown.iter() {
                teardown();
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }

    fn is_same(&self, other: &Observer) -> bool {
        Arc::ptr_eq(&self.valid, &other.valid)
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Observer Pool
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Groups observers for bulk teardown. `pool += observer` adds,
/// `pool -= &observer` removes without invalidating, and `invalidate`
/// invalidates every member exactly once, leaving the pool empty and
/// reusable.
#[derive(Default)]
pub struct ObserverPool {
    observers: Vec<Observer>,
}

impl ObserverPool {
    pub fn new() -> Self {
        ObserverPool::default()
    }

    pub fn add(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn remove(&mut self, observer: &Observer) {
        self.observers.retain(|held| !held.is_same(observer));
    }

    pub fn invalidate(&mut self) {
        for observer in self.observers.drain(..) {
            observer.invalidate();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl AddAssign<Observer> for ObserverPool {
    fn add_assign(&mut self, observer: Observer) {
        self.add(observer);
    }
}

impl SubAssign<&Observer> for ObserverPool {
    fn sub_assign(&mut self, observer: &Observer) {
        self.remove(observer);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        holder::{Holder, Notifier},
        observe::{ObserverPool, Source},
    };
    use std::sync::{Arc, RwLock};

    #[test]
    fn pool_invalidate1() {
        let mut pool = ObserverPool::new();
        let notifier = Notifier::<i32>::new();
        let holder = Holder::new("0".to_string());

        let notifier_received = Arc::new(RwLock::new(None));
        let holder_received = Arc::new(RwLock::new(None));

        {
            let received = notifier_received.clone();
            pool += notifier
                .chain()
                .each(move |value| *received.write().unwrap() = Some(*value))
                .end();
        }
        {
            let received = holder_received.clone();
            pool += holder
                .chain()
                .each(move |value: &String| *received.write().unwrap() = Some(value.clone()))
                .sync();
        }

        assert_eq!(*holder_received.read().unwrap(), Some("0".to_string()));

        notifier.notify(1);
        holder.set("2".to_string());

        assert_eq!(*notifier_received.read().unwrap(), Some(1));
        assert_eq!(*holder_received.read().unwrap(), Some("2".to_string()));

        *notifier_received.write().unwrap() = None;
        *holder_received.write().unwrap() = None;

        pool.invalidate();

        notifier.notify(3);
        holder.set("4".to_string());

        assert_eq!(*notifier_received.read().unwrap(), None);
        assert_eq!(*holder_received.read().unwrap(), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn pool_remove1() {
        let mut pool = ObserverPool::new();
        let notifier = Notifier::<i32>::new();
        let holder = Holder::new("0".to_string());

        let notifier_received = Arc::new(RwLock::new(None));
        let holder_received = Arc::new(RwLock::new(None));

        let notifier_observer = {
            let received = notifier_received.clone();
            notifier
                .chain()
                .each(move |value| *received.write().unwrap() = Some(*value))
                .end()
        };
        let holder_observer = {
            let received = holder_received.clone();
            holder
                .chain()
                .each(move |value: &String| *received.write().unwrap() = Some(value.clone()))
                .sync()
        };

        pool += notifier_observer;
        pool += holder_observer.clone();

        assert_eq!(*holder_received.read().unwrap(), Some("0".to_string()));

        // a removed member is excluded from pool-wide invalidation
        pool -= &holder_observer;

        pool.invalidate();

        notifier.notify(3);
        holder.set("4".to_string());

        assert_eq!(*notifier_received.read().unwrap(), None);
        assert_eq!(*holder_received.read().unwrap(), Some("4".to_string()));
    }

    #[test]
    fn invalidate_is_idempotent1() {
        let notifier = Notifier::<i32>::new();
        let count = Arc::new(RwLock::new(0usize));

        let observer = {
            let count = count.clone();
            notifier
                .chain()
                .each(move |_| *count.write().unwrap() += 1)
                .end()
        };

        notifier.notify(1);
        observer.invalidate();
        observer.invalidate();
        notifier.notify(2);

        assert_eq!(*count.read().unwrap(), 1);
        assert!(!observer.is_valid());
    }
}
