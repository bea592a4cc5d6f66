use {
    crate::observe::Handler,
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock, Weak,
    },
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Broadcast
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
struct Slot<V: ?Sized> {
    id: u64,
    valid: Arc<AtomicBool>,
    handler: Handler<V>,
}

impl<V: ?Sized> Clone for Slot<V> {
    fn clone(&self) -> Self {
        Slot {
            id: self.id,
            valid: self.valid.clone(),
            handler: self.handler.clone(),
        }
    }
}

struct CastState<V: ?Sized> {
    slots: Vec<Slot<V>>,
    next_id: u64,
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Fan-out half of every source: an ordered list of subscription slots.
///
/// Dispatch iterates over a snapshot, so handlers may subscribe, unsubscribe
/// or re-enter `send` while a dispatch is running. A slot whose validity flag
/// has been cleared is skipped, with the flag re-checked right before each
/// handler call.
pub struct Broadcast<V: ?Sized> {
    state: Arc<RwLock<CastState<V>>>,
}

impl<V: ?Sized> Broadcast<V> {
    pub fn new() -> Self {
        Broadcast {
            state: Arc::new(RwLock::new(CastState {
                slots: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub(crate) fn insert(&self, valid: Arc<AtomicBool>, handler: Handler<V>) -> u64 {
        let mut state = self.state.write().unwrap();
        state.slots.retain(|slot| slot.valid.load(Ordering::SeqCst));
        let id = state.next_id;
        state.next_id += 1;
        state.slots.push(Slot { id, valid, handler });
        id
    }

    pub(crate) fn remove(&self, id: u64) {
        let mut state = self.state.write().unwrap();
        state.slots.retain(|slot| slot.id != id);
    }

    pub fn send(&self, value: &V) {
        let snapshot: Vec<Slot<V>> = {
            let state = self.state.read().unwrap();
            state
                .slots
                .iter()
                .filter(|slot| slot.valid.load(Ordering::SeqCst))
                .cloned()
                .collect()
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(subscribers = snapshot.len(), "fan-out");

        for slot in snapshot {
            if slot.valid.load(Ordering::SeqCst) {
                (slot.handler)(value);
            }
        }
    }

    pub fn downgrade(&self) -> WeakBroadcast<V> {
        WeakBroadcast {
            state: Arc::downgrade(&self.state),
        }
    }
}

impl<V: ?Sized> Clone for Broadcast<V> {
    fn clone(&self) -> Self {
        Broadcast {
            state: self.state.clone(),
        }
    }
}

impl<V: ?Sized> Default for Broadcast<V> {
    fn default() -> Self {
        Broadcast::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct WeakBroadcast<V: ?Sized> {
    state: Weak<RwLock<CastState<V>>>,
}

impl<V: ?Sized> WeakBroadcast<V> {
    pub fn upgrade(&self) -> Option<Broadcast<V>> {
        self.state.upgrade().map(|state| Broadcast { state })
    }
}

impl<V: ?Sized> Clone for WeakBroadcast<V> {
    fn clone(&self) -> Self {
        WeakBroadcast {
            state: self.state.clone(),
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
