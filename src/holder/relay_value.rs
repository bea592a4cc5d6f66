use {
    crate::observe::{Broadcast, Fetchable, Observer, Sink, Source},
    std::sync::{Arc, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Event of a holder whose value is itself observable: either the stored
/// value was swapped, or the stored value reported a change of its own.
#[derive(Clone)]
pub enum RelayValueEvent<V>
where
    V: Source,
{
    Current(V),
    Relayed { value: V, event: V::Value },
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

struct RelayValueState<V>
where
    V: Source,
{
    value: V,
    relay: Option<Observer>,
}

impl<V> Drop for RelayValueState<V>
where
    V: Source,
{
    fn drop(&mut self) {
        if let Some(relay) = &self.relay {
            relay.invalidate();
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Observable scalar over an observable value. Exactly one relay
/// subscription follows the currently stored value; swapping the value
/// invalidates the old relay before the new one takes over.
///
/// The relay holds only weak references back to this holder, so it never
/// extends the holder's lifetime; a relayed event looks the stored value up
/// at delivery time.
pub struct RelayableHolder<V>
where
    V: Source,
{
    state: Arc<RwLock<RelayValueState<V>>>,
    cast: Broadcast<RelayValueEvent<V>>,
}

impl<V> RelayableHolder<V>
where
    V: Source,
{
    pub fn new(value: V) -> Self {
        let holder = RelayableHolder {
            state: Arc::new(RwLock::new(RelayValueState {
                value: value.clone(),
                relay: None,
            })),
            cast: Broadcast::new(),
        };
        let relay = holder.relay(&value);
        holder.state.write().unwrap().relay = Some(relay);
        holder
    }

    pub fn value(&self) -> V {
        self.state.read().unwrap().value.clone()
    }

    pub fn set(&self, value: V) {
        let old = {
            let mut state = self.state.write().unwrap();
            state.value = value.clone();
            state.relay.replace(self.relay(&value))
        };
        if let Some(old) = old {
            old.invalidate();
        }
        self.cast.send(&RelayValueEvent::Current(value));
    }

    fn relay(&self, value: &V) -> Observer {
        let weak_state = Arc::downgrade(&self.state);
        let weak_cast = self.cast.downgrade();
        value
            .chain()
            .each(move |event: &V::Value| {
                let (Some(state), Some(cast)) = (weak_state.upgrade(), weak_cast.upgrade())
                else {
                    return;
                };
                let value = { state.read().unwrap().value.clone() };
                cast.send(&RelayValueEvent::Relayed {
                    value,
                    event: event.clone(),
                });
            })
            .end()
    }
}

impl<V> Clone for RelayableHolder<V>
where
    V: Source,
{
    fn clone(&self) -> Self {
        RelayableHolder {
            state: self.state.clone(),
            cast: self.cast.clone(),
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<V> Source for RelayableHolder<V>
where
    V: Source,
{
    type Value = RelayValueEvent<V>;

    fn broadcast(&self) -> Broadcast<RelayValueEvent<V>> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<RelayValueEvent<V>> {
        self.fetched_value()
    }
}

impl<V> Fetchable for RelayableHolder<V>
where
    V: Source,
{
    fn fetched_value(&self) -> Option<RelayValueEvent<V>> {
        Some(RelayValueEvent::Current(self.value()))
    }
}

impl<V> Sink for RelayableHolder<V>
where
    V: Source,
{
    type Value = V;

    fn receive(&self, value: &V) {
        self.set(value.clone());
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        holder::{relay_value::*, Holder},
        observe::Source,
    };
    use std::sync::{Arc, RwLock};

    #[test]
    fn relays_inner_changes1() {
        let inner = Holder::new(0);
        let holder = RelayableHolder::new(inner.clone());

        let events = Arc::new(RwLock::new(Vec::new()));

        let observer = {
            let events = events.clone();
            holder
                .chain()
                .each(move |event: &RelayValueEvent<Holder<i32>>| {
                    events.write().unwrap().push(event.clone())
                })
                .sync()
        };

        assert_eq!(events.read().unwrap().len(), 1);

        inner.set(1);

        assert_eq!(events.read().unwrap().len(), 2);
        match &events.read().unwrap()[1] {
            RelayValueEvent::Relayed { value, event } => {
                assert_eq!(value, &Holder::new(1));
                assert_eq!(*event, 1);
            }
            _ => panic!("expected a relayed event"),
        }

        // swapping the value retires the old relay
        let inner2 = Holder::new(2);
        holder.set(inner2.clone());

        assert_eq!(events.read().unwrap().len(), 3);

        inner.set(10);

        assert_eq!(events.read().unwrap().len(), 3);

        inner2.set(3);

        assert_eq!(events.read().unwrap().len(), 4);

        observer.invalidate();
    }

    #[test]
    fn value_follows_set1() {
        let holder = RelayableHolder::new(Holder::new(0));

        assert_eq!(holder.value(), Holder::new(0));

        holder.set(Holder::new(1));

        assert_eq!(holder.value(), Holder::new(1));
    }
}
