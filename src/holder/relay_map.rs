use {
    crate::observe::{Broadcast, Fetchable, Observer, Source},
    std::{
        collections::HashMap,
        hash::Hash,
        sync::{Arc, RwLock},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Event of an observable mapping whose values are themselves observable.
#[derive(Clone)]
pub enum RelayMapEvent<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    Fetched(HashMap<K, V>),
    Any(HashMap<K, V>),
    Inserted { key: K, value: V },
    Removed { key: K, value: V },
    Replaced { key: K, value: V },
    Relayed { key: K, value: V, event: V::Value },
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

struct RelayMapState<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    entries: HashMap<K, V>,
    relays: HashMap<K, Observer>,
}

impl<K, V> Drop for RelayMapState<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    fn drop(&mut self) {
        for relay in self.relays.values() {
            relay.invalidate();
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Observable unique-key mapping of observable values, with the same
/// one-relay-per-stored-value discipline as the sequence variant, keyed
/// instead of indexed.
pub struct RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    state: Arc<RwLock<RelayMapState<K, V>>>,
    cast: Broadcast<RelayMapEvent<K, V>>,
}

impl<K, V> RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    pub fn new() -> Self {
        RelayableDictionaryHolder {
            state: Arc::new(RwLock::new(RelayMapState {
                entries: HashMap::new(),
                relays: HashMap::new(),
            })),
            cast: Broadcast::new(),
        }
    }

    pub fn with_entries(entries: HashMap<K, V>) -> Self {
        let holder = RelayableDictionaryHolder::new();
        {
            let mut state = holder.state.write().unwrap();
            for (key, value) in &entries {
                let relay = holder.relay(key.clone(), value);
                state.relays.insert(key.clone(), relay);
            }
            state.entries = entries;
        }
        holder
    }

    pub fn raw(&self) -> HashMap<K, V> {
        self.state.read().unwrap().entries.clone()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.state.read().unwrap().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().entries.is_empty()
    }

    pub fn set(&self, entries: HashMap<K, V>) {
        let old = {
            let mut state = self.state.write().unwrap();
            let relays = entries
                .iter()
                .map(|(key, value)| (key.clone(), self.relay(key.clone(), value)))
                .collect();
            state.entries = entries.clone();
            std::mem::replace(&mut state.relays, relays)
        };
        for relay in old.values() {
            relay.invalidate();
        }
        self.cast.send(&RelayMapEvent::Any(entries));
    }

    /// The key must be absent.
    pub fn insert(&self, key: K, value: V) {
        {
            let mut state = self.state.write().unwrap();
            assert!(
                !state.entries.contains_key(&key),
                "insert requires an absent key"
            );
            let relay = self.relay(key.clone(), &value);
            state.relays.insert(key.clone(), relay);
            state.entries.insert(key.clone(), value.clone());
        }
        self.cast.send(&RelayMapEvent::Inserted { key, value });
    }

    /// The key must be present.
    pub fn replace(&self, key: K, value: V) {
        let old = {
            let mut state = self.state.write().unwrap();
            assert!(
                state.entries.contains_key(&key),
                "replace requires a present key"
            );
            let relay = self.relay(key.clone(), &value);
            state.entries.insert(key.clone(), value.clone());
            state.relays.insert(key.clone(), relay)
        };
        if let Some(old) = old {
            old.invalidate();
        }
        self.cast.send(&RelayMapEvent::Replaced { key, value });
    }

    /// Insert-or-replace on `Some`, remove on `None`; never panics.
    pub fn update(&self, key: K, value: Option<V>) {
        match value {
            Some(value) => {
                if self.get(&key).is_some() {
                    self.replace(key, value);
                } else {
                    self.insert(key, value);
                }
            }
            None => {
                self.remove_value(&key);
            }
        }
    }

    pub fn remove_value(&self, key: &K) -> Option<V> {
        let (removed, relay) = {
            let mut state = self.state.write().unwrap();
            let relay = state.relays.remove(key);
            (state.entries.remove(key), relay)
        };
        // the relay dies before the reference is dropped or broadcast
        if let Some(relay) = relay {
            relay.invalidate();
        }
        match removed {
            Some(value) => {
                self.cast.send(&RelayMapEvent::Removed {
                    key: key.clone(),
                    value: value.clone(),
                });
                Some(value)
            }
            None => None,
        }
    }

    /// Already empty: nothing changed, nothing is broadcast (uniform with
    /// the sequence holder).
    pub fn remove_all(&self) {
        let old;
        {
            let mut state = self.state.write().unwrap();
            if state.entries.is_empty() {
                return;
            }
            state.entries.clear();
            old = std::mem::take(&mut state.relays);
        }
        for relay in old.values() {
            relay.invalidate();
        }
        self.cast.send(&RelayMapEvent::Any(HashMap::new()));
    }

    fn relay(&self, key: K, value: &V) -> Observer {
        let weak_state = Arc::downgrade(&self.state);
        let weak_cast = self.cast.downgrade();
        value
            .chain()
            .each(move |event: &V::Value| {
                let (Some(state), Some(cast)) = (weak_state.upgrade(), weak_cast.upgrade())
                else {
                    return;
                };
                let Some(value) = ({
                    let state = state.read().unwrap();
                    state.entries.get(&key).cloned()
                }) else {
                    return;
                };
                cast.send(&RelayMapEvent::Relayed {
                    key: key.clone(),
                    value,
                    event: event.clone(),
                });
            })
            .end()
    }

    #[cfg(test)]
    fn live_relays(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .relays
            .values()
            .filter(|relay| relay.is_valid())
            .count()
    }
}

impl<K, V> Clone for RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    fn clone(&self) -> Self {
        RelayableDictionaryHolder {
            state: self.state.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<K, V> Default for RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    fn default() -> Self {
        RelayableDictionaryHolder::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<K, V> Source for RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    type Value = RelayMapEvent<K, V>;

    fn broadcast(&self) -> Broadcast<RelayMapEvent<K, V>> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<RelayMapEvent<K, V>> {
        self.fetched_value()
    }
}

impl<K, V> Fetchable for RelayableDictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    fn fetched_value(&self) -> Option<RelayMapEvent<K, V>> {
        Some(RelayMapEvent::Fetched(self.raw()))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
