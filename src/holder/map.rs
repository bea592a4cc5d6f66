use {
    crate::observe::{Broadcast, Fetchable, Source},
    serde::{Deserialize, Serialize},
    std::{
        collections::HashMap,
        hash::Hash,
        sync::{Arc, RwLock},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Structural change of an observable unique-key mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MapEvent<K, V>
where
    K: Eq + Hash,
{
    Fetched(HashMap<K, V>),
    Any(HashMap<K, V>),
    Inserted { key: K, value: V },
    Removed { key: K, value: V },
    Replaced { key: K, value: V },
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Observable unique-key mapping.
///
/// `insert` and `replace` enforce their presence contracts and panic on
/// violation; `update` dispatches on presence and never panics; lookups and
/// removals of absent keys return `None`.
pub struct DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Arc<RwLock<HashMap<K, V>>>,
    cast: Broadcast<MapEvent<K, V>>,
}

impl<K, V> DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        DictionaryHolder {
            entries: Arc::new(RwLock::new(HashMap::new())),
            cast: Broadcast::new(),
        }
    }

    pub fn with_entries(entries: HashMap<K, V>) -> Self {
        DictionaryHolder {
            entries: Arc::new(RwLock::new(entries)),
            cast: Broadcast::new(),
        }
    }

    pub fn raw(&self) -> HashMap<K, V> {
        self.entries.read().unwrap().clone()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.read().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.read().unwrap().capacity()
    }

    pub fn reserve(&self, additional: usize) {
        self.entries.write().unwrap().reserve(additional);
    }

    pub fn set(&self, entries: HashMap<K, V>) {
        {
            *self.entries.write().unwrap() = entries.clone();
        }
        self.cast.send(&MapEvent::Any(entries));
    }

    /// The key must be absent.
    pub fn insert(&self, key: K, value: V) {
        {
            let mut entries = self.entries.write().unwrap();
            assert!(!entries.contains_key(&key), "insert requires an absent key");
            entries.insert(key.clone(), value.clone());
        }
        self.cast.send(&MapEvent::Inserted { key, value });
    }

    /// The key must be present.
    pub fn replace(&self, key: K, value: V) {
        {
            let mut entries = self.entries.write().unwrap();
            assert!(entries.contains_key(&key), "replace requires a present key");
            entries.insert(key.clone(), value.clone());
        }
        self.cast.send(&MapEvent::Replaced { key, value });
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
        let removed = { self.entries.write().unwrap().remove(key) };
        match removed {
            Some(value) => {
                self.cast.send(&MapEvent::Removed {
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
        {
            let mut entries = self.entries.write().unwrap();
            if entries.is_empty() {
                return;
            }
            entries.clear();
        }
        self.cast.send(&MapEvent::Any(HashMap::new()));
    }
}

impl<K, V> Clone for DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        DictionaryHolder {
            entries: self.entries.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<K, V> Default for DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        DictionaryHolder::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<K, V> Source for DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    type Value = MapEvent<K, V>;

    fn broadcast(&self) -> Broadcast<MapEvent<K, V>> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<MapEvent<K, V>> {
        self.fetched_value()
    }
}

impl<K, V> Fetchable for DictionaryHolder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fetched_value(&self) -> Option<MapEvent<K, V>> {
        Some(MapEvent::Fetched(self.raw()))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
