use {
    crate::{
        holder::{
            ArrayHolder, DictionaryHolder, Holder, RelayableArrayHolder,
            RelayableDictionaryHolder, RelayableHolder,
        },
        observe::{Broadcast, Fetchable, Source},
    },
    std::{collections::HashMap, hash::Hash},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Capability-narrowed view over a source: chains and reads delegate to the
/// wrapped holder, mutation stays out of reach.
#[derive(Clone)]
pub struct ReadOnly<S>
where
    S: Source,
{
    source: S,
}

impl<S> ReadOnly<S>
where
    S: Source,
{
    pub fn new(source: &S) -> Self {
        ReadOnly {
            source: source.clone(),
        }
    }
}

impl<S> Source for ReadOnly<S>
where
    S: Source,
{
    type Value = S::Value;

    fn broadcast(&self) -> Broadcast<S::Value> {
        self.source.broadcast()
    }

    fn replay_value(&self) -> Option<S::Value> {
        self.source.replay_value()
    }
}

impl<S> Fetchable for ReadOnly<S>
where
    S: Fetchable,
{
    fn fetched_value(&self) -> Option<S::Value> {
        self.source.fetched_value()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<V> ReadOnly<Holder<V>>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn value(&self) -> V {
        self.source.value()
    }
}

impl<V> ReadOnly<RelayableHolder<V>>
where
    V: Source,
{
    pub fn value(&self) -> V {
        self.source.value()
    }
}

impl<E> ReadOnly<ArrayHolder<E>>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn raw(&self) -> Vec<E> {
        self.source.raw()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn element(&self, at: usize) -> E {
        self.source.element(at)
    }
}

impl<E> ReadOnly<RelayableArrayHolder<E>>
where
    E: Source,
{
    pub fn raw(&self) -> Vec<E> {
        self.source.raw()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn element(&self, at: usize) -> E {
        self.source.element(at)
    }
}

impl<K, V> ReadOnly<DictionaryHolder<K, V>>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn raw(&self) -> HashMap<K, V> {
        self.source.raw()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.source.get(key)
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl<K, V> ReadOnly<RelayableDictionaryHolder<K, V>>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Source,
{
    pub fn raw(&self) -> HashMap<K, V> {
        self.source.raw()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.source.get(key)
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
