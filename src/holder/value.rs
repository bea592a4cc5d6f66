use {
    crate::observe::{Broadcast, Fetchable, Sink, Source},
    std::{
        fmt,
        sync::{Arc, RwLock},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Mutable observable scalar: every `set` overwrites and broadcasts, even
/// when the new value equals the old one. A subscription finalized with
/// `sync()` receives the current value first.
pub struct Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    value: Arc<RwLock<V>>,
    cast: Broadcast<V>,
}

impl<V> Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(value: V) -> Self {
        Holder {
            value: Arc::new(RwLock::new(value)),
            cast: Broadcast::new(),
        }
    }

    pub fn value(&self) -> V {
        self.value.read().unwrap().clone()
    }

    pub fn set(&self, value: V) {
        {
            let mut current = self.value.write().unwrap();
            *current = value.clone();
        }
        // write lock released before fan-out; handlers may read back
        self.cast.send(&value);
    }
}

impl<V> Clone for Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Holder {
            value: self.value.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<V> PartialEq for Holder<V>
where
    V: Clone + Send + Sync + PartialEq + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<V> fmt::Debug for Holder<V>
where
    V: Clone + Send + Sync + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Holder").field(&self.value()).finish()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<V> Source for Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    fn broadcast(&self) -> Broadcast<V> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<V> {
        Some(self.value())
    }
}

impl<V> Fetchable for Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fetched_value(&self) -> Option<V> {
        Some(self.value())
    }
}

impl<V> Sink for Holder<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    fn receive(&self, value: &V) {
        self.set(value.clone());
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{holder::value::*, observe::Source};
    use std::sync::{Arc, RwLock};

    #[test]
    fn sync_delivers_current_value_first1() {
        let holder = Holder::new("initial".to_string());
        let received = Arc::new(RwLock::new(Vec::new()));

        let observer = {
            let received = received.clone();
            holder
                .chain()
                .each(move |value: &String| received.write().unwrap().push(value.clone()))
                .sync()
        };

        assert_eq!(*received.read().unwrap(), vec!["initial".to_string()]);

        holder.set("changed".to_string());

        assert_eq!(
            *received.read().unwrap(),
            vec!["initial".to_string(), "changed".to_string()]
        );

        observer.invalidate();
    }

    #[test]
    fn set_broadcasts_equal_values1() {
        // no deduplication: setting the same value broadcasts again
        let holder = Holder::new(1);
        let count = Arc::new(RwLock::new(0usize));

        let _observer = {
            let count = count.clone();
            holder.chain().each(move |_| *count.write().unwrap() += 1).end()
        };

        holder.set(1);
        holder.set(1);

        assert_eq!(*count.read().unwrap(), 2);
    }

    #[test]
    fn handler_reads_consistent_value1() {
        let holder = Holder::new(0);
        let seen = Arc::new(RwLock::new(None));

        let _observer = {
            let holder = holder.clone();
            let seen = seen.clone();
            holder
                .clone()
                .chain()
                .each(move |value| *seen.write().unwrap() = Some((*value, holder.value())))
                .end()
        };

        holder.set(5);

        assert_eq!(*seen.read().unwrap(), Some((5, 5)));
    }

    #[test]
    fn equality_compares_values1() {
        assert_eq!(Holder::new(1), Holder::new(1));
        assert_ne!(Holder::new(1), Holder::new(2));
    }
}
