use crate::observe::{Broadcast, Sink, Source};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Broadcast-only event source: no retained value, `notify` fans a value
/// out synchronously to every current subscriber.
pub struct Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    cast: Broadcast<V>,
}

impl<V> Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Notifier {
            cast: Broadcast::new(),
        }
    }

    pub fn notify(&self, value: V) {
        self.cast.send(&value);
    }
}

impl<V> Clone for Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Notifier {
            cast: self.cast.clone(),
        }
    }
}

impl<V> Default for Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Notifier::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<V> Source for Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    fn broadcast(&self) -> Broadcast<V> {
        self.cast.clone()
    }
}

impl<V> Sink for Notifier<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    fn receive(&self, value: &V) {
        self.cast.send(value);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{holder::notifier::*, observe::Source};
    use std::sync::{Arc, RwLock};

    #[test]
    fn notify1() {
        let notifier = Notifier::<i32>::new();
        let received = Arc::new(RwLock::new(None));

        let observer = {
            let received = received.clone();
            notifier
                .chain()
                .each(move |value| *received.write().unwrap() = Some(*value))
                .end()
        };

        assert_eq!(*received.read().unwrap(), None);

        notifier.notify(3);

        assert_eq!(*received.read().unwrap(), Some(3));

        observer.invalidate();

        notifier.notify(4);

        assert_eq!(*received.read().unwrap(), Some(3));
    }

    #[test]
    fn notify_unit1() {
        let notifier = Notifier::<()>::new();
        let received = Arc::new(RwLock::new(false));

        let observer = {
            let received = received.clone();
            notifier
                .chain()
                .each(move |_| *received.write().unwrap() = true)
                .end()
        };

        assert!(!*received.read().unwrap());

        notifier.notify(());

        assert!(*received.read().unwrap());

        observer.invalidate();
    }

    #[test]
    fn subscribers_fire_in_order1() {
        let notifier = Notifier::<i32>::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        let first = {
            let order = order.clone();
            notifier.chain().each(move |_| order.write().unwrap().push(1)).end()
        };
        let second = {
            let order = order.clone();
            notifier.chain().each(move |_| order.write().unwrap().push(2)).end()
        };

        notifier.notify(0);

        assert_eq!(*order.read().unwrap(), vec![1, 2]);

        first.invalidate();
        second.invalidate();
    }
}
