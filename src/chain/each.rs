use {
    crate::{
        chain::Chain,
        observe::{Handler, Sink, Source},
    },
    std::{
        marker::PhantomData,
        sync::{atomic::Ordering, Arc},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Side-effect stage. The subscription's validity is re-checked right
    /// before the callback, so invalidating from an earlier handler in the
    /// same dispatch stops delivery here.
    pub fn each<F>(self, each: F) -> Chain<Out, Src>
    where
        F: Fn(&Out) + Send + Sync + 'static,
    {
        let build = self.build;
        Chain {
            build: Box::new(move |valid, next| {
                let alive = valid.clone();
                let effect: Handler<Out> = Arc::new(move |value: &Out| {
                    if !alive.load(Ordering::SeqCst) {
                        return;
                    }
                    each(value);
                    next(value);
                });
                build(valid, effect)
            }),
            _src: PhantomData,
        }
    }

    /// Forward every value into a [`Sink`], then pass it on.
    pub fn feed<S>(self, sink: &S) -> Chain<Out, Src>
    where
        S: Sink<Value = Out>,
    {
        let sink = sink.clone();
        self.each(move |value| sink.receive(value))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{holder::Notifier, observe::Source};
    use std::sync::{Arc, RwLock};

    #[test]
    fn feed1() {
        let notifier = Notifier::<i32>::new();
        let receiving = Notifier::<i32>::new();

        let received = Arc::new(RwLock::new(None));

        let observer = notifier.chain().feed(&receiving).end();
        let receiving_observer = {
            let received = received.clone();
            receiving
                .chain()
                .each(move |value| *received.write().unwrap() = Some(*value))
                .end()
        };

        notifier.notify(1);

        assert_eq!(*received.read().unwrap(), Some(1));

        observer.invalidate();
        receiving_observer.invalidate();
    }

    #[test]
    fn invalidate_from_within1() {
        // an observer invalidated by its own callback receives nothing more,
        // even within the same dispatch
        let notifier = Notifier::<Vec<i32>>::new();
        let received = Arc::new(RwLock::new(Vec::new()));
        let slot: Arc<RwLock<Option<crate::observe::Observer>>> = Arc::new(RwLock::new(None));

        let observer = {
            let received = received.clone();
            let slot = slot.clone();
            notifier
                .chain()
                .enumerate()
                .each(move |(index, value): &(usize, i32)| {
                    received.write().unwrap().push((*index, *value));
                    if let Some(observer) = slot.read().unwrap().as_ref() {
                        observer.invalidate();
                    }
                })
                .end()
        };
        *slot.write().unwrap() = Some(observer);

        notifier.notify(vec![5, 6, 7]);

        assert_eq!(*received.read().unwrap(), vec![(0, 5)]);
    }
}
